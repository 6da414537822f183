#[cfg(test)]
mod tests {
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::{Distribution, Tensor};
    use prednet::prelude::*;

    type Backend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_unroll_is_differentiable() {
        let device = Default::default();
        let config = PredNetConfig::new(vec![3, 8], vec![3, 8])
            .with_image_size((16, 16))
            .with_output_mode(OutputMode::Error);
        let model = PredNet::<Backend>::new(config, &device);

        let video = Tensor::<Backend, 5>::random(
            [1, 2, 3, 16, 16],
            Distribution::Uniform(0.0, 1.0),
            &device,
        );
        let errors = match model.forward(video) {
            PredNetOutput::Error(errors) => errors,
            other => panic!("error mode should emit errors, got {:?}", other),
        };

        let loss = errors.sum();
        let loss_value: f32 = loss.clone().into_scalar();
        assert!(loss_value.is_finite());

        // Backprop through every step of the unroll into the shared weights
        let _gradients = loss.backward();
    }
}

//! Per-layer parameter bundle of the predictive stack.

use crate::cells::ConvLstmCell;
use crate::config::PredNetConfig;
use crate::state::LayerState;
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::interpolate::{Interpolate2d, Interpolate2dConfig, InterpolateMode};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::PaddingConfig2d;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// One layer of the predictive stack.
///
/// Owns the layer's learnable parameters: the recurrent gate convolution, the
/// prediction (Ahat) convolution, and - below the top layer - the feedforward
/// (A) convolution that turns this layer's error into the next layer's input.
/// Each layer is built once and its modules are reused at every time step,
/// which is what ties the weights across the unroll.
#[derive(Module, Debug)]
pub struct PredLayer<B: Backend> {
    recurrent: ConvLstmCell<B>,
    prediction: Conv2d<B>,
    feedforward: Option<Conv2d<B>>,
    pool: MaxPool2d,
    interpolate: Interpolate2d,
}

impl<B: Backend> PredLayer<B> {
    /// Build the parameter bundle for layer `index` of the given configuration.
    ///
    /// # Panics
    /// Panics if a stack or filter-size list is shorter than the layer count.
    pub fn new(config: &PredNetConfig, index: usize, device: &B::Device) -> Self {
        let top = index == config.num_layers() - 1;

        // Recurrent input: [R, E] plus the upsampled R from above (below the top)
        let mut in_channels = config.r_stack_sizes[index] + 2 * config.stack_sizes[index];
        if !top {
            in_channels += config.r_stack_sizes[index + 1];
        }
        let recurrent = ConvLstmCell::new(
            in_channels,
            config.r_stack_sizes[index],
            config.r_filter_sizes[index],
            device,
        )
        .with_initializer(config.initializer.clone(), device);

        let prediction = Conv2dConfig::new(
            [config.r_stack_sizes[index], config.stack_sizes[index]],
            [config.ahat_filter_sizes[index]; 2],
        )
        .with_padding(PaddingConfig2d::Same)
        .with_initializer(config.initializer.clone())
        .init(device);

        let feedforward = (!top).then(|| {
            Conv2dConfig::new(
                [2 * config.stack_sizes[index], config.stack_sizes[index + 1]],
                [config.a_filter_sizes[index]; 2],
            )
            .with_padding(PaddingConfig2d::Same)
            .with_initializer(config.initializer.clone())
            .init(device)
        });

        Self {
            recurrent,
            prediction,
            feedforward,
            pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            interpolate: Interpolate2dConfig::new()
                .with_scale_factor(Some([2.0, 2.0]))
                .with_mode(InterpolateMode::Nearest)
                .init(),
        }
    }

    /// Run the recurrent cell on the previous state plus the upsampled
    /// representation from the layer above (absent at the top layer).
    ///
    /// Returns (new_representation, new_memory).
    pub fn recurrent_update(
        &self,
        state: &LayerState<B>,
        top_down: Option<Tensor<B, 4>>,
    ) -> (Tensor<B, 4>, Tensor<B, 4>) {
        let mut inputs = vec![state.representation.clone(), state.error.clone()];
        if let Some(top_down) = top_down {
            inputs.push(top_down);
        }

        self.recurrent
            .forward(Tensor::cat(inputs, 1), state.memory.clone())
    }

    /// Predict this layer's input from its fresh representation (Ahat).
    /// Unclamped; the layer-0 clamp belongs to the step function.
    pub fn predict(&self, representation: Tensor<B, 4>) -> Tensor<B, 4> {
        activation::relu(self.prediction.forward(representation))
    }

    /// Turn this layer's error into the input activation of the layer above:
    /// convolution, relu, then 2x max-pooling. `None` at the top layer.
    pub fn feed_upward(&self, error: Tensor<B, 4>) -> Option<Tensor<B, 4>> {
        self.feedforward
            .as_ref()
            .map(|conv| self.pool.forward(activation::relu(conv.forward(error))))
    }

    /// 2x nearest-neighbor upsampling of this layer's representation, matching
    /// the resolution of the layer below.
    pub fn upsample(&self, representation: Tensor<B, 4>) -> Tensor<B, 4> {
        self.interpolate.forward(representation)
    }

    /// Whether this layer feeds a layer above it.
    pub fn has_upper_layer(&self) -> bool {
        self.feedforward.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredNetConfig;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn two_layer_config() -> PredNetConfig {
        PredNetConfig::new(vec![3, 8], vec![4, 6]).with_image_size((16, 16))
    }

    #[test]
    fn test_layer_roles() {
        let device = Default::default();
        let config = two_layer_config();

        let bottom = PredLayer::<TestBackend>::new(&config, 0, &device);
        let top = PredLayer::<TestBackend>::new(&config, 1, &device);

        assert!(bottom.has_upper_layer());
        assert!(!top.has_upper_layer());
    }

    #[test]
    fn test_predict_shape() {
        let device = Default::default();
        let config = two_layer_config();
        let layer = PredLayer::<TestBackend>::new(&config, 0, &device);

        let representation = Tensor::<TestBackend, 4>::zeros([2, 4, 16, 16], &device);
        let predicted = layer.predict(representation);

        assert_eq!(predicted.dims(), [2, 3, 16, 16]);
    }

    #[test]
    fn test_feed_upward_halves_resolution() {
        let device = Default::default();
        let config = two_layer_config();
        let layer = PredLayer::<TestBackend>::new(&config, 0, &device);

        let error = Tensor::<TestBackend, 4>::zeros([2, 6, 16, 16], &device);
        let above = layer.feed_upward(error).unwrap();

        assert_eq!(above.dims(), [2, 8, 8, 8]);
    }

    #[test]
    fn test_upsample_doubles_resolution() {
        let device = Default::default();
        let config = two_layer_config();
        let layer = PredLayer::<TestBackend>::new(&config, 1, &device);

        let representation = Tensor::<TestBackend, 4>::zeros([2, 6, 8, 8], &device);
        let below = layer.upsample(representation);

        assert_eq!(below.dims(), [2, 6, 16, 16]);
    }
}

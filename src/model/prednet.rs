//! The PredNet model: state initialization, the two-pass recurrent step, and
//! the unroll across the time axis of the input video.

use crate::config::{LayerKind, OutputMode, PredNetConfig};
use crate::model::PredLayer;
use crate::state::LayerState;
use burn::module::{Ignored, Module};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// What a single [`PredNet::step`] emits, according to the configured
/// [`OutputMode`].
#[derive(Clone, Debug)]
pub enum StepOutput<B: Backend> {
    /// Clamped frame prediction, `[batch, channels, height, width]`
    Prediction(Tensor<B, 4>),
    /// Mean absolute error per layer, `[batch, num_layers]`
    Error(Tensor<B, 2>),
    /// Both the frame prediction and the per-layer error vector
    All {
        prediction: Tensor<B, 4>,
        errors: Tensor<B, 2>,
    },
    /// The selected layer's A / Ahat / R / E tensor at its own resolution
    Layer(Tensor<B, 4>),
}

/// What [`PredNet::forward`] emits: the per-step outputs stacked along a new
/// time axis (dim 1).
#[derive(Clone, Debug)]
pub enum PredNetOutput<B: Backend> {
    /// Frame predictions, `[batch, time, channels, height, width]`
    Prediction(Tensor<B, 5>),
    /// Per-layer mean errors, `[batch, time, num_layers]`
    Error(Tensor<B, 3>),
    /// Both of the above
    All {
        predictions: Tensor<B, 5>,
        errors: Tensor<B, 3>,
    },
    /// The selected layer tensor per step, `[batch, time, channels, height, width]`
    Layer(Tensor<B, 5>),
}

impl<B: Backend> PredNetOutput<B> {
    /// The prediction sequence, if this mode produced one.
    pub fn predictions(&self) -> Option<&Tensor<B, 5>> {
        match self {
            PredNetOutput::Prediction(predictions) => Some(predictions),
            PredNetOutput::All { predictions, .. } => Some(predictions),
            _ => None,
        }
    }

    /// The error sequence, if this mode produced one.
    pub fn errors(&self) -> Option<&Tensor<B, 3>> {
        match self {
            PredNetOutput::Error(errors) => Some(errors),
            PredNetOutput::All { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// PredNet predictive-coding stack
///
/// A hierarchy of convolutional LSTM layers in which every layer predicts its
/// own input and forwards the prediction error upward. Constructed once from
/// a [`PredNetConfig`]; the same per-layer modules are applied at every time
/// step, so weights are shared across the whole unroll.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct PredNet<B: Backend> {
    layers: Vec<PredLayer<B>>,
    config: Ignored<PredNetConfig>,
}

impl<B: Backend> PredNet<B> {
    /// Build the layer stack described by `config`.
    ///
    /// Stack widths and filter sizes are taken on trust: inconsistent list
    /// lengths panic while the layers are built, and mismatched channel
    /// widths surface as shape errors on the first forward pass. The one
    /// check performed here is that a `Layer` output mode names a layer that
    /// exists, since that mistake would otherwise stay invisible until deep
    /// into a run.
    pub fn new(config: PredNetConfig, device: &B::Device) -> Self {
        if let OutputMode::Layer { index, .. } = config.output_mode {
            if index >= config.num_layers() {
                panic!(
                    "Output mode {} names layer {}, but the model only has {} layers",
                    config.output_mode,
                    index,
                    config.num_layers()
                );
            }
        }

        let layers = (0..config.num_layers())
            .map(|index| PredLayer::new(&config, index, device))
            .collect();

        Self {
            layers,
            config: Ignored(config),
        }
    }

    /// The configuration this model was built from
    pub fn config(&self) -> &PredNetConfig {
        &self.config.0
    }

    /// Number of layers in the stack
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// All-zero initial state for every layer, at each layer's own resolution.
    pub fn init_state(&self, batch_size: usize, device: &B::Device) -> Vec<LayerState<B>> {
        (0..self.layers.len())
            .map(|index| {
                let (height, width) = self.config.layer_resolution(index);
                LayerState::zeros(
                    batch_size,
                    self.config.r_stack_sizes[index],
                    self.config.stack_sizes[index],
                    height,
                    width,
                    device,
                )
            })
            .collect()
    }

    /// Advance the stack by one time step.
    ///
    /// Two passes. First, top-down, every layer's recurrent cell consumes its
    /// previous (R, E) plus the upsampled fresh R of the layer above, yielding
    /// the new (R, C). Second, bottom-up, each layer predicts its input,
    /// forms the split error, and pools the error upward as the next layer's
    /// input activation.
    ///
    /// # Arguments
    /// * `frame` - Input frame of shape `[batch, frame_channels, height, width]`
    /// * `state` - One [`LayerState`] per layer, from [`Self::init_state`] or
    ///   the previous step
    ///
    /// # Returns
    /// The step output per the configured mode, and the next state tuple.
    pub fn step(
        &self,
        frame: Tensor<B, 4>,
        state: &[LayerState<B>],
    ) -> (StepOutput<B>, Vec<LayerState<B>>) {
        let num_layers = self.layers.len();

        // Top-down pass: new (R, C) per layer, deepest first
        let mut updated: Vec<(Tensor<B, 4>, Tensor<B, 4>)> = Vec::with_capacity(num_layers);
        let mut top_down: Option<Tensor<B, 4>> = None;
        for index in (0..num_layers).rev() {
            let (representation, memory) =
                self.layers[index].recurrent_update(&state[index], top_down);
            top_down = (index > 0).then(|| self.layers[index].upsample(representation.clone()));
            updated.push((representation, memory));
        }
        updated.reverse();

        // Bottom-up pass: predictions and split errors, layer 0 first
        let mut input = frame;
        let mut frame_prediction: Option<Tensor<B, 4>> = None;
        let mut layer_output: Option<Tensor<B, 4>> = None;
        let mut errors: Vec<Tensor<B, 4>> = Vec::with_capacity(num_layers);
        for (index, layer) in self.layers.iter().enumerate() {
            let mut predicted = layer.predict(updated[index].0.clone());
            if index == 0 {
                predicted = predicted.clamp_max(self.config.pixel_max);
                frame_prediction = Some(predicted.clone());
            }

            // E = [relu(Ahat - A), relu(A - Ahat)] on the channel axis
            let positive = activation::relu(predicted.clone() - input.clone());
            let negative = activation::relu(input.clone() - predicted.clone());
            let error = Tensor::cat(vec![positive, negative], 1);

            if let OutputMode::Layer { kind, index: wanted } = self.config.output_mode {
                if wanted == index {
                    layer_output = Some(match kind {
                        LayerKind::A => input.clone(),
                        LayerKind::Ahat => predicted.clone(),
                        LayerKind::R => updated[index].0.clone(),
                        LayerKind::E => error.clone(),
                    });
                }
            }

            if let Some(above) = layer.feed_upward(error.clone()) {
                input = above;
            }
            errors.push(error);
        }

        let output = match self.config.output_mode {
            OutputMode::Prediction => {
                StepOutput::Prediction(frame_prediction.expect("model has no layers"))
            }
            OutputMode::Error => StepOutput::Error(self.error_vector(&errors)),
            OutputMode::All => StepOutput::All {
                prediction: frame_prediction.expect("model has no layers"),
                errors: self.error_vector(&errors),
            },
            OutputMode::Layer { .. } => {
                StepOutput::Layer(layer_output.expect("output layer index checked at build time"))
            }
        };

        let next_state = updated
            .into_iter()
            .zip(errors)
            .map(|((representation, memory), error)| LayerState {
                representation,
                memory,
                error,
            })
            .collect();

        (output, next_state)
    }

    /// Unroll [`Self::step`] across the time axis of a video.
    ///
    /// # Arguments
    /// * `input` - Video tensor of shape `[batch, time, channels, height, width]`;
    ///   batch size and step count are read from the tensor itself
    ///
    /// # Returns
    /// The per-step outputs stacked along the time axis, per the configured
    /// output mode.
    pub fn forward(&self, input: Tensor<B, 5>) -> PredNetOutput<B> {
        let device = input.device();
        let [batch_size, horizon, _, _, _] = input.dims();

        let mut state = self.init_state(batch_size, &device);
        let mut predictions: Vec<Tensor<B, 4>> = Vec::with_capacity(horizon);
        let mut errors: Vec<Tensor<B, 2>> = Vec::with_capacity(horizon);
        let mut layer_outputs: Vec<Tensor<B, 4>> = Vec::with_capacity(horizon);

        for t in 0..horizon {
            // input[batch, t, ...] -> [batch, channels, height, width]
            let frame = input.clone().narrow(1, t, 1).squeeze(1);

            let (output, next_state) = self.step(frame, &state);
            state = next_state;

            match output {
                StepOutput::Prediction(prediction) => predictions.push(prediction),
                StepOutput::Error(error) => errors.push(error),
                StepOutput::All { prediction, errors: error } => {
                    predictions.push(prediction);
                    errors.push(error);
                }
                StepOutput::Layer(tensor) => layer_outputs.push(tensor),
            }
        }

        match self.config.output_mode {
            OutputMode::Prediction => PredNetOutput::Prediction(Tensor::stack(predictions, 1)),
            OutputMode::Error => PredNetOutput::Error(Tensor::stack(errors, 1)),
            OutputMode::All => PredNetOutput::All {
                predictions: Tensor::stack(predictions, 1),
                errors: Tensor::stack(errors, 1),
            },
            OutputMode::Layer { .. } => PredNetOutput::Layer(Tensor::stack(layer_outputs, 1)),
        }
    }

    /// Mean of each layer's error tensor over all non-batch axes: one scalar
    /// per layer, `[batch, num_layers]`.
    fn error_vector(&self, errors: &[Tensor<B, 4>]) -> Tensor<B, 2> {
        let means = errors
            .iter()
            .map(|error| error.clone().flatten::<2>(1, 3).mean_dim(1))
            .collect();
        Tensor::cat(means, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn tiny_config() -> PredNetConfig {
        PredNetConfig::new(vec![3, 8], vec![3, 8])
            .with_image_size((16, 16))
            .with_horizon(3)
            .with_batch_size(2)
    }

    #[test]
    fn test_model_creation() {
        let device = Default::default();
        let model = PredNet::<TestBackend>::new(tiny_config(), &device);

        assert_eq!(model.num_layers(), 2);
        assert_eq!(model.config().input_shape(), [2, 3, 3, 16, 16]);
    }

    #[test]
    fn test_init_state_shapes() {
        let device = Default::default();
        let model = PredNet::<TestBackend>::new(tiny_config(), &device);

        let state = model.init_state(2, &device);

        assert_eq!(state.len(), 2);
        assert_eq!(state[0].representation.dims(), [2, 3, 16, 16]);
        assert_eq!(state[0].memory.dims(), [2, 3, 16, 16]);
        assert_eq!(state[0].error.dims(), [2, 6, 16, 16]);
        assert_eq!(state[1].representation.dims(), [2, 8, 8, 8]);
        assert_eq!(state[1].error.dims(), [2, 16, 8, 8]);
    }

    #[test]
    fn test_step_shapes() {
        let device = Default::default();
        let model = PredNet::<TestBackend>::new(tiny_config(), &device);

        let state = model.init_state(2, &device);
        let frame = Tensor::<TestBackend, 4>::zeros([2, 3, 16, 16], &device);

        let (output, next_state) = model.step(frame, &state);

        let StepOutput::All { prediction, errors } = output else {
            panic!("default mode should emit both outputs");
        };
        assert_eq!(prediction.dims(), [2, 3, 16, 16]);
        assert_eq!(errors.dims(), [2, 2]);
        assert_eq!(next_state.len(), 2);
        assert_eq!(next_state[1].memory.dims(), [2, 8, 8, 8]);
    }

    #[test]
    fn test_forward_shapes() {
        let device = Default::default();
        let model = PredNet::<TestBackend>::new(tiny_config(), &device);

        let video = Tensor::<TestBackend, 5>::zeros([2, 3, 3, 16, 16], &device);
        let output = model.forward(video);

        let PredNetOutput::All { predictions, errors } = output else {
            panic!("default mode should emit both outputs");
        };
        assert_eq!(predictions.dims(), [2, 3, 3, 16, 16]);
        assert_eq!(errors.dims(), [2, 3, 2]);
    }

    #[test]
    #[should_panic]
    fn test_layer_mode_out_of_range() {
        let device = Default::default();
        let config = tiny_config().with_output_mode(OutputMode::Layer {
            kind: LayerKind::R,
            index: 5,
        });
        PredNet::<TestBackend>::new(config, &device);
    }
}

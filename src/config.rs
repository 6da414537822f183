//! Model configuration and output-mode selection.

use burn::nn::Initializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which internal tensor of a layer to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    /// The actual bottom-up input activation of the layer
    A,
    /// The layer's predicted reconstruction of its input
    Ahat,
    /// The recurrent representation (hidden state)
    R,
    /// The signed prediction error (two non-negative channel halves)
    E,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::A => write!(f, "A"),
            LayerKind::Ahat => write!(f, "Ahat"),
            LayerKind::R => write!(f, "R"),
            LayerKind::E => write!(f, "E"),
        }
    }
}

/// What the model emits at each time step.
///
/// Parsed once at configuration time; the step function matches over it
/// exhaustively, so there is no code path that leaves the output unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// The clamped full-resolution frame prediction
    Prediction,
    /// One mean-absolute error scalar per layer
    Error,
    /// Both the frame prediction and the per-layer error vector
    All,
    /// A single layer's raw tensor, selected by kind and layer index
    Layer { kind: LayerKind, index: usize },
}

impl OutputMode {
    /// Parse an output mode from its string form.
    ///
    /// Recognized forms are `"prediction"`, `"error"`, `"all"`, and layer
    /// selectors such as `"R0"`, `"E1"`, `"A2"`, or `"Ahat3"`.
    ///
    /// # Panics
    /// Panics on an unrecognized mode string.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "prediction" => return OutputMode::Prediction,
            "error" => return OutputMode::Error,
            "all" => return OutputMode::All,
            _ => {}
        }

        let split = mode
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or_else(|| Self::unknown(mode));
        let (kind, index) = mode.split_at(split);
        let kind = match kind {
            "A" => LayerKind::A,
            "Ahat" => LayerKind::Ahat,
            "R" => LayerKind::R,
            "E" => LayerKind::E,
            _ => Self::unknown(mode),
        };
        let index = index.parse().unwrap_or_else(|_| Self::unknown(mode));

        OutputMode::Layer { kind, index }
    }

    fn unknown(mode: &str) -> ! {
        panic!(
            "Unknown output mode: {:?}. Valid options are \"prediction\", \"error\", \"all\", \
             or a layer selector like \"R0\", \"E1\", \"A2\", \"Ahat3\"",
            mode
        );
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Prediction => write!(f, "prediction"),
            OutputMode::Error => write!(f, "error"),
            OutputMode::All => write!(f, "all"),
            OutputMode::Layer { kind, index } => write!(f, "{}{}", kind, index),
        }
    }
}

/// Hyperparameter bundle for a [`PredNet`](crate::model::PredNet) stack.
///
/// The number of layers is implied by the length of `stack_sizes`. List
/// lengths are not validated up front: a filter list shorter than the layer
/// count fails when the corresponding layer is built, and mismatched channel
/// widths surface as shape errors on the first forward pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredNetConfig {
    /// Intended batch size of the input video (informational; the forward
    /// pass reads the actual batch size from the input tensor)
    pub batch_size: usize,
    /// Intended number of time steps T (informational, like `batch_size`)
    pub horizon: usize,
    /// Frame height and width at layer 0
    pub image_size: (usize, usize),
    /// Per-layer channel widths of the A/Ahat stack; entry 0 is the frame depth
    pub stack_sizes: Vec<usize>,
    /// Per-layer channel widths of the recurrent representation stack
    pub r_stack_sizes: Vec<usize>,
    /// Kernel sizes of the error-to-input convolutions (one per layer below the top)
    pub a_filter_sizes: Vec<usize>,
    /// Kernel sizes of the prediction convolutions (one per layer)
    pub ahat_filter_sizes: Vec<usize>,
    /// Kernel sizes of the recurrent gate convolutions (one per layer)
    pub r_filter_sizes: Vec<usize>,
    /// Per-layer loss weights; stored for the external training harness,
    /// unused by the forward pass
    pub layer_loss_weights: Vec<f32>,
    /// Upper clamp applied to the layer-0 prediction
    pub pixel_max: f32,
    /// What the model emits at each step
    pub output_mode: OutputMode,
    /// First step at which an external harness would extrapolate (feed
    /// predictions back as input); stored but not acted on here
    pub extrap_start_time: Option<usize>,
    /// Channel depth of the raw frames
    pub frame_channels: usize,
    /// Initializer applied to every convolution in the stack
    pub initializer: Initializer,
}

impl PredNetConfig {
    /// Create a configuration for the given channel stacks, with 3x3 filters
    /// everywhere and the published defaults for the remaining fields.
    pub fn new(stack_sizes: Vec<usize>, r_stack_sizes: Vec<usize>) -> Self {
        let layers = stack_sizes.len();
        let mut layer_loss_weights = vec![0.0; layers];
        if let Some(first) = layer_loss_weights.first_mut() {
            *first = 1.0;
        }

        Self {
            batch_size: 1,
            horizon: 10,
            image_size: (128, 160),
            frame_channels: stack_sizes.first().copied().unwrap_or(3),
            a_filter_sizes: vec![3; layers.saturating_sub(1)],
            ahat_filter_sizes: vec![3; layers],
            r_filter_sizes: vec![3; layers],
            layer_loss_weights,
            pixel_max: 1.0,
            output_mode: OutputMode::All,
            extrap_start_time: None,
            initializer: Initializer::KaimingUniform {
                gain: 1.0 / 3.0f64.sqrt(),
                fan_out_only: false,
            },
            stack_sizes,
            r_stack_sizes,
        }
    }

    /// Set the intended batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the intended number of time steps
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the frame height and width at layer 0
    pub fn with_image_size(mut self, image_size: (usize, usize)) -> Self {
        self.image_size = image_size;
        self
    }

    /// Set the three filter-size families: A (length L-1), Ahat (length L),
    /// and R (length L)
    pub fn with_filter_sizes(mut self, a: Vec<usize>, ahat: Vec<usize>, r: Vec<usize>) -> Self {
        self.a_filter_sizes = a;
        self.ahat_filter_sizes = ahat;
        self.r_filter_sizes = r;
        self
    }

    /// Set the per-layer loss weights passed through to the training harness
    pub fn with_layer_loss_weights(mut self, weights: Vec<f32>) -> Self {
        self.layer_loss_weights = weights;
        self
    }

    /// Set the upper clamp for the layer-0 prediction
    pub fn with_pixel_max(mut self, pixel_max: f32) -> Self {
        self.pixel_max = pixel_max;
        self
    }

    /// Set the output mode
    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Set the extrapolation start step passed through to the training harness
    pub fn with_extrap_start_time(mut self, extrap_start_time: Option<usize>) -> Self {
        self.extrap_start_time = extrap_start_time;
        self
    }

    /// Set the channel depth of the raw frames
    pub fn with_frame_channels(mut self, frame_channels: usize) -> Self {
        self.frame_channels = frame_channels;
        self
    }

    /// Set the initializer used for every convolution in the stack
    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }

    /// Number of layers in the stack
    pub fn num_layers(&self) -> usize {
        self.stack_sizes.len()
    }

    /// Spatial resolution at the given layer (halves at each level)
    pub fn layer_resolution(&self, layer: usize) -> (usize, usize) {
        let factor = 1 << layer;
        (self.image_size.0 / factor, self.image_size.1 / factor)
    }

    /// Shape of the input video tensor this configuration describes:
    /// `[batch, time, channels, height, width]`
    pub fn input_shape(&self) -> [usize; 5] {
        [
            self.batch_size,
            self.horizon,
            self.frame_channels,
            self.image_size.0,
            self.image_size.1,
        ]
    }
}

impl Default for PredNetConfig {
    /// Four layers at the published widths: stacks (3, 48, 96, 192) over
    /// 128x160 RGB frames.
    fn default() -> Self {
        Self::new(vec![3, 48, 96, 192], vec![3, 48, 96, 192])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_modes() {
        assert_eq!(OutputMode::parse("prediction"), OutputMode::Prediction);
        assert_eq!(OutputMode::parse("error"), OutputMode::Error);
        assert_eq!(OutputMode::parse("all"), OutputMode::All);
    }

    #[test]
    fn test_parse_layer_modes() {
        assert_eq!(
            OutputMode::parse("R0"),
            OutputMode::Layer {
                kind: LayerKind::R,
                index: 0
            }
        );
        assert_eq!(
            OutputMode::parse("Ahat2"),
            OutputMode::Layer {
                kind: LayerKind::Ahat,
                index: 2
            }
        );
        assert_eq!(
            OutputMode::parse("E10"),
            OutputMode::Layer {
                kind: LayerKind::E,
                index: 10
            }
        );
    }

    #[test]
    fn test_display_round_trip() {
        for mode in ["prediction", "error", "all", "R1", "E0", "A2", "Ahat3"] {
            assert_eq!(OutputMode::parse(mode).to_string(), mode);
        }
    }

    #[test]
    #[should_panic]
    fn test_parse_unknown_mode() {
        OutputMode::parse("bogus");
    }

    #[test]
    #[should_panic]
    fn test_parse_unknown_kind() {
        OutputMode::parse("Q1");
    }

    #[test]
    fn test_default_config() {
        let config = PredNetConfig::default();

        assert_eq!(config.num_layers(), 4);
        assert_eq!(config.image_size, (128, 160));
        assert_eq!(config.stack_sizes, vec![3, 48, 96, 192]);
        assert_eq!(config.a_filter_sizes.len(), 3);
        assert_eq!(config.ahat_filter_sizes.len(), 4);
        assert_eq!(config.r_filter_sizes.len(), 4);
        assert_eq!(config.layer_loss_weights, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(config.input_shape(), [1, 10, 3, 128, 160]);
    }

    #[test]
    fn test_layer_resolutions_halve() {
        let config = PredNetConfig::default();

        assert_eq!(config.layer_resolution(0), (128, 160));
        assert_eq!(config.layer_resolution(1), (64, 80));
        assert_eq!(config.layer_resolution(2), (32, 40));
        assert_eq!(config.layer_resolution(3), (16, 20));
    }
}

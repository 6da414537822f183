//! # The Predictive Layer Stack
//!
//! This module provides the full PredNet model: per-layer parameter bundles,
//! zero-state construction, the two-pass recurrent step, and the time unroll.
//! **[`PredNet`] is the primary API most users should use.**
//!
//! ## Quick Start
//!
//! ```ignore
//! use prednet::prelude::*;
//! use burn::tensor::Tensor;
//!
//! let config = PredNetConfig::new(vec![3, 48, 96], vec![3, 48, 96])
//!     .with_image_size((64, 64));
//! let model = PredNet::<Backend>::new(config, &device);
//!
//! // Process a clip: [batch=4, time=10, channels=3, 64, 64]
//! let video: Tensor<Backend, 5> = Tensor::zeros([4, 10, 3, 64, 64], &device);
//! let output = model.forward(video);
//!
//! if let PredNetOutput::All { predictions, errors } = output {
//!     // predictions: [4, 10, 3, 64, 64] - next-frame prediction per step
//!     // errors:      [4, 10, 3]         - one mean error per layer per step
//! }
//! ```
//!
//! ## Tensor Shapes
//!
//! ### Input Tensor (5D)
//!
//! | Axis | Meaning |
//! |------|---------|
//! | 0 | batch |
//! | 1 | time |
//! | 2 | channels (`frame_channels`) |
//! | 3, 4 | height, width |
//!
//! ### Outputs by Mode
//!
//! | Mode | [`PredNetOutput`] | Shape |
//! |------|-------------------|-------|
//! | `Prediction` | `Prediction` | `[batch, time, channels, height, width]` |
//! | `Error` | `Error` | `[batch, time, num_layers]` |
//! | `All` | `All { predictions, errors }` | both of the above |
//! | `Layer { kind, index }` | `Layer` | the layer tensor, stacked along time |
//!
//! ### State
//!
//! One [`LayerState`](crate::state::LayerState) per layer, at the layer's own
//! resolution (halved per level). State can be threaded manually through
//! [`PredNet::step`] for custom unrolls:
//!
//! ```ignore
//! let mut state = model.init_state(batch_size, &device);
//! for frame in frames {
//!     let (output, next_state) = model.step(frame, &state);
//!     state = next_state;
//! }
//! ```
//!
//! ## How a Step Works
//!
//! 1. **Top-down**: from the deepest layer to layer 0, each layer's ConvLSTM
//!    consumes its previous representation and error plus the upsampled fresh
//!    representation of the layer above, producing new (R, C).
//! 2. **Bottom-up**: from layer 0 upward, each layer predicts its input
//!    (`Ahat = relu(conv(R))`, clamped at layer 0), forms the split error
//!    `E = [relu(Ahat - A), relu(A - Ahat)]`, and feeds
//!    `maxpool(relu(conv(E)))` upward as the next layer's input.

pub mod layer;
pub mod prednet;

pub use layer::PredLayer;
pub use prednet::{PredNet, PredNetOutput, StepOutput};

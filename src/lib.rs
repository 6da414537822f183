//! # PredNet - Predictive Coding Video Network (Rust)
//!
//! Port of the PredNet architecture to Rust using the Burn framework.
//!
//! PredNet is a stack of convolutional LSTM units organized as a hierarchical
//! predictive-coding network. At every time step each layer predicts the
//! activation it is about to receive from below, compares the prediction with
//! the actual activation, and passes the resulting error upward while the
//! recurrent state flows downward.
//!
//! ## Features
//!
//! - **ConvLSTM cell**: convolutional gated memory unit with the standard
//!   four-gate update
//! - **Hierarchical error propagation**: signed prediction errors encoded as
//!   two non-negative channel halves, pooled upward layer by layer
//! - **Functional state threading**: the per-layer (R, C, E) tuple is carried
//!   from step to step; weights are shared across the whole unroll
//! - **Output modes**: next-frame prediction, per-layer error means, both, or
//!   any individual layer's A / Ahat / R / E tensor
//!
//! ## Quick Start
//!
//! ```rust
//! use prednet::prelude::*;
//!
//! // Four layers at the published default widths, 128x160 frames
//! let config = PredNetConfig::default();
//! assert_eq!(config.num_layers(), 4);
//! assert_eq!(config.layer_resolution(2), (32, 40));
//!
//! // Output modes parse from their string forms
//! let mode = OutputMode::parse("R1");
//! assert_eq!(mode, OutputMode::Layer { kind: LayerKind::R, index: 1 });
//! ```
//!
//! ## Model-level Usage
//!
//! ```ignore
//! use prednet::prelude::*;
//! use burn::tensor::Tensor;
//!
//! let config = PredNetConfig::new(vec![3, 48], vec![3, 48]).with_horizon(10);
//! let model = PredNet::<Backend>::new(config, &device);
//!
//! // Frames: [batch, time, channels, height, width]
//! let video: Tensor<Backend, 5> = Tensor::zeros([4, 10, 3, 128, 160], &device);
//! if let PredNetOutput::All { predictions, errors } = model.forward(video) {
//!     // predictions: [4, 10, 3, 128, 160]
//!     // errors:      [4, 10, 2]
//! }
//! ```

pub mod cells;
pub mod config;
pub mod model;
pub mod state;

pub mod prelude {
    pub use crate::cells::ConvLstmCell;
    pub use crate::config::{LayerKind, OutputMode, PredNetConfig};
    pub use crate::model::{PredLayer, PredNet, PredNetOutput, StepOutput};
    pub use crate::state::LayerState;
}

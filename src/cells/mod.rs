//! # Recurrent Cell Implementation
//!
//! This module provides the single-timestep convolutional memory cell used by
//! every layer of the predictive stack. The cell processes one timestep at a
//! time and is wrapped by the higher-level model in [`crate::model`] for
//! sequence processing.
//!
//! ## When to Use the Cell Directly
//!
//! Most users should use [`PredNet`](crate::model::PredNet), which handles
//! state initialization, the layer hierarchy, and the time unroll. Use the
//! cell directly when you need:
//!
//! - Custom sequence processing logic
//! - A convolutional LSTM outside the predictive-coding stack
//! - Fine-grained control over state management
//!
//! ## Tensor Shapes
//!
//! The cell expects 4D tensors for single-timestep processing:
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[batch, in_channels, height, width]` | Concatenated layer input |
//! | `memory` | `[batch, hidden_channels, height, width]` | Previous memory cell |
//! | `new_hidden` | `[batch, hidden_channels, height, width]` | Cell output |
//! | `new_memory` | `[batch, hidden_channels, height, width]` | Updated memory cell |

pub mod conv_lstm_cell;

pub use conv_lstm_cell::ConvLstmCell;

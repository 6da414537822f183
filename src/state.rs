//! Recurrent state threaded through the time unroll.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Recurrent state of a single layer.
///
/// All three tensors share the layer's spatial resolution. The error tensor
/// carries twice the layer's stack width: the first half holds the positive
/// part of the prediction error, the second half the negative part.
#[derive(Clone, Debug)]
pub struct LayerState<B: Backend> {
    /// Recurrent representation R, `[batch, r_channels, height, width]`
    pub representation: Tensor<B, 4>,
    /// Memory cell C, same shape as the representation
    pub memory: Tensor<B, 4>,
    /// Signed prediction error E, `[batch, 2 * stack_channels, height, width]`
    pub error: Tensor<B, 4>,
}

impl<B: Backend> LayerState<B> {
    /// All-zero state for one layer, used at time step 0.
    pub fn zeros(
        batch_size: usize,
        r_channels: usize,
        stack_channels: usize,
        height: usize,
        width: usize,
        device: &B::Device,
    ) -> Self {
        Self {
            representation: Tensor::zeros([batch_size, r_channels, height, width], device),
            memory: Tensor::zeros([batch_size, r_channels, height, width], device),
            error: Tensor::zeros([batch_size, 2 * stack_channels, height, width], device),
        }
    }
}

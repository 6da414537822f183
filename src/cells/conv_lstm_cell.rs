use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{Initializer, PaddingConfig2d};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Convolutional LSTM cell
///
/// A gated memory unit whose gate pre-activations come from a single "same"
/// padded convolution over the input, split channel-wise into the four gates
/// (i, j, f, o in that order):
/// - c' = c * sigmoid(f) + sigmoid(i) * tanh(j)
/// - h' = tanh(c') * sigmoid(o)
///
/// Unlike a dense LSTM there is no separate recurrent map: the caller
/// concatenates the recurrent inputs on the channel axis before the forward
/// call, and one convolution (with its own bias) produces all four gates.
#[derive(Module, Debug)]
pub struct ConvLstmCell<B: Backend> {
    #[module(skip)]
    in_channels: usize,
    #[module(skip)]
    hidden_channels: usize,
    #[module(skip)]
    kernel_size: usize,
    gates: Conv2d<B>, // in_channels -> 4 * hidden_channels
}

impl<B: Backend> ConvLstmCell<B> {
    /// Create a new convolutional LSTM cell
    ///
    /// # Arguments
    /// * `in_channels` - Channel count of the (pre-concatenated) input
    /// * `hidden_channels` - Channel count of the hidden and memory states
    /// * `kernel_size` - Spatial size of the gate convolution kernel
    /// * `device` - Device to create the module on
    pub fn new(
        in_channels: usize,
        hidden_channels: usize,
        kernel_size: usize,
        device: &B::Device,
    ) -> Self {
        let gates = Conv2dConfig::new([in_channels, 4 * hidden_channels], [kernel_size; 2])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        Self {
            in_channels,
            hidden_channels,
            kernel_size,
            gates,
        }
    }

    /// Rebuild the gate convolution with the given weight initializer
    pub fn with_initializer(mut self, initializer: Initializer, device: &B::Device) -> Self {
        self.gates = Conv2dConfig::new(
            [self.in_channels, 4 * self.hidden_channels],
            [self.kernel_size; 2],
        )
        .with_padding(PaddingConfig2d::Same)
        .with_initializer(initializer)
        .init(device);
        self
    }

    /// Get the input channel count
    pub fn in_channels(&self) -> usize {
        self.in_channels
    }

    /// Get the hidden/memory channel count
    pub fn hidden_channels(&self) -> usize {
        self.hidden_channels
    }

    /// Perform a forward pass through the cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, in_channels, height, width]`
    /// * `memory` - Previous memory cell of shape `[batch, hidden_channels, height, width]`
    ///
    /// # Returns
    /// Tuple of (new_hidden, new_memory), both shaped like `memory`
    pub fn forward(
        &self,
        input: Tensor<B, 4>,
        memory: Tensor<B, 4>,
    ) -> (Tensor<B, 4>, Tensor<B, 4>) {
        let z = self.gates.forward(input);

        // Split into 4 gates along the channel axis
        let chunks = z.chunk(4, 1);
        let input_gate = chunks[0].clone(); // i
        let candidate = chunks[1].clone(); // j
        let forget_gate = chunks[2].clone(); // f
        let output_gate = chunks[3].clone(); // o

        // c' = c * sigmoid(f) + sigmoid(i) * tanh(j)
        let new_memory = memory * activation::sigmoid(forget_gate)
            + activation::sigmoid(input_gate) * candidate.tanh();

        // h' = tanh(c') * sigmoid(o)
        let new_hidden = new_memory.clone().tanh() * activation::sigmoid(output_gate);

        (new_hidden, new_memory)
    }
}

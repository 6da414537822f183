//! Basic usage example of the PredNet stack
//!
//! This example demonstrates how to create a predictive-coding video model
//! and run a clip through it.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use prednet::prelude::*;

fn main() {
    println!("=== PredNet Basic Example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();

    // Example 1: Small two-layer stack over 32x32 frames
    println!("Example 1: Two-layer stack");
    let config = PredNetConfig::new(vec![3, 16], vec![3, 16])
        .with_image_size((32, 32))
        .with_horizon(5);
    let model = PredNet::<Backend>::new(config, &device);

    println!("Created PredNet:");
    println!("  Layers: {}", model.num_layers());
    println!("  Input shape: {:?}", model.config().input_shape());
    println!();

    // Clip shape: [batch=1, time=5, channels=3, 32, 32]
    let video = Tensor::<Backend, 5>::random(
        [1, 5, 3, 32, 32],
        Distribution::Uniform(0.0, 1.0),
        &device,
    );

    if let PredNetOutput::All {
        predictions,
        errors,
    } = model.forward(video)
    {
        println!("  Predictions shape: {:?}", predictions.dims());
        println!("  Errors shape:      {:?}", errors.dims());
        println!(
            "  Mean error at t=0: {:.6}",
            errors.narrow(1, 0, 1).mean().into_scalar()
        );
    }
    println!();

    // Example 2: Manual state threading with step()
    println!("Example 2: Manual state threading");
    let config = PredNetConfig::new(vec![3, 8], vec![3, 8]).with_image_size((16, 16));
    let model = PredNet::<Backend>::new(config, &device);

    let mut state = model.init_state(1, &device);
    for t in 0..3 {
        let frame = Tensor::<Backend, 4>::random(
            [1, 3, 16, 16],
            Distribution::Uniform(0.0, 1.0),
            &device,
        );
        let (output, next_state) = model.step(frame, &state);
        state = next_state;

        if let StepOutput::All { errors, .. } = output {
            println!("  step {}: per-layer errors {:?}", t, errors.dims());
        }
    }
    println!();

    // Example 3: The default four-layer configuration
    println!("Example 3: Published default configuration");
    let config = PredNetConfig::default();
    println!("  Layers: {}", config.num_layers());
    for layer in 0..config.num_layers() {
        let (height, width) = config.layer_resolution(layer);
        println!(
            "  layer {}: {}x{} at {} channels",
            layer, height, width, config.stack_sizes[layer]
        );
    }
    println!();

    println!("=== Examples completed successfully! ===");
}

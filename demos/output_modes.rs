//! Output-mode selection example
//!
//! Shows the four output modes: frame prediction, per-layer error means,
//! both at once, and a single layer's internal tensor.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use prednet::prelude::*;

fn main() {
    println!("=== PredNet Output Modes ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    let base = PredNetConfig::new(vec![3, 8, 12], vec![3, 8, 12]).with_image_size((32, 32));
    let video = Tensor::<Backend, 5>::random(
        [1, 4, 3, 32, 32],
        Distribution::Uniform(0.0, 1.0),
        &device,
    );

    for mode in ["prediction", "error", "all", "R1", "E0", "Ahat2"] {
        let config = base.clone().with_output_mode(OutputMode::parse(mode));
        let model = PredNet::<Backend>::new(config, &device);

        match model.forward(video.clone()) {
            PredNetOutput::Prediction(predictions) => {
                println!("{:12} -> predictions {:?}", mode, predictions.dims());
            }
            PredNetOutput::Error(errors) => {
                println!("{:12} -> errors {:?}", mode, errors.dims());
            }
            PredNetOutput::All {
                predictions,
                errors,
            } => {
                println!(
                    "{:12} -> predictions {:?}, errors {:?}",
                    mode,
                    predictions.dims(),
                    errors.dims()
                );
            }
            PredNetOutput::Layer(tensor) => {
                println!("{:12} -> layer tensor {:?}", mode, tensor.dims());
            }
        }
    }

    println!("\n=== Examples completed successfully! ===");
}

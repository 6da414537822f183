#[cfg(test)]
mod tests {
    use prednet::prelude::*;

    #[test]
    fn test_config_serde_round_trip() {
        let config = PredNetConfig::new(vec![3, 16], vec![3, 16])
            .with_image_size((32, 32))
            .with_horizon(5)
            .with_batch_size(4)
            .with_output_mode(OutputMode::parse("E1"));

        let json = serde_json::to_string(&config).unwrap();
        let restored: PredNetConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.image_size, (32, 32));
        assert_eq!(restored.horizon, 5);
        assert_eq!(restored.stack_sizes, vec![3, 16]);
        assert_eq!(restored.input_shape(), [4, 5, 3, 32, 32]);
        assert_eq!(
            restored.output_mode,
            OutputMode::Layer {
                kind: LayerKind::E,
                index: 1
            }
        );
    }

    #[test]
    fn test_builders() {
        let config = PredNetConfig::new(vec![2, 4, 8], vec![2, 4, 8])
            .with_filter_sizes(vec![5, 5], vec![3, 3, 3], vec![3, 5, 5])
            .with_pixel_max(255.0)
            .with_layer_loss_weights(vec![1.0, 0.1, 0.1])
            .with_extrap_start_time(Some(7))
            .with_frame_channels(2);

        assert_eq!(config.num_layers(), 3);
        assert_eq!(config.a_filter_sizes, vec![5, 5]);
        assert_eq!(config.r_filter_sizes, vec![3, 5, 5]);
        assert_eq!(config.pixel_max, 255.0);
        assert_eq!(config.layer_loss_weights, vec![1.0, 0.1, 0.1]);
        assert_eq!(config.extrap_start_time, Some(7));
        assert_eq!(config.frame_channels, 2);
    }
}

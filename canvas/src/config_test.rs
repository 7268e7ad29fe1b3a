#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.min_layer_size, 20.0);
    assert_eq!(config.handle_tolerance_px, 8.0);
    assert_eq!(config.duplicate_offset, 10.0);
    assert_eq!(config.resize_mode, ResizeMode::Origin);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = EngineConfig::from_json(r#"{ "resize_mode": "opposite_edge" }"#).unwrap();
    assert_eq!(config.resize_mode, ResizeMode::OppositeEdge);
    assert_eq!(config.min_layer_size, 20.0);
}

#[test]
fn empty_json_is_default() {
    assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
}

#[test]
fn unknown_resize_mode_is_an_error() {
    assert!(EngineConfig::from_json(r#"{ "resize_mode": "center" }"#).is_err());
}

#[test]
fn out_of_range_values_fall_back() {
    let config = EngineConfig { min_layer_size: 0.0, handle_tolerance_px: -1.0, ..Default::default() }.sanitized();
    assert_eq!(config.min_layer_size, 20.0);
    assert_eq!(config.handle_tolerance_px, 8.0);
}

#[test]
fn zero_tolerance_is_allowed() {
    let config = EngineConfig { handle_tolerance_px: 0.0, ..Default::default() }.sanitized();
    assert_eq!(config.handle_tolerance_px, 0.0);
}

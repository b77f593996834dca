// Host-side tests for mount options and error mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod options {
    include!("../src/options.rs");
}
mod errors {
    include!("../src/errors.rs");
}

use errors::{acquire_error_from_dom, release_on_err};
use options::MountOptions;
use scope_core::{AcquireError, Color, EffectParameters};

#[test]
fn missing_fields_fall_back_to_defaults() {
    let opts: MountOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, MountOptions::default());
    assert!(opts.fullscreen);
    assert!(opts.simulate_gesture);
    assert_eq!(opts.effect_parameters().unwrap(), EffectParameters::default());
}

#[test]
fn home_preset_with_flattened_overrides() {
    let opts: MountOptions = serde_json::from_str(
        r##"{
            "preset": "home",
            "fullscreen": false,
            "gain": 1.5,
            "colorChangeInterval": 5000,
            "sparkleColor": "#00FFFF"
        }"##,
    )
    .unwrap();
    assert!(!opts.fullscreen);
    let p = opts.effect_parameters().unwrap();
    assert_eq!(p.gain, 1.5);
    assert_eq!(p.decay, 0.01);
    assert_eq!(p.line_thickness, 5.0);
    assert_eq!(p.sparkle_velocity, 10.0);
    assert_eq!(p.color_change_interval, 5000);
    assert_eq!(p.sparkle_color, Color::rgb8(0, 0xFF, 0xFF));
}

#[test]
fn unknown_keys_are_ignored() {
    let opts: MountOptions =
        serde_json::from_str(r#"{"theme": "dark", "lineThickness": 3}"#).unwrap();
    assert_eq!(opts.effect_parameters().unwrap().line_thickness, 3.0);
}

#[test]
fn bad_options_are_rejected() {
    let unknown = MountOptions {
        preset: Some("disco".into()),
        ..MountOptions::default()
    };
    let err = unknown.effect_parameters().unwrap_err().to_string();
    assert!(err.contains("default, home"), "{err}");

    let empty: MountOptions = serde_json::from_str(r#"{"colors": []}"#).unwrap();
    assert!(empty.effect_parameters().is_err());

    assert!(serde_json::from_str::<MountOptions>(r##"{"sparkleColor": "#GGG"}"##).is_err());
}

#[test]
fn dom_errors_map_to_acquire_errors() {
    assert!(matches!(
        acquire_error_from_dom("NotAllowedError", "Permission denied"),
        AcquireError::PermissionDenied(msg) if msg == "NotAllowedError: Permission denied"
    ));
    assert!(matches!(
        acquire_error_from_dom("SecurityError", ""),
        AcquireError::PermissionDenied(msg) if msg == "SecurityError"
    ));
    assert!(matches!(
        acquire_error_from_dom("NotFoundError", "Requested device not found"),
        AcquireError::DeviceUnavailable(_)
    ));
    assert!(matches!(
        acquire_error_from_dom("NotReadableError", ""),
        AcquireError::DeviceUnavailable(_)
    ));
}

#[test]
fn failed_setup_releases_partial_resources() {
    let mut released = 0;
    let failed: Result<u32, &str> = release_on_err(Err("connect"), || released += 1);
    assert_eq!(failed, Err("connect"));
    assert_eq!(released, 1);

    let ok: Result<u32, &str> = release_on_err(Ok(7), || released += 1);
    assert_eq!(ok, Ok(7));
    assert_eq!(released, 1);
}

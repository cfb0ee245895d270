//! Lifecycle behavior every built-in variant has to satisfy, exercised
//! through the public player API only.

use lumo_core::AnimationConfig;
use lumo_engine::{Player, Registry};

const VARIANTS: [&str; 20] = [
    "aurora",
    "breathing",
    "bubbles",
    "clouds",
    "constellation",
    "embers",
    "fireworks",
    "flames",
    "floating",
    "flow",
    "helix",
    "leaves",
    "orbit",
    "plasma",
    "rain",
    "ripples",
    "snowfall",
    "spirals",
    "starfield",
    "waves",
];

/// Mounting against a zero-size surface must not panic, and after the
/// first nonzero resize every variant has to start producing pixels.
/// The event-driven variants (fireworks, ripples) may need a few frames
/// for their first spawn, so each variant gets a generous window.
#[test]
fn test_every_variant_recovers_from_zero_size() {
    let registry = Registry::with_builtins();
    for variant in VARIANTS {
        let mut player = Player::new(0, 0);
        let config = AnimationConfig::for_variant(variant);
        player.mount(&registry, &config).unwrap();
        player.tick();
        assert!(player.canvas().is_blank(), "{variant} drew at zero size");

        player.resize(96, 64);
        let mut drew = false;
        for _ in 0..600 {
            player.tick();
            if !player.canvas().is_blank() {
                drew = true;
                break;
            }
        }
        assert!(drew, "{variant} stayed blank after resize");
    }
}

/// Disposal must freeze the surface for every variant.
#[test]
fn test_every_variant_stops_on_dispose() {
    let registry = Registry::with_builtins();
    for variant in VARIANTS {
        let mut player = Player::new(48, 32);
        let config = AnimationConfig::for_variant(variant);
        let handle = player.mount(&registry, &config).unwrap();
        for _ in 0..30 {
            player.tick();
        }
        handle.dispose();
        let before = player.canvas().data().to_vec();
        for _ in 0..5 {
            player.tick();
        }
        assert_eq!(player.canvas().data(), &before[..], "{variant} kept drawing");
    }
}

/// A long soak at a high speed multiplier: recycling keeps every variant
/// alive and drawing with no panics and no runaway state.
#[test]
fn test_every_variant_survives_a_soak() {
    let registry = Registry::with_builtins();
    for variant in VARIANTS {
        let mut player = Player::new(64, 48);
        let mut config = AnimationConfig::for_variant(variant);
        config.speed = 3.0;
        player.mount(&registry, &config).unwrap();
        for _ in 0..600 {
            player.tick();
        }
        let mut drew = false;
        for _ in 0..600 {
            player.tick();
            if !player.canvas().is_blank() {
                drew = true;
                break;
            }
        }
        assert!(drew, "{variant} went permanently blank");
    }
}

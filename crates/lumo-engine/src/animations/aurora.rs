//! Four drifting sine ribbons with vertical falloff, layered back to
//! front like curtains of light.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";

/// Per-layer tuning: phase offset, amplitude, frequency, hue shift and
/// alpha weight, back layer first.
const LAYERS: [(f32, f32, f32, i16, f32); 4] = [
    (0.0, 40.0, 0.005, 50, 0.15),
    (1.0, 50.0, 0.004, -30, 0.12),
    (2.0, 35.0, 0.006, 20, 0.10),
    (3.0, 45.0, 0.0045, 70, 0.08),
];

pub struct Aurora {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl Aurora {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
        }
    }

    fn layer_y(&self, layer: &(f32, f32, f32, i16, f32), x: f32) -> f32 {
        let (offset, amplitude, frequency, _, _) = *layer;
        self.height as f32 * 0.3
            + (x * frequency + self.time + offset).sin() * amplitude
            + (x * frequency * 2.0 + self.time * 1.3).sin() * amplitude * 0.5
    }
}

impl Animation for Aurora {
    fn update(&mut self) {
        self.time += 0.015 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let w = self.width as f32;
        for layer in &LAYERS {
            let (_, _, _, shift, alpha_mult) = *layer;
            let ribbon = self
                .color
                .shift(shift)
                .with_alpha(self.color.a * alpha_mult);
            let mut x = 0.0;
            while x < w {
                let next = (x + 10.0).min(w);
                canvas.fill_ribbon_slice(
                    x,
                    self.layer_y(layer, x),
                    next,
                    self.layer_y(layer, next),
                    100.0,
                    ribbon,
                );
                x = next;
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_after_resize_from_zero() {
        let mut aurora = Aurora::new(&AnimationConfig::for_variant("aurora"), 0, 0);
        let mut canvas = Canvas::new(0, 0);
        aurora.update();
        aurora.render(&mut canvas);
        assert!(canvas.is_blank());

        canvas.resize(80, 60);
        aurora.resize(80, 60);
        aurora.update();
        aurora.render(&mut canvas);
        assert!(!canvas.is_blank());
    }

    #[test]
    fn test_time_advances_with_speed() {
        let mut config = AnimationConfig::for_variant("aurora");
        config.speed = 2.0;
        let mut aurora = Aurora::new(&config, 40, 30);
        aurora.update();
        assert!((aurora.time - 0.03).abs() < 1e-6);
    }
}

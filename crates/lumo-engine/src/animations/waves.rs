//! Three stacked translucent wave bands filling down to the bottom edge.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";

/// Phase offset, amplitude, frequency and alpha per band, back first.
const BANDS: [(f32, f32, f32, f32); 3] = [
    (0.0, 30.0, 0.010, 0.10),
    (1.0, 40.0, 0.008, 0.08),
    (2.0, 50.0, 0.006, 0.06),
];

pub struct Waves {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl Waves {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
        }
    }
}

impl Animation for Waves {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let base = self.height as f32 / 2.0;
        let mut ys = vec![0.0f32; self.width as usize];
        for &(offset, amplitude, frequency, alpha) in &BANDS {
            for (x, y) in ys.iter_mut().enumerate() {
                *y = base + (x as f32 * frequency + self.time + offset).sin() * amplitude;
            }
            canvas.fill_below(&ys, self.color.with_alpha(self.color.a * alpha));
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
    fn test_fills_lower_half() {
        let mut waves = Waves::new(&AnimationConfig::for_variant("waves"), 60, 60);
        let mut canvas = Canvas::new(60, 60);
        waves.update();
        waves.render(&mut canvas);
        assert!(canvas.pixel(30, 58).a > 0.0);
        assert_eq!(canvas.pixel(30, 0).a, 0.0);
    }
}

//! Concentric rings expanding and contracting on a shared slow pulse,
//! each ring offset along the cycle.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const RING_COUNT: usize = 5;

pub struct Breathing {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl Breathing {
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

impl Animation for Breathing {
    fn update(&mut self) {
        self.time += 0.015 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        for i in 0..RING_COUNT {
            let base_radius = 30.0 + i as f32 * 25.0;
            let offset = i as f32 / RING_COUNT as f32 * std::f32::consts::TAU;
            let ring_alpha = 0.8 - i as f32 * 0.12;
            let breath = (self.time + offset).sin();
            let radius = base_radius + breath * 20.0;
            let alpha = self.color.a * ring_alpha * (0.7 + breath * 0.3);
            canvas.stroke_circle(cx, cy, radius, 8.0, self.color.with_alpha(alpha * 0.3));
            canvas.stroke_circle(cx, cy, radius, 3.0, self.color.with_alpha(alpha));
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
    fn test_rings_centered() {
        let mut breathing = Breathing::new(&AnimationConfig::for_variant("breathing"), 100, 100);
        let mut canvas = Canvas::new(100, 100);
        breathing.update();
        breathing.render(&mut canvas);
        // Innermost ring passes near (50 +- ~30, 50).
        assert!(!canvas.is_blank());
        assert_eq!(canvas.pixel(50, 50).a, 0.0);
    }

    #[test]
    fn test_zero_size_render_is_noop() {
        let mut breathing = Breathing::new(&AnimationConfig::for_variant("breathing"), 0, 0);
        let mut canvas = Canvas::new(0, 0);
        breathing.update();
        breathing.render(&mut canvas);
        assert!(canvas.is_blank());
    }
}

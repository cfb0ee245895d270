//! Two intertwined particle strands rotating about a vertical axis, with
//! rungs bridging them every few particles.

use std::f32::consts::PI;

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const PARTICLES_PER_STRAND: usize = 100;
const PARTICLE_SIZE: f32 = 4.0;

pub struct Helix {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl Helix {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
        }
    }

    /// Position and depth of particle `i` on `strand` (0 or 1). Depth is
    /// the -1.0..1.0 sine of the rotation angle.
    fn particle(&self, strand: usize, i: usize) -> (f32, f32, f32) {
        let progress = i as f32 / PARTICLES_PER_STRAND as f32;
        let phase = progress * PI * 8.0;
        let h = self.height as f32;
        let radius = (self.width.min(self.height)) as f32 * 0.15;
        let angle = phase + self.time + strand as f32 * PI;
        let x = self.width as f32 / 2.0 + angle.cos() * radius;
        let y = h * 0.2 + progress * h * 0.6;
        (x, y, angle.sin())
    }
}

impl Animation for Helix {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let a = self.color.a;
        for i in (0..PARTICLES_PER_STRAND).step_by(5) {
            let (x0, y0, z0) = self.particle(0, i);
            let (x1, y1, z1) = self.particle(1, i);
            let avg_z = (z0 + z1) / 2.0;
            let alpha = a * (0.1 + (avg_z + 1.0) * 0.15);
            canvas.stroke_line(x0, y0, x1, y1, 1.0, self.color.with_alpha(alpha));
        }
        for strand in 0..2 {
            for i in 0..PARTICLES_PER_STRAND {
                let (x, y, z) = self.particle(strand, i);
                let scale = 0.5 + (z + 1.0) * 0.25;
                let alpha = a * (0.3 + (z + 1.0) * 0.35);
                let size = PARTICLE_SIZE * scale;
                canvas.fill_circle(x, y, size * 2.0, self.color.with_alpha(alpha * 0.3));
                canvas.fill_circle(x, y, size, self.color.with_alpha(alpha));
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
    fn test_strands_are_antiphase() {
        let helix = Helix::new(&AnimationConfig::for_variant("helix"), 100, 100);
        let (x0, y0, _) = helix.particle(0, 0);
        let (x1, y1, _) = helix.particle(1, 0);
        assert!((y0 - y1).abs() < 1e-5);
        // Opposite sides of the axis.
        assert!((x0 - 50.0) * (x1 - 50.0) < 0.0);
    }

    #[test]
    fn test_draws_band() {
        let mut helix = Helix::new(&AnimationConfig::for_variant("helix"), 80, 60);
        let mut canvas = Canvas::new(80, 60);
        helix.update();
        helix.render(&mut canvas);
        assert!(!canvas.is_blank());
        // The helix occupies the middle vertical band only.
        assert_eq!(canvas.pixel(40, 1).a, 0.0);
    }
}

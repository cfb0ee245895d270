//! Classic plasma field: four interfering sine waves sampled per 2x2
//! block and written straight into the pixel buffer.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const BLOCK: u32 = 2;

pub struct Plasma {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl Plasma {
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

impl Animation for Plasma {
    fn update(&mut self) {
        self.time += 0.03 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let t = self.time;
        let mut y = 0;
        while y < self.height {
            let mut x = 0;
            while x < self.width {
                let fx = x as f32;
                let fy = y as f32;
                let v1 = (fx * 0.01 + t).sin();
                let v2 = (fy * 0.01 + t * 1.2).sin();
                let v3 = ((fx + fy) * 0.01 + t * 0.8).sin();
                let v4 = ((fx * fx + fy * fy).sqrt() * 0.01 + t).sin();
                let intensity = ((v1 + v2 + v3 + v4) / 4.0 + 1.0) / 2.0;
                let color = Rgba::new(
                    (self.color.r as f32 * intensity) as u8,
                    (self.color.g as f32 * intensity) as u8,
                    (self.color.b as f32 * (intensity * 0.8 + 0.2)) as u8,
                    self.color.a * (intensity * 0.6 + 0.2),
                );
                for dy in 0..BLOCK.min(self.height - y) {
                    for dx in 0..BLOCK.min(self.width - x) {
                        canvas.set_pixel(x + dx, y + dy, color);
                    }
                }
                x += BLOCK;
            }
            y += BLOCK;
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
    fn test_covers_every_pixel() {
        let mut plasma = Plasma::new(&AnimationConfig::for_variant("plasma"), 7, 5);
        let mut canvas = Canvas::new(7, 5);
        plasma.update();
        plasma.render(&mut canvas);
        for y in 0..5 {
            for x in 0..7 {
                assert!(canvas.pixel(x, y).a > 0.0, "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn test_field_varies_over_time() {
        let mut plasma = Plasma::new(&AnimationConfig::for_variant("plasma"), 16, 16);
        let mut canvas = Canvas::new(16, 16);
        plasma.update();
        plasma.render(&mut canvas);
        let first = canvas.data().to_vec();
        for _ in 0..20 {
            plasma.update();
        }
        canvas.clear();
        plasma.render(&mut canvas);
        assert_ne!(canvas.data(), &first[..]);
    }
}

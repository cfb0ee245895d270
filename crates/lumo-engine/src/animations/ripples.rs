//! Expanding ring triplets spawning at random points and fading as they
//! reach their full radius.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";

struct Ripple {
    x: f32,
    y: f32,
    radius: f32,
    max_radius: f32,
    grow_speed: f32,
    alpha: f32,
}

pub struct Ripples {
    color: Rgba,
    speed: f32,
    width: u32,
    height: u32,
    ripples: Vec<Ripple>,
    rng: fastrand::Rng,
}

impl Ripples {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            width,
            height,
            ripples: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }
}

impl Animation for Ripples {
    fn update(&mut self) {
        if self.width > 0 && self.height > 0 && self.rng.f32() < 0.02 * self.speed {
            self.ripples.push(Ripple {
                x: self.rng.f32() * self.width as f32,
                y: self.rng.f32() * self.height as f32,
                radius: 0.0,
                max_radius: self.rng.f32() * 150.0 + 100.0,
                grow_speed: self.rng.f32() * 2.0 + 1.0,
                alpha: 1.0,
            });
        }
        for ripple in &mut self.ripples {
            ripple.radius += ripple.grow_speed * self.speed;
            ripple.alpha = 1.0 - ripple.radius / ripple.max_radius;
        }
        self.ripples.retain(|r| r.alpha > 0.0);
    }

    fn render(&self, canvas: &mut Canvas) {
        for ripple in &self.ripples {
            for i in 0..3 {
                let radius = ripple.radius - i as f32 * 20.0;
                if radius <= 0.0 {
                    continue;
                }
                let alpha = self.color.a * ripple.alpha * (1.0 - i as f32 * 0.3);
                canvas.stroke_circle(
                    ripple.x,
                    ripple.y,
                    radius,
                    2.0,
                    self.color.with_alpha(alpha),
                );
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ripples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_fade_out_and_are_pruned() {
        let mut ripples = Ripples::new(&AnimationConfig::for_variant("ripples"), 100, 80);
        for _ in 0..2000 {
            ripples.update();
            assert!(ripples.ripples.iter().all(|r| r.alpha > 0.0));
        }
        // Lifetime tops out around 250 frames at the slowest growth, so
        // spawns and expiries balance well under this bound.
        assert!(ripples.ripples.len() < 300);
    }

    #[test]
    fn test_zero_size_never_spawns() {
        let mut ripples = Ripples::new(&AnimationConfig::for_variant("ripples"), 0, 0);
        for _ in 0..500 {
            ripples.update();
        }
        assert!(ripples.ripples.is_empty());
    }
}

//! Translucent bubbles rising with a sideways wobble, recycled at the
//! bottom once they leave the surface.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const BUBBLE_COUNT: usize = 30;

struct Bubble {
    x: f32,
    y: f32,
    radius: f32,
    vx: f32,
    vy: f32,
    wobble: f32,
    wobble_speed: f32,
}

pub struct Bubbles {
    color: Rgba,
    speed: f32,
    width: u32,
    height: u32,
    bubbles: Vec<Bubble>,
    rng: fastrand::Rng,
}

impl Bubbles {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut bubbles = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            width,
            height,
            bubbles: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        bubbles.populate();
        bubbles
    }

    fn populate(&mut self) {
        self.bubbles.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..BUBBLE_COUNT {
            let bubble = self.spawn();
            self.bubbles.push(bubble);
        }
    }

    fn spawn(&mut self) -> Bubble {
        Bubble {
            x: self.rng.f32() * self.width as f32,
            y: self.height as f32 + self.rng.f32() * 100.0,
            radius: self.rng.f32() * 30.0 + 10.0,
            vx: (self.rng.f32() - 0.5) * self.speed * 0.5,
            vy: -(self.rng.f32() * self.speed + 0.5),
            wobble: self.rng.f32() * std::f32::consts::TAU,
            wobble_speed: self.rng.f32() * 0.03 + 0.01,
        }
    }

}

impl Animation for Bubbles {
    fn update(&mut self) {
        let w = self.width as f32;
        for i in 0..self.bubbles.len() {
            let bubble = &mut self.bubbles[i];
            bubble.wobble += bubble.wobble_speed * self.speed;
            bubble.x += bubble.vx + bubble.wobble.sin() * 0.5;
            bubble.y += bubble.vy;
            let gone = bubble.y < -bubble.radius
                || bubble.x < -bubble.radius
                || bubble.x > w + bubble.radius;
            if gone {
                let fresh = self.spawn();
                self.bubbles[i] = fresh;
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        let a = self.color.a;
        for bubble in &self.bubbles {
            let r = bubble.radius;
            canvas.fill_radial_at(
                bubble.x,
                bubble.y,
                r,
                bubble.x - 0.3 * r,
                bubble.y - 0.3 * r,
                &[
                    (0.0, self.color.with_alpha(a * 0.4)),
                    (0.7, self.color.with_alpha(a * 0.2)),
                    (1.0, self.color.with_alpha(a * 0.1)),
                ],
            );
            canvas.stroke_circle(bubble.x, bubble.y, r, 2.0, self.color.with_alpha(a * 0.3));
            canvas.fill_circle(
                bubble.x - 0.4 * r,
                bubble.y - 0.4 * r,
                r * 0.3,
                Rgba::WHITE.with_alpha(a * 0.6),
            );
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.populate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_is_stable_across_recycling() {
        let mut bubbles = Bubbles::new(&AnimationConfig::for_variant("bubbles"), 60, 40);
        for _ in 0..2000 {
            bubbles.update();
        }
        assert_eq!(bubbles.bubbles.len(), BUBBLE_COUNT);
        // Every bubble stays within the live band after recycling.
        for bubble in &bubbles.bubbles {
            assert!(bubble.y >= -bubble.radius);
            assert!(bubble.y <= 40.0 + 100.0 + bubble.radius);
        }
    }

    #[test]
    fn test_zero_size_defers_population() {
        let mut bubbles = Bubbles::new(&AnimationConfig::for_variant("bubbles"), 0, 0);
        assert!(bubbles.bubbles.is_empty());
        bubbles.update();
        bubbles.resize(50, 50);
        assert_eq!(bubbles.bubbles.len(), BUBBLE_COUNT);
    }
}

//! Bodies circling a central hub on fixed rings, each dragging a fading
//! trail. The hub clock advances at a fixed rate; the configured speed
//! scales the angular velocity instead.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const ORBITER_COUNT: usize = 8;
const TRAIL_POINTS: usize = 30;

pub struct Orbit {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
}

impl Orbit {
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

impl Animation for Orbit {
    fn update(&mut self) {
        self.time += 0.02;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let a = self.color.a;

        canvas.fill_circle(cx, cy, 5.0, self.color.with_alpha(a * 0.8));

        for i in 0..ORBITER_COUNT {
            let distance = 60.0 + i as f32 * 25.0;
            let angular = 0.5 + i as f32 * 0.1;
            let size = 8.0 - i as f32 * 0.5;
            let angle = self.time * angular * self.speed;

            canvas.stroke_circle(cx, cy, distance, 1.0, self.color.with_alpha(a * 0.1));

            for t in 1..=TRAIL_POINTS {
                let trail_angle = angle - t as f32 * 0.1;
                let fade = 1.0 - t as f32 / TRAIL_POINTS as f32;
                canvas.fill_circle(
                    cx + trail_angle.cos() * distance,
                    cy + trail_angle.sin() * distance,
                    size * fade * 0.5,
                    self.color.with_alpha(a * fade * 0.5),
                );
            }

            let x = cx + angle.cos() * distance;
            let y = cy + angle.sin() * distance;
            canvas.fill_circle(x, y, size * 2.0, self.color.with_alpha(a * 0.3));
            canvas.fill_circle(x, y, size, self.color.with_alpha(a));
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
    fn test_hub_always_drawn() {
        let mut orbit = Orbit::new(&AnimationConfig::for_variant("orbit"), 200, 200);
        let mut canvas = Canvas::new(200, 200);
        orbit.update();
        orbit.render(&mut canvas);
        assert!(canvas.pixel(100, 100).a > 0.0);
    }

    #[test]
    fn test_clock_rate_is_fixed() {
        let mut config = AnimationConfig::for_variant("orbit");
        config.speed = 5.0;
        let mut orbit = Orbit::new(&config, 100, 100);
        orbit.update();
        assert!((orbit.time - 0.02).abs() < 1e-7);
    }
}

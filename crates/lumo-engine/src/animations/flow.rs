//! A field of horizontal streamlines, each oscillating on its own
//! frequency with a wide soft glow pass underneath.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const LINE_COUNT: usize = 30;

struct Streamline {
    y: f32,
    amplitude: f32,
    frequency: f32,
    offset: f32,
    alpha: f32,
}

pub struct Flow {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    lines: Vec<Streamline>,
    rng: fastrand::Rng,
}

impl Flow {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut flow = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            lines: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        flow.populate();
        flow
    }

    fn populate(&mut self) {
        self.lines.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for i in 0..LINE_COUNT {
            self.lines.push(Streamline {
                y: i as f32 / LINE_COUNT as f32 * self.height as f32,
                amplitude: self.rng.f32() * 40.0 + 20.0,
                frequency: self.rng.f32() * 0.01 + 0.005,
                offset: self.rng.f32() * std::f32::consts::TAU,
                alpha: self.rng.f32() * 0.3 + 0.2,
            });
        }
    }
}

impl Animation for Flow {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        let w = self.width as f32;
        for line in &self.lines {
            let stroke = self.color.with_alpha(self.color.a * line.alpha);
            let glow = stroke.with_alpha(stroke.a * 0.3);
            let wave = |x: f32| {
                line.y + (x * line.frequency + self.time + line.offset).sin() * line.amplitude
            };
            let mut x = 0.0;
            while x < w {
                let next = (x + 5.0).min(w);
                canvas.stroke_line(x, wave(x), next, wave(next), 6.0, glow);
                canvas.stroke_line(x, wave(x), next, wave(next), 2.0, stroke);
                x = next;
            }
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
    fn test_zero_size_defers_population() {
        let mut flow = Flow::new(&AnimationConfig::for_variant("flow"), 0, 0);
        assert!(flow.lines.is_empty());
        flow.resize(100, 80);
        assert_eq!(flow.lines.len(), LINE_COUNT);
    }

    #[test]
    fn test_draws_streamlines() {
        let mut flow = Flow::new(&AnimationConfig::for_variant("flow"), 80, 60);
        let mut canvas = Canvas::new(80, 60);
        flow.update();
        flow.render(&mut canvas);
        assert!(!canvas.is_blank());
    }
}

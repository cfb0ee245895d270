//! Particles arranged along a rotating spiral arm, pulsing in and out,
//! with faint links between neighbors.

use std::f32::consts::PI;

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const PARTICLE_COUNT: usize = 200;

struct Particle {
    angle: f32,
    radius: f32,
    size: f32,
    pulse_offset: f32,
}

pub struct Spirals {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    rng: fastrand::Rng,
}

impl Spirals {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut spirals = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            particles: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        spirals.populate();
        spirals
    }

    fn populate(&mut self) {
        self.particles.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max_radius = self.width.min(self.height) as f32 * 0.4;
        for i in 0..PARTICLE_COUNT {
            let progress = i as f32 / PARTICLE_COUNT as f32;
            self.particles.push(Particle {
                angle: progress * PI * 8.0,
                radius: progress * max_radius,
                size: self.rng.f32() * 3.0 + 1.0,
                pulse_offset: self.rng.f32() * std::f32::consts::TAU,
            });
        }
    }

    fn position(&self, particle: &Particle) -> (f32, f32, f32) {
        let max_radius = (self.width.min(self.height) as f32 * 0.4).max(f32::EPSILON);
        let pulse = (self.time * 2.0 + particle.pulse_offset).sin() * 10.0;
        let radius = particle.radius + pulse;
        let angle = particle.angle + self.time;
        let x = self.width as f32 / 2.0 + angle.cos() * radius;
        let y = self.height as f32 / 2.0 + angle.sin() * radius;
        (x, y, (radius / max_radius).abs())
    }
}

impl Animation for Spirals {
    fn update(&mut self) {
        self.time += 0.01 * self.speed;
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let a = self.color.a;
        for pair in self.particles.windows(2).step_by(8) {
            let (x0, y0, _) = self.position(&pair[0]);
            let (x1, y1, _) = self.position(&pair[1]);
            canvas.stroke_line(x0, y0, x1, y1, 1.0, self.color.with_alpha(a * 0.1));
        }
        for particle in &self.particles {
            let (x, y, dist) = self.position(particle);
            let opacity = (0.8 - dist * 0.5).max(0.2);
            if dist < 0.5 {
                canvas.fill_circle(
                    x,
                    y,
                    particle.size * 3.0,
                    self.color.with_alpha(a * opacity * 0.2),
                );
            }
            canvas.fill_circle(x, y, particle.size, self.color.with_alpha(a * opacity));
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
        let mut spirals = Spirals::new(&AnimationConfig::for_variant("spirals"), 0, 0);
        assert!(spirals.particles.is_empty());
        spirals.resize(100, 100);
        assert_eq!(spirals.particles.len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_arm_spans_center_to_rim() {
        let spirals = Spirals::new(&AnimationConfig::for_variant("spirals"), 100, 100);
        assert_eq!(spirals.particles[0].radius, 0.0);
        let last = spirals.particles.last().unwrap();
        assert!(last.radius > 35.0 && last.radius <= 40.0);
    }
}

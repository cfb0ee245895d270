//! Slowly drifting stars joined by faint lines whenever two come close,
//! each star twinkling on its own phase.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const STAR_COUNT: usize = 80;
const LINK_DISTANCE: f32 = 150.0;

struct Star {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    size: f32,
    twinkle_speed: f32,
    twinkle_phase: f32,
    brightness: f32,
}

pub struct Constellation {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    stars: Vec<Star>,
    rng: fastrand::Rng,
}

impl Constellation {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut constellation = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            stars: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        constellation.populate();
        constellation
    }

    fn populate(&mut self) {
        self.stars.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..STAR_COUNT {
            self.stars.push(Star {
                x: self.rng.f32() * self.width as f32,
                y: self.rng.f32() * self.height as f32,
                vx: (self.rng.f32() - 0.5) * 0.3,
                vy: (self.rng.f32() - 0.5) * 0.3,
                size: self.rng.f32() * 2.0 + 0.5,
                twinkle_speed: self.rng.f32() * 0.05 + 0.02,
                twinkle_phase: self.rng.f32() * std::f32::consts::TAU,
                brightness: self.rng.f32() * 0.5 + 0.5,
            });
        }
    }
}

impl Animation for Constellation {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        let w = self.width as f32;
        let h = self.height as f32;
        for star in &mut self.stars {
            star.x += star.vx * self.speed;
            star.y += star.vy * self.speed;
            if star.x < -10.0 {
                star.x = w + 10.0;
            } else if star.x > w + 10.0 {
                star.x = -10.0;
            }
            if star.y < -10.0 {
                star.y = h + 10.0;
            } else if star.y > h + 10.0 {
                star.y = -10.0;
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        let base = self.color.a;
        for (i, a) in self.stars.iter().enumerate() {
            for b in &self.stars[i + 1..] {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < LINK_DISTANCE {
                    let alpha = base * (1.0 - dist / LINK_DISTANCE) * 0.3;
                    canvas.stroke_line(a.x, a.y, b.x, b.y, 0.5, self.color.with_alpha(alpha));
                }
            }
        }
        for star in &self.stars {
            let twinkle = (self.time * star.twinkle_speed + star.twinkle_phase).sin();
            let brightness = (star.brightness + twinkle * 0.3).clamp(0.0, 1.0);
            let size = (star.size + twinkle * 0.5).max(0.2);
            canvas.fill_radial(
                star.x,
                star.y,
                size * 4.0,
                &[
                    (0.0, self.color.with_alpha(base * brightness * 0.5)),
                    (1.0, self.color.with_alpha(0.0)),
                ],
            );
            canvas.fill_circle(star.x, star.y, size, self.color.with_alpha(base * brightness));
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
    fn test_stars_wrap_instead_of_escaping() {
        let mut constellation =
            Constellation::new(&AnimationConfig::for_variant("constellation"), 50, 40);
        for _ in 0..10_000 {
            constellation.update();
        }
        assert_eq!(constellation.stars.len(), STAR_COUNT);
        for star in &constellation.stars {
            assert!(star.x >= -10.5 && star.x <= 60.5);
            assert!(star.y >= -10.5 && star.y <= 50.5);
        }
    }

    #[test]
    fn test_draws_stars() {
        let mut constellation =
            Constellation::new(&AnimationConfig::for_variant("constellation"), 64, 48);
        let mut canvas = Canvas::new(64, 48);
        constellation.update();
        constellation.render(&mut canvas);
        assert!(!canvas.is_blank());
    }
}

//! Rockets launched from the bottom edge that burst into short-lived
//! particle showers. The only fully event-driven variant: both pools
//! grow on launch and shrink as bursts fade out.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const TRAIL_LENGTH: usize = 10;
const BURST_SIZE: usize = 30;
const GRAVITY: f32 = 0.02;

struct Rocket {
    x: f32,
    y: f32,
    vy: f32,
    target_y: f32,
    trail: Vec<(f32, f32)>,
}

struct Spark {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: f32,
    fade: f32,
    size: f32,
}

pub struct Fireworks {
    color: Rgba,
    speed: f32,
    width: u32,
    height: u32,
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
    rng: fastrand::Rng,
}

impl Fireworks {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            width,
            height,
            rockets: Vec::new(),
            sparks: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }

    fn launch(&mut self) {
        let h = self.height as f32;
        self.rockets.push(Rocket {
            x: self.rng.f32() * self.width as f32,
            y: h,
            vy: -(4.0 + self.rng.f32() * 2.0),
            target_y: h * 0.2 + self.rng.f32() * h * 0.4,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        });
    }

    fn burst(&mut self, x: f32, y: f32) {
        for _ in 0..BURST_SIZE {
            let angle = self.rng.f32() * std::f32::consts::TAU;
            let velocity = self.rng.f32() * 3.0 + 1.0;
            self.sparks.push(Spark {
                x,
                y,
                vx: angle.cos() * velocity,
                vy: angle.sin() * velocity,
                life: 1.0,
                fade: self.rng.f32() * 0.02 + 0.01,
                size: self.rng.f32() * 2.0 + 1.0,
            });
        }
    }
}

impl Animation for Fireworks {
    fn update(&mut self) {
        if self.width > 0 && self.height > 0 && self.rng.f32() < 0.02 * self.speed {
            self.launch();
        }
        let mut bursts: Vec<(f32, f32)> = Vec::new();
        for rocket in &mut self.rockets {
            if rocket.trail.len() == TRAIL_LENGTH {
                rocket.trail.remove(0);
            }
            rocket.trail.push((rocket.x, rocket.y));
            rocket.y += rocket.vy * self.speed;
            if rocket.y <= rocket.target_y {
                bursts.push((rocket.x, rocket.y));
            }
        }
        self.rockets.retain(|r| r.y > r.target_y);
        for (x, y) in bursts {
            self.burst(x, y);
        }
        let speed = self.speed;
        for spark in &mut self.sparks {
            spark.x += spark.vx * speed;
            spark.y += spark.vy * speed;
            spark.vy += GRAVITY * speed;
            spark.life -= spark.fade * speed;
        }
        self.sparks.retain(|s| s.life > 0.0);
    }

    fn render(&self, canvas: &mut Canvas) {
        let a = self.color.a;
        for rocket in &self.rockets {
            let len = rocket.trail.len();
            for (i, &(tx, ty)) in rocket.trail.iter().enumerate() {
                let alpha = a * (i as f32 / len as f32) * 0.5;
                canvas.fill_circle(tx, ty, 2.0, self.color.with_alpha(alpha));
            }
            canvas.fill_circle(rocket.x, rocket.y, 6.0, self.color.with_alpha(a * 0.3));
            canvas.fill_circle(rocket.x, rocket.y, 3.0, self.color.with_alpha(a * 0.8));
        }
        for spark in &self.sparks {
            let alpha = a * spark.life.clamp(0.0, 1.0);
            canvas.fill_circle(
                spark.x,
                spark.y,
                spark.size * 2.0,
                self.color.with_alpha(alpha * 0.3),
            );
            canvas.fill_circle(spark.x, spark.y, spark.size, self.color.with_alpha(alpha));
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
    fn test_population_stays_bounded() {
        let mut fireworks = Fireworks::new(&AnimationConfig::for_variant("fireworks"), 200, 150);
        let mut max_sparks = 0;
        for _ in 0..5000 {
            fireworks.update();
            max_sparks = max_sparks.max(fireworks.sparks.len());
            for rocket in &fireworks.rockets {
                assert!(rocket.trail.len() <= TRAIL_LENGTH);
            }
        }
        // Sparks live at most 1/0.01 = 100 frames; launches arrive at
        // ~0.02/frame, so the pool settles far below this ceiling.
        assert!(max_sparks <= 100 * BURST_SIZE);
        assert!(fireworks.sparks.iter().all(|s| s.life > 0.0));
    }

    #[test]
    fn test_burst_replaces_rocket() {
        let mut fireworks = Fireworks::new(&AnimationConfig::for_variant("fireworks"), 100, 100);
        fireworks.launch();
        assert_eq!(fireworks.rockets.len(), 1);
        // Rise at >= 4px/frame from y=100 to target <= 60.
        for _ in 0..100 {
            fireworks.update();
        }
        assert!(fireworks.rockets.iter().all(|r| r.y > r.target_y));
    }

    #[test]
    fn test_zero_size_never_launches() {
        let mut fireworks = Fireworks::new(&AnimationConfig::for_variant("fireworks"), 0, 0);
        for _ in 0..500 {
            fireworks.update();
        }
        assert!(fireworks.rockets.is_empty());
        assert!(fireworks.sparks.is_empty());
    }
}

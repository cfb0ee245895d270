//! Wind-blown rain streaks with splash bursts on impact and occasional
//! lightning. The storm clock ticks once per frame regardless of the
//! configured speed so lightning pacing stays stable.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const DROP_COUNT: usize = 150;
const SPLASH_GRAVITY: f32 = 0.2;

struct Drop {
    x: f32,
    y: f32,
    length: f32,
    fall_speed: f32,
    width: f32,
    wind: f32,
    opacity: f32,
}

struct SplashDrop {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    size: f32,
}

struct Splash {
    drops: Vec<SplashDrop>,
    life: f32,
}

pub struct Rain {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    drops: Vec<Drop>,
    splashes: Vec<Splash>,
    flash: f32,
    next_lightning: f32,
    /// Bolt segments regenerated every flashing frame for flicker.
    bolt: Vec<((f32, f32), (f32, f32))>,
    rng: fastrand::Rng,
}

impl Rain {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut rng = fastrand::Rng::new();
        let next_lightning = rng.f32() * 300.0 + 200.0;
        let mut rain = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            drops: Vec::new(),
            splashes: Vec::new(),
            flash: 0.0,
            next_lightning,
            bolt: Vec::new(),
            rng,
        };
        rain.populate();
        rain
    }

    fn populate(&mut self) {
        self.drops.clear();
        self.splashes.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..DROP_COUNT {
            let y = -(self.rng.f32() * self.height as f32);
            let drop = self.spawn(y);
            self.drops.push(drop);
        }
    }

    fn spawn(&mut self, y: f32) -> Drop {
        Drop {
            x: self.rng.f32() * (self.width as f32 + 200.0) - 100.0,
            y,
            length: self.rng.f32() * 20.0 + 10.0,
            fall_speed: self.rng.f32() * 8.0 + 5.0,
            width: self.rng.f32() * 1.5 + 0.5,
            wind: self.rng.f32() * 2.0 - 1.0,
            opacity: self.rng.f32() * 0.3 + 0.3,
        }
    }

    fn splash_at(&mut self, x: f32) {
        let count = self.rng.usize(3..=6);
        let mut drops = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = self.rng.f32() * std::f32::consts::PI;
            let velocity = self.rng.f32() * 2.0 + 1.0;
            drops.push(SplashDrop {
                x,
                y: self.height as f32,
                vx: angle.cos() * velocity,
                vy: angle.sin() * velocity - 2.0,
                size: self.rng.f32() * 1.5 + 0.5,
            });
        }
        self.splashes.push(Splash { drops, life: 1.0 });
    }

    fn strike(&mut self) {
        self.bolt.clear();
        let w = self.width as f32;
        let h = self.height as f32;
        let segments = self.rng.usize(8..=12);
        let step = h / segments as f32;
        let mut x = self.rng.f32() * w;
        let mut y = 0.0;
        for _ in 0..segments {
            let nx = (x + (self.rng.f32() - 0.5) * 60.0).clamp(0.0, w);
            let ny = y + step;
            self.bolt.push(((x, y), (nx, ny)));
            if self.rng.f32() > 0.7 {
                let bx = (nx + (self.rng.f32() - 0.5) * 80.0).clamp(0.0, w);
                self.bolt.push(((nx, ny), (bx, ny + step * 0.6)));
            }
            x = nx;
            y = ny;
        }
    }
}

impl Animation for Rain {
    fn update(&mut self) {
        self.time += 1.0;
        let h = self.height as f32;

        for i in 0..self.drops.len() {
            let landed_x = {
                let speed = self.speed;
                let drop = &mut self.drops[i];
                drop.y += drop.fall_speed * speed;
                drop.x += drop.wind * speed * 0.5;
                (drop.y > h).then_some(drop.x)
            };
            if let Some(x) = landed_x {
                if self.width > 0 {
                    self.splash_at(x);
                }
                let y = -self.rng.f32() * 20.0 - 10.0;
                let fresh = self.spawn(y);
                self.drops[i] = fresh;
            }
        }

        let speed = self.speed;
        for splash in &mut self.splashes {
            splash.life -= 0.05 * speed;
            for drop in &mut splash.drops {
                drop.x += drop.vx * speed;
                drop.y += drop.vy * speed;
                drop.vy += SPLASH_GRAVITY * speed;
            }
        }
        self.splashes.retain(|s| s.life > 0.0);

        if self.time > self.next_lightning && self.rng.f32() > 0.997 {
            self.flash = 1.0;
            self.next_lightning = self.time + self.rng.f32() * 300.0 + 200.0;
        }
        if self.flash > 0.0 {
            if self.flash > 0.5 && self.width > 0 && self.height > 0 {
                self.strike();
            } else {
                self.bolt.clear();
            }
            self.flash = (self.flash - 0.1 * self.speed).max(0.0);
        } else {
            self.bolt.clear();
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        let a = self.color.a;
        if self.flash > 0.0 {
            canvas.fill_rect(
                0.0,
                0.0,
                self.width as f32,
                self.height as f32,
                Rgba::WHITE.with_alpha(a * 0.15 * self.flash),
            );
        }
        for &((x0, y0), (x1, y1)) in &self.bolt {
            canvas.stroke_line(
                x0,
                y0,
                x1,
                y1,
                3.0,
                Rgba::new(200, 220, 255, 1.0).with_alpha(a * 0.8 * self.flash),
            );
        }

        // Rain reads slightly cooler than the base color.
        let streak = self.color.mix(Rgba::new(136, 164, 214, 1.0), 0.2);
        for drop in &self.drops {
            canvas.stroke_line_gradient(
                drop.x,
                drop.y - drop.length,
                drop.x + drop.wind * 2.0,
                drop.y,
                drop.width,
                streak.with_alpha(0.0),
                streak.with_alpha(a * drop.opacity),
            );
        }

        for splash in &self.splashes {
            let alpha = a * splash.life.clamp(0.0, 1.0) * 0.5;
            for drop in &splash.drops {
                canvas.fill_circle(drop.x, drop.y, drop.size, streak.with_alpha(alpha));
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
    fn test_drops_recycle_and_splash() {
        let mut rain = Rain::new(&AnimationConfig::for_variant("rain"), 80, 40);
        let mut saw_splash = false;
        for _ in 0..200 {
            rain.update();
            saw_splash |= !rain.splashes.is_empty();
        }
        assert_eq!(rain.drops.len(), DROP_COUNT);
        assert!(saw_splash);
        for drop in &rain.drops {
            assert!(drop.y <= 40.0);
        }
    }

    #[test]
    fn test_splashes_expire() {
        let mut rain = Rain::new(&AnimationConfig::for_variant("rain"), 80, 40);
        for _ in 0..500 {
            rain.update();
        }
        // Splash life drains at 0.05/frame, so the pool stays small.
        assert!(rain.splashes.len() <= DROP_COUNT);
        assert!(rain.splashes.iter().all(|s| s.life > 0.0));
    }

    #[test]
    fn test_flash_decays() {
        let mut rain = Rain::new(&AnimationConfig::for_variant("rain"), 80, 40);
        rain.flash = 1.0;
        for _ in 0..20 {
            rain.update();
        }
        assert_eq!(rain.flash, 0.0);
        assert!(rain.bolt.is_empty());
    }
}

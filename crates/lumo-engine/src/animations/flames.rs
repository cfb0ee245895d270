//! A bed of flames licking up from the bottom edge: turbulent rise via
//! layered trig noise, a heat ramp from white core to cooled tips, a
//! pulsing base glow and a faint shimmer band above it.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const FLAME_COUNT: usize = 60;

/// Cheap smooth pseudo-noise in -1.0..1.0.
fn noise(x: f32, y: f32, t: f32) -> f32 {
    (x * 0.1 + t).sin() * (y * 0.1 + t * 0.8).cos() * ((x + y) * 0.05 + t * 0.5).sin()
}

struct Flame {
    x: f32,
    base_x: f32,
    y: f32,
    size: f32,
    rise_speed: f32,
    life: f32,
    max_life: f32,
    turbulence: f32,
    noise_seed: f32,
    flicker_speed: f32,
    flicker_offset: f32,
    expansion: f32,
}

pub struct Flames {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    flames: Vec<Flame>,
    rng: fastrand::Rng,
}

impl Flames {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut flames = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            flames: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        flames.populate();
        flames
    }

    fn populate(&mut self) {
        self.flames.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..FLAME_COUNT {
            let flame = self.spawn();
            self.flames.push(flame);
        }
    }

    fn spawn(&mut self) -> Flame {
        let w = self.width as f32;
        let base_x = w / 2.0 + (self.rng.f32() - 0.5) * w * 0.4;
        Flame {
            x: base_x,
            base_x,
            y: self.height as f32,
            size: self.rng.f32() * 20.0 + 15.0,
            rise_speed: self.rng.f32() * 2.5 + 1.5,
            life: 1.0,
            max_life: self.rng.f32() * 0.6 + 0.4,
            turbulence: self.rng.f32() * 2.0 + 1.0,
            noise_seed: self.rng.f32() * 1000.0,
            flicker_speed: self.rng.f32() * 0.1 + 0.05,
            flicker_offset: self.rng.f32() * std::f32::consts::TAU,
            expansion: self.rng.f32() * 0.5 + 0.5,
        }
    }

    /// Color along the heat ramp: white-hot at birth, the base color at
    /// mid-life, cooling toward dark at the tip.
    fn heat_color(&self, progress: f32) -> Rgba {
        let hot = Rgba::new(
            self.color.r.saturating_add(100),
            self.color.g.saturating_add(50),
            self.color.b.saturating_sub(50),
            self.color.a,
        );
        if progress < 0.2 {
            hot.mix(Rgba::WHITE, (0.2 - progress) / 0.2)
        } else if progress < 0.5 {
            hot.mix(self.color, (progress - 0.2) / 0.3)
        } else {
            self.color.mix(self.color.shift(-60), (progress - 0.5) / 0.5)
        }
    }
}

impl Animation for Flames {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        for i in 0..self.flames.len() {
            let dead = {
                let time = self.time;
                let speed = self.speed;
                let flame = &mut self.flames[i];
                flame.y -= flame.rise_speed * speed;
                let nx = noise(flame.noise_seed + time * 0.5, flame.y * 0.01, time * 0.3)
                    * flame.turbulence;
                let ny = noise(flame.noise_seed + time * 0.5 + 37.0, flame.y * 0.01, time * 0.3)
                    * flame.turbulence
                    * 0.5;
                flame.x = flame.base_x + nx * 30.0;
                flame.y += ny;
                flame.life -= 0.015 * speed / flame.max_life;
                flame.life <= 0.0
            };
            if dead {
                let fresh = self.spawn();
                self.flames[i] = fresh;
            }
        }
        // Back-to-front so the hottest low flames draw over the tips.
        self.flames.sort_by(|a, b| b.y.total_cmp(&a.y));
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let w = self.width as f32;
        let h = self.height as f32;
        let a = self.color.a;

        let brightness = (self.time * 0.5).sin() * 0.1 + 0.9;
        let warm = Rgba::new(255, 220, 100, 1.0);
        canvas.fill_radial(
            w / 2.0,
            h,
            w * 0.3,
            &[
                (0.0, warm.with_alpha(a * 0.4 * brightness)),
                (
                    0.3,
                    Rgba::new(self.color.r, self.color.g.saturating_add(50), self.color.b, 1.0)
                        .with_alpha(a * 0.25 * brightness),
                ),
                (0.6, self.color.with_alpha(a * 0.1 * brightness)),
                (1.0, self.color.with_alpha(0.0)),
            ],
        );

        // Shimmer band above the bed, fading upward.
        let band = h * 0.3;
        let shimmer = Rgba::new(255, 200, 100, 1.0);
        for row in 0..band.ceil() as i32 {
            let fade = row as f32 / band;
            let y = h - 1.0 - row as f32;
            canvas.fill_rect(0.0, y, w, 1.0, shimmer.with_alpha(a * 0.05 * (1.0 - fade)));
        }

        for flame in &self.flames {
            let progress = (1.0 - flame.life).clamp(0.0, 1.0);
            let flicker =
                (self.time * flame.flicker_speed + flame.flicker_offset).sin() * 0.2 + 0.8;
            let opacity = (a * flame.life * flicker * (1.0 - progress * 0.5)).clamp(0.0, 1.0);
            if opacity <= 0.0 {
                continue;
            }
            let size = flame.size * (1.0 + progress * flame.expansion);
            let body = self.heat_color(progress);
            canvas.fill_radial(
                flame.x,
                flame.y,
                size,
                &[
                    (0.0, body.with_alpha(opacity)),
                    (0.4, body.with_alpha(opacity * 0.8)),
                    (0.7, body.with_alpha(opacity * 0.4)),
                    (1.0, body.with_alpha(0.0)),
                ],
            );
            if progress < 0.4 {
                let core_opacity = opacity * (1.0 - progress / 0.4) * 0.8;
                let core = Rgba::new(255, 255, 230, 1.0);
                canvas.fill_radial(
                    flame.x,
                    flame.y,
                    size * 0.4,
                    &[
                        (0.0, core.with_alpha(core_opacity)),
                        (0.5, body.with_alpha(core_opacity * 0.6)),
                        (1.0, body.with_alpha(0.0)),
                    ],
                );
            }
            if progress < 0.6 {
                let stretch = opacity * (1.0 - progress / 0.6) * 0.5;
                canvas.fill_ellipse(
                    flame.x,
                    flame.y - size * 0.3,
                    size * 0.6,
                    size * 1.2,
                    0.0,
                    body.with_alpha(stretch * 0.5),
                );
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
    fn test_dead_flames_respawn_at_base() {
        let mut flames = Flames::new(&AnimationConfig::for_variant("flames"), 80, 60);
        for _ in 0..2000 {
            flames.update();
        }
        assert_eq!(flames.flames.len(), FLAME_COUNT);
        for flame in &flames.flames {
            assert!(flame.life > 0.0);
        }
    }

    #[test]
    fn test_sorted_back_to_front() {
        let mut flames = Flames::new(&AnimationConfig::for_variant("flames"), 80, 60);
        flames.update();
        for pair in flames.flames.windows(2) {
            assert!(pair[0].y >= pair[1].y);
        }
    }

    #[test]
    fn test_heat_ramp_starts_white() {
        let flames = Flames::new(&AnimationConfig::for_variant("flames"), 10, 10);
        let birth = flames.heat_color(0.0);
        assert!(birth.r > 200 && birth.g > 200);
        let tip = flames.heat_color(1.0);
        assert!(tip.r <= flames.color.r || tip.g < flames.color.g);
    }
}

//! Glowing embers rising through a faint heat shimmer, flickering and
//! fading as they climb, recycled below the bottom edge.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const EMBER_COUNT: usize = 40;

struct Ember {
    x: f32,
    y: f32,
    size: f32,
    rise_speed: f32,
    drift: f32,
    life: f32,
    fade_start: f32,
    flicker_phase: f32,
    flicker_speed: f32,
    pulse_offset: f32,
    heat_wave: f32,
    /// Whether this ember throws a spark trail this frame; rerolled on
    /// every update so render can stay pure.
    spark: bool,
}

pub struct Embers {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    embers: Vec<Ember>,
    rng: fastrand::Rng,
}

impl Embers {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut embers = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            embers: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        embers.populate();
        embers
    }

    fn populate(&mut self) {
        self.embers.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..EMBER_COUNT {
            let y = self.rng.f32() * self.height as f32;
            let ember = self.spawn(y);
            self.embers.push(ember);
        }
    }

    fn spawn(&mut self, y: f32) -> Ember {
        Ember {
            x: self.rng.f32() * self.width as f32,
            y,
            size: self.rng.f32() * 4.0 + 1.0,
            rise_speed: self.rng.f32() * 1.5 + 0.5,
            drift: (self.rng.f32() - 0.5) * 0.8,
            life: 1.0,
            fade_start: self.rng.f32() * 0.3 + 0.5,
            flicker_phase: self.rng.f32() * std::f32::consts::TAU,
            flicker_speed: self.rng.f32() * 0.1 + 0.05,
            pulse_offset: self.rng.f32() * std::f32::consts::TAU,
            heat_wave: self.rng.f32() * std::f32::consts::TAU,
            spark: false,
        }
    }

    fn opacity(&self, ember: &Ember) -> f32 {
        let progress = 1.0 - ember.y / self.height as f32;
        let mut opacity = ember.life;
        if progress > ember.fade_start {
            opacity *= 1.0 - (progress - ember.fade_start) / (1.0 - ember.fade_start);
        }
        let flicker = (self.time * ember.flicker_speed + ember.flicker_phase).sin() * 0.3 + 0.7;
        (opacity * flicker).clamp(0.0, 1.0)
    }
}

impl Animation for Embers {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        let w = self.width as f32;
        let h = self.height as f32;
        for i in 0..self.embers.len() {
            let gone = {
                let time = self.time;
                let speed = self.speed;
                let ember = &mut self.embers[i];
                ember.y -= ember.rise_speed * speed;
                ember.x += ember.drift * speed + (time * 0.3 + ember.heat_wave).sin() * 0.3;
                if ember.x < 0.0 {
                    ember.x += w;
                } else if ember.x > w {
                    ember.x -= w;
                }
                ember.y < -ember.size * 5.0
            };
            if gone {
                let y = h + self.rng.f32() * 50.0;
                let fresh = self.spawn(y);
                self.embers[i] = fresh;
            } else {
                self.embers[i].spark = self.rng.f32() > 0.95;
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        for ember in &self.embers {
            let opacity = self.opacity(ember);
            if opacity <= 0.0 {
                continue;
            }
            let alpha = self.color.a * opacity;
            let pulse = (self.time * 2.0 + ember.pulse_offset).sin() * 0.2 + 0.8;
            let size = ember.size * pulse;
            let x = ember.x + (self.time * 0.5 + ember.heat_wave).sin() * 3.0;

            let hot = Rgba::new(
                self.color.r.saturating_add(100),
                self.color.g.saturating_add(100),
                self.color.b.saturating_sub(50),
                alpha,
            );
            let cool = self.color.shift(-30);
            canvas.fill_radial(
                x,
                ember.y,
                size * 3.0,
                &[
                    (0.0, self.color.with_alpha(alpha * 0.4)),
                    (0.5, cool.with_alpha(alpha * 0.2)),
                    (1.0, cool.with_alpha(0.0)),
                ],
            );
            canvas.fill_radial(
                x,
                ember.y,
                size,
                &[
                    (0.0, hot),
                    (0.4, self.color.with_alpha(alpha * 0.9)),
                    (1.0, self.color.with_alpha(0.0)),
                ],
            );
            if ember.spark && opacity > 0.3 {
                let trail = size * 2.0;
                canvas.stroke_line_gradient(
                    x,
                    ember.y,
                    x,
                    ember.y + trail,
                    size * 0.3,
                    self.color.with_alpha(alpha * 0.6),
                    self.color.with_alpha(0.0),
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
    fn test_recycling_keeps_count_and_resets_life() {
        let mut embers = Embers::new(&AnimationConfig::for_variant("embers"), 40, 30);
        for _ in 0..3000 {
            embers.update();
        }
        assert_eq!(embers.embers.len(), EMBER_COUNT);
        for ember in &embers.embers {
            assert!(ember.life > 0.0);
            assert!(ember.y <= 30.0 + 50.0);
        }
    }

    #[test]
    fn test_draws_glow() {
        let mut embers = Embers::new(&AnimationConfig::for_variant("embers"), 64, 48);
        let mut canvas = Canvas::new(64, 48);
        embers.update();
        embers.render(&mut canvas);
        assert!(!canvas.is_blank());
    }
}

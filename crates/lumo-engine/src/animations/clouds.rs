//! Puffy cloud banks drifting sideways on two depth layers. Each cloud
//! is a cluster of soft radial puffs regenerated when the cloud wraps.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const CLOUD_COUNT: usize = 8;

struct Puff {
    offset_x: f32,
    offset_y: f32,
    radius: f32,
    alpha: f32,
}

#[derive(Clone, Copy, PartialEq)]
enum Layer {
    Back,
    Front,
}

struct Cloud {
    x: f32,
    y: f32,
    width: f32,
    speed: f32,
    opacity: f32,
    layer: Layer,
    wobble_offset: f32,
    wobble_speed: f32,
    puffs: Vec<Puff>,
}

pub struct Clouds {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    clouds: Vec<Cloud>,
    rng: fastrand::Rng,
}

impl Clouds {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut clouds = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            clouds: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        clouds.populate();
        clouds
    }

    fn populate(&mut self) {
        self.clouds.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for i in 0..CLOUD_COUNT {
            let layer = if i % 2 == 0 { Layer::Back } else { Layer::Front };
            let cloud = self.spawn(layer, true);
            self.clouds.push(cloud);
        }
        // Back layer renders first so front clouds overlap it.
        self.clouds
            .sort_by_key(|c| if c.layer == Layer::Back { 0 } else { 1 });
    }

    fn spawn(&mut self, layer: Layer, anywhere: bool) -> Cloud {
        let width = self.rng.f32() * 200.0 + 150.0;
        let height = self.rng.f32() * 60.0 + 40.0;
        let x = if anywhere {
            self.rng.f32() * (self.width as f32 + width) - width
        } else {
            -width
        };
        let puff_count = self.rng.usize(4..=7);
        let mut puffs = Vec::with_capacity(puff_count);
        for p in 0..puff_count {
            let spread = (p as f32 / (puff_count - 1).max(1) as f32 - 0.5) * width * 0.6;
            puffs.push(Puff {
                offset_x: spread + (self.rng.f32() - 0.5) * 40.0,
                offset_y: (self.rng.f32() - 0.5) * height * 0.6,
                radius: self.rng.f32() * 40.0 + 30.0,
                alpha: self.rng.f32() * 0.3 + 0.5,
            });
        }
        Cloud {
            x,
            y: self.rng.f32() * self.height as f32 * 0.6,
            width,
            speed: self.rng.f32() * 0.3 + 0.1,
            opacity: self.rng.f32() * 0.4 + 0.4,
            layer,
            wobble_offset: self.rng.f32() * std::f32::consts::TAU,
            wobble_speed: self.rng.f32() * 0.5 + 0.5,
            puffs,
        }
    }
}

impl Animation for Clouds {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        let w = self.width as f32;
        for i in 0..self.clouds.len() {
            self.clouds[i].x += self.speed * self.clouds[i].speed;
            if self.clouds[i].x > w {
                let layer = self.clouds[i].layer;
                let fresh = self.spawn(layer, false);
                self.clouds[i] = fresh;
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        // Cloud bodies read mostly white with a tint of the base color.
        let body = self.color.mix(Rgba::WHITE, 0.9);
        for cloud in &self.clouds {
            let layer_mult = match cloud.layer {
                Layer::Back => 0.7,
                Layer::Front => 1.0,
            };
            let wobble =
                (self.time * cloud.wobble_speed + cloud.wobble_offset).sin() * 5.0;
            for puff in &cloud.puffs {
                let cx = cloud.x + puff.offset_x;
                let cy = cloud.y + puff.offset_y + wobble;
                let alpha = self.color.a * cloud.opacity * puff.alpha * layer_mult;
                canvas.fill_radial(
                    cx,
                    cy,
                    puff.radius,
                    &[(0.0, body.with_alpha(alpha)), (1.0, body.with_alpha(0.0))],
                );
                canvas.fill_radial(
                    cx,
                    cy,
                    puff.radius * 1.5,
                    &[
                        (0.0, body.with_alpha(alpha * 0.3)),
                        (1.0, body.with_alpha(0.0)),
                    ],
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
    fn test_back_layer_sorted_first() {
        let clouds = Clouds::new(&AnimationConfig::for_variant("clouds"), 300, 200);
        let first_front = clouds
            .clouds
            .iter()
            .position(|c| c.layer == Layer::Front)
            .unwrap();
        assert!(
            clouds.clouds[..first_front]
                .iter()
                .all(|c| c.layer == Layer::Back)
        );
    }

    #[test]
    fn test_recycled_clouds_regrow_puffs() {
        let mut clouds = Clouds::new(&AnimationConfig::for_variant("clouds"), 100, 80);
        for _ in 0..5000 {
            clouds.update();
        }
        assert_eq!(clouds.clouds.len(), CLOUD_COUNT);
        for cloud in &clouds.clouds {
            assert!((4..=7).contains(&cloud.puffs.len()));
            assert!(cloud.x <= 100.0);
        }
    }
}

//! Autumn leaves tumbling down with sway and flutter. Each leaf picks a
//! palette color and one of three silhouettes when spawned.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const LEAF_COUNT: usize = 25;

const AUTUMN: [Rgba; 7] = [
    Rgba::new(210, 105, 30, 1.0),
    Rgba::new(255, 140, 0, 1.0),
    Rgba::new(255, 69, 0, 1.0),
    Rgba::new(218, 165, 32, 1.0),
    Rgba::new(139, 69, 19, 1.0),
    Rgba::new(255, 215, 0, 1.0),
    Rgba::new(178, 34, 34, 1.0),
];

#[derive(Clone, Copy)]
enum Silhouette {
    Oval,
    Maple,
    Oak,
}

struct Leaf {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rotation: f32,
    rotation_speed: f32,
    fall_speed: f32,
    sway_amplitude: f32,
    sway_speed: f32,
    sway_offset: f32,
    alpha: f32,
    color: Rgba,
    silhouette: Silhouette,
    flutter_phase: f32,
}

pub struct Leaves {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    leaves: Vec<Leaf>,
    rng: fastrand::Rng,
}

impl Leaves {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut leaves = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            leaves: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        leaves.populate();
        leaves
    }

    fn populate(&mut self) {
        self.leaves.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..LEAF_COUNT {
            let y = self.rng.f32() * self.height as f32;
            let leaf = self.spawn(y);
            self.leaves.push(leaf);
        }
    }

    fn spawn(&mut self, y: f32) -> Leaf {
        let silhouette = match self.rng.u8(0..3) {
            0 => Silhouette::Oval,
            1 => Silhouette::Maple,
            _ => Silhouette::Oak,
        };
        Leaf {
            x: self.rng.f32() * self.width as f32,
            y,
            width: self.rng.f32() * 15.0 + 10.0,
            height: self.rng.f32() * 20.0 + 15.0,
            rotation: self.rng.f32() * std::f32::consts::TAU,
            rotation_speed: (self.rng.f32() - 0.5) * 0.1,
            fall_speed: self.rng.f32() * 1.5 + 0.8,
            sway_amplitude: self.rng.f32() * 40.0 + 20.0,
            sway_speed: self.rng.f32() * 0.015 + 0.01,
            sway_offset: self.rng.f32() * std::f32::consts::TAU,
            alpha: self.rng.f32() * 0.3 + 0.7,
            color: AUTUMN[self.rng.usize(0..AUTUMN.len())],
            silhouette,
            flutter_phase: self.rng.f32() * std::f32::consts::TAU,
        }
    }
}

fn place(points: &[(f32, f32)], rot: f32, cx: f32, cy: f32) -> Vec<(f32, f32)> {
    let (sin, cos) = rot.sin_cos();
    points
        .iter()
        .map(|&(x, y)| (cx + x * cos - y * sin, cy + x * sin + y * cos))
        .collect()
}

impl Animation for Leaves {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        let h = self.height as f32;
        for i in 0..self.leaves.len() {
            let landed = {
                let time = self.time;
                let speed = self.speed;
                let leaf = &mut self.leaves[i];
                leaf.y += leaf.fall_speed * speed;
                leaf.y += (time * 3.0 + leaf.flutter_phase).sin() * 0.2 * speed;
                leaf.rotation += leaf.rotation_speed * speed;
                leaf.y > h + leaf.height
            };
            if landed {
                let mut fresh = self.spawn(0.0);
                fresh.y = -fresh.height;
                self.leaves[i] = fresh;
            } else if self.rng.f32() < 0.01 {
                let jitter = (self.rng.f32() - 0.5) * 0.05;
                let leaf = &mut self.leaves[i];
                leaf.rotation_speed = (leaf.rotation_speed + jitter).clamp(-0.15, 0.15);
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        for leaf in &self.leaves {
            let sway = (self.time * leaf.sway_speed + leaf.sway_offset).sin() * leaf.sway_amplitude;
            let flutter = (self.time * 3.0 + leaf.flutter_phase).sin() * 0.3 + 0.7;
            let cx = leaf.x + sway;
            let cy = leaf.y;
            // Autumn hue tinted toward the configured base color.
            let body = leaf.color.mix(self.color, 0.3);
            let alpha = self.color.a * leaf.alpha * flutter;
            let fill = body.with_alpha(alpha);
            let hw = leaf.width / 2.0;
            let hh = leaf.height / 2.0;
            match leaf.silhouette {
                Silhouette::Oval => {
                    canvas.fill_ellipse(cx, cy, hw, hh, leaf.rotation, fill);
                }
                Silhouette::Maple => {
                    let outline = [
                        (0.0, -hh),
                        (hw * 0.66, -hh * 0.33),
                        (hw, 0.0),
                        (hw * 0.5, hh * 0.66),
                        (0.0, hh),
                        (-hw * 0.5, hh * 0.66),
                        (-hw, 0.0),
                        (-hw * 0.66, -hh * 0.33),
                    ];
                    canvas.fill_polygon(&place(&outline, leaf.rotation, cx, cy), fill);
                }
                Silhouette::Oak => {
                    let outline = [
                        (0.0, -hh),
                        (hw * 0.5, -hh * 0.33),
                        (hw * 0.66, 0.0),
                        (hw * 0.5, hh * 0.66),
                        (0.0, hh),
                        (-hw * 0.5, hh * 0.66),
                        (-hw * 0.66, 0.0),
                        (-hw * 0.5, -hh * 0.33),
                    ];
                    canvas.fill_polygon(&place(&outline, leaf.rotation, cx, cy), fill);
                }
            }
            // Central vein.
            let vein = place(&[(0.0, -hh), (0.0, hh)], leaf.rotation, cx, cy);
            canvas.stroke_line(
                vein[0].0,
                vein[0].1,
                vein[1].0,
                vein[1].1,
                1.0,
                body.shift(-50).with_alpha(alpha * 0.4),
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
    fn test_landed_leaves_return_to_top() {
        let mut leaves = Leaves::new(&AnimationConfig::for_variant("leaves"), 60, 40);
        for _ in 0..2000 {
            leaves.update();
        }
        assert_eq!(leaves.leaves.len(), LEAF_COUNT);
        for leaf in &leaves.leaves {
            assert!(leaf.y <= 40.0 + leaf.height + 2.0);
        }
    }

    #[test]
    fn test_rotation_speed_stays_clamped() {
        let mut leaves = Leaves::new(&AnimationConfig::for_variant("leaves"), 60, 40);
        for _ in 0..5000 {
            leaves.update();
        }
        for leaf in &leaves.leaves {
            assert!(leaf.rotation_speed.abs() <= 0.15);
        }
    }

    #[test]
    fn test_palette_colors_used() {
        let leaves = Leaves::new(&AnimationConfig::for_variant("leaves"), 60, 40);
        for leaf in &leaves.leaves {
            assert!(AUTUMN.contains(&leaf.color));
        }
    }
}

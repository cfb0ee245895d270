//! Snow falling with per-flake wobble and drift. Each flake gets one of
//! five crystal shapes whose geometry is rolled once at spawn so it
//! stays stable frame to frame.

use std::f32::consts::TAU;

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const FLAKE_COUNT: usize = 120;

enum Crystal {
    Disc,
    /// Six spokes with per-spoke length jitter.
    Hexagon { radii: [f32; 6] },
    /// Alternating outer and inner points.
    Star { points: usize, inner: f32 },
    /// A center dot ringed by smaller dots.
    Cluster { dots: Vec<(f32, f32, f32)> },
    /// Six main branches with short side twigs.
    Dendrite { twig: f32 },
}

struct Flake {
    x: f32,
    y: f32,
    size: f32,
    fall_speed: f32,
    wind: f32,
    wobble_phase: f32,
    wobble_speed: f32,
    rotation: f32,
    rotation_speed: f32,
    opacity: f32,
    crystal: Crystal,
}

pub struct Snowfall {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    flakes: Vec<Flake>,
    rng: fastrand::Rng,
}

impl Snowfall {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut snowfall = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            flakes: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        snowfall.populate();
        snowfall
    }

    fn populate(&mut self) {
        self.flakes.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..FLAKE_COUNT {
            let y = self.rng.f32() * self.height as f32;
            let flake = self.spawn(y);
            self.flakes.push(flake);
        }
    }

    fn crystal(&mut self) -> Crystal {
        match self.rng.u8(0..5) {
            0 => Crystal::Disc,
            1 => {
                let mut radii = [0.0; 6];
                for r in &mut radii {
                    *r = self.rng.f32() * 0.3 + 0.7;
                }
                Crystal::Hexagon { radii }
            }
            2 => Crystal::Star {
                points: self.rng.usize(5..=7),
                inner: self.rng.f32() * 0.2 + 0.3,
            },
            3 => {
                let count = self.rng.usize(4..=6);
                let mut dots = Vec::with_capacity(count);
                for _ in 0..count {
                    dots.push((
                        self.rng.f32() * TAU,
                        self.rng.f32() * 0.4 + 0.5,
                        self.rng.f32() * 0.2 + 0.2,
                    ));
                }
                Crystal::Cluster { dots }
            }
            _ => Crystal::Dendrite {
                twig: self.rng.f32() * 0.2 + 0.3,
            },
        }
    }

    fn spawn(&mut self, y: f32) -> Flake {
        let crystal = self.crystal();
        Flake {
            x: self.rng.f32() * self.width as f32,
            y,
            size: self.rng.f32() * 3.5 + 1.0,
            fall_speed: self.rng.f32() + 0.3,
            wind: (self.rng.f32() - 0.5) * 0.4,
            wobble_phase: self.rng.f32() * TAU,
            wobble_speed: self.rng.f32() * 0.03 + 0.01,
            rotation: self.rng.f32() * TAU,
            rotation_speed: (self.rng.f32() - 0.5) * 0.04,
            opacity: self.rng.f32() * 0.4 + 0.5,
            crystal,
        }
    }

    fn draw_crystal(&self, canvas: &mut Canvas, flake: &Flake, x: f32, color: Rgba) {
        let s = flake.size;
        let y = flake.y;
        match &flake.crystal {
            Crystal::Disc => canvas.fill_circle(x, y, s * 0.6, color),
            Crystal::Hexagon { radii } => {
                for (i, &r) in radii.iter().enumerate() {
                    let angle = flake.rotation + i as f32 / 6.0 * TAU;
                    canvas.stroke_line(
                        x,
                        y,
                        x + angle.cos() * s * r,
                        y + angle.sin() * s * r,
                        1.0,
                        color,
                    );
                }
            }
            Crystal::Star { points, inner } => {
                let n = *points;
                let mut outline = Vec::with_capacity(n * 2);
                for i in 0..n * 2 {
                    let r = if i % 2 == 0 { s } else { s * inner };
                    let angle = flake.rotation + i as f32 / (n * 2) as f32 * TAU;
                    outline.push((x + angle.cos() * r, y + angle.sin() * r));
                }
                canvas.fill_polygon(&outline, color);
            }
            Crystal::Cluster { dots } => {
                canvas.fill_circle(x, y, s * 0.5, color);
                for &(angle, dist, size) in dots {
                    canvas.fill_circle(
                        x + (flake.rotation + angle).cos() * s * dist,
                        y + (flake.rotation + angle).sin() * s * dist,
                        s * size,
                        color,
                    );
                }
            }
            Crystal::Dendrite { twig } => {
                for i in 0..6 {
                    let angle = flake.rotation + i as f32 / 6.0 * TAU;
                    let (dx, dy) = (angle.cos(), angle.sin());
                    canvas.stroke_line(x, y, x + dx * s, y + dy * s, 1.0, color);
                    let (mx, my) = (x + dx * s * 0.6, y + dy * s * 0.6);
                    let side = angle + TAU / 8.0;
                    canvas.stroke_line(
                        mx,
                        my,
                        mx + side.cos() * s * twig,
                        my + side.sin() * s * twig,
                        1.0,
                        color,
                    );
                    let side = angle - TAU / 8.0;
                    canvas.stroke_line(
                        mx,
                        my,
                        mx + side.cos() * s * twig,
                        my + side.sin() * s * twig,
                        1.0,
                        color,
                    );
                }
            }
        }
    }
}

impl Animation for Snowfall {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        let w = self.width as f32;
        let h = self.height as f32;
        for i in 0..self.flakes.len() {
            let settled = {
                let speed = self.speed;
                let flake = &mut self.flakes[i];
                flake.y += flake.fall_speed * speed;
                flake.x += flake.wind * speed;
                flake.rotation += flake.rotation_speed * speed;
                if flake.x < -20.0 {
                    flake.x = w + 20.0;
                } else if flake.x > w + 20.0 {
                    flake.x = -20.0;
                }
                flake.y > h + 20.0
            };
            if settled {
                let fresh = self.spawn(-20.0);
                self.flakes[i] = fresh;
            } else if self.rng.f32() < 0.01 {
                let jitter = (self.rng.f32() - 0.5) * 0.2;
                let flake = &mut self.flakes[i];
                flake.wind = (flake.wind + jitter).clamp(-0.5, 0.5);
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        // Flakes read mostly white regardless of the tint.
        let body = self.color.mix(Rgba::WHITE, 0.7);
        for flake in &self.flakes {
            let wobble = (self.time * flake.wobble_speed + flake.wobble_phase).sin() * 8.0;
            let x = flake.x + wobble;
            let alpha = self.color.a * flake.opacity;
            canvas.fill_radial(
                x,
                flake.y,
                flake.size * 2.0,
                &[
                    (0.0, body.with_alpha(alpha * 0.8)),
                    (0.4, body.with_alpha(alpha * 0.4)),
                    (1.0, body.with_alpha(0.0)),
                ],
            );
            self.draw_crystal(canvas, flake, x, body.with_alpha(alpha));
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
    fn test_settled_flakes_restart_at_top() {
        let mut snowfall = Snowfall::new(&AnimationConfig::for_variant("snowfall"), 60, 40);
        for _ in 0..3000 {
            snowfall.update();
        }
        assert_eq!(snowfall.flakes.len(), FLAKE_COUNT);
        for flake in &snowfall.flakes {
            assert!(flake.y <= 60.0 + 2.0);
            assert!(flake.wind.abs() <= 0.5);
        }
    }

    #[test]
    fn test_zero_size_defers_population() {
        let mut snowfall = Snowfall::new(&AnimationConfig::for_variant("snowfall"), 0, 0);
        assert!(snowfall.flakes.is_empty());
        snowfall.resize(80, 60);
        assert_eq!(snowfall.flakes.len(), FLAKE_COUNT);
        let mut canvas = Canvas::new(80, 60);
        snowfall.update();
        snowfall.render(&mut canvas);
        assert!(!canvas.is_blank());
    }
}

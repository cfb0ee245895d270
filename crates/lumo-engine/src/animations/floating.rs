//! Soft geometric shapes drifting and slowly rotating, wrapping at the
//! edges.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const SHAPE_COUNT: usize = 15;

#[derive(Clone, Copy)]
enum Kind {
    Circle,
    Square,
    Triangle,
}

struct Shape {
    x: f32,
    y: f32,
    size: f32,
    vx: f32,
    vy: f32,
    rotation: f32,
    rotation_speed: f32,
    kind: Kind,
    alpha: f32,
    wobble_offset: f32,
}

pub struct Floating {
    color: Rgba,
    speed: f32,
    time: f32,
    width: u32,
    height: u32,
    shapes: Vec<Shape>,
    rng: fastrand::Rng,
}

impl Floating {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut floating = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            time: 0.0,
            width,
            height,
            shapes: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        floating.populate();
        floating
    }

    fn populate(&mut self) {
        self.shapes.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..SHAPE_COUNT {
            let kind = match self.rng.u8(0..3) {
                0 => Kind::Circle,
                1 => Kind::Square,
                _ => Kind::Triangle,
            };
            self.shapes.push(Shape {
                x: self.rng.f32() * self.width as f32,
                y: self.rng.f32() * self.height as f32,
                size: self.rng.f32() * 40.0 + 20.0,
                vx: (self.rng.f32() - 0.5) * 0.5,
                vy: (self.rng.f32() - 0.5) * 0.5,
                rotation: self.rng.f32() * std::f32::consts::TAU,
                rotation_speed: (self.rng.f32() - 0.5) * 0.02,
                kind,
                alpha: self.rng.f32() * 0.3 + 0.2,
                wobble_offset: self.rng.f32() * std::f32::consts::TAU,
            });
        }
    }
}

fn rotated(points: &[(f32, f32)], rot: f32, cx: f32, cy: f32) -> Vec<(f32, f32)> {
    let (sin, cos) = rot.sin_cos();
    points
        .iter()
        .map(|&(x, y)| (cx + x * cos - y * sin, cy + x * sin + y * cos))
        .collect()
}

impl Animation for Floating {
    fn update(&mut self) {
        self.time += 0.02 * self.speed;
        let w = self.width as f32;
        let h = self.height as f32;
        for shape in &mut self.shapes {
            shape.x += shape.vx * self.speed;
            shape.y += shape.vy * self.speed;
            shape.rotation += shape.rotation_speed * self.speed;
            let margin = shape.size;
            if shape.x < -margin {
                shape.x = w + margin;
            } else if shape.x > w + margin {
                shape.x = -margin;
            }
            if shape.y < -margin {
                shape.y = h + margin;
            } else if shape.y > h + margin {
                shape.y = -margin;
            }
        }
    }

    fn render(&self, canvas: &mut Canvas) {
        for shape in &self.shapes {
            let wobble = (self.time + shape.wobble_offset).sin() * 5.0;
            let cx = shape.x + wobble;
            let cy = shape.y;
            let alpha = self.color.a * shape.alpha;
            let s = shape.size;
            match shape.kind {
                Kind::Circle => canvas.fill_radial(
                    cx,
                    cy,
                    s,
                    &[
                        (0.0, self.color.with_alpha(alpha)),
                        (1.0, self.color.with_alpha(0.0)),
                    ],
                ),
                Kind::Square => {
                    let half = s * 0.5;
                    let corners =
                        [(-half, -half), (half, -half), (half, half), (-half, half)];
                    canvas.fill_polygon(
                        &rotated(&corners, shape.rotation, cx, cy),
                        self.color.with_alpha(alpha * 0.5),
                    );
                }
                Kind::Triangle => {
                    let half = s * 0.5;
                    let points = [(0.0, -half), (half, half), (-half, half)];
                    canvas.fill_polygon(
                        &rotated(&points, shape.rotation, cx, cy),
                        self.color.with_alpha(alpha * 0.5),
                    );
                }
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
    fn test_shapes_wrap_at_margins() {
        let mut floating = Floating::new(&AnimationConfig::for_variant("floating"), 60, 40);
        for _ in 0..10_000 {
            floating.update();
        }
        assert_eq!(floating.shapes.len(), SHAPE_COUNT);
        for shape in &floating.shapes {
            assert!(shape.x >= -shape.size - 1.0 && shape.x <= 60.0 + shape.size + 1.0);
            assert!(shape.y >= -shape.size - 1.0 && shape.y <= 40.0 + shape.size + 1.0);
        }
    }

    #[test]
    fn test_draws_shapes() {
        let mut floating = Floating::new(&AnimationConfig::for_variant("floating"), 80, 60);
        let mut canvas = Canvas::new(80, 60);
        floating.update();
        floating.render(&mut canvas);
        assert!(!canvas.is_blank());
    }
}

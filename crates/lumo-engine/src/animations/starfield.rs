//! Perspective starfield flying toward the viewer, stars streaking into
//! trails, with a hyperspace tunnel overlay at high speed.

use lumo_core::{AnimationConfig, Rgba};

use crate::animation::Animation;
use crate::canvas::Canvas;

const DEFAULT_COLOR: &str = "#0073aa";
const STAR_COUNT: usize = 200;
const MAX_DEPTH: f32 = 1000.0;
const FOCAL: f32 = 128.0;

struct Star {
    x: f32,
    y: f32,
    z: f32,
    /// Projected position this frame, when on screen.
    proj: Option<(f32, f32)>,
    /// Projected position last frame, for the trail.
    prev: Option<(f32, f32)>,
}

pub struct Starfield {
    color: Rgba,
    speed: f32,
    width: u32,
    height: u32,
    stars: Vec<Star>,
    rng: fastrand::Rng,
}

impl Starfield {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let mut starfield = Self {
            color: Rgba::parse(config.color_or(DEFAULT_COLOR)),
            speed: config.speed_factor(),
            width,
            height,
            stars: Vec::new(),
            rng: fastrand::Rng::new(),
        };
        starfield.populate();
        starfield
    }

    fn populate(&mut self) {
        self.stars.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for _ in 0..STAR_COUNT {
            self.stars.push(Star {
                x: (self.rng.f32() - 0.5) * 2000.0,
                y: (self.rng.f32() - 0.5) * 2000.0,
                z: self.rng.f32() * MAX_DEPTH,
                proj: None,
                prev: None,
            });
        }
    }

    fn reset(star: &mut Star, rng: &mut fastrand::Rng) {
        star.x = (rng.f32() - 0.5) * 2000.0;
        star.y = (rng.f32() - 0.5) * 2000.0;
        star.z = MAX_DEPTH;
        star.proj = None;
        star.prev = None;
    }
}

impl Animation for Starfield {
    fn update(&mut self) {
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let w = self.width as f32;
        let h = self.height as f32;
        for star in &mut self.stars {
            star.prev = star.proj;
            star.z -= self.speed * 5.0;
            if star.z <= 0.0 {
                Self::reset(star, &mut self.rng);
                continue;
            }
            let k = FOCAL / star.z;
            let px = cx + star.x * k;
            let py = cy + star.y * k;
            if px < 0.0 || px > w || py < 0.0 || py > h {
                Self::reset(star, &mut self.rng);
            } else {
                star.proj = Some((px, py));
            }
        }
        // Far stars first so near streaks draw on top.
        self.stars.sort_by(|a, b| b.z.total_cmp(&a.z));
    }

    fn render(&self, canvas: &mut Canvas) {
        if canvas.is_degenerate() {
            return;
        }
        let a = self.color.a;
        if self.speed > 1.5 {
            let cx = self.width as f32 / 2.0;
            let cy = self.height as f32 / 2.0;
            let reach = (self.width.max(self.height)) as f32;
            for i in 0..12 {
                let angle = i as f32 / 12.0 * std::f32::consts::TAU;
                canvas.stroke_line_gradient(
                    cx,
                    cy,
                    cx + angle.cos() * reach,
                    cy + angle.sin() * reach,
                    1.0,
                    self.color.with_alpha(a * 0.2),
                    self.color.with_alpha(0.0),
                );
            }
        }
        for star in &self.stars {
            let Some((px, py)) = star.proj else { continue };
            let depth = 1.0 - star.z / MAX_DEPTH;
            let size = depth * 3.0;
            let opacity = a * depth;
            if let Some((qx, qy)) = star.prev {
                canvas.stroke_line_gradient(
                    qx,
                    qy,
                    px,
                    py,
                    (size / 2.0).max(0.5),
                    self.color.with_alpha(0.0),
                    self.color.with_alpha(opacity * 0.8),
                );
            }
            canvas.fill_circle(px, py, size.max(0.5), self.color.with_alpha(opacity));
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
    fn test_stars_recycle_at_depth_zero() {
        let mut starfield = Starfield::new(&AnimationConfig::for_variant("starfield"), 100, 80);
        for _ in 0..1000 {
            starfield.update();
        }
        assert_eq!(starfield.stars.len(), STAR_COUNT);
        for star in &starfield.stars {
            assert!(star.z > 0.0 && star.z <= MAX_DEPTH);
        }
    }

    #[test]
    fn test_depth_sorted_far_first() {
        let mut starfield = Starfield::new(&AnimationConfig::for_variant("starfield"), 100, 80);
        starfield.update();
        for pair in starfield.stars.windows(2) {
            assert!(pair[0].z >= pair[1].z);
        }
    }

    #[test]
    fn test_high_speed_draws_tunnel() {
        let mut config = AnimationConfig::for_variant("starfield");
        config.speed = 3.0;
        let starfield = Starfield::new(&config, 60, 60);
        let mut canvas = Canvas::new(60, 60);
        starfield.render(&mut canvas);
        assert!(canvas.pixel(30, 30).a > 0.0);
    }
}

//! Software raster surface the animations draw onto.
//!
//! A plain RGBA byte buffer with the alpha-blended primitives the variants
//! need: circles, radial and linear gradients, thick lines, polygons,
//! ellipses, and direct pixel access for the raster-field variants. All
//! drawing is src-over blending with straight (non-premultiplied) alpha so
//! layered glow passes accumulate the way the originals intend.

use lumo_core::Rgba;

/// A resizable RGBA8888 drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a surface with the given pixel dimensions. Zero-sized
    /// surfaces are valid; drawing onto them is a no-op.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True when every pixel is fully transparent black.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Resize the backing buffer, clearing it in the process.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize((width * height * 4) as usize, 0);
    }

    /// Clear the full surface to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Read one pixel. Out-of-bounds reads come back transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3] as f32 / 255.0,
        )
    }

    /// Overwrite one pixel without blending. Used by raster-field
    /// variants that regenerate every pixel each frame.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    /// Blend one pixel src-over. Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let sa = color.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let da = self.data[i + 3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let blend = |src: u8, dst: u8| {
            let s = src as f32 * sa;
            let d = dst as f32 * da * (1.0 - sa);
            if out_a > 0.0 { ((s + d) / out_a).round() as u8 } else { 0 }
        };
        self.data[i] = blend(color.r, self.data[i]);
        self.data[i + 1] = blend(color.g, self.data[i + 1]);
        self.data[i + 2] = blend(color.b, self.data[i + 2]);
        self.data[i + 3] = (out_a * 255.0).round() as u8;
    }

    /// Axis-aligned filled rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = (x + w).ceil() as i32;
        let y1 = (y + h).ceil() as i32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Filled disc.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba) {
        if r <= 0.0 {
            return;
        }
        let r2 = r * r;
        for py in (cy - r).floor() as i32..=(cy + r).ceil() as i32 {
            for px in (cx - r).floor() as i32..=(cx + r).ceil() as i32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Circle outline with the given stroke width.
    pub fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: Rgba) {
        if r <= 0.0 {
            return;
        }
        let outer = r + width * 0.5;
        let inner = (r - width * 0.5).max(0.0);
        let (o2, i2) = (outer * outer, inner * inner);
        for py in (cy - outer).floor() as i32..=(cy + outer).ceil() as i32 {
            for px in (cx - outer).floor() as i32..=(cx + outer).ceil() as i32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 <= o2 && d2 >= i2 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Disc filled with a radial gradient centered on the disc.
    ///
    /// `stops` are `(offset, color)` pairs with offsets ascending in
    /// 0.0-1.0, exactly like canvas gradient color stops.
    pub fn fill_radial(&mut self, cx: f32, cy: f32, r: f32, stops: &[(f32, Rgba)]) {
        self.fill_radial_at(cx, cy, r, cx, cy, stops);
    }

    /// Disc at `(cx, cy, r)` filled with a radial gradient whose center
    /// sits at `(gx, gy)` (for offset highlights).
    pub fn fill_radial_at(
        &mut self,
        cx: f32,
        cy: f32,
        r: f32,
        gx: f32,
        gy: f32,
        stops: &[(f32, Rgba)],
    ) {
        if r <= 0.0 || stops.is_empty() {
            return;
        }
        let r2 = r * r;
        for py in (cy - r).floor() as i32..=(cy + r).ceil() as i32 {
            for px in (cx - r).floor() as i32..=(cx + r).ceil() as i32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let gdx = px as f32 + 0.5 - gx;
                let gdy = py as f32 + 0.5 - gy;
                let t = (gdx * gdx + gdy * gdy).sqrt() / r;
                self.blend_pixel(px, py, sample_stops(stops, t));
            }
        }
    }

    /// Line segment with uniform color and stroke width.
    pub fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgba) {
        self.stroke_line_gradient(x0, y0, x1, y1, width, color, color);
    }

    /// Line segment whose color interpolates from `c0` at the start to
    /// `c1` at the end (motion trails, rain streaks).
    pub fn stroke_line_gradient(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        width: f32,
        c0: Rgba,
        c1: Rgba,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len = (dx * dx + dy * dy).sqrt();
        let half = (width * 0.5).max(0.5);
        if len < f32::EPSILON {
            self.fill_circle(x0, y0, half, c0);
            return;
        }
        // Stamp discs along the segment; spacing under half a pixel keeps
        // the stroke solid without excessive overdraw.
        let steps = (len / 0.5).ceil() as u32;
        let mut last: Option<(i32, i32)> = None;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let px = x0 + dx * t;
            let py = y0 + dy * t;
            let cell = (px.round() as i32, py.round() as i32);
            if last == Some(cell) && width <= 1.0 {
                continue;
            }
            last = Some(cell);
            let a = c0.a + (c1.a - c0.a) * t;
            let color = c0.mix(c1, t).with_alpha(a);
            if width <= 1.0 {
                self.blend_pixel(cell.0, cell.1, color.with_alpha(a * width.min(1.0)));
            } else {
                self.fill_circle(px, py, half, color);
            }
        }
    }

    /// Simple polygon fill (even-odd rule), tolerant of concave shapes.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let y_min = points.iter().map(|p| p.1).fold(f32::MAX, f32::min).floor() as i32;
        let y_max = points.iter().map(|p| p.1).fold(f32::MIN, f32::max).ceil() as i32;
        let mut xs: Vec<f32> = Vec::with_capacity(points.len());
        for py in y_min..=y_max {
            let scan = py as f32 + 0.5;
            xs.clear();
            for i in 0..points.len() {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= scan && by > scan) || (by <= scan && ay > scan) {
                    xs.push(ax + (scan - ay) / (by - ay) * (bx - ax));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for pair in xs.chunks_exact(2) {
                for px in pair[0].round() as i32..pair[1].round() as i32 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Filled ellipse with optional rotation.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, rot: f32, color: Rgba) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let extent = rx.max(ry);
        let (sin, cos) = rot.sin_cos();
        for py in (cy - extent).floor() as i32..=(cy + extent).ceil() as i32 {
            for px in (cx - extent).floor() as i32..=(cx + extent).ceil() as i32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let u = dx * cos + dy * sin;
                let v = -dx * sin + dy * cos;
                if (u * u) / (rx * rx) + (v * v) / (ry * ry) <= 1.0 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Fill a ribbon slice: the quad between two top points, extended
    /// `depth` pixels downward with alpha fading linearly to zero (the
    /// vertical gradient strip the sine-ribbon variants are built from).
    pub fn fill_ribbon_slice(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        depth: f32,
        color: Rgba,
    ) {
        if depth <= 0.0 || x1 <= x0 {
            return;
        }
        for px in x0.round() as i32..x1.round() as i32 {
            let t = (px as f32 - x0) / (x1 - x0);
            let top = y0 + (y1 - y0) * t;
            for dy in 0..depth.ceil() as i32 {
                let fade = 1.0 - dy as f32 / depth;
                self.blend_pixel(px, top.round() as i32 + dy, color.with_alpha(color.a * fade));
            }
        }
    }

    /// Fill every column from `ys[x]` down to the bottom edge with a
    /// uniform color (the area under a wave curve).
    pub fn fill_below(&mut self, ys: &[f32], color: Rgba) {
        for (x, &top) in ys.iter().enumerate().take(self.width as usize) {
            for py in top.round() as i32..self.height as i32 {
                self.blend_pixel(x as i32, py, color);
            }
        }
    }
}

/// Sample gradient stops at offset `t` with linear interpolation, exactly
/// like canvas color stops: clamped at the ends, piecewise linear between.
fn sample_stops(stops: &[(f32, Rgba)], t: f32) -> Rgba {
    let first = stops[0];
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = (o1 - o0).max(f32::EPSILON);
            let f = (t - o0) / span;
            let a = c0.a + (c1.a - c0.a) * f;
            return c0.mix(c1, f).with_alpha(a);
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let canvas = Canvas::new(8, 8);
        assert!(canvas.is_blank());
        assert!(!canvas.is_degenerate());
        assert!(Canvas::new(0, 8).is_degenerate());
    }

    #[test]
    fn test_blend_pixel_opaque_overwrites() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blend_pixel(1, 1, Rgba::new(10, 20, 30, 1.0));
        assert_eq!(canvas.pixel(1, 1), Rgba::new(10, 20, 30, 1.0));
        // Out of bounds is silently ignored
        canvas.blend_pixel(-1, 0, Rgba::WHITE);
        canvas.blend_pixel(4, 0, Rgba::WHITE);
    }

    #[test]
    fn test_blend_accumulates_alpha() {
        let mut canvas = Canvas::new(2, 2);
        canvas.blend_pixel(0, 0, Rgba::new(255, 0, 0, 0.5));
        canvas.blend_pixel(0, 0, Rgba::new(255, 0, 0, 0.5));
        let px = canvas.pixel(0, 0);
        assert_eq!(px.r, 255);
        assert!(px.a > 0.7 && px.a < 0.8); // 0.5 + 0.5*0.5 = 0.75
    }

    #[test]
    fn test_fill_circle_center_hit_corner_missed() {
        let mut canvas = Canvas::new(16, 16);
        canvas.fill_circle(8.0, 8.0, 4.0, Rgba::WHITE);
        assert_eq!(canvas.pixel(8, 8).r, 255);
        assert_eq!(canvas.pixel(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_radial_gradient_fades_outward() {
        let mut canvas = Canvas::new(32, 32);
        let stops = [(0.0, Rgba::new(255, 255, 255, 1.0)), (1.0, Rgba::new(255, 255, 255, 0.0))];
        canvas.fill_radial(16.0, 16.0, 12.0, &stops);
        assert!(canvas.pixel(16, 16).a > canvas.pixel(16, 26).a);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(0.0, 0.0, 4.0, 4.0, Rgba::WHITE);
        assert!(!canvas.is_blank());
        canvas.resize(6, 6);
        assert_eq!(canvas.data().len(), 6 * 6 * 4);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut canvas = Canvas::new(16, 16);
        canvas.fill_polygon(&[(8.0, 1.0), (14.0, 14.0), (2.0, 14.0)], Rgba::WHITE);
        assert!(canvas.pixel(8, 8).a > 0.0);
        assert_eq!(canvas.pixel(1, 2), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_stroke_line_marks_endpoints() {
        let mut canvas = Canvas::new(16, 16);
        canvas.stroke_line(2.0, 2.0, 13.0, 13.0, 2.0, Rgba::WHITE);
        assert!(canvas.pixel(2, 2).a > 0.0);
        assert!(canvas.pixel(13, 13).a > 0.0);
        assert!(canvas.pixel(7, 7).a > 0.0);
    }

    #[test]
    fn test_sample_stops_clamps_and_lerps() {
        let stops = [(0.0, Rgba::new(0, 0, 0, 1.0)), (1.0, Rgba::new(200, 200, 200, 0.0))];
        assert_eq!(sample_stops(&stops, -0.5), stops[0].1);
        assert_eq!(sample_stops(&stops, 2.0), stops[1].1);
        let mid = sample_stops(&stops, 0.5);
        assert_eq!(mid.r, 100);
        assert!((mid.a - 0.5).abs() < 1e-6);
    }
}

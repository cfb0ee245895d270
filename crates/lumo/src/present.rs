//! Presenting the pixel surface in a terminal.
//!
//! One terminal cell shows two vertically stacked pixels via the upper
//! half block: the glyph's foreground carries the top pixel, the cell
//! background the bottom one. Pixels are composited over black since the
//! engine draws with straight alpha onto a transparent surface.

use lumo_engine::Canvas;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

const UPPER_HALF_BLOCK: &str = "▀";

/// Renders a [`Canvas`] into a ratatui buffer at two pixels per cell.
pub struct CanvasWidget<'a> {
    canvas: &'a Canvas,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }

    /// The pixel dimensions a surface needs to fill `area`.
    pub fn surface_size(area: Rect) -> (u32, u32) {
        (area.width as u32, area.height as u32 * 2)
    }

    fn pixel_color(&self, x: u32, y: u32) -> Color {
        let px = self.canvas.pixel(x, y);
        let a = px.a.clamp(0.0, 1.0);
        Color::Rgb(
            (px.r as f32 * a) as u8,
            (px.g as f32 * a) as u8,
            (px.b as f32 * a) as u8,
        )
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.pixel_color(col as u32, row as u32 * 2);
                let bottom = self.pixel_color(col as u32, row as u32 * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::Rgba;

    #[test]
    fn test_surface_size_doubles_height() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(CanvasWidget::surface_size(area), (20, 20));
    }

    #[test]
    fn test_half_block_carries_two_pixels() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set_pixel(0, 0, Rgba::new(255, 0, 0, 1.0));
        canvas.set_pixel(0, 1, Rgba::new(0, 255, 0, 1.0));
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        CanvasWidget::new(&canvas).render(area, &mut buf);
        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_alpha_darkens_toward_black() {
        let mut canvas = Canvas::new(1, 2);
        canvas.set_pixel(0, 0, Rgba::new(200, 100, 50, 0.5));
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        CanvasWidget::new(&canvas).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(100, 50, 25));
    }
}

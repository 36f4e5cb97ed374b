use ab_glyph::{Font, FontRef, ScaleFont, point};
use std::error::Error;

use crate::ui::canvas::Canvas;

static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// Rasterises TrueType glyphs straight into a `Canvas`.
pub struct TextRenderer {
    font: FontRef<'static>,
}

impl TextRenderer {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let font = FontRef::try_from_slice(FONT_DATA).map_err(|e| format!("failed to parse font data: {e}"))?;
        Ok(Self { font })
    }

    /// Pixel width and line height of `text` at `size`.
    pub fn measure(&self, text: &str, size: f32) -> (i32, i32) {
        let scaled = self.font.as_scaled(size);
        let mut width = 0.0f32;
        let mut prev = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        (width.ceil() as i32, scaled.height().ceil() as i32)
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: i32, y: i32, size: f32, color: u32) {
        let scaled = self.font.as_scaled(size);
        let baseline = y as f32 + scaled.ascent();
        let mut cursor = x as f32;
        let mut prev = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                cursor += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(size, point(cursor, baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (gx, gy) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|px, py, coverage| {
                    canvas.blend(gx + px as i32, gy + py as i32, color, coverage);
                });
            }
            cursor += scaled.h_advance(id);
            prev = Some(id);
        }
    }

    /// Draws `text` so that its right edge sits at `right`.
    pub fn draw_right(&self, canvas: &mut Canvas, text: &str, right: i32, y: i32, size: f32, color: u32) {
        let (width, _) = self.measure(text, size);
        self.draw(canvas, text, right - width, y, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn embedded_font_parses() {
        assert!(TextRenderer::new().is_ok());
    }

    #[test]
    fn width_grows_with_text() {
        let text = TextRenderer::new().unwrap();
        let (one, h) = text.measure("8", 16.0);
        let (three, _) = text.measure("888", 16.0);
        assert!(one > 0 && h >= 16);
        // Monospaced: three glyphs are three advances.
        assert!((three - one * 3).abs() <= 2);
        assert_eq!(text.measure("", 16.0).0, 0);
    }

    #[test]
    fn glyphs_land_inside_their_box() {
        let text = TextRenderer::new().unwrap();
        let mut canvas = Canvas::new(200, 60);
        text.draw(&mut canvas, "R", 20, 10, 32.0, 0x00FF_FFFF);
        assert!(lit(&canvas) > 20);

        let (w, h) = text.measure("R", 32.0);
        for (i, &p) in canvas.pixels().iter().enumerate() {
            if p == 0 {
                continue;
            }
            let (x, y) = ((i % 200) as i32, (i / 200) as i32);
            assert!(x >= 19 && x <= 20 + w, "pixel at x {}", x);
            assert!(y >= 9 && y <= 10 + h, "pixel at y {}", y);
        }
    }

    #[test]
    fn right_aligned_text_ends_at_the_edge() {
        let text = TextRenderer::new().unwrap();
        let mut canvas = Canvas::new(300, 40);
        text.draw_right(&mut canvas, "116 BPM", 300, 0, 16.0, 0x00FF_FFFF);
        let rightmost = canvas
            .pixels()
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0)
            .map(|(i, _)| i % 300)
            .max()
            .unwrap();
        assert!(rightmost >= 260);
        // Blank spaces are not drawn, and nothing wraps to the left.
        assert!(canvas.pixels().iter().enumerate().all(|(i, &p)| p == 0 || i % 300 >= 150));
    }
}

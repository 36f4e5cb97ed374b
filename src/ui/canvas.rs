/// CPU pixel buffer the trainer draws into before presenting.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height] }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height];
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline(always)]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Mixes `color` over the existing pixel by `coverage` in `0.0..=1.0`.
    pub fn blend(&mut self, x: i32, y: i32, color: u32, coverage: f32) {
        let Some(i) = self.index(x, y) else { return };
        let a = coverage.clamp(0.0, 1.0);
        let dst = self.pixels[i];
        let mix = |shift: u32| {
            let s = ((color >> shift) & 0xFF) as f32;
            let d = ((dst >> shift) & 0xFF) as f32;
            ((d + (s - d) * a).round() as u32) << shift
        };
        self.pixels[i] = mix(16) | mix(8) | mix(0);
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            let row = py as usize * self.width;
            for px in x0..x1 {
                self.pixels[row + px as usize] = color;
            }
        }
    }

    /// Line of the given thickness, stamped as squares along a Bresenham walk.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), thickness: i32, color: u32) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = thickness.max(1) / 2;
        let size = thickness.max(1);

        loop {
            self.fill_rect(x - half, y - half, size, size, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn disc(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        let r2 = radius * radius;
        for y in -radius..=radius {
            for x in -radius..=radius {
                if x * x + y * y <= r2 {
                    self.put(cx + x, cy + y, color);
                }
            }
        }
    }

    /// Circle outline `thickness` pixels wide, growing inward from `radius`.
    pub fn ring(&mut self, cx: i32, cy: i32, radius: i32, thickness: i32, color: u32) {
        let outer = radius * radius;
        let inner_r = (radius - thickness).max(0);
        let inner = inner_r * inner_r;
        for y in -radius..=radius {
            for x in -radius..=radius {
                let d = x * x + y * y;
                if d <= outer && d > inner {
                    self.put(cx + x, cy + y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_clipped() {
        let mut c = Canvas::new(10, 10);
        c.fill_rect(-5, 8, 20, 20, 7);
        assert_eq!(c.get(0, 9), Some(7));
        assert_eq!(c.get(9, 8), Some(7));
        assert_eq!(c.get(0, 7), Some(0));
        assert_eq!(c.get(10, 9), None);
    }

    #[test]
    fn disc_and_ring() {
        let mut c = Canvas::new(40, 40);
        c.disc(10, 10, 5, 1);
        assert_eq!(c.get(10, 10), Some(1));
        assert_eq!(c.get(15, 10), Some(1));
        assert_eq!(c.get(16, 10), Some(0));

        c.ring(30, 30, 6, 2, 2);
        assert_eq!(c.get(30, 30), Some(0));
        assert_eq!(c.get(36, 30), Some(2));
        assert_eq!(c.get(30, 25), Some(2));
    }

    #[test]
    fn line_reaches_both_ends() {
        let mut c = Canvas::new(20, 20);
        c.line((2, 3), (17, 11), 1, 9);
        assert_eq!(c.get(2, 3), Some(9));
        assert_eq!(c.get(17, 11), Some(9));
        c.line((5, 18), (5, 1), 3, 4);
        assert_eq!(c.get(4, 10), Some(4));
        assert_eq!(c.get(6, 10), Some(4));
    }

    #[test]
    fn blend_mixes_by_coverage() {
        let mut c = Canvas::new(2, 1);
        c.blend(0, 0, 0x00FF_FFFF, 1.0);
        assert_eq!(c.get(0, 0), Some(0x00FF_FFFF));
        c.blend(1, 0, 0x00FF_0000, 0.5);
        assert_eq!(c.get(1, 0), Some(0x0080_0000));
        c.blend(1, 0, 0x0000_00FF, 0.0);
        assert_eq!(c.get(1, 0), Some(0x0080_0000));
        c.blend(5, 5, 0x00FF_FFFF, 1.0);
    }

    #[test]
    fn resize_reallocates() {
        let mut c = Canvas::new(4, 4);
        c.fill(3);
        c.resize(8, 2);
        assert_eq!(c.pixels().len(), 16);
        assert!(c.pixels().iter().all(|&p| p == 0));
    }
}

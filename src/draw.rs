//! Software rasteriser over an RGBA8 frame buffer.
//!
//! Every primitive alpha-blends onto the frame and silently clips to its
//! bounds, so callers may pass coordinates that fall partly off-screen.

pub type Rgba = (u8, u8, u8, u8);

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// `frame` must hold `width * height` RGBA pixels.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(frame.len(), (width * height * 4) as usize);
        Self { frame, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read back one pixel (tests and debugging)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let px = &self.frame[idx..idx + 4];
        Some((px[0], px[1], px[2], px[3]))
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, col: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let (r, g, b, a) = col;
        if a == 0 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let ar = a as u16;
        let iar = (255 - a) as u16;
        let px = &mut self.frame[idx..idx + 4];
        px[0] = ((r as u16 * ar + px[0] as u16 * iar) / 255) as u8;
        px[1] = ((g as u16 * ar + px[1] as u16 * iar) / 255) as u8;
        px[2] = ((b as u16 * ar + px[2] as u16 * iar) / 255) as u8;
        px[3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, col: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i32).min(self.width as i32);
        let y1 = (y + h as i32).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, col);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, w: u32, h: u32, col: Rgba) {
        if w == 0 || h == 0 {
            return;
        }
        let x2 = x + w as i32 - 1;
        let y2 = y + h as i32 - 1;
        for px in x..=x2 {
            self.blend_pixel(px, y, col);
            if y2 != y {
                self.blend_pixel(px, y2, col);
            }
        }
        for py in y + 1..y2 {
            self.blend_pixel(x, py, col);
            if x2 != x {
                self.blend_pixel(x2, py, col);
            }
        }
    }

    /// Bresenham segment, both ends inclusive.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), col: Rgba) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x, y, col);
            if (x, y) == to {
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

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, col: Rgba) {
        if radius <= 0 {
            return;
        }
        let r2 = radius * radius;
        for dy in -radius..=radius {
            // Widest span on this row that stays inside the circle
            let mut span = 0;
            while (span + 1) * (span + 1) + dy * dy <= r2 {
                span += 1;
            }
            for dx in -span..=span {
                self.blend_pixel(cx + dx, cy + dy, col);
            }
        }
    }

    /// Draw `sprite` centred on (`cx`, `cy`), turned clockwise by `angle`
    /// radians (screen y grows downwards). Nearest-neighbour sampling.
    pub fn blit_rotated(&mut self, sprite: &Sprite, cx: f32, cy: f32, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let half = sprite.size as f32 / 2.0;
        // The rotated sprite fits inside a square of side size * sqrt(2).
        let reach = (half * std::f32::consts::SQRT_2).ceil() as i32;
        let (ox, oy) = (cx.round() as i32, cy.round() as i32);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (ux, uy) = (dx as f32 + 0.5, dy as f32 + 0.5);
                let sx = cos * ux + sin * uy + half;
                let sy = -sin * ux + cos * uy + half;
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(col) = sprite.get(sx as u32, sy as u32) {
                    self.blend_pixel(ox + dx, oy + dy, col);
                }
            }
        }
    }

    /// Bitmap text with 5x7 glyphs magnified by `scale`. Unknown characters
    /// leave a blank cell.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: u32, col: Rgba) {
        let mut cx = x;
        for ch in text.chars() {
            cx += self.draw_char(ch, cx, y, scale, col);
        }
    }

    /// Same as `draw_text` but centred on (`cx`, `cy`).
    pub fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, scale: u32, col: Rgba) {
        let (w, h) = text_size(text, scale);
        self.draw_text(text, cx - w as i32 / 2, cy - h as i32 / 2, scale, col);
    }

    fn draw_char(&mut self, ch: char, x: i32, y: i32, scale: u32, col: Rgba) -> i32 {
        let s = scale as i32;
        if let Some(rows) = glyph_5x7(ch) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (row >> (4 - rx)) & 1 == 1 {
                        self.fill_rect(x + rx * s, y + ry as i32 * s, scale, scale, col);
                    }
                }
            }
        }
        GLYPH_ADVANCE as i32 * s
    }
}

/// Horizontal distance from one glyph to the next, in unscaled pixels
const GLYPH_ADVANCE: u32 = 6;
const GLYPH_HEIGHT: u32 = 7;

/// Pixel size of `text` at `scale`, without the trailing letter gap.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let n = text.chars().count() as u32;
    let w = (n * GLYPH_ADVANCE).saturating_sub(1) * scale;
    (w, GLYPH_HEIGHT * scale)
}

/// A small square RGBA image with a transparent background.
#[derive(Debug, Clone)]
pub struct Sprite {
    size: u32,
    pixels: Vec<Rgba>,
}

impl Sprite {
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                pixels.push(f(x, y));
            }
        }
        Self { size, pixels }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get((y * self.size + x) as usize).copied()
    }
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    let c = ch.to_ascii_uppercase();
    Some(match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => return None,
    })
}

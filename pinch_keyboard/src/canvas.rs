//! In-memory ARGB framebuffer with the handful of primitives the overlay
//! needs: filled (rounded) rectangles and discs, alpha compositing and a
//! tiny scalable bitmap font.
//!
//! Pixels are packed `0xAARRGGBB`, the format `minifb` displays.  A pixel
//! value of `0` means "transparent" on overlay layers.

use image::RgbImage;

pub const TRANSPARENT: u32 = 0x0000_0000;

/// Pack an opaque colour.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Canvas { width, height, pixels: vec![fill; width * height] }
    }

    /// A fully transparent layer for compositing.
    pub fn transparent(width: usize, height: usize) -> Self {
        Canvas::new(width, height, TRANSPARENT)
    }

    pub fn blit_rgb(&mut self, frame: &RgbImage) {
        let w = (frame.width() as usize).min(self.width);
        let h = (frame.height() as usize).min(self.height);
        for y in 0..h {
            for x in 0..w {
                let [r, g, b] = frame.get_pixel(x as u32, y as u32).0;
                self.pixels[y * self.width + x] = rgb(r, g, b);
            }
        }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn clear(&mut self, color: u32) { self.pixels.fill(color); }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    // ── Shapes ────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            let base = row * self.width;
            for col in x..(x + w).min(self.width) {
                self.pixels[base + col] = color;
            }
        }
    }

    /// Filled rectangle with quarter-circle corners of radius `r`.
    pub fn fill_rounded_rect(&mut self, x: usize, y: usize, w: usize, h: usize, r: usize, color: u32) {
        let r = r.min(w / 2).min(h / 2);
        if r == 0 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let r2 = (r * r) as isize;
        for dy in 0..h {
            for dx in 0..w {
                // Distance from the nearest corner centre, if in a corner box.
                let cx = if dx < r { Some(r - 1 - dx) } else if dx >= w - r { Some(dx - (w - r)) } else { None };
                let cy = if dy < r { Some(r - 1 - dy) } else if dy >= h - r { Some(dy - (h - r)) } else { None };
                if let (Some(cx), Some(cy)) = (cx, cy) {
                    if (cx * cx + cy * cy) as isize >= r2 { continue; }
                }
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Filled disc centred on `(cx, cy)`, clipped to the canvas.
    pub fn fill_circle(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r { continue; }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 {
                    self.set_pixel(x as usize, y as usize, color);
                }
            }
        }
    }

    // ── Compositing ───────────────────────────────────────────────────────

    /// Blend every non-transparent pixel of `layer` over this canvas.
    /// `alpha` is the layer's weight.
    pub fn composite(&mut self, layer: &Canvas, alpha: f32) {
        let w = self.width.min(layer.width);
        let h = self.height.min(layer.height);
        for y in 0..h {
            for x in 0..w {
                let top = layer.pixels[y * layer.width + x];
                if top == TRANSPARENT { continue; }
                let i = y * self.width + x;
                self.pixels[i] = blend(self.pixels[i], top, alpha);
            }
        }
    }

    /// Blend a solid `color` over a rectangle with weight `alpha`.
    pub fn shade_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32, alpha: f32) {
        for row in y..(y + h).min(self.height) {
            let base = row * self.width;
            for col in x..(x + w).min(self.width) {
                self.pixels[base + col] = blend(self.pixels[base + col], color, alpha);
            }
        }
    }

    // ── Text ──────────────────────────────────────────────────────────────

    /// Draw `text` with its top-left corner at `(x, y)`; each font pixel is
    /// a `scale × scale` block.
    pub fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += GLYPH_ADVANCE * scale;
        }
    }
}

pub const GLYPH_W:       usize = 3;
pub const GLYPH_H:       usize = 5;
pub const GLYPH_ADVANCE: usize = GLYPH_W + 1;

/// Pixel width of `text` at `scale`, without the trailing gap.
pub fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 { 0 } else { (n * GLYPH_ADVANCE - 1) * scale.max(1) }
}

pub fn text_height(scale: usize) -> usize { GLYPH_H * scale.max(1) }

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t).round() as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF00_0000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

// One byte per row, top to bottom; bit 2 is the leftmost column.  Letters
// are case-folded; anything unknown renders as a centre dot.
fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ';' => [0b000, 0b010, 0b000, 0b010, 0b100],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

//! Composes one displayed frame: camera image, translucent keyboard, text
//! panel with blinking cursor, fingertip marker and status line.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ status                                                     │
//! │  [Q][W][E][R][T][Y][U][I][O][P]                            │
//! │  [A][S][D][F][G][H][J][K][L][;]                            │
//! │  [Z][X][C][V][B][N][M][,][.][/]                            │
//! │  [     Space     ][Backspace][Enter]                       │
//! │                                                            │
//! │ ┌────────────────────────────────────────────────────────┐ │
//! │ │ last five lines of text|                               │ │
//! └─┴────────────────────────────────────────────────────────┴─┘
//! ```

use image::RgbImage;

use keyboard_core::{HandLandmarks, Key, KeyLabel, Layout, Session};

use crate::canvas::{rgb, text_height, text_width, Canvas, TRANSPARENT};

// ════════════════════════════════════════════════════════════════════════════
// Style
// ════════════════════════════════════════════════════════════════════════════

pub const KEY_COLOR:     u32 = rgb(64, 64, 64);
pub const FLASH_COLOR:   u32 = rgb(0, 255, 0);
pub const LABEL_COLOR:   u32 = rgb(255, 255, 255);
pub const PANEL_COLOR:   u32 = rgb(0, 0, 0);
pub const TEXT_COLOR:    u32 = rgb(255, 255, 255);
pub const TIP_COLOR:     u32 = rgb(255, 0, 255);
pub const STATUS_COLOR:  u32 = rgb(230, 230, 230);

const KEY_ALPHA:        f32   = 0.5;
const KEY_RADIUS:       usize = 20;
const PANEL_ALPHA:      f32   = 0.6;
const PANEL_LEFT:       usize = 50;
const PANEL_TOP:        usize = 600;
const PANEL_RIGHT:      usize = 1200;
const PANEL_BOTTOM:     usize = 720;
const PANEL_TEXT_X:     usize = 60;
const PANEL_BASELINE:   usize = PANEL_TOP + 30;
const PANEL_LINE_PITCH: usize = 22;
const PANEL_TEXT_SCALE: usize = 3;
const STATUS_SCALE:     usize = 2;

// ════════════════════════════════════════════════════════════════════════════
// Renderer
// ════════════════════════════════════════════════════════════════════════════

/// Owns the output canvas and the keyboard layer so neither is reallocated
/// per frame.
pub struct Renderer {
    canvas: Canvas,
    keys:   Canvas,
}

/// Everything a frame shows besides the session itself.
pub struct FrameInfo<'a> {
    pub hand:   Option<&'a HandLandmarks>,
    pub status: &'a str,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Renderer {
            canvas: Canvas::new(width, height, rgb(0, 0, 0)),
            keys:   Canvas::transparent(width, height),
        }
    }

    pub fn render(&mut self, frame: &RgbImage, session: &Session, info: &FrameInfo<'_>) -> &Canvas {
        self.canvas.clear(rgb(0, 0, 0));
        self.canvas.blit_rgb(frame);

        self.keys.clear(TRANSPARENT);
        draw_keyboard(&mut self.keys, session.layout(), session.flashed());
        self.canvas.composite(&self.keys, KEY_ALPHA);

        draw_text_panel(&mut self.canvas, session.visible_lines(), session.cursor_visible());

        if let Some(hand) = info.hand {
            draw_fingertips(&mut self.canvas, hand);
        }
        if !info.status.is_empty() {
            self.canvas.draw_text(info.status, PANEL_LEFT, 16, STATUS_SCALE, STATUS_COLOR);
        }
        &self.canvas
    }

    pub fn canvas(&self) -> &Canvas { &self.canvas }
}

// ════════════════════════════════════════════════════════════════════════════
// Pieces
// ════════════════════════════════════════════════════════════════════════════

/// Keys as rounded rectangles with centred labels, onto a transparent layer.
pub fn draw_keyboard(layer: &mut Canvas, layout: &Layout, flashed: Option<KeyLabel>) {
    for key in layout.keys() {
        let color = if flashed == Some(key.label) { FLASH_COLOR } else { KEY_COLOR };
        let (x, y, w, h) = (key.x as usize, key.y as usize, key.w as usize, key.h as usize);
        layer.fill_rounded_rect(x, y, w, h, KEY_RADIUS, color);
        draw_key_label(layer, key);
    }
}

fn draw_key_label(layer: &mut Canvas, key: &Key) {
    let text  = key.label.to_string();
    let scale = if text.chars().count() > 1 { 4 } else { 8 };
    let tw    = text_width(&text, scale);
    let th    = text_height(scale);
    let x = key.x as usize + (key.w as usize).saturating_sub(tw) / 2;
    let y = key.y as usize + (key.h as usize).saturating_sub(th) / 2;
    layer.draw_text(&text, x, y, scale, LABEL_COLOR);
}

/// Darkened panel with the given lines; a `|` follows the last one while the
/// cursor is visible.
pub fn draw_text_panel(canvas: &mut Canvas, lines: &[String], cursor_visible: bool) {
    let bottom = PANEL_BOTTOM.min(canvas.height());
    if bottom <= PANEL_TOP { return; }
    canvas.shade_rect(
        PANEL_LEFT, PANEL_TOP,
        PANEL_RIGHT - PANEL_LEFT, bottom - PANEL_TOP,
        PANEL_COLOR, PANEL_ALPHA,
    );

    let glyph_h = text_height(PANEL_TEXT_SCALE);
    for (i, line) in lines.iter().enumerate() {
        let top = PANEL_BASELINE - glyph_h + i * PANEL_LINE_PITCH;
        if cursor_visible && i + 1 == lines.len() {
            let with_cursor = format!("{}|", line);
            canvas.draw_text(&with_cursor, PANEL_TEXT_X, top, PANEL_TEXT_SCALE, TEXT_COLOR);
        } else {
            canvas.draw_text(line, PANEL_TEXT_X, top, PANEL_TEXT_SCALE, TEXT_COLOR);
        }
    }
}

/// Dots on the index and middle fingertips.
pub fn draw_fingertips(canvas: &mut Canvas, hand: &HandLandmarks) {
    for p in [hand.index_tip(), hand.point(keyboard_core::hand::MIDDLE_TIP)] {
        canvas.fill_circle(p.x as isize, p.y as isize, 8, TIP_COLOR);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use image::Rgb;
    use keyboard_core::KeyboardConfig;
    use keyboard_core::hand::{INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP};
    use crate::canvas::blend;

    const GREY: [u8; 3] = [200, 200, 200];

    fn backdrop() -> RgbImage {
        RgbImage::from_pixel(1280, 720, Rgb(GREY))
    }

    fn pinch_on(session: &Session, label: KeyLabel) -> HandLandmarks {
        let c = session.layout().find(label).unwrap().centre();
        let mut pts = vec![(640.0, 500.0); LANDMARK_COUNT];
        pts[INDEX_TIP]  = (c.x, c.y);
        pts[MIDDLE_TIP] = (c.x + 10.0, c.y);
        HandLandmarks::from_points(&pts).unwrap()
    }

    fn no_info() -> FrameInfo<'static> {
        FrameInfo { hand: None, status: "" }
    }

    #[test]
    fn keys_are_half_transparent() {
        let t0 = Instant::now();
        let session = Session::new(KeyboardConfig::default(), t0);
        let mut r = Renderer::new(1280, 720);
        let out = r.render(&backdrop(), &session, &no_info());

        let grey = rgb(GREY[0], GREY[1], GREY[2]);
        // Inside Q, away from its label: 50/50 mix of frame and key colour.
        assert_eq!(out.pixel(55, 90), Some(blend(grey, KEY_COLOR, 0.5)));
        // Gap between keys is untouched camera.
        assert_eq!(out.pixel(140, 90), Some(grey));
    }

    #[test]
    fn flashed_key_uses_highlight() {
        let t0 = Instant::now();
        let mut session = Session::new(KeyboardConfig::default(), t0);
        let hand = pinch_on(&session, KeyLabel::Char('W'));
        session.step(Some(&hand), t0).unwrap();

        let mut r = Renderer::new(1280, 720);
        let out = r.render(&backdrop(), &session, &no_info());
        let grey = rgb(GREY[0], GREY[1], GREY[2]);
        assert_eq!(out.pixel(155, 90), Some(blend(grey, FLASH_COLOR, 0.5)));
        assert_eq!(out.pixel(55, 90), Some(blend(grey, KEY_COLOR, 0.5)));

        session.step(None, t0 + Duration::from_millis(300));
        let out = r.render(&backdrop(), &session, &no_info());
        assert_eq!(out.pixel(155, 90), Some(blend(grey, KEY_COLOR, 0.5)));
    }

    #[test]
    fn panel_darkens_region() {
        let session = Session::new(KeyboardConfig::default(), Instant::now());
        let mut r = Renderer::new(1280, 720);
        let out = r.render(&backdrop(), &session, &no_info());
        let grey = rgb(GREY[0], GREY[1], GREY[2]);
        assert_eq!(out.pixel(1100, 700), Some(blend(grey, PANEL_COLOR, 0.6)));
        assert_eq!(out.pixel(1250, 700), Some(grey));
    }

    #[test]
    fn cursor_drawn_only_when_visible() {
        let mut c = Canvas::new(1280, 720, rgb(0, 0, 0));
        let lines = vec![String::new()];
        draw_text_panel(&mut c, &lines, true);
        // "|" is the middle column of the first glyph cell.
        let top = PANEL_BASELINE - text_height(PANEL_TEXT_SCALE);
        let x = PANEL_TEXT_X + PANEL_TEXT_SCALE;
        assert_eq!(c.pixel(x, top), Some(TEXT_COLOR));

        let mut c = Canvas::new(1280, 720, rgb(0, 0, 0));
        draw_text_panel(&mut c, &lines, false);
        assert_ne!(c.pixel(x, top), Some(TEXT_COLOR));
    }

    #[test]
    fn fingertip_marker_drawn() {
        let session = Session::new(KeyboardConfig::default(), Instant::now());
        let hand = pinch_on(&session, KeyLabel::Char('P'));
        let mut r = Renderer::new(1280, 720);
        let tip = hand.index_tip();
        let out = r.render(&backdrop(), &session, &FrameInfo { hand: Some(&hand), status: "SIM" });
        assert_eq!(out.pixel(tip.x as usize, tip.y as usize), Some(TIP_COLOR));
    }
}

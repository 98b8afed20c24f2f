//! The sprite sheet, painted in code at start-up. Every sprite the game
//! draws lives at a fixed region of this sheet (see [`crate::sprite::regions`]).
//! Texels are `None` where the sprite is transparent.

use crate::geometry::Rect;
use crate::pixels::Rgb;
use crate::sprite::regions::{self, SHEET_H, SHEET_W};

const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(222, 216, 149);
const DIRT_DARK: Rgb = Rgb(200, 190, 120);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const CLOUD: Rgb = Rgb(235, 250, 250);
const BUILDING: Rgb = Rgb(160, 210, 200);
const WINDOW: Rgb = Rgb(190, 235, 225);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);
const TITLE: Rgb = Rgb(250, 150, 40);
const PANEL: Rgb = Rgb(222, 216, 149);
const PANEL_EDGE: Rgb = Rgb(84, 56, 71);
const LABEL: Rgb = Rgb(230, 100, 60);
const BRONZE: Rgb = Rgb(205, 127, 50);
const SILVER: Rgb = Rgb(200, 200, 210);
const GOLD: Rgb = Rgb(240, 200, 40);
const PLATINUM: Rgb = Rgb(225, 240, 250);

pub struct SpriteSheet {
    w: usize,
    h: usize,
    px: Vec<Option<Rgb>>,
}

impl SpriteSheet {
    pub fn blank(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![None; w * h],
        }
    }

    pub fn paint() -> Self {
        let mut sheet = Self::blank(SHEET_W, SHEET_H);
        for (frame, region) in regions::BIRD.iter().enumerate() {
            // Wing up, level, down.
            paint_bird(&mut sheet, region, frame as i32 * 4 - 4);
        }
        paint_medal(&mut sheet, &regions::MEDAL_BRONZE, BRONZE);
        paint_medal(&mut sheet, &regions::MEDAL_SILVER, SILVER);
        paint_medal(&mut sheet, &regions::MEDAL_GOLD, GOLD);
        paint_medal(&mut sheet, &regions::MEDAL_PLATINUM, PLATINUM);
        paint_pipe(&mut sheet, &regions::PIPE_FLOOR, false);
        paint_pipe(&mut sheet, &regions::PIPE_SKY, true);
        paint_background(&mut sheet, &regions::BACKGROUND);
        paint_ground(&mut sheet, &regions::GROUND);
        paint_get_ready(&mut sheet, &regions::GET_READY);
        paint_game_over(&mut sheet, &regions::GAME_OVER);
        for d in 0..10 {
            let r = regions::digit(d);
            paint_digit(&mut sheet, r.x as i32, r.y as i32, d);
        }
        sheet
    }

    pub fn sample(&self, x: i32, y: i32) -> Option<Rgb> {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize]
        } else {
            None
        }
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = Some(c);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }
}

fn origin(r: &Rect) -> (i32, i32) {
    (r.x as i32, r.y as i32)
}

// ── Bird ────────────────────────────────────────────────────────────────────

fn paint_bird(sheet: &mut SpriteSheet, r: &Rect, wing_dy: i32) {
    let (x, y) = origin(r);

    // Body
    sheet.fill_rect(x + 4, y + 5, 22, 16, BIRD_Y);
    sheet.fill_rect(x + 6, y + 3, 18, 2, BIRD_Y);
    sheet.fill_rect(x + 6, y + 21, 16, 2, BIRD_Y);
    sheet.fill_rect(x + 6, y + 4, 16, 3, BIRD_HI);

    // Tail
    sheet.fill_rect(x, y + 10, 4, 6, BIRD_WING);

    // Wing
    sheet.fill_rect(x + 3, y + 11 + wing_dy, 11, 6, BIRD_WING);
    sheet.fill_rect(x + 3, y + 11 + wing_dy, 11, 1, BIRD_HI);

    // Eye
    sheet.fill_rect(x + 18, y + 4, 8, 8, BIRD_EYE);
    sheet.fill_rect(x + 22, y + 6, 3, 4, BIRD_PUPIL);

    // Beak
    sheet.fill_rect(x + 22, y + 13, 11, 4, BIRD_BEAK_HI);
    sheet.fill_rect(x + 22, y + 17, 10, 3, BIRD_BEAK);
}

// ── Pipes ───────────────────────────────────────────────────────────────────

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

/// `cap_at_bottom` for the sky pipe, whose open end faces down.
fn paint_pipe(sheet: &mut SpriteSheet, r: &Rect, cap_at_bottom: bool) {
    const CAP_H: i32 = 24;
    const INSET: i32 = 3;
    let (x, y) = origin(r);
    let w = r.width as i32;
    let h = r.height as i32;
    let (cap_y, body_y, body_h) = if cap_at_bottom {
        (y + h - CAP_H, y, h - CAP_H)
    } else {
        (y, y + CAP_H, h - CAP_H)
    };

    let body_w = w - INSET * 2;
    for dx in 0..body_w {
        let c = pipe_shade(dx, body_w);
        for dy in 0..body_h {
            sheet.set(x + INSET + dx, body_y + dy, c);
        }
    }
    for dx in 0..w {
        let c = pipe_shade(dx, w);
        for dy in 0..CAP_H {
            sheet.set(x + dx, cap_y + dy, c);
        }
        sheet.set(x + dx, cap_y, CAP_DARK);
        sheet.set(x + dx, cap_y + CAP_H - 1, CAP_DARK);
    }
}

// ── Scenery ─────────────────────────────────────────────────────────────────

fn paint_background(sheet: &mut SpriteSheet, r: &Rect) {
    let (x0, y0) = origin(r);
    let w = r.width as i32;
    let h = r.height as i32;

    // Clouds band
    for x in 0..w {
        let fx = x as f64 * 0.09;
        let top = 40 + (fx.sin() * 8.0 + (fx * 2.1).sin() * 5.0) as i32;
        for y in top..h {
            sheet.set(x0 + x, y0 + y, CLOUD);
        }
    }
    // Buildings
    let mut bx = 0;
    while bx < w {
        let bw = 14 + (bx * 7) % 11;
        let bh = 40 + (bx * 13) % 45;
        let top = h - bh;
        sheet.fill_rect(x0 + bx, y0 + top, bw - 2, bh, BUILDING);
        let mut wy = top + 4;
        while wy < h - 6 {
            let mut wx = 2;
            while wx < bw - 5 {
                sheet.fill_rect(x0 + bx + wx, y0 + wy, 2, 3, WINDOW);
                wx += 5;
            }
            wy += 7;
        }
        bx += bw;
    }
    // Far hills
    for x in 0..w {
        let fx = x as f64 * 0.04;
        let hh = (fx.sin() * 6.0 + (fx * 1.7).sin() * 3.0) as i32 + 22;
        for y in (h - hh)..h {
            sheet.set(x0 + x, y0 + y, HILL_FAR);
        }
    }
    // Near hills
    for x in 0..w {
        let fx = x as f64 * 0.06;
        let hh = (fx.sin() * 4.0 + (fx * 2.3).sin() * 2.0) as i32 + 10;
        for y in (h - hh)..h {
            sheet.set(x0 + x, y0 + y, HILL_NEAR);
        }
    }
}

fn paint_ground(sheet: &mut SpriteSheet, r: &Rect) {
    let (x0, y0) = origin(r);
    let w = r.width as i32;
    let h = r.height as i32;
    for x in 0..w {
        let alt = (x / 6) % 2 == 0;
        for y in 0..10 {
            sheet.set(x0 + x, y0 + y, if alt { GRASS } else { GRASS_LIGHT });
        }
        sheet.set(x0 + x, y0 + 10, CAP_DARK);
    }
    for y in 11..h {
        for x in 0..w {
            // Period divides the tile width so neighbouring tiles line up.
            let stripe = (x + y * 2) % 16 < 8;
            sheet.set(x0 + x, y0 + y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
}

// ── Text ────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
fn letter(c: char) -> Option<[u8; 15]> {
    Some(match c {
        'A' => [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'B' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0],
        'C' => [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1],
        'D' => [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0],
        'E' => [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1],
        'G' => [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1],
        'L' => [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1],
        'M' => [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1],
        'O' => [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0],
        'P' => [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0],
        'R' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'S' => [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0],
        'T' => [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0],
        'V' => [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0],
        'Y' => [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0],
        _ => return None,
    })
}

fn paint_glyph(sheet: &mut SpriteSheet, x: i32, y: i32, glyph: &[u8; 15], block: i32, fg: Rgb) {
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32 * block;
                let py = y + row as i32 * block;
                sheet.fill_rect(px + 1, py + 1, block, block, SHADOW);
                sheet.fill_rect(px, py, block, block, fg);
            }
        }
    }
}

/// Width in sheet pixels of `text` drawn with `block`-sized pixels.
fn text_width(text: &str, block: i32) -> i32 {
    text.chars().count() as i32 * 4 * block - block
}

fn paint_text(sheet: &mut SpriteSheet, cx: i32, y: i32, text: &str, block: i32, fg: Rgb) {
    let start_x = cx - text_width(text, block) / 2;
    for (i, ch) in text.chars().enumerate() {
        if let Some(glyph) = letter(ch) {
            paint_glyph(sheet, start_x + i as i32 * 4 * block, y, &glyph, block, fg);
        }
    }
}

fn paint_digit(sheet: &mut SpriteSheet, x: i32, y: i32, d: u8) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32 * 3;
                let py = y + row as i32 * 3;
                sheet.fill_rect(px + 2, py + 2, 3, 3, SHADOW);
            }
        }
    }
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                sheet.fill_rect(x + col as i32 * 3, y + row as i32 * 3, 3, 3, WHITE);
            }
        }
    }
}

// ── Panels ──────────────────────────────────────────────────────────────────

fn paint_get_ready(sheet: &mut SpriteSheet, r: &Rect) {
    let (x, y) = origin(r);
    let cx = x + r.width as i32 / 2;
    paint_text(sheet, cx, y + 6, "GET READY", 4, TITLE);

    // Tap hint: a ghost bird with an arrow above it.
    paint_bird(sheet, &Rect::new((cx - 16) as f32, (y + 70) as f32, 33.0, 24.0), 0);
    for i in 0..8 {
        sheet.fill_rect(cx - i, y + 50 + i, i * 2 + 1, 1, WHITE);
    }
    sheet.fill_rect(cx - 2, y + 58, 5, 8, WHITE);

    paint_text(sheet, cx, y + 110, "TAP", 4, WHITE);
}

fn paint_game_over(sheet: &mut SpriteSheet, r: &Rect) {
    let (x, y) = origin(r);
    let w = r.width as i32;
    let h = r.height as i32;
    let cx = x + w / 2;
    paint_text(sheet, cx, y + 4, "GAME OVER", 4, TITLE);

    let top = y + 60;
    let ph = h - 60;
    sheet.fill_rect(x, top, w, ph, PANEL_EDGE);
    sheet.fill_rect(x + 3, top + 3, w - 6, ph - 6, PANEL);

    paint_text(sheet, x + 48, top + 12, "MEDAL", 2, LABEL);
    paint_text(sheet, x + 180, top + 12, "SCORE", 2, LABEL);
    paint_text(sheet, x + 180, top + 64, "BEST", 2, LABEL);

    // Empty medal socket.
    paint_disc(sheet, x + 48, top + 62, 21, Rgb::lerp(PANEL, SHADOW, 48));
}

fn paint_disc(sheet: &mut SpriteSheet, cx: i32, cy: i32, radius: i32, c: Rgb) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                sheet.set(cx + dx, cy + dy, c);
            }
        }
    }
}

fn paint_medal(sheet: &mut SpriteSheet, r: &Rect, c: Rgb) {
    let (x, y) = origin(r);
    let radius = r.width as i32 / 2 - 1;
    let (cx, cy) = (x + r.width as i32 / 2, y + r.height as i32 / 2);
    paint_disc(sheet, cx, cy, radius, Rgb::lerp(c, SHADOW, 64));
    paint_disc(sheet, cx, cy, radius - 3, c);
    paint_disc(sheet, cx - 6, cy - 6, 4, Rgb::lerp(c, WHITE, 160));
}

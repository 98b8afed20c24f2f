// ── Sprite composition ──────────────────────────────────────────────────────
//
// A drawable entity is just a list of parts: a region of the sprite sheet and
// where it lands on the canvas.

use crate::geometry::Rect;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub src: Rect,
    pub dst: Rect,
}

impl Part {
    /// Places `src` unscaled with its top-left corner at (x, y).
    pub fn at(src: Rect, x: f32, y: f32) -> Self {
        Part {
            src,
            dst: Rect::new(x, y, src.width, src.height),
        }
    }
}

pub fn draw_parts(surface: &mut dyn Surface, parts: &[Part]) {
    for p in parts {
        surface.draw(p.src, p.dst, 0.0);
    }
}

/// Sheet coordinates of every sprite.
pub mod regions {
    use crate::geometry::Rect;

    pub const SHEET_W: usize = 665;
    pub const SHEET_H: usize = 722;

    pub const BIRD: [Rect; 3] = [
        Rect::new(0.0, 0.0, 33.0, 24.0),
        Rect::new(0.0, 26.0, 33.0, 24.0),
        Rect::new(0.0, 52.0, 33.0, 24.0),
    ];

    pub const MEDAL_BRONZE: Rect = Rect::new(48.0, 124.0, 44.0, 44.0);
    pub const MEDAL_SILVER: Rect = Rect::new(48.0, 78.0, 44.0, 44.0);
    pub const MEDAL_GOLD: Rect = Rect::new(0.0, 124.0, 44.0, 44.0);
    pub const MEDAL_PLATINUM: Rect = Rect::new(0.0, 78.0, 44.0, 44.0);

    pub const GET_READY: Rect = Rect::new(134.0, 0.0, 174.0, 152.0);
    pub const GAME_OVER: Rect = Rect::new(134.0, 153.0, 226.0, 200.0);

    pub const PIPE_FLOOR: Rect = Rect::new(0.0, 169.0, 52.0, 400.0);
    pub const PIPE_SKY: Rect = Rect::new(52.0, 169.0, 52.0, 400.0);

    pub const BACKGROUND: Rect = Rect::new(390.0, 0.0, 275.0, 204.0);
    pub const SKY_COLOR: crate::pixels::Rgb = crate::pixels::Rgb(0x70, 0xc5, 0xce);

    pub const GROUND: Rect = Rect::new(0.0, 610.0, 224.0, 112.0);

    pub const DIGIT_W: f32 = 12.0;
    pub const DIGIT_H: f32 = 18.0;
    const DIGITS_X: f32 = 240.0;
    const DIGITS_Y: f32 = 610.0;

    pub fn digit(d: u8) -> Rect {
        Rect::new(
            DIGITS_X + d as f32 * (DIGIT_W + 2.0),
            DIGITS_Y,
            DIGIT_W,
            DIGIT_H,
        )
    }
}

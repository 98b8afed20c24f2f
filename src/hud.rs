use crate::geometry::Rect;
use crate::medal::Medal;
use crate::sprite::{Part, draw_parts, regions};
use crate::surface::Surface;

const DIGIT_ADVANCE: f32 = regions::DIGIT_W;

/// Digit parts for `n`, centred on `cx`.
pub fn number_parts(n: u32, cx: f32, y: f32) -> Vec<Part> {
    let s = n.to_string();
    let total_w = s.len() as f32 * DIGIT_ADVANCE;
    let start_x = cx - total_w / 2.0;
    s.bytes()
        .enumerate()
        .map(|(i, ch)| Part::at(regions::digit(ch - b'0'), start_x + i as f32 * DIGIT_ADVANCE, y))
        .collect()
}

pub fn draw_score(surface: &mut dyn Surface, canvas_w: f32, score: u32) {
    draw_parts(surface, &number_parts(score, canvas_w / 2.0, 20.0));
}

pub fn get_ready_part(canvas_w: f32) -> Part {
    Part::at(
        regions::GET_READY,
        canvas_w / 2.0 - regions::GET_READY.width / 2.0,
        50.0,
    )
}

/// Board origin plus the slots drawn over it.
pub struct Scoreboard {
    pub board: Rect,
}

impl Scoreboard {
    pub fn new(canvas_w: f32) -> Self {
        let r = regions::GAME_OVER;
        Self {
            board: Rect::new(canvas_w / 2.0 - r.width / 2.0, 50.0, r.width, r.height),
        }
    }

    pub fn parts(&self, score: u32, best: u32, medal: Medal) -> Vec<Part> {
        let b = &self.board;
        let mut parts = vec![Part {
            src: regions::GAME_OVER,
            dst: *b,
        }];
        if let Some(src) = medal.sprite() {
            parts.push(Part::at(src, b.x + 26.0, b.y + 100.0));
        }
        parts.extend(number_parts(score, b.x + 180.0, b.y + 92.0));
        parts.extend(number_parts(best, b.x + 180.0, b.y + 144.0));
        parts
    }

    pub fn draw(&self, surface: &mut dyn Surface, score: u32, best: u32, medal: Medal) {
        draw_parts(surface, &self.parts(score, best, medal));
    }
}

// ── Rectangles and overlap tests ────────────────────────────────────────────

/// Top-left anchored axis-aligned box in logical canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.x, self.y),
            (self.right(), self.y),
            (self.x, self.bottom()),
            (self.right(), self.bottom()),
        ]
    }

    /// Edges count as inside.
    pub fn contains_point(&self, (px, py): (f32, f32)) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Corner containment, checked from both sides so the result is symmetric.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.corners().iter().any(|&c| b.contains_point(c))
        || b.corners().iter().any(|&c| a.contains_point(c))
}

/// True only on the step where `moving` goes from clear of `other` to touching it.
pub fn collision_started(before: &Rect, after: &Rect, other: &Rect) -> bool {
    !overlaps(before, other) && overlaps(after, other)
}

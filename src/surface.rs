use crate::geometry::Rect;
use crate::pixels::{LETTERBOX, PixelBuf, Rgb};
use crate::sheet::SpriteSheet;
use std::io::{self, Write};

/// Where the game draws. Coordinates are logical canvas pixels; `src` is a
/// region of the sprite sheet.
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn draw(&mut self, src: Rect, dst: Rect, rotation_deg: f32);
}

// ── Terminal surface ────────────────────────────────────────────────────────

/// Letterboxes the logical canvas into the terminal's half-block pixel grid,
/// sampling the sprite sheet nearest-neighbour.
pub struct TermSurface {
    buf: PixelBuf,
    sheet: SpriteSheet,
    canvas_w: f32,
    canvas_h: f32,
    scale: f32,
    off_x: f32,
    off_y: f32,
}

impl TermSurface {
    pub fn new(pw: usize, ph: usize, sheet: SpriteSheet, canvas_w: f32, canvas_h: f32) -> Self {
        let mut s = TermSurface {
            buf: PixelBuf::new(pw, ph),
            sheet,
            canvas_w,
            canvas_h,
            scale: 1.0,
            off_x: 0.0,
            off_y: 0.0,
        };
        s.layout();
        s
    }

    pub fn resize(&mut self, pw: usize, ph: usize) {
        self.buf.resize(pw, ph);
        self.layout();
    }

    fn layout(&mut self) {
        let sx = self.buf.width() as f32 / self.canvas_w;
        let sy = self.buf.height() as f32 / self.canvas_h;
        self.scale = sx.min(sy);
        self.off_x = ((self.buf.width() as f32 - self.canvas_w * self.scale) / 2.0).floor();
        self.off_y = ((self.buf.height() as f32 - self.canvas_h * self.scale) / 2.0).floor();
    }

    /// Screen-space pixel span covered by the canvas, clipped to the buffer.
    fn viewport(&self) -> (i32, i32, i32, i32) {
        let x0 = self.off_x as i32;
        let y0 = self.off_y as i32;
        let x1 = ((self.off_x + self.canvas_w * self.scale).ceil() as i32).min(self.buf.width() as i32);
        let y1 = ((self.off_y + self.canvas_h * self.scale).ceil() as i32).min(self.buf.height() as i32);
        (x0.max(0), y0.max(0), x1, y1)
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.buf.get(x, y)
    }
}

impl Surface for TermSurface {
    fn clear(&mut self, color: Rgb) {
        self.buf.fill(LETTERBOX);
        let (x0, y0, x1, y1) = self.viewport();
        self.buf.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
    }

    fn draw(&mut self, src: Rect, dst: Rect, rotation_deg: f32) {
        if dst.width <= 0.0 || dst.height <= 0.0 {
            return;
        }
        let (cx, cy) = dst.center();
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        // Half-diagonal bounds any rotation of the destination box.
        let reach = (dst.width * dst.width + dst.height * dst.height).sqrt() / 2.0;
        let (vx0, vy0, vx1, vy1) = self.viewport();
        let sx0 = (((cx - reach) * self.scale + self.off_x).floor() as i32).max(vx0);
        let sy0 = (((cy - reach) * self.scale + self.off_y).floor() as i32).max(vy0);
        let sx1 = (((cx + reach) * self.scale + self.off_x).ceil() as i32).min(vx1);
        let sy1 = (((cy + reach) * self.scale + self.off_y).ceil() as i32).min(vy1);

        for sy in sy0..sy1 {
            for sx in sx0..sx1 {
                let lx = (sx as f32 + 0.5 - self.off_x) / self.scale - cx;
                let ly = (sy as f32 + 0.5 - self.off_y) / self.scale - cy;
                // Undo the rotation to land in the unrotated destination box.
                let ux = lx * cos + ly * sin + dst.width / 2.0;
                let uy = -lx * sin + ly * cos + dst.height / 2.0;
                if ux < 0.0 || uy < 0.0 || ux >= dst.width || uy >= dst.height {
                    continue;
                }
                let tx = src.x + ux / dst.width * src.width;
                let ty = src.y + uy / dst.height * src.height;
                if let Some(c) = self.sheet.sample(tx.floor() as i32, ty.floor() as i32) {
                    self.buf.set(sx, sy, c);
                }
            }
        }
    }
}

// ── Test surface ────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub src: Rect,
    pub dst: Rect,
    pub rotation_deg: f32,
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingSurface {
    pub cleared: Vec<Rgb>,
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn drew(&self, src: Rect) -> bool {
        self.calls.iter().any(|c| c.src == src)
    }

    pub fn calls_of(&self, src: Rect) -> Vec<DrawCall> {
        self.calls.iter().copied().filter(|c| c.src == src).collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgb) {
        self.cleared.push(color);
    }

    fn draw(&mut self, src: Rect, dst: Rect, rotation_deg: f32) {
        self.calls.push(DrawCall {
            src,
            dst,
            rotation_deg,
        });
    }
}

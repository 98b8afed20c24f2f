use crate::config::{GameCfg, sections};
use crate::geometry::Rect;
use crate::sprite::{Part, draw_parts, regions};
use crate::surface::Surface;

/// Ground tiles sliding left. The offset wraps every half tile, and enough
/// tiles are laid to cover the canvas at any offset.
#[derive(Debug, Clone)]
pub struct Ground {
    pub x: f32,
    pub y: f32,
    width: f32,
    speed: f32,
}

impl Ground {
    pub fn new(canvas: &sections::Canvas, cfg: &sections::Ground) -> Self {
        Self {
            x: 0.0,
            y: canvas.height - regions::GROUND.height,
            width: canvas.width,
            speed: cfg.speed,
        }
    }

    fn repeat_every() -> f32 {
        regions::GROUND.width / 2.0
    }

    pub fn update(&mut self) {
        self.x = (self.x - self.speed) % Self::repeat_every();
    }

    /// Collision box spanning the full canvas width.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.y, self.width, regions::GROUND.height)
    }

    pub fn parts(&self) -> Vec<Part> {
        let tile_w = regions::GROUND.width;
        let tiles = tiles_to_cover(self.width + Self::repeat_every(), tile_w);
        (0..tiles)
            .map(|i| Part::at(regions::GROUND, self.x + i as f32 * tile_w, self.y))
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_parts(surface, &self.parts());
    }
}

fn tiles_to_cover(span: f32, tile_w: f32) -> usize {
    (span / tile_w).ceil().max(1.0) as usize
}

/// Sky fill plus static skyline tiles resting on the ground.
#[derive(Debug, Clone)]
pub struct Background {
    y: f32,
    tiles: usize,
}

impl Background {
    pub fn new(cfg: &GameCfg) -> Self {
        Self {
            y: cfg.canvas.height - regions::GROUND.height - regions::BACKGROUND.height,
            tiles: tiles_to_cover(cfg.canvas.width, regions::BACKGROUND.width),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(regions::SKY_COLOR);
        let parts: Vec<Part> = (0..self.tiles)
            .map(|i| Part::at(regions::BACKGROUND, i as f32 * regions::BACKGROUND.width, self.y))
            .collect();
        draw_parts(surface, &parts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Ground {
        let cfg = GameCfg::default();
        Ground::new(&cfg.canvas, &cfg.ground)
    }

    #[test]
    fn test_ground_sits_on_canvas_bottom() {
        let g = ground();
        assert_eq!(g.y, 368.0);
        assert_eq!(g.rect().bottom(), 480.0);
    }

    #[test]
    fn test_ground_wraps() {
        let mut g = ground();
        for _ in 0..112 {
            g.update();
        }
        assert_eq!(g.x, 0.0);
        g.update();
        assert_eq!(g.x, -1.0);
    }

    #[test]
    fn test_ground_tiles_cover_canvas() {
        let mut g = ground();
        for _ in 0..500 {
            g.update();
            let parts = g.parts();
            assert_eq!(parts.len(), 2);
            let (a, b) = (parts[0], parts[1]);
            assert!(a.dst.x <= 0.0);
            assert!(b.dst.right() >= 320.0);
            assert_eq!(a.dst.right(), b.dst.x);
        }
    }

    #[test]
    fn test_wide_canvas_gets_more_tiles() {
        let mut cfg = GameCfg::default();
        cfg.canvas.width = 1000.0;
        let mut g = Ground::new(&cfg.canvas, &cfg.ground);
        for _ in 0..300 {
            g.update();
            let parts = g.parts();
            assert!(parts[0].dst.x <= 0.0);
            assert!(parts.last().unwrap().dst.right() >= 1000.0);
        }

        use crate::surface::RecordingSurface;
        let mut s = RecordingSurface::default();
        Background::new(&cfg).draw(&mut s);
        let tiles = s.calls_of(regions::BACKGROUND);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.last().unwrap().dst.right() >= 1000.0);
    }

    #[test]
    fn test_background_fills_sky() {
        use crate::surface::RecordingSurface;
        let bg = Background::new(&GameCfg::default());
        let mut s = RecordingSurface::default();
        bg.draw(&mut s);
        assert_eq!(s.cleared, vec![regions::SKY_COLOR]);
        let tiles = s.calls_of(regions::BACKGROUND);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].dst.bottom(), 368.0);
    }
}

use log::trace;
use rand::Rng;

use crate::config::sections;
use crate::geometry::{Rect, collision_started, overlaps};
use crate::sprite::{Part, draw_parts, regions};
use crate::surface::Surface;

pub const PIPE_W: f32 = 52.0;
pub const PIPE_H: f32 = 400.0;

/// A sky pipe hanging from `y` and a floor pipe starting `gap` below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    pub x: f32,
    pub y: f32,
    pub gap: f32,
}

impl PipePair {
    pub fn sky(&self) -> Rect {
        Rect::new(self.x, self.y, PIPE_W, PIPE_H)
    }

    pub fn floor(&self) -> Rect {
        Rect::new(self.x, self.y + PIPE_H + self.gap, PIPE_W, PIPE_H)
    }

    pub fn off_screen(&self) -> bool {
        self.x + PIPE_W < 0.0
    }

    pub fn hits(&self, bird: &Rect) -> bool {
        overlaps(bird, &self.sky()) || overlaps(bird, &self.floor())
    }

    /// Moving the bird from `from` to `to` would start touching this pair.
    pub fn blocks(&self, from: &Rect, to: &Rect) -> bool {
        collision_started(from, to, &self.sky()) || collision_started(from, to, &self.floor())
    }

    pub fn parts(&self) -> [Part; 2] {
        [
            Part {
                src: regions::PIPE_SKY,
                dst: self.sky(),
            },
            Part {
                src: regions::PIPE_FLOOR,
                dst: self.floor(),
            },
        ]
    }
}

/// Pipe pairs in spawn order.
#[derive(Debug, Clone)]
pub struct Pipes {
    pub pairs: Vec<PipePair>,
    cfg: sections::Pipes,
    spawn_x: f32,
}

impl Pipes {
    pub fn new(cfg: &sections::Pipes, canvas_width: f32) -> Self {
        Self {
            pairs: Vec::new(),
            cfg: *cfg,
            spawn_x: canvas_width,
        }
    }

    /// Gap for pairs spawned at difficulty `level`.
    pub fn gap_for(&self, level: u32) -> f32 {
        (self.cfg.gap - level as f32 * self.cfg.gap_step).max(self.cfg.min_gap)
    }

    pub fn spawn<R: Rng>(&mut self, level: u32, rng: &mut R) {
        let y = rng.gen_range(self.cfg.offset_min..self.cfg.offset_max);
        let pair = PipePair {
            x: self.spawn_x,
            y,
            gap: self.gap_for(level),
        };
        trace!("Spawned {pair:?}");
        self.pairs.push(pair);
    }

    /// One frame: maybe spawn, slide everything left, drop what left the screen.
    pub fn update<R: Rng>(&mut self, frame: u64, level: u32, rng: &mut R) {
        if frame % self.cfg.spawn_every == 0 {
            self.spawn(level, rng);
        }
        for p in &mut self.pairs {
            p.x -= self.cfg.speed;
        }
        self.cull();
    }

    pub fn cull(&mut self) {
        let before = self.pairs.len();
        self.pairs.retain(|p| !p.off_screen());
        if self.pairs.len() != before {
            trace!("Culled {} pipe pair(s)", before - self.pairs.len());
        }
    }

    pub fn hits(&self, bird: &Rect) -> bool {
        self.pairs.iter().any(|p| p.hits(bird))
    }

    pub fn blocks(&self, from: &Rect, to: &Rect) -> bool {
        self.pairs.iter().any(|p| p.blocks(from, to))
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.pairs {
            draw_parts(surface, &p.parts());
        }
    }
}

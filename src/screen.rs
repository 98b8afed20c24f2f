//! The three screens of the game and the per-frame work each one does.
//! Transitions between them live in [`crate::game::Game`].

use log::debug;
use rand::Rng;
use std::time::Duration;

use crate::audio::{AudioSink, Cue};
use crate::bird::Bird;
use crate::config::GameCfg;
use crate::geometry::overlaps;
use crate::medal::Medal;
use crate::pipes::Pipes;
use crate::scenery::{Background, Ground};
use crate::timer::IntervalTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Ready,
    Playing,
    Dead,
}

pub enum Screen {
    Ready { bird: Bird },
    Playing(Session),
    Dead(Wreck),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Ready { .. } => ScreenKind::Ready,
            Screen::Playing(_) => ScreenKind::Playing,
            Screen::Dead(_) => ScreenKind::Dead,
        }
    }

    pub fn bird(&self) -> &Bird {
        match self {
            Screen::Ready { bird } => bird,
            Screen::Playing(s) => &s.bird,
            Screen::Dead(w) => &w.bird,
        }
    }
}

/// State that outlives any single screen.
pub struct Context<R> {
    pub cfg: GameCfg,
    pub rng: R,
    pub best: u32,
    pub frame: u64,
    pub ground: Ground,
    pub background: Background,
}

impl<R: Rng> Context<R> {
    pub fn new(cfg: GameCfg, rng: R) -> Self {
        Self {
            ground: Ground::new(&cfg.canvas, &cfg.ground),
            background: Background::new(&cfg),
            cfg,
            rng,
            best: 0,
            frame: 0,
        }
    }
}

// ── Playing ─────────────────────────────────────────────────────────────────

pub enum Step {
    Continue,
    Crashed,
}

/// One run from first flap to crash. Dropping it cancels the score timer.
pub struct Session {
    pub bird: Bird,
    pub pipes: Pipes,
    pub score: u32,
    pub level: u32,
    score_timer: IntervalTimer,
}

impl Session {
    pub fn start<R>(ctx: &Context<R>, audio: &mut dyn AudioSink) -> Self {
        let mut bird = Bird::new(&ctx.cfg.bird);
        bird.jump(audio);
        Self {
            bird,
            pipes: Pipes::new(&ctx.cfg.pipes, ctx.cfg.canvas.width),
            score: 0,
            level: 0,
            score_timer: IntervalTimer::new(Duration::from_millis(ctx.cfg.scoring.interval_ms)),
        }
    }

    pub fn update<R: Rng>(
        &mut self,
        ctx: &mut Context<R>,
        dt: Duration,
        audio: &mut dyn AudioSink,
    ) -> Step {
        ctx.ground.update();
        self.pipes.update(ctx.frame, self.level, &mut ctx.rng);
        self.bird.animate(ctx.frame);

        let pipes = &self.pipes;
        let moved = self
            .bird
            .update(audio, |from, to| !pipes.blocks(from, to));

        let body = self.bird.rect();
        // Leaving the top of the canvas counts as a crash.
        let above_canvas = body.y < 0.0;
        if !moved
            || above_canvas
            || overlaps(&body, &ctx.ground.rect())
            || self.pipes.hits(&body)
        {
            return Step::Crashed;
        }

        for _ in 0..self.score_timer.advance(dt) {
            self.point(&ctx.cfg, audio);
        }
        Step::Continue
    }

    fn point(&mut self, cfg: &GameCfg, audio: &mut dyn AudioSink) {
        self.score += 1;
        audio.play(Cue::Score);
        if self.score % cfg.scoring.level_every == 0 {
            self.level += 1;
            let gravity = cfg.bird.gravity + self.level as f32 * cfg.scoring.gravity_step;
            self.bird.set_gravity(gravity);
            debug!(
                "Difficulty level {} (gravity {:.3}, jump {:.3}, gap {})",
                self.level,
                self.bird.gravity,
                self.bird.jump,
                self.pipes.gap_for(self.level)
            );
        }
    }
}

// ── Dead ────────────────────────────────────────────────────────────────────

/// What is left after a crash: the falling bird, the frozen pipes and the result.
pub struct Wreck {
    pub bird: Bird,
    pub pipes: Pipes,
    pub score: u32,
    pub best: u32,
    pub medal: Medal,
    pub landed: bool,
    cooldown: Duration,
}

impl Wreck {
    pub fn new(session: Session, best: u32, medal: Medal, cooldown: Duration) -> Self {
        let Session {
            bird, pipes, score, ..
        } = session;
        Self {
            bird,
            pipes,
            score,
            best,
            medal,
            landed: false,
            cooldown,
        }
    }

    pub fn update<R>(&mut self, ctx: &Context<R>, dt: Duration) {
        self.cooldown = self.cooldown.saturating_sub(dt);
        // Keeps turning after touchdown until the nose points down.
        self.landed = self
            .bird
            .tumble(ctx.ground.y, ctx.cfg.dead.rotation_speed);
    }

    pub fn accepts_input(&self) -> bool {
        self.cooldown.is_zero()
    }
}

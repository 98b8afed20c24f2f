use log::{debug, info, warn};
use rand::Rng;
use std::time::Duration;

use crate::audio::{AudioSink, Cue};
use crate::bird::Bird;
use crate::config::GameCfg;
use crate::hud::{self, Scoreboard};
use crate::medal::Medal;
use crate::screen::{Context, Screen, ScreenKind, Session, Step, Wreck};
use crate::sprite::draw_parts;
use crate::surface::Surface;

/// The whole game: shared context plus the one active screen.
pub struct Game<R> {
    ctx: Context<R>,
    screen: Screen,
}

impl<R: Rng> Game<R> {
    pub fn new(cfg: GameCfg, rng: R) -> Self {
        let screen = Screen::Ready {
            bird: Bird::new(&cfg.bird),
        };
        info!("Game ready");
        Self {
            ctx: Context::new(cfg, rng),
            screen,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn best(&self) -> u32 {
        self.ctx.best
    }

    pub fn cfg(&self) -> &GameCfg {
        &self.ctx.cfg
    }

    /// Click or jump key.
    pub fn primary_action(&mut self, audio: &mut dyn AudioSink) {
        let next = match &mut self.screen {
            Screen::Ready { .. } => Some(ScreenKind::Playing),
            Screen::Playing(session) => {
                session.bird.jump(audio);
                None
            }
            Screen::Dead(wreck) if wreck.accepts_input() => Some(ScreenKind::Ready),
            Screen::Dead(_) => {
                debug!("Input ignored during cooldown");
                None
            }
        };
        if let Some(to) = next {
            self.switch(to, audio);
        }
    }

    /// Advances the simulation by one frame lasting `dt`.
    pub fn tick(&mut self, dt: Duration, audio: &mut dyn AudioSink) {
        self.ctx.frame += 1;
        let frame = self.ctx.frame;
        let crashed = match &mut self.screen {
            Screen::Ready { bird } => {
                self.ctx.ground.update();
                bird.animate(frame);
                bird.hover(frame);
                false
            }
            Screen::Playing(session) => {
                matches!(session.update(&mut self.ctx, dt, audio), Step::Crashed)
            }
            Screen::Dead(wreck) => {
                wreck.update(&self.ctx, dt);
                false
            }
        };
        if crashed {
            self.switch(ScreenKind::Dead, audio);
        }
    }

    /// Leaves the current screen and enters `to`, running both hooks.
    fn switch(&mut self, to: ScreenKind, audio: &mut dyn AudioSink) {
        let placeholder = Screen::Ready {
            bird: Bird::new(&self.ctx.cfg.bird),
        };
        let from = std::mem::replace(&mut self.screen, placeholder);
        info!("Screen {:?} -> {:?}", from.kind(), to);

        self.screen = match (from, to) {
            (_, ScreenKind::Ready) => Screen::Ready {
                bird: Bird::new(&self.ctx.cfg.bird),
            },
            (_, ScreenKind::Playing) => {
                info!("Session started (best {})", self.ctx.best);
                Screen::Playing(Session::start(&self.ctx, audio))
            }
            (Screen::Playing(session), ScreenKind::Dead) => {
                audio.play(Cue::Hit);
                let previous_best = self.ctx.best;
                let medal = Medal::select(session.score, previous_best, &self.ctx.cfg.medals);
                self.ctx.best = previous_best.max(session.score);
                info!(
                    "Session over: score {}, medal {:?}, best {}; score timer cancelled",
                    session.score, medal, self.ctx.best
                );
                let cooldown = Duration::from_millis(self.ctx.cfg.dead.cooldown_ms);
                Screen::Dead(Wreck::new(session, self.ctx.best, medal, cooldown))
            }
            (other, ScreenKind::Dead) => {
                warn!("No crash outside of play ({:?})", other.kind());
                other
            }
        };
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let canvas_w = self.ctx.cfg.canvas.width;
        self.ctx.background.draw(surface);
        match &self.screen {
            Screen::Playing(session) => session.pipes.draw(surface),
            Screen::Dead(wreck) => wreck.pipes.draw(surface),
            Screen::Ready { .. } => {}
        }
        self.ctx.ground.draw(surface);
        self.screen.bird().draw(surface);

        match &self.screen {
            Screen::Ready { .. } => draw_parts(surface, &[hud::get_ready_part(canvas_w)]),
            Screen::Playing(session) => hud::draw_score(surface, canvas_w, session.score),
            Screen::Dead(wreck) => {
                Scoreboard::new(canvas_w).draw(surface, wreck.score, wreck.best, wreck.medal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::pipes::PipePair;
    use crate::sprite::regions;
    use crate::surface::RecordingSurface;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn game() -> Game<ChaCha8Rng> {
        Game::new(GameCfg::default(), ChaCha8Rng::seed_from_u64(7))
    }

    fn playing(g: &mut Game<ChaCha8Rng>) -> &mut Session {
        match &mut g.screen {
            Screen::Playing(s) => s,
            _ => panic!("not playing"),
        }
    }

    fn wreck(g: &Game<ChaCha8Rng>) -> &Wreck {
        match &g.screen {
            Screen::Dead(w) => w,
            _ => panic!("not dead"),
        }
    }

    /// Keeps the bird hovering mid-gap until `frames` pass or it dies.
    fn fly(g: &mut Game<ChaCha8Rng>, audio: &mut RecordingAudio, frames: usize) {
        for _ in 0..frames {
            if g.screen.kind() != ScreenKind::Playing {
                return;
            }
            let s = playing(g);
            s.pipes.pairs.clear();
            if s.bird.y > 150.0 {
                g.primary_action(audio);
            }
            g.tick(FRAME, audio);
        }
    }

    #[test]
    fn test_starts_ready() {
        let g = game();
        assert_eq!(g.screen().kind(), ScreenKind::Ready);
        assert_eq!(g.best(), 0);
    }

    #[test]
    fn test_ready_does_not_fall() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        for _ in 0..300 {
            g.tick(FRAME, &mut audio);
        }
        assert_eq!(g.screen().kind(), ScreenKind::Ready);
        assert!((g.screen().bird().y - 50.0).abs() <= 3.0);
        assert!(audio.cues.is_empty());
    }

    #[test]
    fn test_click_starts_playing_with_a_jump() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Playing);
        assert_eq!(g.screen().bird().velocity, -4.6);
        assert_eq!(audio.cues, vec![Cue::Jump]);
    }

    #[test]
    fn test_fresh_bird_each_session() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        for _ in 0..30 {
            g.tick(FRAME, &mut audio);
        }
        assert_ne!(g.screen().bird().y, 50.0);
        g.switch(ScreenKind::Dead, &mut audio);
        g.switch(ScreenKind::Ready, &mut audio);
        g.primary_action(&mut audio);
        assert_eq!(g.screen().bird().y, 50.0);
    }

    #[test]
    fn test_falling_into_ground_ends_run() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        for _ in 0..200 {
            g.tick(FRAME, &mut audio);
            if g.screen().kind() == ScreenKind::Dead {
                break;
            }
        }
        assert_eq!(g.screen().kind(), ScreenKind::Dead);
        assert_eq!(audio.count(Cue::Hit), 1);
        // About 70 frames of flight: one point, no pipe reached yet.
        assert_eq!(wreck(&g).score, 1);
    }

    #[test]
    fn test_score_ticks_with_time() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        fly(&mut g, &mut audio, 60 * 3 + 5);
        assert_eq!(g.screen().kind(), ScreenKind::Playing);
        assert_eq!(playing(&mut g).score, 3);
        assert_eq!(audio.count(Cue::Score), 3);
    }

    #[test]
    fn test_difficulty_rises_every_five_points() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        fly(&mut g, &mut audio, 60 * 5 + 5);
        let s = playing(&mut g);
        assert_eq!(s.score, 5);
        assert_eq!(s.level, 1);
        assert!((s.bird.gravity - 0.27).abs() < 1e-6);
        assert!((s.bird.jump / s.bird.gravity - 4.6 / 0.25).abs() < 1e-3);
        assert_eq!(s.pipes.gap_for(s.level), 86.0);
    }

    #[test]
    fn test_pipe_collision_ends_run_and_sets_best() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        fly(&mut g, &mut audio, 60 * 2 + 5);
        {
            let s = playing(&mut g);
            assert_eq!(s.score, 2);
            let b = s.bird.rect();
            // A sky pipe right on top of the bird.
            s.pipes.pairs.push(PipePair {
                x: b.x,
                y: b.bottom() - 400.0 + 5.0,
                gap: 90.0,
            });
        }
        g.tick(FRAME, &mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Dead);
        assert_eq!(g.best(), 2);
        let w = wreck(&g);
        assert_eq!(w.score, 2);
        assert_eq!(w.medal, Medal::Platinum);
    }

    #[test]
    fn test_guard_stops_bird_at_pipe_edge() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        let before;
        {
            let s = playing(&mut g);
            s.bird.velocity = 3.0;
            let b = s.bird.rect();
            before = b.y;
            // Floor pipe 2px under the bird, right in its column; the
            // next move would clip into it.
            s.pipes.pairs.push(PipePair {
                x: b.x - 10.0 + 2.0,
                y: b.bottom() + 2.0 - 90.0 - 400.0,
                gap: 90.0,
            });
        }
        g.tick(FRAME, &mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Dead);
        assert_eq!(wreck(&g).bird.y, before);
    }

    #[test]
    fn test_dead_cooldown_gates_restart() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        g.switch(ScreenKind::Dead, &mut audio);

        g.primary_action(&mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Dead);

        for _ in 0..29 {
            g.tick(FRAME, &mut audio);
        }
        g.primary_action(&mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Dead);

        g.tick(FRAME, &mut audio);
        g.primary_action(&mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Ready);
    }

    #[test]
    fn test_dead_bird_tumbles_to_ground() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        g.switch(ScreenKind::Dead, &mut audio);
        for _ in 0..300 {
            g.tick(FRAME, &mut audio);
        }
        let w = wreck(&g);
        assert!(w.landed);
        assert_eq!(w.bird.rotation, 90.0);
        assert_eq!(w.bird.rect().bottom(), 368.0);
    }

    #[test]
    fn test_best_tracks_maximum() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        for score in [4, 9, 6] {
            g.switch(ScreenKind::Playing, &mut audio);
            playing(&mut g).score = score;
            g.switch(ScreenKind::Dead, &mut audio);
        }
        assert_eq!(g.best(), 9);
        assert_eq!(wreck(&g).medal, Medal::Bronze);
    }

    #[test]
    fn test_dead_transition_only_from_playing() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.switch(ScreenKind::Dead, &mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Ready);
        assert!(audio.cues.is_empty());
    }

    #[test]
    fn test_draw_per_screen() {
        let mut g = game();
        let mut audio = RecordingAudio::default();

        let mut s = RecordingSurface::default();
        g.draw(&mut s);
        assert!(s.drew(regions::GET_READY));
        assert_eq!(s.calls_of(regions::GROUND).len(), 2);

        g.primary_action(&mut audio);
        playing(&mut g).score = 12;
        let mut s = RecordingSurface::default();
        g.draw(&mut s);
        assert!(!s.drew(regions::GET_READY));
        assert!(s.drew(regions::digit(1)) && s.drew(regions::digit(2)));

        g.switch(ScreenKind::Dead, &mut audio);
        let mut s = RecordingSurface::default();
        g.draw(&mut s);
        assert!(s.drew(regions::GAME_OVER));
        assert!(s.drew(regions::MEDAL_PLATINUM));
    }

    #[test]
    fn test_dead_bird_drawn_rotated() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        g.switch(ScreenKind::Dead, &mut audio);
        for _ in 0..5 {
            g.tick(FRAME, &mut audio);
        }
        let mut s = RecordingSurface::default();
        g.draw(&mut s);
        let bird = s
            .calls
            .iter()
            .find(|c| regions::BIRD.contains(&c.src))
            .unwrap();
        assert_eq!(bird.rotation_deg, 30.0);
    }

    #[test]
    fn test_pipes_stop_after_crash() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        playing(&mut g).pipes.pairs.push(PipePair {
            x: 200.0,
            y: -200.0,
            gap: 90.0,
        });
        g.switch(ScreenKind::Dead, &mut audio);
        for _ in 0..50 {
            g.tick(FRAME, &mut audio);
        }
        assert_eq!(wreck(&g).pipes.pairs[0].x, 200.0);
    }

    #[test]
    fn test_flying_off_the_top_ends_run() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        for _ in 0..600 {
            if g.screen().kind() != ScreenKind::Playing {
                break;
            }
            g.primary_action(&mut audio);
            g.tick(FRAME, &mut audio);
        }
        assert_eq!(g.screen().kind(), ScreenKind::Dead);
        assert_eq!(audio.count(Cue::Hit), 1);
        assert!(wreck(&g).bird.y < 0.0);
    }

    #[test]
    fn test_crash_at_ground_still_turns_nose_down() {
        let mut g = game();
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        {
            let s = playing(&mut g);
            s.bird.y = 344.0;
            s.bird.velocity = 0.0;
        }
        g.tick(FRAME, &mut audio);
        assert_eq!(g.screen().kind(), ScreenKind::Dead);
        for _ in 0..20 {
            g.tick(FRAME, &mut audio);
        }
        let w = wreck(&g);
        assert!(w.landed);
        assert_eq!(w.bird.rotation, 90.0);
        assert_eq!(w.bird.rect().bottom(), 368.0);
    }

    #[test]
    fn test_bird_flies_through_gap() {
        let mut cfg = GameCfg::default();
        cfg.pipes.spawn_every = 1_000_000;
        let mut g = Game::new(cfg, ChaCha8Rng::seed_from_u64(3));
        let mut audio = RecordingAudio::default();
        g.primary_action(&mut audio);
        {
            let s = playing(&mut g);
            s.bird.y = 200.0;
            s.bird.velocity = 0.0;
            // Sky pipe ends at 150, floor pipe starts at 240.
            s.pipes.pairs.push(PipePair {
                x: 120.0,
                y: -250.0,
                gap: 90.0,
            });
        }
        let mut overlapped_columns = false;
        for _ in 0..150 {
            let s = playing(&mut g);
            let pair = s.pipes.pairs.first().copied();
            if let Some(p) = pair {
                let b = s.bird.rect();
                overlapped_columns |= p.x <= b.right() && p.x + 52.0 >= b.x;
            }
            if s.bird.y > 200.0 {
                g.primary_action(&mut audio);
            }
            g.tick(FRAME, &mut audio);
            assert_eq!(g.screen().kind(), ScreenKind::Playing);
        }
        assert!(overlapped_columns);
        // The pair scrolled past the bird and off the screen.
        assert!(playing(&mut g).pipes.pairs.is_empty());
        assert_eq!(audio.count(Cue::Hit), 0);
    }
}

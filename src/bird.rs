use crate::audio::{AudioSink, Cue};
use crate::config::sections;
use crate::geometry::Rect;
use crate::sprite::regions;
use crate::surface::Surface;

pub const BIRD_W: f32 = 33.0;
pub const BIRD_H: f32 = 24.0;

/// Wing positions: up, level, down, level.
const FLAP_CYCLE: [usize; 4] = [0, 1, 2, 1];

#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Positive is downward.
    pub velocity: f32,
    pub gravity: f32,
    pub jump: f32,
    /// Degrees, clockwise. Only non-zero after a crash.
    pub rotation: f32,
    rest_y: f32,
    flap_step: usize,
    anim_every: u64,
}

impl Bird {
    pub fn new(cfg: &sections::Bird) -> Self {
        Self {
            x: cfg.x,
            y: cfg.y,
            velocity: 0.0,
            gravity: cfg.gravity,
            jump: cfg.jump,
            rotation: 0.0,
            rest_y: cfg.y,
            flap_step: 0,
            anim_every: cfg.anim_every.max(1),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BIRD_W, BIRD_H)
    }

    pub fn jump(&mut self, audio: &mut dyn AudioSink) {
        self.velocity = -self.jump;
        audio.play(Cue::Jump);
    }

    /// Changes gravity and rescales the jump so their ratio is unchanged.
    pub fn set_gravity(&mut self, gravity: f32) {
        if self.gravity > 0.0 {
            self.jump *= gravity / self.gravity;
        }
        self.gravity = gravity;
    }

    /// One frame of flight. `can_move(from, to)` may refuse the position
    /// update; returns whether the bird moved.
    pub fn update(
        &mut self,
        audio: &mut dyn AudioSink,
        can_move: impl FnOnce(&Rect, &Rect) -> bool,
    ) -> bool {
        let was_rising = self.velocity <= 0.0;
        self.velocity += self.gravity;
        if was_rising && self.velocity > 0.0 {
            audio.play(Cue::Fall);
        }

        let from = self.rect();
        let to = from.translated(0.0, self.velocity);
        if can_move(&from, &to) {
            self.y = to.y;
            true
        } else {
            false
        }
    }

    /// Idle bobbing on the ready screen.
    pub fn hover(&mut self, frame: u64) {
        self.y = self.rest_y + (frame as f32 * 0.08).sin() * 3.0;
    }

    /// Post-crash fall: gravity only, nose turning down, stops on `floor_y`.
    /// Returns true once the bird lies on the floor.
    pub fn tumble(&mut self, floor_y: f32, rotation_speed: f32) -> bool {
        self.rotation = (self.rotation + rotation_speed).min(90.0);
        let rest = floor_y - BIRD_H;
        if self.y >= rest {
            self.y = rest;
            self.velocity = 0.0;
            return true;
        }
        self.velocity = self.velocity.max(0.0) + self.gravity;
        self.y = (self.y + self.velocity).min(rest);
        false
    }

    pub fn animate(&mut self, frame: u64) {
        if frame % self.anim_every == 0 {
            self.flap_step = (self.flap_step + 1) % FLAP_CYCLE.len();
        }
    }

    pub fn sprite(&self) -> Rect {
        regions::BIRD[FLAP_CYCLE[self.flap_step]]
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(self.sprite(), self.rect(), self.rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;

    fn bird() -> Bird {
        Bird::new(&sections::Bird::default())
    }

    #[test]
    fn test_one_frame_of_gravity() {
        let mut b = bird();
        let mut audio = RecordingAudio::default();
        assert!(b.update(&mut audio, |_, _| true));
        assert_eq!(b.y, 50.25);
        assert_eq!(b.velocity, 0.25);
    }

    #[test]
    fn test_velocity_grows_linearly() {
        let mut b = bird();
        b.velocity = -3.0;
        let mut audio = RecordingAudio::default();
        for _ in 0..20 {
            b.update(&mut audio, |_, _| false);
        }
        assert!((b.velocity - (-3.0 + 20.0 * 0.25)).abs() < 1e-5);
        // The guard refused every move.
        assert_eq!(b.y, 50.0);
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut audio = RecordingAudio::default();
        for v in [-10.0, 0.0, 7.5] {
            let mut b = bird();
            b.velocity = v;
            b.jump(&mut audio);
            assert_eq!(b.velocity, -4.6);
        }
        assert_eq!(audio.count(Cue::Jump), 3);
    }

    #[test]
    fn test_fall_cue_fires_once_per_descent() {
        let mut b = bird();
        let mut audio = RecordingAudio::default();
        b.jump(&mut audio);
        for _ in 0..60 {
            b.update(&mut audio, |_, _| true);
        }
        assert_eq!(audio.count(Cue::Fall), 1);

        b.jump(&mut audio);
        for _ in 0..60 {
            b.update(&mut audio, |_, _| true);
        }
        assert_eq!(audio.count(Cue::Fall), 2);
    }

    #[test]
    fn test_fall_cue_from_rest() {
        // velocity 0 counts as not falling yet.
        let mut b = bird();
        let mut audio = RecordingAudio::default();
        b.update(&mut audio, |_, _| true);
        assert_eq!(audio.cues, vec![Cue::Fall]);
    }

    #[test]
    fn test_guard_sees_current_and_next_rect() {
        let mut b = bird();
        b.velocity = 1.75;
        let mut audio = RecordingAudio::default();
        b.update(&mut audio, |from, to| {
            assert_eq!(from.y, 50.0);
            assert_eq!(to.y, 52.0);
            true
        });
        assert_eq!(b.y, 52.0);
    }

    #[test]
    fn test_set_gravity_keeps_ratio() {
        let mut b = bird();
        let ratio = b.jump / b.gravity;
        b.set_gravity(0.3);
        assert!((b.jump / b.gravity - ratio).abs() < 1e-4);
        assert!((b.jump - 5.52).abs() < 1e-4);
    }

    #[test]
    fn test_flap_animation_cycle() {
        let mut b = bird();
        let mut seen = Vec::new();
        for frame in 1..=40 {
            b.animate(frame);
            seen.push(b.sprite());
        }
        assert_eq!(seen[8], regions::BIRD[0]);
        assert_eq!(seen[9], regions::BIRD[1]);
        assert_eq!(seen[19], regions::BIRD[2]);
        assert_eq!(seen[29], regions::BIRD[1]);
        assert_eq!(seen[39], regions::BIRD[0]);
    }

    #[test]
    fn test_tumble_lands_and_rotates() {
        let mut b = bird();
        let floor = 368.0;
        let mut landed = false;
        for _ in 0..200 {
            landed = b.tumble(floor, 6.0);
            if landed {
                break;
            }
        }
        assert!(landed);
        assert_eq!(b.rect().bottom(), floor);
        assert_eq!(b.rotation, 90.0);
    }
}

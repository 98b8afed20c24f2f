//! Game tuning. Every section has defaults matching the classic feel, and a
//! RON file can override any subset of fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameCfg {
    pub canvas: sections::Canvas,
    pub bird: sections::Bird,
    pub ground: sections::Ground,
    pub pipes: sections::Pipes,
    pub scoring: sections::Scoring,
    pub medals: sections::Medals,
    pub dead: sections::Dead,
    pub audio: sections::Audio,
    pub display: sections::Display,
}

pub mod sections {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Canvas {
        pub width: f32,
        pub height: f32,
    }

    impl Default for Canvas {
        fn default() -> Self {
            Self {
                width: 320.0,
                height: 480.0,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Bird {
        pub x: f32,
        pub y: f32,
        pub gravity: f32,
        pub jump: f32,
        /// Frames between wing animation steps.
        pub anim_every: u64,
    }

    impl Default for Bird {
        fn default() -> Self {
            Self {
                x: 10.0,
                y: 50.0,
                gravity: 0.25,
                jump: 4.6,
                anim_every: 10,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Ground {
        pub speed: f32,
    }

    impl Default for Ground {
        fn default() -> Self {
            Self { speed: 1.0 }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Pipes {
        pub spawn_every: u64,
        pub speed: f32,
        pub gap: f32,
        pub min_gap: f32,
        /// Gap shrink per difficulty level.
        pub gap_step: f32,
        /// Sky pipe `y` is drawn from `offset_min..offset_max`.
        pub offset_min: f32,
        pub offset_max: f32,
    }

    impl Default for Pipes {
        fn default() -> Self {
            Self {
                spawn_every: 100,
                speed: 2.0,
                gap: 90.0,
                min_gap: 60.0,
                gap_step: 4.0,
                offset_min: -300.0,
                offset_max: -150.0,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Scoring {
        pub interval_ms: u64,
        /// Points between difficulty levels.
        pub level_every: u32,
        pub gravity_step: f32,
    }

    impl Default for Scoring {
        fn default() -> Self {
            Self {
                interval_ms: 1000,
                level_every: 5,
                gravity_step: 0.02,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Medals {
        pub easy: u32,
        pub medium: u32,
        pub hard: u32,
    }

    impl Default for Medals {
        fn default() -> Self {
            Self {
                easy: 5,
                medium: 10,
                hard: 20,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Dead {
        pub cooldown_ms: u64,
        /// Degrees per frame while the bird falls after a crash.
        pub rotation_speed: f32,
    }

    impl Default for Dead {
        fn default() -> Self {
            Self {
                cooldown_ms: 500,
                rotation_speed: 6.0,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Audio {
        pub debounce_ms: u64,
        pub volume: f32,
    }

    impl Default for Audio {
        fn default() -> Self {
            Self {
                debounce_ms: 50,
                volume: 0.3,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Display {
        pub tick_hz: u32,
    }

    impl Default for Display {
        fn default() -> Self {
            Self { tick_hz: 60 }
        }
    }
}

impl GameCfg {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let cfg: GameCfg = ron::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let floats = [
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
            ("bird.x", self.bird.x),
            ("bird.y", self.bird.y),
            ("bird.gravity", self.bird.gravity),
            ("bird.jump", self.bird.jump),
            ("ground.speed", self.ground.speed),
            ("pipes.speed", self.pipes.speed),
            ("pipes.gap", self.pipes.gap),
            ("pipes.min_gap", self.pipes.min_gap),
            ("pipes.gap_step", self.pipes.gap_step),
            ("pipes.offset_min", self.pipes.offset_min),
            ("pipes.offset_max", self.pipes.offset_max),
            ("scoring.gravity_step", self.scoring.gravity_step),
            ("dead.rotation_speed", self.dead.rotation_speed),
            ("audio.volume", self.audio.volume),
        ];
        if let Some(&(field, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(field, format!("must be a finite number, got {value}")));
        }

        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(invalid("canvas", "width and height must be positive"));
        }
        if self.bird.gravity <= 0.0 {
            return Err(invalid("bird.gravity", "must be positive"));
        }
        if self.bird.jump < 0.0 {
            return Err(invalid("bird.jump", "must not be negative"));
        }
        if self.bird.anim_every == 0 {
            return Err(invalid("bird.anim_every", "must be at least 1"));
        }
        if self.pipes.spawn_every == 0 {
            return Err(invalid("pipes.spawn_every", "must be at least 1"));
        }
        if self.pipes.min_gap < 0.0 || self.pipes.gap_step < 0.0 {
            return Err(invalid("pipes", "gap sizes must not be negative"));
        }
        if self.pipes.min_gap > self.pipes.gap {
            return Err(invalid("pipes.min_gap", "must not exceed pipes.gap"));
        }
        if self.pipes.offset_min >= self.pipes.offset_max {
            return Err(invalid(
                "pipes.offset_min",
                "must be below pipes.offset_max",
            ));
        }
        if self.scoring.interval_ms == 0 {
            return Err(invalid("scoring.interval_ms", "must be at least 1"));
        }
        if self.scoring.level_every == 0 {
            return Err(invalid("scoring.level_every", "must be at least 1"));
        }
        let m = &self.medals;
        if !(m.easy < m.medium && m.medium < m.hard) {
            return Err(invalid(
                "medals",
                format!(
                    "thresholds must ascend, got {} / {} / {}",
                    m.easy, m.medium, m.hard
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(invalid("audio.volume", "must be within 0.0..=1.0"));
        }
        if self.display.tick_hz == 0 {
            return Err(invalid("display.tick_hz", "must be at least 1"));
        }
        Ok(())
    }
}

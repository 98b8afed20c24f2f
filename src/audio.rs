use anyhow::Context;
use fundsp::prelude32::*;
use log::{debug, trace};
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};
use std::time::{Duration, Instant};

use crate::config::sections;

const SAMPLE_RATE: u32 = 44100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Fall,
    Hit,
    Score,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Jump, Cue::Fall, Cue::Hit, Cue::Score];

    fn index(self) -> usize {
        self as usize
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Drops a cue retriggered within `window` of its last accepted play.
/// Each cue is tracked separately.
pub struct Debouncer {
    window: Duration,
    last: [Option<Instant>; Cue::ALL.len()],
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: [None; Cue::ALL.len()],
        }
    }

    pub fn allow(&mut self, cue: Cue, now: Instant) -> bool {
        let slot = &mut self.last[cue.index()];
        match *slot {
            Some(prev) if now.saturating_duration_since(prev) < self.window => false,
            _ => {
                *slot = Some(now);
                true
            }
        }
    }
}

// ── Sounds ──────────────────────────────────────────────────────────────────

fn render(mut unit: impl AudioUnit, secs: f32) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (SAMPLE_RATE as f32 * secs) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

fn synth(cue: Cue) -> Vec<f32> {
    match cue {
        // Quick upward chirp.
        Cue::Jump => {
            let freq = lfo(|t: f32| lerp(300.0, 750.0, (t / 0.12).min(1.0)));
            let gain = lfo(|t: f32| lerp(0.5, 0.0, (t / 0.15).min(1.0)));
            render((freq >> sine()) * gain, 0.15)
        }
        // Falling whistle.
        Cue::Fall => {
            let freq = lfo(|t: f32| lerp(700.0, 250.0, (t / 0.3).min(1.0)));
            let gain = lfo(|t: f32| lerp(0.35, 0.0, (t / 0.35).min(1.0)));
            render((freq >> triangle()) * gain, 0.35)
        }
        // Sawtooth drop from 400Hz to 80Hz.
        Cue::Hit => {
            let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
            let gain = lfo(|t: f32| lerp(0.3, 0.0, (t / 0.5).min(1.0)));
            render((freq >> saw()) * gain, 0.5)
        }
        // Two-note ding.
        Cue::Score => {
            let freq = lfo(|t: f32| if t < 0.08 { 988.0 } else { 1319.0 });
            let gain = lfo(|t: f32| lerp(0.4, 0.0, (t / 0.25).min(1.0)));
            render((freq >> sine()) * gain, 0.25)
        }
    }
}

/// Plays synthesized cues on the default output device.
pub struct SoundDirector {
    stream: OutputStream,
    clips: Vec<Vec<f32>>,
    debounce: Debouncer,
    volume: f32,
}

impl SoundDirector {
    pub fn new(cfg: &sections::Audio) -> anyhow::Result<Self> {
        let mut stream =
            OutputStreamBuilder::open_default_stream().context("opening audio output")?;
        stream.log_on_drop(false);

        let clips = Cue::ALL.iter().map(|&cue| synth(cue)).collect();
        debug!("Synthesized {} sound cues", Cue::ALL.len());

        Ok(Self {
            stream,
            clips,
            debounce: Debouncer::new(Duration::from_millis(cfg.debounce_ms)),
            volume: cfg.volume,
        })
    }
}

impl AudioSink for SoundDirector {
    fn play(&mut self, cue: Cue) {
        if !self.debounce.allow(cue, Instant::now()) {
            trace!("Debounced {cue:?}");
            return;
        }
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(SamplesBuffer::new(
            1,
            SAMPLE_RATE,
            self.clips[cue.index()].clone(),
        ));
        sink.detach(); // Play in background
    }
}

/// Used for `--mute` and when no audio device is available.
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, cue: Cue) {
        trace!("Silent {cue:?}");
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
}

#[cfg(test)]
impl RecordingAudio {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

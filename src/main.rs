mod audio;
mod bird;
mod cli;
mod config;
mod game;
mod geometry;
mod hud;
mod logging;
mod medal;
mod pipes;
mod pixels;
mod scenery;
mod screen;
mod sheet;
mod sprite;
mod surface;
mod timer;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute, terminal,
};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use audio::{AudioSink, Silent, SoundDirector};
use config::GameCfg;
use game::Game;
use sheet::SpriteSheet;
use surface::TermSurface;
use timer::FixedStep;

fn open_audio(cfg: &GameCfg, mute: bool) -> Box<dyn AudioSink> {
    if mute {
        info!("Sound muted");
        return Box::new(Silent);
    }
    match SoundDirector::new(&cfg.audio) {
        Ok(director) => Box::new(director),
        Err(e) => {
            warn!("No sound: {e:#}");
            Box::new(Silent)
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    execute!(
        stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    logging::init(args.log_file.as_deref())?;

    let cfg = match &args.config {
        Some(path) => GameCfg::load(path)?,
        None => GameCfg::default(),
    };
    cfg.validate()?;

    let rng = match args.seed {
        Some(seed) => {
            info!("Seeded with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut audio = open_audio(&cfg, args.mute);
    let mut game = Game::new(cfg, rng);

    terminal::enable_raw_mode().context("entering raw mode")?;
    execute!(
        stdout(),
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = restore_terminal();
        default_hook(panic);
    }));

    let result = run(&mut game, audio.as_mut());
    restore_terminal()?;
    info!(
        "Exiting from {:?} with best score {}",
        game.screen().kind(),
        game.best()
    );
    result
}

fn run(game: &mut Game<StdRng>, audio: &mut dyn AudioSink) -> anyhow::Result<()> {
    let mut out = stdout();
    let (cols, rows) = terminal::size()?;
    let canvas = game.cfg().canvas;
    let mut surface = TermSurface::new(
        cols as usize,
        rows as usize * 2,
        SpriteSheet::paint(),
        canvas.width,
        canvas.height,
    );

    let mut ticker = FixedStep::new(game.cfg().display.tick_hz);
    // Poll at twice the tick rate.
    let frame_dur = ticker.step() / 2;
    let mut last = Instant::now();
    let mut dirty = true;

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        game.primary_action(audio);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        game.primary_action(audio);
                    }
                }
                Event::Resize(c, r) => {
                    surface.resize(c as usize, r as usize * 2);
                    dirty = true;
                }
                _ => {}
            }
        }

        // Update
        let now = Instant::now();
        if ticker.tick(now - last) {
            game.tick(ticker.step(), audio);
            dirty = true;
        }
        last = now;

        // Render
        if dirty {
            game.draw(&mut surface);
            surface.present(&mut out)?;
            dirty = false;
        }

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

use anyhow::Context;
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::path::Path;

/// Routes `log` output to `path`, filtered by `RUST_LOG` (default `info`).
/// Without a path logging stays off so the game screen is never written over.
pub fn init(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

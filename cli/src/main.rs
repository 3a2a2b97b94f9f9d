use anyhow::Context;
use circuit_escape_core::*;
use clap::Parser;
use std::path::PathBuf;

mod input;
mod render;

use input::{CommandSource, Poll};
use render::TextRenderer;

/// Circuit Escape in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file, one frame per command, instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(short, long)]
    max_frames: Option<u64>,

    /// Print the final session state as JSON
    #[arg(short, long)]
    dump: bool,
}

fn init_logging(level: log::LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    // a logger may already be installed
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Runs one frame: at most one command, then the timers. Returns `false` once
/// the input source is exhausted.
fn step(
    session: &mut Session,
    source: &mut CommandSource,
    out: &mut Collaborators<'_>,
    dt: f32,
) -> bool {
    match source.poll() {
        Poll::Command(command) => session.handle(command, out),
        Poll::Idle => {}
        Poll::Closed => return false,
    }
    session.update(dt);
    true
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let settings = Settings::load(args.config.as_deref());
    let mut source = match &args.script {
        Some(path) => CommandSource::from_script(path)?,
        None => CommandSource::stdin(),
    };

    let mut session = Session::new(&settings);
    let mut audio = LogAudio::default();
    let mut hardware = StubHardware::new();
    let mut renderer = TextRenderer::new();
    let mut clock = FrameClock::from_settings(&settings);
    let mut frames = 0u64;
    log::debug!("Frame budget {:?}", clock.frame_budget());

    renderer.render_frame(&session.view());
    while session.is_running() {
        let dt = clock.tick();
        let mut out = Collaborators::new(&mut audio, &mut hardware);
        if !step(&mut session, &mut source, &mut out, dt) {
            log::debug!("No more input after {} frames", frames);
            break;
        }
        renderer.render_frame(&session.view());

        frames += 1;
        if args.max_frames.is_some_and(|max| frames >= max) {
            log::debug!("Frame limit reached");
            break;
        }
        std::thread::sleep(clock.remaining());
    }

    if args.dump {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("Could not serialize session")?;
        println!("{}", json);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn workspace_file(relative: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(relative)
    }

    #[test]
    fn demo_script_reaches_victory() {
        let settings = Settings::from_file(&workspace_file("demos/script.toml")).unwrap();
        let map = TileMap::from_file(&workspace_file("assets/maps/level1.csv")).unwrap();
        let mut session = Session::with_level(&settings, Level::first_with_map(map));
        let mut source = CommandSource::from_script(&workspace_file("demos/solve_level1.txt")).unwrap();
        let mut audio = LogAudio::default();
        let mut hardware = StubHardware::new();

        let mut out = Collaborators::new(&mut audio, &mut hardware);
        while step(&mut session, &mut source, &mut out, 1.0 / 60.0) {}

        assert!(session.flags().puzzle_solved);
        assert_eq!(session.state(), GameState::Victory);
        assert!(!session.is_running());
    }
}

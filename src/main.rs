//! A scroll-driven product page for the terminal.
//!
//! Scrolling scrubs an image-sequence hero animation, fades text panels in
//! and out over it, and restyles the header; the rest of the page scrolls
//! past underneath.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::{mpsc, watch};

use crate::app::{
    animator::{AnimatorConfig, ScrollAnimator},
    event::{spawn_event_reader, AppEvent},
    frame_runtime::spawn_frame_loader,
    handler,
    state::AppState,
};
use crate::config::{normalise_base_path, AppConfig};
use crate::core::{
    content::{PAGE_TITLE, PANELS},
    frames::{FrameLocator, FrameSet},
    loader::{FsFrameSource, IdlePolicy, LoadPlan},
    progress::HeaderSignal,
    surface::PixelSurface,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven image-sequence product page")]
struct Cli {
    /// Directory holding the exported page assets.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Number of frames in the hero sequence.
    #[arg(long)]
    frames: Option<usize>,

    /// Frames to load before the background tier starts.
    #[arg(long = "priority-frames")]
    priority_frames: Option<usize>,

    /// Freeze the hero bitmap; panels still track the scroll.
    #[arg(long = "reduced-motion")]
    reduced_motion: bool,

    /// Deployment prefix for every asset path.
    #[arg(long = "base-path")]
    base_path: Option<String>,

    /// Write logs here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Save the effective configuration and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref assets) = self.assets {
            config.asset_root = assets.clone();
        }
        if let Some(frames) = self.frames {
            config.total_frames = frames.clamp(1, 999);
        }
        if let Some(priority) = self.priority_frames {
            config.priority_frames = priority;
        }
        if self.reduced_motion {
            config.reduced_motion = true;
        }
        if let Some(ref base) = self.base_path {
            config.base_path = normalise_base_path(base);
        }
    }
}

// ───────────────────────────────────────── logging ───────────

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        // stderr is also the TUI's output; only RUST_LOG turns this on.
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    tracing::info!(
        frames = config.total_frames,
        priority = config.priority_frames,
        assets = %config.asset_root.display(),
        base_path = %config.base_path,
        "starting"
    );

    // ── frame cache + loader ──────────────────────────────────
    let frames = Arc::new(FrameSet::new(config.total_frames));
    let locator = FrameLocator::new(config.base_path.clone(), config.total_frames);
    let source = Arc::new(FsFrameSource::new(
        config.asset_root.clone(),
        config.base_path.clone(),
        config.thumbnail_max,
    ));
    let plan = LoadPlan {
        priority_frames: config.priority_frames,
        idle: IdlePolicy::from_pause_ms(config.idle_pause_ms),
    };
    let (load_tx, mut load_rx) = mpsc::unbounded_channel();
    let _loader = spawn_frame_loader(Arc::clone(&frames), locator, source, plan, load_tx);

    // ── animator ──────────────────────────────────────────────
    let (header_tx, header_rx) = watch::channel(HeaderSignal::default());
    let animator = ScrollAnimator::new(
        AnimatorConfig {
            total_frames: config.total_frames,
            background: config.frame_bg,
            reduced_motion: config.reduced_motion,
            device_pixel_ratio: config.device_pixel_ratio,
        },
        Arc::clone(&frames),
        PANELS.to_vec(),
        Some(PixelSurface::default()),
    )
    .with_listener(move |signal| {
        // Only fails once the page is gone.
        let _ = header_tx.send(signal);
    });

    let frame_interval = Duration::from_millis(config.frame_interval_ms);
    let mut state = AppState::new(config, animator, header_rx);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(PAGE_TITLE)
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    state.resize(Rect::new(0, 0, size.width, size.height));

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut clock = tokio::time::interval(frame_interval);
    clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| ui::draw(frame, &state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(Rect::new(0, 0, w, h)),
                }
                // Scroll samples go out immediately, not on the next tick.
                state.sync_scroll();
            }

            Some(event) = load_rx.recv() => {
                // Drain everything queued before redrawing.
                let mut pending = vec![event];
                while let Ok(ev) = load_rx.try_recv() {
                    pending.push(ev);
                }
                for ev in pending {
                    state.apply_load_event(ev);
                }
            }

            now = clock.tick() => {
                state.on_frame(now.into_std());
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_config_file() {
        let cli = Cli::parse_from([
            "scrollframe",
            "--assets",
            "out",
            "--frames",
            "180",
            "--priority-frames",
            "4",
            "--reduced-motion",
            "--base-path",
            "/Click-X/",
        ]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.asset_root, PathBuf::from("out"));
        assert_eq!(config.total_frames, 180);
        assert_eq!(config.priority_frames, 4);
        assert!(config.reduced_motion);
        assert_eq!(config.base_path, "/Click-X");
    }

    #[test]
    fn absent_flags_keep_the_config() {
        let cli = Cli::parse_from(["scrollframe"]);
        let mut config = AppConfig::parse("total_frames = 60\nreduced_motion = true");
        cli.apply(&mut config);
        assert_eq!(config.total_frames, 60);
        assert!(config.reduced_motion);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

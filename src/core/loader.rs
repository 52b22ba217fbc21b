//! Two-tier frame loading.
//!
//! The priority tier (`0..K`) is loaded strictly in order and fully attempted
//! before the background tier (`K..N`) starts.  The background tier yields to
//! the idle policy between loads.  A failing load settles its slot as
//! `Failed` and the chain moves on.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use tokio::sync::mpsc;

use super::frames::{FrameLoadError, FrameLocator, FrameSet};

/// Anything that can turn a frame locator into decoded pixels.
///
/// Implementations block; the loader calls them from the blocking pool.
pub trait FrameSource: Send + Sync {
    fn load(&self, locator: &str) -> Result<RgbaImage, FrameLoadError>;
}

/// How the background tier gives way between loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlePolicy {
    /// No idle scheduler: load back-to-back.
    Unavailable,
    /// Yield to the runtime so input and drawing get a turn.
    Yield,
    /// Sleep for a fixed pause.
    Pause(Duration),
}

impl IdlePolicy {
    /// `0` → yield only, anything else → pause that many milliseconds.
    pub fn from_pause_ms(ms: u64) -> Self {
        if ms == 0 {
            IdlePolicy::Yield
        } else {
            IdlePolicy::Pause(Duration::from_millis(ms))
        }
    }

    async fn wait(self) {
        match self {
            IdlePolicy::Unavailable => {}
            IdlePolicy::Yield => tokio::task::yield_now().await,
            IdlePolicy::Pause(d) => tokio::time::sleep(d).await,
        }
    }
}

/// Tier split and pacing for one load run.
#[derive(Debug, Clone, Copy)]
pub struct LoadPlan {
    pub priority_frames: usize,
    pub idle: IdlePolicy,
}

/// Progress notifications emitted while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    Loaded(usize),
    Failed(usize),
    /// Every priority frame has been attempted.
    PriorityTierDone,
    Finished { loaded: usize, failed: usize },
}

/// Summary of a completed load run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub failed: Vec<usize>,
}

/// Load every frame in `frames`, priority tier first.  Never fails.
pub async fn load_sequence(
    frames: Arc<FrameSet>,
    locator: FrameLocator,
    source: Arc<dyn FrameSource>,
    plan: LoadPlan,
    progress: Option<mpsc::UnboundedSender<LoadEvent>>,
) -> LoadReport {
    let total = frames.len();
    let priority = plan.priority_frames.min(total);
    let mut report = LoadReport::default();

    for index in 0..priority {
        load_one(&frames, &locator, &source, index, &progress, &mut report).await;
    }
    tracing::info!(frames = priority, "priority tier attempted");
    emit(&progress, LoadEvent::PriorityTierDone);

    for index in priority..total {
        load_one(&frames, &locator, &source, index, &progress, &mut report).await;
        plan.idle.wait().await;
    }

    tracing::info!(
        loaded = report.loaded,
        failed = report.failed.len(),
        "frame sequence settled"
    );
    emit(
        &progress,
        LoadEvent::Finished {
            loaded: report.loaded,
            failed: report.failed.len(),
        },
    );
    report
}

async fn load_one(
    frames: &FrameSet,
    locator: &FrameLocator,
    source: &Arc<dyn FrameSource>,
    index: usize,
    progress: &Option<mpsc::UnboundedSender<LoadEvent>>,
    report: &mut LoadReport,
) {
    frames.mark_loading(index);
    let path = locator.locate(index);
    let src = Arc::clone(source);
    let outcome = match tokio::task::spawn_blocking(move || src.load(&path)).await {
        Ok(result) => result,
        Err(_) => Err(FrameLoadError::Interrupted(index)),
    };
    if let Err(ref e) = outcome {
        tracing::debug!(index, error = %e, "frame unavailable");
    }
    if frames.settle(index, outcome) {
        report.loaded += 1;
        emit(progress, LoadEvent::Loaded(index));
    } else {
        report.failed.push(index);
        emit(progress, LoadEvent::Failed(index));
    }
}

fn emit(progress: &Option<mpsc::UnboundedSender<LoadEvent>>, event: LoadEvent) {
    if let Some(tx) = progress {
        // Receiver gone means nobody is watching any more; keep loading.
        let _ = tx.send(event);
    }
}

// ───────────────────────────────────────── filesystem source ─

/// Reads frames from a static-export directory on disk.
///
/// Locators carry the deployment base path; it is stripped before the
/// remainder is resolved against `root`.  Frames larger than `max_dim` are
/// downscaled on load so the cache stays terminal-sized.
#[derive(Debug, Clone)]
pub struct FsFrameSource {
    root: PathBuf,
    base_path: String,
    max_dim: u32,
}

impl FsFrameSource {
    pub fn new(root: impl Into<PathBuf>, base_path: impl Into<String>, max_dim: u32) -> Self {
        Self {
            root: root.into(),
            base_path: base_path.into(),
            max_dim: max_dim.max(1),
        }
    }

    pub fn resolve(&self, locator: &str) -> PathBuf {
        let rel = locator.strip_prefix(self.base_path.as_str()).unwrap_or(locator);
        self.root.join(rel.trim_start_matches('/'))
    }
}

impl FrameSource for FsFrameSource {
    fn load(&self, locator: &str) -> Result<RgbaImage, FrameLoadError> {
        let path = self.resolve(locator);
        let bytes = read_asset(&path)?;
        let img = image::load_from_memory(&bytes)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(FrameLoadError::EmptyImage);
        }
        let img = if img.width() > self.max_dim || img.height() > self.max_dim {
            img.thumbnail(self.max_dim, self.max_dim)
        } else {
            img
        };
        Ok(img.to_rgba8())
    }
}

fn read_asset(path: &Path) -> Result<Vec<u8>, FrameLoadError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FrameLoadError::NotFound(path.display().to_string())
        } else {
            FrameLoadError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    })
}

//! Background frame loading, kept off the UI loop.
//!
//! The loader chain runs as one detached task.  Progress comes back over a
//! channel; when the page is torn down the task is left to finish and its
//! results are never read.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{
    frames::{FrameLocator, FrameSet, LoadCounts},
    loader::{self, FrameSource, LoadEvent, LoadPlan, LoadReport},
};

/// Start the two-tier loader for `frames`.
pub fn spawn_frame_loader(
    frames: Arc<FrameSet>,
    locator: FrameLocator,
    source: Arc<dyn FrameSource>,
    plan: LoadPlan,
    tx: mpsc::UnboundedSender<LoadEvent>,
) -> JoinHandle<LoadReport> {
    tracing::debug!(
        total = frames.len(),
        priority = plan.priority_frames,
        "spawning frame loader"
    );
    tokio::spawn(loader::load_sequence(frames, locator, source, plan, Some(tx)))
}

/// Loading state as seen by the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadProgress {
    pub counts: LoadCounts,
    pub priority_done: bool,
    pub finished: bool,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            counts: LoadCounts {
                total,
                ..LoadCounts::default()
            },
            ..Self::default()
        }
    }

    /// Fold one loader event in.  Returns the frame index that settled, if
    /// any, so the caller can tell the animator.
    pub fn apply(&mut self, event: LoadEvent) -> Option<usize> {
        match event {
            LoadEvent::Loaded(i) => {
                self.counts.loaded += 1;
                Some(i)
            }
            LoadEvent::Failed(i) => {
                self.counts.failed += 1;
                Some(i)
            }
            LoadEvent::PriorityTierDone => {
                self.priority_done = true;
                None
            }
            LoadEvent::Finished { loaded, failed } => {
                self.counts.loaded = loaded;
                self.counts.failed = failed;
                self.finished = true;
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.finished && !self.counts.is_complete()
    }
}

//! Frame cache for the hero image sequence.
//!
//! The loader is the only writer; the animator only ever reads.  Any slot
//! that is not `Loaded` reads back as absent, so a torn read is just a frame
//! that is not there yet.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use image::RgbaImage;

// ───────────────────────────────────────── locators ──────────

/// Prefix `path` with the deployment base path, inserting the leading `/`
/// when the path lacks one.
pub fn with_base_path(base_path: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base_path}{path}")
    } else {
        format!("{base_path}/{path}")
    }
}

/// Maps a frame index to its asset locator:
/// `{base}/sequence-webp-{N}/WB{index:03}.webp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLocator {
    base_path: String,
    total_frames: usize,
}

impl FrameLocator {
    pub fn new(base_path: impl Into<String>, total_frames: usize) -> Self {
        Self {
            base_path: base_path.into(),
            total_frames,
        }
    }

    pub fn locate(&self, index: usize) -> String {
        with_base_path(
            &self.base_path,
            &format!("/sequence-webp-{}/WB{index:03}.webp", self.total_frames),
        )
    }
}

// ───────────────────────────────────────── errors ────────────

/// Why a single frame could not be produced.  Never propagated past the
/// loader: a failed frame is simply absent.
#[derive(Debug, thiserror::Error)]
pub enum FrameLoadError {
    #[error("frame asset not found: {0}")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),
    #[error("frame has zero width or height")]
    EmptyImage,
    #[error("loader task ended before producing frame {0}")]
    Interrupted(usize),
}

// ───────────────────────────────────────── cache ─────────────

/// Lifecycle of one frame slot.
#[derive(Debug, Clone, Default)]
pub enum FrameSlot {
    #[default]
    Unloaded,
    Loading,
    Loaded(Arc<RgbaImage>),
    Failed,
}

/// Counts used by the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadCounts {
    pub loaded: usize,
    pub failed: usize,
    pub total: usize,
}

impl LoadCounts {
    pub fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.settled() >= self.total
    }
}

/// Fixed-length frame cache, indexed `0..N`.
#[derive(Debug)]
pub struct FrameSet {
    slots: RwLock<Vec<FrameSlot>>,
}

impl FrameSet {
    pub fn new(total_frames: usize) -> Self {
        Self {
            slots: RwLock::new(vec![FrameSlot::Unloaded; total_frames]),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The decoded frame at `index`, if it finished loading.
    pub fn get(&self, index: usize) -> Option<Arc<RgbaImage>> {
        match self.read().get(index) {
            Some(FrameSlot::Loaded(img)) => Some(Arc::clone(img)),
            _ => None,
        }
    }

    pub fn slot(&self, index: usize) -> Option<FrameSlot> {
        self.read().get(index).cloned()
    }

    pub fn mark_loading(&self, index: usize) {
        if let Some(slot) = self.write().get_mut(index) {
            *slot = FrameSlot::Loading;
        }
    }

    /// Settle a slot from a load outcome.  Returns `true` when the frame is
    /// now usable.
    pub fn settle(&self, index: usize, outcome: Result<RgbaImage, FrameLoadError>) -> bool {
        let mut slots = self.write();
        let Some(slot) = slots.get_mut(index) else {
            return false;
        };
        match outcome {
            Ok(img) if img.width() > 0 && img.height() > 0 => {
                *slot = FrameSlot::Loaded(Arc::new(img));
                true
            }
            _ => {
                *slot = FrameSlot::Failed;
                false
            }
        }
    }

    pub fn counts(&self) -> LoadCounts {
        let slots = self.read();
        let mut counts = LoadCounts {
            total: slots.len(),
            ..LoadCounts::default()
        };
        for slot in slots.iter() {
            match slot {
                FrameSlot::Loaded(_) => counts.loaded += 1,
                FrameSlot::Failed => counts.failed += 1,
                FrameSlot::Unloaded | FrameSlot::Loading => {}
            }
        }
        counts
    }

    // A poisoned lock only means a writer panicked mid-assignment; the
    // slots themselves are always in a valid state.
    fn read(&self) -> RwLockReadGuard<'_, Vec<FrameSlot>> {
        self.slots.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<FrameSlot>> {
        self.slots.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

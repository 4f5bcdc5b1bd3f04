//! Image availability: failure fallback and background preloading.
//!
//! Images are never drawn in the terminal, but the page still resolves each
//! reference so broken links are visible. A reference that fails to resolve
//! is swapped for the fallback asset and tagged with an error marker. The
//! swap happens once; if the fallback itself is missing nothing further is
//! attempted. Failed images are only retried through
//! [`ImageHandler::reload_failed_images`].

use crate::events::{EventBus, PageEvent};
use crate::section::{Block, BlockKind, Inline, Section};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Alt text given to failed images that had none.
pub const UNAVAILABLE_ALT: &str = "image unavailable";

/// Something that can tell whether an image reference resolves.
pub trait ImageSource {
    /// Whether `src` loads.
    fn load(&self, src: &str) -> bool;
}

#[derive(Clone, Debug)]
/// Resolves image references against the document directory.
///
/// Remote (`http`, `https`) and inline `data:` references are not fetched
/// and count as loaded.
pub struct FsImageSource {
    base_dir: PathBuf,
}

impl FsImageSource {
    #[must_use]
    /// Resolves relative paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, src: &str) -> bool {
        if ["http://", "https://", "data:"]
            .iter()
            .any(|scheme| src.starts_with(scheme))
        {
            return true;
        }
        let path = Path::new(src);
        if path.is_absolute() {
            path.is_file()
        } else {
            self.base_dir.join(path).is_file()
        }
    }
}

fn images_mut(sections: &mut [Section]) -> impl Iterator<Item = &mut Block> {
    sections
        .iter_mut()
        .flat_map(|s| s.blocks.iter_mut())
        .filter(|b| b.kind == BlockKind::Image && b.image.is_some())
}

#[derive(Clone, Debug)]
/// Applies the failure contract to image blocks.
pub struct ImageHandler {
    fallback: String,
    watching_insertions: bool,
}

impl ImageHandler {
    #[must_use]
    /// Creates a handler substituting `fallback` for failed images.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            watching_insertions: false,
        }
    }

    #[must_use]
    /// Fallback asset path.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Marks `block` as failed, substituting the fallback. Returns `false`
    /// when the block already shows the fallback.
    pub fn fail(&self, block: &mut Block) -> bool {
        let Some(image) = block.image.as_mut() else {
            return false;
        };
        if image.src == self.fallback {
            return false;
        }
        tracing::warn!(src = %image.src, fallback = %self.fallback, "image failed to load");
        image.src.clone_from(&self.fallback);
        image.error = true;
        if block.inlines.iter().all(|i| i.text().trim().is_empty()) {
            let placeholder = vec![Inline::Text(UNAVAILABLE_ALT.to_string())];
            image.replaced_alt = Some(std::mem::replace(&mut block.inlines, placeholder));
        }
        true
    }

    /// Checks one block, applying the failure contract or clearing a stale
    /// error marker and placeholder alt text.
    pub fn check(&self, block: &mut Block, source: &dyn ImageSource) -> bool {
        let Some(image) = block.image.as_mut() else {
            return true;
        };
        if source.load(&image.src) {
            image.error = false;
            if let Some(alt) = image.replaced_alt.take() {
                block.inlines = alt;
            }
            true
        } else {
            self.fail(block);
            false
        }
    }

    /// Checks every image that is not already marked failed. Returns the
    /// number of failures.
    pub fn apply(&self, sections: &mut [Section], source: &dyn ImageSource) -> usize {
        images_mut(sections)
            .filter(|b| b.image.as_ref().is_some_and(|i| !i.error))
            .map(|b| usize::from(!self.check(b, source)))
            .sum()
    }

    /// Retries every failed image from its original source. Returns how
    /// many images were retried.
    pub fn reload_failed_images(&self, sections: &mut [Section], source: &dyn ImageSource) -> usize {
        let mut retried = 0;
        for block in images_mut(sections) {
            let Some(image) = block.image.as_mut().filter(|i| i.error) else {
                continue;
            };
            image.src.clone_from(&image.original_src);
            image.error = false;
            retried += 1;
            self.check(block, source);
        }
        tracing::debug!(retried, "reloaded failed images");
        retried
    }

    /// Subscribes to sections inserted after the initial load.
    pub fn watch_insertions(&mut self) {
        self.watching_insertions = true;
    }

    #[must_use]
    /// Whether inserted sections are checked.
    pub fn watching_insertions(&self) -> bool {
        self.watching_insertions
    }

    /// Applies the failure contract to newly inserted sections when
    /// subscribed. Returns the number of failures.
    pub fn sections_inserted(&self, sections: &mut [Section], source: &dyn ImageSource) -> usize {
        if self.watching_insertions {
            self.apply(sections, source)
        } else {
            0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Preload progress; failures count as loaded.
pub struct PreloadProgress {
    /// Images settled so far.
    pub loaded: usize,
    /// Images to preload.
    pub total: usize,
}

impl PreloadProgress {
    #[must_use]
    /// Progress in percent; 100 when there is nothing to load.
    pub fn percent(self) -> u16 {
        if self.total == 0 {
            return 100;
        }
        u16::try_from(self.loaded * 100 / self.total).unwrap_or(100)
    }

    #[must_use]
    /// Whether every image has settled.
    pub fn is_complete(self) -> bool {
        self.loaded >= self.total
    }
}

#[derive(Clone, Debug, Default)]
/// Checks page images one at a time between input events.
pub struct Preloader {
    queue: VecDeque<String>,
    loaded: usize,
    failed: usize,
    total: usize,
    announced: bool,
}

impl Preloader {
    #[must_use]
    /// Queues every image referenced by `sections`.
    pub fn new(sections: &[Section]) -> Self {
        let queue: VecDeque<String> = sections
            .iter()
            .flat_map(|s| &s.blocks)
            .filter_map(|b| b.image.as_ref())
            .map(|i| i.original_src.clone())
            .collect();
        Self {
            total: queue.len(),
            queue,
            ..Self::default()
        }
    }

    #[must_use]
    /// Current progress.
    pub fn progress(&self) -> PreloadProgress {
        PreloadProgress {
            loaded: self.loaded,
            total: self.total,
        }
    }

    #[must_use]
    /// Images that failed to preload.
    pub fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    /// Whether the completion event has been emitted.
    pub fn is_finished(&self) -> bool {
        self.announced
    }

    /// Checks the next queued image. Emits the background-images event the
    /// first time every image has settled.
    pub fn step(&mut self, source: &dyn ImageSource, bus: &mut EventBus) -> PreloadProgress {
        if let Some(src) = self.queue.pop_front() {
            if !source.load(&src) {
                tracing::error!(%src, "image preload failed");
                self.failed += 1;
            }
            self.loaded += 1;
        }
        if self.queue.is_empty() && !self.announced {
            self.announced = true;
            tracing::debug!(total = self.total, failed = self.failed, "preload complete");
            bus.emit(PageEvent::BackgroundImagesLoaded);
        }
        self.progress()
    }
}

#[cfg(test)]
#[path = "tests/assets.rs"]
mod tests;

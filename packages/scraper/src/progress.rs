//! Stage reporting for a scrape run.
//!
//! A scrape is a short fixed sequence of [`ScrapeStage`]s. The pipeline
//! reports each one through a [`ProgressCallback`] so front ends can render
//! a spinner or bar without the extraction crates knowing how.

/// One step of a scrape, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Launch,
    Load,
    Expand,
    Extract,
    Export,
}

impl ScrapeStage {
    /// Every stage, in order.
    pub const ALL: &[Self] = &[
        Self::Launch,
        Self::Load,
        Self::Expand,
        Self::Extract,
        Self::Export,
    ];

    /// Short description shown next to the progress indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Launch => "Starting browser",
            Self::Load => "Loading page",
            Self::Expand => "Expanding listings",
            Self::Extract => "Extracting listings",
            Self::Export => "Preparing downloads",
        }
    }
}

/// Receives progress updates from a scrape.
///
/// Implementations must be `Send + Sync` so one instance can be shared
/// through an [`Arc`](std::sync::Arc) across spawned tasks.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected units of work.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` units.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);

    /// Mark progress as complete and remove the progress indicator.
    fn finish_and_clear(&self);

    /// Announces that `stage` has started.
    fn stage(&self, stage: ScrapeStage) {
        self.set_message(stage.label().to_owned());
    }

    /// Marks `stage` as done.
    fn stage_done(&self, _stage: ScrapeStage) {
        self.inc(1);
    }
}

/// Ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
    fn finish_and_clear(&self) {}
}

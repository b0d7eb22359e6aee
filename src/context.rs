//! Service context bundling all port trait objects.

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Commands receive a
/// context instead of reaching for `std::fs` directly.
pub struct ServiceContext {
    /// Filesystem for roster reads, directory listings and output-root setup.
    pub fs: Box<dyn FileSystem>,
    /// Clock for stamping machine-readable plans.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a live context backed by the real filesystem and system clock.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;

        Self {
            fs: Box::new(LiveFileSystem),
            clock: Box::new(LiveClock),
        }
    }
}

//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the planning core and the
//! outside world. Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;

pub use clock::Clock;
pub use filesystem::FileSystem;

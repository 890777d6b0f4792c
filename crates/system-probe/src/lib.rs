//! Point-in-time host status for the control panel.
//!
//! Each probe shells out to one OS utility under its own timeout. A probe that
//! fails or prints something unexpected yields a placeholder for its own field
//! and never affects the others. Nothing is cached.

pub mod disk;
pub mod overlay;
pub mod probe;

pub use disk::DiskUsage;
pub use overlay::OverlayStatus;
pub use probe::{SystemProbe, SystemSnapshot, UNAVAILABLE};

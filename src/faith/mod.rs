//! Faith track.
//!
//! Each player advances along a track of fixed length. Vatican reports are
//! match-wide: the first player to reach a pope space fires that report for
//! everyone.

pub mod report;
pub mod track;

pub use report::{ReportSchedule, VaticanReport};
pub use track::{FaithTrack, FavourTile};

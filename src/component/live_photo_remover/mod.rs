//! Live-photo companion cleanup
//!
//! Deletes the redundant motion clip paired with a still image before the
//! relocation pipeline runs.

mod main;

pub use main::LivePhotoRemover;

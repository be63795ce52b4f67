//! Date-bucketed relocation pipeline
//!
//! Three concurrent stages connected by two bounded queues: a tree scanner
//! producing file paths, a classifier pool turning paths into relocation
//! intents, and a single relocator executing the moves.

mod classifier;
mod main;
mod relocator;
mod scanner;

pub use classifier::{DateClassifier, RelocationIntent};
pub use main::{DateDispatcher, DispatchSummary};
pub use relocator::FileRelocator;
pub use scanner::TreeScanner;

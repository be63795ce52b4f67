//! Feature components, one submodule per processing pass.

pub mod date_dispatcher;
pub mod live_photo_remover;

pub use date_dispatcher::{DateDispatcher, DispatchSummary};
pub use live_photo_remover::LivePhotoRemover;

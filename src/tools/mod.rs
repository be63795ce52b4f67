mod exiftool;
mod file_mover;
mod metadata;
mod path_validator;

pub use exiftool::Exiftool;
pub use file_mover::move_file;
pub use metadata::{FileMetadata, MetadataSource, MetadataSourceFactory};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};

pub mod deps;
pub mod filename;
pub mod humanize;
pub mod logger;

pub use deps::encoder_available;
pub use filename::{ascii_filename, compressed_name, sanitize_filename};
pub use humanize::format_file_size;
pub use logger::init_logging;

pub mod loader;
pub mod timestamp;

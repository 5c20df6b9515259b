pub mod cli;
pub mod layout;
pub mod render;

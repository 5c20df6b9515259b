pub mod error;
pub mod ta;
pub mod vars;

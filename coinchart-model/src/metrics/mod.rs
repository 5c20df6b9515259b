pub mod deriver;
pub mod frame;

pub mod check;
mod common;
pub mod resolve;

pub mod error;
pub mod hook;

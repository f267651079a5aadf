pub mod chunked;
pub mod core;
pub mod error;

//! Resolve HTTP content types from path extensions, and benchmark the
//! competing ways of doing it.

pub mod bench;
pub mod config;
pub mod corpus;
pub mod error;
pub mod lookup;
pub mod mimetype;
pub mod strategy;

pub use crate::bench::*;
pub use crate::corpus::*;
pub use crate::error::BenchError;
pub use crate::lookup::*;
pub use crate::mimetype::*;
pub use crate::strategy::*;

pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const COMMIT_ID: &str = env!("GIT_COMMITID");

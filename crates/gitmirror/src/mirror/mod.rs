//! Migration orchestration: record transformation and the four run modes.

pub mod engine;
pub mod error;
pub mod request;

pub use engine::{Mirrorer, MirrorSummary, parse_repo_ref};
pub use error::MirrorError;
pub use request::{DestOwner, MirrorOptions, build_migration_request};

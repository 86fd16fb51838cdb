//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async data-access
//! methods that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod progress_repo;
pub mod status_check_repo;

pub use event_repo::EventRepo;
pub use progress_repo::ProgressRepo;
pub use status_check_repo::StatusCheckRepo;

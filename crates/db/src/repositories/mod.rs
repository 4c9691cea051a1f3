//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods that
//! accept any [`sqlx::PgExecutor`] as the first argument: `&PgPool` for
//! one-off reads, `&mut *tx` inside a snapshot transaction.
//!
//! Visibility filtering (`status = 'approved'`, `is_deleted = false`,
//! `is_hidden = false`) happens here; callers trust the rows they get.

pub mod award_repo;
pub mod comment_repo;
pub mod connection_repo;
pub mod fallen_repo;
pub mod media_repo;
pub mod memory_repo;
pub mod profile_repo;
pub mod timeline_repo;

pub use award_repo::AwardRepo;
pub use comment_repo::CommentRepo;
pub use connection_repo::ConnectionRepo;
pub use fallen_repo::FallenRepo;
pub use media_repo::MediaRepo;
pub use memory_repo::MemoryRepo;
pub use profile_repo::ProfileRepo;
pub use timeline_repo::TimelineRepo;

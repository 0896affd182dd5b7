//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod entity_repo;
pub mod keyed_repo;

pub use entity_repo::EntityRepo;
pub use keyed_repo::KeyedRepo;

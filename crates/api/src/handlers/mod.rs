//! Request handlers.
//!
//! Handlers resolve the target table, validate the request through
//! `drafttrack_core`, delegate to the repositories in `drafttrack_db` and map
//! errors via [`crate::error::AppError`].

pub mod employee;
pub mod entity;

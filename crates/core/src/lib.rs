//! Domain types for the drafttrack service.
//!
//! Holds the entity table registry, request document validation, the
//! structured-value text encoding and keyed sub-document transforms. Nothing
//! in this crate performs I/O.

pub mod document;
pub mod encoding;
pub mod entity;
pub mod error;
pub mod keyed;
pub mod types;

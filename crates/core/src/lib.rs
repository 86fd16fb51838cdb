//! Domain building blocks for the Tyria Tracker progress service.
//!
//! Nothing in this crate performs I/O. The store and HTTP layers depend on
//! it for the shared error type, type aliases, checklist defaults and
//! request-field validation.

pub mod checklist;
pub mod error;
pub mod types;
pub mod validation;

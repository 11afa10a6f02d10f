//! Core document types, the status table, and errors.
//!
//! These types are shared by every stage of the pipeline: the parser creates
//! [`ExtractedDocument`]s, the rules classify their [`LineItem`]s, the guard
//! moves a [`Document`] through [`DocumentStatus`], and the submission step
//! aggregates ready documents.

pub mod countries;
pub mod currencies;
mod error;
mod status;
mod types;

pub use error::*;
pub use status::*;
pub use types::*;

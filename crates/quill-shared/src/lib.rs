//! # Quill Shared
//!
//! Wire types shared between the API server and its clients.
//! Both sides serialize through these structs, so the JSON contract lives in one place.

pub mod dto;
pub mod response;

pub use response::{DeleteResponse, ErrorResponse, FieldErrorBody};

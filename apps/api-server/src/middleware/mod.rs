//! Middleware modules.

pub mod error;
pub mod validate;

pub use error::{AppError, AppResult};
pub use validate::{Empty, Schema, Validated};

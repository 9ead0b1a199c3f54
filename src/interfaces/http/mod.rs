//! HTTP boundary
//!
//! Routes are out of scope here; this module fixes how domain results are
//! rendered: the [`ApiResponse`] envelope and the status code of every
//! [`DomainError`](crate::shared::DomainError) kind.

mod error;
mod response;

pub use response::ApiResponse;

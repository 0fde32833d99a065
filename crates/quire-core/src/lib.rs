//! # Quire Core
//!
//! The domain layer of the Quire blog API.
//! Access control, query shaping and output projection for blog posts live here,
//! with zero infrastructure dependencies. Storage and token handling are ports.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod ports;
pub mod projection;
pub mod query;
pub mod service;

pub use domain::Caller;
pub use error::{DomainError, FieldError};
pub use service::PostService;

//! Business logic services

pub mod context;
pub mod error;
pub mod message;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;

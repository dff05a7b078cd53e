//! Message store implementations
//!
//! Both stores implement `parlor_core::MessageStore`; which one a server uses
//! depends on whether a database is configured.

mod error;
mod memory;
mod message;

pub use memory::MemoryMessageStore;
pub use message::PgMessageStore;

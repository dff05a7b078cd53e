//! Database models - rows as SQLx reads them

mod chat_entry;

pub use chat_entry::ChatEntryModel;

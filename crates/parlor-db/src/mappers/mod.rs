//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.

mod chat_entry;

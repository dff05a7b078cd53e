//! Error handling utilities for stores

use parlor_core::StoreError;
use sqlx::Error as SqlxError;

/// Wrap a SQLx error as a [`StoreError`] tagged with the failing operation
pub fn map_db_error(operation: &'static str) -> impl FnOnce(SqlxError) -> StoreError {
    move |e| StoreError::new(operation, e)
}

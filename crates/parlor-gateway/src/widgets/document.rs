//! Shared collaborative document
//!
//! One block of text; the latest update wins.

use crate::protocol::DocumentUpdatePayload;
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct SharedDocument {
    text: RwLock<String>,
}

impl SharedDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.read().clone()
    }

    /// Replace the text and announce the update through `publish`
    ///
    /// `publish` runs while the text is locked; it must not block.
    pub fn replace<F>(&self, update: &DocumentUpdatePayload, publish: F)
    where
        F: FnOnce(&DocumentUpdatePayload),
    {
        let mut text = self.text.write();
        text.clone_from(&update.text);
        publish(update);
    }
}

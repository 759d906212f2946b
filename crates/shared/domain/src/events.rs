//! Events published on the bus.

use crate::models::CategoryId;

/// A category was written to the store.
///
/// Published after the write is visible to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySaved {
    pub id: CategoryId,
}

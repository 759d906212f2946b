//! Boundary to the host forum's persistence.
//!
//! The gate never owns categories, topics or users; it reads them through
//! [`ForumStore`] and writes back only category custom fields.

mod error;
mod memory;

pub use error::{StoreError, StoreErrorExt};
pub use memory::MemoryForum;

use std::fmt::Debug;
use teaser_domain::models::{Category, CategoryId, Topic, TopicId, User, UserId};

/// Read/write access to forum entities.
///
/// Implementations must be safe to call from any request thread. A write made
/// through [`ForumStore::save_category`] must be visible to every later read.
pub trait ForumStore: Debug + Send + Sync {
    /// Counter bumped after every category write. Readers holding derived state
    /// compare it to detect saves they have not seen yet.
    ///
    /// Stores that cannot track writes report a constant and rely on
    /// [`teaser_domain::events::CategorySaved`] announcements instead.
    fn category_revision(&self) -> u64 {
        0
    }


    /// All categories, ordered by id.
    fn categories(&self) -> Result<Vec<Category>, StoreError>;

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Persists a category, replacing any previous version with the same id.
    fn save_category(&self, category: Category) -> Result<(), StoreError>;

    fn topic(&self, id: TopicId) -> Result<Option<Topic>, StoreError>;

    /// All topics, ordered by id.
    fn topics(&self) -> Result<Vec<Topic>, StoreError>;

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

//! Category visibility lists and the teasing extension on top of them.

use crate::error::GatingError;
use crate::registry::TeasingRegistry;
use fxhash::FxHashSet;
use std::fmt::Debug;
use std::sync::Arc;
use teaser_kernel::domain::models::{CategoryId, Viewer};
use teaser_kernel::store::ForumStore;
use tracing::trace;

/// Category ids a viewer may list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryVisibility {
    /// Categories whose topics appear in listings.
    pub allowed: Vec<CategoryId>,
    /// Group-restricted categories the viewer can see.
    pub restricted: Vec<CategoryId>,
}

/// Produces the category visibility lists for a viewer.
pub trait CategoryAccess: Debug + Send + Sync {
    fn visibility(&self, viewer: &Viewer) -> Result<CategoryVisibility, GatingError>;
}

/// Host baseline: open categories for everyone, group-restricted categories for
/// members of a granting group.
#[derive(Debug, Clone)]
pub struct GroupScopedAccess {
    store: Arc<dyn ForumStore>,
}

impl GroupScopedAccess {
    #[must_use]
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self { store }
    }
}

impl CategoryAccess for GroupScopedAccess {
    fn visibility(&self, viewer: &Viewer) -> Result<CategoryVisibility, GatingError> {
        let groups = viewer.group_ids();
        let mut visibility = CategoryVisibility::default();

        for category in self.store.categories()? {
            if !category.is_group_restricted() {
                visibility.allowed.push(category.id);
            } else if groups.is_some_and(|g| !category.group_ids.is_disjoint(g)) {
                visibility.allowed.push(category.id);
                visibility.restricted.push(category.id);
            }
        }
        Ok(visibility)
    }
}

/// Wraps a baseline so teasing-enabled categories are always listed, while
/// their content stays gated by the evaluator.
#[derive(Debug, Clone)]
pub struct TeasingAccess<B> {
    baseline: B,
    registry: TeasingRegistry,
}

impl<B: CategoryAccess> TeasingAccess<B> {
    #[must_use]
    pub const fn new(baseline: B, registry: TeasingRegistry) -> Self {
        Self { baseline, registry }
    }
}

impl<B: CategoryAccess> CategoryAccess for TeasingAccess<B> {
    fn visibility(&self, viewer: &Viewer) -> Result<CategoryVisibility, GatingError> {
        let mut visibility = self.baseline.visibility(viewer)?;
        let teased = self.registry.enabled_ids()?;
        if teased.is_empty() {
            return Ok(visibility);
        }

        let added = append_missing(&mut visibility.allowed, &teased);
        append_missing(&mut visibility.restricted, &teased);
        trace!(added, "Teased categories appended to visibility");
        Ok(visibility)
    }
}

/// Appends every id of `extra` not already in `ids`, once each and in `extra`
/// order. Existing entries are left untouched. Returns how many were added.
pub fn append_missing(ids: &mut Vec<CategoryId>, extra: &[CategoryId]) -> usize {
    let mut seen: FxHashSet<_> = ids.iter().copied().collect();
    let before = ids.len();
    ids.extend(extra.iter().copied().filter(|id| seen.insert(*id)));
    ids.len() - before
}

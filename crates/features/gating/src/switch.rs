use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The global `dl_teaser_enabled` flag.
///
/// Seeded from config and shared by every component; flipping it takes effect on
/// the next decision without rebuilding anything.
#[derive(Debug, Clone, Default)]
pub struct TeaserSwitch(Arc<AtomicBool>);

impl TeaserSwitch {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag and returns its previous value.
    pub fn set(&self, enabled: bool) -> bool {
        self.0.swap(enabled, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let switch = TeaserSwitch::new(false);
        let other = switch.clone();

        assert!(!switch.set(true));
        assert!(other.is_enabled());
    }
}

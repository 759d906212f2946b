//! Facade crate for the teaser gate.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `teaser` with the `server` feature.
//! - Call [`init`] inside a Tokio runtime to build every feature slice.

use std::sync::Arc;
pub use teaser_domain as domain;
use teaser_domain::config::ApiConfig;
use teaser_domain::registry::InitializedSlice;
use teaser_event_bus::EventBus;
pub use teaser_kernel as kernel;
use teaser_kernel::store::ForumStore;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use teaser_gating::handlers::router as teaser_router;
        pub use teaser_kernel::server::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use teaser_gating as gating;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "gating",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initializes every feature slice.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    store: &Arc<dyn ForumStore>,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![features::gating::init(config, Arc::clone(store), events)?];
    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teaser_kernel::store::MemoryForum;

    #[test]
    fn gating_is_always_enabled() {
        assert!(features::is_enabled("gating"));
        assert!(!features::is_enabled("licensing"));
    }

    #[tokio::test]
    async fn init_builds_the_teaser_slice() {
        let store: Arc<dyn ForumStore> = Arc::new(MemoryForum::new());
        let slices = init(&ApiConfig::default(), &store, &EventBus::new()).unwrap();

        let names: Vec<_> = slices.iter().map(InitializedSlice::name).collect();
        assert_eq!(names, vec![features::gating::Teaser::NAME]);
    }
}

//! Kernel utilities shared across slices.
//! Keep this crate lightweight: it owns config loading, the boundary to the host
//! forum's persistence and, behind the `server` feature, the HTTP state and extractors.
//!
//! ## Config loading
//! ```rust,ignore
//! use teaser_kernel::config::load_config;
//! use teaser_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
//!
//! ## Store
//! ```rust
//! use teaser_kernel::domain::models::Category;
//! use teaser_kernel::store::{ForumStore, MemoryForum};
//!
//! let forum = MemoryForum::new();
//! forum.insert_category(Category::new(1, "General"));
//! assert_eq!(forum.categories().unwrap().len(), 1);
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;
pub mod store;

pub use teaser_domain as domain;

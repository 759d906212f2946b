//! # Event Bus
//!
//! Type-keyed broadcast channels shared by the store and the feature slices.
//! Each event type gets its own `tokio::sync::broadcast` channel, created lazily on
//! first publish or subscribe.
//!
//! # Example
//!
//! ```rust
//! use teaser_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct CategorySaved { id: u64 }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<CategorySaved>()?;
//!     bus.publish(CategorySaved { id: 42 })?;
//!
//!     let event = rx.next_event().await.expect("bus is open");
//!     assert_eq!(event.id, 42);
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;

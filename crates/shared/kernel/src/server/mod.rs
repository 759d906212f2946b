mod health;
mod router;
mod state;
mod viewer;

pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
pub use viewer::{CurrentViewer, ViewerRejection};

use crate::evaluator::{GatedTopic, VisibilityEvaluator};
use teaser_kernel::domain::models::Viewer;
use tracing::debug;

/// Result of the show-topic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Send the viewer here instead of serving the topic.
    Redirect(String),
    Proceed(GatedTopic),
}

/// Runs before a topic is served.
#[derive(Debug, Clone)]
pub struct RequestGate {
    evaluator: VisibilityEvaluator,
}

impl RequestGate {
    #[must_use]
    pub const fn new(evaluator: VisibilityEvaluator) -> Self {
        Self { evaluator }
    }

    /// Redirects when the topic has a category and is teased for `viewer`.
    #[must_use]
    pub fn check(&self, gated: GatedTopic, viewer: &Viewer) -> GateOutcome {
        if gated.category.is_some() && self.evaluator.is_teased(&gated, viewer) {
            let target = self.evaluator.redirect_target(&gated);
            debug!(topic_id = gated.topic.id, %target, "Teased topic redirected");
            return GateOutcome::Redirect(target);
        }
        GateOutcome::Proceed(gated)
    }
}

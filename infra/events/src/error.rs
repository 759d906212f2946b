use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[teaser_derive::teaser_error]
pub enum EventBusError {
    /// The channel registered for a type holds a sender of another type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

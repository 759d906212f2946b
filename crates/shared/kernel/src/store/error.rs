use std::borrow::Cow;

#[teaser_derive::teaser_error]
pub enum StoreError {
    /// The backing store cannot be reached.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid seed data{}: {source}", format_context(.context))]
    Seed { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Store I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

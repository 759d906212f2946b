#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace: error enums,
//! feature slice handles and HTTP API models/handlers.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own
//! macros in doctests; the integration tests under `tests/` exercise them instead.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a serializable API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when missing.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` by default.
///
/// Takes no arguments. A `#[serde(rename_all = ...)]` or `#[serde(deny_unknown_fields)]`
/// already present on the struct replaces the corresponding default.
///
/// # Example
///
/// ```rust,ignore
/// use teaser_derive::api_model;
///
/// #[api_model]
/// pub struct TopicListItem {
///     pub id: u64,
///     pub topic_teasing_url: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path`.
///
/// Accepts the standard `utoipa::path` arguments (`get`, `path = "..."`,
/// `params(...)`, `responses(...)`, `tag = "..."`).
///
/// # Example
///
/// ```rust,ignore
/// use teaser_derive::api_handler;
///
/// #[api_handler(get, path = "/health", responses((status = OK)), tag = "System")]
/// pub async fn health_handler() -> &'static str {
///     "up"
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into a domain error type.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Only enums with named-field variants are accepted.
/// 2. Variants with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[teaser_derive::teaser_error]
/// pub enum StoreError {
///     #[error("Seed error{}: {source}", format_context(.context))]
///     Seed { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn teaser_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a cheaply clonable feature slice handle.
///
/// Generates `<Name>Inner` with the declared fields, an `Arc` wrapper named
/// `<Name>` with `new` and `Deref`, and the `FeatureSlice` registration impl.
///
/// # Example
/// ```rust,ignore
/// #[teaser_derive::teaser_slice]
/// pub struct Gating {
///     pub name: String,
/// }
///
/// let slice = Gating::new(GatingInner { name: "gating".to_owned() });
/// ```
#[proc_macro_attribute]
pub fn teaser_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}

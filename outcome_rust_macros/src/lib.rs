mod entity;
mod failure_kind;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Entity)] derive macro
// ============================================================================

/// Derive macro for the `Entity` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Entity)]
/// #[entity(collection = "customers")]
/// struct Customer {
///     #[entity(id)]
///     pub id: String,
///     #[entity(not_blank, max_len = 64)]
///     pub name: String,
///     #[entity(min_len = 2)]
///     pub city: Option<String>,
///     #[entity(audit)]
///     #[serde(default)]
///     pub audit: Audit,
/// }
/// ```
///
/// - `#[entity(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[entity(id)]` marks the `String` field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
/// - `not_blank`, `min_len = N` and `max_len = N` generate `validate`.
///   Length checks skip `None`.
/// - `#[entity(audit)]` marks an `Audit` field that receives change stamps.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input)
}

// ============================================================================
// #[derive(FailureKind)] derive macro
// ============================================================================

/// Derive macro for the `FailureKind` trait on a fieldless enum.
///
/// # Usage
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, FailureKind)]
/// enum BillingFailure {
///     #[failure(generic, title = "Billing failed")]
///     Generic,
///     #[failure(title = "Card declined", template = "card ending {} was declined: {}")]
///     CardDeclined,
/// }
/// ```
///
/// Exactly one variant must be marked `generic`. `title` defaults to the
/// variant name and `template` to the empty string.
#[proc_macro_derive(FailureKind, attributes(failure))]
pub fn derive_failure_kind(input: TokenStream) -> TokenStream {
    failure_kind::derive_failure_kind(input)
}

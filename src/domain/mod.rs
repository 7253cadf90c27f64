// ============================================================================
// Domain Layer - Content Tracking Business Logic
// ============================================================================
//
// One subdirectory per aggregate (or event family) with:
// - Value objects
// - Events
// - Errors
// - Aggregate implementation
//
// Aggregates reference each other by id only; none owns another.
//
// ============================================================================

/// String-backed identifier newtype, serialized as a bare string.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub mod actor;
pub mod content;
pub mod engagement;
pub mod media;

//! List wrappers with empty-collection handling.
//!
//! Each wrapper is a plain newtype over a `Vec` that derefs to a slice, so
//! callers can index and iterate it like the vector itself.

use std::{fmt, ops::Deref};

use crate::models::{BrewRecord, CoffeeBean, GrinderProfile, MethodSummary};

macro_rules! list_wrapper {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl Deref for $name {
            type Target = [$item];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for item in &self.0 {
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    };
}

list_wrapper!(
    /// Methods as one-paragraph summaries.
    ///
    /// ```rust
    /// use brewlab_core::display::MethodSummaries;
    ///
    /// assert_eq!(MethodSummaries(vec![]).to_string(), "No brew methods found.\n");
    /// ```
    MethodSummaries,
    MethodSummary,
    "No brew methods found."
);

list_wrapper!(
    /// Beans in the catalog.
    Beans,
    CoffeeBean,
    "No coffee beans found."
);

list_wrapper!(
    /// Grinder profiles.
    Grinders,
    GrinderProfile,
    "No grinders found."
);

list_wrapper!(
    /// Brew log entries.
    Records,
    BrewRecord,
    "No brews logged yet."
);

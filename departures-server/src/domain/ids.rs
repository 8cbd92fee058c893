//! Identifier newtypes for schedule entities.
//!
//! GTFS identifiers are opaque strings. Each entity gets its own newtype so
//! that a trip id cannot be passed where a route id is expected. The ids are
//! backed by `Arc<str>`, so cloning one while building join indexes is a
//! reference-count bump rather than a string copy.

use std::fmt;
use std::sync::Arc;

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(value: impl Into<Arc<str>>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier! {
    /// Identifies the transit agency a record belongs to.
    AgencyId
}

identifier! {
    /// Identifies a service pattern shared by calendars, exceptions and trips.
    ServiceId
}

identifier! {
    /// Identifies a route.
    RouteId
}

identifier! {
    /// Identifies a single scheduled trip along a route.
    TripId
}

identifier! {
    /// Identifies a stop. Distinct from the rider-facing stop code.
    StopId
}

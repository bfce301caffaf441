//! Error types.
//!
//! Only one condition in this crate is recoverable: a keyed lookup that
//! requires a present entry. Contract violations on the slot protocol are
//! debug-build panics, and layout mismatches are compile-time failures;
//! neither is represented here.

/// The error type for keyed lookups on absent keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound;

impl core::fmt::Display for NotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("key not present in the table")
    }
}

impl std::error::Error for NotFound {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(NotFound);
        assert_eq!(err.to_string(), "key not present in the table");
    }
}

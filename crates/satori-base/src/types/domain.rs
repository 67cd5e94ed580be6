//! The two-element Boolean domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The set of values a Boolean variable may still take.
///
/// A fresh domain is universal, i.e. `{false, true}`. Solvers narrow domains
/// to singletons while searching; the empty domain only appears transiently
/// inside algorithms that erase values one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryDomain {
    zero: bool,
    one: bool,
}

impl Default for BinaryDomain {
    fn default() -> Self {
        Self::universal()
    }
}

impl BinaryDomain {
    /// The full domain `{false, true}`.
    #[must_use]
    pub const fn universal() -> Self {
        Self { zero: true, one: true }
    }

    /// The empty domain.
    #[must_use]
    pub const fn empty() -> Self {
        Self { zero: false, one: false }
    }

    /// The domain holding exactly `value`.
    #[must_use]
    pub const fn singleton(value: bool) -> Self {
        Self { zero: !value, one: value }
    }

    #[must_use]
    pub const fn is_universal(&self) -> bool {
        self.zero && self.one
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.zero && !self.one
    }

    /// True when the variable is assigned, i.e. exactly one value remains.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.zero != self.one
    }

    #[must_use]
    pub const fn contains(&self, value: bool) -> bool {
        if value {
            self.one
        } else {
            self.zero
        }
    }

    pub fn insert(&mut self, value: bool) {
        if value {
            self.one = true;
        } else {
            self.zero = true;
        }
    }

    pub fn remove(&mut self, value: bool) {
        if value {
            self.one = false;
        } else {
            self.zero = false;
        }
    }

    /// Smallest remaining value. Total: for an empty domain this is `true`.
    #[must_use]
    pub const fn min(&self) -> bool {
        !self.zero
    }

    /// Largest remaining value. Total: for an empty domain this is `false`.
    #[must_use]
    pub const fn max(&self) -> bool {
        self.one
    }

    /// The assigned value, if the domain is a singleton.
    #[must_use]
    pub const fn value(&self) -> Option<bool> {
        if self.is_singleton() {
            Some(self.one)
        } else {
            None
        }
    }

    /// Remaining values, smallest first.
    pub fn iter(self) -> impl Iterator<Item = bool> {
        [false, true].into_iter().filter(move |&value| self.contains(value))
    }
}

impl fmt::Display for BinaryDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for value in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", u8::from(value))?;
            first = false;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_domain_is_universal() {
        let domain = BinaryDomain::default();
        assert!(domain.is_universal());
        assert!(!domain.is_singleton());
        assert!(!domain.is_empty());
        assert!(domain.contains(false));
        assert!(domain.contains(true));
        assert_eq!(domain.value(), None);
    }

    #[test]
    fn singleton_roundtrip() {
        for value in [false, true] {
            let domain = BinaryDomain::singleton(value);
            assert!(domain.is_singleton());
            assert_eq!(domain.value(), Some(value));
            assert_eq!(domain.min(), value);
            assert_eq!(domain.max(), value);
            assert!(domain.contains(value));
            assert!(!domain.contains(!value));
        }
    }

    #[test]
    fn remove_narrows_to_singleton() {
        let mut domain = BinaryDomain::universal();
        domain.remove(true);
        assert_eq!(domain, BinaryDomain::singleton(false));
        domain.remove(false);
        assert!(domain.is_empty());
        domain.insert(true);
        assert_eq!(domain, BinaryDomain::singleton(true));
    }

    #[test]
    fn iteration_is_smallest_first() {
        let values: Vec<bool> = BinaryDomain::universal().iter().collect();
        assert_eq!(values, vec![false, true]);
        assert_eq!(BinaryDomain::empty().iter().count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(BinaryDomain::universal().to_string(), "{0, 1}");
        assert_eq!(BinaryDomain::singleton(true).to_string(), "{1}");
        assert_eq!(BinaryDomain::singleton(false).to_string(), "{0}");
        assert_eq!(BinaryDomain::empty().to_string(), "{}");
    }
}

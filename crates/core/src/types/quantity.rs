//! Cart line quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Number of units of a product in a cart line.
///
/// A line item always holds at least one unit, so a zero quantity is
/// unrepresentable. Lines leave the cart only through removal.
///
/// ```
/// use rocketshoes_core::Quantity;
///
/// assert!(Quantity::new(0).is_none());
/// assert_eq!(Quantity::ONE.get(), 1);
/// assert!(Quantity::ONE.decrement().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Largest representable quantity.
    pub const MAX: Self = Self(NonZeroU32::MAX);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Create a quantity from a requested amount, rejecting zero, negatives,
    /// and values beyond `u32::MAX`.
    #[must_use]
    pub fn from_requested(amount: i64) -> Option<Self> {
        u32::try_from(amount).ok().and_then(Self::new)
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One more unit, or `None` at [`Quantity::MAX`].
    #[must_use]
    pub const fn checked_increment(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// One fewer unit, or `None` when that would reach zero.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_rejected() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::new(5).unwrap().get(), 5);
    }

    #[test]
    fn test_from_requested() {
        assert_eq!(Quantity::from_requested(3), Quantity::new(3));
        assert!(Quantity::from_requested(0).is_none());
        assert!(Quantity::from_requested(-1).is_none());
        assert!(Quantity::from_requested(i64::from(u32::MAX) + 1).is_none());
    }

    #[test]
    fn test_increment_and_decrement() {
        let two = Quantity::ONE.increment();
        assert_eq!(two.get(), 2);
        assert_eq!(two.decrement(), Some(Quantity::ONE));
        assert_eq!(Quantity::ONE.decrement(), None);
    }

    #[test]
    fn test_increment_at_max() {
        assert_eq!(Quantity::MAX.increment(), Quantity::MAX);
        assert_eq!(Quantity::MAX.checked_increment(), None);
        assert_eq!(Quantity::ONE.checked_increment(), Quantity::new(2));
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(
            serde_json::from_str::<Quantity>("2").unwrap(),
            Quantity::new(2).unwrap()
        );
    }
}

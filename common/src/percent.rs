//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage within `[0, 100]`.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Percent(Decimal);

impl Percent {
    /// A zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= Decimal::ZERO && val <= Decimal::ONE_HUNDRED)
            .then_some(Self(val))
    }

    /// Creates a new [`Percent`], clamping the provided value into
    /// `[0, 100]`.
    #[must_use]
    pub fn clamped(val: impl Into<Decimal>) -> Self {
        Self(val.into().clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Returns this [`Percent`] of the provided `amount`.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("percent value out of `[0, 100]` range")
    }
}

impl From<Percent> for Decimal {
    fn from(pct: Percent) -> Self {
        pct.0
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn checks_range() {
        assert!(Percent::new(decimal("0")).is_some());
        assert!(Percent::new(decimal("50.5")).is_some());
        assert!(Percent::new(decimal("100")).is_some());
        assert!(Percent::new(decimal("-0.1")).is_none());
        assert!(Percent::new(decimal("100.1")).is_none());

        assert!(Percent::from_str("25").is_ok());
        assert!(Percent::from_str("101").is_err());
        assert!(Percent::from_str("garbage").is_err());
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(Percent::clamped(decimal("120")).to_string(), "100");
        assert_eq!(Percent::clamped(decimal("-5")).to_string(), "0");
        assert_eq!(Percent::clamped(decimal("25")).to_string(), "25");
    }

    #[test]
    fn takes_percentage_of_amount() {
        let pct = |s: &str| Percent::new(decimal(s)).unwrap();

        assert_eq!(pct("10").of(decimal("5000")), decimal("500"));
        assert_eq!(pct("50").of(decimal("5000")), decimal("2500"));
        assert_eq!(pct("0").of(decimal("5000")), decimal("0"));
        assert_eq!(pct("100").of(decimal("5000")), decimal("5000"));
    }
}

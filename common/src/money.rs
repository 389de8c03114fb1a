//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{
    prelude::ToPrimitive as _, Decimal, RoundingStrategy,
};

use crate::Percent;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub fn new(amount: impl Into<Decimal>, currency: Currency) -> Self {
        Self {
            amount: amount.into(),
            currency,
        }
    }

    /// Adds the provided [`Money`] to this one.
    ///
    /// [`None`] is returned if the currencies differ.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        (self.currency == rhs.currency).then(|| Self {
            amount: self.amount + rhs.amount,
            ..self
        })
    }

    /// Returns this [`Money`] reduced by the provided [`Percent`].
    #[must_use]
    pub fn discounted_by(self, pct: Percent) -> Self {
        Self {
            amount: self.amount - pct.of(self.amount),
            ..self
        }
    }

    /// Returns this [`Money`] increased by the provided [`Percent`].
    #[must_use]
    pub fn increased_by(self, pct: Percent) -> Self {
        Self {
            amount: self.amount + pct.of(self.amount),
            ..self
        }
    }

    /// Rounds this [`Money`] to the nearest multiple of the provided `step`
    /// of whole currency units (half-way cases round away from zero).
    ///
    /// A zero `step` leaves the amount untouched.
    #[must_use]
    pub fn round_to_nearest(self, step: u32) -> Self {
        if step == 0 {
            return self;
        }
        let step = Decimal::from(step);
        Self {
            amount: (self.amount / step).round_dp_with_strategy(
                0,
                RoundingStrategy::MidpointAwayFromZero,
            ) * step,
            ..self
        }
    }
}

impl ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self {
            amount: self.amount * rhs,
            ..self
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

/// Currency of a [`Money`] amount.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Deserialize, ::serde::Serialize),
    serde(rename_all = "UPPERCASE")
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee.
    Inr,

    /// US Dollar.
    Usd,

    /// Euro.
    Eur,
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::Money;

    impl serde::Serialize for Money {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::from_str(&s).map_err(D::Error::custom)
        }
    }
}

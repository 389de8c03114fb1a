//! Cancellation policy for scheduled [`Booking`]s.

use common::{Date, Money};
use derive_more::{Display, Error};
use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::domain::{
    booking::{self, Status},
    Booking,
};

/// Cancellation policy configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// Minimal number of days between cancellation and the booking's start
    /// date for the payment to be refunded. Cancelling exactly this many
    /// days before the start is too late already.
    #[default(7)]
    pub refund_window_days: u32,
}

/// Outcome of cancelling a [`Booking`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Outcome {
    /// Indicator whether the payment is refunded.
    pub refund_eligible: bool,

    /// Refunded amount: the full `amount_paid` when eligible, zero
    /// otherwise.
    pub refund_amount: Money,
}

/// Evaluates the cancellation of the provided [`Booking`] as of `today`.
///
/// Cancellation is only possible while a [`Booking`] is still
/// [`Status::Scheduled`]: it's a one-way, terminal transition, and a live or
/// finished ad cannot be taken back.
///
/// # Errors
///
/// - [`ExecutionError::AlreadyStarted`] if the [`Booking`] is live or over.
/// - [`ExecutionError::AlreadyCancelled`] if it was cancelled before.
pub fn evaluate(
    booking: &Booking,
    today: Date,
    config: Config,
) -> Result<Outcome, Traced<ExecutionError>> {
    use ExecutionError as E;

    match booking.status(today) {
        Status::Cancelled => {
            Err(tracerr::new!(E::AlreadyCancelled(booking.id)))
        }
        Status::Active | Status::Expired => {
            Err(tracerr::new!(E::AlreadyStarted(booking.id)))
        }
        Status::Scheduled => {
            let days_until_start = today.days_until(booking.start_date);
            let refund_eligible =
                days_until_start > i64::from(config.refund_window_days);

            Ok(Outcome {
                refund_eligible,
                refund_amount: if refund_eligible {
                    booking.amount_paid
                } else {
                    Money::new(0, booking.amount_paid.currency)
                },
            })
        }
    }
}

/// Error of a cancellation [`evaluate`] execution.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Booking`] has already started (or is over) and cannot be cancelled.
    #[display("`Booking(id: {_0})` has already started")]
    AlreadyStarted(#[error(not(source))] booking::Id),

    /// [`Booking`] has already been cancelled.
    #[display("`Booking(id: {_0})` has already been cancelled")]
    AlreadyCancelled(#[error(not(source))] booking::Id),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, Money};

    use crate::domain::{
        booking::{self, Slot},
        Booking,
    };

    use super::{evaluate, Config, ExecutionError};

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    fn booking(start: &str, end: &str) -> Booking {
        Booking {
            id: booking::Id::from(1),
            slot: Slot::Left1,
            start_date: date(start).coerce(),
            end_date: date(end).coerce(),
            title: "Acme SaaS".parse().unwrap(),
            description: "Ship faster with Acme".parse().unwrap(),
            target_url: "https://acme.example".parse().unwrap(),
            image: None,
            amount_paid: Money::from_str("10000INR").unwrap(),
            payment_id: None,
            cancelled: false,
            impressions: 0,
            clicks: 0,
        }
    }

    #[test]
    fn refunds_when_cancelled_well_in_advance() {
        let b = booking("2025-01-20", "2025-01-27");

        let outcome =
            evaluate(&b, date("2025-01-01"), Config::default()).unwrap();
        assert!(outcome.refund_eligible);
        assert_eq!(
            outcome.refund_amount,
            Money::from_str("10000INR").unwrap(),
        );
    }

    #[test]
    fn refund_window_boundary_is_exclusive() {
        let b = booking("2025-01-20", "2025-01-27");
        let config = Config::default();

        // 8 days before the start: still refundable.
        assert!(evaluate(&b, date("2025-01-12"), config)
            .unwrap()
            .refund_eligible);

        // Exactly 7 days before: too late.
        let outcome = evaluate(&b, date("2025-01-13"), config).unwrap();
        assert!(!outcome.refund_eligible);
        assert_eq!(outcome.refund_amount, Money::from_str("0INR").unwrap());
    }

    #[test]
    fn started_bookings_cannot_be_cancelled() {
        let b = booking("2025-01-20", "2025-01-27");

        assert!(matches!(
            evaluate(&b, date("2025-01-20"), Config::default())
                .unwrap_err()
                .as_ref(),
            ExecutionError::AlreadyStarted(_),
        ));
        assert!(matches!(
            evaluate(&b, date("2025-02-01"), Config::default())
                .unwrap_err()
                .as_ref(),
            ExecutionError::AlreadyStarted(_),
        ));
    }

    #[test]
    fn cancellation_is_terminal() {
        let mut b = booking("2025-01-20", "2025-01-27");
        b.cancelled = true;

        assert!(matches!(
            evaluate(&b, date("2025-01-01"), Config::default())
                .unwrap_err()
                .as_ref(),
            ExecutionError::AlreadyCancelled(_),
        ));
    }
}

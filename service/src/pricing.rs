//! Dynamic pricing of advertising [`Slot`] bookings.

use std::collections::HashMap;

use common::{money::Currency, Date, Money, Percent};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::domain::{
    booking::{Slot, StartDate},
    Booking,
};

/// Engine computing [`PriceQuote`]s for ad-slot bookings.
///
/// Quoting is a pure function of its inputs: nothing is cached across calls,
/// so it's safe to re-quote on every change of duration or start date.
#[derive(Clone, Debug, Default)]
pub struct PricingEngine {
    /// [`Config`] of this [`PricingEngine`].
    config: Config,
}

impl PricingEngine {
    /// Creates a new [`PricingEngine`] with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Computes a [`PriceQuote`] for booking the provided [`Slot`] for
    /// `duration_weeks` starting on `start_date`, as of `today`.
    ///
    /// The weekly rate starts from the [`Slot`]'s base rate, gets the best
    /// applicable duration discount, then the demand surcharge derived from
    /// the provided `bookings`, then the last-minute premium, and is finally
    /// rounded to the configured whole-unit step. The total is the rounded
    /// weekly rate times the number of weeks, so it's always a whole number
    /// of currency units.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::InvalidDuration`] if `duration_weeks` is zero.
    /// - [`ExecutionError::StartDateInPast`] if `start_date` is before
    ///   `today`.
    pub fn quote(
        &self,
        slot: Slot,
        duration_weeks: u32,
        start_date: StartDate,
        bookings: &[Booking],
        today: Date,
    ) -> Result<PriceQuote, Traced<ExecutionError>> {
        use ExecutionError as E;

        if duration_weeks == 0 {
            return Err(tracerr::new!(E::InvalidDuration(duration_weeks)));
        }
        if start_date.coerce() < today {
            return Err(tracerr::new!(E::StartDateInPast {
                start: start_date,
                today,
            }));
        }

        let base_weekly_rate = self
            .config
            .slot_rates
            .get(&slot)
            .copied()
            .unwrap_or(self.config.base_rate);

        let mut rate = base_weekly_rate;
        let mut adjustments = Adjustments::default();

        // Only the highest applicable tier applies, tiers never stack.
        if let Some(tier) = self
            .config
            .duration_tiers
            .iter()
            .filter(|t| duration_weeks >= t.min_weeks)
            .max_by_key(|t| t.min_weeks)
        {
            rate = rate.discounted_by(tier.discount);
            adjustments.duration = Some(format!("{}% off", tier.discount));
        }

        let demand = future_bookings(slot, bookings, today);
        if let Some(tier) = self
            .config
            .demand_tiers
            .iter()
            .filter(|t| demand >= t.min_bookings)
            .max_by_key(|t| t.min_bookings)
        {
            rate = rate.increased_by(tier.surcharge);
            adjustments.demand =
                Some(format!("{}% surcharge", tier.surcharge));
        }

        let days_until = today.days_until(start_date);
        if demand > 0 && days_until <= i64::from(self.config.urgency.within_days)
        {
            rate = rate.increased_by(self.config.urgency.surcharge);
            adjustments.urgency = Some(format!(
                "{}% last-minute premium",
                self.config.urgency.surcharge,
            ));
        }

        let final_weekly_rate = rate.round_to_nearest(self.config.rate_rounding);
        let total_price = final_weekly_rate * Decimal::from(duration_weeks);

        Ok(PriceQuote {
            slot,
            duration_weeks,
            start_date,
            base_weekly_rate,
            final_weekly_rate,
            adjustments,
            total_price,
        })
    }
}

/// Counts the non-cancelled [`Booking`]s of the provided [`Slot`] that
/// haven't ended yet, i.e. the demand for it.
fn future_bookings(slot: Slot, bookings: &[Booking], today: Date) -> usize {
    bookings
        .iter()
        .filter(|b| b.slot == slot && !b.cancelled && b.occupies().1 >= today)
        .count()
}

/// Computed price of a prospective ad-slot booking.
///
/// Never persisted: recomputed fresh for every distinct
/// `(slot, duration, start date)` triple.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PriceQuote {
    /// [`Slot`] the quote is for.
    #[serde(rename = "slot_id")]
    pub slot: Slot,

    /// Requested duration, in weeks.
    pub duration_weeks: u32,

    /// Requested first day of the booking.
    pub start_date: StartDate,

    /// Configured weekly rate of the [`Slot`], before adjustments.
    pub base_weekly_rate: Money,

    /// Weekly rate used for billing, after all adjustments and rounding.
    pub final_weekly_rate: Money,

    /// Human-readable descriptions of the adjustments applied.
    pub adjustments: Adjustments,

    /// Total price of the booking: `final_weekly_rate × duration_weeks`.
    pub total_price: Money,
}

/// Human-readable descriptions of the rate adjustments applied to a
/// [`PriceQuote`]. An absent entry means no adjustment of that kind.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Adjustments {
    /// Duration discount effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Demand surcharge effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<String>,

    /// Last-minute premium effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
}

/// Error of a [`PricingEngine::quote`] execution.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ExecutionError {
    /// Requested duration is not a positive number of weeks.
    #[display("duration of `{_0}` weeks is not positive")]
    InvalidDuration(#[error(not(source))] u32),

    /// Requested start date is already in the past.
    #[display("start date `{start}` is before today (`{today}`)")]
    StartDateInPast {
        /// Requested start date.
        start: StartDate,

        /// Current date the quote was requested on.
        today: Date,
    },
}

/// [`PricingEngine`] configuration.
///
/// Defaults reproduce the reference marketplace behavior: ₹5000/week base
/// rate, 10%/20% discounts at 4/8 weeks, 20%/50% surcharges at 3/6 future
/// bookings, 25% last-minute premium within 2 days, rates rounded to ₹100.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// Weekly rate of a [`Slot`] not mentioned in `slot_rates`.
    #[default(Money::new(5000, Currency::Inr))]
    pub base_rate: Money,

    /// Per-[`Slot`] overrides of `base_rate`.
    pub slot_rates: HashMap<Slot, Money>,

    /// Duration discount tiers. Inclusive lower bounds, non-stacking.
    #[default(vec![
        DurationTier { min_weeks: 4, discount: Percent::clamped(10) },
        DurationTier { min_weeks: 8, discount: Percent::clamped(20) },
    ])]
    pub duration_tiers: Vec<DurationTier>,

    /// Demand surcharge tiers. Inclusive lower bounds, non-stacking.
    #[default(vec![
        DemandTier { min_bookings: 3, surcharge: Percent::clamped(20) },
        DemandTier { min_bookings: 6, surcharge: Percent::clamped(50) },
    ])]
    pub demand_tiers: Vec<DemandTier>,

    /// Last-minute premium rule.
    pub urgency: UrgencyRule,

    /// Whole-unit step the final weekly rate is rounded to. Zero disables
    /// rounding.
    #[default(100)]
    pub rate_rounding: u32,
}

/// Discount tier applied when a booking lasts at least `min_weeks`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct DurationTier {
    /// Minimal duration (in weeks) for this tier to apply, inclusive.
    pub min_weeks: u32,

    /// Discount off the weekly rate.
    pub discount: Percent,
}

/// Surcharge tier applied when a [`Slot`] has at least `min_bookings` future
/// bookings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct DemandTier {
    /// Minimal number of future bookings for this tier to apply, inclusive.
    pub min_bookings: usize,

    /// Surcharge on the weekly rate.
    pub surcharge: Percent,
}

/// Premium applied to bookings made shortly before their start date, when
/// the [`Slot`] is in any demand at all.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct UrgencyRule {
    /// Maximal number of days until the start date for the premium to
    /// apply, inclusive.
    #[default(2)]
    pub within_days: u32,

    /// Premium on the weekly rate.
    #[default(Percent::clamped(25))]
    pub surcharge: Percent,
}

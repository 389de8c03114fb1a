//! Availability resolution for advertising [`Slot`]s.

use std::collections::BTreeMap;

use common::{Date, Percent};
use derive_more::{Display, Error};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use tracerr::Traced;
use tracing as log;

use crate::domain::{
    booking::{self, Slot},
    Booking,
};

/// Returns the earliest day on/after `today` at which the provided [`Slot`]
/// is free of any non-cancelled [`Booking`].
///
/// Bookings of other [`Slot`]s and cancelled ones are ignored. A [`Slot`]
/// with no bookings at all is available `today`. Occupied intervals are
/// inclusive on both bounds, so a booking ending `today` frees the slot up
/// tomorrow.
#[must_use]
pub fn next_available(slot: Slot, bookings: &[Booking], today: Date) -> Date {
    let mut cursor = today;
    for (start, end) in occupied_intervals(slot, bookings, today) {
        if start > cursor {
            break;
        }
        if cursor <= end {
            cursor = end.next_day();
        }
    }
    cursor
}

/// Checks that the `[start, end]` window can be booked for the provided
/// [`Slot`] without intersecting any existing non-cancelled [`Booking`].
///
/// # Errors
///
/// - [`OverlapError::InvertedWindow`] if the window ends before it starts.
/// - [`OverlapError::Occupied`] if the window intersects an existing
///   [`Booking`] for the [`Slot`].
pub fn ensure_bookable(
    slot: Slot,
    start: Date,
    end: Date,
    bookings: &[Booking],
) -> Result<(), Traced<OverlapError>> {
    use OverlapError as E;

    if end < start {
        return Err(tracerr::new!(E::InvertedWindow { start, end }));
    }

    for booked in bookings.iter().filter(|b| b.slot == slot && !b.cancelled) {
        let (booked_start, booked_end) = booked.occupies();
        if booked_start <= end && start <= booked_end {
            return Err(tracerr::new!(E::Occupied {
                start,
                end,
                id: booked.id,
            }));
        }
    }

    Ok(())
}

/// Error of validating a new reservation window against existing
/// [`Booking`]s.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum OverlapError {
    /// Window ends before it starts.
    #[display("window `[{start}, {end}]` ends before it starts")]
    InvertedWindow {
        /// First day of the rejected window.
        start: Date,

        /// Last day of the rejected window.
        end: Date,
    },

    /// Window intersects an existing [`Booking`].
    #[display("window `[{start}, {end}]` intersects `Booking(id: {id})`")]
    Occupied {
        /// First day of the rejected window.
        start: Date,

        /// Last day of the rejected window.
        end: Date,

        /// ID of the intersecting [`Booking`].
        id: booking::Id,
    },
}

/// Availability of a single [`Slot`] over a bounded horizon.
#[derive(Clone, Debug)]
pub struct SlotCalendar {
    /// Days within the horizon occupied by some [`Booking`].
    pub booked_dates: Vec<Date>,

    /// Earliest free day within the horizon, if any.
    pub next_available: Option<Date>,

    /// Share of the horizon that is still free.
    pub availability_percent: Percent,
}

/// Builds the availability calendar of every [`Slot`] for the next
/// `horizon_days` days starting at `today`.
#[must_use]
pub fn calendar(
    bookings: &[Booking],
    today: Date,
    horizon_days: u32,
) -> BTreeMap<Slot, SlotCalendar> {
    use strum::IntoEnumIterator as _;

    Slot::iter()
        .map(|slot| {
            let intervals = occupied_intervals(slot, bookings, today);
            let booked_dates = (0..horizon_days)
                .map(|i| today.plus_days(i))
                .filter(|day| {
                    intervals
                        .iter()
                        .any(|(start, end)| start <= day && day <= end)
                })
                .collect::<Vec<_>>();

            let next = next_available(slot, bookings, today);
            let next_available =
                (next < today.plus_days(horizon_days)).then_some(next);

            let booked = u32::try_from(booked_dates.len())
                .unwrap_or(horizon_days)
                .min(horizon_days);
            let availability_percent = Percent::clamped(
                Decimal::from(horizon_days - booked)
                    / Decimal::from(horizon_days.max(1))
                    * Decimal::ONE_HUNDRED,
            );

            (
                slot,
                SlotCalendar {
                    booked_dates,
                    next_available,
                    availability_percent,
                },
            )
        })
        .collect()
}

/// Collects the merged, sorted intervals of days the provided [`Slot`] is
/// occupied on/after `today`.
///
/// Intervals already over before `today` are irrelevant to availability and
/// skipped. Overlapping bookings must not occur under normal operation
/// (creation rejects them, see [`ensure_bookable`]), yet are merged
/// defensively here.
fn occupied_intervals(
    slot: Slot,
    bookings: &[Booking],
    today: Date,
) -> Vec<(Date, Date)> {
    let mut merged: Vec<(Date, Date)> = Vec::new();
    for (start, end) in bookings
        .iter()
        .filter(|b| b.slot == slot && !b.cancelled)
        .map(Booking::occupies)
        .filter(|(start, end)| start <= end && *end >= today)
        .sorted()
    {
        if let Some((_, last_end)) = merged.last_mut() {
            if start <= last_end.next_day() {
                if start <= *last_end {
                    log::warn!(
                        "overlapping bookings for `{slot}` around {start}",
                    );
                }
                if end > *last_end {
                    *last_end = end;
                }
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

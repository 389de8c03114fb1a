//! Per-owner ads dashboard breakdown.

use std::cmp;

use common::{money::Currency, Date, Money};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use tracing as log;

use crate::domain::{booking::Status, Booking};

/// A user's [`Booking`]s partitioned by [`Status`], with spend and
/// engagement totals.
#[derive(Clone, Debug)]
pub struct Breakdown {
    /// Currently live [`Booking`]s.
    pub active: Vec<Entry>,

    /// [`Booking`]s that haven't started yet.
    pub scheduled: Vec<Entry>,

    /// [`Booking`]s that are over, cancelled ones included.
    pub expired: Vec<Entry>,

    /// Total amount spent across all the [`Booking`]s.
    pub total_spent: Money,

    /// Total clicks across all the [`Booking`]s' ads.
    pub total_clicks: u64,

    /// Total impressions across all the [`Booking`]s' ads.
    pub total_impressions: u64,
}

/// Single [`Booking`] annotated with its derived analytics.
#[derive(Clone, Debug)]
pub struct Entry {
    /// The [`Booking`] itself.
    pub booking: Booking,

    /// [`Status`] of the [`Booking`] as of the report's day.
    pub status: Status,

    /// Click-through rate of the ad, rounded to 2 decimal places.
    pub ctr: Decimal,

    /// Days until the ad expires (`0` unless live).
    pub days_remaining: i64,

    /// Days until the ad goes live, for scheduled [`Booking`]s only.
    pub starts_in_days: Option<i64>,
}

impl Breakdown {
    /// Builds a [`Breakdown`] of the provided [`Booking`]s as of `today`.
    ///
    /// Entries are ordered by start date, most recent first. All bookings
    /// are expected to be billed in a single currency: ones billed in a
    /// different currency than the first booking are excluded from
    /// `total_spent` (`currency` is the fallback for an empty list).
    #[must_use]
    pub fn of(bookings: &[Booking], today: Date, currency: Currency) -> Self {
        let mut this = Self {
            active: Vec::new(),
            scheduled: Vec::new(),
            expired: Vec::new(),
            total_spent: Money::new(
                0,
                bookings.first().map_or(currency, |b| b.amount_paid.currency),
            ),
            total_clicks: 0,
            total_impressions: 0,
        };

        for booking in bookings
            .iter()
            .sorted_by_key(|b| cmp::Reverse(b.start_date))
            .cloned()
        {
            this.total_clicks += booking.clicks;
            this.total_impressions += booking.impressions;
            match this.total_spent.checked_add(booking.amount_paid) {
                Some(sum) => this.total_spent = sum,
                None => log::warn!(
                    "`Booking(id: {})` is billed in a different currency",
                    booking.id,
                ),
            }

            let status = booking.status(today);
            let entry = Entry {
                ctr: booking.ctr().round_dp(2),
                days_remaining: booking.days_remaining(today),
                starts_in_days: (status == Status::Scheduled)
                    .then(|| today.days_until(booking.start_date)),
                status,
                booking,
            };
            match status {
                Status::Active => this.active.push(entry),
                Status::Scheduled => this.scheduled.push(entry),
                Status::Expired | Status::Cancelled => {
                    this.expired.push(entry);
                }
            }
        }

        this
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Date, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        booking::{self, Slot, Status},
        Booking,
    };

    use super::Breakdown;

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    fn booking(id: i64, start: &str, end: &str) -> Booking {
        Booking {
            id: booking::Id::from(id),
            slot: Slot::Left1,
            start_date: date(start).coerce(),
            end_date: date(end).coerce(),
            title: "Acme SaaS".parse().unwrap(),
            description: "Ship faster with Acme".parse().unwrap(),
            target_url: "https://acme.example".parse().unwrap(),
            image: None,
            amount_paid: Money::from_str("5000INR").unwrap(),
            payment_id: None,
            cancelled: false,
            impressions: 0,
            clicks: 0,
        }
    }

    #[test]
    fn partitions_bookings_by_status() {
        let today = date("2025-01-15");
        let mut cancelled = booking(4, "2025-02-10", "2025-02-17");
        cancelled.cancelled = true;
        let bookings = [
            booking(1, "2025-01-10", "2025-01-17"), // live
            booking(2, "2025-02-01", "2025-02-08"), // scheduled
            booking(3, "2024-12-01", "2024-12-08"), // over
            cancelled,
        ];

        let report = Breakdown::of(&bookings, today, Currency::Inr);

        assert_eq!(report.active.len(), 1);
        assert_eq!(report.scheduled.len(), 1);
        assert_eq!(report.expired.len(), 2);

        assert_eq!(report.active[0].booking.id, booking::Id::from(1));
        assert_eq!(report.active[0].days_remaining, 2);
        assert_eq!(report.active[0].starts_in_days, None);

        assert_eq!(report.scheduled[0].status, Status::Scheduled);
        assert_eq!(report.scheduled[0].starts_in_days, Some(17));

        assert_eq!(
            report.total_spent,
            Money::from_str("20000INR").unwrap(),
        );
    }

    #[test]
    fn orders_entries_most_recent_first() {
        let today = date("2025-03-01");
        let bookings = [
            booking(1, "2024-12-01", "2024-12-08"),
            booking(2, "2025-02-01", "2025-02-08"),
            booking(3, "2025-01-01", "2025-01-08"),
        ];

        let report = Breakdown::of(&bookings, today, Currency::Inr);
        let ids = report
            .expired
            .iter()
            .map(|e| e.booking.id)
            .collect::<Vec<_>>();

        assert_eq!(
            ids,
            [2, 3, 1].map(booking::Id::from).to_vec(),
        );
    }

    #[test]
    fn totals_engagement_and_rounds_ctr() {
        let today = date("2025-01-15");
        let mut a = booking(1, "2025-01-10", "2025-01-17");
        a.impressions = 300;
        a.clicks = 4;
        let mut b = booking(2, "2025-02-01", "2025-02-08");
        b.impressions = 100;
        b.clicks = 1;

        let report = Breakdown::of(&[a, b], today, Currency::Inr);

        assert_eq!(report.total_clicks, 5);
        assert_eq!(report.total_impressions, 400);
        // 4/300 × 100 = 1.333…% → 1.33%.
        assert_eq!(report.active[0].ctr, Decimal::new(133, 2));
    }

    #[test]
    fn empty_list_produces_an_empty_report() {
        let report = Breakdown::of(&[], date("2025-01-01"), Currency::Inr);

        assert!(report.active.is_empty());
        assert!(report.scheduled.is_empty());
        assert!(report.expired.is_empty());
        assert_eq!(report.total_spent, Money::new(0, Currency::Inr));
        assert_eq!(report.total_clicks, 0);
    }
}

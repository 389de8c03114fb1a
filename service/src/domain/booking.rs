//! [`Booking`] definitions.

use std::str::FromStr;

use common::{unit, Date, DateOf, Money};
use derive_more::{AsRef, Display, From, FromStr as FromStrDerive, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reservation of an advertising [`Slot`] for a calendar window.
///
/// Both `start_date` and `end_date` are inclusive: a booking spanning
/// `[2025-01-01, 2025-01-08]` occupies eight days and the slot frees up on
/// `2025-01-09`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Booking {
    /// ID of this [`Booking`], assigned by the backend on creation.
    pub id: Id,

    /// [`Slot`] this [`Booking`] occupies.
    #[serde(rename = "slot_id")]
    pub slot: Slot,

    /// First day this [`Booking`] occupies its [`Slot`].
    pub start_date: StartDate,

    /// Last day this [`Booking`] occupies its [`Slot`].
    pub end_date: EndDate,

    /// [`Title`] displayed in the ad.
    pub title: Title,

    /// [`Description`] displayed in the ad.
    pub description: Description,

    /// URL the ad links to.
    pub target_url: TargetUrl,

    /// Creative image of the ad, if any.
    #[serde(default)]
    pub image: Option<ImageUrl>,

    /// Amount paid for this [`Booking`], fixed at booking time.
    pub amount_paid: Money,

    /// Payment transaction ID, if any.
    #[serde(default)]
    pub payment_id: Option<PaymentId>,

    /// Indicator whether this [`Booking`] was explicitly cancelled.
    ///
    /// Cancellation is terminal and only ever happens to a [`Booking`] that
    /// hasn't started yet (see [`crate::cancellation`]).
    #[serde(default)]
    pub cancelled: bool,

    /// How many times the ad was shown.
    #[serde(default)]
    pub impressions: u64,

    /// How many times the ad was clicked.
    #[serde(default)]
    pub clicks: u64,
}

impl Booking {
    /// Returns the [`Status`] of this [`Booking`] as of the provided day.
    ///
    /// The status is always derived, never stored: only the explicit
    /// `cancelled` flag is persisted, and it wins over the date-derived
    /// states.
    #[must_use]
    pub fn status(&self, today: Date) -> Status {
        if self.cancelled {
            Status::Cancelled
        } else if today < self.start_date.coerce() {
            Status::Scheduled
        } else if today <= self.end_date.coerce() {
            Status::Active
        } else {
            Status::Expired
        }
    }

    /// Indicates whether the ad of this [`Booking`] is live as of the
    /// provided day.
    #[must_use]
    pub fn is_live(&self, today: Date) -> bool {
        self.status(today) == Status::Active
    }

    /// Returns the number of days until this [`Booking`] expires, or `0` if
    /// it's not live.
    #[must_use]
    pub fn days_remaining(&self, today: Date) -> i64 {
        if self.is_live(today) {
            today.days_until(self.end_date)
        } else {
            0
        }
    }

    /// Returns the click-through rate of this [`Booking`]'s ad as a
    /// percentage value, or `0` if the ad has no impressions yet.
    #[must_use]
    pub fn ctr(&self) -> Decimal {
        if self.impressions == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(self.clicks) / Decimal::from(self.impressions)
                * Decimal::ONE_HUNDRED
        }
    }

    /// Returns the inclusive interval of days this [`Booking`] occupies.
    #[must_use]
    pub fn occupies(&self) -> (Date, Date) {
        (self.start_date.coerce(), self.end_date.coerce())
    }
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStrDerive,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i64);

/// First day of a [`Booking`] (inclusive).
pub type StartDate = DateOf<unit::Start>;

/// Last day of a [`Booking`] (inclusive).
pub type EndDate = DateOf<unit::End>;

/// Fixed advertising position in one of the leaderboard sidebars.
///
/// A [`Slot`] holds at most one live [`Booking`] at a time. Identifiers
/// outside this closed set are unrepresentable: parsing them fails at the
/// boundary.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Slot {
    /// First left sidebar position.
    #[serde(rename = "left_1")]
    #[strum(serialize = "left_1")]
    Left1,

    /// Second left sidebar position.
    #[serde(rename = "left_2")]
    #[strum(serialize = "left_2")]
    Left2,

    /// Third left sidebar position.
    #[serde(rename = "left_3")]
    #[strum(serialize = "left_3")]
    Left3,

    /// Fourth left sidebar position.
    #[serde(rename = "left_4")]
    #[strum(serialize = "left_4")]
    Left4,

    /// Fifth left sidebar position.
    #[serde(rename = "left_5")]
    #[strum(serialize = "left_5")]
    Left5,

    /// First right sidebar position.
    #[serde(rename = "right_1")]
    #[strum(serialize = "right_1")]
    Right1,

    /// Second right sidebar position.
    #[serde(rename = "right_2")]
    #[strum(serialize = "right_2")]
    Right2,

    /// Third right sidebar position.
    #[serde(rename = "right_3")]
    #[strum(serialize = "right_3")]
    Right3,

    /// Fourth right sidebar position.
    #[serde(rename = "right_4")]
    #[strum(serialize = "right_4")]
    Right4,

    /// Fifth right sidebar position.
    #[serde(rename = "right_5")]
    #[strum(serialize = "right_5")]
    Right5,
}

/// Status of a [`Booking`], derived from its dates relative to "now".
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// [`Booking`] hasn't started yet.
    Scheduled,

    /// [`Booking`]'s ad is currently live.
    Active,

    /// [`Booking`]'s window has passed.
    Expired,

    /// [`Booking`] was explicitly cancelled before going live.
    Cancelled,
}

/// Title displayed in a [`Booking`]'s ad.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 100
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

impl TryFrom<String> for Title {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description displayed in a [`Booking`]'s ad.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 200
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

impl TryFrom<String> for Description {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// URL a [`Booking`]'s ad links to.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Creates a new [`TargetUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`TargetUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        (url.starts_with("http://") || url.starts_with("https://"))
            && url.len() <= 500
    }
}

impl FromStr for TargetUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TargetUrl`")
    }
}

impl TryFrom<String> for TargetUrl {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `TargetUrl`")
    }
}

/// URL (or backend-relative path) of a [`Booking`]'s ad creative image.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        !url.is_empty() && url.trim() == url && url.len() <= 500
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Payment transaction ID of a [`Booking`], opaque to this layer.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentId(String);

impl PaymentId {
    /// Creates a new [`PaymentId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`PaymentId`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty() && id.len() <= 100
    }
}

impl FromStr for PaymentId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PaymentId`")
    }
}

impl TryFrom<String> for PaymentId {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `PaymentId`")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, Money};
    use rust_decimal::Decimal;

    use super::{Booking, Id, Slot, Status, Title};

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    fn booking(slot: Slot, start: &str, end: &str) -> Booking {
        Booking {
            id: Id::from(1),
            slot,
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
    fn status_is_derived_from_dates() {
        let b = booking(Slot::Left1, "2025-01-10", "2025-01-17");

        assert_eq!(b.status(date("2025-01-09")), Status::Scheduled);
        assert_eq!(b.status(date("2025-01-10")), Status::Active);
        assert_eq!(b.status(date("2025-01-17")), Status::Active);
        assert_eq!(b.status(date("2025-01-18")), Status::Expired);
    }

    #[test]
    fn cancelled_flag_wins_over_dates() {
        let mut b = booking(Slot::Left1, "2025-01-10", "2025-01-17");
        b.cancelled = true;

        assert_eq!(b.status(date("2025-01-09")), Status::Cancelled);
        assert_eq!(b.status(date("2025-01-12")), Status::Cancelled);
        assert_eq!(b.status(date("2025-02-01")), Status::Cancelled);
        assert!(!b.is_live(date("2025-01-12")));
    }

    #[test]
    fn days_remaining_counts_only_live_days() {
        let b = booking(Slot::Right3, "2025-01-10", "2025-01-17");

        assert_eq!(b.days_remaining(date("2025-01-10")), 7);
        assert_eq!(b.days_remaining(date("2025-01-17")), 0);
        assert_eq!(b.days_remaining(date("2025-01-09")), 0);
        assert_eq!(b.days_remaining(date("2025-01-20")), 0);
    }

    #[test]
    fn ctr_handles_zero_impressions() {
        let mut b = booking(Slot::Left2, "2025-01-01", "2025-01-08");
        assert_eq!(b.ctr(), Decimal::ZERO);

        b.impressions = 200;
        b.clicks = 3;
        assert_eq!(b.ctr(), Decimal::new(15, 1)); // 1.5%
    }

    #[test]
    fn slot_identifiers_form_a_closed_set() {
        assert_eq!(Slot::from_str("left_1").unwrap(), Slot::Left1);
        assert_eq!(Slot::from_str("right_5").unwrap(), Slot::Right5);
        assert_eq!(Slot::Left4.to_string(), "left_4");

        assert!(Slot::from_str("left_6").is_err());
        assert!(Slot::from_str("center_1").is_err());
        assert!(Slot::from_str("").is_err());
    }

    #[test]
    fn serializes_with_backend_wire_names() {
        let b = booking(Slot::Left1, "2025-01-01", "2025-01-08");
        let json = serde_json::to_value(&b).unwrap();

        assert_eq!(json["slot_id"], "left_1");
        assert_eq!(json["start_date"], "2025-01-01");
        assert_eq!(json["end_date"], "2025-01-08");
        assert_eq!(json["amount_paid"], "10000INR");

        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn id_parses_from_string() {
        assert_eq!("42".parse::<Id>().unwrap(), Id::from(42));
        assert!("not a number".parse::<Id>().is_err());
    }

    #[test]
    fn title_validation() {
        assert!(Title::new("Acme").is_some());
        assert!(Title::new("").is_none());
        assert!(Title::new(" padded ").is_none());
        assert!(Title::new("x".repeat(101)).is_none());
    }
}

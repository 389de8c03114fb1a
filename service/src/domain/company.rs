//! [`Company`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, From, FromStr as FromStrDerive, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::Username;

/// Company (or creator) ranked on the leaderboard by verified monthly
/// recurring revenue.
///
/// A [`Company`] is normalized once at the API boundary: absent fields are
/// [`None`] here, and no downstream code applies ad-hoc fallback chains.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Company {
    /// ID of this [`Company`], assigned by the backend on creation.
    pub id: Id,

    /// [`Name`] of this [`Company`].
    pub name: Name,

    /// [`FounderName`] of this [`Company`], if disclosed.
    #[serde(default)]
    pub founder_name: Option<FounderName>,

    /// [`Username`] of the principal who added this [`Company`], if known.
    #[serde(default)]
    pub added_by_username: Option<Username>,

    /// Verified monthly revenue of this [`Company`], in whole currency
    /// units.
    #[serde(default)]
    pub monthly_revenue: Decimal,

    /// Month-over-month revenue growth of this [`Company`], as a percentage
    /// value (may be negative).
    #[serde(default)]
    pub mom_growth: Decimal,

    /// Estimated MRR of this [`Company`], if computed by the backend.
    #[serde(default)]
    pub estimated_mrr: Option<Decimal>,

    /// Indicator whether the revenue figures were verified against a
    /// payment-processor integration.
    #[serde(default)]
    pub is_verified: bool,

    /// Indicator whether this [`Company`] hides its name and founder on the
    /// leaderboard.
    #[serde(default)]
    pub is_anonymous: bool,

    /// Indicator whether this [`Company`] appears on the public leaderboard.
    #[serde(default = "yes")]
    pub show_in_leaderboard: bool,

    /// Business [`Category`] of this [`Company`].
    pub category: Category,
}

/// Default for [`Company::show_in_leaderboard`].
fn yes() -> bool {
    true
}

/// ID of a [`Company`].
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

/// Name of a [`Company`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Name of a [`Company`]'s founder.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct FounderName(String);

impl FounderName {
    /// Creates a new [`FounderName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FounderName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for FounderName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FounderName`")
    }
}

impl TryFrom<String> for FounderName {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `FounderName`")
    }
}

/// Business category of a [`Company`].
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
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// Software-as-a-Service business.
    Saas,

    /// Gaming YouTube channel.
    YoutuberGamer,

    /// Content-creation YouTube channel.
    YoutuberContentCreator,

    /// Educational YouTube channel.
    YoutuberEducational,

    /// Instagram influencer.
    InfluencerInstagram,

    /// Facebook influencer.
    InfluencerFacebook,

    /// Twitter/X influencer.
    InfluencerTwitter,

    /// Indian startup.
    IndianStartup,

    /// Film or entertainment business.
    FilmEntertainment,

    /// Business operating in India.
    BusinessIndia,

    /// E-commerce business.
    Ecommerce,

    /// Consulting business.
    Consulting,

    /// Agency.
    Agency,

    /// Anything else.
    Other,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Category, Company, Id};

    #[test]
    fn category_wire_names_are_snake_case() {
        assert_eq!(Category::Saas.to_string(), "saas");
        assert_eq!(
            Category::YoutuberContentCreator.to_string(),
            "youtuber_content_creator",
        );
        assert_eq!(
            Category::from_str("influencer_twitter").unwrap(),
            Category::InfluencerTwitter,
        );
        assert!(Category::from_str("blockchain").is_err());
    }

    #[test]
    fn id_parses_from_string() {
        assert_eq!("7".parse::<Id>().unwrap(), Id::from(7));
        assert!("".parse::<Id>().is_err());
    }

    #[test]
    fn deserializes_sparse_backend_records() {
        let company: Company = serde_json::from_str(
            r#"{"id": 7, "name": "Acme", "category": "saas"}"#,
        )
        .unwrap();

        assert_eq!(company.id, Id::from(7));
        assert_eq!(company.founder_name, None);
        assert_eq!(company.added_by_username, None);
        assert!(!company.is_anonymous);
        assert!(company.show_in_leaderboard);
    }
}

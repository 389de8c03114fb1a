//! Pure business core of the TrustMRR advertising marketplace: ad-slot
//! pricing, availability resolution, ownership evaluation, cancellation
//! policy and the per-owner ads dashboard breakdown.
//!
//! Every operation here is a synchronous function of its arguments: all
//! persisted state ([`Booking`]s, [`Company`] records, revenue figures)
//! lives in an external backend, and callers hand the already-fetched
//! records in.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod availability;
pub mod cancellation;
pub mod domain;
pub mod ownership;
pub mod pricing;
pub mod report;

use serde::Deserialize;

#[cfg(doc)]
use crate::domain::{Booking, Company};

pub use self::{
    ownership::is_owner,
    pricing::{PriceQuote, PricingEngine},
    report::Breakdown,
};

/// Service-wide configuration, normally supplied by the (external)
/// application layer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// [`pricing`] configuration.
    pub pricing: pricing::Config,

    /// [`cancellation`] configuration.
    pub cancellation: cancellation::Config,
}

//! Domain definitions.

pub mod booking;
pub mod company;
pub mod user;

pub use self::{booking::Booking, company::Company};

//! Ownership evaluation over [`Company`] records.

use crate::domain::{user::Username, Company};

/// Indicates whether the provided `principal` owns the provided [`Company`].
///
/// The owner is exactly the principal whose username equals the company's
/// `added_by_username`, or, failing that, its `founder_name`. An
/// unauthenticated principal ([`None`]) owns nothing.
///
/// The check is evaluated fresh against the record's current field values on
/// every call, so it must be re-run on the fresh record after any mutation:
/// an edit can change `founder_name` and flip the outcome.
#[must_use]
pub fn is_owner(principal: Option<&Username>, company: &Company) -> bool {
    let Some(principal) = principal else {
        return false;
    };

    if company
        .added_by_username
        .as_ref()
        .is_some_and(|added_by| added_by == principal)
    {
        return true;
    }

    company.founder_name.as_ref().is_some_and(|founder| {
        AsRef::<str>::as_ref(founder) == AsRef::<str>::as_ref(principal)
    })
}

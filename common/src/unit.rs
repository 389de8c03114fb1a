//! Marker types.

/// Marker type describing the start of an interval.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing the end of an interval.
#[derive(Clone, Copy, Debug)]
pub struct End;

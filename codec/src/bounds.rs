//! Checked narrowing of counts and sizes into on-disk field widths.

use thiserror::Error;

use crate::error::{field_path, Location};

/// A value does not fit the width of its on-disk field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} = {value} does not fit in {target}", field_path(.location, .field))]
pub struct BoundsError {
    pub location: Location,
    pub field: &'static str,
    pub value: u64,
    pub target: &'static str,
}

/// Narrows a length to a `u32` field.
pub fn u32_from_usize(
    value: usize,
    location: Location,
    field: &'static str,
) -> Result<u32, BoundsError> {
    u32::try_from(value).map_err(|_| BoundsError {
        location,
        field,
        value: value as u64,
        target: "u32",
    })
}

/// Narrows a 64-bit size to a `u32` field.
pub fn u32_from_u64(value: u64, location: Location, field: &'static str) -> Result<u32, BoundsError> {
    u32::try_from(value).map_err(|_| BoundsError {
        location,
        field,
        value,
        target: "u32",
    })
}

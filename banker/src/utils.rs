pub use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use log::{debug, trace, warn};

pub use crate::{Engine,
    config::Config,
    error::*,
    safety::{Safety, ScanOrder},
    state::{Snapshot, State},
};

/// A count of interchangeable units of one resource type.
///
/// Counts are never negative in a committed [`State`]. The type is signed
/// anyway: callers hand us whatever they parsed, and a negative entry must
/// reach the validation code (and be rejected there) instead of silently
/// wrapping around at the parsing boundary.
pub type Units = i64;

/// Processes are identified by their row in every matrix, `0..P`.
pub type ProcessId = usize;

/// Resource types are identified by their column, `0..R`.
pub type ResourceId = usize;

/// One entry per resource type.
pub type Vector = Vec<Units>;

/// One [`Vector`] per process.
pub type Matrix = Vec<Vector>;

/// `true` if every entry of `lhs` is at most the matching entry of `rhs`.
#[inline]
pub fn fits(lhs: &[Units], rhs: &[Units]) -> bool {
    lhs.iter()
        .zip(rhs)
        .all(|(l, r)| l <= r)
}

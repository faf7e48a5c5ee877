//! Placement cycling.
//!
//! Repeating a command walks the window through its candidate list: the
//! candidate nearest the window's current frame is taken as "where the
//! window is now", and the one after it (wrapping around) is chosen.

use crate::geometry::{PixelRect, Rect};
use crate::placement::PlacementError;

/// The outcome of [`select`], with the data needed to explain it in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index of the candidate closest to the current frame.
    pub current: usize,
    /// Index of the chosen candidate, `(current + 1) % len`.
    pub next: usize,
    /// Distance from the current frame to every candidate, in list order.
    pub distances: Vec<i64>,
}

/// L1 distance between `frame` and `candidate` over `(x, y, width, height)`.
pub fn distance(frame: &Rect, candidate: &PixelRect) -> i64 {
    let d = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs();
    d(frame.x, candidate.x1)
        + d(frame.y, candidate.y1)
        + d(frame.width, candidate.w)
        + d(frame.height, candidate.h)
}

/// Choose the candidate following the one nearest `frame`.
///
/// Ties go to the earliest candidate.  An empty list means the command has
/// no placement under the current configuration.
pub fn select(frame: &Rect, candidates: &[PixelRect]) -> Result<Selection, PlacementError> {
    let distances: Vec<i64> = candidates.iter().map(|c| distance(frame, c)).collect();
    let current = distances
        .iter()
        .enumerate()
        .min_by_key(|&(i, &d)| (d, i))
        .map(|(i, _)| i)
        .ok_or(PlacementError::NoCandidates)?;
    Ok(Selection {
        current,
        next: (current + 1) % candidates.len(),
        distances,
    })
}

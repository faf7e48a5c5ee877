//! The placement pipeline.
//!
//! [`plan`] is a pure function of the window frame, the work area, the
//! anchor and the grid settings: candidates from
//! [`generate`](crate::grid::generate) are pixelized with
//! [`to_pixels`](crate::geometry::to_pixels) and handed to
//! [`select`](crate::cycle::select).  The non-grid commands have their own
//! small helpers here as well.

use crate::command::{Anchor, MonitorInfo};
use crate::config::GridConfig;
use crate::cycle::select;
use crate::geometry::{screen_bounds, to_pixels, translate, NormalizedRect, PixelRect, Rect};
use crate::grid::generate;
use log::debug;

/// Errors from computing a placement.
///
/// All of them leave the window where it is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// Grid settings the pipeline cannot work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// No grid position satisfies the command under the current settings.
    #[error("no candidate positions under the current configuration")]
    NoCandidates,
    /// The name does not match any command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

/// A computed placement plus the diagnostics behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Where the window should go.
    pub target: PixelRect,
    /// Index of `target` in `candidates`.
    pub index: usize,
    /// Every candidate for the command, in cycle order.
    pub candidates: Vec<PixelRect>,
    /// Distance from the window frame to each candidate.
    pub distances: Vec<i64>,
}

/// Compute the next placement for `anchor`.
///
/// `frame` and `work_area` are absolute pixel rectangles; `work_area`
/// already has the configured padding removed.
pub fn plan(
    frame: &Rect,
    work_area: &Rect,
    anchor: Anchor,
    config: &GridConfig,
) -> Result<Placement, PlacementError> {
    config.validate()?;
    let current = NormalizedRect::from_frame(frame, work_area);
    let candidates: Vec<PixelRect> = generate(anchor, config, Some(&current))
        .iter()
        .map(|r| to_pixels(r, work_area, config.spacing))
        .collect();

    debug!(
        "{}: xdivs={} ydivs={} minw={} maxw={} minh={} maxh={} spacing={}",
        anchor,
        config.xdivs,
        config.ydivs,
        config.minwidth,
        config.maxwidth,
        config.minheight,
        config.maxheight,
        config.spacing
    );
    debug!("  workarea: {:?}", work_area);
    debug!("  windowframe: {:?}", frame);

    let selection = select(frame, &candidates)?;
    for (candidate, dist) in candidates.iter().zip(&selection.distances) {
        debug!("  {:?}; dist={}", candidate, dist);
    }

    Ok(Placement {
        target: candidates[selection.next],
        index: selection.next,
        candidates,
        distances: selection.distances,
    })
}

/// Index of the monitor after `current`, wrapping around.
pub fn next_monitor(current: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (current + 1) % count
}

/// Move `frame` from monitor `current` to the next monitor, keeping its size
/// and its offset from the monitor origin.
///
/// Returns `None` when `current` is not a valid monitor index.
pub fn cycle_monitor(frame: &Rect, monitors: &[MonitorInfo], current: usize) -> Option<Rect> {
    let from = monitors.get(current)?;
    let to = &monitors[next_monitor(current, monitors.len())];
    Some(translate(frame, &from.geometry, &to.geometry))
}

/// The full-screen rectangle spanning every monitor, ignoring work areas.
pub fn max_stretch(monitors: &[MonitorInfo]) -> PixelRect {
    PixelRect::from(screen_bounds(monitors.iter().map(|m| &m.geometry)))
}

//! Rectangles in pixel space and in fractional (work-area relative) space.
//!
//! Candidate placements are first expressed as [`NormalizedRect`]s whose
//! edges are fractions of the work area, then pixelized with
//! [`to_pixels`].  Boundary fractions are produced from integer arithmetic
//! so that edge tests such as `x1 == 0.0` and `x2 == 1.0` are exact.

use serde::{Deserialize, Serialize};

/// Scale used for four-decimal fixed-point rounding of fractions.
const FRACTION_SCALE: i64 = 10_000;

/// An axis-aligned rectangle in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink the rectangle by `padding` on each edge.
    pub fn inset(&self, padding: Padding) -> Self {
        Self {
            x: self.x + padding.left,
            y: self.y + padding.top,
            width: self.width - padding.left - padding.right,
            height: self.height - padding.top - padding.bottom,
        }
    }

    /// Whether the point `(px, py)` lies inside this rectangle.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Per-edge pixel amounts in CSS order: `[top, right, bottom, left]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl From<[i32; 4]> for Padding {
    fn from([top, right, bottom, left]: [i32; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl From<Padding> for [i32; 4] {
    fn from(p: Padding) -> Self {
        [p.top, p.right, p.bottom, p.left]
    }
}

/// A rectangle whose edges are fractions of the work area.
///
/// Rectangles produced by [`generate`](crate::grid::generate) always satisfy
/// `0 <= x1 < x2 <= 1`, `0 <= y1 < y2 <= 1`, `w == x2 - x1` and
/// `h == y2 - y1` (to four decimals).  A window frame converted with
/// [`NormalizedRect::from_frame`] carries no such guarantee: a window may
/// hang off its work area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedRect {
    /// Build a rectangle from its edges; `w` and `h` are rounded to four
    /// decimals.
    pub fn from_edges(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self {
            x1,
            x2,
            y1,
            y2,
            w: round4(x2 - x1),
            h: round4(y2 - y1),
        }
    }

    /// Express a pixel `frame` as fractions of `work_area`.
    pub fn from_frame(frame: &Rect, work_area: &Rect) -> Self {
        let ww = f64::from(work_area.width.max(1));
        let wh = f64::from(work_area.height.max(1));
        let left = f64::from(frame.x - work_area.x);
        let top = f64::from(frame.y - work_area.y);
        Self {
            x1: left / ww,
            x2: (left + f64::from(frame.width)) / ww,
            y1: top / wh,
            y2: (top + f64::from(frame.height)) / wh,
            w: f64::from(frame.width) / ww,
            h: f64::from(frame.height) / wh,
        }
    }
}

/// A candidate placement in absolute pixels.
///
/// `w` and `h` are rounded independently of the edges and may therefore
/// differ from `x2 - x1` by a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x1: i32,
    pub x2: i32,
    pub y1: i32,
    pub y2: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    /// The `(x, y, width, height)` frame a window should be given.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.w, self.h)
    }
}

impl From<Rect> for PixelRect {
    fn from(r: Rect) -> Self {
        Self {
            x1: r.x,
            x2: r.x + r.width,
            y1: r.y,
            y2: r.y + r.height,
            w: r.width,
            h: r.height,
        }
    }
}

/// Round `v` to four decimal places.
pub fn round4(v: f64) -> f64 {
    (v * FRACTION_SCALE as f64).round() / FRACTION_SCALE as f64
}

/// Division boundaries `0, 1/divs, …, 1` for one axis (`divs + 1` points).
///
/// Each point is `k / divs` rounded to four decimals using integer
/// arithmetic, so the first point is exactly `0.0` and the last exactly
/// `1.0`.
pub fn boundaries(divs: u32) -> Vec<f64> {
    let divs = i64::from(divs.max(1));
    (0..=divs)
        .map(|k| {
            let scaled = (k * FRACTION_SCALE + divs / 2) / divs;
            scaled as f64 / FRACTION_SCALE as f64
        })
        .collect()
}

/// Whether the span `(a, b)` is symmetric about the midpoint `0.5`.
pub fn is_centered(a: f64, b: f64) -> bool {
    round4(1.0 - b) == round4(a)
}

/// Whether `(p1, p2)` is the grid span closest to the actual span
/// `(actual1, actual2)` for `divs` divisions: both endpoints must lie within
/// half a cell.
pub fn is_closest(actual1: f64, actual2: f64, p1: f64, p2: f64, divs: u32) -> bool {
    let threshold = 1.0 / (2.0 * f64::from(divs.max(1)));
    (actual1 - p1).abs() < threshold && (actual2 - p2).abs() < threshold
}

/// Round half to even, returning whole pixels.
fn pixel(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// Map `rect` onto `work_area`, opening a gutter of `spacing` pixels between
/// neighbouring windows.
///
/// Each edge that is not on the work-area boundary moves inward by
/// `spacing / 2` (integer division) and the matching dimension shrinks by
/// the same amount; edges touching the boundary stay flush.
pub fn to_pixels(rect: &NormalizedRect, work_area: &Rect, spacing: u32) -> PixelRect {
    let width = f64::from(work_area.width);
    let height = f64::from(work_area.height);
    let mut px = PixelRect {
        x1: pixel(f64::from(work_area.x) + width * rect.x1),
        x2: pixel(f64::from(work_area.x) + width * rect.x2),
        y1: pixel(f64::from(work_area.y) + height * rect.y1),
        y2: pixel(f64::from(work_area.y) + height * rect.y2),
        w: pixel(width * rect.w),
        h: pixel(height * rect.h),
    };

    let half = (spacing / 2) as i32;
    if half > 0 {
        if rect.x1 != 0.0 {
            px.x1 += half;
            px.w -= half;
        }
        if rect.y1 != 0.0 {
            px.y1 += half;
            px.h -= half;
        }
        if rect.x2 != 1.0 {
            px.x2 -= half;
            px.w -= half;
        }
        if rect.y2 != 1.0 {
            px.y2 -= half;
            px.h -= half;
        }
    }
    px.w = px.w.max(1);
    px.h = px.h.max(1);
    px
}

/// Move `frame` from the monitor at `from` to the same offset on the monitor
/// at `to`, keeping its size.
pub fn translate(frame: &Rect, from: &Rect, to: &Rect) -> Rect {
    Rect {
        x: frame.x - from.x + to.x,
        y: frame.y - from.y + to.y,
        ..*frame
    }
}

/// Bounding box of every rectangle in `monitors`.
///
/// Monitors may sit at negative offsets, so the box starts at the smallest
/// origin rather than at `(0, 0)`.  An empty list gives `Rect::default()`.
pub fn screen_bounds<'a>(monitors: impl IntoIterator<Item = &'a Rect>) -> Rect {
    let mut iter = monitors.into_iter();
    let Some(first) = iter.next() else {
        return Rect::default();
    };
    let (mut x1, mut y1) = (first.x, first.y);
    let (mut x2, mut y2) = (first.x + first.width, first.y + first.height);
    for m in iter {
        x1 = x1.min(m.x);
        y1 = y1.min(m.y);
        x2 = x2.max(m.x + m.width);
        y2 = y2.max(m.y + m.height);
    }
    Rect::new(x1, y1, x2 - x1, y2 - y1)
}

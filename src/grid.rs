//! Candidate enumeration.
//!
//! [`generate`] walks every `(x1, x2) × (y1, y2)` span pair of the division
//! grid and keeps the rectangles an [`Anchor`] accepts.  The output order
//! (x pairs outer, y pairs inner, both ascending) is the cycle order used by
//! [`select`](crate::cycle::select), so it must stay stable.

use crate::command::{Anchor, Axis};
use crate::config::GridConfig;
use crate::geometry::{boundaries, is_closest, NormalizedRect};

/// Every `(lo, hi)` pair of `points` with `lo < hi`, in ascending order.
fn spans(points: &[f64]) -> Vec<(f64, f64)> {
    points
        .iter()
        .flat_map(|&lo| points.iter().filter(move |&&hi| lo < hi).map(move |&hi| (lo, hi)))
        .collect()
}

/// Enumerate the grid placements `anchor` accepts under `config`.
///
/// `current` is the window's frame as fractions of the work area.  It is
/// only consulted by the `NoClamp*` anchors, which keep the grid span
/// closest to the window on their preserved axis; without it those anchors
/// accept every span on that axis.
pub fn generate(
    anchor: Anchor,
    config: &GridConfig,
    current: Option<&NormalizedRect>,
) -> Vec<NormalizedRect> {
    let xspans = spans(&boundaries(config.xdivs));
    let yspans = spans(&boundaries(config.ydivs));

    let mut out = Vec::new();
    for &(x1, x2) in &xspans {
        for &(y1, y2) in &yspans {
            let rect = NormalizedRect::from_edges(x1, x2, y1, y2);
            if !anchor.accepts(&rect) {
                continue;
            }
            if anchor.clamps_width() && !(config.minwidth..=config.maxwidth).contains(&rect.w) {
                continue;
            }
            if anchor.clamps_height() && !(config.minheight..=config.maxheight).contains(&rect.h) {
                continue;
            }
            let keeps_window_span = match (anchor.preserved_axis(), current) {
                (Some(Axis::Vertical), Some(win)) => {
                    is_closest(win.y1, win.y2, rect.y1, rect.y2, config.ydivs)
                }
                (Some(Axis::Horizontal), Some(win)) => {
                    is_closest(win.x1, win.x2, rect.x1, rect.x2, config.xdivs)
                }
                _ => true,
            };
            if !keeps_window_span {
                continue;
            }
            out.push(rect);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GridConfig {
        GridConfig {
            xdivs: 3,
            ydivs: 2,
            minwidth: 0.25,
            maxwidth: 0.67,
            minheight: 0.33,
            maxheight: 0.67,
            ..GridConfig::default()
        }
    }

    fn edges(r: &NormalizedRect) -> (f64, f64, f64, f64) {
        (r.x1, r.x2, r.y1, r.y2)
    }

    #[test]
    fn spans_are_ordered_pairs() {
        assert_eq!(spans(&[0.0, 0.5, 1.0]), vec![(0.0, 0.5), (0.0, 1.0), (0.5, 1.0)]);
    }

    #[test]
    fn left_yields_full_height_thirds() {
        let got: Vec<_> = generate(Anchor::Left, &config(), None).iter().map(edges).collect();
        assert_eq!(got, vec![(0.0, 0.3333, 0.0, 1.0), (0.0, 0.6667, 0.0, 1.0)]);
    }

    #[test]
    fn topleft_respects_both_clamps() {
        let got: Vec<_> = generate(Anchor::TopLeft, &config(), None).iter().map(edges).collect();
        assert_eq!(got, vec![(0.0, 0.3333, 0.0, 0.5), (0.0, 0.6667, 0.0, 0.5)]);
    }

    #[test]
    fn top_ignores_width_clamp() {
        let got: Vec<_> = generate(Anchor::Top, &config(), None).iter().map(edges).collect();
        assert_eq!(got, vec![(0.0, 1.0, 0.0, 0.5), (0.3333, 0.6667, 0.0, 0.5)]);
    }

    #[test]
    fn middle_ignores_both_clamps() {
        let got: Vec<_> = generate(Anchor::Middle, &config(), None).iter().map(edges).collect();
        assert_eq!(got, vec![(0.0, 1.0, 0.0, 1.0), (0.3333, 0.6667, 0.0, 1.0)]);
    }

    #[test]
    fn impossible_width_range_yields_nothing() {
        let cfg = GridConfig {
            xdivs: 2,
            minwidth: 0.8,
            maxwidth: 0.9,
            ..config()
        };
        for anchor in Anchor::ALL.into_iter().filter(|a| a.clamps_width()) {
            assert!(generate(anchor, &cfg, None).is_empty(), "{} should be empty", anchor);
        }
        // Width-exempt anchors still produce placements.
        assert!(!generate(Anchor::Top, &cfg, None).is_empty());
    }

    #[test]
    fn noclampleft_keeps_window_row() {
        // Window occupies roughly the bottom half.
        let win = NormalizedRect::from_edges(0.4, 0.9, 0.52, 0.98);
        let got = generate(Anchor::NoClampLeft, &config(), Some(&win));
        assert!(!got.is_empty());
        for r in &got {
            assert_eq!((r.y1, r.y2), (0.5, 1.0));
            assert!(r.x1 < 0.5);
        }
    }

    #[test]
    fn noclamptop_keeps_window_columns() {
        let win = NormalizedRect::from_edges(0.34, 0.66, 0.2, 0.9);
        let got = generate(Anchor::NoClampTop, &config(), Some(&win));
        assert!(!got.is_empty());
        for r in &got {
            assert_eq!((r.x1, r.x2), (0.3333, 0.6667));
            assert!(r.y1 < 0.5);
            assert!((config().minheight..=config().maxheight).contains(&r.h));
        }
    }

    #[test]
    fn noclamp_without_window_keeps_all_spans() {
        let with = generate(Anchor::NoClampRight, &config(), Some(&NormalizedRect::from_edges(0.5, 1.0, 0.0, 1.0)));
        let without = generate(Anchor::NoClampRight, &config(), None);
        assert!(without.len() > with.len());
    }

    #[test]
    fn all_candidates_stay_inside_unit_square() {
        let mut cfg = GridConfig {
            minwidth: 0.0,
            maxwidth: 1.0,
            minheight: 0.0,
            maxheight: 1.0,
            ..GridConfig::default()
        };
        for xdivs in 1..=5 {
            for ydivs in 1..=5 {
                cfg.xdivs = xdivs;
                cfg.ydivs = ydivs;
                for anchor in Anchor::ALL {
                    for r in generate(anchor, &cfg, None) {
                        assert!(0.0 <= r.x1 && r.x1 < r.x2 && r.x2 <= 1.0);
                        assert!(0.0 <= r.y1 && r.y1 < r.y2 && r.y2 <= 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn every_directional_anchor_has_candidates_with_defaults() {
        let cfg = GridConfig::default();
        for anchor in Anchor::ALL.into_iter().filter(|a| a.preserved_axis().is_none()) {
            assert!(!generate(anchor, &cfg, None).is_empty(), "{} has no candidates", anchor);
        }
    }
}

//! Commands and types used throughout snapgrd.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] describes every action the placer can perform,
//! [`Anchor`] is the table of grid placements with their directional
//! predicates, and [`MonitorInfo`] / [`WindowInfo`] describe what the
//! window manager reports.
//!
//! Command names are parsed case-insensitively; dashes, underscores and
//! whitespace are ignored, so `"topleft"`, `"top-left"` and `"TopLeft"`
//! are the same command.

use crate::geometry::{is_centered, NormalizedRect, Padding, Rect};
use crate::placement::PlacementError;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Axis of the work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A grid placement command.
///
/// Each anchor owns a predicate over a [`NormalizedRect`] that decides
/// whether a candidate belongs to it, plus the size-clamp rules the
/// generator applies.  The `NoClamp*` anchors move a single edge and keep
/// the window where it is on the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    BottomLeft,
    Bottom,
    BottomRight,
    Left,
    Middle,
    Right,
    TopLeft,
    Top,
    TopRight,
    NoClampLeft,
    NoClampRight,
    NoClampTop,
    NoClampBottom,
}

impl Anchor {
    /// Every anchor, in command-table order.
    pub const ALL: [Anchor; 13] = [
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
        Anchor::Left,
        Anchor::Middle,
        Anchor::Right,
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::NoClampLeft,
        Anchor::NoClampRight,
        Anchor::NoClampTop,
        Anchor::NoClampBottom,
    ];

    /// The directional predicate for this anchor.
    pub fn predicate(self) -> fn(&NormalizedRect) -> bool {
        match self {
            Anchor::BottomLeft => |s| s.x1 == 0.0 && s.y2 == 1.0,
            Anchor::Bottom => |s| s.y2 == 1.0 && is_centered(s.x1, s.x2),
            Anchor::BottomRight => |s| s.x2 == 1.0 && s.y2 == 1.0,
            Anchor::Left => |s| s.x1 == 0.0 && is_centered(s.y1, s.y2),
            Anchor::Middle => |s| is_centered(s.x1, s.x2) && is_centered(s.y1, s.y2),
            Anchor::Right => |s| s.x2 == 1.0 && is_centered(s.y1, s.y2),
            Anchor::TopLeft => |s| s.x1 == 0.0 && s.y1 == 0.0,
            Anchor::Top => |s| s.y1 == 0.0 && is_centered(s.x1, s.x2),
            Anchor::TopRight => |s| s.x2 == 1.0 && s.y1 == 0.0,
            Anchor::NoClampLeft => |s| s.x1 < 0.5,
            Anchor::NoClampRight => |s| s.x2 > 0.5,
            Anchor::NoClampTop => |s| s.y1 < 0.5,
            Anchor::NoClampBottom => |s| s.y2 > 0.5,
        }
    }

    /// Whether `rect` satisfies this anchor's directional predicate.
    pub fn accepts(self, rect: &NormalizedRect) -> bool {
        (self.predicate())(rect)
    }

    /// Whether candidate widths are restricted to `[minwidth, maxwidth]`.
    pub fn clamps_width(self) -> bool {
        !matches!(
            self,
            Anchor::Top
                | Anchor::Middle
                | Anchor::Bottom
                | Anchor::NoClampTop
                | Anchor::NoClampBottom
        )
    }

    /// Whether candidate heights are restricted to `[minheight, maxheight]`.
    pub fn clamps_height(self) -> bool {
        !matches!(
            self,
            Anchor::Left
                | Anchor::Middle
                | Anchor::Right
                | Anchor::NoClampLeft
                | Anchor::NoClampRight
        )
    }

    /// The axis on which the window's current span is kept, if any.
    ///
    /// `NoClampLeft`/`NoClampRight` keep the vertical span,
    /// `NoClampTop`/`NoClampBottom` the horizontal one.
    pub fn preserved_axis(self) -> Option<Axis> {
        match self {
            Anchor::NoClampLeft | Anchor::NoClampRight => Some(Axis::Vertical),
            Anchor::NoClampTop | Anchor::NoClampBottom => Some(Axis::Horizontal),
            _ => None,
        }
    }

    /// Canonical command name.
    pub fn name(self) -> &'static str {
        match self {
            Anchor::BottomLeft => "bottomleft",
            Anchor::Bottom => "bottom",
            Anchor::BottomRight => "bottomright",
            Anchor::Left => "left",
            Anchor::Middle => "middle",
            Anchor::Right => "right",
            Anchor::TopLeft => "topleft",
            Anchor::Top => "top",
            Anchor::TopRight => "topright",
            Anchor::NoClampLeft => "noclampleft",
            Anchor::NoClampRight => "noclampright",
            Anchor::NoClampTop => "noclamptop",
            Anchor::NoClampBottom => "noclampbottom",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every action the placer can perform.
///
/// Only [`Snap`](Command::Snap) runs the grid pipeline; the other commands
/// act on the window directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Cycle the window through the grid placements of an anchor.
    Snap(Anchor),
    /// Hand the window to the window manager's own maximize.
    Maximize,
    /// Move the window to the next monitor, keeping its size and offset.
    CycleMonitor,
    /// Stretch the window over the full screen, ignoring work-area padding.
    MaxStretch,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Snap(anchor) => write!(f, "{}", anchor),
            Command::Maximize => write!(f, "maximize"),
            Command::CycleMonitor => write!(f, "cycle-monitor"),
            Command::MaxStretch => write!(f, "max-stretch"),
        }
    }
}

/// Parse a command name (case-insensitive; accepts "topleft", "top-left",
/// "Cycle_Monitor", etc.).
fn parse_command(s: &str) -> Option<Command> {
    let normalized: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect();
    let command = match normalized.as_str() {
        "maximize" => Command::Maximize,
        "cyclemonitor" => Command::CycleMonitor,
        "maxstretch" | "stretch" => Command::MaxStretch,
        other => Command::Snap(Anchor::ALL.into_iter().find(|a| a.name() == other)?),
    };
    Some(command)
}

impl FromStr for Command {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command(s).ok_or_else(|| PlacementError::UnknownCommand(s.to_string()))
    }
}

impl Serialize for Command {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_command(&s).ok_or_else(|| DeError::custom(format!("unknown command: {:?}", s)))
    }
}

/// Static information about a monitor known to the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Name the window manager uses for this monitor (e.g. `"DP-1"`).
    pub name: String,
    /// Full monitor rectangle on the virtual desktop.
    pub geometry: Rect,
    /// Edges reserved by panels and bars.
    pub reserved: Padding,
}

impl MonitorInfo {
    /// The usable region: geometry minus reserved edges minus the
    /// configured `padding`.
    pub fn work_area(&self, padding: Padding) -> Rect {
        self.geometry.inset(self.reserved).inset(padding)
    }
}

/// Minimal information about the currently focused window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window manager address / id.
    pub address: String,
    /// Human-readable title.
    pub title: String,
    /// Index of the window's monitor in [`WindowManager::monitors`](crate::traits::WindowManager::monitors).
    pub monitor: usize,
    /// Outer frame in absolute pixels.
    pub frame: Rect,
    /// Whether the window manager currently holds the window maximized or
    /// fullscreen, in which case it ignores pixel moves.
    pub maximized: bool,
}

/// Index of the monitor containing the point `(x, y)`, if any.
pub fn monitor_at_point(monitors: &[MonitorInfo], x: i32, y: i32) -> Option<usize> {
    monitors.iter().position(|m| m.geometry.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_display_uses_canonical_names() {
        assert_eq!(Command::Snap(Anchor::TopLeft).to_string(), "topleft");
        assert_eq!(Command::Snap(Anchor::NoClampBottom).to_string(), "noclampbottom");
        assert_eq!(Command::Maximize.to_string(), "maximize");
        assert_eq!(Command::CycleMonitor.to_string(), "cycle-monitor");
        assert_eq!(Command::MaxStretch.to_string(), "max-stretch");
    }

    #[test]
    fn every_anchor_parses_from_its_name() {
        for anchor in Anchor::ALL {
            assert_eq!(anchor.name().parse::<Command>().unwrap(), Command::Snap(anchor));
        }
    }

    #[test]
    fn parsing_is_lenient_about_case_and_separators() {
        assert_eq!("Top-Left".parse::<Command>().unwrap(), Command::Snap(Anchor::TopLeft));
        assert_eq!(" no_clamp_right ".parse::<Command>().unwrap(), Command::Snap(Anchor::NoClampRight));
        assert_eq!("CycleMonitor".parse::<Command>().unwrap(), Command::CycleMonitor);
        assert_eq!("stretch".parse::<Command>().unwrap(), Command::MaxStretch);
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = "sideways".parse::<Command>().unwrap_err();
        assert!(matches!(err, PlacementError::UnknownCommand(ref s) if s == "sideways"));
    }

    #[test]
    fn command_serde_uses_names() {
        let cmd: Command = serde_json::from_str(r#""bottomright""#).unwrap();
        assert_eq!(cmd, Command::Snap(Anchor::BottomRight));
        assert_eq!(serde_json::to_string(&Command::CycleMonitor).unwrap(), r#""cycle-monitor""#);
        assert!(serde_json::from_str::<Command>(r#""upward""#).is_err());
    }

    #[test]
    fn corner_predicates() {
        let tl = NormalizedRect::from_edges(0.0, 0.5, 0.0, 0.5);
        assert!(Anchor::TopLeft.accepts(&tl));
        assert!(!Anchor::TopRight.accepts(&tl));
        assert!(!Anchor::BottomLeft.accepts(&tl));
        let br = NormalizedRect::from_edges(0.5, 1.0, 0.5, 1.0);
        assert!(Anchor::BottomRight.accepts(&br));
        assert!(!Anchor::TopLeft.accepts(&br));
    }

    #[test]
    fn edge_predicates_require_centered_cross_span() {
        let left_full = NormalizedRect::from_edges(0.0, 0.3333, 0.0, 1.0);
        assert!(Anchor::Left.accepts(&left_full));
        let left_top = NormalizedRect::from_edges(0.0, 0.3333, 0.0, 0.5);
        assert!(!Anchor::Left.accepts(&left_top));
        let top_mid = NormalizedRect::from_edges(0.3333, 0.6667, 0.0, 0.5);
        assert!(Anchor::Top.accepts(&top_mid));
        assert!(!Anchor::Bottom.accepts(&top_mid));
    }

    #[test]
    fn middle_requires_both_axes_centered() {
        assert!(Anchor::Middle.accepts(&NormalizedRect::from_edges(0.25, 0.75, 0.0, 1.0)));
        assert!(!Anchor::Middle.accepts(&NormalizedRect::from_edges(0.0, 0.5, 0.0, 1.0)));
    }

    #[test]
    fn clamp_exemptions() {
        assert!(!Anchor::Top.clamps_width());
        assert!(Anchor::Top.clamps_height());
        assert!(Anchor::Left.clamps_width());
        assert!(!Anchor::Left.clamps_height());
        assert!(!Anchor::Middle.clamps_width());
        assert!(!Anchor::Middle.clamps_height());
        assert!(Anchor::TopLeft.clamps_width() && Anchor::TopLeft.clamps_height());
        assert!(!Anchor::NoClampTop.clamps_width());
        assert!(!Anchor::NoClampLeft.clamps_height());
    }

    #[test]
    fn preserved_axis_only_for_noclamp() {
        assert_eq!(Anchor::NoClampLeft.preserved_axis(), Some(Axis::Vertical));
        assert_eq!(Anchor::NoClampBottom.preserved_axis(), Some(Axis::Horizontal));
        assert_eq!(Anchor::Left.preserved_axis(), None);
    }

    #[test]
    fn work_area_subtracts_reserved_and_padding() {
        let m = MonitorInfo {
            name: "DP-1".into(),
            geometry: Rect::new(1920, 0, 2560, 1440),
            reserved: Padding::from([30, 0, 0, 0]),
        };
        let area = m.work_area(Padding::from([10, 10, 10, 10]));
        assert_eq!(area, Rect::new(1930, 40, 2540, 1390));
    }

    #[test]
    fn monitor_lookup_by_point() {
        let monitors = vec![
            MonitorInfo {
                name: "DP-1".into(),
                geometry: Rect::new(0, 0, 1920, 1080),
                reserved: Padding::default(),
            },
            MonitorInfo {
                name: "DP-2".into(),
                geometry: Rect::new(1920, 0, 1920, 1080),
                reserved: Padding::default(),
            },
        ];
        assert_eq!(monitor_at_point(&monitors, 100, 100), Some(0));
        assert_eq!(monitor_at_point(&monitors, 1920, 5), Some(1));
        assert_eq!(monitor_at_point(&monitors, 5000, 5), None);
    }
}

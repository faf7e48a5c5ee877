//! **snapgrd** — grid-based window snapping.
//!
//! A command such as `left` or `topright` selects every rectangle of a
//! `xdivs × ydivs` grid that hugs that side of the monitor's work area.
//! Repeating the command cycles the focused window through those
//! rectangles, starting from the one after the window's current position.
//!
//! # Architecture
//!
//! The placement core is pure and lives in four modules:
//!
//! * [`grid`] — enumerates candidate rectangles as work-area fractions.
//! * [`geometry`] — converts fractions to pixels, with window spacing.
//! * [`cycle`] — picks the candidate after the one nearest the window.
//! * [`command`] — the table of commands and their directional filters.
//!
//! [`placement::plan`] chains them.  Around the core, two traits keep the
//! daemon independent of any platform:
//!
//! * [`traits::WindowManager`] — reports windows and monitors and moves
//!   windows.
//! * [`traits::CommandSource`] — delivers commands (a Unix socket, a
//!   hotkey grabber, …).
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket command listener); [`placer::Placer`] ties
//! everything together.

pub mod command;
pub mod config;
pub mod cycle;
pub mod geometry;
pub mod grid;
pub mod hyprland;
pub mod ipc;
pub mod placement;
pub mod placer;
pub mod traits;

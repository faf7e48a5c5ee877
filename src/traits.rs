//! Core traits that decouple snapgrd from any specific window manager or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test harness,
//! …) implements one of these traits.  The [`Placer`](crate::placer::Placer)
//! only depends on these abstractions.

use crate::command::{Command, MonitorInfo, WindowInfo};
use crate::geometry::Rect;
use std::sync::mpsc;

/// Abstraction over a window manager that can report window and monitor
/// geometry and move windows.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// recording stub used in tests.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return the list of monitors the window manager knows about.
    ///
    /// A monitor's position in this list is its index, which is also the
    /// `N` of its `monitor<N>` configuration section.
    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error>;

    /// Return information about the currently focused window, or `None` if
    /// no window is focused (or the focused surface is the desktop).
    fn active_window(&self) -> Result<Option<WindowInfo>, Self::Error>;

    /// Return the pointer position in absolute pixels.
    fn cursor_position(&self) -> Result<(i32, i32), Self::Error>;

    /// Give `window` the outer frame `target`.
    fn move_resize(&self, window: &WindowInfo, target: Rect) -> Result<(), Self::Error>;

    /// Maximize `window` using the window manager's own notion of maximized.
    fn maximize(&self, window: &WindowInfo) -> Result<(), Self::Error>;

    /// Take `window` out of the maximized or fullscreen state.
    fn unmaximize(&self, window: &WindowInfo) -> Result<(), Self::Error>;
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport — a Unix socket, a global
/// hotkey grab, an in-memory channel, … — and forward parsed commands into
/// the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}

//! Hyprland backend.
//!
//! * [`wm`] — [`WindowManager`](crate::traits::WindowManager) implementation
//!   that queries window and monitor geometry and moves windows via
//!   Hyprland's IPC socket.

pub mod wm;

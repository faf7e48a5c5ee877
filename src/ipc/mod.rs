//! IPC listener that accepts commands over a Unix socket.
//!
//! External tools (hotkey daemons, scripts, etc.) can connect to the
//! socket and send newline-delimited JSON command or key names.

pub mod listener;

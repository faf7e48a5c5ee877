//! [`WindowManager`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.

use crate::command::{MonitorInfo, WindowInfo};
use crate::geometry::{Padding, Rect};
use crate::traits::WindowManager;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window manager.
///
/// All communication happens over Hyprland's IPC socket
/// (`$XDG_RUNTIME_DIR/hypr/<instance>/.socket.sock`).  No child processes
/// are spawned.
pub struct HyprlandWm;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl Default for HyprlandWm {
    fn default() -> Self {
        Self
    }
}

impl HyprlandWm {
    /// Create a new handle.
    ///
    /// No connection is opened eagerly; each method call opens a short-lived
    /// IPC request.
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
fn socket_path() -> Result<PathBuf, HyprlandWmError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandWmError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandWmError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandWmError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and parse the response.
fn ipc_json<T: for<'de> Deserialize<'de>>(data_command: &str) -> Result<T, HyprlandWmError> {
    let json = ipc_request(&format!("j/{}", data_command))?;
    serde_json::from_str(&json)
        .map_err(|e| HyprlandWmError(format!("parse {}: {}", data_command, e)))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandWmError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("dispatch error: {}", response)))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Debug, Deserialize)]
struct MonitorJson {
    id: i64,
    name: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(default = "unit_scale")]
    scale: f64,
    /// `[left, top, right, bottom]`.
    #[serde(default)]
    reserved: [i32; 4],
}

fn unit_scale() -> f64 {
    1.0
}

impl MonitorJson {
    /// Geometry in logical (layout) pixels, which is what window
    /// coordinates use.
    fn to_info(&self) -> MonitorInfo {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let [left, top, right, bottom] = self.reserved;
        MonitorInfo {
            name: self.name.clone(),
            geometry: Rect::new(
                self.x,
                self.y,
                (f64::from(self.width) / scale).round() as i32,
                (f64::from(self.height) / scale).round() as i32,
            ),
            reserved: Padding {
                top,
                right,
                bottom,
                left,
            },
        }
    }
}

/// Subset of the JSON object returned by `j/activewindow`.
///
/// Hyprland returns `{}` when nothing is focused, so every field is
/// optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActiveWindowJson {
    address: Option<String>,
    title: String,
    at: [i32; 2],
    size: [i32; 2],
    monitor: i64,
    fullscreen: FullscreenJson,
}

/// Hyprland's `fullscreen` field: a boolean on older releases, a mode
/// number (0 = none, 1 = maximized, 2 = fullscreen) on newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
enum FullscreenJson {
    Flag(bool),
    Mode(i64),
}

impl Default for FullscreenJson {
    fn default() -> Self {
        FullscreenJson::Flag(false)
    }
}

impl FullscreenJson {
    fn is_set(self) -> bool {
        match self {
            FullscreenJson::Flag(on) => on,
            FullscreenJson::Mode(mode) => mode != 0,
        }
    }
}

/// The JSON object returned by `j/cursorpos`.
#[derive(Debug, Deserialize)]
struct CursorJson {
    x: i32,
    y: i32,
}

/// Query `j/monitors`, keeping Hyprland's order.
fn query_monitors() -> Result<Vec<MonitorJson>, HyprlandWmError> {
    ipc_json("monitors")
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Error = HyprlandWmError;

    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error> {
        Ok(query_monitors()?.iter().map(MonitorJson::to_info).collect())
    }

    fn active_window(&self) -> Result<Option<WindowInfo>, Self::Error> {
        let w: ActiveWindowJson = ipc_json("activewindow")?;
        let Some(address) = w.address else {
            return Ok(None);
        };
        // Hyprland reports monitors by id; the rest of the crate uses the
        // position in the monitor list.
        let monitor = query_monitors()?
            .iter()
            .position(|m| m.id == w.monitor)
            .ok_or_else(|| HyprlandWmError(format!("unknown monitor id: {}", w.monitor)))?;
        Ok(Some(WindowInfo {
            address,
            title: w.title,
            monitor,
            frame: Rect::new(w.at[0], w.at[1], w.size[0], w.size[1]),
            maximized: w.fullscreen.is_set(),
        }))
    }

    fn cursor_position(&self) -> Result<(i32, i32), Self::Error> {
        let c: CursorJson = ipc_json("cursorpos")?;
        Ok((c.x, c.y))
    }

    fn move_resize(&self, window: &WindowInfo, target: Rect) -> Result<(), Self::Error> {
        // Tiled windows ignore pixel moves until they float.
        ipc_dispatch(&format!("setfloating address:{}", window.address))?;
        ipc_dispatch(&format!(
            "resizewindowpixel exact {} {},address:{}",
            target.width, target.height, window.address
        ))?;
        ipc_dispatch(&format!(
            "movewindowpixel exact {} {},address:{}",
            target.x, target.y, window.address
        ))
    }

    fn maximize(&self, window: &WindowInfo) -> Result<(), Self::Error> {
        ipc_dispatch(&format!("focuswindow address:{}", window.address))?;
        ipc_dispatch("fullscreen 1")
    }

    fn unmaximize(&self, window: &WindowInfo) -> Result<(), Self::Error> {
        // `fullscreenstate` acts on the focused window.
        ipc_dispatch(&format!("focuswindow address:{}", window.address))?;
        ipc_dispatch("fullscreenstate 0 0")
    }
}

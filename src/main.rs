//! Entry point for the **snapgrd** daemon.
//!
//! Spawns the configured [`CommandSource`](snapgrd::traits::CommandSource)
//! on a background thread and processes incoming commands one at a time on
//! the main thread, so window moves never overlap.

use snapgrd::command::Command;
use snapgrd::config::Config;
use snapgrd::hyprland::wm::HyprlandWm;
use snapgrd::ipc::listener::UnixSocketListener;
use snapgrd::placement::PlacementError;
use snapgrd::placer::{Placer, PlacerError};
use snapgrd::traits::CommandSource;
use log::{error, info, warn};
use std::sync::mpsc;

/// Default socket path for the command listener.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/snapgrd.sock", runtime)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/snapgrd`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("snapgrd")
}

/// Load the config from `$XDG_CONFIG_HOME/snapgrd/config.json`, writing the
/// defaults there on first run and falling back to compiled-in defaults if
/// the file cannot be used.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load_or_init(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            error!("unable to use {} ({}), using defaults", path.display(), e);
            Config::default()
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let config = load_config();
    let keys = config.keys.clone();
    let mut placer = Placer::new(HyprlandWm::new(), config);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    {
        let path = default_socket_path();
        std::thread::spawn(move || {
            let mut source = UnixSocketListener::new(&path, keys);
            if let Err(e) = source.run(cmd_tx) {
                error!("socket listener error: {}", e);
            }
        });
    }

    info!("snapgrd running");
    for cmd in cmd_rx {
        match placer.handle(cmd) {
            Ok(()) => {}
            Err(PlacerError::Placement(PlacementError::NoCandidates)) => {
                warn!("{}: not applicable under current configuration", cmd);
            }
            Err(e) => error!("command error: {}", e),
        }
    }
    info!("all command sources closed, exiting");
}

//! The orchestrator that ties configuration, the placement pipeline and the
//! window manager together.
//!
//! [`Placer`] reacts to [`Command`]s by looking up the active window and its
//! monitor, computing a target rectangle and issuing calls to the
//! [`WindowManager`] trait.

use crate::command::{monitor_at_point, Anchor, Command, WindowInfo};
use crate::config::{Config, ConfigError};
use crate::geometry::Rect;
use crate::placement::{cycle_monitor, max_stretch, plan, PlacementError};
use crate::traits::WindowManager;
use log::{debug, info, warn};

/// Possible errors from the placer.
#[derive(Debug, thiserror::Error)]
pub enum PlacerError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),
    /// The placement could not be computed; the window was left alone.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The effective configuration for a monitor could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Applies placement commands to the focused window.
///
/// The placer is generic over any [`WindowManager`] implementation, making
/// it independent of Hyprland or any other concrete backend.  It keeps no
/// state between commands apart from the configuration it was given.
///
/// # Typical usage
///
/// ```ignore
/// let mut placer = Placer::new(HyprlandWm::new(), Config::default());
/// placer.handle(Command::Snap(Anchor::Left))?;
/// ```
pub struct Placer<W: WindowManager> {
    wm: W,
    config: Config,
}

impl<W: WindowManager> Placer<W> {
    /// Create a new placer.
    pub fn new(wm: W, config: Config) -> Self {
        Self { wm, config }
    }

    /// Process a single [`Command`].
    ///
    /// Without a focused window the command is a no-op.  When the grid has
    /// no placement for the command, [`PlacementError::NoCandidates`] is
    /// returned and the window is not touched.
    pub fn handle(&mut self, cmd: Command) -> Result<(), PlacerError> {
        let Some(window) = self.wm.active_window().map_err(wm_err)? else {
            info!("{}", cmd);
            debug!("no active window, nothing to move");
            return Ok(());
        };
        info!("{} on {} ({:?})", cmd, window.address, window.title);

        match cmd {
            Command::Snap(anchor) => self.snap(&window, anchor)?,

            Command::Maximize => {
                self.wm.maximize(&window).map_err(wm_err)?;
            }

            Command::CycleMonitor => {
                let monitors = self.wm.monitors().map_err(wm_err)?;
                match cycle_monitor(&window.frame, &monitors, window.monitor) {
                    Some(target) => {
                        info!("  → moving {} to {:?}", window.address, target);
                        self.apply(&window, target)?;
                    }
                    None => warn!(
                        "window {} is on unknown monitor {}",
                        window.address, window.monitor
                    ),
                }
            }

            Command::MaxStretch => {
                let monitors = self.wm.monitors().map_err(wm_err)?;
                let target = max_stretch(&monitors).to_rect();
                info!("  → stretching {} to {:?}", window.address, target);
                self.apply(&window, target)?;
            }
        }
        Ok(())
    }

    /// Cycle `window` to the next grid placement for `anchor`.
    fn snap(&self, window: &WindowInfo, anchor: Anchor) -> Result<(), PlacerError> {
        let monitors = self.wm.monitors().map_err(wm_err)?;

        let mut monitor_id = window.monitor;
        if self.config.for_monitor(monitor_id)?.snaptocursor {
            let (x, y) = self.wm.cursor_position().map_err(wm_err)?;
            match monitor_at_point(&monitors, x, y) {
                Some(id) => monitor_id = id,
                None => debug!("cursor ({}, {}) is outside every monitor", x, y),
            }
        }

        let monitor = monitors.get(monitor_id).ok_or_else(|| {
            PlacerError::WindowManager(format!("monitor index {} out of range", monitor_id))
        })?;
        let grid = self.config.for_monitor(monitor_id)?;
        let work_area = monitor.work_area(grid.padding);
        debug!("  monitor: {} (index {})", monitor.name, monitor_id);

        let placement = plan(&window.frame, &work_area, anchor, &grid).inspect_err(|e| {
            debug!("cannot place {} {}: {}", window.address, anchor, e);
        })?;

        let target = placement.target.to_rect();
        info!(
            "  → moving {} to {:?} (candidate {}/{})",
            window.address,
            target,
            placement.index + 1,
            placement.candidates.len()
        );
        self.apply(window, target)
    }

    /// Give `window` the frame `target`, leaving any maximized state first.
    fn apply(&self, window: &WindowInfo, target: Rect) -> Result<(), PlacerError> {
        if window.maximized {
            debug!("  unmaximizing {}", window.address);
            self.wm.unmaximize(window).map_err(wm_err)?;
        }
        self.wm.move_resize(window, target).map_err(wm_err)
    }
}

fn wm_err(e: impl std::error::Error) -> PlacerError {
    PlacerError::WindowManager(e.to_string())
}

//  Tests

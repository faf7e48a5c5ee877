//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON [`Request`]: either a command
//! name or a key name resolved through the configured [`KeyBindings`].
//! A hotkey daemon (or a plain `socat`) can therefore drive snapgrd
//! without snapgrd grabbing keys itself.
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! "left"
//! "cycle-monitor"
//! {"key":"KP_7"}
//! ```

use crate::command::Command;
use crate::config::KeyBindings;
use crate::traits::CommandSource;
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// One line of the wire protocol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Request {
    /// A command given by name, e.g. `"topleft"`.
    Command(Command),
    /// A key press to resolve through the key bindings, e.g. `{"key":"KP_7"}`.
    Key { key: String },
}

/// A [`CommandSource`] that listens on a Unix stream socket for
/// JSON-encoded requests.
///
/// Each accepted connection can send multiple newline-delimited requests.
/// When the connection closes, the listener waits for the next one.
pub struct UnixSocketListener {
    path: PathBuf,
    keys: KeyBindings,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// Create a new listener bound to `path` that resolves key requests
    /// with `keys`.
    ///
    /// The socket file is created when [`run`](CommandSource::run) is called.
    pub fn new(path: impl AsRef<Path>, keys: KeyBindings) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            keys,
        }
    }

    /// Turn one line of input into a command, logging anything unusable.
    fn parse_line(&self, text: &str) -> Option<Command> {
        let request = match serde_json::from_str::<Request>(text) {
            Ok(request) => request,
            Err(e) => {
                error!("bad request {:?}: {}", text, e);
                return None;
            }
        };
        match request {
            Request::Command(cmd) => Some(cmd),
            Request::Key { key } => match self.keys.resolve(&key) {
                Ok(Some(cmd)) => Some(cmd),
                Ok(None) => {
                    warn!("key {}{} is not bound", self.keys.accelerator, key);
                    None
                }
                Err(e) => {
                    warn!("key {}: {}", key, e);
                    None
                }
            },
        }
    }
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** indefinitely.  Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    let reader = BufReader::new(stream);
                    for line in reader.lines() {
                        match line {
                            Ok(ref text) if text.trim().is_empty() => continue,
                            Ok(text) => {
                                let Some(cmd) = self.parse_line(&text) else {
                                    continue;
                                };
                                debug!("received {}", cmd);
                                if sink.send(cmd).is_err() {
                                    info!("sink closed, shutting down");
                                    return Ok(());
                                }
                            }
                            Err(e) => {
                                error!("read error: {}", e);
                                break;
                            }
                        }
                    }
                    debug!("client disconnected");
                }
                Err(e) => {
                    error!("accept error: {}", e);
                }
            }
        }
        Ok(())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Anchor;
    use std::io::Write;
    use std::os::unix::net::UnixStream;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    /// Helper: create a unique temporary socket path for each test.
    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir();
        dir.join(format!(
            "snapgrd-test-{}-{}.sock",
            std::process::id(),
            id
        ))
    }

    /// Start a listener on a background thread and send `lines` to it.
    fn send_lines(lines: &[&str]) -> Vec<Command> {
        let path = tmp_socket_path();
        let path_clone = path.clone();
        let (tx, rx) = mpsc::channel();

        let _handle = std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&path_clone, KeyBindings::default());
            let _ = listener.run(tx);
        });

        // Give the listener a moment to bind.
        std::thread::sleep(std::time::Duration::from_millis(150));

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            for line in lines {
                writeln!(stream, "{}", line).unwrap();
            }
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        // Collect commands (give the listener a moment to process).
        std::thread::sleep(std::time::Duration::from_millis(150));
        let cmds = rx.try_iter().collect();
        let _ = std::fs::remove_file(&path);
        cmds
    }

    #[test]
    fn round_trip_commands_over_socket() {
        let cmds = send_lines(&[r#""left""#, r#""cycle-monitor""#, r#"{"key":"KP_9"}"#]);
        assert_eq!(
            cmds,
            vec![
                Command::Snap(Anchor::Left),
                Command::CycleMonitor,
                Command::Snap(Anchor::TopRight),
            ]
        );
    }

    #[test]
    fn malformed_and_unknown_lines_do_not_crash() {
        let cmds = send_lines(&[
            "not json at all",
            r#""sideways""#,
            r#"{"key":"F24"}"#,
            "",
            r#""middle""#,
        ]);
        assert_eq!(cmds, vec![Command::Snap(Anchor::Middle)]);
    }

    #[test]
    fn request_parsing() {
        let listener = UnixSocketListener::new("/nonexistent", KeyBindings::default());
        assert_eq!(listener.parse_line(r#""max-stretch""#), Some(Command::MaxStretch));
        assert_eq!(listener.parse_line(r#"{"key":"KP_0"}"#), Some(Command::Maximize));
        assert_eq!(listener.parse_line(r#"{"key":"KP_Begin"}"#), None);
        assert_eq!(listener.parse_line("42"), None);
    }
}

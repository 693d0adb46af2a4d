// A small error type for the window and snapshot plumbing.
// Every variant states *where* things went wrong.
// Config problems stay `ConfigError`: main logs them and falls back to defaults.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Presenting the buffer failed
    Snapshot(String),     // Writing a PNG snapshot failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Snapshot(s) => write!(f, "Snapshot error: {s}"),
        }
    }
}

impl std::error::Error for Error {}

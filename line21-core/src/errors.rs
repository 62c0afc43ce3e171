// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the error type used for the genuinely fatal
//! paths of the caption pipeline.
//!
//! Recoverable conditions (no signal on a frame, an unmapped byte pair, a
//! bad XDS checksum, a malformed XDS packet) are never represented here —
//! they are modeled as data (an `Option` that's `None`, a string that says
//! "Rejected" or "Malformed") and are handled in-band by the component that
//! encounters them.

use std::error::Error as StdError;
use std::fmt;
use std::ops::Deref;
use std::result;

/// `Line21Error` enumerates the fatal errors the pipeline can report.
#[derive(Debug)]
pub enum Line21Error {
    /// The requested output format name is not one the emitter factory knows.
    UnsupportedFormat(String),
    /// The frame source itself faulted (e.g. an I/O error reading a frame
    /// image from disk). This is the one runtime error that aborts the
    /// pipeline without partial emission.
    FrameSource(Box<dyn StdError + Send + Sync>),
    /// The `srtroll` (roll-up SRT) emitter was selected, but no roll-up
    /// implementation exists yet; selecting it is a start-up configuration
    /// error rather than a silent fallback to another format.
    RollUpUnavailable,
}

impl fmt::Display for Line21Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Line21Error::UnsupportedFormat(name) => {
                write!(f, "unknown output format '{}'", name)
            }
            Line21Error::FrameSource(err) => {
                write!(f, "frame source error: {}", err)
            }
            Line21Error::RollUpUnavailable => {
                write!(f, "format 'srtroll' is recognized but not yet implemented")
            }
        }
    }
}

impl StdError for Line21Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Line21Error::FrameSource(err) => Some(err.deref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Line21Error {
    fn from(err: std::io::Error) -> Line21Error {
        Line21Error::FrameSource(Box::new(err))
    }
}

pub type Result<T> = result::Result<T, Line21Error>;

/// Convenience function to create an unsupported-format error.
pub fn unsupported_format_error<T>(name: impl Into<String>) -> Result<T> {
    Err(Line21Error::UnsupportedFormat(name.into()))
}

/// Convenience function to create a frame-source error.
pub fn frame_source_error<T>(err: impl StdError + Send + Sync + 'static) -> Result<T> {
    Err(Line21Error::FrameSource(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_offending_format() {
        let err = Line21Error::UnsupportedFormat("quux".to_string());
        assert_eq!(err.to_string(), "unknown output format 'quux'");
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Line21Error = io_err.into();
        assert!(matches!(err, Line21Error::FrameSource(_)));
    }
}

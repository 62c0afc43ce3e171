// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output emitters: the symbol-stream state machines that turn a sequence of
//! `CaptionSymbol`s into one of the supported text output formats.
//!
//! Each output format implements one trait (`Emitter`), selected by a
//! factory function, rather than a closed `match` spread through the caller.

mod debug;
mod raw;
mod rollup;
mod scc;
mod srt;
mod xds;

pub use debug::DebugEmitter;
pub use raw::RawEmitter;
pub use rollup::RollUpSrtEmitter;
pub use scc::SCCEmitter;
pub use srt::SRTEmitter;
pub use xds::XDSEmitter;

use std::io;

use crate::config::{OutputFormat, PipelineConfig};
use crate::errors::{Line21Error, Result};
use crate::sampler::SamplerHints;
use crate::symbol::CaptionSymbol;

/// Common interface implemented by every output format.
pub trait Emitter {
    /// Handle one decoded frame. `raw` is `None` when the sampler found no
    /// signal at all on this frame (the "skip - no preamble" case); `Some`
    /// otherwise, even when the decoded symbol is `Empty`.
    fn feed(
        &mut self,
        frame: u32,
        symbol: &CaptionSymbol,
        raw: Option<(u8, u8)>,
        hints: SamplerHints,
        out: &mut dyn io::Write,
    ) -> io::Result<()>;

    /// Flush any buffered output once the frame stream ends. Most emitters
    /// have nothing left to do.
    fn finish(&mut self, _out: &mut dyn io::Write) -> io::Result<()> {
        Ok(())
    }
}

/// Construct the emitter named by `config.format`. The one fatal
/// configuration error (`Line21Error::UnsupportedFormat` /
/// `Line21Error::RollUpUnavailable`) is reported here, before any frame is
/// processed, rather than deeper in the pipeline.
pub fn make_emitter(config: &PipelineConfig) -> Result<Box<dyn Emitter>> {
    match config.format {
        OutputFormat::Srt => Ok(Box::new(SRTEmitter::new(config.fps, config.cc_filter))),
        OutputFormat::SrtRoll => Err(Line21Error::RollUpUnavailable),
        OutputFormat::Scc => Ok(Box::new(SCCEmitter::new())),
        OutputFormat::Raw => Ok(Box::new(RawEmitter::new())),
        OutputFormat::Debug => Ok(Box::new(DebugEmitter::new())),
        OutputFormat::Xds => Ok(Box::new(XDSEmitter::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CcFilter;

    #[test]
    fn srtroll_is_a_fatal_configuration_error() {
        let mut config = PipelineConfig::default();
        config.format = OutputFormat::SrtRoll;
        match make_emitter(&config) {
            Err(Line21Error::RollUpUnavailable) => {}
            other => panic!("expected RollUpUnavailable, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn every_other_format_constructs() {
        for format in [
            OutputFormat::Srt,
            OutputFormat::Scc,
            OutputFormat::Raw,
            OutputFormat::Debug,
            OutputFormat::Xds,
        ] {
            let mut config = PipelineConfig::default();
            config.format = format;
            config.cc_filter = CcFilter::All;
            assert!(make_emitter(&config).is_ok());
        }
    }
}

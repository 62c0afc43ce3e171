// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration: a plain struct with a `Default` matching the
//! documented defaults, built by the CLI from parsed arguments and handed to
//! the pipeline untouched.

use std::fmt;
use std::str::FromStr;

use crate::symbol::Channel;

/// Output format selector, chosen once at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Srt,
    SrtRoll,
    Scc,
    Raw,
    Debug,
    Xds,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Srt => "srt",
            OutputFormat::SrtRoll => "srtroll",
            OutputFormat::Scc => "scc",
            OutputFormat::Raw => "raw",
            OutputFormat::Debug => "debug",
            OutputFormat::Xds => "xds",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "srt" => Ok(OutputFormat::Srt),
            "srtroll" => Ok(OutputFormat::SrtRoll),
            "scc" => Ok(OutputFormat::Scc),
            "raw" => Ok(OutputFormat::Raw),
            "debug" => Ok(OutputFormat::Debug),
            "xds" => Ok(OutputFormat::Xds),
            other => Err(other.to_string()),
        }
    }
}

/// A channel filter for the SRT emitter: decode everything, or restrict to
/// one of the two caption channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcFilter {
    All,
    Only(Channel),
}

impl Default for CcFilter {
    fn default() -> Self {
        CcFilter::All
    }
}

impl CcFilter {
    pub fn matches(&self, channel: Channel) -> bool {
        match self {
            CcFilter::All => true,
            CcFilter::Only(c) => *c == channel,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code {
            1 => CcFilter::Only(Channel::Cc1),
            2 => CcFilter::Only(Channel::Cc2),
            _ => CcFilter::All,
        }
    }
}

/// Pipeline configuration: the struct form of the core's option table.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub format: OutputFormat,
    pub fps: f64,
    pub lines: u32,
    pub start_line: u32,
    pub cc_filter: CcFilter,
    pub luma_threshold: u8,
    pub sample_size: u32,
    pub delete_after: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            format: OutputFormat::Srt,
            fps: 29.97,
            lines: 3,
            start_line: 0,
            cc_filter: CcFilter::All,
            luma_threshold: 80,
            sample_size: 3,
            delete_after: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.format, OutputFormat::Srt);
        assert_eq!(cfg.fps, 29.97);
        assert_eq!(cfg.lines, 3);
        assert_eq!(cfg.start_line, 0);
        assert_eq!(cfg.luma_threshold, 80);
        assert_eq!(cfg.sample_size, 3);
        assert!(cfg.delete_after);
    }

    #[test]
    fn format_round_trips_through_str() {
        for name in ["srt", "srtroll", "scc", "raw", "debug", "xds"] {
            let format: OutputFormat = name.parse().unwrap();
            assert_eq!(format.name(), name);
        }
        assert!("bogus".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn cc_filter_matches_only_its_channel() {
        let filter = CcFilter::from_code(1);
        assert!(filter.matches(Channel::Cc1));
        assert!(!filter.matches(Channel::Cc2));
        assert!(CcFilter::All.matches(Channel::Cc2));
    }
}

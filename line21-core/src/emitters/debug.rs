// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DebugEmitter`: one fully-annotated line per frame, raw bytes and all.

use std::io;

use super::Emitter;
use crate::sampler::SamplerHints;
use crate::symbol::CaptionSymbol;

#[derive(Default)]
pub struct DebugEmitter;

impl DebugEmitter {
    pub fn new() -> Self {
        DebugEmitter
    }
}

impl Emitter for DebugEmitter {
    fn feed(
        &mut self,
        frame: u32,
        symbol: &CaptionSymbol,
        raw: Option<(u8, u8)>,
        hints: SamplerHints,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        match raw {
            None => writeln!(out, "{} skip - no preamble", frame),
            Some((b1, b2)) => writeln!(
                out,
                "{} ({},{}) - bytes: 0x{:02x} 0x{:02x} : {}",
                frame, hints.last_preamble_offset, hints.last_row_found, b1, b2, symbol.describe()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signal_is_reported_as_skip() {
        let mut emitter = DebugEmitter::new();
        let mut out = Vec::new();
        emitter.feed(3, &CaptionSymbol::Empty, None, SamplerHints::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 skip - no preamble\n");
    }

    #[test]
    fn signal_line_includes_offset_row_and_bytes() {
        let mut emitter = DebugEmitter::new();
        let mut out = Vec::new();
        let hints = SamplerHints { last_preamble_offset: 2, last_row_found: 0 };
        emitter
            .feed(4, &CaptionSymbol::Text("  ".into()), Some((0x20, 0x20)), hints, &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "4 (2,0) - bytes: 0x20 0x20 :   \n"
        );
    }

    #[test]
    fn bytes_are_rendered_as_lowercase_hex() {
        let mut emitter = DebugEmitter::new();
        let mut out = Vec::new();
        let hints = SamplerHints { last_preamble_offset: 0, last_row_found: 0 };
        emitter
            .feed(5, &CaptionSymbol::Unknown(0xAB, 0xCD), Some((0xAB, 0xCD)), hints, &mut out)
            .unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("0xab 0xcd"), "expected lowercase hex in {:?}", line);
        assert!(!line.contains("0xAB") && !line.contains("0xCD"));
    }
}

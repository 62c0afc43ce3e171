// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RawEmitter`: one diagnostic line per frame, the format closest to the
//! sampler's own output.

use std::io;

use super::Emitter;
use crate::sampler::SamplerHints;
use crate::symbol::CaptionSymbol;

pub struct RawEmitter {
    merge_text: bool,
    pending_text: String,
}

impl RawEmitter {
    pub fn new() -> Self {
        RawEmitter { merge_text: false, pending_text: String::new() }
    }
}

impl Default for RawEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for RawEmitter {
    fn feed(
        &mut self,
        frame: u32,
        symbol: &CaptionSymbol,
        raw: Option<(u8, u8)>,
        hints: SamplerHints,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        if raw.is_none() {
            writeln!(out, "{} skip - no preamble", frame)?;
            return Ok(());
        }

        match symbol {
            CaptionSymbol::Text(s) => {
                if self.merge_text {
                    self.pending_text.push_str(s);
                } else {
                    writeln!(out, "{} text: {}", frame, s)?;
                }
            }
            CaptionSymbol::Special { ch, .. } => {
                if self.merge_text {
                    self.pending_text.push(*ch);
                } else {
                    writeln!(out, "{} text: {}", frame, ch)?;
                }
            }
            _ if symbol.is_control_class() => {
                if self.merge_text && !self.pending_text.is_empty() {
                    writeln!(out, "merged text: {}", self.pending_text)?;
                    self.pending_text.clear();
                }
                writeln!(
                    out,
                    "{} control: {} (offset={}, row={})",
                    frame, symbol.describe(), hints.last_preamble_offset, hints.last_row_found
                )?;
            }
            _ => {
                writeln!(out, "{} {}", frame, symbol.describe())?;
            }
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn io::Write) -> io::Result<()> {
        if self.merge_text && !self.pending_text.is_empty() {
            writeln!(out, "merged text: {}", self.pending_text)?;
            self.pending_text.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_preamble_frame_is_reported_as_skip() {
        let mut emitter = RawEmitter::new();
        let mut out = Vec::new();
        emitter.feed(7, &CaptionSymbol::Empty, None, SamplerHints::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7 skip - no preamble\n");
    }

    #[test]
    fn text_symbol_prints_per_frame_by_default() {
        let mut emitter = RawEmitter::new();
        let mut out = Vec::new();
        emitter
            .feed(1, &CaptionSymbol::Text("HI".into()), Some((0x48, 0x49)), SamplerHints::default(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 text: HI\n");
    }
}

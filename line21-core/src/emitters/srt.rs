// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SRTEmitter`: the pop-on caption state machine, the default output
//! format.

use std::io;

use super::Emitter;
use crate::config::CcFilter;
use crate::sampler::SamplerHints;
use crate::symbol::{Channel, ControlKind, CaptionSymbol};

pub struct SRTEmitter {
    fps: f64,
    cc_filter: CcFilter,
    offscreen: String,
    onscreen: String,
    start_frame: u32,
    prev_code: Option<CaptionSymbol>,
    last_channel: Channel,
}

impl SRTEmitter {
    pub fn new(fps: f64, cc_filter: CcFilter) -> Self {
        SRTEmitter {
            fps,
            cc_filter,
            offscreen: String::new(),
            onscreen: String::new(),
            start_frame: 0,
            prev_code: None,
            last_channel: Channel::Cc1,
        }
    }

    fn emit_entry(&self, end_frame: u32, out: &mut dyn io::Write) -> io::Result<()> {
        let start = timestamp(self.start_frame as f64 / self.fps);
        let end = timestamp(end_frame as f64 / self.fps);
        writeln!(out, "{} --> {}", start, end)?;
        writeln!(out, "{}", self.onscreen.trim_end_matches('\n'))?;
        writeln!(out)?;
        Ok(())
    }
}

/// `seconds` to `HH:MM:SS,mmm`.
fn timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as i64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let m = (total_s / 60) % 60;
    let h = total_s / 3600;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

impl Emitter for SRTEmitter {
    fn feed(
        &mut self,
        frame: u32,
        symbol: &CaptionSymbol,
        raw: Option<(u8, u8)>,
        _hints: SamplerHints,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        if raw.is_none() || matches!(symbol, CaptionSymbol::Empty) {
            return Ok(());
        }

        if symbol.is_control_class() && self.prev_code.as_ref() == Some(symbol) {
            self.prev_code = Some(symbol.clone());
            return Ok(());
        }

        if let Some(channel) = symbol.channel() {
            self.last_channel = channel;
        }

        match symbol {
            CaptionSymbol::Text(_) | CaptionSymbol::Special { .. } => {
                if self.cc_filter.matches(self.last_channel) {
                    self.offscreen.push_str(&symbol.describe());
                }
            }
            CaptionSymbol::Control(c) if c.kind == ControlKind::EndOfCaption => {
                self.onscreen = std::mem::take(&mut self.offscreen);
                self.start_frame = frame;
            }
            CaptionSymbol::Control(c) if c.kind == ControlKind::EraseDisplayedMemory => {
                if !self.onscreen.is_empty() {
                    self.emit_entry(frame, out)?;
                    self.onscreen.clear();
                }
            }
            CaptionSymbol::Control(_) | CaptionSymbol::MidRow(_) | CaptionSymbol::Preamble(_) => {
                if !self.offscreen.is_empty() && !self.offscreen.ends_with('\n') {
                    self.offscreen.push('\n');
                }
            }
            _ => {}
        }

        self.prev_code = Some(symbol.clone());
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn io::Write) -> io::Result<()> {
        if !self.onscreen.is_empty() {
            self.emit_entry(self.start_frame, out)?;
            self.onscreen.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Control};

    fn control(channel: Channel, kind: ControlKind) -> CaptionSymbol {
        CaptionSymbol::Control(Control { channel, kind })
    }

    #[test]
    fn timestamp_formats_with_comma_millis() {
        assert_eq!(timestamp(0.0), "00:00:00,000");
        assert_eq!(timestamp(61.5), "00:01:01,500");
    }

    #[test]
    fn full_caption_cycle_emits_one_entry() {
        let mut emitter = SRTEmitter::new(29.97, CcFilter::All);
        let mut out = Vec::new();

        emitter
            .feed(0, &control(Channel::Cc1, ControlKind::ResumeCaptionLoading), Some((0x14, 0x20)), SamplerHints::default(), &mut out)
            .unwrap();
        emitter
            .feed(1, &CaptionSymbol::Text("HELLO".into()), Some((0x48, 0x45)), SamplerHints::default(), &mut out)
            .unwrap();
        emitter
            .feed(2, &control(Channel::Cc1, ControlKind::EndOfCaption), Some((0x14, 0x2F)), SamplerHints::default(), &mut out)
            .unwrap();
        emitter
            .feed(32, &control(Channel::Cc1, ControlKind::EraseDisplayedMemory), Some((0x14, 0x2C)), SamplerHints::default(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("-->").count(), 1);
        let body = text.lines().nth(1).unwrap();
        assert_eq!(body, "HELLO");
    }

    #[test]
    fn repeated_control_code_is_ignored() {
        let mut emitter = SRTEmitter::new(29.97, CcFilter::All);
        let mut out = Vec::new();
        let sym = control(Channel::Cc1, ControlKind::ResumeCaptionLoading);

        emitter.feed(0, &sym, Some((0x14, 0x20)), SamplerHints::default(), &mut out).unwrap();
        emitter.feed(1, &sym, Some((0x14, 0x20)), SamplerHints::default(), &mut out).unwrap();

        // Both frames decode the same repeated control code, and offscreen
        // never received any text, so no newline is ever added.
        assert_eq!(emitter.offscreen.matches('\n').count(), 0);
    }

    #[test]
    fn cc_filter_drops_text_on_the_other_channel() {
        let mut emitter = SRTEmitter::new(29.97, CcFilter::Only(Channel::Cc2));
        let mut out = Vec::new();

        emitter
            .feed(0, &control(Channel::Cc1, ControlKind::ResumeCaptionLoading), Some((0x14, 0x20)), SamplerHints::default(), &mut out)
            .unwrap();
        emitter
            .feed(1, &CaptionSymbol::Text("nope".into()), Some((0, 0)), SamplerHints::default(), &mut out)
            .unwrap();

        assert!(emitter.offscreen.is_empty());
    }
}

// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SCCEmitter`: Scenarist SCC V1.0 output with a drop-frame timecode.

use std::io;

use super::Emitter;
use crate::sampler::SamplerHints;
use crate::symbol::CaptionSymbol;

/// Maps a 7-bit value (bit 7 clear) to its odd-parity-encoded byte. Index is
/// the raw value `0..128`; the stored byte may have bit 7 set to make the
/// total population count odd.
const NO_PARITY_TO_ODD_PARITY: [u8; 128] = [
    0x80, 0x01, 0x02, 0x83, 0x04, 0x85, 0x86, 0x07, 0x08, 0x89, 0x8a, 0x0b, 0x8c, 0x0d, 0x0e, 0x8f,
    0x10, 0x91, 0x92, 0x13, 0x94, 0x15, 0x16, 0x97, 0x98, 0x19, 0x1a, 0x9b, 0x1c, 0x9d, 0x9e, 0x1f,
    0x20, 0xa1, 0xa2, 0x23, 0xa4, 0x25, 0x26, 0xa7, 0xa8, 0x29, 0x2a, 0xab, 0x2c, 0xad, 0xae, 0x2f,
    0xb0, 0x31, 0x32, 0xb3, 0x34, 0xb5, 0xb6, 0x37, 0x38, 0xb9, 0xba, 0x3b, 0xbc, 0x3d, 0x3e, 0xbf,
    0x40, 0xc1, 0xc2, 0x43, 0xc4, 0x45, 0x46, 0xc7, 0xc8, 0x49, 0x4a, 0xcb, 0x4c, 0xcd, 0xce, 0x4f,
    0xd0, 0x51, 0x52, 0xd3, 0x54, 0xd5, 0xd6, 0x57, 0x58, 0xd9, 0xda, 0x5b, 0xdc, 0x5d, 0x5e, 0xdf,
    0xe0, 0x61, 0x62, 0xe3, 0x64, 0xe5, 0xe6, 0x67, 0x68, 0xe9, 0xea, 0x6b, 0xec, 0x6d, 0x6e, 0xef,
    0x70, 0xf1, 0xf2, 0x73, 0xf4, 0x75, 0x76, 0xf7, 0xf8, 0x79, 0x7a, 0xfb, 0x7c, 0xfd, 0xfe, 0x7f,
];

fn floordiv(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Drop-frame `HH:MM:SS;FF` timecode for frame `frame`.
fn drop_frame_timecode(frame: u32) -> String {
    let f = frame as i64;
    let bumped = 2 * std::cmp::max(floordiv((f % 17982) - 2, 1798), 0);
    let fp = f + 18 * floordiv(f, 17982) + bumped;
    let frames = fp.rem_euclid(30);
    let s = floordiv(fp, 30).rem_euclid(60);
    let m = floordiv(fp, 1800).rem_euclid(60);
    let h = floordiv(fp, 108000).rem_euclid(24);
    format!("{:02}:{:02}:{:02};{:02}", h, m, s, frames)
}

pub struct SCCEmitter {
    started: bool,
    buff: String,
    prev_code: Option<CaptionSymbol>,
    start_frame: u32,
}

impl SCCEmitter {
    pub fn new() -> Self {
        SCCEmitter { started: false, buff: String::new(), prev_code: None, start_frame: 0 }
    }
}

impl Default for SCCEmitter {
    fn default() -> Self {
        Self::new()
    }
}

fn odd_parity_pair(b1: u8, b2: u8) -> String {
    format!(
        "{:02x}{:02x} ",
        NO_PARITY_TO_ODD_PARITY[(b1 & 0x7F) as usize],
        NO_PARITY_TO_ODD_PARITY[(b2 & 0x7F) as usize]
    )
}

impl Emitter for SCCEmitter {
    fn feed(
        &mut self,
        frame: u32,
        symbol: &CaptionSymbol,
        raw: Option<(u8, u8)>,
        _hints: SamplerHints,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        if !self.started {
            writeln!(out, "Scenarist_SCC V1.0")?;
            writeln!(out)?;
            self.started = true;
        }

        if let Some((b1, b2)) = raw {
            if (b1, b2) != (0, 0) {
                if self.buff.is_empty() {
                    self.start_frame = frame;
                }
                self.buff.push_str(&odd_parity_pair(b1, b2));
            }
        }

        if matches!(symbol, CaptionSymbol::Control(c) if c.kind.is_flush_trigger())
            && self.prev_code.as_ref() == Some(symbol)
            && !self.buff.is_empty()
        {
            writeln!(out, "{}\t{}", drop_frame_timecode(self.start_frame), self.buff.trim_end())?;
            self.buff.clear();
        }

        self.prev_code = Some(symbol.clone());
        Ok(())
    }

    fn finish(&mut self, out: &mut dyn io::Write) -> io::Result<()> {
        if !self.buff.is_empty() {
            writeln!(out, "{}\t{}", drop_frame_timecode(self.start_frame), self.buff.trim_end())?;
            self.buff.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_parity_table_sets_odd_parity_on_every_input() {
        for v in 0..128u8 {
            let encoded = NO_PARITY_TO_ODD_PARITY[v as usize];
            assert_eq!(encoded.count_ones() % 2, 1, "value {:#04x} -> {:#04x}", v, encoded);
        }
    }

    #[test]
    fn drop_frame_timecode_matches_documented_points() {
        assert_eq!(drop_frame_timecode(0), "00:00:00;00");
        assert_eq!(drop_frame_timecode(17982), "00:10:00;00");
    }

    #[test]
    fn drop_frame_timecode_increases_monotonically_past_a_drop_boundary() {
        let a = drop_frame_timecode(17982);
        let b = drop_frame_timecode(17983);
        assert_ne!(a, b);
    }

    #[test]
    fn header_is_written_once() {
        let mut emitter = SCCEmitter::new();
        let mut out = Vec::new();
        emitter.feed(0, &CaptionSymbol::Empty, Some((0, 0)), SamplerHints::default(), &mut out).unwrap();
        emitter.feed(1, &CaptionSymbol::Empty, Some((0, 0)), SamplerHints::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Scenarist_SCC V1.0").count(), 1);
    }
}

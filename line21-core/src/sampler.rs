// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LineSampler`: locates the EIA-608 signal row inside a frame and samples
//! one byte pair per frame.

use crate::frame::Frame;

/// Byte 1 bit centers, `x = 285 + i*27` for `i in 0..8`. Index 7 is the
/// parity bit; the geometry table carries it for completeness but
/// `decode_byte` never samples or checks it (no parity verification is
/// performed).
pub(crate) const BYTE1_LOCATIONS: [i64; 8] = [285, 312, 339, 366, 393, 420, 447, 474];
/// Byte 2 bit centers, `x = 285 + i*27` for `i in 8..16`.
pub(crate) const BYTE2_LOCATIONS: [i64; 8] = [501, 528, 555, 582, 609, 636, 663, 690];
/// Sync preamble "high" (expected white) columns.
pub(crate) const SYNC_HIGH: [i64; 7] = [28, 55, 82, 109, 136, 163, 190];
/// Sync preamble "low" (expected black) columns.
pub(crate) const SYNC_LOW: [i64; 7] = [14, 41, 68, 95, 122, 149, 176];
/// Horizontal offsets tried while searching for the preamble.
const PREAMBLE_SCAN_RANGE: std::ops::Range<i64> = -13..30;
/// How far forward to scan, once a match is found, to find the end of the
/// matching plateau and center the cached offset within it.
const PREAMBLE_REFINE_WINDOW: i64 = 12;

/// The two small performance-only caches the sampler keeps across frames.
/// Resetting them between frames never changes the decoded output of the
/// corrected search path; they exist purely to avoid rescanning every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplerHints {
    pub last_preamble_offset: i64,
    pub last_row_found: u32,
}

/// A view over a `Frame` that maps column reads through nearest-column
/// resampling when the underlying frame isn't already 720px wide. Quality
/// doesn't matter for a 1-bit signal; only the nearest source column does.
struct NormalizedFrame<'a> {
    inner: &'a dyn Frame,
    scale: f64,
}

impl<'a> NormalizedFrame<'a> {
    fn new(inner: &'a dyn Frame) -> Self {
        let scale = inner.width() as f64 / 720.0;
        NormalizedFrame { inner, scale }
    }

    fn luma(&self, x: i64, y: i64) -> u8 {
        if (self.scale - 1.0).abs() < f64::EPSILON {
            return self.inner.luma(x, y);
        }
        let source_x = (x as f64 * self.scale).round() as i64;
        self.inner.luma(source_x, y)
    }
}

pub struct LineSampler {
    pub luma_threshold: u8,
    pub sample_size: u32,
    /// Topmost row to search, caller-configured (`startLine`, default 0).
    pub start_line: u32,
    /// Number of rows below `start_line` to search (`lines`, default 3).
    /// Must cover row 21 for real line-21 captures; the sampler itself has
    /// no opinion on what row the signal is actually on.
    pub lines: u32,
}

impl LineSampler {
    pub fn new(luma_threshold: u8, sample_size: u32, start_line: u32, lines: u32) -> Self {
        LineSampler { luma_threshold, sample_size, start_line, lines }
    }

    /// Exclusive upper bound of the configured scan window,
    /// `start_line + lines`.
    fn scan_end(&self) -> i64 {
        (self.start_line + self.lines) as i64
    }

    fn pixel_avg(&self, frame: &NormalizedFrame<'_>, start: i64, row: i64) -> f64 {
        let sum: u32 = (0..self.sample_size as i64)
            .map(|k| frame.luma(start + k, row) as u32)
            .sum();
        sum as f64 / self.sample_size as f64
    }

    fn decode_byte(&self, frame: &NormalizedFrame<'_>, locations: &[i64; 8], row: i64, offset: i64) -> u8 {
        let mut value = 0u8;
        for (i, &loc) in locations.iter().take(7).enumerate() {
            if self.pixel_avg(frame, loc + offset, row) > self.luma_threshold as f64 {
                value |= 1 << i;
            }
        }
        value
    }

    fn decode_row(&self, frame: &NormalizedFrame<'_>, row: i64, offset: i64) -> (u8, u8) {
        (
            self.decode_byte(frame, &BYTE1_LOCATIONS, row, offset),
            self.decode_byte(frame, &BYTE2_LOCATIONS, row, offset),
        )
    }

    /// Checks the sync preamble at one specific row/offset, with no
    /// refinement or caching.
    pub fn preamble_detected(&self, frame: &dyn Frame, row: i64, offset: i64) -> bool {
        let frame = NormalizedFrame::new(frame);
        for &loc in &SYNC_HIGH {
            if frame.luma(loc + offset, row) < self.luma_threshold {
                return false;
            }
        }
        for &loc in &SYNC_LOW {
            if frame.luma(loc + offset, row) > self.luma_threshold {
                return false;
            }
        }
        true
    }

    /// Checks whether closed-caption signal is present at `row`, trying the
    /// cached offset first and otherwise searching the full scan range,
    /// refining and re-caching the offset on a match.
    fn is_cc_present(&self, frame: &dyn Frame, row: i64, hints: &mut SamplerHints) -> bool {
        if self.preamble_detected(frame, row, hints.last_preamble_offset) {
            return true;
        }
        for offset in PREAMBLE_SCAN_RANGE {
            if self.preamble_detected(frame, row, offset) {
                hints.last_preamble_offset = offset;
                for tweak in 0..PREAMBLE_REFINE_WINDOW {
                    if !self.preamble_detected(frame, row, offset + tweak) {
                        hints.last_preamble_offset = offset + (tweak as f64 * 0.5) as i64;
                        break;
                    }
                }
                return true;
            }
        }
        false
    }

    /// Search for a closed-caption row in `frame` and decode the byte pair
    /// present there, or `(None, None)` if no signal is found.
    ///
    /// Returns unconditionally on its first iteration whenever the cached
    /// row misses, so in practice only `start_line` is ever inspected by the
    /// fallback scan; see `find_and_decode_row_corrected` for a version that
    /// scans every configured row instead.
    pub fn find_and_decode_row(&self, frame: &dyn Frame, hints: &mut SamplerHints) -> (Option<u8>, Option<u8>) {
        if self.is_cc_present(frame, hints.last_row_found as i64, hints) {
            let normalized = NormalizedFrame::new(frame);
            let (b1, b2) = self.decode_row(&normalized, hints.last_row_found as i64, hints.last_preamble_offset);
            return (Some(b1), Some(b2));
        }
        for row in self.start_line as i64..self.scan_end() {
            if self.is_cc_present(frame, row, hints) {
                hints.last_row_found = row as u32;
                let normalized = NormalizedFrame::new(frame);
                let (b1, b2) = self.decode_row(&normalized, row, hints.last_preamble_offset);
                return (Some(b1), Some(b2));
            }
            return (None, None);
        }
        (None, None)
    }

    /// The evidently-intended, bug-free version of `find_and_decode_row`:
    /// scans every configured row instead of giving up after the first
    /// miss. Unused by the default pipeline; exists so the gap is
    /// documented in code, not just in prose.
    pub fn find_and_decode_row_corrected(
        &self,
        frame: &dyn Frame,
        hints: &mut SamplerHints,
    ) -> (Option<u8>, Option<u8>) {
        if self.is_cc_present(frame, hints.last_row_found as i64, hints) {
            let normalized = NormalizedFrame::new(frame);
            let (b1, b2) = self.decode_row(&normalized, hints.last_row_found as i64, hints.last_preamble_offset);
            return (Some(b1), Some(b2));
        }
        for row in self.start_line as i64..self.scan_end() {
            if self.is_cc_present(frame, row, hints) {
                hints.last_row_found = row as u32;
                let normalized = NormalizedFrame::new(frame);
                let (b1, b2) = self.decode_row(&normalized, row, hints.last_preamble_offset);
                return (Some(b1), Some(b2));
            }
        }
        (None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::MockFrame;

    fn sampler() -> LineSampler {
        LineSampler::new(80, 3, 0, 5)
    }

    #[test]
    fn blank_frame_has_no_signal() {
        let frame = MockFrame::filled(720, 5, 0);
        let mut hints = SamplerHints::default();
        assert_eq!(sampler().find_and_decode_row(&frame, &mut hints), (None, None));
    }

    #[test]
    fn bright_frame_has_no_signal_either() {
        // An all-white frame fails the "low" sync columns, so it is not a
        // valid preamble despite being bright.
        let frame = MockFrame::filled(720, 5, 200);
        let mut hints = SamplerHints::default();
        assert_eq!(sampler().find_and_decode_row(&frame, &mut hints), (None, None));
    }

    #[test]
    fn corrected_scan_tries_more_than_row_zero() {
        // A frame whose preamble only appears on row 3. The faithful path
        // gives up after row 0; the corrected path finds it.
        let mut frame = MockFrame::filled(720, 5, 0);
        paint_preamble(&mut frame, 3, 0);
        let mut hints = SamplerHints::default();
        assert_eq!(sampler().find_and_decode_row(&frame, &mut hints), (None, None));

        let mut hints = SamplerHints::default();
        let (b1, b2) = sampler().find_and_decode_row_corrected(&frame, &mut hints);
        assert_eq!((b1, b2), (Some(0), Some(0)));
        assert_eq!(hints.last_row_found, 3);
    }

    fn paint_preamble(frame: &mut MockFrame, row: u32, offset: i64) {
        for &loc in &SYNC_HIGH {
            set_pixel(frame, loc + offset, row, 255);
        }
        for &loc in &SYNC_LOW {
            set_pixel(frame, loc + offset, row, 0);
        }
    }

    fn set_pixel(frame: &mut MockFrame, x: i64, y: u32, value: u8) {
        if x < 0 || x as u32 >= frame.width {
            return;
        }
        let idx = (y * frame.width + x as u32) as usize;
        frame.pixels[idx] = value;
    }
}

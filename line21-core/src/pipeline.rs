// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Pipeline`: drives one `FrameSource` through the sampler, decoder, and a
//! chosen `Emitter`, one frame at a time.

use std::io;

use crate::config::PipelineConfig;
use crate::decoder;
use crate::emitters::Emitter;
use crate::errors::Result;
use crate::frame::FrameSource;
use crate::sampler::{LineSampler, SamplerHints};
use crate::symbol::CaptionSymbol;

pub struct Pipeline {
    sampler: LineSampler,
    delete_after: bool,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Pipeline {
            sampler: LineSampler::new(
                config.luma_threshold,
                config.sample_size,
                config.start_line,
                config.lines,
            ),
            delete_after: config.delete_after,
        }
    }

    /// Consume `source` to completion, feeding every frame to `emitter` and
    /// writing to `out`. Returns on the first frame-source fault; a missing
    /// signal on an individual frame is not an error.
    pub fn run(
        &self,
        source: &mut dyn FrameSource,
        emitter: &mut dyn Emitter,
        out: &mut dyn io::Write,
    ) -> Result<()> {
        let mut hints = SamplerHints::default();
        let mut frame_num: u32 = 0;

        while let Some(frame) = source.next_frame()? {
            let (b1, b2) = self.sampler.find_and_decode_row(frame.as_ref(), &mut hints);

            match (b1, b2) {
                (Some(b1), Some(b2)) => {
                    let symbol = decoder::decode(b1, b2);
                    emitter.feed(frame_num, &symbol, Some((b1, b2)), hints, out)?;
                }
                _ => {
                    emitter.feed(frame_num, &CaptionSymbol::Empty, None, hints, out)?;
                }
            }

            if self.delete_after {
                frame.release();
            }

            frame_num += 1;
        }

        emitter.finish(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CcFilter, OutputFormat};
    use crate::emitters::make_emitter;
    use crate::frame::Frame;

    struct StaticFrameSource {
        frames: std::vec::IntoIter<Vec<u8>>,
        width: u32,
        height: u32,
    }

    struct VecFrame {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    }

    impl Frame for VecFrame {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn luma(&self, x: i64, y: i64) -> u8 {
            if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
                return 0;
            }
            self.pixels[(y as u32 * self.width + x as u32) as usize]
        }
        fn release(self: Box<Self>) {}
    }

    impl FrameSource for StaticFrameSource {
        fn next_frame(&mut self) -> Result<Option<Box<dyn Frame>>> {
            Ok(self.frames.next().map(|pixels| {
                Box::new(VecFrame { width: self.width, height: self.height, pixels }) as Box<dyn Frame>
            }))
        }
    }

    #[test]
    fn blank_frame_stream_runs_without_error() {
        let width = 720u32;
        let height = 5u32;
        let blank = vec![0u8; (width * height) as usize];
        let mut source = StaticFrameSource { frames: vec![blank.clone(), blank].into_iter(), width, height };

        let mut config = crate::config::PipelineConfig::default();
        config.format = OutputFormat::Srt;
        config.cc_filter = CcFilter::All;
        let pipeline = Pipeline::new(&config);
        let mut emitter = make_emitter(&config).unwrap();
        let mut out = Vec::new();

        pipeline.run(&mut source, emitter.as_mut(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    /// A frame whose row 0 carries a valid EIA-608 sync preamble plus one
    /// encoded byte pair, at the fixed zero-offset geometry `LineSampler`
    /// expects.
    fn painted_frame(width: u32, height: u32, b1: u8, b2: u8) -> crate::frame::MockFrame {
        let mut frame = crate::frame::MockFrame::filled(width, height, 0);
        for &loc in &crate::sampler::SYNC_HIGH {
            set(&mut frame, loc, 255);
        }
        for &loc in &crate::sampler::SYNC_LOW {
            set(&mut frame, loc, 0);
        }
        paint_byte(&mut frame, &crate::sampler::BYTE1_LOCATIONS, b1);
        paint_byte(&mut frame, &crate::sampler::BYTE2_LOCATIONS, b2);
        frame
    }

    fn paint_byte(frame: &mut crate::frame::MockFrame, locations: &[i64; 8], value: u8) {
        for (i, &loc) in locations.iter().take(7).enumerate() {
            let bit = (value >> i) & 1;
            set(frame, loc, if bit == 1 { 255 } else { 0 });
        }
    }

    fn set(frame: &mut crate::frame::MockFrame, x: i64, v: u8) {
        let idx = (0u32 * frame.width + x as u32) as usize;
        frame.pixels[idx] = v;
    }

    struct PaintedFrameSource {
        frames: std::vec::IntoIter<crate::frame::MockFrame>,
    }

    impl FrameSource for PaintedFrameSource {
        fn next_frame(&mut self) -> Result<Option<Box<dyn Frame>>> {
            Ok(self.frames.next().map(|f| Box::new(f) as Box<dyn Frame>))
        }
    }

    /// `[Resume Caption Loading] "HELLO" [End of Caption] ...frames...
    /// [Erase Displayed Memory]` must produce exactly one SRT entry whose
    /// body is `HELLO`.
    #[test]
    fn hello_caption_round_trips_through_one_srt_entry() {
        let width = 720u32;
        let height = 3u32;
        let blank = || crate::frame::MockFrame::filled(width, height, 0);

        let frames = vec![
            painted_frame(width, height, 0x14, 0x20), // Resume Caption Loading
            painted_frame(width, height, b'H', b'E'),
            painted_frame(width, height, b'L', b'L'),
            painted_frame(width, height, b'O', 0x00),
            painted_frame(width, height, 0x14, 0x2F), // End of Caption
            blank(),
            blank(),
            blank(),
            painted_frame(width, height, 0x14, 0x2C), // Erase Displayed Memory
        ];
        let mut source = PaintedFrameSource { frames: frames.into_iter() };

        let mut config = crate::config::PipelineConfig::default();
        config.format = OutputFormat::Srt;
        config.cc_filter = CcFilter::All;
        let pipeline = Pipeline::new(&config);
        let mut emitter = make_emitter(&config).unwrap();
        let mut out = Vec::new();

        pipeline.run(&mut source, emitter.as_mut(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("-->").count(), 1);
        let body = text.lines().nth(1).unwrap();
        assert_eq!(body, "HELLO", "expected an exact HELLO body in {:?}", text);
    }
}

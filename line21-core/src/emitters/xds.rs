// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `XDSEmitter`: gathers XDS byte pairs into packets and prints one
//! human-readable line per completed packet via `crate::xds::describe_packet`.

use std::io;

use super::Emitter;
use crate::sampler::SamplerHints;
use crate::symbol::CaptionSymbol;
use crate::xds;

#[derive(Default)]
pub struct XDSEmitter {
    packetbuf: Vec<(u8, u8)>,
    gather: bool,
}

impl XDSEmitter {
    pub fn new() -> Self {
        XDSEmitter { packetbuf: Vec::new(), gather: false }
    }
}

impl Emitter for XDSEmitter {
    fn feed(
        &mut self,
        _frame: u32,
        _symbol: &CaptionSymbol,
        raw: Option<(u8, u8)>,
        _hints: SamplerHints,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        let Some((b1, b2)) = raw else { return Ok(()) };
        if b1 == 0 && b2 == 0 {
            return Ok(());
        }
        if b1 <= 0x0E {
            self.gather = true;
        }
        if self.gather {
            self.packetbuf.push((b1, b2));
        }
        if b1 == 0x0F {
            self.gather = false;
            let packet = std::mem::take(&mut self.packetbuf);
            writeln!(out, "{}", xds::describe_packet(packet))?;
        }
        Ok(())
    }
}

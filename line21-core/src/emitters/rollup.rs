// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RollUpSrtEmitter`: the roll-up-caption counterpart to `SRTEmitter`.
//!
//! Roll-up caption mode (as opposed to pop-on) needs a visibly different
//! buffer-management state machine that isn't implemented yet. Rather than
//! silently falling back to pop-on or to the raw dump, this type exists, is
//! selectable by name, and refuses to be constructed.

use std::io;

use super::Emitter;
use crate::sampler::SamplerHints;
use crate::symbol::CaptionSymbol;

pub struct RollUpSrtEmitter {
    _private: (),
}

impl RollUpSrtEmitter {
    /// Always panics. `emitters::make_emitter` never calls this — it returns
    /// `Line21Error::RollUpUnavailable` directly — but the type is kept as a
    /// documented placeholder for the day roll-up sample media exists to
    /// implement this against.
    pub fn new() -> Self {
        unimplemented!("roll-up caption output (format=srtroll) is not yet implemented")
    }
}

impl Emitter for RollUpSrtEmitter {
    fn feed(
        &mut self,
        _frame: u32,
        _symbol: &CaptionSymbol,
        _raw: Option<(u8, u8)>,
        _hints: SamplerHints,
        _out: &mut dyn io::Write,
    ) -> io::Result<()> {
        unreachable!("RollUpSrtEmitter can never be constructed")
    }
}

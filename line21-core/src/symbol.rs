// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A tagged `CaptionSymbol` representing one decoded byte pair, keeping the
//! raw bytes available to the emitters that still need them (SCC, Debug) as
//! a separate annotation rather than folding them into the symbol itself.

use std::fmt;

/// The two EIA-608 caption channels, distinguished by the high byte of a
/// control/preamble/mid-row pair (0x10-0x17 -> CC1, 0x18-0x1F -> CC2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Cc1,
    Cc2,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Channel::Cc1 => f.write_str("CC1"),
            Channel::Cc2 => f.write_str("CC2"),
        }
    }
}

/// Mid-row/preamble color, shared between the two tables (preamble adds
/// `WhiteItalics` and `Indent`, which are not colors in the mid-row sense).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionColor {
    White,
    Green,
    Blue,
    Cyan,
    Red,
    Yellow,
    Magenta,
}

impl CaptionColor {
    fn name(&self) -> &'static str {
        match self {
            CaptionColor::White => "White",
            CaptionColor::Green => "Green",
            CaptionColor::Blue => "Blue",
            CaptionColor::Cyan => "Cyan",
            CaptionColor::Red => "Red",
            CaptionColor::Yellow => "Yellow",
            CaptionColor::Magenta => "Magenta",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidRowStyle {
    Color(CaptionColor),
    Italics,
}

impl MidRowStyle {
    fn name(&self) -> String {
        match self {
            MidRowStyle::Color(c) => c.name().to_string(),
            MidRowStyle::Italics => "Italics".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreambleStyle {
    Color(CaptionColor),
    WhiteItalics,
    /// Column indent, one of 0, 4, 8, 12, 16, 20, 24, 28.
    Indent(u8),
}

impl PreambleStyle {
    fn name(&self) -> String {
        match self {
            PreambleStyle::Color(c) => c.name().to_string(),
            PreambleStyle::WhiteItalics => "White Italics".to_string(),
            PreambleStyle::Indent(n) => format!("Indent {}", n),
        }
    }
}

/// A mid-row attribute-change code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidRow {
    pub channel: Channel,
    pub style: MidRowStyle,
    pub underline: bool,
}

impl MidRow {
    pub fn describe(&self) -> String {
        let underline = if self.underline { " Underline" } else { "" };
        format!("{} Mid-row: {}{}", self.channel, self.style.name(), underline)
    }
}

/// A preamble address code (PAC): sets the row and the color/indent/underline
/// attributes that begin at that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    pub channel: Channel,
    /// 1-based row, 1..=15.
    pub row: u8,
    pub style: PreambleStyle,
    pub underline: bool,
}

impl Preamble {
    pub fn describe(&self) -> String {
        let underline = if self.underline { " Underline" } else { "" };
        format!(
            "{} Pre: {}{} row {}",
            self.channel,
            self.style.name(),
            underline,
            self.row
        )
    }
}

/// A control code: caption commands that are not text, mid-row, or preamble
/// codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    ResumeCaptionLoading,
    Backspace,
    /// CC1/CC2 reserved alarm-off control, at low byte 0x22.
    ReservedAlarmOff,
    /// CC1/CC2 reserved alarm-on control, at low byte 0x23.
    ReservedAlarmOn,
    DeleteToEndOfRow,
    RollUp2,
    RollUp3,
    RollUp4,
    FlashOn,
    ResumeDirectCaptioning,
    TextRestart,
    ResumeTextDisplay,
    EraseDisplayedMemory,
    CarriageReturn,
    EraseNonDisplayedMemory,
    EndOfCaption,
    TabOffset1,
    TabOffset2,
    TabOffset3,
}

impl ControlKind {
    fn text(&self) -> &'static str {
        match self {
            ControlKind::ResumeCaptionLoading => "Resume Caption Loading",
            ControlKind::Backspace => "Backspace",
            ControlKind::ReservedAlarmOff => "Reserved (Alarm Off)",
            ControlKind::ReservedAlarmOn => "Reserved (Alarm On)",
            ControlKind::DeleteToEndOfRow => "Delete to End Of Row",
            ControlKind::RollUp2 => "Roll-Up Captions-2 Rows",
            ControlKind::RollUp3 => "Roll-Up Captions-3 Rows",
            ControlKind::RollUp4 => "Roll-Up Captions-4 Rows",
            ControlKind::FlashOn => "Flash On",
            ControlKind::ResumeDirectCaptioning => "Resume Direct Captioning",
            ControlKind::TextRestart => "Text Restart",
            ControlKind::ResumeTextDisplay => "Resume Text Display",
            ControlKind::EraseDisplayedMemory => "Erase Displayed Memory",
            ControlKind::CarriageReturn => "Carriage Return",
            ControlKind::EraseNonDisplayedMemory => "Erase Non-Displayed Memory",
            ControlKind::EndOfCaption => "End of Caption (flip memory)",
            ControlKind::TabOffset1 => "Tab Offset 1",
            ControlKind::TabOffset2 => "Tab Offset 2",
            ControlKind::TabOffset3 => "Tab Offset 3",
        }
    }

    /// The two control kinds that the SCC and SRT state machines treat as
    /// flush/flip triggers.
    pub fn is_flush_trigger(&self) -> bool {
        matches!(
            self,
            ControlKind::EndOfCaption | ControlKind::EraseDisplayedMemory
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub channel: Channel,
    pub kind: ControlKind,
}

impl Control {
    pub fn describe(&self) -> String {
        format!("{} {}", self.channel, self.kind.text())
    }
}

/// A decoded EIA-608 byte pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionSymbol {
    /// Both bytes were `0x00`: idle padding.
    Empty,
    /// Printable text: the concatenation of the basic-character mapping of
    /// each byte (one or both may be the `????(XX)` placeholder for an
    /// undefined byte, so long as the other byte is defined).
    Text(String),
    /// A two-byte special character (high byte 0x11 CC1 / 0x19 CC2, low byte
    /// 0x30..0x3F).
    Special { channel: Channel, ch: char },
    MidRow(MidRow),
    Preamble(Preamble),
    Control(Control),
    /// Neither byte mapped to anything recognized; both bytes are unknown to
    /// the basic character table.
    Unknown(u8, u8),
}

impl CaptionSymbol {
    /// True for the tagged control/mid-row/preamble variants. Plain text,
    /// special characters, and unknown byte pairs are *not* "control" even
    /// though they are not printable ASCII in the ordinary sense: a special
    /// character is still a displayable glyph.
    pub fn is_control_class(&self) -> bool {
        matches!(
            self,
            CaptionSymbol::Control(_) | CaptionSymbol::MidRow(_) | CaptionSymbol::Preamble(_)
        )
    }

    /// The channel a control/mid-row/preamble symbol is attributed to, if
    /// any.
    pub fn channel(&self) -> Option<Channel> {
        match self {
            CaptionSymbol::Control(c) => Some(c.channel),
            CaptionSymbol::MidRow(m) => Some(m.channel),
            CaptionSymbol::Preamble(p) => Some(p.channel),
            CaptionSymbol::Special { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// Human-readable text: plain text for `Text`/`Unknown`/`Empty`,
    /// `"CC{1,2} ..."` for the tagged control-class variants.
    pub fn describe(&self) -> String {
        match self {
            CaptionSymbol::Empty => String::new(),
            CaptionSymbol::Text(s) => s.clone(),
            CaptionSymbol::Special { ch, .. } => ch.to_string(),
            CaptionSymbol::MidRow(m) => m.describe(),
            CaptionSymbol::Preamble(p) => p.describe(),
            CaptionSymbol::Control(c) => c.describe(),
            CaptionSymbol::Unknown(b1, b2) => {
                format!("????({:02x})????({:02x})", b1, b2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_describe_matches_reference_strings() {
        let c = Control {
            channel: Channel::Cc1,
            kind: ControlKind::ResumeCaptionLoading,
        };
        assert_eq!(c.describe(), "CC1 Resume Caption Loading");
    }

    #[test]
    fn mid_row_describe_matches_reference_strings() {
        let m = MidRow {
            channel: Channel::Cc2,
            style: MidRowStyle::Color(CaptionColor::Cyan),
            underline: true,
        };
        assert_eq!(m.describe(), "CC2 Mid-row: Cyan Underline");
    }

    #[test]
    fn unknown_describe_matches_placeholder_format() {
        let sym = CaptionSymbol::Unknown(0xFF, 0xFF);
        assert_eq!(sym.describe(), "????(ff)????(ff)");
    }

    #[test]
    fn empty_describes_as_empty_string() {
        assert_eq!(CaptionSymbol::Empty.describe(), "");
    }

    #[test]
    fn is_control_class_excludes_text_and_special() {
        assert!(!CaptionSymbol::Text("hi".into()).is_control_class());
        assert!(!CaptionSymbol::Unknown(1, 2).is_control_class());
        assert!(!CaptionSymbol::Empty.is_control_class());
        assert!(CaptionSymbol::Control(Control {
            channel: Channel::Cc1,
            kind: ControlKind::EndOfCaption
        })
        .is_control_class());
    }
}

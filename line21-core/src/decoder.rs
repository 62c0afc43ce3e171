// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ByteDecoder`: translates one `(byte1, byte2)` pair into a `CaptionSymbol`.
//!
//! The lookup tables are built once behind `once_cell::sync::Lazy` statics;
//! `decode` itself needs no further caching, it is a handful of hash
//! lookups, already cheap, and total over all `0..128 x 0..128` byte pairs.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::symbol::{
    CaptionColor, CaptionSymbol, Channel, Control, ControlKind, MidRow, MidRowStyle, Preamble,
    PreambleStyle,
};

/// Single-byte character mapping. `0x00` is deliberately absent: it is
/// handled as the zero-width padding case by `decode`, not as a character.
static BASIC_CHAR_TABLE: Lazy<HashMap<u8, char>> = Lazy::new(|| {
    let mut table = HashMap::new();
    let direct: &[(u8, char)] = &[
        (0x20, ' '),
        (0x21, '!'),
        (0x22, '"'),
        (0x23, '#'),
        (0x24, '$'),
        (0x25, '%'),
        (0x26, '&'),
        (0x27, '\''),
        (0x28, '('),
        (0x29, ')'),
        (0x2A, 'á'),
        (0x2B, '+'),
        (0x2C, ','),
        (0x2D, '-'),
        (0x2E, '.'),
        (0x2F, '/'),
        (0x3A, ':'),
        (0x3B, ';'),
        (0x3C, '<'),
        (0x3D, '='),
        (0x3E, '>'),
        (0x3F, '?'),
        (0x40, '@'),
        (0x5B, '['),
        (0x5C, 'é'),
        (0x5D, ']'),
        (0x5E, 'í'),
        (0x5F, 'ó'),
        (0x60, 'ú'),
        (0x7B, 'ç'),
        (0x7C, '÷'),
        (0x7D, 'Ñ'),
        (0x7E, 'ñ'),
        (0x7F, '■'),
    ];
    for &(byte, ch) in direct {
        table.insert(byte, ch);
    }
    for byte in 0x41..0x5Bu8 {
        table.insert(byte, byte as char);
    }
    for byte in 0x61..0x7Bu8 {
        table.insert(byte, byte as char);
    }
    for byte in 0x30..0x3Au8 {
        table.insert(byte, byte as char);
    }
    table
});

/// Two-byte special character low-byte mapping, shared between CC1 (high
/// byte 0x11) and CC2 (high byte 0x19).
static SPECIAL_CHAR_TABLE: Lazy<HashMap<u8, char>> = Lazy::new(|| {
    [
        (0x30, '®'),
        (0x31, '°'),
        (0x32, '½'),
        (0x33, '¿'),
        (0x34, '™'),
        (0x35, '¢'),
        (0x36, '£'),
        (0x37, '♪'),
        (0x38, 'à'),
        (0x39, ' '),
        (0x3A, 'è'),
        (0x3B, 'â'),
        (0x3C, 'ê'),
        (0x3D, 'î'),
        (0x3E, 'ô'),
        (0x3F, 'û'),
    ]
    .into_iter()
    .collect()
});

const CONTROL_KINDS: &[(u8, ControlKind)] = &[
    (0x20, ControlKind::ResumeCaptionLoading),
    (0x21, ControlKind::Backspace),
    (0x22, ControlKind::ReservedAlarmOff),
    (0x23, ControlKind::ReservedAlarmOn),
    (0x24, ControlKind::DeleteToEndOfRow),
    (0x25, ControlKind::RollUp2),
    (0x26, ControlKind::RollUp3),
    (0x27, ControlKind::RollUp4),
    (0x28, ControlKind::FlashOn),
    (0x29, ControlKind::ResumeDirectCaptioning),
    (0x2A, ControlKind::TextRestart),
    (0x2B, ControlKind::ResumeTextDisplay),
    (0x2C, ControlKind::EraseDisplayedMemory),
    (0x2D, ControlKind::CarriageReturn),
    (0x2E, ControlKind::EraseNonDisplayedMemory),
    (0x2F, ControlKind::EndOfCaption),
];

const TAB_OFFSET_KINDS: &[(u8, ControlKind)] = &[
    (0x21, ControlKind::TabOffset1),
    (0x22, ControlKind::TabOffset2),
    (0x23, ControlKind::TabOffset3),
];

/// `(high byte, low byte) -> Control`, for both channels.
static CONTROL_TABLE: Lazy<HashMap<(u8, u8), Control>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for &(low, kind) in CONTROL_KINDS {
        table.insert((0x14, low), Control { channel: Channel::Cc1, kind });
        table.insert((0x1C, low), Control { channel: Channel::Cc2, kind });
    }
    for &(low, kind) in TAB_OFFSET_KINDS {
        table.insert((0x17, low), Control { channel: Channel::Cc1, kind });
        table.insert((0x1F, low), Control { channel: Channel::Cc2, kind });
    }
    table
});

const MID_ROW_COLORS: &[CaptionColor] = &[
    CaptionColor::White,
    CaptionColor::Green,
    CaptionColor::Blue,
    CaptionColor::Cyan,
    CaptionColor::Red,
    CaptionColor::Yellow,
    CaptionColor::Magenta,
];

/// `(high byte, low byte) -> MidRow`.
static MID_ROW_TABLE: Lazy<HashMap<(u8, u8), MidRow>> = Lazy::new(|| {
    let mut table = HashMap::new();
    let mut low = 0x20u8;
    for &color in MID_ROW_COLORS {
        for underline in [false, true] {
            insert_mid_row(&mut table, low, MidRowStyle::Color(color), underline);
            low += 1;
        }
    }
    for underline in [false, true] {
        insert_mid_row(&mut table, low, MidRowStyle::Italics, underline);
        low += 1;
    }
    table
});

fn insert_mid_row(table: &mut HashMap<(u8, u8), MidRow>, low: u8, style: MidRowStyle, underline: bool) {
    table.insert(
        (0x11, low),
        MidRow { channel: Channel::Cc1, style, underline },
    );
    table.insert(
        (0x19, low),
        MidRow { channel: Channel::Cc2, style, underline },
    );
}

/// Preamble column headings: high byte to use for each of the 15 columns.
const CC1_PREAMBLE_COLS: [u8; 15] = [
    0x11, 0x11, 0x12, 0x12, 0x15, 0x15, 0x16, 0x16, 0x17, 0x17, 0x10, 0x13, 0x13, 0x14, 0x14,
];
const CC2_PREAMBLE_COLS: [u8; 15] = [
    0x19, 0x19, 0x1A, 0x1A, 0x1D, 0x1D, 0x1E, 0x1E, 0x1F, 0x1F, 0x18, 0x1B, 0x1B, 0x1C, 0x1C,
];

/// Whether column `c` (0-based) uses the "odd" (low byte 0x40..0x5F) or
/// "even" (low byte 0x60..0x7F) preamble table. Columns 10 and 11 both use
/// odd — the reference table's own comment calls this out as a "cadence
/// change".
const COL_IS_EVEN: [bool; 15] = [
    false, true, false, true, false, true, false, true, false, true, false, false, true, false, true,
];

/// The 16 base preamble styles in low-to-high byte order within the "odd"
/// table (0x40, 0x42, 0x44, ... 0x5E).
fn preamble_base_styles() -> [PreambleStyle; 16] {
    [
        PreambleStyle::Color(CaptionColor::White),
        PreambleStyle::Color(CaptionColor::Green),
        PreambleStyle::Color(CaptionColor::Blue),
        PreambleStyle::Color(CaptionColor::Cyan),
        PreambleStyle::Color(CaptionColor::Red),
        PreambleStyle::Color(CaptionColor::Yellow),
        PreambleStyle::Color(CaptionColor::Magenta),
        PreambleStyle::WhiteItalics,
        PreambleStyle::Indent(0),
        PreambleStyle::Indent(4),
        PreambleStyle::Indent(8),
        PreambleStyle::Indent(12),
        PreambleStyle::Indent(16),
        PreambleStyle::Indent(20),
        PreambleStyle::Indent(24),
        PreambleStyle::Indent(28),
    ]
}

/// `(high byte, low byte) -> Preamble`, generated programmatically rather
/// than hand-enumerated.
static PREAMBLE_TABLE: Lazy<HashMap<(u8, u8), Preamble>> = Lazy::new(|| {
    let mut table = HashMap::new();
    let styles = preamble_base_styles();
    for col in 0..15usize {
        let row = (col + 1) as u8;
        let base_low = if COL_IS_EVEN[col] { 0x60u8 } else { 0x40u8 };
        let cc1_high = CC1_PREAMBLE_COLS[col];
        let cc2_high = CC2_PREAMBLE_COLS[col];
        for (i, &style) in styles.iter().enumerate() {
            for underline in [false, true] {
                let low = base_low + (2 * i as u8) + (underline as u8);
                table.insert(
                    (cc1_high, low),
                    Preamble { channel: Channel::Cc1, row, style, underline },
                );
                table.insert(
                    (cc2_high, low),
                    Preamble { channel: Channel::Cc2, row, style, underline },
                );
            }
        }
    }
    table
});

fn basic_text(byte: u8) -> String {
    if byte == 0 {
        String::new()
    } else if let Some(ch) = BASIC_CHAR_TABLE.get(&byte) {
        ch.to_string()
    } else {
        format!("????({:02x})", byte)
    }
}

fn basic_byte_known(byte: u8) -> bool {
    byte == 0 || BASIC_CHAR_TABLE.contains_key(&byte)
}

/// Decode one byte pair into a `CaptionSymbol`. Total over all `(b1, b2)`
/// with both bytes in `0..=255` (bytes outside `0x00..=0x7F` simply fail
/// every table lookup and fall through to the basic-character branch, which
/// treats them as undefined).
pub fn decode(b1: u8, b2: u8) -> CaptionSymbol {
    if let Some(control) = CONTROL_TABLE.get(&(b1, b2)) {
        return CaptionSymbol::Control(*control);
    }
    if let Some(mid_row) = MID_ROW_TABLE.get(&(b1, b2)) {
        return CaptionSymbol::MidRow(*mid_row);
    }
    if let Some(preamble) = PREAMBLE_TABLE.get(&(b1, b2)) {
        return CaptionSymbol::Preamble(*preamble);
    }
    if (b1 == 0x11 || b1 == 0x19) && (0x30..=0x3F).contains(&b2) {
        if let Some(&ch) = SPECIAL_CHAR_TABLE.get(&b2) {
            let channel = if b1 == 0x11 { Channel::Cc1 } else { Channel::Cc2 };
            return CaptionSymbol::Special { channel, ch };
        }
    }
    if b1 == 0 && b2 == 0 {
        return CaptionSymbol::Empty;
    }
    if !basic_byte_known(b1) && !basic_byte_known(b2) {
        return CaptionSymbol::Unknown(b1, b2);
    }
    CaptionSymbol::Text(format!("{}{}", basic_text(b1), basic_text(b2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_total_over_all_seven_bit_pairs() {
        for b1 in 0..=127u8 {
            for b2 in 0..=127u8 {
                let _ = decode(b1, b2);
            }
        }
    }

    #[test]
    fn empty_pair_decodes_to_empty() {
        assert_eq!(decode(0x00, 0x00).describe(), "");
    }

    #[test]
    fn unknown_pair_decodes_with_placeholders() {
        assert_eq!(decode(0xFF, 0xFF).describe(), "????(ff)????(ff)");
    }

    #[test]
    fn resume_caption_loading_decodes_on_cc1() {
        assert_eq!(decode(0x14, 0x20).describe(), "CC1 Resume Caption Loading");
    }

    #[test]
    fn cyan_underline_mid_row_decodes_on_cc2() {
        assert_eq!(decode(0x19, 0x27).describe(), "CC2 Mid-row: Cyan Underline");
    }

    #[test]
    fn plain_space_pair_decodes_to_two_spaces() {
        assert_eq!(decode(0x20, 0x20).describe(), "  ");
    }

    #[test]
    fn digits_round_trip() {
        assert_eq!(decode(0x24, 0x24).describe(), "$$");
    }

    #[test]
    fn reserved_alarm_codes_decode_on_both_channels() {
        assert_eq!(decode(0x14, 0x22).describe(), "CC1 Reserved (Alarm Off)");
        assert_eq!(decode(0x1C, 0x23).describe(), "CC2 Reserved (Alarm On)");
    }

    #[test]
    fn preamble_indent_with_underline_decodes() {
        // Column 1 (index 0) uses the odd table, high byte 0x11 for CC1.
        // Indent 20 Underline is base style index 13, low = 0x40 + 26 + 1 = 0x5B.
        assert_eq!(decode(0x11, 0x5B).describe(), "CC1 Pre: Indent 20 Underline row 1");
    }

    #[test]
    fn special_char_note_symbol_decodes() {
        assert_eq!(decode(0x11, 0x37).describe(), "♪");
    }
}

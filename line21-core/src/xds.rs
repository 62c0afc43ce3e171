// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `XdsDecoder`: parses a complete, checksum-terminated XDS packet (a
//! sequence of `(byte1, byte2)` pairs gathered by the `XDSEmitter`) into a
//! human-readable one-line description.

use std::collections::{HashMap, VecDeque};

use once_cell::sync::Lazy;

use crate::decoder;

const US_TV_PARENTAL_GUIDELINE_RATING: [&str; 8] =
    ["Not rated", "TV-Y", "TV-Y7", "TV-G", "TV-PG", "TV-14", "TV-MA", "Not rated"];

const MPA_RATING: [&str; 8] = ["N/A", "G", "PG", "PG-13", "R", "NC-17", "X", "Not Rated"];

const CANADIAN_ENGLISH_RATINGS: [&str; 8] =
    ["E", "C", "C8+", "G", "PG", "14+", "18+", "Invalid"];
const CANADIAN_FRENCH_RATINGS: [&str; 8] =
    ["E", "G", "8 ans +", "13 ans +", "16 ans +", "18 ans +", "Invalid", "Invalid"];

const XDS_AUDIO_SERVICES_LANGUAGE: [&str; 8] =
    ["Unknown", "English", "Spanish", "French", "German", "Italian", "Other", "None"];

const XDS_AUDIO_SERVICES_TYPE_MAIN: [&str; 8] =
    ["Unknown", "Mono", "Simulated Stereo", "Stereo", "Stereo Surround", "Data Service", "Other", "None"];

const XDS_AUDIO_SERVICES_TYPE_SECONDARY: [&str; 8] = [
    "Unknown",
    "Mono",
    "Video Descriptions",
    "Non-program Audio",
    "Special Effects",
    "Data Service",
    "Other",
    "None",
];

const XDS_CGMS: [&str; 4] = [
    "Copying is permitted without restriction",
    "Condition not to be used",
    "One generation of copies may be made",
    "No copying is permitted",
];

const XDS_CGMS_APS: [&str; 4] = [
    "No Analogue protection",
    "Analogue protection: PSP On; Split Burst Off",
    "Analogue protection: PSP On; 2 line Split Burst On",
    "Analogue protection: PSP On; 4 line Split Burst On",
];

/// Exposed for callers that want to interpret which of the eight
/// caption-service bit positions a class 0x01/0x07 packet advertises; the
/// one-line `describe_packet` output for that class does not index into
/// this table.
pub const XDS_CAPTION_SERVICES: [&str; 8] = [
    "field one, channel C1, captioning",
    "field one, channel C1, Text",
    "field one, channel C2, captioning",
    "field one, channel C2, Text",
    "field two, channel C1, captioning",
    "field two, channel C1, Text",
    "field two, channel C2, captioning",
    "field two, channel C2, Text",
];

/// Exposed for a caller that wants to map a decoded WRSAME three-letter
/// category code to its meaning; `describe_packet`'s class 0x09/0x01 output
/// does not consult this table itself (see DESIGN.md).
pub static WEATHER_CATEGORY_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("TOA", "Tornado Watch"),
        ("TOR", "Tornado Warning"),
        ("SVA", "Severe Thunderstorm Watch"),
        ("SVR", "Severe Thunderstorm Warning"),
        ("SVS", "Severe Weather Statement"),
        ("SPS", "Special Weather Statement"),
        ("FFA", "Flash Flood Watch"),
        ("FFW", "Flash Flood Warning"),
        ("FFS", "Flash Flood Statement"),
        ("FLA", "Flood Watch"),
        ("FLW", "Flood Warning "),
        ("FLS", "Flood Statement"),
        ("WSA", "Winter Storm Watch"),
        ("WSW", "Winter Storm Warning"),
        ("BZW", "Blizzard Warning"),
        ("HWA", "High Wind Watch"),
        ("HWW", "High Wind Warning"),
        ("HUA", "Hurricane Watch"),
        ("HUW", "Hurricane Warning"),
        ("HLS", "Hurricane Statement"),
        ("LFP", "Service Area Forecast"),
        ("BRT", "Composite Broadcast Statement"),
        ("CEM", "Civil Emergency Message"),
        ("DMO", "Practice/Demo Warning"),
        ("ADR", "Administrative Message"),
    ]
    .into_iter()
    .collect()
});

static XDS_GENRE_CODES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    let names = [
        "Education", "Entertainment", "Movie", "News", "Religious", "Sports", "Other", "Action",
        "Advertisement", "Animated", "Anthology", "Automobile", "Awards", "Baseball", "Basketball",
        "Bulletin", "Business", "Classical", "College", "Combat", "Comedy", "Commentary", "Concert",
        "Consumer", "Contemporary", "Crime", "Dance", "Documentary", "Drama", "Elementary",
        "Erotica", "Exercise", "Fantasy", "Farm", "Fashion", "Fiction", "Food", "Football",
        "Foreign", "Fund Raiser", "Game/Quiz", "Garden", "Golf", "Government", "Health",
        "High School", "History", "Hobby", "Hockey", "Home", "Horror", "Information",
        "Instruction", "International", "Interview", "Language", "Legal", "Live", "Local", "Math",
        "Medical", "Meeting", "Military", "Miniseries", "Music", "Mystery", "National", "Nature",
        "Police", "Politics", "Premier", "Prerecorded", "Product", "Professional", "Public",
        "Racing", "Reading", "Repair", "Repeat", "Review", "Romance", "Science", "Series",
        "Service", "Shopping", "Soap", "Special", "Suspense", "Talk", "Technical", "Tennis",
        "Travel", "Variety", "Video", "Weather", "Western",
    ];
    names.into_iter().enumerate().map(|(i, name)| (0x20 + i as u8, name)).collect()
});

/// Wraps the remaining `(b1, b2)` pairs of a packet with a length-checked
/// pop, so sub-decoders can bail out cleanly on a short packet.
struct PacketCursor {
    pairs: VecDeque<(u8, u8)>,
}

impl PacketCursor {
    fn new(pairs: Vec<(u8, u8)>) -> Self {
        PacketCursor { pairs: pairs.into() }
    }

    /// `true` iff at least `min_bytes` bytes (i.e. `min_bytes / 2` pairs)
    /// remain.
    fn require(&self, min_bytes: usize) -> bool {
        self.pairs.len() * 2 >= min_bytes
    }

    fn pop(&mut self) -> Option<(u8, u8)> {
        self.pairs.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

const MALFORMED: &str = "XDS Malformed Packet";

fn malformed(reason: &str) -> String {
    log::warn!("xds: malformed packet ({})", reason);
    MALFORMED.to_string()
}

fn twos_complement(v: u8) -> u8 {
    if v & 0x7F != 0 {
        128u8.wrapping_sub(v)
    } else {
        v
    }
}

/// Returns whether the packet's checksum is valid: the sum of the
/// two's-complement interpretation of every byte (including the
/// terminating checksum pair) is zero mod 128. An empty packet is never
/// valid.
pub fn compute_checksum(packet: &[(u8, u8)]) -> bool {
    if packet.is_empty() {
        return false;
    }
    let sum: u32 = packet
        .iter()
        .map(|&(b1, b2)| twos_complement(b1) as u32 + twos_complement(b2) as u32)
        .sum();
    sum & 0x7F == 0
}

/// Consume pairs as text (via the byte decoder's basic-character table)
/// until a pair whose first byte is `0x0F` is reached, or the cursor is
/// exhausted.
fn decode_string(cursor: &mut PacketCursor) -> String {
    let mut s = String::new();
    while let Some((b1, b2)) = cursor.pop() {
        if b1 == 0x0F {
            break;
        }
        s.push_str(&decoder::decode(b1, b2).describe());
    }
    s
}

/// `(minutes, hours)` from one pair. `short` restricts hours to 5 bits
/// (start-time / tape-delay fields) rather than 6.
fn decode_minutes_hours(cursor: &mut PacketCursor, short: bool) -> Option<(u8, u8)> {
    if !cursor.require(2) {
        return None;
    }
    let (minb, hourb) = cursor.pop()?;
    let hours = if short { hourb & 31 } else { hourb & 63 };
    Some((minb & 63, hours))
}

fn decode_content_advisory(cursor: &mut PacketCursor) -> Option<String> {
    if !cursor.require(2) {
        return None;
    }
    let (ca1, ca2) = cursor.pop()?;
    let system = (ca1 & 0x18) >> 3;
    let rating = match system {
        0 | 2 => MPA_RATING[(ca1 & 7) as usize].to_string(),
        1 => {
            let rating_code = ca1 & 7;
            let mut r = US_TV_PARENTAL_GUIDELINE_RATING[rating_code as usize].to_string();
            if rating_code == 2 {
                if ca2 & 32 != 0 {
                    r.push_str(" Fantasy Violence");
                }
            } else if (4..=6).contains(&rating_code) {
                if ca2 & 32 != 0 {
                    r.push_str(" Violence");
                }
                if ca2 & 16 != 0 {
                    r.push_str(" Sexual Situations");
                }
                if ca2 & 8 != 0 {
                    r.push_str(" Adult Language");
                }
                if ca1 & 32 != 0 {
                    r.push_str(" Sexually Suggestive Dialogue");
                }
            }
            r
        }
        _ => {
            // system == 3: International.
            let subsystem = (ca1 & (32 >> 5)) + (ca2 & (8 >> 2));
            match subsystem {
                1 => CANADIAN_ENGLISH_RATINGS[(ca2 & 7) as usize].to_string(),
                2 => CANADIAN_FRENCH_RATINGS[(ca2 & 7) as usize].to_string(),
                _ => format!("International reserved code ({}, {})", ca1, ca2),
            }
        }
    };
    Some(format!("XDS Rating: {}", rating))
}

fn decode_audio_services(cursor: &mut PacketCursor) -> Option<String> {
    let (main, sap) = cursor.pop()?;
    let main_language = XDS_AUDIO_SERVICES_LANGUAGE[(main & (56 >> 3)) as usize];
    let main_type = XDS_AUDIO_SERVICES_TYPE_MAIN[(main & 7) as usize];
    let sap_language = XDS_AUDIO_SERVICES_LANGUAGE[(sap & (56 >> 3)) as usize];
    let sap_type = XDS_AUDIO_SERVICES_TYPE_SECONDARY[(sap & 7) as usize];
    Some(format!(
        "XDS Audio Services: Main:{}({}) Sap:{}({})",
        main_language, main_type, sap_language, sap_type
    ))
}

fn decode_cgms(cursor: &mut PacketCursor) -> Option<String> {
    if !cursor.require(2) {
        return None;
    }
    let (c1, _) = cursor.pop()?;
    let copying = XDS_CGMS[(c1 & (24 >> 3)) as usize];
    let protection = XDS_CGMS_APS[(c1 & 7) as usize];
    Some(format!("XDS Copy protection: {} {}", copying, protection))
}

fn decode_aspect_ratio(cursor: &mut PacketCursor) -> Option<String> {
    if !cursor.require(2) {
        return None;
    }
    let (startl, endl) = cursor.pop()?;
    let mut anamorphic = false;
    if let Some((a, _)) = cursor.pop() {
        anamorphic = a & 1 != 0;
    }
    let marker = if anamorphic { " Anamorphic" } else { "" };
    Some(format!(
        "XDS Aspect Ratio: start line: {} end line: {}{}",
        22 + (startl & 63),
        262 - (endl & 63),
        marker
    ))
}

fn describe_first(b1: u8, b2: u8, cursor: &mut PacketCursor) -> String {
    if b1 <= 0x02 && b2 <= 0x03 && b1 >= 1 {
        let pref = if b1 == 1 { "Current" } else { "Next Program" };
        match b2 {
            0x01 => {
                if !cursor.require(4) {
                    return malformed("short start-time packet");
                }
                let Some((minutes, hours)) = decode_minutes_hours(cursor, true) else {
                    return malformed("short start-time packet");
                };
                let Some((dateb, monthb)) = cursor.pop() else {
                    return malformed("short start-time packet");
                };
                let tape_delay = if monthb & 16 != 0 { "(Tape Delayed)" } else { "" };
                return format!(
                    "XDS {} Scheduled Start Time: {:02}:{:02} on Day {:02} of Month {:02} {}",
                    pref,
                    hours,
                    minutes,
                    dateb & 31,
                    monthb & 15,
                    tape_delay
                );
            }
            0x02 => {
                if !cursor.require(2) {
                    return malformed("short length-of-show packet");
                }
                let Some((minutes, hours)) = decode_minutes_hours(cursor, false) else {
                    return malformed("short length-of-show packet");
                };
                let mut msg = format!("XDS {} Length of Show: {:02}:{:02}", pref, hours, minutes);
                if !cursor.is_empty() {
                    if let Some((minutes, hours)) = decode_minutes_hours(cursor, false) {
                        let seconds = cursor.pop().map(|(b, _)| b & 63).unwrap_or(0);
                        msg += &format!(
                            " XDS {} Elapsed time: {:02}:{:02}:{:02}",
                            pref, hours, minutes, seconds
                        );
                    }
                }
                return msg;
            }
            0x03 => {
                return format!("XDS {} Program Name: {}", pref, decode_string(cursor));
            }
            _ => {}
        }
    }

    if b1 == 0x01 {
        match b2 {
            0x04 => {
                let mut genre = String::new();
                while let Some((n1, n2)) = cursor.pop() {
                    if n1 == 0x0F {
                        break;
                    }
                    genre.push_str(&format!(
                        "{} {} ",
                        XDS_GENRE_CODES.get(&n1).copied().unwrap_or(""),
                        XDS_GENRE_CODES.get(&n2).copied().unwrap_or("")
                    ));
                }
                return format!("XDS Program Genre: {}", genre);
            }
            0x05 => {
                return decode_content_advisory(cursor)
                    .unwrap_or_else(|| malformed("short content-advisory packet"));
            }
            0x06 => {
                return decode_audio_services(cursor)
                    .unwrap_or_else(|| malformed("short audio-services packet"));
            }
            0x07 => {
                return "XDS Caption Services".to_string();
            }
            0x08 => {
                return decode_cgms(cursor).unwrap_or_else(|| malformed("short CGMS packet"));
            }
            0x09 => {
                return decode_aspect_ratio(cursor)
                    .unwrap_or_else(|| malformed("short aspect-ratio packet"));
            }
            0x0C => {
                return "Composite packet 1".to_string();
            }
            0x0D => {
                return "Composite packet 2".to_string();
            }
            _ if (0x10..=0x17).contains(&b2) => {
                return format!(
                    "XDS Program description line: {} :{} ",
                    b2 - 0x0F,
                    decode_string(cursor)
                );
            }
            _ => {}
        }
    }

    if b1 == 0x05 {
        match b2 {
            0x01 => return format!("XDS Channel Name: {}", decode_string(cursor)),
            0x02 => return format!("XDS Channel Station Call-Sign: {}", decode_string(cursor)),
            0x03 => {
                return match decode_minutes_hours(cursor, true) {
                    Some((minutes, hours)) => {
                        format!("XDS Channel Tape Delay: {:02}:{:02}", hours, minutes)
                    }
                    None => malformed("short channel-tape-delay packet"),
                };
            }
            _ => {}
        }
    }

    if b1 == 0x09 {
        match b2 {
            0x01 => {
                let pairs: Vec<String> = cursor
                    .pairs
                    .iter()
                    .map(|(b1, b2)| format!("{:02x} {:02x}", b1, b2))
                    .collect();
                return format!("XDS Public Service - WRSAME message: {}", pairs.join(" "));
            }
            0x02 => {
                return format!("XDS Public Service - Weather: {}", decode_string(cursor));
            }
            _ => {}
        }
    }

    format!("Could not decode ---> XDS describes: {:02x} {:02x}", b1, b2)
}

/// Given a complete XDS packet (including its terminating `(0x0F, checksum)`
/// pair), describe it as a single human-readable line. Never fails: a bad
/// checksum or an under-length sub-packet is folded into the returned text
/// rather than an `Err`.
pub fn describe_packet(packet: Vec<(u8, u8)>) -> String {
    if packet.is_empty() {
        return "XDS - Empty Packet".to_string();
    }
    if !compute_checksum(&packet) {
        log::warn!("xds: dropping packet with bad checksum ({} pairs)", packet.len());
        return "XDS Rejected Packet - Incorrect Checksum".to_string();
    }
    let mut cursor = PacketCursor::new(packet);
    let (b1, b2) = cursor.pop().expect("checked non-empty above");
    describe_first(b1, b2, &mut cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_packet_is_reported() {
        assert_eq!(describe_packet(vec![]), "XDS - Empty Packet");
    }

    #[test]
    fn checksum_true_for_single_zero_pair() {
        assert!(compute_checksum(&[(0, 0)]));
        assert!(!compute_checksum(&[]));
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let packet = vec![(0x01, 0x01), (0x0F, 0x00)];
        assert_eq!(describe_packet(packet), "XDS Rejected Packet - Incorrect Checksum");
    }

    #[test]
    fn decode_string_stops_at_0f() {
        let mut cursor = PacketCursor::new(vec![
            (b'A', b'B'),
            (b'C', b'D'),
            (0x0F, 0x00),
        ]);
        assert_eq!(decode_string(&mut cursor), "ABCD");
    }

    #[test]
    fn decode_minutes_hours_masks_correctly() {
        let mut cursor = PacketCursor::new(vec![(5 | 128, 5 | 128)]);
        assert_eq!(decode_minutes_hours(&mut cursor, false), Some((5, 5)));
    }

    #[test]
    fn content_advisory_us_tv_pg_with_violence_flag() {
        // ca1 = system=1 (bits 4:3 = 01 -> 0x08), rating_code=4 (PG) -> (ca1&0x18)>>3=1, ca1&7=4
        // ca1 = 0x08 | 0x04 = 0x0C; ca2 bit 0x20 set for Violence.
        let mut cursor = PacketCursor::new(vec![(0x0C, 0x20)]);
        let desc = decode_content_advisory(&mut cursor).unwrap();
        assert_eq!(desc, "XDS Rating: TV-PG Violence");
    }
}

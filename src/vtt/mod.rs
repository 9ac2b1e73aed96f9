//! WebVTT caption parsing.
//!
//! Zoom transcripts are WebVTT files made of cue blocks separated by blank
//! lines:
//!
//! ```text
//! WEBVTT
//!
//! 1
//! 00:00:00.000 --> 00:00:02.000
//! Hello world
//! ```
//!
//! Parsing is lenient: blocks that do not look like a cue are skipped.

use crate::zoom::{CaptionRecord, Transcript};

const HEADER: &str = "WEBVTT";
const TIMING_SEPARATOR: &str = " --> ";

/// Parse caption text into cue records, in input order.
///
/// Lines end in CRLF, as Zoom writes them. Input with no CRLF at all is read
/// as LF-terminated. A bare LF inside CRLF input stays part of its line.
pub fn parse(raw: &str) -> Transcript {
    let eol = if raw.contains("\r\n") { "\r\n" } else { "\n" };
    let blank = eol.repeat(2);

    raw.trim()
        .split(blank.as_str())
        .filter(|block| !block.trim().eq_ignore_ascii_case(HEADER))
        .filter_map(|block| parse_block(block, eol))
        .collect()
}

fn parse_block(block: &str, eol: &str) -> Option<CaptionRecord> {
    let lines: Vec<&str> = block.split(eol).collect();
    if lines.len() < 3 {
        return None;
    }

    let (start, end) = lines[1].split_once(TIMING_SEPARATOR)?;

    Some(CaptionRecord {
        index: lines[0].to_string(),
        start: start.to_string(),
        end: end.to_string(),
        text: lines[2..].join(" "),
    })
}

/// Canonical CRLF rendering of `records` that [`parse`] reads back unchanged.
pub fn render(records: &[CaptionRecord]) -> String {
    let mut blocks = vec![HEADER.to_string()];
    blocks.extend(records.iter().map(|r| {
        format!(
            "{}\r\n{}{}{}\r\n{}",
            r.index, r.start, TIMING_SEPARATOR, r.end, r.text
        )
    }));
    blocks.join("\r\n\r\n")
}

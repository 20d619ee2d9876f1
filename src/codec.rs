//! Session blob encoding
//!
//! A record travels between page views as `key=value` pairs joined by `|`:
//!
//! ```text
//! m=Search%20Engine%3A%20Organic|s=Google|k=shoes|rp=%2Fsearch|rd=google.com
//! ```
//!
//! Medium and source are always written; the other fields only when set.
//! A `|` inside a value becomes the sentinel `~!~` before percent-encoding,
//! and decoding reverses the two steps in the opposite order.

use crate::types::AttributionRecord;

const PAIR_SEPARATOR: char = '|';
const PIPE_SENTINEL: &str = "~!~";

fn escape(value: &str) -> String {
    urlencoding::encode(&value.replace(PAIR_SEPARATOR, PIPE_SENTINEL)).into_owned()
}

fn unescape(value: &str) -> String {
    let decoded = urlencoding::decode_binary(value.as_bytes());
    String::from_utf8_lossy(&decoded).replace(PIPE_SENTINEL, "|")
}

/// Encode a record into a session blob
pub fn encode(record: &AttributionRecord) -> String {
    let mut pairs = vec![
        format!("m={}", escape(&record.medium)),
        format!("s={}", escape(&record.source)),
    ];

    let optional = [
        ("k", &record.keyword),
        ("kg", &record.keyword_group),
        ("c", &record.content),
        ("cp", &record.campaign),
        ("rp", &record.referring_path),
        ("rd", &record.referring_domain),
    ];
    pairs.extend(
        optional
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, escape(value))),
    );

    let blob = pairs.join("|");
    tracing::trace!(blob = %blob, "encoded session blob");
    blob
}

/// Decode a session blob into a fresh record
pub fn decode(blob: &str) -> AttributionRecord {
    let mut record = AttributionRecord::default();
    decode_into(blob, &mut record);
    record
}

/// Decode a session blob over an existing record.
///
/// Keys missing from the blob leave the record's current value in place;
/// unknown keys and segments without `=` are skipped.
pub fn decode_into(blob: &str, record: &mut AttributionRecord) {
    for segment in blob.split(PAIR_SEPARATOR) {
        let Some((key, raw)) = segment.split_once('=') else {
            continue;
        };

        let slot = match key {
            "m" => &mut record.medium,
            "s" => &mut record.source,
            "k" => &mut record.keyword,
            "kg" => &mut record.keyword_group,
            "c" => &mut record.content,
            "cp" => &mut record.campaign,
            "rp" => &mut record.referring_path,
            "rd" => &mut record.referring_domain,
            other => {
                tracing::trace!(key = other, "ignoring unknown session key");
                continue;
            }
        };
        *slot = unescape(raw);
    }
}

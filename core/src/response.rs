//! # Browser Response Parsing
//!
//! Decodes the semicolon-delimited key/value payload the SQL Server Browser
//! returns into an ordered [`InstanceInfo`] mapping.
//!
//! Parsing is deliberately lenient: the 3-byte framing header is stripped
//! without validation, ill-formed payloads shrink to partial or empty
//! mappings, and nothing here ever fails. The transport sub-keys (`tcp`,
//! `np`, `via`) are kept as flat string values; their micro-record syntax is
//! not unpacked.

use tracing::trace;

use crate::browser::RawResponse;

/// Type byte plus little-endian u16 length, stripped unconditionally and not
/// checked against the actual payload size.
const RESPONSE_HEADER_LEN: usize = 3;

/// Ordered mapping of instance attribute names to values.
///
/// Insertion order is preserved so the CLI's default listing is
/// deterministic. A duplicate key overwrites the earlier value in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    entries: Vec<(String, String)>,
}

impl InstanceInfo {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

/// Parses a raw browser response into an [`InstanceInfo`].
///
/// The first [`RESPONSE_HEADER_LEN`] bytes are discarded, the rest is split
/// on literal `;` and walked as alternating key/value tokens. A trailing
/// token without a partner is dropped, pairs with an empty key are skipped,
/// and a repeated key wins with its last value. Inputs shorter than the
/// header, or without any delimiter, produce an empty mapping rather than an
/// error.
pub fn parse(response: RawResponse) -> InstanceInfo {
    let bytes: Vec<u8> = response.into_bytes();
    let payload: &[u8] = bytes.get(RESPONSE_HEADER_LEN..).unwrap_or_default();
    let text = String::from_utf8_lossy(payload);

    let tokens: Vec<&str> = text.split(';').collect();
    let mut info = InstanceInfo::default();

    for pair in tokens.chunks_exact(2) {
        if pair[0].is_empty() {
            continue;
        }
        info.insert(pair[0], pair[1]);
    }

    trace!(attributes = info.len(), "parsed browser response");
    info
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

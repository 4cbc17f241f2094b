//! Segmentation of raw text into protocol, subdomain, domain and tail regions.

use tracing::trace;

use crate::url::splitter::split_host_with;
use crate::url::suffix::{SuffixRules, SuffixTable};

/// Characters that end the host and open the tail.
const TAIL_DELIMITERS: [char; 4] = [':', '/', '?', '#'];

/// Regions of a segmented input, borrowed from the input text.
///
/// When `valid` is true, `protocol + host + tail == input`, where the host is
/// `subdomain + "." + domain` (or just `domain` without a subdomain). When
/// `valid` is false every region is empty and `input` is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedUrl<'a> {
    /// The original text
    pub input: &'a str,
    /// Scheme including `://`, e.g. `http://`
    pub protocol: &'a str,
    /// Labels before the registrable domain, e.g. `www`
    pub subdomain: &'a str,
    /// Registrable domain, e.g. `google.co.uk`
    pub domain: &'a str,
    /// Port, path, query and anchor with the leading delimiter
    pub tail: &'a str,
    /// Whether a host was recognized
    pub valid: bool,
}

impl<'a> ParsedUrl<'a> {
    fn opaque(input: &'a str) -> Self {
        ParsedUrl {
            input,
            protocol: "",
            subdomain: "",
            domain: "",
            tail: "",
            valid: false,
        }
    }

    /// The full host (`subdomain.domain`), or empty for opaque input.
    pub fn host(&self) -> &'a str {
        if !self.valid {
            return "";
        }
        &self.input[self.protocol.len()..self.input.len() - self.tail.len()]
    }
}

/// Segment text using the built-in suffix table.
///
/// # Examples
///
/// ```
/// use pwmaker::segment;
///
/// let parsed = segment("http://www.google.com:8080/search?q=password+maker");
/// assert!(parsed.valid);
/// assert_eq!(parsed.protocol, "http://");
/// assert_eq!(parsed.subdomain, "www");
/// assert_eq!(parsed.domain, "google.com");
/// assert_eq!(parsed.tail, ":8080/search?q=password+maker");
///
/// assert!(!segment("This is Not A Url").valid);
/// ```
pub fn segment(text: &str) -> ParsedUrl<'_> {
    segment_with(text, SuffixTable::builtin())
}

/// Segment text, splitting the host with a caller-provided rule set.
pub fn segment_with<'a>(text: &'a str, rules: &dyn SuffixRules) -> ParsedUrl<'a> {
    let (protocol, rest) = match protocol_len(text) {
        Some(len) => text.split_at(len),
        None => ("", text),
    };

    let host_end = rest.find(TAIL_DELIMITERS).unwrap_or(rest.len());
    let (host, tail) = rest.split_at(host_end);

    let has_context = !protocol.is_empty() || !tail.is_empty();
    if !is_host_like(host, has_context) {
        trace!(len = text.len(), "input is not a url");
        return ParsedUrl::opaque(text);
    }

    let (subdomain, domain) = split_host_with(host, rules);
    trace!(
        protocol = !protocol.is_empty(),
        subdomain = !subdomain.is_empty(),
        tail = !tail.is_empty(),
        "segmented url"
    );

    ParsedUrl {
        input: text,
        protocol,
        subdomain,
        domain,
        tail,
        valid: true,
    }
}

/// Length of a leading `scheme://`, if present.
fn protocol_len(text: &str) -> Option<usize> {
    let idx = text.find("://")?;
    let scheme = &text[..idx];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(idx + 3)
}

/// A host is a dot-separated run of non-empty labels of alphanumerics, `-`
/// and `_`. Without a protocol or tail around it, a dot is also required,
/// so a bare word stays opaque.
fn is_host_like(host: &str, has_context: bool) -> bool {
    if host.is_empty() {
        return false;
    }
    let labels_ok = host.split('.').all(|label| {
        !label.is_empty() && label.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    });
    labels_ok && (has_context || host.contains('.'))
}

//! Context normalization: reassembling the selected regions of a URL.

use tracing::debug;

use crate::types::{RegionSet, RegionTag};
use crate::url::segmenter::{segment_with, ParsedUrl};
use crate::url::suffix::{SuffixRules, SuffixTable};

/// Concatenate the selected regions of `parsed` in fixed region order.
///
/// Opaque input and an empty selection both return the original text. No
/// separators are added or removed: selecting protocol and tail of
/// `http://host/path` yields `http:///path`. The only joining character is
/// the host's own dot between subdomain and domain, which appears when both
/// of those regions are selected.
///
/// # Examples
///
/// ```
/// use pwmaker::{normalize, segment, RegionSet};
///
/// let parsed = segment("http://www.google.com/search?q=password+maker");
/// let regions: RegionSet = "protocol,tail".parse().unwrap();
/// assert_eq!(normalize(&parsed, regions), "http:///search?q=password+maker");
///
/// let regions: RegionSet = "subdomain,domain".parse().unwrap();
/// assert_eq!(normalize(&parsed, regions), "www.google.com");
/// ```
pub fn normalize(parsed: &ParsedUrl<'_>, regions: RegionSet) -> String {
    if !parsed.valid || regions.is_empty() {
        debug!(valid = parsed.valid, regions = regions.len(), "context left unmodified");
        return parsed.input.to_string();
    }

    let both_host_parts = regions.contains(RegionTag::Subdomain) && regions.contains(RegionTag::Domain);

    let mut out = String::with_capacity(parsed.input.len());
    for tag in regions.iter() {
        match tag {
            RegionTag::Protocol => out.push_str(parsed.protocol),
            RegionTag::Subdomain if both_host_parts => out.push_str(parsed.host()),
            RegionTag::Subdomain => out.push_str(parsed.subdomain),
            RegionTag::Domain if both_host_parts => {}
            RegionTag::Domain => out.push_str(parsed.domain),
            RegionTag::Tail => out.push_str(parsed.tail),
        }
    }

    debug!(regions = regions.len(), len = out.len(), "context normalized");
    out
}

/// Segment `text` with the built-in suffix table and normalize it.
pub fn context_for(text: &str, regions: RegionSet) -> String {
    context_with(text, regions, SuffixTable::builtin())
}

/// Segment `text` with `rules` and normalize it.
pub fn context_with(text: &str, regions: RegionSet, rules: &dyn SuffixRules) -> String {
    normalize(&segment_with(text, rules), regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::segmenter::segment;

    fn regions(list: &str) -> RegionSet {
        list.parse().unwrap()
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let input = "http://www.google.com/search?q=password+maker";
        assert_eq!(context_for(input, RegionSet::empty()), input);
    }

    #[test]
    fn test_opaque_input_is_identity() {
        let input = "This is Not A Url";
        assert_eq!(context_for(input, regions("domain,protocol,tail")), input);
    }

    #[test]
    fn test_single_regions() {
        let parsed = segment("http://www.google.com/search?q=password+maker");
        assert_eq!(normalize(&parsed, regions("protocol")), "http://");
        assert_eq!(normalize(&parsed, regions("subdomain")), "www");
        assert_eq!(normalize(&parsed, regions("domain")), "google.com");
        assert_eq!(normalize(&parsed, regions("tail")), "/search?q=password+maker");
    }

    #[test]
    fn test_subdomain_and_domain_keep_host_dot() {
        assert_eq!(context_for("www.google.co.uk", regions("domain,subdomain")), "www.google.co.uk");
        assert_eq!(context_for("google.co.uk", regions("domain,subdomain")), "google.co.uk");
    }

    #[test]
    fn test_all_regions_reproduce_input() {
        let input = "https://a.b.example.com:8443/x?y#z";
        assert_eq!(context_for(input, regions("protocol,subdomain,domain,tail")), input);
    }

    #[test]
    fn test_empty_subdomain_selected_alone() {
        assert_eq!(context_for("google.co.uk", regions("subdomain")), "");
    }
}

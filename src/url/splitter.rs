//! Registrable domain splitting driven by a suffix table.

use crate::url::suffix::{SuffixRules, SuffixTable};

/// Split a host into `(subdomain, domain)` using the built-in suffix table.
///
/// The registrable domain is the longest matching effective suffix plus one
/// label; everything in front of it is the subdomain. Both parts are slices
/// of `host`, so the caller's spelling and case are preserved.
///
/// # Examples
///
/// ```
/// use pwmaker::split_host;
///
/// assert_eq!(split_host("www.google.co.uk"), ("www", "google.co.uk"));
/// assert_eq!(split_host("sub.domain.www.google.co.uk"), ("sub.domain.www", "google.co.uk"));
/// assert_eq!(split_host("localhost"), ("", "localhost"));
/// ```
pub fn split_host(host: &str) -> (&str, &str) {
    split_host_with(host, SuffixTable::builtin())
}

/// Split a host into `(subdomain, domain)` with a caller-provided rule set.
///
/// If no rule matches, the last two labels form the domain. A host that is
/// exactly a known suffix (`co.uk`) is returned whole as the domain.
pub fn split_host_with<'a>(host: &'a str, rules: &dyn SuffixRules) -> (&'a str, &'a str) {
    let labels: Vec<&str> = host.split('.').collect();

    let domain_labels = match rules.suffix_len(&labels) {
        Some(suffix) => suffix + 1,
        None => 2,
    };

    if domain_labels >= labels.len() {
        return ("", host);
    }

    // Byte offset of the first domain label: skip the subdomain labels and
    // the dot that follows each of them.
    let sub_labels = labels.len() - domain_labels;
    let sub_len: usize = labels[..sub_labels].iter().map(|l| l.len()).sum::<usize>() + sub_labels - 1;

    (&host[..sub_len], &host[sub_len + 1..])
}

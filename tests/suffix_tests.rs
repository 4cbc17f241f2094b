//! Tests for suffix tables and host splitting.

use std::fs;
use std::path::PathBuf;

use pwmaker::*;

fn labels(host: &str) -> Vec<&str> {
    host.split('.').collect()
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pwmaker-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_split_host_builtin() {
    let test_cases = vec![
        ("www.google.com", "www", "google.com"),
        ("google.com", "", "google.com"),
        ("a.b.c.google.co.uk", "a.b.c", "google.co.uk"),
        ("www.google.act.edu.au", "www", "google.act.edu.au"),
        ("shop.city.kawasaki.jp", "shop", "city.kawasaki.jp"),
        ("shop.foo.kawasaki.jp", "", "shop.foo.kawasaki.jp"),
        ("www.ck", "", "www.ck"),
        ("my.shop.co.ck", "my", "shop.co.ck"),
    ];

    for (host, sub, domain) in test_cases {
        assert_eq!(split_host(host), (sub, domain), "Split failed for: {}", host);
    }
}

#[test]
fn test_unknown_tld_falls_back_to_two_labels() {
    assert_eq!(split_host("www.example.notarealtld"), ("www", "example.notarealtld"));
    assert_eq!(split_host("localhost"), ("", "localhost"));
}

#[test]
fn test_host_equal_to_suffix_is_whole_domain() {
    assert_eq!(split_host("co.uk"), ("", "co.uk"));
    assert_eq!(split_host("act.edu.au"), ("", "act.edu.au"));
}

#[test]
fn test_split_preserves_case() {
    assert_eq!(split_host("WWW.Google.Co.UK"), ("WWW", "Google.Co.UK"));
}

#[test]
fn test_split_host_with_custom_table() {
    let table = SuffixTable::parse("// test\ncom\nblogspot.com\n").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(split_host_with("me.blogspot.com", &table), ("", "me.blogspot.com"));
    assert_eq!(split_host_with("www.me.blogspot.com", &table), ("www", "me.blogspot.com"));
    assert_eq!(split_host_with("www.google.com", &table), ("www", "google.com"));
}

#[test]
fn test_split_host_with_psl() {
    assert_eq!(
        split_host_with("www.google.co.uk", &PublicSuffixList),
        ("www", "google.co.uk")
    );
    assert_eq!(
        split_host_with("a.b.example.com.au", &PublicSuffixList),
        ("a.b", "example.com.au")
    );
    assert_eq!(
        split_host_with("www.example.notarealtld", &PublicSuffixList),
        ("www", "example.notarealtld")
    );
}

#[test]
fn test_builtin_exception_rules() {
    let table = SuffixTable::builtin();
    assert_eq!(table.suffix_len(&labels("city.kobe.jp")), Some(2));
    assert_eq!(table.suffix_len(&labels("www.city.kobe.jp")), Some(2));
    assert_eq!(table.suffix_len(&labels("www.foo.kobe.jp")), Some(3));
}

#[test]
fn test_rule_parsing_from_table() {
    let rules: Vec<SuffixRule> = ["uk", "*.sch.uk", "!www.sch.uk"]
        .iter()
        .map(|r| SuffixRule::parse(r).unwrap())
        .collect();
    let table = SuffixTable::from_rules(rules);
    assert_eq!(table.len(), 3);
    assert_eq!(table.suffix_len(&labels("school.kent.sch.uk")), Some(3));
    assert_eq!(table.suffix_len(&labels("www.sch.uk")), Some(2));
}

#[test]
fn test_load_from_file() {
    let path = scratch_file("suffixes.dat", "// VERSION: test\nexample\n*.wild.example\n");
    let table = SuffixTable::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(split_host_with("a.b.c.wild.example", &table), ("a", "b.c.wild.example"));
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("pwmaker-definitely-missing.dat");
    assert!(matches!(SuffixTable::load(&path), Err(PwmError::Io(_))));
}

#[test]
fn test_load_malformed_file() {
    let path = scratch_file("broken.dat", "com\n\n*bad.rule\n");
    let result = SuffixTable::load(&path);
    fs::remove_file(&path).unwrap();

    assert_eq!(
        result.unwrap_err(),
        PwmError::InvalidSuffixRule { line: 3, rule: "*bad.rule".to_string() }
    );
}

//! Tests for profile files.

use std::fs;

use pwmaker::config::{ProfileFile, DEFAULT_PROFILE};
use pwmaker::*;

#[test]
fn test_missing_file_uses_builtin_default() {
    let path = std::env::temp_dir().join("pwmaker-no-such-profiles.toml");
    let file = ProfileFile::load_or_default(&path).unwrap();
    assert_eq!(file.profile(DEFAULT_PROFILE).unwrap(), Profile::default());
}

#[test]
fn test_load_from_disk() {
    let path = std::env::temp_dir().join(format!("pwmaker-{}-profiles.toml", std::process::id()));
    fs::write(
        &path,
        r#"
        [profiles.default]

        [profiles.mail]
        regions = ["subdomain", "domain"]
        algorithm = "hmac-sha256"
        encoding = "alnum"
        length = 16
        "#,
    )
    .unwrap();
    let file = ProfileFile::load_or_default(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(file.names().collect::<Vec<_>>(), vec!["default", "mail"]);
    assert_eq!(file.profile("default").unwrap(), Profile::default());

    let mail = file.profile("mail").unwrap();
    assert_eq!(mail.algorithm, HashAlgorithm::HmacSha256);
    assert_eq!(mail.encoding, Encoding::Alphanumeric);
    assert_eq!(mail.length.bound(), Some(16));

    // Domain-only selection reproduces the known vector for these parameters
    let domain_only = mail.with_regions("domain".parse().unwrap());
    assert_eq!(
        generate("https://google.com/", b"master", &domain_only).unwrap(),
        "CIfmZPZjVEZHO2zJ"
    );
}

#[test]
fn test_invalid_profiles_rejected() {
    let test_cases = vec![
        ("regions = [\"domain\", \"domain\"]", PwmError::DuplicateRegion(RegionTag::Domain)),
        ("algorithm = \"md4\"", PwmError::UnknownAlgorithm("md4".to_string())),
        ("encoding = \"base64\"", PwmError::UnknownEncoding("base64".to_string())),
        ("length = 0", PwmError::InvalidLength),
        ("length = 9223372036854775807", PwmError::InvalidLength),
        ("length = 1025", PwmError::InvalidLength),
        ("iterations = 0", PwmError::InvalidIterations),
        (
            "length = 3\nprefix = \"abcd\"",
            PwmError::AffixesExceedLength { affixes: 4, length: 3 },
        ),
    ];

    for (body, expected) in test_cases {
        let file = ProfileFile::parse(&format!("[profiles.bad]\n{}\n", body)).unwrap();
        assert_eq!(file.profile("bad"), Err(expected), "Profile body: {}", body);
    }
}

#[test]
fn test_unknown_region_name_is_parse_error() {
    let result = ProfileFile::parse("[profiles.bad]\nregions = [\"fragment\"]\n");
    assert!(matches!(result, Err(PwmError::Config(_))));
}

#[test]
fn test_custom_alphabet_rules() {
    let ok = ProfileFile::parse("[profiles.p]\nencoding = \"custom\"\nalphabet = \"01\"\n").unwrap();
    assert_eq!(ok.profile("p").unwrap().encoding, Encoding::custom("01").unwrap());

    let test_cases = vec![
        "encoding = \"custom\"",
        "encoding = \"custom\"\nalphabet = \"a\"",
        "encoding = \"custom\"\nalphabet = \"abca\"",
        "encoding = \"hex\"\nalphabet = \"abc\"",
    ];
    for body in test_cases {
        let file = ProfileFile::parse(&format!("[profiles.p]\n{}\n", body)).unwrap();
        assert!(
            matches!(file.profile("p"), Err(PwmError::InvalidAlphabet(_))),
            "Profile body: {}",
            body
        );
    }
}

#[test]
fn test_malformed_toml() {
    assert!(matches!(ProfileFile::parse("[profiles.x\n"), Err(PwmError::Config(_))));
}

#[test]
fn test_empty_file_has_no_profiles() {
    let file = ProfileFile::parse("").unwrap();
    assert_eq!(file.names().count(), 0);
    assert_eq!(
        file.profile(DEFAULT_PROFILE),
        Err(PwmError::ProfileNotFound(DEFAULT_PROFILE.to_string()))
    );
}

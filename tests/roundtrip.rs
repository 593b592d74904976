#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for lossless parsing of real-world files.
//!
//! Every fixture must serialize back to its exact input, and the parsed
//! model must expose the sections and directives a reader would expect.

mod common;

use confpatch::ini::{Document, LineEnding, Line, parse};

fn reparse(text: &str) -> Document {
    let doc = parse(text).expect("fixture parses");
    assert_eq!(doc.serialize(), text, "serialization must be byte-identical");
    doc
}

// ---------------------------------------------------------------------------
// Byte-identical round trips
// ---------------------------------------------------------------------------

#[test]
fn wireguard_config_round_trips() {
    let doc = reparse(&common::fixture("wg0.conf"));
    let titles: Vec<&str> = doc.sections().iter().map(|s| s.title()).collect();
    assert_eq!(titles, ["Interface", "Peer", "Peer"]);
    assert_eq!(doc.leading_lines().len(), 3);
}

#[test]
fn systemd_unit_round_trips() {
    let doc = reparse(&common::fixture("app.service"));
    let service = &doc.sections()[1];
    assert_eq!(service.get("Environment"), Some("\"RUST_LOG=info\""));
    // Trailing tab is kept outside the value.
    assert_eq!(service.get("Restart"), Some("on-failure"));
}

#[test]
fn escaped_hash_stays_in_value() {
    let doc = reparse(&common::fixture("app.service"));
    assert_eq!(
        doc.sections()[0].get("Description"),
        Some("Example daemon \\# not a comment")
    );
}

#[test]
fn crlf_file_round_trips() {
    let text = common::fixture("wg0.conf").replace('\n', "\r\n");
    let doc = reparse(&text);
    assert_eq!(doc.line_ending(), LineEnding::CrLf);
}

#[test]
fn file_without_final_newline_round_trips() {
    let text = common::fixture("app.service");
    let doc = reparse(text.trim_end_matches('\n'));
    assert!(!doc.has_final_newline());
}

#[test]
fn bom_round_trips() {
    let text = format!("\u{feff}{}", common::fixture("wg0.conf"));
    assert!(reparse(&text).has_bom());
}

// ---------------------------------------------------------------------------
// Model shape
// ---------------------------------------------------------------------------

#[test]
fn inline_and_indented_comments_are_kept() {
    let doc = reparse(&common::fixture("wg0.conf"));
    let office = &doc.sections()[1];
    assert_eq!(office.title_line().comment(), Some(" office"));
    assert!(
        office
            .lines()
            .iter()
            .any(|line| matches!(line, Line::Comment(c) if c.indent() == "    "))
    );
}

#[test]
fn duplicate_keys_keep_file_order() {
    let doc = reparse(&common::fixture("wg0.conf"));
    let values: Vec<&str> = doc.sections()[0].values("Address").collect();
    assert_eq!(values, ["10.0.0.1/24", "fd00::1/64"]);
}

#[test]
fn peers_are_found_by_public_key() {
    let doc = reparse(&common::fixture("wg0.conf"));
    let id = doc
        .single_section_by_directive(
            "Peer",
            ("PublicKey", "BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB="),
        )
        .unwrap()
        .expect("laptop peer");
    assert_eq!(id.index(), 2);
    assert_eq!(doc.section(id).unwrap().get("AllowedIPs"), Some("10.0.0.3/32"));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn bare_newline_in_crlf_file_is_rejected() {
    let err = parse("[A]\r\nk=v\nj=w\r\n").unwrap_err();
    assert!(err.to_string().contains("inconsistent line terminators"));
}

#[test]
fn localized_desktop_keys_are_rejected() {
    // `[` before `=` makes the line a malformed title.
    let err = parse("[Desktop Entry]\nName[de]=Beispiel\n").unwrap_err();
    assert_eq!(err.line, 2);
}

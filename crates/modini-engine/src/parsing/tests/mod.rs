//! Fixture tests for the parsing module.
//!
//! Each fixture `name.ini` sits next to `name.expected.ini`, the text the parsed document
//! must serialize to.


use pretty_assertions::assert_eq;

use crate::{Document, DocumentItem, ParserOptions, SectionEntry, SectionMode};

// Fixture-based tests

#[test]
fn fixture_character_mod() {
    assert_fixture("character_mod", ParserOptions::default());
}

#[test]
fn fixture_duplicates() {
    assert_fixture("duplicates", ParserOptions::default());
}

#[test]
fn fixture_raw_blank_lines() {
    assert_fixture("raw_blank_lines", ParserOptions::default());
}

#[test]
fn fixture_headerless() {
    assert_fixture(
        "headerless",
        ParserOptions::default().allow_headerless_section(true),
    );
}

fn assert_fixture(name: &str, options: ParserOptions) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let input = std::fs::read_to_string(format!("{fixtures_dir}/{name}.ini")).unwrap();
    let expected = std::fs::read_to_string(format!("{fixtures_dir}/{name}.expected.ini")).unwrap();

    let doc = Document::parse(&input, options).unwrap();
    invariants::check(&doc);

    let output = doc.serialize(false);
    assert_eq!(output, expected);
    invariants::check_fixed_point(&output, options);
}

// Structural tests

#[test]
fn unparsable_line_poisons_rest_of_section() {
    let doc = Document::parse(
        "[TextureOverrideBodyIB]\nhash = c1ae1cb5\nif $swapvar == 0\nib = ResourceBodyIB.0\nendif\n[Present]\npost $active = 0\n",
        ParserOptions::default(),
    )
    .unwrap();

    let body = doc.get_section("TextureOverrideBodyIB").unwrap();
    assert_eq!(body.mode(), SectionMode::Raw { since: 1 });
    assert_eq!(body.option_names(), vec!["hash"]);
    assert!(!body.has_option("ib"));

    // The next header starts fresh.
    let present = doc.get_section("Present").unwrap();
    assert_eq!(present.mode(), SectionMode::Structured);
    assert_eq!(present.get("post $active").unwrap(), "0");
}

#[test]
fn command_sections_never_parse_options() {
    let doc = Document::parse(
        "[CommandListSkin]\nps-t0 = ResourceSkinDiffuse\n; note\n",
        ParserOptions::default(),
    )
    .unwrap();

    let section = doc.get_section("CommandListSkin").unwrap();
    assert!(section.option_names().is_empty());
    assert_eq!(section.len(), 2);
}

#[test]
fn crlf_input_is_read_like_lf() {
    let lf = Document::parse("[A]\nx = 1\n", ParserOptions::default()).unwrap();
    let crlf = Document::parse("[A]\r\nx = 1\r\n", ParserOptions::default()).unwrap();
    assert_eq!(lf, crlf);
}

#[test]
fn comments_before_first_header_stay_at_document_level() {
    let doc = Document::parse("; one\n\n; two\n[A]\n", ParserOptions::default()).unwrap();

    assert_eq!(doc.items().len(), 3);
    assert_eq!(doc.serialize(false), "; one\n\n; two\n\n[A]\n");
}

#[test]
fn comments_under_repeated_header_move_to_document_level() {
    let doc = Document::parse(
        "[A]\nx = 1\n\n[B]\ny = 2\n\n[A]\n; keep me\nz = 3\n",
        ParserOptions::default(),
    )
    .unwrap();

    assert!(matches!(doc.items().last(), Some(DocumentItem::Comment(c)) if c.text() == "; keep me"));
    assert!(!doc.has_option("A", "z"));
    assert_eq!(doc.serialize(false), "[A]\nx = 1\n\n[B]\ny = 2\n\n; keep me\n");
}

#[test]
fn blank_before_comment_in_raw_section_is_stored() {
    let doc = Document::parse(
        "[CommandListSkin]\nrun = CommandListA\n\n\n; second part\n",
        ParserOptions::default(),
    )
    .unwrap();

    let section = doc.get_section("CommandListSkin").unwrap();
    assert_eq!(
        section.entries(),
        &[
            SectionEntry::Raw("run = CommandListA".to_string()),
            SectionEntry::Raw(String::new()),
            SectionEntry::Raw("; second part".to_string()),
        ]
    );
}

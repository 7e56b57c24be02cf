use rs_textextract::{
    extract_text, DomTextExtractor, Error, Options, TextExtractor, INCLUDE_PATTERNS_KEY,
};
use serde_json::json;

const PAGE: &str = r#"
<html>
<head><style>p { color: red; }</style></head>
<body>
  <div id="sidebar">Related links</div>
  <div itemprop="articleBody"><p>Main story.</p><script>ads()</script></div>
  <article><p>Teaser.</p></article>
</body>
</html>
"#;

#[test]
fn options_from_crawler_conf_drive_extraction() {
    let conf = json!({
        "textextractor.include.pattern": [
            "DIV[id=\"maincontent\"]",
            "DIV[itemprop=\"articleBody\"]",
            "ARTICLE"
        ],
        "textextractor.exclude.tags": ["STYLE", "SCRIPT"],
        "textextractor.skip.after": -1,
        "fetcher.threads.number": 10
    });
    let options = Options::from_value(conf).unwrap();

    assert_eq!(extract_text(PAGE, &options).unwrap(), "Main story.");
}

#[test]
fn options_without_patterns_use_whole_document_minus_excluded() {
    let conf = r#"{"textextractor.exclude.tags": ["style", "script"]}"#;
    let options = Options::from_json_str(conf).unwrap();

    assert_eq!(extract_text(PAGE, &options).unwrap(), "Related links Main story. Teaser.");
}

#[test]
fn options_default_keeps_everything() {
    let result = extract_text(PAGE, &Options::default()).unwrap();

    assert!(result.contains("p { color: red; }"));
    assert!(result.contains("ads()"));
    assert!(result.contains("Teaser."));
}

#[test]
fn options_no_text_from_conf() {
    let options = Options::from_json_str(r#"{"textextractor.no.text": true}"#).unwrap();
    assert_eq!(extract_text(PAGE, &options).unwrap(), "");
}

#[test]
fn options_skip_after_caps_output() {
    let options = Options::from_json_str(r#"{"textextractor.skip.after": 12}"#).unwrap();
    let result = extract_text("<p>0123456789</p><p>abcdefghij</p>", &options).unwrap();

    assert_eq!(result, "0123456789 a");
}

#[test]
fn options_malformed_pattern_is_an_error() {
    let options = Options::from_value(json!({ INCLUDE_PATTERNS_KEY: ["p[[", "p"] })).unwrap();

    match extract_text("<p>text</p>", &options) {
        Err(Error::Selector { pattern, .. }) => assert_eq!(pattern, "p[["),
        other => panic!("expected selector error, got {other:?}"),
    }
}

#[test]
fn options_extractor_reusable_across_documents() {
    let extractor = DomTextExtractor::new(&Options {
        include_patterns: vec!["main".into()],
        ..Options::default()
    });

    for (html, expected) in [
        ("<main>First</main><p>x</p>", "First"),
        ("<p>No main here</p>", "No main here"),
    ] {
        let mut parsed = rs_textextract::dom::parse(html);
        let root = parsed.document.root();
        let result = extractor
            .text(&mut parsed.document, root, &parsed.selector)
            .unwrap();
        assert_eq!(result, expected);
    }
}

#[test]
fn options_bad_conf_type_is_config_error() {
    let err = Options::from_json_str(r#"{"textextractor.skip.after": "lots"}"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

//! Edge case tests
//!
//! Unusual inputs, boundary conditions, and hand-built trees.

use rs_textextract::dom::{self, Document, NodeId};
use rs_textextract::{
    extract_text, extract_text_bytes, DomTextExtractor, Error, NoSelector, Options, TextExtractor,
};

fn text(html: &str, options: &Options) -> String {
    match extract_text(html, options) {
        Ok(text) => text,
        Err(err) => panic!("Extraction failed: {err:?}"),
    }
}

#[test]
fn test_empty_and_whitespace_only_documents() {
    assert_eq!(text("", &Options::default()), "");
    assert_eq!(text("<html><body></body></html>", &Options::default()), "");
    assert_eq!(text("<body> \n\t </body>", &Options::default()), "");
}

#[test]
fn test_malformed_html_is_handled() {
    let html = "<html><body><p>Unclosed paragraph<div>Nested<p>Badly</body>";
    assert_eq!(text(html, &Options::default()), "Unclosed paragraph Nested Badly");
}

#[test]
fn test_deeply_nested_document_does_not_overflow() {
    let depth = 512;
    let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
    assert_eq!(text(&html, &Options::default()), "deep");
}

#[test]
fn test_wide_flat_document() {
    let lines = 50_000;
    let html = format!("<body>{}</body>", "line<br>".repeat(lines));
    let result = text(&html, &Options::default());
    assert_eq!(result.split(' ').count(), lines);

    let html = format!("<body>{}</body>", "<p>para</p>tail".repeat(lines));
    let result = text(&html, &Options::default());
    assert_eq!(result.matches("para tail").count(), lines);
}

#[test]
fn test_nested_excluded_tags_use_outermost() {
    let options = Options {
        exclude_tags: vec!["aside".into(), "nav".into()],
        ..Options::default()
    };
    let html = "<aside>a<nav>b</nav>c</aside>visible";
    assert_eq!(text(html, &options), "visible");

    let html = "<aside>a<aside>b</aside>still hidden</aside>shown";
    assert_eq!(text(html, &options), "shown");
}

#[test]
fn test_excluded_region_inside_scope() {
    let options = Options {
        include_patterns: vec!["article".into()],
        exclude_tags: vec!["figure".into()],
        ..Options::default()
    };
    let html = concat!(
        "<p>outside</p>",
        "<article><p>kept</p><figure>caption</figure><p>also kept</p></article>",
    );
    assert_eq!(text(html, &options), "kept also kept");
}

#[test]
fn test_entities_and_nbsp_are_normalized() {
    let html = "<p>Fish&nbsp;&amp;&nbsp;&nbsp;Chips &lt;3</p>";
    assert_eq!(text(html, &Options::default()), "Fish & Chips <3");
}

#[test]
fn test_unicode_size_cap_counts_characters() {
    let options = Options {
        max_text_size: 4,
        ..Options::default()
    };
    let result = text("<p>日本語テキスト</p>", &options);
    assert_eq!(result, "日本語テ");
}

#[test]
fn test_size_cap_with_regions() {
    let options = Options {
        include_patterns: vec!["p".into()],
        max_text_size: 8,
        ..Options::default()
    };
    let result = text("<p>abcdef</p><p>ghijkl</p>", &options);
    assert!(result.chars().count() <= 8, "got {result:?}");
    assert!(result.starts_with("abcdef"));
}

#[test]
fn test_preserve_whitespace_depth_is_bounded() {
    let shallow = "<pre><b><i><u><s>a  b</s></u></i></b></pre>";
    assert_eq!(text(shallow, &Options::default()), "a  b");

    let deep = "<pre><b><i><u><s><em><small>a  b</small></em></s></u></i></b></pre>";
    assert_eq!(text(deep, &Options::default()), "a b");
}

#[test]
fn test_textarea_keeps_whitespace() {
    let html = "<form><textarea>line 1\n   line 2</textarea></form>";
    assert_eq!(text(html, &Options::default()), "line 1\n   line 2");
}

#[test]
fn test_bytes_with_declared_charset() {
    let html: &[u8] =
        b"<html><head><meta charset=\"windows-1252\"></head><p>\x93Quoted\x94</p></html>";
    let result = extract_text_bytes(html, &Options::default()).unwrap();
    assert_eq!(result, "\u{201C}Quoted\u{201D}");
}

#[test]
fn test_scoped_subtree_root() {
    let mut parsed = dom::parse("<div id=\"a\">First</div><div id=\"b\">Second <b>bold</b></div>");
    let doc = &parsed.document;
    let body = doc.children(doc.first_child(doc.root()).unwrap())[1];
    let second = doc.children(body)[1];

    let result = DomTextExtractor::default()
        .text(&mut parsed.document, second, &parsed.selector)
        .unwrap();
    assert_eq!(result, "Second bold");
}

fn hand_built() -> (Document, NodeId) {
    // <body><p>Intro</p><![CDATA[raw  data ]]><!--ignored-->tail</body>
    let mut doc = Document::new();
    let body = doc.create_element("BODY");
    let p = doc.create_element("p");
    let intro = doc.create_text("Intro");
    let cdata = doc.create_cdata("raw  data ");
    let tail = doc.create_text("tail");
    let comment = doc.create_comment("ignored");
    let root = doc.root();
    doc.append_child(root, body).unwrap();
    doc.append_child(body, p).unwrap();
    doc.append_child(p, intro).unwrap();
    doc.append_child(body, cdata).unwrap();
    doc.append_child(body, comment).unwrap();
    doc.append_child(body, tail).unwrap();
    (doc, body)
}

#[test]
fn test_hand_built_tree_with_cdata() {
    let (mut doc, body) = hand_built();

    let result = DomTextExtractor::default()
        .text(&mut doc, body, &NoSelector)
        .unwrap();

    // the block before a CDATA section counts as text-adjacent; CDATA is kept verbatim
    assert_eq!(result, "Intro raw  data tail");
}

#[test]
fn test_hand_built_tree_with_closure_selector() {
    let (mut doc, body) = hand_built();
    let p = doc.first_child(body).unwrap();
    let extractor = DomTextExtractor::new(&Options {
        include_patterns: vec!["intro".into()],
        ..Options::default()
    });

    let selector = |_: &Document, _: NodeId, pattern: &str| -> rs_textextract::Result<Vec<NodeId>> {
        Ok(if pattern == "intro" { vec![p] } else { Vec::new() })
    };
    let result = extractor.text(&mut doc, body, &selector).unwrap();

    assert_eq!(result, "Intro");
}

#[test]
fn test_selector_errors_surface_from_custom_service() {
    let (mut doc, body) = hand_built();
    let extractor = DomTextExtractor::new(&Options {
        include_patterns: vec!["broken".into()],
        ..Options::default()
    });

    let selector = |_: &Document, _: NodeId, pattern: &str| -> rs_textextract::Result<Vec<NodeId>> {
        Err(Error::Selector {
            pattern: pattern.to_string(),
            reason: "unsupported".into(),
        })
    };

    assert!(matches!(extractor.text(&mut doc, body, &selector), Err(Error::Selector { .. })));
}

#[test]
fn test_concurrent_extraction_shares_extractor() {
    let extractor = DomTextExtractor::new(&Options {
        exclude_tags: vec!["script".into()],
        ..Options::default()
    });

    std::thread::scope(|scope| {
        for i in 0..4 {
            let extractor = &extractor;
            scope.spawn(move || {
                let html = format!("<p>Doc {i}</p><script>x()</script>");
                let mut parsed = dom::parse(&html);
                let root = parsed.document.root();
                let result = extractor
                    .text(&mut parsed.document, root, &parsed.selector)
                    .unwrap();
                assert_eq!(result, format!("Doc {i}"));
            });
        }
    });
}

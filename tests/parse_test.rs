//! End-to-end parsing tests over realistic roundup payloads.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use std::sync::Arc;
use std::thread;

use pai_apps::images::image_filename;
use pai_apps::render::app_name;
use pai_apps::{parse_article, ArticleParser, Error, Options, PayloadShape};
use serde_json::{json, Value};

/// Older layout: the apps sit between the first and second <h2>.
fn heading_article() -> Value {
    json!({
        "id": 86_000,
        "title": "派评 | 近期值得关注的 App（第 1 期）",
        "released_time": 1_709_310_600,
        "body": r#"
            <p>本期推荐以下 App。</p>
            <h2>App 速览</h2>
            <p>导语</p>
            <h3>Bear：Markdown 笔记</h3>
            <p><img src="https://cdnfile.sspai.com/2024/03/01/bear.png?imageView2/2/w/1120" alt="Bear"></p>
            <p>Bear is a <strong>beautiful</strong> note app.</p>
            <ul>
                <li>平台：iOS / macOS</li>
                <li>关键词：笔记、Markdown</li>
            </ul>
            <h3>Reeder 5: RSS reader</h3>
            <p><img src="https://cdnfile.sspai.com/2024/03/01/reeder.gif" alt="Reeder"></p>
            <p><img src="https://cdnfile.sspai.com/2024/03/01/reeder-2.JPG?v=2" alt="Reeder timeline"></p>
            <ul><li>平台：iOS，macOS</li></ul>
            <h2>其他内容</h2>
            <h3>Not an app</h3>
            <p>ignored</p>
        "#
    })
}

/// Newer layout: pre-segmented body blocks with an intro and an outro.
fn block_article() -> Value {
    json!({
        "id": 87_000,
        "title": "派评 | 近期值得关注的 App（第 2 期）",
        "released_time": 1_709_310_600,
        "body": "<p>intro only</p>",
        "body_extends": [
            {"title": "导语", "body": "<p>intro</p>"},
            {"title": "Things 3：任务管理", "body": "<p>Tasks.</p><ul><li>平台：iOS</li></ul>"},
            {"title": "Raycast", "body": "<p><img src=\"https://cdnfile.sspai.com/r.jpeg?x=1\" alt=\"Raycast\"></p><ul><li>平台: macOS</li></ul>"},
            {"title": "结语", "body": "<p>outro</p>"}
        ]
    })
}

fn frontmatter_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    let prefix = format!("{key}: ");
    content
        .split("\n---\n")
        .next()?
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
}

#[test]
fn heading_layout_yields_one_record_per_h3_in_order() {
    let parsed = parse_article(&heading_article()).expect("parses");

    assert_eq!(parsed.strategy, Some(PayloadShape::Headings));
    let titles: Vec<&str> = parsed.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Bear：Markdown 笔记", "Reeder 5: RSS reader"]);

    for record in &parsed.records {
        let name = frontmatter_value(&record.content, "app_name").expect("app_name present");
        let title = frontmatter_value(&record.content, "title").expect("title present");
        assert!(title.starts_with(name), "{name:?} is not a prefix of {title:?}");
    }
    assert_eq!(frontmatter_value(&parsed.records[0].content, "app_name"), Some("Bear"));
    assert_eq!(frontmatter_value(&parsed.records[1].content, "app_name"), Some("Reeder 5"));
}

#[test]
fn heading_layout_extracts_metadata() {
    let parsed = parse_article(&heading_article()).expect("parses");
    let bear = &parsed.records[0];

    assert_eq!(bear.platforms, vec!["iOS", "macOS"]);
    assert_eq!(bear.keywords, vec!["笔记", "Markdown"]);
    assert_eq!(bear.file_title, "Bear-Markdown 笔记");
    assert_eq!(frontmatter_value(&bear.content, "platforms"), Some("iOS,macOS"));
    assert_eq!(frontmatter_value(&bear.content, "keywords"), Some("笔记,Markdown"));
    assert_eq!(frontmatter_value(&bear.content, "article_id"), Some("86000"));
    assert_eq!(
        frontmatter_value(&bear.content, "article_url"),
        Some("https://sspai.com/post/86000")
    );
    assert_eq!(
        frontmatter_value(&bear.content, "release_time"),
        Some("2024-03-02 00:30:00")
    );

    let reeder = &parsed.records[1];
    assert_eq!(reeder.platforms, vec!["iOS", "macOS"]);
    assert!(reeder.keywords.is_empty());
    assert_eq!(reeder.file_title, "Reeder 5- RSS reader");
}

#[test]
fn heading_layout_excludes_content_outside_window() {
    let parsed = parse_article(&heading_article()).expect("parses");
    for record in &parsed.records {
        assert!(!record.content.contains("本期推荐"));
        assert!(!record.content.contains("导语"));
        assert!(!record.content.contains("Not an app"));
        assert!(!record.content.contains("ignored"));
    }
}

#[test]
fn document_layout_is_frontmatter_heading_body() {
    let parsed = parse_article(&heading_article()).expect("parses");
    let content = &parsed.records[0].content;

    assert!(content.starts_with("---\napp_name: Bear\ntitle: Bear：Markdown 笔记\narticle_id: 86000\n"));
    assert!(content.contains("\n---\n\n# Bear：Markdown 笔记\n\n"));
    assert!(content.contains("beautiful"));
}

#[test]
fn image_urls_match_rewritten_references() {
    let parsed = parse_article(&heading_article()).expect("parses");

    let bear = &parsed.records[0];
    assert_eq!(
        bear.images,
        vec!["https://cdnfile.sspai.com/2024/03/01/bear.png?imageView2/2/w/1120/format/webp"]
    );

    let reeder = &parsed.records[1];
    assert_eq!(
        reeder.images,
        vec![
            "https://cdnfile.sspai.com/2024/03/01/reeder.gif",
            "https://cdnfile.sspai.com/2024/03/01/reeder-2.JPG?v=2/format/webp",
        ]
    );

    for record in &parsed.records {
        assert!(!record.content.contains("cdnfile.sspai.com"));
        for url in &record.images {
            let local = format!("images/{}", image_filename(url));
            assert_eq!(record.content.matches(&local).count(), 1, "{local} in {}", record.content);
        }
    }
}

#[test]
fn wrapped_images_are_rewritten_and_kept() {
    let payload = json!({
        "id": 88_000,
        "title": "派评 | 近期值得关注的 App",
        "released_time": 1_709_310_600,
        "body": r#"
            <h2>App 速览</h2>
            <h3>Figma：协作设计</h3>
            <figure>
                <img src="https://cdnfile.sspai.com/2024/03/01/figma.png?imageView2/2/w/1120" alt="Figma">
                <figcaption>Figma 主界面</figcaption>
            </figure>
            <p><a href="https://www.figma.com/"><img src="https://cdnfile.sspai.com/2024/03/01/figma-2.gif" alt="Figma link"></a></p>
            <ul><li>平台：Web</li></ul>
        "#
    });
    let parsed = parse_article(&payload).expect("parses");
    let record = &parsed.records[0];

    assert_eq!(
        record.images,
        vec![
            "https://cdnfile.sspai.com/2024/03/01/figma.png?imageView2/2/w/1120/format/webp",
            "https://cdnfile.sspai.com/2024/03/01/figma-2.gif",
        ]
    );
    assert!(!record.content.contains("cdnfile.sspai.com"));
    for url in &record.images {
        let local = format!("images/{}", image_filename(url));
        assert_eq!(record.content.matches(&local).count(), 1, "{local} in {}", record.content);
    }
    assert_eq!(record.platforms, vec!["Web"]);
}

#[test]
fn multiline_titles_render_on_one_line() {
    let payload = json!({
        "id": 89_000,
        "title": "派评 |\n近期值得关注的 App",
        "body": "<h2>App 速览</h2>\n<h3>\n    Bear\n    ：Markdown 笔记\n</h3>\n<p>notes</p>"
    });
    let parsed = parse_article(&payload).expect("parses");
    let record = &parsed.records[0];

    assert_eq!(record.title, "Bear ：Markdown 笔记");
    assert_eq!(record.file_title, "Bear -Markdown 笔记");
    assert_eq!(frontmatter_value(&record.content, "title"), Some("Bear ：Markdown 笔记"));
    assert_eq!(
        frontmatter_value(&record.content, "article_title"),
        Some("派评 | 近期值得关注的 App")
    );
    assert!(record.content.contains("\n# Bear ：Markdown 笔记\n\n"));
}

#[test]
fn block_layout_keeps_middle_entries() {
    let parsed = parse_article(&block_article()).expect("parses");

    assert_eq!(parsed.strategy, Some(PayloadShape::BlockList));
    let titles: Vec<&str> = parsed.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Things 3：任务管理", "Raycast"]);
    assert_eq!(parsed.records[0].platforms, vec!["iOS"]);
    assert_eq!(parsed.records[1].platforms, vec!["macOS"]);
    assert_eq!(
        parsed.records[1].images,
        vec!["https://cdnfile.sspai.com/r.jpeg?x=1/format/webp"]
    );
    assert!(parsed.records[1].content.contains("images/r.jpeg"));
    assert_eq!(frontmatter_value(&parsed.records[1].content, "app_name"), Some("Raycast"));
}

#[test]
fn short_block_list_uses_headings() {
    let mut payload = heading_article();
    payload["body_extends"] = json!([
        {"title": "导语", "body": "<p>intro</p>"},
        {"title": "结语", "body": "<p>outro</p>"}
    ]);
    let parsed = parse_article(&payload).expect("parses");
    assert_eq!(parsed.strategy, Some(PayloadShape::Headings));
    assert_eq!(parsed.len(), 2);
}

#[test]
fn no_headings_and_short_block_list_is_empty() {
    let payload = json!({
        "id": 1,
        "title": "派评 | 近期值得关注的 App",
        "body": "<h3>orphan</h3><p>no h2</p>",
        "body_extends": [{"title": "a", "body": "b"}]
    });
    let parsed = parse_article(&payload).expect("parses");
    assert!(parsed.is_empty());
    assert!(parsed.article.is_some());
    assert!(!parsed.diagnostics.is_empty());
}

#[test]
fn null_payload_is_empty() {
    let parsed = parse_article(&Value::Null).expect("null is not an error");
    assert!(parsed.is_empty());
    assert!(parsed.article.is_none());

    let parsed = ArticleParser::default().parse(None).expect("none is not an error");
    assert!(parsed.is_empty());
}

#[test]
fn missing_identifier_is_an_error() {
    let err = parse_article(&json!({"title": "派评", "body": ""})).unwrap_err();
    assert!(matches!(err, Error::MalformedPayload(_)));
}

#[test]
fn missing_timestamp_uses_placeholder_dates() {
    let mut payload = heading_article();
    payload
        .as_object_mut()
        .expect("object payload")
        .remove("released_time");
    let parsed = parse_article(&payload).expect("parses");
    let article = parsed.article.as_ref().expect("article present");
    assert_eq!(article.released_date, "1970-01-01");
    assert_eq!(
        frontmatter_value(&parsed.records[0].content, "release_time"),
        Some("1970-01-01 00:00:00")
    );
}

#[test]
fn custom_labels_and_url_base() {
    let options = Options {
        platform_label: "Platform".to_string(),
        keyword_label: "Tags".to_string(),
        article_url_base: "https://example.com/p/".to_string(),
        ..Options::default()
    };
    let payload = json!({
        "id": 3,
        "title": "roundup",
        "body": "<h2>Apps</h2><h3>Foo: bar</h3><ul><li>Platform: Linux / Web</li><li>Tags: cli</li></ul>"
    });
    let parsed = ArticleParser::new(options).parse(Some(&payload)).expect("parses");
    assert_eq!(parsed.records[0].platforms, vec!["Linux", "Web"]);
    assert_eq!(parsed.records[0].keywords, vec!["cli"]);
    assert_eq!(parsed.records[0].article.url, "https://example.com/p/3");
}

#[test]
fn app_name_is_prefix_of_title() {
    for title in ["Bear：笔记", "A: b: c", "NoColon", "", "：lead"] {
        assert!(title.trim().starts_with(app_name(title)), "{title:?}");
    }
}

#[test]
fn parsing_is_independent_across_threads() {
    let parser = Arc::new(ArticleParser::default());
    let payloads = Arc::new(vec![heading_article(), block_article()]);
    let expected: Vec<_> = payloads
        .iter()
        .map(|p| parser.parse(Some(p)).expect("parses").records)
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let parser = Arc::clone(&parser);
            let payloads = Arc::clone(&payloads);
            thread::spawn(move || {
                let payload = &payloads[i % 2];
                (i % 2, parser.parse(Some(payload)).expect("parses").records)
            })
        })
        .collect();

    for handle in handles {
        let (which, records) = handle.join().expect("thread finished");
        assert_eq!(records, expected[which]);
    }
}

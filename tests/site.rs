//! End-to-end tests against a running site server.

use std::time::Duration;

use axum::http::StatusCode;

mod common;

const LAYOUT: &str = "<!DOCTYPE html>\n<html {{ lang_attr }}>\n<head>{{ meta }}{{ head }}</head>\n<body{{ body_class }}>{{ body_open }}{{ part:content }}{{ body_close }}</body>\n</html>\n";

#[tokio::test]
async fn test_root_renders_index_with_baseline_hooks() {
    let themes = common::themes_dir(&[("index.html", LAYOUT), ("content.html", "<main>home</main>")]);
    let site = common::start_site(themes, |_| {}).await;

    let response = common::client().get(site.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=UTF-8"
    );

    let html = response.text().await.unwrap();
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<meta name=\"generator\" content=\"hookpress\">"));
    assert!(html.contains("<main>home</main>"));
    assert!(html.contains("Proudly powered by hookpress."));

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_named_page_and_not_found() {
    let themes = common::themes_dir(&[
        ("about-us.html", "{{ page_title }}"),
        ("404.html", "MISSING {{ page_title }}"),
    ]);
    let site = common::start_site(themes, |_| {}).await;
    let client = common::client();

    let response = client.get(site.url("/about-us")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "About Us");

    let response = client.get(site.url("/nowhere")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "MISSING 404 Not Found");

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_theme_assets_probed_against_static_files() {
    let themes = common::themes_dir(&[
        ("index.html", LAYOUT),
        ("content.html", "body"),
        ("app.js", "console.log(1);"),
        (
            "theme.toml",
            r#"
            supports = ["title-tag"]
            body_classes = ["plain home"]

            [[styles]]
            id = "theme"
            path = "theme.css"
            version = "1.0"

            [[styles]]
            id = "not-css"
            path = "index.html"

            [[scripts]]
            id = "app"
            path = "app.js"
            "#,
        ),
    ]);
    let site = common::start_site(themes, |_| {}).await;
    let base = site.url("/content/themes/plain");

    let html = common::client()
        .get(site.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("<title>Test Site</title>"));
    assert!(html.contains("<body class=\"plain home\">"));
    assert!(html.contains(&format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{base}/theme.css?ver=1.0\" id=\"theme-css\">"
    )));
    assert!(html.contains(&format!("src=\"{base}/app.js\" id=\"app-js\"></script>")));
    assert!(!html.contains("not-css-css"));

    let title = html.find("<title>").unwrap();
    let style = html.find("theme-css").unwrap();
    let script = html.find("app-js").unwrap();
    let attribution = html.find("Proudly powered").unwrap();
    assert!(title < style);
    assert!(attribution < script);

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_remote_assets_filtered_by_content_type() {
    let backend = common::start_asset_backend().await;
    let manifest = format!(
        r#"
        [[styles]]
        id = "remote"
        path = "http://{backend}/style.css"

        [[styles]]
        id = "plain"
        path = "http://{backend}/plain.css"

        [[scripts]]
        id = "remote"
        path = "http://{backend}/app.js"

        [[scripts]]
        id = "bare"
        path = "http://{backend}/bare.js"
        "#
    );
    let themes = common::themes_dir(&[
        ("index.html", "{{ head }}|{{ body_close }}"),
        ("theme.toml", &manifest),
    ]);
    let site = common::start_site(themes, |_| {}).await;

    let html = common::client()
        .get(site.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains(&format!("href=\"http://{backend}/style.css\" id=\"remote-css\"")));
    assert!(html.contains(&format!(
        "<script type=\"application/javascript\" src=\"http://{backend}/app.js\" id=\"remote-js\"></script>"
    )));
    assert!(!html.contains("plain-css"));
    assert!(!html.contains("bare-js"));

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_theme_actions_and_removals() {
    let themes = common::themes_dir(&[
        ("index.html", "{{ head }}[{{ body_open }}]{{ body_close }}{{ body_open }}"),
        (
            "theme.toml",
            r#"
            [[actions]]
            event = "body_open"
            name = "banner"
            html = "<h1>{{ config:name }} / {{ theme:name }} {{ theme:version }}</h1>"

            [[remove_actions]]
            event = "head"

            [[remove_actions]]
            event = "body_close"
            name = "attribution"
            "#,
        ),
    ]);
    let site = common::start_site(themes, |_| {}).await;

    let html = common::client()
        .get(site.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(html, "[<h1>Test Site / Plain 1.0</h1>]");

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_markdown_content() {
    let themes = common::themes_dir(&[
        ("index.html", "<article>{{ markdown:intro }}</article>"),
        ("intro.md", "# Hello\n\nSome **bold** text\n- one\n- two\nend"),
    ]);
    let site = common::start_site(themes, |_| {}).await;

    let html = common::client()
        .get(site.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.starts_with("<article><h1>Hello</h1><br><br>Some <b>bold</b> text"));
    assert!(html.contains("<ul><li>one</li>\n<li>two</li>\n</ul>\nend"));

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_static_theme_files() {
    let themes = common::themes_dir(&[]);
    let site = common::start_site(themes, |_| {}).await;

    let response = common::client()
        .get(site.url("/content/themes/plain/theme.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Name: Plain"));

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_config_update_applies_to_next_request() {
    let themes = common::themes_dir(&[("index.html", "{{ config:name }}")]);
    let site = common::start_site(themes, |_| {}).await;
    let client = common::client();

    let body = client.get(site.url("/")).send().await.unwrap().text().await.unwrap();
    assert_eq!(body, "Test Site");

    let mut updated = hookpress::config::SiteConfig::default();
    updated.site.name = "Renamed".into();
    updated.site.theme = "plain".into();
    updated.paths.themes_dir = site.themes.path().to_string_lossy().into_owned();
    site.config_tx.send(updated).unwrap();

    let mut body = String::new();
    for _ in 0..20 {
        body = client.get(site.url("/")).send().await.unwrap().text().await.unwrap();
        if body == "Renamed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(body, "Renamed");

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_serving() {
    let themes = common::themes_dir(&[]);
    let site = common::start_site(themes, |_| {}).await;

    let response = common::client().get(site.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    site.shutdown.trigger();

    let mut refused = false;
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if common::client().get(site.url("/")).send().await.is_err() {
            refused = true;
            break;
        }
    }
    assert!(refused, "server kept accepting requests after shutdown");
}

#[tokio::test]
async fn test_bundled_default_theme() {
    let site = common::start_site(common::themes_dir(&[]), |config| {
        config.site.theme = "default".into();
        config.paths.themes_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/content/themes").into();
    })
    .await;
    let client = common::client();

    let response = client.get(site.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("<title>Test Site</title>"));
    assert!(html.contains("<h1>Welcome</h1>"));
    assert!(html.contains("id=\"default-css\""));
    assert!(html.contains("<body class=\"default\">"));

    let response = client.get(site.url("/missing")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Page not found"));

    site.shutdown.trigger();
}

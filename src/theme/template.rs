//! Placeholder expansion for page templates and action snippets.
//!
//! Placeholders look like `{{ name }}` or `{{ name:argument }}`. Text between
//! placeholders is echoed verbatim, and unknown placeholders are echoed
//! unchanged.

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use crate::theme::context::RequestContext;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-z_]+)(?::([^}]*?))?\s*\}\}").expect("valid placeholder pattern")
});

/// Echo `template` into `ctx`, running each placeholder as it is reached.
///
/// Hooks fired by a placeholder write straight into the output, so their
/// markup lands exactly where the placeholder was.
pub fn expand(ctx: &mut RequestContext, template: &str) {
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        ctx.echo(&template[last..whole.start()]);
        last = whole.end();

        let name = caps.get(1).map_or("", |m| m.as_str());
        let arg = caps.get(2).map_or("", |m| m.as_str().trim());
        if !directive(ctx, name, arg) {
            ctx.echo(whole.as_str());
        }
    }

    ctx.echo(&template[last..]);
}

/// Run one placeholder. Returns false for names it does not know.
fn directive(ctx: &mut RequestContext, name: &str, arg: &str) -> bool {
    match name {
        "head" => ctx.theme_head(),
        "body_open" | "body_top" => ctx.theme_body_open(),
        "body_close" | "body_bottom" => ctx.theme_body_close(),
        "body_class" => {
            let classes = ctx.body_class(arg == "raw");
            ctx.echo(&classes);
        }
        "meta" => {
            let tags = ctx.meta(arg);
            ctx.echo(&tags);
        }
        "lang_attr" => {
            let attr = ctx.lang_attr();
            ctx.echo(&attr);
        }
        "charset" => {
            let charset = ctx.config("charset");
            ctx.echo(&charset);
        }
        "config" => {
            let value = ctx.config(arg);
            ctx.echo(&value);
        }
        "theme" => {
            let value = ctx.theme_info(arg);
            ctx.echo(&value);
        }
        "page_title" => {
            let title = ctx.generate_page_title(arg, false);
            ctx.echo(&title);
        }
        "url" => {
            let url = ctx.url(arg);
            ctx.echo(&url);
        }
        "theme_url" => {
            let url = ctx.theme_url(arg);
            ctx.echo(&url);
        }
        "stylesheet_url" => {
            let url = ctx.stylesheet_url();
            ctx.echo(&url);
        }
        "part" => ctx.load_part(arg),
        "markdown" => ctx.markdown_part(arg),
        "year" => {
            let year = chrono::Local::now().year().to_string();
            ctx.echo(&year);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::hooks::events;
    use std::fs;
    use std::sync::Arc;

    fn context_with_theme(files: &[(&str, &str)]) -> (tempfile::TempDir, RequestContext) {
        let dir = tempfile::tempdir().unwrap();
        let theme = dir.path().join("plain");
        fs::create_dir_all(&theme).unwrap();
        fs::write(theme.join("theme.css"), "/*\nName: Plain\nAuthor: Jane\n*/\n").unwrap();
        fs::write(theme.join("index.html"), "").unwrap();
        for (name, body) in files {
            fs::write(theme.join(name), body).unwrap();
        }

        let mut config = SiteConfig::default();
        config.site.name = "Site".into();
        config.site.theme = "plain".into();
        config.paths.themes_dir = dir.path().to_string_lossy().into_owned();
        (dir, RequestContext::new(Arc::new(config), ""))
    }

    #[test]
    fn test_plain_text_passes_through() {
        let (_dir, mut ctx) = context_with_theme(&[]);
        expand(&mut ctx, "<p>hello {not a placeholder}</p>");
        assert_eq!(ctx.output(), "<p>hello {not a placeholder}</p>");
    }

    #[test]
    fn test_unknown_placeholder_left_untouched() {
        let (_dir, mut ctx) = context_with_theme(&[]);
        expand(&mut ctx, "a {{ mystery:x }} b");
        assert_eq!(ctx.output(), "a {{ mystery:x }} b");
    }

    #[test]
    fn test_config_and_theme_values() {
        let (_dir, mut ctx) = context_with_theme(&[]);
        expand(
            &mut ctx,
            "<html {{ lang_attr }}>{{ config:name }} by {{theme:author}} ({{ theme:name }})",
        );
        assert_eq!(ctx.output(), "<html lang=\"en\">Site by Jane (Plain)");
    }

    #[test]
    fn test_hook_output_lands_in_place() {
        let (_dir, mut ctx) = context_with_theme(&[]);
        ctx.hooks.add(events::HEAD, "x", |ctx| ctx.echo("<meta x>"));
        expand(&mut ctx, "<head>{{ head }}</head>");
        assert_eq!(ctx.output(), "<head><meta x></head>");
    }

    #[test]
    fn test_parts_load_once() {
        let (_dir, mut ctx) = context_with_theme(&[("header.html", "[header]")]);
        expand(&mut ctx, "{{ part:header }}{{ part:header }}{{ part:missing }}");
        assert_eq!(ctx.output(), "[header]");
    }

    #[test]
    fn test_markdown_part() {
        let (_dir, mut ctx) = context_with_theme(&[("intro.md", "# Welcome")]);
        expand(&mut ctx, "<main>{{ markdown:intro }}</main>");
        assert_eq!(ctx.output(), "<main><h1>Welcome</h1>\n</main>");
    }

    #[test]
    fn test_page_title_with_landing_argument() {
        let (_dir, mut ctx) = context_with_theme(&[]);
        expand(&mut ctx, "{{ page_title:home page }}");
        assert_eq!(ctx.output(), "Home Page");
    }

    #[test]
    fn test_body_class_raw() {
        let (_dir, mut ctx) = context_with_theme(&[]);
        ctx.add_body_class("a b");
        expand(&mut ctx, "<body{{ body_class }}>{{ body_class:raw }}");
        assert_eq!(ctx.output(), "<body class=\"a b\">a b");
    }
}

//! Hooks every request starts with.

use crate::hooks::events;
use crate::theme::context::RequestContext;

pub const GENERATOR: &str = "generator";
pub const ATTRIBUTION: &str = "attribution";
pub const TITLE_TAG: &str = "title_tag";
pub const OUTPUT_STYLES: &str = "output_styles";
pub const OUTPUT_SCRIPTS: &str = "output_scripts";

/// Hooks registered before the theme's setup runs. Themes may remove them.
pub fn register_baseline(ctx: &mut RequestContext) {
    ctx.hooks.add(events::HEAD, GENERATOR, meta_generator);
    ctx.hooks.add(events::BODY_CLOSE, ATTRIBUTION, attribution);
}

/// Asset output hooks, registered after the theme's setup so the tags come
/// after anything the theme emits itself.
pub fn register_asset_output(ctx: &mut RequestContext) {
    ctx.hooks.add(events::HEAD, OUTPUT_STYLES, output_styles);
    ctx.hooks.add(events::BODY_CLOSE, OUTPUT_SCRIPTS, output_scripts);
}

pub fn meta_generator(ctx: &mut RequestContext) {
    ctx.echo("\n<meta name=\"generator\" content=\"hookpress\">\n");
}

pub fn attribution(ctx: &mut RequestContext) {
    ctx.echo("<p style=\"padding: 20px; text-align: center; font-size: 12px;\">Proudly powered by hookpress.</p>\n");
}

pub fn title_tag(ctx: &mut RequestContext) {
    let title = ctx.generate_page_title("", true);
    ctx.echo(&format!("<title>{title}</title>"));
}

pub fn output_styles(ctx: &mut RequestContext) {
    let tags = ctx.styles.output();
    ctx.echo(&tags);
}

pub fn output_scripts(ctx: &mut RequestContext) {
    let tags = ctx.scripts.output();
    ctx.echo(&tags);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::sync::Arc;

    #[test]
    fn test_baseline_then_asset_output_order() {
        let mut ctx = RequestContext::new(Arc::new(SiteConfig::default()), "");
        register_baseline(&mut ctx);
        ctx.hooks.add(events::HEAD, "theme", |ctx| ctx.echo("[theme]"));
        register_asset_output(&mut ctx);

        ctx.theme_head();
        assert_eq!(
            ctx.output(),
            "\n<meta name=\"generator\" content=\"hookpress\">\n[theme]"
        );
        assert!(ctx.hooks.exists(events::BODY_CLOSE, Some(ATTRIBUTION)));
        assert!(ctx.hooks.exists(events::BODY_CLOSE, Some(OUTPUT_SCRIPTS)));
    }
}

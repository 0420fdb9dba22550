pub mod gemini;

use async_trait::async_trait;

/// External capability: turn a short amenity name into one inline SVG
/// fragment. Every generated icon must follow the site's icon convention so
/// it renders alongside the built-in set.
#[async_trait]
pub trait IconProvider: Send + Sync {
    async fn generate_icon(&self, name: &str) -> anyhow::Result<String>;
}

pub const ICON_VIEWBOX: &str = "0 0 24 24";
pub const ICON_STROKE_WIDTH: &str = "2";

/// Accepts exactly one svg element in the fixed convention. Provider output
/// is untrusted text, so anything else is rejected.
pub fn validate_icon_markup(markup: &str) -> anyhow::Result<()> {
    let trimmed = markup.trim();
    if !trimmed.starts_with("<svg") || !trimmed.ends_with("</svg>") {
        anyhow::bail!("icon is not a single svg element");
    }
    if !trimmed.contains(ICON_VIEWBOX) {
        anyhow::bail!("icon does not use the {ICON_VIEWBOX} viewbox");
    }
    if trimmed.matches("<svg").count() != 1 {
        anyhow::bail!("icon contains nested svg elements");
    }
    if trimmed.contains("<script") {
        anyhow::bail!("icon contains script markup");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_conventional_icon() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M5 12h14"/></svg>"#;
        assert!(validate_icon_markup(svg).is_ok());
    }

    #[test]
    fn test_rejects_non_svg_text() {
        assert!(validate_icon_markup("here is your icon!").is_err());
    }

    #[test]
    fn test_rejects_wrong_viewbox() {
        let svg = r#"<svg viewBox="0 0 48 48"><path d="M5 12h14"/></svg>"#;
        assert!(validate_icon_markup(svg).is_err());
    }

    #[test]
    fn test_rejects_script_markup() {
        let svg = r#"<svg viewBox="0 0 24 24"><script>alert(1)</script></svg>"#;
        assert!(validate_icon_markup(svg).is_err());
    }
}

use crate::{store::OgConfig, util::escape_html};

/// Fills the Open Graph / twitter meta tags (matched by element id) and the
/// page title of the public index page. Tags missing from the page are left
/// alone. Every value is html escaped.
pub fn render_index(html: &str, og: &OgConfig, site_url: &str) -> String {
    let mut html = html.to_owned();

    let tags = [
        ("og-type", og.kind.as_str()),
        ("og-url", site_url),
        ("og-title", og.title.as_str()),
        ("og-description", og.description.as_str()),
        ("og-image", og.image.as_str()),
        ("og-site-name", og.site_name.as_str()),
        ("twitter-url", site_url),
        ("twitter-title", og.title.as_str()),
        ("twitter-description", og.description.as_str()),
        ("twitter-image", og.image.as_str()),
    ];

    for (id, value) in tags {
        set_meta_content(&mut html, id, value);
    }

    set_title(&mut html, &og.title);

    html
}

// replaces the content="..." attribute of the tag carrying id="<id>"
fn set_meta_content(html: &mut String, id: &str, value: &str) {
    let marker = format!("id=\"{}\"", id);

    let at = match html.find(&marker) {
        Some(at) => at,
        None => return,
    };
    let (tag_start, tag_end) = match (html[..at].rfind('<'), html[at..].find('>')) {
        (Some(start), Some(len)) => (start, at + len),
        _ => return,
    };

    let attr = "content=\"";
    let value_start = match html[tag_start..tag_end].find(attr) {
        Some(offset) => tag_start + offset + attr.len(),
        None => return,
    };
    let value_end = match html[value_start..tag_end].find('"') {
        Some(len) => value_start + len,
        None => return,
    };

    html.replace_range(value_start..value_end, &escape_html(value));
}

fn set_title(html: &mut String, title: &str) {
    let start = match html.find("<title>") {
        Some(at) => at + "<title>".len(),
        None => return,
    };
    let end = match html[start..].find("</title>") {
        Some(len) => start + len,
        None => return,
    };

    html.replace_range(start..end, &escape_html(title));
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
<title>Discord Stickers Collection</title>
<meta property="og:type" content="website" id="og-type">
<meta property="og:url" content="" id="og-url">
<meta property="og:title" content="Discord Stickers Showcase" id="og-title">
<meta name="twitter:image" content="x" id="twitter-image">
</head></html>"#;

    #[test]
    fn fills_tags_by_id() {
        let og = OgConfig {
            title: "My Stickers".into(),
            ..OgConfig::default()
        };

        let html = render_index(PAGE, &og, "https://stickers.example");

        assert!(html.contains(r#"content="My Stickers" id="og-title""#));
        assert!(html.contains(r#"content="https://stickers.example" id="og-url""#));
        assert!(html.contains("<title>My Stickers</title>"));
        assert!(html.contains(&format!(r#"content="{}" id="twitter-image""#, og.image)));
    }

    #[test]
    fn escapes_values() {
        let og = OgConfig {
            title: r#""><script>alert(1)</script>"#.into(),
            ..OgConfig::default()
        };

        let html = render_index(PAGE, &og, "");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn leaves_unknown_pages_alone() {
        let page = "<html><body>no meta here</body></html>";
        assert_eq!(render_index(page, &OgConfig::default(), "x"), page);
    }
}

//! Markdown rendering for recipe text.
//!
//! Recipe text comes straight from the model and is untrusted. Markdown
//! structure is rendered, but any raw HTML the model emits is escaped and
//! shows up as literal text. Link and image targets keep only relative URLs
//! and the http, https and mailto schemes.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render recipe markdown to an HTML fragment
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Html(escape(raw)),
        Event::InlineHtml(raw) => Event::InlineHtml(escape(raw)),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

fn escape(raw: CowStr<'_>) -> CowStr<'static> {
    CowStr::from(html_escape::encode_text(raw.as_ref()).into_owned())
}

/// Blank out any URL whose scheme is not on the allow list
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_url(&url) {
        url
    } else {
        CowStr::Borrowed("")
    }
}

fn is_allowed_url(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return true;
    };
    // A ':' after the first path, query or fragment character is not a scheme
    if url.find(['/', '?', '#']).is_some_and(|path| path < colon) {
        return true;
    }

    let scheme = &url[..colon];
    ALLOWED_SCHEMES
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

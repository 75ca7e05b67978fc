use std::fmt::Write;

const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/about", "About"),
    ("/lego/sets", "Sets"),
    ("/lego/addSet", "Add Set"),
];

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whether a nav link should be highlighted for the current page.
fn is_active(href: &str, page: &str) -> bool {
    let path = page.split('?').next().unwrap_or(page);
    match href {
        "/" => path == "/",
        "/lego/sets" => path == href || path.starts_with("/lego/sets/"),
        _ => path == href,
    }
}

/// Wrap a page body in the shared document shell and navigation bar.
pub fn render(title: &str, page: &str, body: &str) -> String {
    let mut nav = String::new();
    for (href, label) in NAV_LINKS {
        let class = if is_active(href, page) { " class=\"active\"" } else { "" };
        let _ = write!(nav, "<li><a href=\"{href}\"{class}>{label}</a></li>");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | LEGO Collection</title>
    <link rel="stylesheet" href="/css/main.css">
</head>
<body>
    <nav><ul>{nav}</ul></nav>
    <main>
{body}
    </main>
</body>
</html>"#,
        title = escape(title),
    )
}

//! HTML helpers shared by the server-rendered pages
//!
//! Plan text comes from an LLM and from search results, so everything
//! interpolated into markup goes through [`escape`].

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped href for an external link; anything but http(s) becomes `#`
pub fn safe_href(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        escape(trimmed)
    } else {
        "#".to_string()
    }
}

/// Shared page chrome: black and white theme with Instrument Sans
pub const THEME_CSS: &str = r#"
<link href="https://fonts.googleapis.com/icon?family=Material+Icons" rel="stylesheet">
<style>
    @import url('https://fonts.googleapis.com/css2?family=Instrument+Sans:wght@400;700&display=swap');
    body {
        font-family: 'Instrument Sans', sans-serif;
        background-color: #FFFFFF;
        color: #262730;
        margin: 0;
    }
    .layout { display: flex; min-height: 100vh; }
    .sidebar {
        width: 260px;
        padding: 20px;
        background: #F0F2F6;
    }
    .main { flex: 1; padding: 20px 40px; max-width: 1000px; }
    button, .button {
        display: block;
        width: 100%;
        padding: 10px;
        font-size: 16px;
        background-color: #000000;
        color: #FFFFFF;
        border-radius: 6px;
        border: none;
        margin: 6px 0;
        text-align: center;
        text-decoration: none;
        cursor: pointer;
    }
    .sidebar-divider { border-bottom: 0.3px solid #000000; margin: 15px 0; }
    .plan-container {
        background: #0F1116;
        color: #FFFFFF;
        padding: 15px;
        margin-bottom: 10px;
        border-radius: 8px;
        box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    }
    .plan-container a, .plan-container a:visited { color: #CBCBCB; text-decoration: underline; }
    .small-muted { font-size: 0.9em; color: #6B6B6B; margin-bottom: 10px; }
    .icon { vertical-align: middle; font-size: 20px; margin-right: 5px; color: #CBCBCB; }
    .error { color: #B00020; font-weight: 700; }
    .success { color: #1B5E20; font-weight: 700; }
    label { display: block; margin-top: 12px; font-weight: 700; }
    input[type=text], input[type=email], input[type=password], input[type=number], textarea, select {
        width: 100%;
        padding: 8px;
        box-sizing: border-box;
    }
    table { border-collapse: collapse; width: 100%; }
    th, td { border: 1px solid #DDDDDD; padding: 6px 10px; text-align: left; }
    .bar { background: #000000; height: 18px; }
</style>
"#;

/// Wrap a body fragment in a full HTML document
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{}</title>\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        THEME_CSS,
        body
    )
}

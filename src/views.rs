//! HTML page rendering
//!
//! One page: the problem form, the agent's answer, the diagram link and a
//! diagram search box. All dynamic text is escaped.

/// Data shown on the index page
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexView<'a> {
    /// Agent answer or error text; empty for the initial page
    pub result: &'a str,
    /// Placeholder diagram path, if a submission was handled
    pub diagram_url: Option<&'a str>,
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Render the index page
pub fn render_index(view: &IndexView<'_>) -> String {
    let mut sections = String::new();

    if !view.result.is_empty() {
        sections.push_str(&format!(
            "    <section id=\"result\">\n      <h2>Proposed solution</h2>\n      <pre>{}</pre>\n    </section>\n",
            escape_html(view.result)
        ));
    }

    if let Some(url) = view.diagram_url {
        let url = escape_html(url);
        sections.push_str(&format!(
            "    <section id=\"diagram\">\n      <h2>Diagram</h2>\n      <a href=\"{url}\"><img src=\"{url}\" alt=\"Diagram concept\"></a>\n    </section>\n"
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Social Problem Solver</title>
  </head>
  <body>
    <h1>Social Problem Solver</h1>
    <form method="post" action="/">
      <label for="prompt">Describe a social problem</label>
      <textarea id="prompt" name="prompt" rows="4" cols="60"></textarea>
      <button type="submit">Solve</button>
    </form>
{sections}    <form method="post" action="/search_diagrams">
      <label for="search_term">Search diagrams</label>
      <input id="search_term" name="search_term" type="text">
      <button type="submit">Search</button>
    </form>
  </body>
</html>
"#
    )
}

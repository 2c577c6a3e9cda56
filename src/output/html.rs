// HTML report page rendered with Tera

use crate::error::Result;
use tera::{Context, Tera};

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
  <style>
    body { font-family: sans-serif; margin: 2rem; }
    table { border-collapse: collapse; }
    th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
    th { background: #f3f3f3; }
  </style>
</head>
<body>
  <h1>{{ title }}</h1>
  <p>{{ rows | length }} rows, generated {{ generated_at }}</p>
  <table>
    <thead><tr>{% for cell in header %}<th>{{ cell }}</th>{% endfor %}</tr></thead>
    <tbody>
    {% for row in rows %}<tr>{% for cell in row %}<td>{{ cell }}</td>{% endfor %}</tr>
    {% endfor %}</tbody>
  </table>
</body>
</html>
"#;

/// Template engine holding the report page
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("report.html", REPORT_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Render `cells` (header first) as a standalone page
    pub fn render(&self, title: &str, cells: &[Vec<String>], generated_at: &str) -> Result<String> {
        let (header, rows) = cells.split_first().map_or((&[][..], &[][..]), |(h, r)| (&h[..], r));

        let mut context = Context::new();
        context.insert("title", title);
        context.insert("header", header);
        context.insert("rows", rows);
        context.insert("generated_at", generated_at);

        Ok(self.tera.render("report.html", &context)?)
    }
}

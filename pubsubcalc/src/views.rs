use pubsubcalc_backend::PublishOutcome;

/// What happened to the result after it was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Published(PublishOutcome),
    Disabled,
}

pub struct IndexView<'a> {
    pub title: &'a str,
    pub page_heading: &'a str,
}

pub struct ResultView<'a> {
    pub page_heading: &'a str,
    pub result: isize,
    pub delivery: &'a Delivery,
}

impl IndexView<'_> {
    pub fn render(&self) -> String {
        let body = format!(
            r#"<h1>{heading}</h1>
<form method="post" action="/add">
  <label for="number1">Number 1</label>
  <input type="text" id="number1" name="number1">
  <label for="number2">Number 2</label>
  <input type="text" id="number2" name="number2">
  <button type="submit">Add</button>
</form>"#,
            heading = escape(self.page_heading)
        );
        layout(self.title, &body)
    }
}

impl ResultView<'_> {
    pub fn render(&self) -> String {
        let notice = match self.delivery {
            Delivery::Published(PublishOutcome::Delivered { published_at, .. }) => format!(
                r#"<p class="notice">Published at {}</p>"#,
                published_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Delivery::Published(PublishOutcome::AttemptedButUnconfirmed { reason }) => format!(
                r#"<p class="warning">The result could not be confirmed as delivered: {}</p>"#,
                escape(reason)
            ),
            Delivery::Disabled => {
                r#"<p class="warning">Publishing is disabled.</p>"#.to_string()
            }
        };

        let body = format!(
            r#"<h1>{heading}</h1>
<p class="result">{result}</p>
{notice}
<a href="/">Calculate again</a>"#,
            heading = escape(self.page_heading),
            result = self.result,
        );
        layout("Result", &body)
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title)
    )
}

fn escape(text: &str) -> String {
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

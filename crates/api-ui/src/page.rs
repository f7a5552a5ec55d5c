//! Page chrome shared by every HTML view.

pub const TITLE: &str = "Discord WebSocket Log";

pub const STYLESHEET: &str = r"@media (min-width: 768px) {
    #query-box {
        width: calc(100% - 12em);
    }
    #query-box > input {
        width: 100%;
    }

    #query-button {
        width: 11em;
    }

    form {
        margin-bottom: 2em;
    }
}

td.sql-null {
    color: #999;
    font-style: italic;
}

code {
    color: black;
    background: inherit;
    white-space: pre;
}
";

/// Escapes text for use both as element content and inside quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Wraps `content` into the full document. `heading` and `intro` are trusted.
#[must_use]
pub fn layout(heading: &str, intro: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="UTF-8">
        <title>{TITLE}</title>

        <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.5/css/bootstrap.min.css">
        <script src="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.5/js/bootstrap.min.js"></script>

        <link rel="stylesheet" href="style">
    </head>
    <body>
        <div class="container-fluid">
            <h1>{heading}</h1>
            <p>{intro}</p>
{content}
        </div>
    </body>
</html>
"#
    )
}

#[must_use]
pub fn error_alert(message: &str) -> String {
    format!(
        "            <div class=\"alert alert-danger\">\n                {}\n            </div>\n",
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_error_alert_is_escaped() {
        let alert = error_alert("near '<b>' at line 1");
        assert!(alert.contains("near &#x27;&lt;b&gt;&#x27; at line 1"));
        assert!(alert.contains("alert-danger"));
    }
}

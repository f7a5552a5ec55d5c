use crate::page::{error_alert, escape_html, layout};
use core_executor::analysis::{MessageProfile, ProfileNode};
use serde_json::Value;

const HEADING: &str = "Discord WebSocket Analysis";
const INTRO: &str =
    "An analysis of the messages on the discord WebSocket, for API debugging and reference purpose.";
const INDENT: &str = "    ";

#[must_use]
pub fn profile_page(profile: &MessageProfile) -> String {
    let content: String = profile
        .partitions
        .iter()
        .map(|(name, node)| panel(name, node))
        .collect();
    layout(HEADING, INTRO, &content)
}

#[must_use]
pub fn failed_profile_page(message: &str) -> String {
    layout(HEADING, INTRO, &error_alert(message))
}

fn panel(title: &str, node: &ProfileNode) -> String {
    let mut tree = String::from("<code>");
    render_node(node, "", &mut tree);
    tree.push_str("</code>");
    format!(
        r#"            <div class="panel panel-default">
                <div class="panel-heading">
                    <h3 class="panel-title">{}</h3>
                </div>
                <div class="panel-body">
{tree}
                </div>
            </div>
"#,
        escape_html(title)
    )
}

/// Prints `node` as a JSON-like skeleton, one `<code>` element per line so
/// the indentation survives.
fn render_node(node: &ProfileNode, indent: &str, out: &mut String) {
    let nested = format!("{INDENT}{indent}");
    if node.types.contains_key("dict") {
        out.push_str("{</code><br>\n");
        for (key, member) in &node.members {
            let key = Value::String(key.clone()).to_string();
            out.push_str(&format!("<code>{nested}{}: ", escape_html(&key)));
            render_node(member, &nested, out);
            out.push_str("</code><br>\n");
        }
        out.push_str(&format!("<code>{indent}}}"));
    } else if node.types.contains_key("list") {
        out.push_str(&format!("[</code><br>\n<code>{nested}"));
        let empty = ProfileNode::default();
        render_node(node.elements.as_deref().unwrap_or(&empty), &nested, out);
        out.push_str(&format!(
            ",</code><br>\n<code>{nested}...</code><br>\n<code>{indent}]"
        ));
    } else {
        out.push_str(&escape_html(&leaf_summary(node)));
    }
}

fn leaf_summary(node: &ProfileNode) -> String {
    let types = node
        .types
        .iter()
        .map(|(name, count)| format!("\"{name}\": {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut summary = format!("{{{types}}}");

    if let Some(charset) = &node.charset {
        let charset: String = charset.iter().collect();
        summary.push_str(&format!(" charset: {}", Value::String(charset)));
    } else if let Some((min, max)) = node.range {
        summary.push_str(&format!(" range: [{min}, {max}]"));
    } else if !node.values.is_empty() {
        let values = node
            .values
            .iter()
            .map(|(value, count)| format!("{value}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        summary.push_str(&format!(" values: {{{values}}}"));
    }
    summary
}

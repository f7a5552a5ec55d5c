use super::render::CellRenderer;
use crate::page::{TITLE, error_alert, escape_html, layout};
use core_executor::{QueryOutcome, ResultSet, Submission};

const INTRO: &str = "A simple discord WebSocket message log, for API debugging and reference purpose.";

#[must_use]
pub fn query_page(submission: &Submission, renderer: &CellRenderer, max_rows: usize) -> String {
    let mut content = query_form(&submission.query);
    match &submission.outcome {
        QueryOutcome::Success(result) => {
            if result.truncated {
                content.push_str(&truncation_notice(max_rows));
            }
            content.push_str(&result_table(result, renderer));
        }
        outcome => content.push_str(&error_alert(outcome.error_message().unwrap_or_default())),
    }
    layout(TITLE, INTRO, &content)
}

/// The form always shows the query that was resolved, so it can be edited
/// and resubmitted.
fn query_form(query: &str) -> String {
    format!(
        r#"            <form class="form-inline" method="GET" action="query" accept-charset="UTF-8">
                <div class="form-group" id="query-box">
                    <input type="text" class="form-control" name="query" value="{}">
                </div>
                <button type="submit" id="query-button" class="btn btn-default">Run MySQL Query</button>
            </form>
"#,
        escape_html(query)
    )
}

fn truncation_notice(max_rows: usize) -> String {
    format!(
        "            <div class=\"alert alert-info\">\n                Only the first {max_rows} results are shown.\n            </div>\n"
    )
}

#[must_use]
pub fn result_table(result: &ResultSet, renderer: &CellRenderer) -> String {
    let mut table = String::from("            <table class=\"table\">\n                <tr>\n");
    for field in &result.fields {
        table.push_str(&format!(
            "                    <th title=\"{}\">{}</th>\n",
            escape_html(&field.r#type),
            escape_html(&field.name)
        ));
    }
    table.push_str("                </tr>\n");

    for row in &result.rows {
        table.push_str("                <tr>\n");
        for (field, cell) in result.fields.iter().zip(row) {
            table.push_str("                    ");
            table.push_str(&renderer.render(&field.name, cell).to_html());
            table.push('\n');
        }
        table.push_str("                </tr>\n");
    }
    table.push_str("            </table>\n");
    table
}

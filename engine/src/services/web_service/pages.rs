// HTML pages served by the form routes.
use crate::chart::escape_html;
use axum::http::StatusCode;
use chrono::NaiveDate;
use shared::models::TimeWindow;
use shared::utils::format_date;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#2a3f5f}\
fieldset{border:1px solid #e5ecf6;margin-bottom:1rem}\
label{margin-right:1rem;white-space:nowrap}\
.error{color:#b00020}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

/// Selection form listing every series in the table.
pub fn index_page(available: &[String], today: NaiveDate) -> String {
    let checkboxes: String = available
        .iter()
        .map(|name| {
            let name = escape_html(name);
            format!(r#"<label><input type="checkbox" name="stocks" value="{name}"> {name}</label>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let options: String = TimeWindow::ALL
        .iter()
        .map(|w| format!(r#"<option value="{}">{}</option>"#, w.as_str(), w.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<h1>Stock Price Viewer</h1>
<form action="/plot" method="post">
<fieldset><legend>Stocks</legend>
{checkboxes}
</fieldset>
<fieldset><legend>Historical Data</legend>
<select name="historical">
{options}
</select>
<label>As of <input type="date" name="as_of" value="{today}"></label>
</fieldset>
<button type="submit">Plot</button>
</form>"#,
        checkboxes = checkboxes,
        options = options,
        today = format_date(today)
    );
    layout("Stock Price Viewer", &body)
}

/// Page embedding an already rendered chart fragment.
pub fn plot_page(chart_svg: &str, selected: &[String], window: TimeWindow, as_of: NaiveDate) -> String {
    let selection = if selected.is_empty() {
        "none".to_string()
    } else {
        escape_html(&selected.join(", "))
    };
    let body = format!(
        r#"<h1>Stock Prices</h1>
<p class="selection">Stocks: {selection} &middot; {window} as of {as_of}</p>
<div class="chart">
{chart_svg}
</div>
<p><a href="/">Back</a></p>"#,
        selection = selection,
        window = window.label(),
        as_of = format_date(as_of),
        chart_svg = chart_svg
    );
    layout("Stock Prices", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<h1>{}</h1>
<p class="error">{}</p>
<p><a href="/">Back</a></p>"#,
        status,
        escape_html(message)
    );
    layout("Error", &body)
}

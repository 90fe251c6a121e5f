//! Server-rendered weather page.
//!
//! Turns a `DashboardView` into a complete HTML document. The page's
//! controls are plain forms posting to the `/ui/*` routes, which update the
//! dashboard and redirect back here.

use crate::services::dashboard::{DashboardView, DetailView, HistoryEntry, MISSING_VALUE};

const STYLE: &str = r#"
body { font-family: sans-serif; background: #111; color: #eee; margin: 0; padding: 2rem; }
.current { display: flex; gap: 3rem; flex-wrap: wrap; }
.reading { font-size: 2rem; }
.wind-direction { width: 4rem; height: 4rem; border: 2px solid #eee; border-radius: 50%; position: relative; }
.wind-arrow { position: absolute; left: 50%; top: 0; width: 2px; height: 50%; background: #f80;
  transform-origin: bottom center; transform: rotate(var(--direction)); }
.unit-controls form { display: inline; }
.unit-controls button[aria-pressed="true"] { font-weight: bold; }
.previous-sols { list-style: none; padding: 0; display: flex; gap: 1rem; flex-wrap: wrap; }
.previous-sols li { border: 1px solid #444; padding: 1rem; }
.previous-sols li.selected { border-color: #f80; }
"#;

/// Render the full page.
pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Mars Weather</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Latest weather at Elysium Planitia</h1>\n");

    match &view.detail {
        Some(detail) => render_detail(&mut html, detail, view),
        None => html.push_str("<section class=\"current\" data-current-sol></section>\n"),
    }

    render_unit_controls(&mut html, view);

    html.push_str("<details class=\"previous-weather\">\n<summary>Previous 7 days</summary>\n");
    html.push_str("<ul class=\"previous-sols\" data-previous-sols>\n");
    for entry in &view.history {
        render_history_entry(&mut html, entry, view);
    }
    html.push_str("</ul>\n</details>\n</body>\n</html>\n");
    html
}

fn render_detail(html: &mut String, detail: &DetailView, view: &DashboardView) {
    let temp_unit = escape_html(&view.labels.temperature);
    let speed_unit = escape_html(&view.labels.speed);
    let direction = detail
        .wind_direction_degrees
        .map(|d| format!("{}deg", d))
        .unwrap_or_else(|| "0deg".to_string());

    html.push_str(&format!(
        r#"<section class="current">
<div>
<h2>Sol <span data-current-sol>{sol}</span></h2>
<p data-current-date>{date}</p>
</div>
<div class="reading">
<p>High: <span data-current-temp-high>{high}</span>&deg;<span data-temperature-unit>{temp_unit}</span></p>
<p>Low: <span data-current-temp-low>{low}</span>&deg;<span data-temperature-unit>{temp_unit}</span></p>
</div>
<div class="reading">
<p><span data-current-windSpeed>{speed}</span> <span data-speed-unit>{speed_unit}</span></p>
<div class="wind-direction" data-current-windDirectionDegrees style="--direction: {direction}"><div class="wind-arrow"></div></div>
<p data-current-windDirectionCardinal>{cardinal}</p>
</div>
</section>
"#,
        sol = escape_html(&detail.sol),
        date = escape_html(&detail.date),
        high = display_number(detail.high),
        low = display_number(detail.low),
        speed = display_number(detail.wind_speed),
        cardinal = escape_html(&detail.wind_direction_cardinal),
        direction = direction,
        temp_unit = temp_unit,
        speed_unit = speed_unit,
    ));
}

fn render_unit_controls(html: &mut String, view: &DashboardView) {
    let metric = view.labels.units.is_metric();
    html.push_str(&format!(
        r#"<div class="unit-controls">
<form method="post" action="/ui/units"><input type="hidden" name="units" value="metric"><button id="cel" aria-pressed="{metric}">&deg;C</button></form>
<form method="post" action="/ui/units/toggle"><button data-unit-toggle>Toggle units</button></form>
<form method="post" action="/ui/units"><input type="hidden" name="units" value="imperial"><button id="fah" aria-pressed="{imperial}">&deg;F</button></form>
</div>
"#,
        metric = metric,
        imperial = !metric,
    ));
}

fn render_history_entry(html: &mut String, entry: &HistoryEntry, view: &DashboardView) {
    let temp_unit = escape_html(&view.labels.temperature);
    html.push_str(&format!(
        r#"<li class="{class}">
<h3>Sol <span data-previous-sol>{sol}</span></h3>
<p data-previous-date>{date}</p>
<p>High: <span data-previous-temp-high>{high}</span>&deg;<span data-temperature-unit>{temp_unit}</span></p>
<p>Low: <span data-previous-temp-low>{low}</span>&deg;<span data-temperature-unit>{temp_unit}</span></p>
<form method="post" action="/ui/selection/{sol_path}"><button data-select-button>More info</button></form>
</li>
"#,
        class = if entry.selected { "selected" } else { "" },
        sol = escape_html(&entry.sol),
        sol_path = escape_html(&urlencoding::encode(&entry.sol)),
        date = escape_html(&entry.date),
        high = display_number(entry.high),
        low = display_number(entry.low),
        temp_unit = temp_unit,
    ));
}

fn display_number(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

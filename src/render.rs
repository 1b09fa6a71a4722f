//! HTML rendering of the artwork table page.
//!
//! The page is server-rendered and works without JavaScript: every control
//! is a plain link or form whose handler redirects back to `/`.

use crate::types::{Artwork, LoadState, TableView};
use std::fmt::Write;

/// Everything the page shows besides the table view itself
#[derive(Clone, Debug, Default)]
pub struct PageOptions<'a> {
    /// Sizes offered by the rows-per-page control
    pub rows_per_page_options: &'a [u32],
    /// Whether a select-first run is in flight
    pub accumulating: bool,
    /// One-line message shown above the table (result of the last action)
    pub notice: Option<&'a str>,
}

/// Number of page links shown on each side of the current page
const PAGINATOR_RADIUS: u64 = 2;

/// Render the full HTML document for `view`
pub fn render_page(view: &TableView, options: &PageOptions<'_>) -> String {
    let mut body = String::new();

    if let Some(notice) = options.notice {
        let _ = write!(body, r#"<p class="notice">{}</p>"#, html_escape(notice));
    }
    match &view.load_state {
        LoadState::Loading => body.push_str(r#"<p class="status">Loading…</p>"#),
        LoadState::Failed { message } => {
            let _ = write!(
                body,
                r#"<p class="status error">Could not load page {}: {}</p>"#,
                view.page,
                html_escape(message)
            );
        }
        LoadState::Idle | LoadState::Loaded => {}
    }
    if options.accumulating {
        body.push_str(r#"<p class="status">Selecting rows across pages…</p>"#);
    }

    body.push_str(r#"<table class="artworks">"#);
    body.push_str(&render_header(view));
    body.push_str("<tbody>");
    if view.rows.is_empty() {
        body.push_str(r#"<tr><td colspan="7" class="empty">No records found</td></tr>"#);
    }
    for row in &view.rows {
        body.push_str(&render_row(row, view.selected.contains(&row.id)));
    }
    body.push_str("</tbody>");
    body.push_str(&render_footer(view));
    body.push_str("</table>");
    body.push_str(&render_paginator(view, options.rows_per_page_options));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Artworks</title>
<style>{CSS}</style>
</head>
<body>
<main class="card">
{body}
</main>
</body>
</html>"#
    )
}

fn render_header(view: &TableView) -> String {
    let all_selected =
        !view.rows.is_empty() && view.rows.iter().all(|row| view.selected.contains(&row.id));
    let (action, mark, label) = if all_selected {
        ("/page/deselect", "☑", "Deselect all rows on this page")
    } else {
        ("/page/select", "☐", "Select all rows on this page")
    };

    format!(
        r#"<thead><tr>
<th class="check"><form method="post" action="{action}"><button type="submit" class="box" title="{label}">{mark}</button></form></th>
<th>
<details class="overlay">
<summary title="Select rows across pages">⚙</summary>
<form method="post" action="/selection/first">
<input type="number" name="count" min="0" value="0" placeholder="Rows to select">
<button type="submit">Select</button>
</form>
</details>
Title
</th>
<th>Origin</th>
<th>Artist</th>
<th>Inscriptions</th>
<th>Start Year</th>
<th>End Year</th>
</tr></thead>"#
    )
}

fn render_row(row: &Artwork, selected: bool) -> String {
    let (mark, class) = if selected {
        ("☑", r#" class="selected""#)
    } else {
        ("☐", "")
    };

    format!(
        r#"<tr{class}><td class="check"><form method="post" action="/rows/{id}/toggle"><button type="submit" class="box">{mark}</button></form></td><td>{title}</td><td>{origin}</td><td>{artist}</td><td>{inscriptions}</td><td>{start}</td><td>{end}</td></tr>"#,
        id = row.id,
        title = text_cell(row.title.as_deref()),
        origin = text_cell(row.place_of_origin.as_deref()),
        artist = text_cell(row.artist_display.as_deref()),
        inscriptions = text_cell(row.inscriptions.as_deref()),
        start = year_cell(row.date_start),
        end = year_cell(row.date_end),
    )
}

fn render_footer(view: &TableView) -> String {
    format!(
        r#"<tfoot><tr><td colspan="7"><div class="footer"><span>{count} selected</span><form method="post" action="/selection/clear"><button type="submit">✕ Clear Selection</button></form></div></td></tr></tfoot>"#,
        count = view.selected.len()
    )
}

/// Paginator for the rows actually displayed, which after a failed request
/// are those of an earlier page
fn render_paginator(view: &TableView, rows_per_page_options: &[u32]) -> String {
    let rows = view.shown_rows_per_page;
    let current = u64::from(view.shown_page);
    let page_count = if rows == 0 {
        0
    } else {
        view.total_records.div_ceil(u64::from(rows))
    };

    let mut html = String::from(r#"<nav class="paginator">"#);
    let link = |page: u64, text: &str, enabled: bool| -> String {
        if enabled {
            format!(r#"<a href="/?page={page}&amp;rows={rows}">{text}</a>"#)
        } else {
            format!(r#"<span class="disabled">{text}</span>"#)
        }
    };

    html.push_str(&link(1, "«", current > 1));
    html.push_str(&link(current.saturating_sub(1).max(1), "‹", current > 1));

    let start = current.saturating_sub(PAGINATOR_RADIUS).max(1);
    let end = (current + PAGINATOR_RADIUS).min(page_count.max(1));
    for page in start..=end {
        if page == current {
            let _ = write!(html, r#"<span class="current">{page}</span>"#);
        } else {
            html.push_str(&link(page, &page.to_string(), true));
        }
    }

    html.push_str(&link(current + 1, "›", current < page_count));
    html.push_str(&link(page_count.max(1), "»", current < page_count));

    html.push_str(r#"<form method="get" action="/" class="rows"><input type="hidden" name="page" value="1"><select name="rows">"#);
    for &option in rows_per_page_options {
        let selected = if option == rows { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{option}"{selected}>{option}</option>"#);
    }
    html.push_str(r#"</select><button type="submit">Rows</button></form>"#);

    if view.total_records > 0 && !view.rows.is_empty() {
        let last = view.first + view.rows.len() as u64;
        let _ = write!(
            html,
            r#"<span class="range">Showing {} to {} of {}</span>"#,
            view.first + 1,
            last,
            view.total_records
        );
    }

    html.push_str("</nav>");
    html
}

fn text_cell(value: Option<&str>) -> String {
    value
        .map(|text| html_escape(text).replace('\n', "<br>"))
        .unwrap_or_default()
}

fn year_cell(value: Option<i32>) -> String {
    value.map(|year| year.to_string()).unwrap_or_default()
}

/// Escape text for inclusion in HTML element content and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Stylesheet for the table page
const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
.card { max-width: 80rem; margin: 0 auto; }
table.artworks { border-collapse: collapse; width: 100%; min-width: 50rem; }
th, td { border-bottom: 1px solid #e5e7eb; padding: 0.5rem; text-align: left; vertical-align: top; }
th.check, td.check { width: 3rem; }
tr.selected { background: #eef2ff; }
button.box { border: none; background: none; font-size: 1.2rem; cursor: pointer; }
details.overlay { display: inline-block; margin-right: 0.25rem; }
details.overlay summary { cursor: pointer; list-style: none; }
details.overlay form { position: absolute; background: #fff; border: 1px solid #ccc; padding: 0.5rem; display: flex; gap: 0.5rem; }
.footer { display: flex; justify-content: space-between; align-items: center; }
.paginator { display: flex; gap: 0.5rem; align-items: center; margin-top: 1rem; }
.paginator .current { font-weight: bold; }
.paginator .disabled { color: #aaa; }
.status { color: #555; }
.status.error { color: #b91c1c; }
.notice { background: #f0fdf4; padding: 0.5rem; }
.empty { text-align: center; color: #666; }
"#;

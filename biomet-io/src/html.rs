//! Standalone HTML reports.

use std::fmt::Write;

use biomet_stats::cmc::CmcStats;

use crate::report::{rank_headers, ScalarTable, GENERATOR};

const STYLE: &str = "table{border-collapse:collapse;font-family:sans-serif}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:right}\
th:first-child,td:first-child{text-align:left}";

/// Escape text for element content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn cell(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.6}")
    } else {
        "-".to_string()
    }
}

fn page(title: &str, headers: &[String], rows: &[(String, Vec<f64>)]) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{}</h1>", escape(title));
    let _ = writeln!(html, "<p>{}</p>", escape(GENERATOR));
    let _ = writeln!(html, "<table>\n<thead>\n<tr><th>Experiment ID</th>");
    for h in headers {
        let _ = writeln!(html, "<th>{}</th>", escape(h));
    }
    let _ = writeln!(html, "</tr>\n</thead>\n<tbody>");
    for (id, values) in rows {
        let _ = write!(html, "<tr><td>{}</td>", escape(id));
        for &v in values {
            let _ = write!(html, "<td>{}</td>", cell(v));
        }
        let _ = writeln!(html, "</tr>");
    }
    let _ = writeln!(html, "</tbody>\n</table>\n</body>\n</html>");
    html
}

pub(crate) fn render_eer(table: &ScalarTable) -> String {
    page("Verification report", &table.columns, &table.rows)
}

pub(crate) fn render_cmc(stats: &[CmcStats], max_rank: usize) -> String {
    let headers: Vec<String> = rank_headers(max_rank).collect();
    let rows: Vec<(String, Vec<f64>)> = stats
        .iter()
        .map(|s| (s.exp_id.clone(), s.ranks[..max_rank].to_vec()))
        .collect();
    page("CMC report", &headers, &rows)
}

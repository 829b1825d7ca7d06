//! LaTeX reports.
//!
//! The scalar table is transposed (one row per metric, one column per
//! experiment) so that it fits a page. The output is a bare `table`
//! environment meant to be `\input` into a document.

use std::fmt::Write;

use biomet_stats::cmc::CmcStats;

use crate::report::{rank_headers, ScalarTable, GENERATOR};

/// Escape LaTeX special characters.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            c => out.push(c),
        }
    }
    out
}

fn cell(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.6}")
    } else {
        "--".to_string()
    }
}

fn begin(tex: &mut String, caption: &str, columns: usize) {
    let _ = writeln!(tex, "% {GENERATOR}");
    let _ = writeln!(tex, "\\begin{{table}}[ht]");
    let _ = writeln!(tex, "\\centering");
    let _ = writeln!(tex, "\\caption{{{}}}", escape(caption));
    let _ = writeln!(tex, "\\begin{{tabular}}{{l{}}}", "r".repeat(columns));
    let _ = writeln!(tex, "\\hline");
}

fn end(tex: &mut String) {
    let _ = writeln!(tex, "\\hline");
    let _ = writeln!(tex, "\\end{{tabular}}");
    let _ = writeln!(tex, "\\end{{table}}");
}

fn row(tex: &mut String, first: &str, rest: impl Iterator<Item = String>) {
    let _ = write!(tex, "{}", escape(first));
    for cell in rest {
        let _ = write!(tex, " & {cell}");
    }
    let _ = writeln!(tex, " \\\\");
}

pub(crate) fn render_eer(table: &ScalarTable) -> String {
    let mut tex = String::new();
    begin(&mut tex, "Verification statistics", table.rows.len());
    row(&mut tex, "Metric", table.rows.iter().map(|(id, _)| escape(id)));
    let _ = writeln!(tex, "\\hline");
    for (i, metric) in table.columns.iter().enumerate() {
        row(&mut tex, metric, table.rows.iter().map(|(_, values)| cell(values[i])));
    }
    end(&mut tex);
    tex
}

pub(crate) fn render_cmc(stats: &[CmcStats], max_rank: usize) -> String {
    let mut tex = String::new();
    begin(&mut tex, "CMC rank values", max_rank);
    row(&mut tex, "Experiment ID", rank_headers(max_rank));
    let _ = writeln!(tex, "\\hline");
    for st in stats {
        row(&mut tex, &st.exp_id, st.ranks[..max_rank].iter().map(|&v| cell(v)));
    }
    end(&mut tex);
    tex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn escapes_specials() {
        assert_eq!(escape("B_2 50%"), "B\\_2 50\\%");
        assert_eq!(escape("a\\b"), "a\\textbackslash{}b");
    }

    #[test]
    fn eer_table_is_transposed() {
        let table = ScalarTable::new(&fixtures::two_experiments()).unwrap();
        let tex = render_eer(&table);
        assert!(tex.contains("\\begin{tabular}{lrr}"));
        assert!(tex.contains("Metric & A & B\\_2 \\\\"));
        assert!(tex.contains("AUC & 1.000000 & "));
        assert!(tex.contains("J-Index\\_TH & "));
        assert!(tex.trim_end().ends_with("\\end{table}"));
    }

    #[test]
    fn cmc_table() {
        let tex = render_cmc(&fixtures::cmc_experiment(), 2);
        assert!(tex.contains("Experiment ID & Rank-1 & Rank-2 \\\\"));
        assert!(tex.contains("exp & 0.500000 & 1.000000 \\\\"));
    }
}

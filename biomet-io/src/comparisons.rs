//! Identification (1:N) inputs: comparison files and true-pairs files.
//!
//! A comparison file has one `query candidate score` line per comparison;
//! fields beyond the third are ignored. A true-pairs file maps each query to
//! the gallery identity it actually belongs to, one `query identity` line per
//! query.

use std::collections::HashMap;
use std::path::Path;

use biomet_core::Result;
use biomet_stats::cmc::Comparison;

use crate::lines::{data_lines, parse_error, read_data_lines, STRING_SOURCE};

/// Parse comparison text.
pub fn parse_comparisons_str(text: &str) -> Result<Vec<Comparison>> {
    let source = Path::new(STRING_SOURCE);
    data_lines(text)
        .map(|(line_num, line)| parse_comparison_line(line, line_num, source))
        .collect()
}

/// Read a comparison file.
pub fn read_comparisons(path: impl AsRef<Path>) -> Result<Vec<Comparison>> {
    let path = path.as_ref();
    let lines = read_data_lines(path)?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        lines
            .par_iter()
            .map(|(line_num, line)| parse_comparison_line(line, *line_num, path))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    lines
        .iter()
        .map(|(line_num, line)| parse_comparison_line(line, *line_num, path))
        .collect()
}

/// Parse true-pairs text into a `query -> identity` map.
pub fn parse_true_pairs_str(text: &str) -> Result<HashMap<String, String>> {
    let source = Path::new(STRING_SOURCE);
    collect_true_pairs(data_lines(text), source)
}

/// Read a true-pairs file.
pub fn read_true_pairs(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let lines = read_data_lines(path)?;
    collect_true_pairs(lines.iter().map(|(n, l)| (*n, l.as_str())), path)
}

fn parse_comparison_line(line: &str, line_num: usize, source: &Path) -> Result<Comparison> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(parse_error(
            source,
            line_num,
            format!("expected 'query candidate score', got {} field(s)", fields.len()),
        ));
    }
    let score: f64 = fields[2].parse().map_err(|_| {
        parse_error(source, line_num, format!("invalid score '{}'", fields[2]))
    })?;
    if !score.is_finite() {
        return Err(parse_error(
            source,
            line_num,
            format!("non-finite score '{}'", fields[2]),
        ));
    }
    Ok(Comparison {
        query: fields[0].to_string(),
        candidate: fields[1].to_string(),
        score,
    })
}

fn collect_true_pairs<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
    source: &Path,
) -> Result<HashMap<String, String>> {
    let mut pairs = HashMap::new();
    for (line_num, line) in lines {
        let mut fields = line.split_whitespace();
        let (Some(query), Some(identity)) = (fields.next(), fields.next()) else {
            return Err(parse_error(source, line_num, "expected 'query identity'"));
        };
        match pairs.get(query) {
            Some(existing) if existing != identity => {
                return Err(parse_error(
                    source,
                    line_num,
                    format!("query '{query}' already mapped to '{existing}'"),
                ));
            }
            Some(_) => {}
            None => {
                pairs.insert(query.to_string(), identity.to_string());
            }
        }
    }
    Ok(pairs)
}

//! Genuine / impostor score files.
//!
//! A score file holds one comparison per line. Only the last
//! whitespace-separated field is read, so lines such as
//! `query_01 gallery_07 0.8123` and bare `0.8123` are both accepted.
//!
//! A histogram file has the same layout, but line `k` holds the number of
//! impostor comparisons that produced the integer score `k`.

use std::path::Path;

use biomet_core::Result;

use crate::lines::{data_lines, parse_error, read_data_lines, STRING_SOURCE};

/// Parse score text into a list of scores.
pub fn parse_scores_str(text: &str) -> Result<Vec<f64>> {
    let source = Path::new(STRING_SOURCE);
    data_lines(text)
        .map(|(line_num, line)| parse_score_line(line, line_num, source))
        .collect()
}

/// Read a score file.
pub fn read_scores(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    read_data_lines(path)?
        .iter()
        .map(|(line_num, line)| parse_score_line(line, *line_num, path))
        .collect()
}

/// Parse histogram text into per-score counts.
pub fn parse_histogram_str(text: &str) -> Result<Vec<u64>> {
    let source = Path::new(STRING_SOURCE);
    data_lines(text)
        .map(|(line_num, line)| parse_count_line(line, line_num, source))
        .collect()
}

/// Read an impostor histogram file.
pub fn read_histogram(path: impl AsRef<Path>) -> Result<Vec<u64>> {
    let path = path.as_ref();
    read_data_lines(path)?
        .iter()
        .map(|(line_num, line)| parse_count_line(line, *line_num, path))
        .collect()
}

fn last_field<'a>(line: &'a str, line_num: usize, source: &Path) -> Result<&'a str> {
    line.split_whitespace()
        .last()
        .ok_or_else(|| parse_error(source, line_num, "empty line"))
}

fn parse_score_line(line: &str, line_num: usize, source: &Path) -> Result<f64> {
    let field = last_field(line, line_num, source)?;
    let score: f64 = field
        .parse()
        .map_err(|_| parse_error(source, line_num, format!("invalid score '{field}'")))?;
    if !score.is_finite() {
        return Err(parse_error(source, line_num, format!("non-finite score '{field}'")));
    }
    Ok(score)
}

fn parse_count_line(line: &str, line_num: usize, source: &Path) -> Result<u64> {
    let field = last_field(line, line_num, source)?;
    if let Ok(count) = field.parse::<u64>() {
        return Ok(count);
    }
    // Counts written by float-formatting tools, e.g. "12.0".
    match field.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        _ => Err(parse_error(
            source,
            line_num,
            format!("invalid histogram count '{field}': expected a non-negative integer"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biomet_core::BiometError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_last_field() {
        let text = "# genuine\nq1 t1 0.75\n0.5\n\nq2 t9 -1e-3\n";
        let scores = parse_scores_str(text).unwrap();
        assert_eq!(scores, vec![0.75, 0.5, -0.001]);
    }

    #[test]
    fn parse_bad_score_reports_line() {
        let err = parse_scores_str("0.1\nq1 t1 abc\n").unwrap_err();
        match err {
            BiometError::Parse(msg) => {
                assert!(msg.contains("line 2"), "{msg}");
                assert!(msg.contains("abc"), "{msg}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_nan() {
        assert!(parse_scores_str("NaN\n").is_err());
    }

    #[test]
    fn parse_histogram() {
        let counts = parse_histogram_str("3\n0\n12.0\n1\n").unwrap();
        assert_eq!(counts, vec![3, 0, 12, 1]);
    }

    #[test]
    fn histogram_rejects_fractions_and_negatives() {
        assert!(parse_histogram_str("1.5\n").is_err());
        assert!(parse_histogram_str("-2\n").is_err());
    }

    #[test]
    fn read_score_file() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(file, "a b 0.9").unwrap();
        writeln!(file, "a c 0.1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "b c 0.4").unwrap();
        file.flush().unwrap();

        let scores = read_scores(file.path()).unwrap();
        assert_eq!(scores, vec![0.9, 0.1, 0.4]);
    }

    #[test]
    fn read_histogram_file() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(file, "1").unwrap();
        writeln!(file, "1").unwrap();
        writeln!(file, "x").unwrap();
        file.flush().unwrap();

        let err = read_histogram(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains(&file.path().display().to_string()), "{msg}");
    }

    #[test]
    fn read_missing_file() {
        assert!(matches!(
            read_scores("/nonexistent/genuine.txt"),
            Err(BiometError::Io(_))
        ));
    }
}

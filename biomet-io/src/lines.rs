//! Line-oriented reading shared by the score-file loaders.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use biomet_core::{BiometError, Result};

/// Placeholder path used in messages for in-memory input.
pub(crate) const STRING_SOURCE: &str = "<string>";

/// Open `path`, naming it in the error on failure.
pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        BiometError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Read the data lines of a file as `(1-based line number, trimmed line)`.
///
/// Blank lines and lines starting with `#` are skipped.
pub(crate) fn read_data_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let reader = BufReader::new(open(path)?);
    let mut lines = Vec::new();
    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| {
            BiometError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: line {}: {}", path.display(), line_num + 1, e),
            ))
        })?;
        let trimmed = line.trim();
        if is_data(trimmed) {
            lines.push((line_num + 1, trimmed.to_string()));
        }
    }
    Ok(lines)
}

/// In-memory counterpart of [`read_data_lines`].
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| is_data(line))
}

fn is_data(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#')
}

/// Build a parse error pointing at `source:line`.
pub(crate) fn parse_error(source: &Path, line_num: usize, msg: impl std::fmt::Display) -> BiometError {
    BiometError::Parse(format!("{}: line {}: {}", source.display(), line_num, msg))
}

//! Grid to text.
//!
//! `render` only joins cells; wrapping and truncation must already have
//! happened upstream. `align` feeds the joined lines through a tab-stop
//! writer so cells line up in fixed-width columns.

use super::{positive_width, LayoutError, LayoutResult};
use std::io::{self, Write};
use tabwriter::TabWriter;

/// Separator placed between cells of one display line.
pub const COLUMN_SEPARATOR: &str = "\t";
/// Minimum spaces between aligned columns when not configured.
pub const DEFAULT_PADDING: i64 = 4;

/// Joins each grid row into one tab-separated display line.
pub fn render<S: AsRef<str>>(rows: &[Vec<S>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR)
        })
        .collect()
}

/// Aligns tab-separated lines into space-padded columns.
///
/// Each column is as wide as its widest cell plus `padding` spaces. The
/// returned text ends every line with `\n`.
///
/// # Errors
/// - `LayoutError::InvalidArgument` when `padding <= 0`.
/// - `LayoutError::Io` when the tab writer cannot flush.
pub fn align<S: AsRef<str>>(lines: &[S], padding: i64) -> LayoutResult<String> {
    let padding = positive_width("padding", padding)?;
    let mut writer = TabWriter::new(Vec::new()).minwidth(0).padding(padding);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()?;

    let bytes = writer.into_inner().map_err(|err| {
        LayoutError::Io(io::Error::new(err.error().kind(), err.error().to_string()))
    })?;
    String::from_utf8(bytes)
        .map_err(|err| LayoutError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

#[cfg(test)]
mod tests {
    use super::{align, render};
    use crate::layout::LayoutError;

    #[test]
    fn render_joins_cells_with_tabs() {
        let rows = vec![vec!["a", "x"], vec!["b", " "]];
        assert_eq!(render(&rows), vec!["a\tx".to_string(), "b\t ".to_string()]);
    }

    #[test]
    fn render_keeps_one_line_per_row() {
        let rows: Vec<Vec<&str>> = vec![vec!["only"], Vec::new(), vec!["1", "2", "3"]];
        let lines = render(&rows);
        assert_eq!(lines, vec!["only", "", "1\t2\t3"]);
    }

    #[test]
    fn align_lines_up_columns() {
        let aligned = align(&["a\tb", "ccc\td"], 4).unwrap();
        let lines = aligned.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        let first = lines[0].find('b').unwrap();
        let second = lines[1].find('d').unwrap();
        assert_eq!(first, second);
        assert!(second >= "ccc".len() + 4);
    }

    #[test]
    fn align_rejects_non_positive_padding() {
        assert!(matches!(
            align(&["a\tb"], 0),
            Err(LayoutError::InvalidArgument { name: "padding", .. })
        ));
    }
}

//! Plain-text and CSV output for score tables.

use std::path::Path;

use crate::evaluation::ScoreTable;

const HEADERS: [&str; 3] = ["model_name", "window_name", "rmse"];

/// Render `table` as aligned columns with a header row.
pub fn render(table: &ScoreTable) -> String {
    let rows: Vec<[String; 3]> = table
        .iter()
        .map(|r| [r.model.clone(), r.window.to_string(), r.rmse.to_string()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(String::from);
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:>w2$}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Write `table` as CSV with columns `model_name,window_name,rmse`.
pub fn write_csv(table: &ScoreTable, path: impl AsRef<Path>) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in table {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

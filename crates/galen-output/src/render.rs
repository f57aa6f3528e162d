//! Plain-text rendering of report tables.

use polars::prelude::*;

/// Render a report table as an ASCII table with a title rule.
///
/// Numeric columns are right-aligned, everything else left-aligned; null
/// cells render empty.
pub fn to_ascii_table(df: &DataFrame, title: &str) -> PolarsResult<String> {
    let mut names = Vec::with_capacity(df.width());
    let mut numeric = Vec::with_capacity(df.width());
    let mut cells = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        names.push(column.name().to_string());
        numeric.push(matches!(
            column.dtype(),
            DataType::Float64 | DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64
        ));
        let rendered = column.cast(&DataType::String)?;
        let rendered = rendered.str()?;
        cells.push(
            rendered
                .into_iter()
                .map(|value| value.unwrap_or("").to_string())
                .collect::<Vec<String>>(),
        );
    }

    let widths: Vec<usize> = names
        .iter()
        .zip(&cells)
        .map(|(name, column)| {
            column
                .iter()
                .map(String::len)
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    let mut output = String::new();
    output.push_str(&format!("{title}\n"));
    output.push_str(&"=".repeat(total_width.max(title.len())));
    output.push('\n');

    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            output.push_str("  ");
        }
        output.push_str(&pad(name, widths[i], numeric[i]));
    }
    output.push('\n');
    output.push_str(&"-".repeat(total_width.max(title.len())));
    output.push('\n');

    for row in 0..df.height() {
        for (i, column) in cells.iter().enumerate() {
            if i > 0 {
                output.push_str("  ");
            }
            output.push_str(&pad(&column[row], widths[i], numeric[i]));
        }
        output.push('\n');
    }

    Ok(output)
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

use crate::compare::OwnershipDiff;

/// Render a comparison result as markdown lines: a count header and a
/// pipe-delimited table, one row per changed file, sorted by path.
///
/// With `limit`, at most that many rows are shown, followed by a truncation
/// note; the count header always reports the full total. Rendering the same
/// result twice yields identical output.
pub fn render_lines(diff: &OwnershipDiff, limit: Option<usize>) -> Vec<String> {
    if diff.changes.is_empty() {
        return vec!["No files have changed ownership.".to_string()];
    }

    let total = diff.changes.len();
    let shown = limit.unwrap_or(total).min(total);

    let headers = [
        "file".to_string(),
        format!("`{}`", diff.base_ref),
        format!("`{}`", diff.head_ref),
    ];
    let rows: Vec<[String; 3]> = diff
        .changes
        .iter()
        .take(shown)
        .map(|(file, change)| {
            [
                format!("`{file}`"),
                change.base.join(", "),
                change.head.join(", "),
            ]
        })
        .collect();

    // Columns fit their widest displayed cell; headers reserve two extra
    // characters of padding.
    let mut widths = [
        headers[0].len() + 2,
        headers[1].len() + 2,
        headers[2].len() + 2,
    ];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 6);
    lines.push(format!("{total} files have changed ownership:"));
    lines.push(String::new());
    lines.push(format_row(&headers, &widths));
    lines.push(separator_row(&widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }

    if shown < total {
        lines.push(String::new());
        lines.push(format!(
            "Note that the above table was truncated to {shown} items."
        ));
    }

    lines
}

fn format_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths.iter().copied()) {
        line.push_str(&format!("| {:<1$} ", cell, width));
    }
    line.push('|');
    line
}

fn separator_row(widths: &[usize; 3]) -> String {
    let mut line = String::new();
    for width in widths.iter().copied() {
        line.push_str(&format!("|:{}", "-".repeat(width + 1)));
    }
    line.push('|');
    line
}

//! Text-grid rendering for tabular data.
//!
//! Used by the CSV visualizer and for the metadata preview log line.

/// Render columns and rows as an aligned box-drawing grid.
///
/// Cell widths grow to the widest value, capped at `max_width` characters;
/// longer values are truncated with an ellipsis. Widths are measured in
/// characters so multi-byte content cannot break the layout.
pub fn format_grid(columns: &[String], rows: &[Vec<String>], max_width: usize) -> String {
    if columns.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, val) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(val.chars().count());
            }
        }
    }
    widths.iter_mut().for_each(|w| *w = (*w).min(max_width));

    let mut output = String::new();

    push_border(&mut output, &widths, '┌', '┬', '┐');

    output.push('│');
    for (i, col) in columns.iter().enumerate() {
        let truncated = truncate(col, widths[i]);
        output.push_str(&format!(" {:width$} │", truncated, width = widths[i]));
    }
    output.push('\n');

    push_border(&mut output, &widths, '├', '┼', '┤');

    for row in rows {
        output.push('│');
        for (i, val) in row.iter().enumerate() {
            if i < widths.len() {
                let truncated = truncate(val, widths[i]);
                output.push_str(&format!(" {:width$} │", truncated, width = widths[i]));
            }
        }
        output.push('\n');
    }

    push_border(&mut output, &widths, '└', '┴', '┘');

    output.push_str(&format!(
        "{} row{}\n",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    ));

    output
}

fn push_border(output: &mut String, widths: &[usize], left: char, mid: char, right: char) {
    output.push(left);
    for (i, width) in widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < widths.len() - 1 {
            output.push(mid);
        }
    }
    output.push(right);
    output.push('\n');
}

/// Truncate to a maximum character count, ellipsis included
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_grid_alignment() {
        let columns = strings(&["id", "name"]);
        let rows = vec![strings(&["1", "alice"]), strings(&["2", "bob"])];
        let grid = format_grid(&columns, &rows, 20);

        assert!(grid.starts_with('┌'));
        assert!(grid.contains("│ id │ name  │"));
        assert!(grid.contains("│ 1  │ alice │"));
        assert!(grid.contains("│ 2  │ bob   │"));
        assert!(grid.ends_with("2 rows\n"));
    }

    #[test]
    fn test_format_grid_truncates_wide_cells() {
        let columns = strings(&["c"]);
        let rows = vec![strings(&["abcdefghij"])];
        let grid = format_grid(&columns, &rows, 5);

        assert!(grid.contains("abcd…"));
        assert!(!grid.contains("abcdefghij"));
    }

    #[test]
    fn test_format_grid_singular_row_count() {
        let columns = strings(&["x"]);
        let rows = vec![strings(&["1"])];
        assert!(format_grid(&columns, &rows, 10).ends_with("1 row\n"));
    }

    #[test]
    fn test_format_grid_empty() {
        assert_eq!(format_grid(&[], &[], 10), "");
        let grid = format_grid(&strings(&["a"]), &[], 10);
        assert!(grid.ends_with("0 rows\n"));
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("héllo wörld", 6), "héllo…");
        assert_eq!(truncate("short", 10), "short");
    }
}

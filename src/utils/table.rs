/// Column alignment inside a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A text table rendered inside a Discord code block
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    aligns: Vec<Align>,
}

/// Display width in characters; multi-byte symbols like `₹` count once
fn width_of(s: &str) -> usize {
    s.chars().count()
}

impl Table {
    /// Create a new table with the given headers, all left aligned
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| width_of(h)).collect();
        let aligns = vec![Align::Left; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
            aligns,
        }
    }

    /// Right-align every column after the first; suits label + numbers tables
    pub fn numeric(mut self) -> Self {
        for align in self.aligns.iter_mut().skip(1) {
            *align = Align::Right;
        }
        self
    }

    /// Add a row; cells beyond the header count are dropped
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row
            .into_iter()
            .take(self.headers.len())
            .map(str::to_string)
            .collect();

        for (i, cell) in row.iter().enumerate() {
            self.col_widths[i] = self.col_widths[i].max(width_of(cell));
        }

        self.rows.push(row);
    }

    /// Render the table as a code block
    pub fn render(&self) -> String {
        let mut output = String::from("```\n");
        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output.push_str("```");
        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = " ".repeat(self.col_widths[i] - width_of(cell));
                match self.aligns[i] {
                    Align::Left => format!("{}{}", cell, pad),
                    Align::Right => format!("{}{}", pad, cell),
                }
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Crop", "Price"]);
        table.add_row(vec!["Rice", "31.50"]);
        table.add_row(vec!["Onion", "8.00"]);

        let rendered = table.render();
        assert!(rendered.contains("Crop"));
        assert!(rendered.contains("Rice "));
        assert!(rendered.contains("Onion"));
        assert!(rendered.starts_with("```\n") && rendered.ends_with("```"));
    }

    #[test]
    fn test_rupee_header_width_counts_chars() {
        let mut table = Table::new(vec!["Crop", "₹/kg"]).numeric();
        table.add_row(vec!["Rice", "9.5"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "Crop | ₹/kg");
        assert_eq!(lines[2], "-----+-----");
        assert_eq!(lines[3], "Rice |  9.5");
    }

    #[test]
    fn test_extra_cells_are_dropped() {
        let mut table = Table::new(vec!["A"]);
        table.add_row(vec!["x", "y"]);
        assert!(!table.render().contains('y'));
    }
}

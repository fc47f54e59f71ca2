/// An ascii table
#[derive(Debug)]
pub struct AsciiTable<'a> {
    data: Vec<Vec<&'a str>>,

    max_cell_widths: Vec<usize>,
    padding: usize,
}

impl<'a> AsciiTable<'a> {
    /// Make a new table
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![vec![""; width]; height],
            max_cell_widths: vec![0; width],
            padding: 0,
        }
    }

    /// Set the # of spaces added around the widest cell of each column.
    pub fn set_padding(&mut self, padding: usize) {
        self.padding = padding;
    }

    /// Set the value of the given cell.
    ///
    /// Indexing starts at 0. It starts at the top left corner and ends at the bottom right.
    pub fn set_cell(&mut self, x: usize, y: usize, data: &'a str) {
        self.data[y][x] = data;
        self.max_cell_widths[x] = std::cmp::max(self.max_cell_widths[x], data.len());
    }

    fn column_width(&self, x: usize) -> usize {
        self.max_cell_widths[x] + self.padding
    }

    fn fmt_row_border(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+")?;
        for x in 0..self.max_cell_widths.len() {
            write!(f, "{}+", "-".repeat(self.column_width(x)))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl std::fmt::Display for AsciiTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.data.iter() {
            self.fmt_row_border(f)?;

            for (x, cell) in row.iter().enumerate() {
                let padding = self.column_width(x).saturating_sub(cell.len());
                let left = padding / 2;
                let right = padding - left;

                write!(f, "|{}{}{}", " ".repeat(left), cell, " ".repeat(right))?;
            }
            writeln!(f, "|")?;
        }
        self.fmt_row_border(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn render() {
        let mut table = AsciiTable::new(2, 2);
        table.set_padding(2);
        table.set_cell(0, 0, "Draws");
        table.set_cell(1, 0, "X");
        table.set_cell(0, 1, "10");
        table.set_cell(1, 1, "3");

        let expected = "\
+-------+---+
| Draws | X |
+-------+---+
|  10   | 3 |
+-------+---+
";
        assert_eq!(table.to_string(), expected);
    }
}

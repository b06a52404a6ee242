use std::cmp::max;

/// Accumulates rows of cells and renders them with every column padded to
/// its widest cell.
#[derive(Default, Debug, Clone)]
pub struct Table {
    col_len: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.col_len.len() {
            self.col_len.resize(row.len(), 0);
        }
        self.col_len
            .iter_mut()
            .zip(&row)
            .for_each(|(len, s)| *len = max(*len, s.chars().count()));
        self.rows.push(row);
    }

    pub fn to_string(&self, sep: &str) -> String {
        let pad = |s: &str, len: usize| {
            let chars = s.chars().count();
            if chars < len {
                format!("{}{}", s, " ".repeat(len - chars))
            } else {
                s.to_string()
            }
        };
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.col_len)
                    .map(|(s, len)| format!("{}{sep}", pad(s, *len)))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Column-budget line wrapping for generated source.
//!
//! Purely textual: a line longer than the budget is broken at the last
//! space that fits, and continuation lines are aligned one column past the
//! first `{ ` (or `(`) of the input line. Output is a pure function of
//! the input line, depth and budget.

use thiserror::Error;

pub const TAB_SIZE: usize = 2;
pub const MAX_COL: usize = 80;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("impossible line to reflow within {budget} columns: {line:?}")]
    Unbreakable { budget: usize, line: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormatter {
    pub tab_size: usize,
    pub max_col: usize,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self {
            tab_size: TAB_SIZE,
            max_col: MAX_COL,
        }
    }
}

impl LineFormatter {
    /// Split `line` into pieces that fit once indented by `depth` levels.
    /// The first piece carries no padding; later pieces carry the
    /// continuation padding but not the depth indentation.
    pub fn reflow(&self, line: &str, depth: usize) -> Result<Vec<String>, FormatError> {
        let mut size = self.max_col.saturating_sub(depth * self.tab_size);
        if line.len() < size {
            return Ok(vec![line.to_string()]);
        }

        let mut lines = Vec::new();
        let mut cur = line;
        let mut padding = String::new();
        while cur.len() > size {
            let Some(i) = cur.as_bytes()[..size].iter().rposition(|b| *b == b' ') else {
                return Err(FormatError::Unbreakable {
                    budget: size,
                    line: line.to_string(),
                });
            };
            lines.push(format!("{}{}", padding, &cur[..i]));

            if lines.len() == 1 {
                /* continuation column comes from the first delimiter before the break */
                let head = &cur[..i];
                let continuation = head
                    .find('{')
                    .map(|j| j + 2)
                    .or_else(|| head.find('(').map(|j| j + 1));
                if let Some(j) = continuation {
                    size = size.saturating_sub(j);
                    padding = " ".repeat(j);
                }
            }
            cur = &cur[i + 1..];
        }
        lines.push(format!("{}{}", padding, cur));
        Ok(lines)
    }

    /// Reflow and indent, producing newline-terminated physical lines.
    pub fn format(&self, line: &str, depth: usize) -> Result<Vec<String>, FormatError> {
        let indent = " ".repeat(self.tab_size * depth);
        Ok(self
            .reflow(line, depth)?
            .into_iter()
            .map(|piece| format!("{indent}{piece}\n"))
            .collect())
    }
}

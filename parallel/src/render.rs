//! Presentation collaborators. They receive a finished [`RankedList`] and a
//! display count and decide how it looks.

use std::io::{self, Write};

use common::RankedList;

pub trait Render {
    fn render(&self, list: &RankedList, shown: usize, out: &mut dyn Write) -> io::Result<()>;
}

/// Horizontal bar chart, most frequent word first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarChart {
    /// Width of the longest bar in characters
    pub width: usize,
}

impl Default for BarChart {
    fn default() -> Self {
        Self { width: 50 }
    }
}

impl Render for BarChart {
    fn render(&self, list: &RankedList, shown: usize, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Top {shown} Most Frequent Words")?;
        let rows = list.top(shown);
        if rows.is_empty() {
            return writeln!(out, "(no words)");
        }

        let label = rows.iter().map(|c| c.word.chars().count()).max().unwrap_or(0);
        let max = rows.iter().map(|c| c.total).max().unwrap_or(1).max(1);
        for count in rows {
            let len = (count.total.saturating_mul(self.width as u64) / max).max(1) as usize;
            writeln!(
                out,
                "{:<label$} | {} {}",
                count.word.as_str(),
                "█".repeat(len),
                count.total
            )?;
        }
        Ok(())
    }
}

/// Pretty-printed JSON array of `{"word", "total"}` objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl Render for Json {
    fn render(&self, list: &RankedList, shown: usize, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, list.top(shown))?;
        writeln!(out)
    }
}

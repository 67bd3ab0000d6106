//! Dense topic × date count table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Errors raised when assembling a matrix from rows
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Row '{topic}' has {got} cells, expected {expected}")]
    RowLength {
        topic: String,
        expected: usize,
        got: usize,
    },

    #[error("Duplicate row: {0}")]
    DuplicateRow(String),
}

/// Topic rows by chronological date columns
///
/// Cells are non-negative counts. A matrix is built once per report and
/// never modified; slicing and filtering produce new matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendMatrix {
    columns: Vec<NaiveDate>,
    topics: Vec<String>,
    cells: Vec<Vec<u64>>,
}

impl TrendMatrix {
    /// Assemble a matrix from `(topic, counts)` rows, keeping row order
    ///
    /// # Errors
    /// Every row must have one cell per column and topic names must be unique.
    pub fn from_rows<I>(columns: Vec<NaiveDate>, rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = (String, Vec<u64>)>,
    {
        let mut topics = Vec::new();
        let mut cells = Vec::new();

        for (topic, counts) in rows {
            if counts.len() != columns.len() {
                return Err(MatrixError::RowLength {
                    topic,
                    expected: columns.len(),
                    got: counts.len(),
                });
            }
            if topics.contains(&topic) {
                return Err(MatrixError::DuplicateRow(topic));
            }
            topics.push(topic);
            cells.push(counts);
        }

        Ok(Self {
            columns,
            topics,
            cells,
        })
    }

    /// Assemble from parts the caller already knows to be consistent
    pub(crate) fn from_dense(columns: Vec<NaiveDate>, topics: Vec<String>, cells: Vec<Vec<u64>>) -> Self {
        debug_assert_eq!(topics.len(), cells.len());
        debug_assert!(cells.iter().all(|row| row.len() == columns.len()));
        Self {
            columns,
            topics,
            cells,
        }
    }

    /// Matrix with columns but no rows
    #[must_use]
    pub fn empty(columns: Vec<NaiveDate>) -> Self {
        Self {
            columns,
            topics: Vec::new(),
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[NaiveDate] {
        &self.columns
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Number of topic rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Number of date columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Iterate `(topic, counts)` rows in order
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.topics
            .iter()
            .zip(&self.cells)
            .map(|(topic, counts)| (topic.as_str(), counts.as_slice()))
    }

    #[must_use]
    pub fn row(&self, topic: &str) -> Option<&[u64]> {
        self.topic_index(topic).map(|i| self.cells[i].as_slice())
    }

    #[must_use]
    pub fn row_at(&self, index: usize) -> Option<&[u64]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn topic_index(&self, topic: &str) -> Option<usize> {
        self.topics.iter().position(|t| t == topic)
    }

    /// Single cell, zero when the topic or date is not in the matrix
    #[must_use]
    pub fn cell(&self, topic: &str, date: NaiveDate) -> u64 {
        let column = self.columns.iter().position(|&d| d == date);
        match (self.topic_index(topic), column) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }

    /// Sum of one row across all columns
    #[must_use]
    pub fn row_total(&self, index: usize) -> u64 {
        self.cells.get(index).map_or(0, |row| row.iter().sum())
    }

    /// Per-row sums, in row order
    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        (0..self.len()).map(|i| self.row_total(i)).collect()
    }

    /// Per-column sums, in column order
    #[must_use]
    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.width())
            .map(|c| self.cells.iter().map(|row| row[c]).sum())
            .collect()
    }

    /// Sum of every cell
    #[must_use]
    pub fn total_mentions(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    /// Column index of the row's maximum (first one on ties)
    #[must_use]
    pub fn row_argmax(&self, index: usize) -> Option<usize> {
        let row = self.cells.get(index)?;
        row.iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u64)>, (i, &v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Column index of the row's minimum (first one on ties)
    #[must_use]
    pub fn row_argmin(&self, index: usize) -> Option<usize> {
        let row = self.cells.get(index)?;
        row.iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u64)>, (i, &v)| match best {
                Some((_, b)) if b <= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Matrix restricted to the last `n` columns
    #[must_use]
    pub fn last_columns(&self, n: usize) -> Self {
        let start = self.width().saturating_sub(n);
        self.column_range(start..self.width())
    }

    /// Matrix restricted to the first `n` columns
    #[must_use]
    pub fn first_columns(&self, n: usize) -> Self {
        self.column_range(0..n.min(self.width()))
    }

    /// Matrix restricted to a column range
    #[must_use]
    pub fn column_range(&self, range: Range<usize>) -> Self {
        Self {
            columns: self.columns[range.clone()].to_vec(),
            topics: self.topics.clone(),
            cells: self
                .cells
                .iter()
                .map(|row| row[range.clone()].to_vec())
                .collect(),
        }
    }

    /// Drop rows whose total is below `min_total`
    #[must_use]
    pub fn filter_min_total(self, min_total: u64) -> Self {
        let Self {
            columns,
            topics,
            cells,
        } = self;

        let (topics, cells): (Vec<String>, Vec<Vec<u64>>) = topics
            .into_iter()
            .zip(cells)
            .filter(|(_, row)| row.iter().sum::<u64>() >= min_total)
            .unzip();

        Self {
            columns,
            topics,
            cells,
        }
    }
}

//! Karnaugh map layout
//!
//! The first `⌊n/2⌋` variables index the rows, the remaining `⌈n/2⌉` the
//! columns. Each axis is laid out in Gray-code order so that physically
//! adjacent cells (with wraparound) differ in exactly one variable.
//!
//! | variables | rows × cols | row vars | col vars |
//! |-----------|-------------|----------|----------|
//! | 2         | 2 × 2       | 1        | 1        |
//! | 3         | 2 × 4       | 1        | 2        |
//! | 4         | 4 × 4       | 2        | 2        |

use crate::encoding;
use crate::error::KmapError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Smallest supported number of variables
pub const MIN_VARIABLES: usize = 2;
/// Largest supported number of variables
pub const MAX_VARIABLES: usize = 4;

/// Value shown in one map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "X")]
    DontCare,
}

impl CellValue {
    /// Symbol shown in the cell: `0`, `1` or `X`
    pub fn as_str(&self) -> &'static str {
        match self {
            CellValue::Zero => "0",
            CellValue::One => "1",
            CellValue::DontCare => "X",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the variables of an n-variable map are split across the two axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    num_vars: usize,
    row_bits: usize,
    col_bits: usize,
}

impl Layout {
    /// Layout for `num_vars` variables
    ///
    /// Fails with [`KmapError::UnsupportedVariableCount`] outside `2..=4`.
    pub fn new(num_vars: usize) -> Result<Self, KmapError> {
        if !(MIN_VARIABLES..=MAX_VARIABLES).contains(&num_vars) {
            return Err(KmapError::UnsupportedVariableCount { count: num_vars });
        }
        let row_bits = num_vars / 2;
        Ok(Layout {
            num_vars,
            row_bits,
            col_bits: num_vars - row_bits,
        })
    }

    /// Number of variables on both axes
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        1 << self.row_bits
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        1 << self.col_bits
    }

    /// Number of variables on the row axis
    pub fn row_bits(&self) -> usize {
        self.row_bits
    }

    /// Number of variables on the column axis
    pub fn col_bits(&self) -> usize {
        self.col_bits
    }

    /// Physical `(row, col)` of the cell for `index`
    pub fn position(&self, index: u32) -> (usize, usize) {
        let col_mask = (1u32 << self.col_bits) - 1;
        let row_value = index >> self.col_bits;
        let col_value = index & col_mask;
        (
            encoding::gray_fold(row_value, self.row_bits),
            encoding::gray_fold(col_value, self.col_bits),
        )
    }

    /// Index of the cell shown at `(row, col)`
    pub fn index_at(&self, row: usize, col: usize) -> u32 {
        (encoding::gray_unfold(row, self.row_bits) << self.col_bits)
            | encoding::gray_unfold(col, self.col_bits)
    }
}

/// A rendered Karnaugh map with its axis labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KarnaughMap {
    map: Vec<Vec<CellValue>>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    row_vars: String,
    col_vars: String,
    output_name: String,
}

impl KarnaughMap {
    /// Lay out the truth table of a function on a map
    ///
    /// Cells in `on_set` show `1`, cells in `dc_set` show `X`, every other
    /// cell shows `0`. An index present in both sets shows `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_logic::kmap::{CellValue, KarnaughMap};
    /// use std::collections::BTreeSet;
    /// use std::sync::Arc;
    ///
    /// let vars: Vec<Arc<str>> = vec!["a".into(), "b".into(), "c".into()];
    /// let on: BTreeSet<u32> = [3].into_iter().collect();
    /// let map = KarnaughMap::build(&vars, &on, &BTreeSet::new(), "f").unwrap();
    ///
    /// assert_eq!(map.rows(), 2);
    /// assert_eq!(map.cols(), 4);
    /// // index 3 = a:0, bc:11 -> row 0, column 2 in Gray order
    /// assert_eq!(map.cell(0, 2), CellValue::One);
    /// ```
    pub fn build(
        variables: &[Arc<str>],
        on_set: &BTreeSet<u32>,
        dc_set: &BTreeSet<u32>,
        output_name: &str,
    ) -> Result<Self, KmapError> {
        let layout = Layout::new(variables.len())?;
        let mut map = vec![vec![CellValue::Zero; layout.cols()]; layout.rows()];

        for index in 0..1u32 << layout.num_vars() {
            let in_on = on_set.contains(&index);
            let in_dc = dc_set.contains(&index);
            if in_on && in_dc {
                warn!("index {} is both a minterm and a don't-care; showing 1", index);
            }
            let value = match (in_on, in_dc) {
                (true, _) => CellValue::One,
                (false, true) => CellValue::DontCare,
                (false, false) => CellValue::Zero,
            };
            let (row, col) = layout.position(index);
            map[row][col] = value;
        }

        let (row_vars, col_vars) = variables.split_at(layout.row_bits());
        Ok(KarnaughMap {
            map,
            row_labels: encoding::axis_labels(layout.row_bits()),
            col_labels: encoding::axis_labels(layout.col_bits()),
            row_vars: join_names(row_vars),
            col_vars: join_names(col_vars),
            output_name: output_name.to_string(),
        })
    }

    /// Map of the constant-zero function
    pub fn empty(variables: &[Arc<str>], output_name: &str) -> Result<Self, KmapError> {
        Self::build(variables, &BTreeSet::new(), &BTreeSet::new(), output_name)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.map.len()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.map.first().map_or(0, Vec::len)
    }

    /// Value at a physical position
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the map.
    pub fn cell(&self, row: usize, col: usize) -> CellValue {
        self.map[row][col]
    }

    /// All rows of the map
    pub fn cells(&self) -> &[Vec<CellValue>] {
        &self.map
    }

    /// Gray-code labels of the rows, top to bottom
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Gray-code labels of the columns, left to right
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Row variables joined with commas
    pub fn row_vars(&self) -> &str {
        &self.row_vars
    }

    /// Column variables joined with commas
    pub fn col_vars(&self) -> &str {
        &self.col_vars
    }

    /// Label of the function
    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

fn join_names(names: &[Arc<str>]) -> String {
    names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Plain-text table with the row/column variables in the corner
///
/// ```text
///   ab\cd  00 01 11 10
///   00     0  1  0  0
/// ```
impl fmt::Display for KarnaughMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner = format!(
            "{}\\{}",
            self.row_vars.replace(',', ""),
            self.col_vars.replace(',', "")
        );
        let width = corner.len().max(self.row_labels.first().map_or(0, String::len));
        let cell_width = self.col_labels.first().map_or(1, String::len);

        write!(f, "{:<width$}", corner, width = width)?;
        for label in &self.col_labels {
            write!(f, " {:<cell_width$}", label, cell_width = cell_width)?;
        }
        writeln!(f)?;

        for (label, row) in self.row_labels.iter().zip(&self.map) {
            write!(f, "{:<width$}", label, width = width)?;
            for cell in row {
                write!(f, " {:<cell_width$}", cell.as_str(), cell_width = cell_width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

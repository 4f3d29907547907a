//! Executes one validated action against an open book.
//!
//! The adapter is deliberately dumb: sheet lookup, address parsing, and the
//! six value-level operations. Sheet names are matched case-sensitively
//! against the book as it is *now*; the document may have changed between
//! resolution and execution, so existence is never assumed. The sheet check
//! always happens before address parsing, which keeps `SheetNotFound` and
//! `InvalidAddress` distinct and predictable.

use actions::Action;

use crate::address::{CellRef, RangeRef};
use crate::book::{Book, Sheet};
use crate::error::{Result, WorkbookError};

/// Outcome of executing one action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// A single cell's value; empty/absent cells normalize to empty text.
    Value(String),
    /// A range's values, structure preserved, row-major.
    Table(Vec<Vec<String>>),
    /// Sheet names in workbook order. Never empty.
    SheetNames(Vec<String>),
    /// Explicit marker for a workbook with no sheets, distinct from an empty
    /// list so it can't be mistaken for a transient read failure.
    NoSheets,
    /// Acknowledgement of a single-cell write.
    WroteCell {
        sheet: String,
        address: String,
        value: String,
    },
    /// Acknowledgement of a block write.
    WroteRange { sheet: String, start: String },
    /// Acknowledgement of a range clear.
    Cleared { sheet: String, range: String },
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionResult::Value(v) => write!(f, "{v}"),
            ActionResult::Table(rows) => {
                let json = serde_json::to_string(rows).map_err(|_| std::fmt::Error)?;
                write!(f, "{json}")
            }
            ActionResult::SheetNames(names) => write!(f, "{}", names.join(", ")),
            ActionResult::NoSheets => write!(f, "No sheets found."),
            ActionResult::WroteCell {
                sheet,
                address,
                value,
            } => write!(
                f,
                "Successfully wrote '{value}' to cell {address} on sheet {sheet}."
            ),
            ActionResult::WroteRange { sheet, start } => write!(
                f,
                "Successfully wrote data starting at cell {start} on sheet {sheet}."
            ),
            ActionResult::Cleared { sheet, range } => write!(
                f,
                "Successfully cleared content from range {range} on sheet {sheet}."
            ),
        }
    }
}

/// Execute `action` against `book`.
///
/// Terminal fallbacks (`inform_user`, `error`) and descriptor-only actions
/// never execute here; they surface as [`WorkbookError::UnsupportedAction`].
pub fn execute(book: &mut Book, action: &Action) -> Result<ActionResult> {
    match action {
        Action::ReadCell {
            sheet_name,
            cell_address,
            ..
        } => {
            let sheet = lookup(book, sheet_name)?;
            let cell = CellRef::parse(cell_address)?;
            Ok(ActionResult::Value(sheet.value(cell.row, cell.col).to_string()))
        }

        Action::ReadRange {
            sheet_name,
            range_address,
            ..
        } => {
            let sheet = lookup(book, sheet_name)?;
            let range = RangeRef::parse(range_address)?;

            let rows = match range_bounds(sheet, &range) {
                Some((r0, r1, c0, c1)) => (r0..=r1)
                    .map(|r| (c0..=c1).map(|c| sheet.value(r, c).to_string()).collect())
                    .collect(),
                None => Vec::new(),
            };
            Ok(ActionResult::Table(rows))
        }

        Action::WriteCell {
            sheet_name,
            cell_address,
            value,
            ..
        } => {
            lookup(book, sheet_name)?;
            let cell = CellRef::parse(cell_address)?;

            // Lookup already verified the sheet; the second fetch is for
            // mutable access and marks the book dirty.
            if let Some(sheet) = book.sheet_mut(sheet_name) {
                sheet.set_value(cell.row, cell.col, value.clone());
            }
            Ok(ActionResult::WroteCell {
                sheet: sheet_name.clone(),
                address: cell.to_string(),
                value: value.clone(),
            })
        }

        Action::WriteRange {
            sheet_name,
            start_cell_address,
            values,
            ..
        } => {
            lookup(book, sheet_name)?;
            let start = CellRef::parse(start_cell_address)?;

            if let Some(sheet) = book.sheet_mut(sheet_name) {
                for (r, row) in values.iter().enumerate() {
                    for (c, value) in row.iter().enumerate() {
                        sheet.set_value(start.row + r as u32, start.col + c as u32, value.clone());
                    }
                }
            }
            Ok(ActionResult::WroteRange {
                sheet: sheet_name.clone(),
                start: start.to_string(),
            })
        }

        Action::GetSheetNames { .. } => {
            let names = book.sheet_names();
            if names.is_empty() {
                Ok(ActionResult::NoSheets)
            } else {
                Ok(ActionResult::SheetNames(names))
            }
        }

        Action::ClearRangeContent {
            sheet_name,
            range_address,
            ..
        } => {
            let range = {
                let sheet = lookup(book, sheet_name)?;
                let range = RangeRef::parse(range_address)?;
                range_bounds(sheet, &range)
            };

            if let (Some((r0, r1, c0, c1)), Some(sheet)) = (range, book.sheet_mut(sheet_name)) {
                for r in r0..=r1 {
                    for c in c0..=c1 {
                        sheet.clear_value(r, c);
                    }
                }
            }
            Ok(ActionResult::Cleared {
                sheet: sheet_name.clone(),
                range: range_address.trim().to_string(),
            })
        }

        Action::CreateBarChart { .. }
        | Action::WriteFormula { .. }
        | Action::ApplyConditionalFormatting { .. }
        | Action::CreatePivotTable { .. }
        | Action::InformUser { .. }
        | Action::Error { .. } => Err(WorkbookError::UnsupportedAction(action.name())),
    }
}

fn lookup<'a>(book: &'a Book, name: &str) -> Result<&'a Sheet> {
    book.sheet(name)
        .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
}

/// Resolve a parsed range to inclusive `(row0, row1, col0, col1)` bounds.
/// Open column/row spans are bounded by the sheet's used region; `None`
/// means the resolved range covers nothing.
fn range_bounds(sheet: &Sheet, range: &RangeRef) -> Option<(u32, u32, u32, u32)> {
    match range {
        RangeRef::Cells { start, end } => Some((start.row, end.row, start.col, end.col)),
        RangeRef::Columns { start, end } => sheet
            .used_extent()
            .map(|(max_row, _)| (0, max_row, *start, *end)),
        RangeRef::Rows { start, end } => sheet
            .used_extent()
            .map(|(_, max_col)| (*start, *end, 0, max_col)),
    }
}

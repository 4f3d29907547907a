//! The action vocabulary.
//!
//! One enum variant per supported spreadsheet operation. The serde
//! representation (`tag = "action"`, snake_case) is the wire contract: a
//! serialized `Action` is exactly the JSON descriptor an external executor
//! consumes, so tags and field names are frozen.

use serde::{Deserialize, Serialize};

/// One validated, structured spreadsheet operation with bound parameters.
///
/// Constructed once per request by the intent resolver, immutable afterwards,
/// and consumed exactly once: executed against a local document, or serialized
/// as a descriptor for a remote front end.
///
/// `workbook_name` identifies the target workbook in the delegated variant; it
/// is absent (and not serialized) when the gateway executes locally against a
/// configured file path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Read the value of a single cell.
    ReadCell {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        cell_address: String,
    },

    /// Write a text value to a single cell.
    WriteCell {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        cell_address: String,
        value: String,
    },

    /// Read all values in a range (`A1:C5`, a single cell, or an open
    /// column/row span like `B:D`).
    ReadRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        range_address: String,
    },

    /// Write a block of rows anchored at a start cell. Rows may be ragged;
    /// row 0 of `values` lands on the anchor row.
    WriteRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        start_cell_address: String,
        values: Vec<Vec<String>>,
    },

    /// List all sheet names in workbook order.
    GetSheetNames {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
    },

    /// Clear cell contents in a range. Formatting is untouched.
    ClearRangeContent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        range_address: String,
    },

    /// Create a bar chart from a data range. Descriptor-only: executed by the
    /// remote front end, never server-side.
    CreateBarChart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        data_range: String,
        chart_title: String,
        destination_cell: String,
    },

    /// Write a formula into a cell. Descriptor-only.
    WriteFormula {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        cell_address: String,
        formula: String,
    },

    /// Apply conditional formatting to a range. Descriptor-only; the condition
    /// and format type are free-form descriptions mapped by the front end.
    ApplyConditionalFormatting {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        sheet_name: String,
        range_address: String,
        condition: String,
        format_type: String,
    },

    /// Create a pivot table from a source range. Descriptor-only.
    CreatePivotTable {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        workbook_name: Option<String>,
        source_sheet: String,
        source_range: String,
        dest_sheet: String,
        dest_cell: String,
        row_field: String,
        value_field: String,
        function: String,
    },

    /// Terminal fallback: tell the user something, no spreadsheet effect.
    InformUser { message: String },

    /// Terminal fallback: resolution or execution failed.
    Error { message: String },
}

impl Action {
    /// The wire tag for this action (`"read_cell"`, `"write_cell"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Action::ReadCell { .. } => "read_cell",
            Action::WriteCell { .. } => "write_cell",
            Action::ReadRange { .. } => "read_range",
            Action::WriteRange { .. } => "write_range",
            Action::GetSheetNames { .. } => "get_sheet_names",
            Action::ClearRangeContent { .. } => "clear_range_content",
            Action::CreateBarChart { .. } => "create_bar_chart",
            Action::WriteFormula { .. } => "write_formula",
            Action::ApplyConditionalFormatting { .. } => "apply_conditional_formatting",
            Action::CreatePivotTable { .. } => "create_pivot_table",
            Action::InformUser { .. } => "inform_user",
            Action::Error { .. } => "error",
        }
    }

    /// True for the terminal fallbacks (`inform_user`, `error`) that carry no
    /// spreadsheet effect. When a resolver response contains both a fallback
    /// and a concrete action, the concrete action wins.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Action::InformUser { .. } | Action::Error { .. })
    }

    /// True for operations the local adapter can execute. Chart, formula,
    /// conditional-formatting and pivot actions are descriptor-only.
    pub fn is_executable_locally(&self) -> bool {
        matches!(
            self,
            Action::ReadCell { .. }
                | Action::WriteCell { .. }
                | Action::ReadRange { .. }
                | Action::WriteRange { .. }
                | Action::GetSheetNames { .. }
                | Action::ClearRangeContent { .. }
        )
    }

    /// Target workbook name, if the action carries one.
    pub fn workbook_name(&self) -> Option<&str> {
        match self {
            Action::ReadCell { workbook_name, .. }
            | Action::WriteCell { workbook_name, .. }
            | Action::ReadRange { workbook_name, .. }
            | Action::WriteRange { workbook_name, .. }
            | Action::GetSheetNames { workbook_name }
            | Action::ClearRangeContent { workbook_name, .. }
            | Action::CreateBarChart { workbook_name, .. }
            | Action::WriteFormula { workbook_name, .. }
            | Action::ApplyConditionalFormatting { workbook_name, .. }
            | Action::CreatePivotTable { workbook_name, .. } => workbook_name.as_deref(),
            Action::InformUser { .. } | Action::Error { .. } => None,
        }
    }

    /// Build an `error` descriptor.
    pub fn error(message: impl Into<String>) -> Self {
        Action::Error {
            message: message.into(),
        }
    }

    /// Build an `inform_user` descriptor.
    pub fn inform_user(message: impl Into<String>) -> Self {
        Action::InformUser {
            message: message.into(),
        }
    }
}

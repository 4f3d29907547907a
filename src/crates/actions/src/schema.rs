//! Tool schemas offered to the intent resolver.
//!
//! Each supported action is described once: tool name, a natural-language
//! description carrying usage hints for the model, and a JSON Schema for its
//! parameters. The gateway's execution mode selects the subset that is
//! actually offered: local execution exposes only the operations the
//! adapter can run, delegated execution exposes the full vocabulary and adds
//! a required `workbook_name` parameter to every spreadsheet tool.

use serde_json::{json, Map, Value};

/// Which variant the schemas are being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    /// Direct execution against a configured local file; no workbook
    /// parameter, descriptor-only tools are not offered.
    Local,
    /// Descriptor generation for a remote front end; every spreadsheet tool
    /// takes the target `workbook_name`.
    Delegated,
}

/// Schema for one tool in the vocabulary.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name; identical to the action's wire tag.
    pub name: &'static str,
    /// Description shown to the model, including when to use the tool.
    pub description: &'static str,
    /// JSON Schema for the tool's parameters.
    pub parameters: Value,
    /// Whether the local adapter can execute this action.
    pub local: bool,
}

/// Build the vocabulary's tool schemas for the given mode.
///
/// `Local` returns the six executable operations plus `inform_user`;
/// `Delegated` returns the full set.
pub fn tool_specs(mode: SchemaMode) -> Vec<ToolSpec> {
    let specs = vec![
        ToolSpec {
            name: "read_cell",
            description: "Reads the value from a specified cell in a spreadsheet. \
                Use this tool when the user asks to get the value of a cell \
                (e.g., 'What is in cell A1 on Sheet1?').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("cell_address", "The address of the cell (e.g., 'A1', 'B5')."),
                ],
            ),
            local: true,
        },
        ToolSpec {
            name: "write_cell",
            description: "Writes a string value to a specified cell in a spreadsheet. \
                Use this tool when the user asks to write or put data into a cell \
                (e.g., 'Write \"Done\" to cell C1 on Sheet1.').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("cell_address", "The address of the cell (e.g., 'B2', 'C10')."),
                    ("value", "The exact text to write to the cell."),
                ],
            ),
            local: true,
        },
        ToolSpec {
            name: "read_range",
            description: "Reads all values from a range of cells. Use this tool when \
                the user asks for the data in a range (e.g., 'Read the data in range \
                A1:C5 on Sheet1.').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("range_address", "The address of the range (e.g., 'A1:C5', 'B:D')."),
                ],
            ),
            local: true,
        },
        ToolSpec {
            name: "write_range",
            description: "Writes rows of values to a range starting from a given cell. \
                The data MUST be provided as a JSON string representing a list of lists \
                (e.g., '[[\"Header1\", \"Header2\"], [\"Data1\", \"Data2\"]]'). Use this \
                tool when the user wants to write multiple values or a table \
                (e.g., 'Write [[\"Name\", \"Age\"], [\"Alice\", 30]] starting at A1 on Sheet2.').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("start_cell_address", "The top-left cell of the target range (e.g., 'A1')."),
                    (
                        "values_json",
                        "A JSON string encoding a list of lists of values, \
                         e.g. '[[\"Header1\", \"Header2\"], [\"Data1\", \"Data2\"]]'.",
                    ),
                ],
            ),
            local: true,
        },
        ToolSpec {
            name: "get_sheet_names",
            description: "Gets the names of all sheets in the workbook. Use this tool \
                when the user asks which sheets exist (e.g., 'What are the names of \
                the sheets?').",
            parameters: object_schema(mode, &[]),
            local: true,
        },
        ToolSpec {
            name: "clear_range_content",
            description: "Clears the contents of a range of cells. Use this tool when \
                the user asks to clear, empty, or delete content from a range or cell \
                (e.g., 'Clear the content of cells A1 to B5 on Sheet1.').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("range_address", "The address of the range (e.g., 'A1:B5', 'C:C', 'D5')."),
                ],
            ),
            local: true,
        },
        ToolSpec {
            name: "create_bar_chart",
            description: "Creates a bar chart from a data range. Use this tool when the \
                user asks for a bar chart (e.g., 'Create a bar chart for A1:B5 on \
                Sheet1 titled Sales at D1.'). Requires the sheet, the data range, a \
                chart title, and a destination cell for the chart's top-left corner.",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet holding the data. Case-sensitive."),
                    ("data_range", "The range the chart is built from (e.g., 'A1:B5')."),
                    ("chart_title", "The title shown above the chart."),
                    ("destination_cell", "Cell anchoring the chart's top-left corner (e.g., 'D1')."),
                ],
            ),
            local: false,
        },
        ToolSpec {
            name: "write_formula",
            description: "Writes a spreadsheet formula into a cell. Use this tool when \
                the user asks to write a formula (e.g., 'Write =SUM(A1:A10) into A11 \
                on Sheet1.').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("cell_address", "The cell receiving the formula (e.g., 'A11')."),
                    ("formula", "The formula string, including the leading '=' (e.g., '=SUM(A1:A10)')."),
                ],
            ),
            local: false,
        },
        ToolSpec {
            name: "apply_conditional_formatting",
            description: "Applies conditional formatting to a range based on a condition \
                and a format type. Use this tool when the user asks to format cells by \
                rule (e.g., 'Highlight values greater than 100 in red in A1:A10.').",
            parameters: object_schema(
                mode,
                &[
                    ("sheet_name", "The name of the sheet (e.g., 'Sheet1'). Case-sensitive."),
                    ("range_address", "The range the rule applies to (e.g., 'A1:A10')."),
                    ("condition", "The condition description (e.g., 'value > 100')."),
                    ("format_type", "The format description (e.g., 'red_fill')."),
                ],
            ),
            local: false,
        },
        ToolSpec {
            name: "create_pivot_table",
            description: "Creates a pivot table from a source range on a destination \
                sheet. Use this tool when the user asks for a pivot table (e.g., \
                'Create a pivot table from A1:C100 on Sheet1 to Sheet2 at A1, grouping \
                by Category and summing Sales.').",
            parameters: object_schema(
                mode,
                &[
                    ("source_sheet", "Sheet holding the source data. Case-sensitive."),
                    ("source_range", "Source data range (e.g., 'A1:C100')."),
                    ("dest_sheet", "Sheet receiving the pivot table."),
                    ("dest_cell", "Top-left cell of the pivot table (e.g., 'A1')."),
                    ("row_field", "Column name to group rows by."),
                    ("value_field", "Column name to aggregate."),
                    ("function", "Aggregation function (e.g., 'Sum', 'Count')."),
                ],
            ),
            local: false,
        },
        ToolSpec {
            name: "inform_user",
            description: "Replies to the user with a plain message. Use this tool when \
                the request doesn't map to a spreadsheet operation, is unclear, or \
                only needs a textual answer.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The message shown to the user."
                    }
                },
                "required": ["message"]
            }),
            local: true,
        },
    ];

    match mode {
        SchemaMode::Local => specs.into_iter().filter(|s| s.local).collect(),
        SchemaMode::Delegated => specs,
    }
}

/// True if `name` is a tool in the vocabulary (in any mode).
pub fn is_known_tool(name: &str) -> bool {
    tool_specs(SchemaMode::Delegated).iter().any(|s| s.name == name)
}

/// Build an object schema with all-required string properties, prepending the
/// `workbook_name` parameter in delegated mode. `inform_user` keeps its own
/// schema and never takes a workbook.
fn object_schema(mode: SchemaMode, props: &[(&str, &str)]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    if mode == SchemaMode::Delegated {
        properties.insert(
            "workbook_name".to_string(),
            json!({
                "type": "string",
                "description": "The name of the target workbook."
            }),
        );
        required.push(Value::String("workbook_name".to_string()));
    }

    for (name, description) in props {
        properties.insert(
            (*name).to_string(),
            json!({"type": "string", "description": description}),
        );
        required.push(Value::String((*name).to_string()));
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_mode_excludes_descriptor_only_tools() {
        let specs = tool_specs(SchemaMode::Local);
        let names: Vec<_> = specs.iter().map(|s| s.name).collect();

        assert!(names.contains(&"read_cell"));
        assert!(names.contains(&"inform_user"));
        assert!(!names.contains(&"create_bar_chart"));
        assert!(!names.contains(&"create_pivot_table"));
    }

    #[test]
    fn test_delegated_mode_offers_full_vocabulary() {
        let names: Vec<_> = tool_specs(SchemaMode::Delegated)
            .iter()
            .map(|s| s.name)
            .collect();

        for expected in [
            "read_cell",
            "write_cell",
            "read_range",
            "write_range",
            "get_sheet_names",
            "clear_range_content",
            "create_bar_chart",
            "write_formula",
            "apply_conditional_formatting",
            "create_pivot_table",
            "inform_user",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_delegated_schemas_require_workbook_name() {
        for spec in tool_specs(SchemaMode::Delegated) {
            if spec.name == "inform_user" {
                continue;
            }
            let required = spec.parameters["required"].as_array().unwrap();
            assert!(
                required.iter().any(|v| v == "workbook_name"),
                "{} must require workbook_name",
                spec.name
            );
        }
    }

    #[test]
    fn test_local_schemas_omit_workbook_name() {
        for spec in tool_specs(SchemaMode::Local) {
            assert!(
                spec.parameters["properties"].get("workbook_name").is_none(),
                "{} must not take workbook_name locally",
                spec.name
            );
        }
    }

    #[test]
    fn test_known_tool_lookup() {
        assert!(is_known_tool("write_range"));
        assert!(is_known_tool("inform_user"));
        assert!(!is_known_tool("error"));
        assert!(!is_known_tool("delete_sheet"));
    }
}

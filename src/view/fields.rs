//! Schema-driven helpers for the browse table and the record form.

use crate::error::ApiError;
use crate::model::{FieldDescriptor, FieldKind, Table};
use serde_json::Value;

/// Number of schema fields shown as columns in the record table.
pub const VISIBLE_FIELD_COUNT: usize = 5;
/// Cell text is cut to this many characters.
pub const CELL_TEXT_LIMIT: usize = 50;
const RECORD_ID_PREFIX: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// All tables when no solution is selected, otherwise the tables of that solution.
pub fn tables_for_solution<'a>(tables: &'a [Table], solution_id: Option<&str>) -> Vec<&'a Table> {
    tables
        .iter()
        .filter(|t| solution_id.map_or(true, |s| t.solution == s))
        .collect()
}

/// First few non-system fields, in schema order.
pub fn visible_fields(structure: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    structure
        .iter()
        .filter(|f| !f.is_system())
        .take(VISIBLE_FIELD_COUNT)
        .collect()
}

/// Form fields. Editing offers every editable field; creating offers required fields and
/// kinds that are safe to fill from text.
pub fn editable_fields(structure: &[FieldDescriptor], mode: FormMode) -> Vec<&FieldDescriptor> {
    structure
        .iter()
        .filter(|f| f.is_editable())
        .filter(|f| match mode {
            FormMode::Edit => true,
            FormMode::Create => f.is_required() || f.field_type.is_safe_for_create(),
        })
        .collect()
}

pub fn placeholder(field: &FieldDescriptor) -> String {
    match field.placeholder() {
        Some(p) => p.to_string(),
        None => format!("Enter {}", field.label.to_lowercase()),
    }
}

/// Table cell text: `-` for missing values, compact JSON for lists and objects.
pub fn cell_text(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    text.chars().take(CELL_TEXT_LIMIT).collect()
}

pub fn record_id_label(id: &str) -> String {
    let prefix: String = id.chars().take(RECORD_ID_PREFIX).collect();
    format!("{}...", prefix)
}

/// Text shown in a form input for a stored value.
pub fn input_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Convert typed text into a payload value for the field kind. Numbers become JSON numbers,
/// list-capable kinds accept a JSON array; anything unparseable is sent as the raw string.
pub fn input_value(kind: &FieldKind, text: &str) -> Value {
    let trimmed = text.trim();
    if kind.is_numeric() {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Value::from(n);
        }
        if let Some(n) = trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(n);
        }
    }
    if kind.accepts_list() && trimmed.starts_with('[') {
        if let Ok(v @ Value::Array(_)) = serde_json::from_str::<Value>(trimmed) {
            return v;
        }
    }
    Value::String(text.to_string())
}

/// Message shown in the form: the error message plus a field-by-field breakdown when the
/// upstream body carried per-field entries.
pub fn form_error_message(err: &ApiError) -> String {
    let field_errors = err.field_errors();
    if field_errors.is_empty() {
        err.message.clone()
    } else {
        format!("{}\n\nField errors:\n{}", err.message, field_errors.join("\n"))
    }
}

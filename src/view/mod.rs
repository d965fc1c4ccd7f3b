//! Browse-and-edit logic behind the SmartSuite page: solution/table selection, schema-driven
//! columns and form fields, and the record editor.

pub mod editor;
pub mod fields;

pub use editor::{delete_record, EditorTarget, RecordEditor};
pub use fields::*;

use crate::hooks::{records_key, RecordsKey};
use crate::model::{FieldDescriptor, Table};

/// Current solution/table selection. Picking a solution clears the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub solution_id: Option<String>,
    pub table_id: Option<String>,
}

impl Selection {
    pub fn select_solution(&mut self, solution_id: impl Into<String>) {
        self.solution_id = Some(solution_id.into());
        self.table_id = None;
    }

    pub fn select_table(&mut self, table_id: impl Into<String>) {
        self.table_id = Some(table_id.into());
    }

    /// Key for the records query; `None` while no table is selected.
    pub fn records_key(&self) -> Option<RecordsKey> {
        records_key(self.table_id.as_deref(), None)
    }

    /// Schema of the selected table, empty when nothing (or an unknown table) is selected.
    pub fn structure<'a>(&self, tables: &'a [Table]) -> &'a [FieldDescriptor] {
        self.table_id
            .as_deref()
            .and_then(|id| tables.iter().find(|t| t.id == id))
            .map(|t| t.structure.as_slice())
            .unwrap_or(&[])
    }
}

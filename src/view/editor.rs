//! Record form controller: create/edit through the write actions, then refresh the list.

use crate::error::ApiError;
use crate::hooks::{Query, RecordActions, Records};
use crate::model::{FieldDescriptor, Record, RecordFields};
use crate::view::fields::{editable_fields, form_error_message, input_text, input_value, FormMode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Existing { record_id: String },
}

/// Form state for one open create/edit dialog. On a failed submit the dialog stays open and
/// carries the composed error message.
#[derive(Clone, Debug)]
pub struct RecordEditor {
    table_id: String,
    target: EditorTarget,
    form: RecordFields,
    error: Option<String>,
    open: bool,
}

impl RecordEditor {
    pub fn create(table_id: impl Into<String>) -> Self {
        RecordEditor {
            table_id: table_id.into(),
            target: EditorTarget::New,
            form: RecordFields::new(),
            error: None,
            open: true,
        }
    }

    /// Edit form prefilled with the record's current values.
    pub fn edit(table_id: impl Into<String>, record: &Record) -> Self {
        RecordEditor {
            table_id: table_id.into(),
            target: EditorTarget::Existing {
                record_id: record.id.clone(),
            },
            form: record.fields.clone(),
            error: None,
            open: true,
        }
    }

    pub fn mode(&self) -> FormMode {
        match self.target {
            EditorTarget::New => FormMode::Create,
            EditorTarget::Existing { .. } => FormMode::Edit,
        }
    }

    pub fn target(&self) -> &EditorTarget {
        &self.target
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &RecordFields {
        &self.form
    }

    pub fn fields<'a>(&self, structure: &'a [FieldDescriptor]) -> Vec<&'a FieldDescriptor> {
        editable_fields(structure, self.mode())
    }

    /// Current input text for a field.
    pub fn text(&self, field: &FieldDescriptor) -> String {
        input_text(self.form.get(&field.slug))
    }

    pub fn set_input(&mut self, field: &FieldDescriptor, text: &str) {
        self.form
            .insert(field.slug.clone(), input_value(&field.field_type, text));
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.form.clear();
        self.error = None;
    }

    /// Submit the form. Success closes the editor and refetches `records`; failure keeps it
    /// open with the error message and returns the error.
    pub async fn submit(&mut self, actions: &RecordActions, records: &Query<Records>) -> Result<Record, ApiError> {
        self.error = None;
        let result = match &self.target {
            EditorTarget::New => actions.create_record(&self.table_id, &self.form).await,
            EditorTarget::Existing { record_id } => {
                actions
                    .update_record(&self.table_id, record_id, &self.form)
                    .await
            }
        };
        match result {
            Ok(record) => {
                self.cancel();
                records.refetch().await;
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(table_id = %self.table_id, status = err.status, "record save failed");
                self.error = Some(form_error_message(&err));
                Err(err)
            }
        }
    }
}

/// Delete a record and refresh the list on success.
pub async fn delete_record(
    actions: &RecordActions,
    records: &Query<Records>,
    table_id: &str,
    record_id: &str,
) -> Result<(), ApiError> {
    actions.delete_record(table_id, record_id).await?;
    records.refetch().await;
    Ok(())
}

//! Declarative field model driving the wizard.
//!
//! The schema is built once, validated eagerly, and never mutated: field
//! order defines step order, and every other wizard component only reads it.

use thiserror::Error;

/// Supported data kinds for wizard fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Time,
    File,
    CheckboxGroup,
}

impl FieldKind {
    fn takes_options(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::CheckboxGroup)
    }
}

/// Declarative description of a single wizard step.
///
/// `id` may be a dot-separated path (e.g. `keys.total`) addressing a nested
/// slot of the eventual record; `prompt_key` resolves through the injected
/// translator.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub prompt_key: &'static str,
    pub kind: FieldKind,
    pub options: Vec<String>,
    pub required: bool,
    pub multiple: bool,
    pub accept: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(id: &'static str, prompt_key: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            prompt_key,
            kind,
            options: Vec::new(),
            required: true,
            multiple: false,
            accept: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn with_accept(mut self, pattern: &'static str) -> Self {
        self.accept = Some(pattern);
        self
    }
}

/// Malformed schema declarations are a configuration defect and abort
/// construction; nothing recovers from them at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("form schema must declare at least one field")]
    Empty,
    #[error("field `{0}` is declared twice")]
    DuplicateField(String),
    #[error("field `{0}` requires options for its kind")]
    MissingOptions(String),
    #[error("field `{0}` does not take options")]
    UnexpectedOptions(String),
    #[error("field `{0}` carries file settings but is not a file field")]
    NotAFileField(String),
}

/// Immutable, ordered field list. Step index is always within
/// `[0, schema.len())`.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            if !seen.insert(field.id) {
                return Err(SchemaError::DuplicateField(field.id.to_string()));
            }
            if field.kind.takes_options() && field.options.is_empty() {
                return Err(SchemaError::MissingOptions(field.id.to_string()));
            }
            if !field.kind.takes_options() && !field.options.is_empty() {
                return Err(SchemaError::UnexpectedOptions(field.id.to_string()));
            }
            if field.kind != FieldKind::File && (field.multiple || field.accept.is_some()) {
                return Err(SchemaError::NotAFileField(field.id.to_string()));
            }
        }
        Ok(Self { fields })
    }

    pub fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// The property entry form: nineteen sequential questions, ending in the key
/// inventory group and the cleaning equipment checklist.
pub fn property_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldDescriptor::new("name", "properties.form.name", FieldKind::Text),
        FieldDescriptor::new("type", "properties.form.type", FieldKind::Select)
            .with_options(["Apartment", "House", "Loft", "Studio", "Villa"]),
        FieldDescriptor::new(
            "buildingNumber",
            "properties.form.buildingNumber",
            FieldKind::Text,
        )
        .with_optional(),
        FieldDescriptor::new("address", "properties.form.address", FieldKind::Text),
        FieldDescriptor::new("surface", "properties.form.surface", FieldKind::Number),
        FieldDescriptor::new("floor", "properties.form.floor", FieldKind::Number),
        FieldDescriptor::new("door", "properties.form.door", FieldKind::Text),
        FieldDescriptor::new("doorSlams", "properties.form.doorSlams", FieldKind::Select)
            .with_options(["Yes", "No"]),
        FieldDescriptor::new(
            "emergencyResponseTime",
            "properties.form.emergencyResponseTime",
            FieldKind::Time,
        ),
        FieldDescriptor::new("deposit", "properties.form.deposit", FieldKind::Number),
        FieldDescriptor::new("elevator", "properties.form.elevator", FieldKind::Select)
            .with_options(["Yes", "No"]),
        FieldDescriptor::new("furnished", "properties.form.furnished", FieldKind::Select)
            .with_options(["Yes", "No"]),
        FieldDescriptor::new("wifiName", "properties.form.wifiName", FieldKind::Text),
        FieldDescriptor::new(
            "wifiPassword",
            "properties.form.wifiPassword",
            FieldKind::Text,
        ),
        FieldDescriptor::new("keys.total", "properties.form.keys.total", FieldKind::Number),
        FieldDescriptor::new(
            "keys.available",
            "properties.form.keys.available",
            FieldKind::Number,
        ),
        FieldDescriptor::new(
            "keys.lockSystem",
            "properties.form.keys.lockSystem",
            FieldKind::Text,
        ),
        FieldDescriptor::new(
            "keys.keyImages",
            "properties.form.keys.keyImages",
            FieldKind::File,
        )
        .with_multiple()
        .with_accept("image/*"),
        FieldDescriptor::new("cleaning", "properties.form.cleaning", FieldKind::CheckboxGroup)
            .with_options(["mop", "broom", "dustpan", "vacuumCleaner"]),
    ])
    .expect("property schema is statically well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_schema_has_nineteen_ordered_fields() {
        let schema = property_schema();
        assert_eq!(schema.len(), 19);
        assert_eq!(schema.field_at(0).map(|f| f.id), Some("name"));
        assert_eq!(schema.field_at(18).map(|f| f.id), Some("cleaning"));
        assert!(schema.field_at(19).is_none());
    }

    #[test]
    fn select_without_options_is_rejected() {
        let err = FormSchema::new(vec![FieldDescriptor::new(
            "type",
            "properties.form.type",
            FieldKind::Select,
        )])
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingOptions("type".into()));
    }

    #[test]
    fn options_on_plain_text_field_are_rejected() {
        let err = FormSchema::new(vec![FieldDescriptor::new(
            "name",
            "properties.form.name",
            FieldKind::Text,
        )
        .with_options(["a"])])
        .unwrap_err();
        assert_eq!(err, SchemaError::UnexpectedOptions("name".into()));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = FormSchema::new(vec![
            FieldDescriptor::new("door", "properties.form.door", FieldKind::Text),
            FieldDescriptor::new("door", "properties.form.door", FieldKind::Text),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("door".into()));
    }

    #[test]
    fn file_settings_on_non_file_field_are_rejected() {
        let err = FormSchema::new(vec![FieldDescriptor::new(
            "name",
            "properties.form.name",
            FieldKind::Text,
        )
        .with_multiple()])
        .unwrap_err();
        assert_eq!(err, SchemaError::NotAFileField("name".into()));
    }

    #[test]
    fn empty_schema_is_rejected() {
        assert_eq!(FormSchema::new(Vec::new()).unwrap_err(), SchemaError::Empty);
    }
}

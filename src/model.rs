//! Schema models: named field sets with aliases and declared types.
//!
//! A document may declare its models under the reserved top-level `$models`
//! key and select one with `use_model`:
//!
//! ```text
//! $models:
//!   Person:
//!     fields:
//!       name:
//!         alias = n
//!       age:
//!         alias = a
//!         type = int
//!         id = 2
//! use_model = Person
//! person:
//!   n = "Ann"
//!   a = 41
//! ```
//!
//! Extraction is best-effort. Every entry with the wrong shape is skipped and
//! recorded in the caller's [`Diagnostics`]; it never fails.

use crate::diagnostics::{child_path, DiagnosticKind, Diagnostics};
use crate::literal::FieldType;
use crate::{Map, Value};
use indexmap::IndexMap;

/// Reserved top-level key holding model declarations.
pub const MODELS_KEY: &str = "$models";

/// Reserved top-level key selecting the model to apply.
pub const USE_MODEL_KEY: &str = "use_model";

/// One declared field of a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefinition {
    full_name: String,
    alias: String,
    field_type: FieldType,
    field_id: Option<i64>,
}

impl FieldDefinition {
    /// Creates a string-typed field whose alias is its full name.
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        FieldDefinition {
            alias: full_name.clone(),
            full_name,
            field_type: FieldType::String,
            field_id: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.field_id = Some(id);
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Optional numeric identifier; carried but not interpreted.
    pub fn field_id(&self) -> Option<i64> {
        self.field_id
    }
}

/// A named set of field definitions with an alias index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelDefinition {
    name: String,
    fields: IndexMap<String, FieldDefinition>,
    alias_index: IndexMap<String, String>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ModelDefinition {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a field, replacing any field with the same full name.
    ///
    /// When two fields share an alias, the one added last owns it.
    pub fn add_field(&mut self, field: FieldDefinition) {
        if let Some(previous) = self.fields.get(&field.full_name) {
            if self.alias_index.get(&previous.alias) == Some(&previous.full_name) {
                self.alias_index.shift_remove(&previous.alias);
            }
        }
        self.alias_index
            .insert(field.alias.clone(), field.full_name.clone());
        self.fields.insert(field.full_name.clone(), field);
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.add_field(field);
        self
    }

    /// Looks up a field by its full name.
    pub fn field(&self, full_name: &str) -> Option<&FieldDefinition> {
        self.fields.get(full_name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    /// Maps an alias to its full name; unknown keys resolve to themselves.
    pub fn resolve<'k>(&'k self, key: &'k str) -> &'k str {
        self.alias_index.get(key).map_or(key, String::as_str)
    }

    /// Applies this model to a tree. See [`crate::apply_model`].
    #[must_use]
    pub fn apply(&self, map: &Map) -> Map {
        crate::apply::apply_model(map, self)
    }
}

/// Models by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelDefinition>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model, replacing one with the same name.
    pub fn register(&mut self, model: ModelDefinition) {
        self.models.insert(model.name.clone(), model);
    }

    pub fn get(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Builds a registry from a document's `$models` block.
    ///
    /// Returns `None` unless the document has a top-level `$models` mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::{parse, FieldType, ModelRegistry};
    ///
    /// let doc = parse("$models:\n  P:\n    fields:\n      age:\n        alias = a\n        type = int\n").unwrap();
    /// let registry = ModelRegistry::extract(&doc).unwrap();
    /// let age = registry.get("P").unwrap().field("age").unwrap();
    ///
    /// assert_eq!(age.alias(), "a");
    /// assert_eq!(age.field_type(), FieldType::Int);
    /// ```
    pub fn extract(doc: &Map) -> Option<ModelRegistry> {
        Self::extract_with_diagnostics(doc, &mut Diagnostics::new())
    }

    /// Like [`extract`](Self::extract), recording every skipped entry.
    pub fn extract_with_diagnostics(
        doc: &Map,
        diagnostics: &mut Diagnostics,
    ) -> Option<ModelRegistry> {
        let block = match doc.get(MODELS_KEY)? {
            Value::Mapping(block) => block,
            other => {
                diagnostics.at_path(
                    DiagnosticKind::SkippedModel,
                    MODELS_KEY,
                    format!("expected a mapping, found {}", other.type_name()),
                );
                return None;
            }
        };

        let mut registry = ModelRegistry::new();
        for (name, entry) in block {
            let path = child_path(MODELS_KEY, name);
            if let Some(model) = extract_model(name, entry, &path, diagnostics) {
                log::trace!("registered model '{}'", name);
                registry.register(model);
            }
        }
        Some(registry)
    }
}

fn extract_model(
    name: &str,
    entry: &Value,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Option<ModelDefinition> {
    let Some(body) = entry.as_mapping() else {
        diagnostics.at_path(
            DiagnosticKind::SkippedModel,
            path,
            format!("expected a mapping, found {}", entry.type_name()),
        );
        return None;
    };
    let fields = match body.get("fields") {
        Some(Value::Mapping(fields)) => fields,
        Some(other) => {
            diagnostics.at_path(
                DiagnosticKind::SkippedModel,
                path,
                format!("'fields' must be a mapping, found {}", other.type_name()),
            );
            return None;
        }
        None => {
            diagnostics.at_path(DiagnosticKind::SkippedModel, path, "missing 'fields'");
            return None;
        }
    };

    let mut model = ModelDefinition::new(name);
    let fields_path = child_path(path, "fields");
    for (full_name, entry) in fields {
        let field_path = child_path(&fields_path, full_name);
        let Some(attrs) = entry.as_mapping() else {
            diagnostics.at_path(
                DiagnosticKind::SkippedField,
                &field_path,
                format!("expected a mapping, found {}", entry.type_name()),
            );
            continue;
        };
        model.add_field(extract_field(full_name, attrs, &field_path, diagnostics));
    }
    Some(model)
}

fn extract_field(
    full_name: &str,
    attrs: &Map,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> FieldDefinition {
    let mut field = FieldDefinition::new(full_name);

    match attrs.get("alias") {
        Some(Value::String(alias)) => field.alias = alias.clone(),
        Some(other) => diagnostics.at_path(
            DiagnosticKind::InvalidAttribute,
            &child_path(path, "alias"),
            format!("expected a string, found {}", other.type_name()),
        ),
        None => {}
    }

    match attrs.get("type") {
        Some(Value::String(name)) => match name.parse::<FieldType>() {
            Ok(field_type) => field.field_type = field_type,
            Err(msg) => diagnostics.at_path(
                DiagnosticKind::InvalidAttribute,
                &child_path(path, "type"),
                format!("{}; using string", msg),
            ),
        },
        Some(other) => diagnostics.at_path(
            DiagnosticKind::InvalidAttribute,
            &child_path(path, "type"),
            format!("expected a string, found {}", other.type_name()),
        ),
        None => {}
    }

    match attrs.get("id") {
        Some(Value::Integer(id)) => field.field_id = Some(*id),
        Some(other) => diagnostics.at_path(
            DiagnosticKind::InvalidAttribute,
            &child_path(path, "id"),
            format!("expected an integer, found {}", other.type_name()),
        ),
        None => {}
    }

    field
}

//! Model application: alias resolution and typed coercion.
//!
//! Applying a model never mutates its input and never fails. Keys are
//! rewritten through the model's alias index, nested mappings are visited
//! recursively, and scalars with a declared field are re-parsed as that
//! field's type. A scalar that does not fit its type keeps its original value
//! and a [`DiagnosticKind::CoercionFallback`] is recorded.

use crate::diagnostics::{child_path, DiagnosticKind, Diagnostics};
use crate::literal::parse_typed;
use crate::model::{ModelDefinition, ModelRegistry, MODELS_KEY, USE_MODEL_KEY};
use crate::{Error, Map, Result, Value};

/// Returns a copy of `map` with `model` applied at every depth.
///
/// # Examples
///
/// ```rust
/// use flowdoc::{apply_model, parse, FieldDefinition, FieldType, ModelDefinition, Value};
///
/// let model = ModelDefinition::new("Person")
///     .with_field(FieldDefinition::new("age").with_alias("a").with_type(FieldType::Int));
/// let doc = parse("a = \"41\"\n").unwrap();
///
/// let applied = apply_model(&doc, &model);
/// assert_eq!(applied.get("age"), Some(&Value::Integer(41)));
/// ```
#[must_use]
pub fn apply_model(map: &Map, model: &ModelDefinition) -> Map {
    apply_model_with_diagnostics(map, model, &mut Diagnostics::new())
}

/// Like [`apply_model`], recording every coercion fallback.
#[must_use]
pub fn apply_model_with_diagnostics(
    map: &Map,
    model: &ModelDefinition,
    diagnostics: &mut Diagnostics,
) -> Map {
    apply_at(map, model, "", diagnostics)
}

fn apply_at(map: &Map, model: &ModelDefinition, path: &str, diagnostics: &mut Diagnostics) -> Map {
    map.iter()
        .map(|(key, value)| {
            let name = model.resolve(key);
            let value_path = child_path(path, name);
            let value = apply_value(name, value, model, &value_path, diagnostics);
            (name.to_string(), value)
        })
        .collect()
}

fn apply_value(
    name: &str,
    value: &Value,
    model: &ModelDefinition,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Value {
    match value {
        Value::Mapping(nested) => Value::Mapping(apply_at(nested, model, path, diagnostics)),
        Value::List(items) => Value::List(apply_list(items, model, path, diagnostics)),
        scalar => match model.field(name) {
            Some(field) => match parse_typed(&raw_text(scalar), field.field_type()) {
                Ok(coerced) => coerced,
                Err(err) => {
                    diagnostics.at_path(DiagnosticKind::CoercionFallback, path, err.to_string());
                    scalar.clone()
                }
            },
            None => scalar.clone(),
        },
    }
}

/// Text a scalar is re-parsed from: strings verbatim, others as literals.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Transforms the mappings inside a list; other elements pass through.
fn apply_list(
    items: &[Value],
    model: &ModelDefinition,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<Value> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Mapping(nested) => {
                let item_path = format!("{}[{}]", path, index);
                Value::Mapping(apply_at(nested, model, &item_path, diagnostics))
            }
            other => other.clone(),
        })
        .collect()
}

/// Resolves the `use_model` directive of a freshly parsed document.
///
/// Top-level keys and top-level scalars are left as they are; the model is
/// applied to each top-level mapping and to the mappings inside each
/// top-level list.
pub(crate) fn resolve_document(
    mut doc: Map,
    registry: Option<&ModelRegistry>,
    diagnostics: &mut Diagnostics,
) -> Result<Map> {
    let directive = doc.remove(USE_MODEL_KEY);

    let Some(directive) = directive else {
        doc.remove(MODELS_KEY);
        log::debug!("no {} directive, returning raw tree", USE_MODEL_KEY);
        return Ok(doc);
    };
    let model_name = match directive {
        Value::String(name) => name,
        other => {
            return Err(Error::InvalidDirective(format!(
                "{} must be a string, found {}",
                USE_MODEL_KEY,
                other.type_name()
            )))
        }
    };

    let extracted;
    let registry = match registry {
        Some(registry) => Some(registry),
        None => {
            extracted = ModelRegistry::extract_with_diagnostics(&doc, diagnostics);
            extracted.as_ref()
        }
    };
    let model = registry
        .and_then(|registry| registry.get(&model_name))
        .ok_or_else(|| Error::model_not_found(&model_name))?;
    log::debug!("applying model '{}'", model_name);

    doc.remove(MODELS_KEY);
    Ok(doc
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Mapping(section) => {
                    Value::Mapping(apply_at(&section, model, &key, diagnostics))
                }
                Value::List(items) => Value::List(apply_list(&items, model, &key, diagnostics)),
                scalar => scalar,
            };
            (key, value)
        })
        .collect())
}

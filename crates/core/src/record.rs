//! Structured record model consumed by the renderer.
//!
//! Every scraped entity declares a static field-descriptor table
//! ([`RecordSchema`]) and produces its values as a tagged variant list
//! ([`FieldValue`]). The renderer walks the two in lockstep, so no runtime
//! reflection is involved: declared field order is rendering order.

use serde_json::{Map, Value};

/// Type-level outline of a record: name, optional doc line, ordered fields.
pub struct RecordSchema {
    pub name: &'static str,
    pub doc: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

/// One declared field. The description is only shown in verbose renderings.
pub struct FieldSpec {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub ty: TypeSpec,
}

/// Declared type of a field, used for schema outlines.
///
/// Nested record types are reached through a function pointer so schema
/// tables can be plain statics without cyclic initializers.
pub enum TypeSpec {
    Text,
    Int,
    Bool,
    Optional(&'static TypeSpec),
    List(&'static TypeSpec),
    Map(&'static TypeSpec, &'static TypeSpec),
    Union(&'static [TypeSpec]),
    Record(fn() -> &'static RecordSchema),
}

impl TypeSpec {
    /// First record schema reachable through this type, if any.
    /// Optionality and collections are looked through structurally.
    pub fn record_schema(&self) -> Option<&'static RecordSchema> {
        match self {
            TypeSpec::Record(schema) => Some(schema()),
            TypeSpec::Optional(inner) | TypeSpec::List(inner) => inner.record_schema(),
            TypeSpec::Map(_, value) => value.record_schema(),
            TypeSpec::Union(alternatives) => {
                alternatives.iter().find_map(|alt| alt.record_schema())
            }
            _ => None,
        }
    }
}

/// A field's value at render time.
///
/// `Text("")`, `Int(None)`, `Bool(None)`, an empty list and an empty map are
/// the empty sentinels: they are skipped by every projection, never rendered
/// as blank entries.
pub enum FieldValue {
    Text(String),
    Int(Option<i64>),
    Bool(Option<bool>),
    Record(Box<dyn Record>),
    List(Vec<FieldValue>),
    Map(Map<String, Value>),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    pub fn opt_text(value: &Option<String>) -> Self {
        FieldValue::Text(value.clone().unwrap_or_default())
    }

    pub fn int(value: i64) -> Self {
        FieldValue::Int(Some(value))
    }

    pub fn opt_int(value: Option<i64>) -> Self {
        FieldValue::Int(value)
    }

    pub fn flag(value: bool) -> Self {
        FieldValue::Bool(Some(value))
    }

    pub fn record<R: Record + 'static>(value: R) -> Self {
        FieldValue::Record(Box::new(value))
    }

    pub fn text_list(items: &[String]) -> Self {
        FieldValue::List(items.iter().map(|item| FieldValue::text(item)).collect())
    }

    pub fn record_list<R: Record + Clone + 'static>(items: &[R]) -> Self {
        FieldValue::List(
            items
                .iter()
                .cloned()
                .map(|item| FieldValue::Record(Box::new(item) as Box<dyn Record>))
                .collect(),
        )
    }

    pub fn opt_map(value: &Option<Map<String, Value>>) -> Self {
        FieldValue::Map(value.clone().unwrap_or_default())
    }

    /// Whether this value equals its type's empty sentinel.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Int(v) => v.is_none(),
            FieldValue::Bool(v) => v.is_none(),
            FieldValue::Record(_) => false,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
        }
    }
}

/// A renderable record. `values()` must be parallel to `schema().fields`:
/// same length, same declared order.
pub trait Record: Send + Sync {
    fn schema(&self) -> &'static RecordSchema;
    fn values(&self) -> Vec<FieldValue>;
}

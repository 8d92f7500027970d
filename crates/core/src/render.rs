//! The three projections of a structured record: markdown text, dictionary,
//! and type-level schema outline.
//!
//! All three walk the declared field order and skip empty sentinels, so the
//! output is deterministic for a given record instance.

use serde_json::{Map, Value};

use crate::record::{FieldValue, Record, RecordSchema, TypeSpec};

const INDENT: &str = "  ";

/// Render a record as indented markdown, one field per line, nested records
/// and collections on following lines one indent level deeper.
pub fn to_markdown(record: &dyn Record, indent: usize, verbose: bool) -> String {
    markdown_lines(record, indent, verbose).join("\n")
}

fn field_label(name: &str, description: Option<&str>, verbose: bool) -> String {
    match description {
        Some(description) if verbose => format!("**{name}** _({description})_"),
        _ => format!("**{name}**"),
    }
}

fn markdown_lines(record: &dyn Record, indent: usize, verbose: bool) -> Vec<String> {
    let schema = record.schema();
    let values = record.values();
    debug_assert_eq!(schema.fields.len(), values.len(), "{}", schema.name);

    let prefix = INDENT.repeat(indent);
    let mut lines = Vec::new();

    if verbose {
        if let Some(doc) = schema.doc {
            lines.push(format!("{prefix}{doc}"));
        }
    }

    for (spec, value) in schema.fields.iter().zip(values) {
        if value.is_empty() {
            continue;
        }
        let label = field_label(spec.name, spec.description, verbose);

        match value {
            FieldValue::Record(nested) => {
                lines.push(format!("{prefix}{label}:"));
                lines.extend(markdown_lines(nested.as_ref(), indent + 1, verbose));
            }
            FieldValue::List(items) => {
                lines.push(format!("{prefix}{label}:"));
                let item_prefix = INDENT.repeat(indent + 1);
                for item in &items {
                    match item {
                        FieldValue::Record(nested) => {
                            // Bullet only the first produced line; continuation
                            // lines re-align under the bullet.
                            let nested_lines =
                                markdown_lines(nested.as_ref(), indent + 2, verbose);
                            let mut nested_lines = nested_lines.iter();
                            if let Some(first) = nested_lines.next() {
                                lines.push(format!("{item_prefix}- {}", first.trim_start()));
                                for rest in nested_lines {
                                    lines.push(format!("{item_prefix}  {}", rest.trim_start()));
                                }
                            }
                        }
                        other => lines.push(format!("{item_prefix}- {}", scalar_display(other))),
                    }
                }
            }
            FieldValue::Map(entries) => {
                lines.push(format!("{prefix}{label}:"));
                let entry_prefix = INDENT.repeat(indent + 1);
                for (key, value) in &entries {
                    lines.push(format!("{entry_prefix}- {key}: {}", json_display(value)));
                }
            }
            scalar => lines.push(format!("{prefix}{label}: {}", scalar_display(&scalar))),
        }
    }

    lines
}

fn scalar_display(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Int(Some(n)) => n.to_string(),
        FieldValue::Bool(Some(b)) => b.to_string(),
        FieldValue::Int(None) | FieldValue::Bool(None) => String::new(),
        FieldValue::Map(entries) => Value::Object(entries.clone()).to_string(),
        FieldValue::List(_) | FieldValue::Record(_) => String::new(),
    }
}

fn json_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Project a record into a dictionary. Nested records become nested objects,
/// sequences map element-wise, mappings pass through. When verbose, described
/// fields are wrapped as `{"value": …, "description": …}` and the type doc is
/// added under a synthetic `__doc__` key.
pub fn to_projection(record: &dyn Record, verbose: bool) -> Value {
    let schema = record.schema();
    let values = record.values();
    debug_assert_eq!(schema.fields.len(), values.len(), "{}", schema.name);

    let mut out = Map::new();
    if verbose {
        if let Some(doc) = schema.doc {
            out.insert("__doc__".to_string(), Value::String(doc.to_string()));
        }
    }

    for (spec, value) in schema.fields.iter().zip(values) {
        if value.is_empty() {
            continue;
        }
        let projected = project_value(value, verbose);
        let entry = match spec.description {
            Some(description) if verbose => {
                let mut wrapped = Map::new();
                wrapped.insert("value".to_string(), projected);
                wrapped.insert(
                    "description".to_string(),
                    Value::String(description.to_string()),
                );
                Value::Object(wrapped)
            }
            _ => projected,
        };
        out.insert(spec.name.to_string(), entry);
    }

    Value::Object(out)
}

fn project_value(value: FieldValue, verbose: bool) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(s),
        FieldValue::Int(n) => n.map(Value::from).unwrap_or(Value::Null),
        FieldValue::Bool(b) => b.map(Value::Bool).unwrap_or(Value::Null),
        FieldValue::Record(nested) => to_projection(nested.as_ref(), verbose),
        FieldValue::List(items) => Value::Array(
            items
                .into_iter()
                .map(|item| project_value(item, verbose))
                .collect(),
        ),
        FieldValue::Map(entries) => Value::Object(entries),
    }
}

/// Type-level schema outline. Optionality is unwrapped to the underlying
/// type; record-typed fields recurse into the nested schema one level deeper.
pub fn schema_text(schema: &'static RecordSchema, indent: usize, verbose: bool) -> String {
    let mut lines = Vec::new();
    schema_lines(schema, indent, verbose, &mut lines);
    lines.join("\n")
}

fn schema_lines(
    schema: &'static RecordSchema,
    indent: usize,
    verbose: bool,
    lines: &mut Vec<String>,
) {
    let prefix = INDENT.repeat(indent);
    if verbose {
        if let Some(doc) = schema.doc {
            lines.push(format!("{prefix}{doc}"));
        }
    }

    for spec in schema.fields {
        let label = field_label(spec.name, spec.description, verbose);
        lines.push(format!("{prefix}{label}: {}", type_display(&spec.ty)));

        if let Some(nested) = spec.ty.record_schema() {
            // Non-reentrant traversal: the model has no self-referential
            // types, guard only against a field naming its own record.
            if !std::ptr::eq(nested, schema) {
                schema_lines(nested, indent + 1, verbose, lines);
            }
        }
    }
}

fn type_display(ty: &TypeSpec) -> String {
    match ty {
        TypeSpec::Text => "string".to_string(),
        TypeSpec::Int => "int".to_string(),
        TypeSpec::Bool => "bool".to_string(),
        TypeSpec::Optional(inner) => type_display(inner),
        TypeSpec::List(inner) => format!("list of {}", type_display(inner)),
        TypeSpec::Map(key, value) => {
            format!("map of {} to {}", type_display(key), type_display(value))
        }
        TypeSpec::Union(alternatives) => alternatives
            .iter()
            .map(type_display)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeSpec::Record(schema) => schema().name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldSpec, FieldValue, Record, RecordSchema, TypeSpec};
    use serde_json::json;

    #[derive(Debug, Clone, Default)]
    struct Badge {
        label: String,
        issuer: String,
    }

    static BADGE_SCHEMA: RecordSchema = RecordSchema {
        name: "Badge",
        doc: Some("Earned badge"),
        fields: &[
            FieldSpec {
                name: "label",
                description: None,
                ty: TypeSpec::Text,
            },
            FieldSpec {
                name: "issuer",
                description: None,
                ty: TypeSpec::Text,
            },
        ],
    };

    fn badge_schema() -> &'static RecordSchema {
        &BADGE_SCHEMA
    }

    impl Record for Badge {
        fn schema(&self) -> &'static RecordSchema {
            &BADGE_SCHEMA
        }

        fn values(&self) -> Vec<FieldValue> {
            vec![
                FieldValue::text(&self.label),
                FieldValue::text(&self.issuer),
            ]
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Member {
        first_name: String,
        last_name: String,
        skills: Vec<String>,
        badges: Vec<Badge>,
        score: Option<i64>,
        extra: Option<serde_json::Map<String, Value>>,
    }

    static BADGE_TY: TypeSpec = TypeSpec::Record(badge_schema);

    static MEMBER_SCHEMA: RecordSchema = RecordSchema {
        name: "Member",
        doc: Some("Community member"),
        fields: &[
            FieldSpec {
                name: "first_name",
                description: None,
                ty: TypeSpec::Text,
            },
            FieldSpec {
                name: "last_name",
                description: None,
                ty: TypeSpec::Text,
            },
            FieldSpec {
                name: "skills",
                description: Some("self-reported skills"),
                ty: TypeSpec::List(&TypeSpec::Text),
            },
            FieldSpec {
                name: "badges",
                description: None,
                ty: TypeSpec::List(&BADGE_TY),
            },
            FieldSpec {
                name: "score",
                description: None,
                ty: TypeSpec::Optional(&TypeSpec::Int),
            },
            FieldSpec {
                name: "extra",
                description: None,
                ty: TypeSpec::Optional(&TypeSpec::Map(&TypeSpec::Text, &TypeSpec::Text)),
            },
        ],
    };

    impl Record for Member {
        fn schema(&self) -> &'static RecordSchema {
            &MEMBER_SCHEMA
        }

        fn values(&self) -> Vec<FieldValue> {
            vec![
                FieldValue::text(&self.first_name),
                FieldValue::text(&self.last_name),
                FieldValue::text_list(&self.skills),
                FieldValue::record_list(&self.badges),
                FieldValue::opt_int(self.score),
                FieldValue::opt_map(&self.extra),
            ]
        }
    }

    #[test]
    fn test_all_empty_record_renders_nothing() {
        let member = Member::default();
        assert_eq!(to_markdown(&member, 0, false), "");
        assert_eq!(to_projection(&member, false), json!({}));
    }

    #[test]
    fn test_all_empty_record_verbose_keeps_only_doc() {
        let member = Member::default();
        assert_eq!(to_markdown(&member, 0, true), "Community member");
        assert_eq!(
            to_projection(&member, true),
            json!({ "__doc__": "Community member" })
        );
    }

    #[test]
    fn test_scalar_and_list_rendering_skips_empty_fields() {
        let member = Member {
            first_name: "Ann".to_string(),
            last_name: String::new(),
            skills: vec!["SQL".to_string(), "Go".to_string()],
            ..Member::default()
        };
        let lines: Vec<String> = to_markdown(&member, 0, false)
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "**first_name**: Ann",
                "**skills**:",
                "  - SQL",
                "  - Go",
            ]
        );
    }

    #[test]
    fn test_record_list_bullets_realign_continuation_lines() {
        let member = Member {
            first_name: "Ann".to_string(),
            badges: vec![
                Badge {
                    label: "Helper".to_string(),
                    issuer: "forum".to_string(),
                },
                Badge {
                    label: "Founder".to_string(),
                    issuer: String::new(),
                },
            ],
            ..Member::default()
        };
        let rendered = to_markdown(&member, 1, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "  **first_name**: Ann",
                "  **badges**:",
                "    - **label**: Helper",
                "      **issuer**: forum",
                "    - **label**: Founder",
            ]
        );
    }

    #[test]
    fn test_empty_record_items_are_dropped_from_lists() {
        let member = Member {
            badges: vec![Badge::default()],
            ..Member::default()
        };
        assert_eq!(to_markdown(&member, 0, false), "**badges**:");
    }

    #[test]
    fn test_map_field_renders_entries_in_insertion_order() {
        let mut extra = serde_json::Map::new();
        extra.insert("source".to_string(), json!("scraper"));
        extra.insert("attempt".to_string(), json!(2));
        let member = Member {
            extra: Some(extra),
            ..Member::default()
        };
        assert_eq!(
            to_markdown(&member, 0, false),
            "**extra**:\n  - source: scraper\n  - attempt: 2"
        );
    }

    #[test]
    fn test_projection_preserves_declared_field_order() {
        let member = Member {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            skills: vec!["SQL".to_string()],
            score: Some(0),
            ..Member::default()
        };
        let projected = to_projection(&member, false);
        let keys: Vec<&String> = projected.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["first_name", "last_name", "skills", "score"]);
        assert_eq!(projected["score"], json!(0));
    }

    #[test]
    fn test_projection_never_invents_fields() {
        let member = Member {
            first_name: "Ann".to_string(),
            ..Member::default()
        };
        let projected = to_projection(&member, false);
        let declared: Vec<&str> = MEMBER_SCHEMA.fields.iter().map(|f| f.name).collect();
        for key in projected.as_object().unwrap().keys() {
            assert!(declared.contains(&key.as_str()), "unexpected key {key}");
        }
    }

    #[test]
    fn test_verbose_projection_wraps_described_fields() {
        let member = Member {
            skills: vec!["SQL".to_string()],
            ..Member::default()
        };
        let projected = to_projection(&member, true);
        assert_eq!(
            projected["skills"],
            json!({ "value": ["SQL"], "description": "self-reported skills" })
        );
    }

    #[test]
    fn test_verbose_markdown_labels_and_doc() {
        let member = Member {
            skills: vec!["SQL".to_string()],
            ..Member::default()
        };
        let rendered = to_markdown(&member, 0, true);
        assert_eq!(
            rendered,
            "Community member\n**skills** _(self-reported skills)_:\n  - SQL"
        );
    }

    #[test]
    fn test_nested_record_projection_recurses() {
        let member = Member {
            badges: vec![Badge {
                label: "Helper".to_string(),
                issuer: "forum".to_string(),
            }],
            ..Member::default()
        };
        let projected = to_projection(&member, false);
        assert_eq!(
            projected["badges"],
            json!([{ "label": "Helper", "issuer": "forum" }])
        );
    }

    #[test]
    fn test_schema_text_outline() {
        let outline = schema_text(&MEMBER_SCHEMA, 0, false);
        let lines: Vec<&str> = outline.lines().collect();
        assert_eq!(
            lines,
            vec![
                "**first_name**: string",
                "**last_name**: string",
                "**skills**: list of string",
                "**badges**: list of Badge",
                "  **label**: string",
                "  **issuer**: string",
                "**score**: int",
                "**extra**: map of string to string",
            ]
        );
    }

    #[test]
    fn test_schema_text_verbose_includes_docs_and_descriptions() {
        let outline = schema_text(&MEMBER_SCHEMA, 0, true);
        assert!(outline.starts_with("Community member\n"));
        assert!(outline.contains("**skills** _(self-reported skills)_: list of string"));
        assert!(outline.contains("  Earned badge\n  **label**: string"));
    }

    #[test]
    fn test_union_type_display() {
        static ALTS: [TypeSpec; 2] = [TypeSpec::Text, TypeSpec::Int];
        assert_eq!(type_display(&TypeSpec::Union(&ALTS)), "string | int");
    }
}

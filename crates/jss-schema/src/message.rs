//! Rendering of engine failures as single lines of the form
//! `<label><path> <reason>`, e.g. `"todo".title should be string`.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde_json::Value;

pub(crate) const FALSE_SCHEMA: &str = "boolean schema is false";

/// Describe `error` with `label` standing in for the checked value.
///
/// `source` is the schema the error was produced against; it is consulted
/// for keyword values the error kind does not carry.
pub(crate) fn describe(error: &ValidationError<'_>, label: &str, source: &Value) -> String {
    if let Some(inner) = narrower_branch(&error.kind) {
        return describe(inner, label, source);
    }
    let path = render_path(&error.instance_path.to_string());
    let reason = reason(error, source);
    format!("{label}{path} {reason}")
}

fn reason(error: &ValidationError<'_>, source: &Value) -> String {
    match &error.kind {
        ValidationErrorKind::Type { kind } => match kind {
            TypeKind::Single(ty) => format!("should be {ty}"),
            _ => match keyword_value(error, source) {
                Some(kinds @ Value::Array(_)) => type_reason(kinds),
                _ => "should be of an allowed type".to_string(),
            },
        },
        ValidationErrorKind::Format { format } => format!("should match format \"{format}\""),
        ValidationErrorKind::Pattern { pattern } => format!("should match pattern \"{pattern}\""),
        ValidationErrorKind::MinLength { limit } => {
            format!("should NOT be shorter than {limit} characters")
        }
        ValidationErrorKind::MaxLength { limit } => {
            format!("should NOT be longer than {limit} characters")
        }
        ValidationErrorKind::Minimum { limit } => format!("should be >= {limit}"),
        ValidationErrorKind::Maximum { limit } => format!("should be <= {limit}"),
        ValidationErrorKind::ExclusiveMinimum { limit } => format!("should be > {limit}"),
        ValidationErrorKind::ExclusiveMaximum { limit } => format!("should be < {limit}"),
        ValidationErrorKind::MultipleOf { .. } => match keyword_value(error, source) {
            Some(divisor) => format!("should be multiple of {divisor}"),
            None => "should be a multiple of the declared divisor".to_string(),
        },
        ValidationErrorKind::MinItems { limit } => {
            format!("should NOT have fewer than {limit} items")
        }
        ValidationErrorKind::MaxItems { limit } => {
            format!("should NOT have more than {limit} items")
        }
        ValidationErrorKind::MinProperties { limit } => {
            format!("should NOT have fewer than {limit} properties")
        }
        ValidationErrorKind::MaxProperties { limit } => {
            format!("should NOT have more than {limit} properties")
        }
        ValidationErrorKind::Required { property } => match property.as_str() {
            Some(name) => format!("should have required property '{name}'"),
            None => format!("should have required property '{property}'"),
        },
        ValidationErrorKind::AdditionalProperties { .. } => {
            "should NOT have additional properties".to_string()
        }
        ValidationErrorKind::UnevaluatedProperties { .. } => {
            "should NOT have unevaluated properties".to_string()
        }
        ValidationErrorKind::AdditionalItems { .. } => {
            "should NOT have additional items".to_string()
        }
        ValidationErrorKind::UniqueItems { .. } => "should NOT have duplicate items".to_string(),
        ValidationErrorKind::Enum { .. } => {
            "should be equal to one of the allowed values".to_string()
        }
        ValidationErrorKind::Constant { .. } => "should be equal to constant".to_string(),
        ValidationErrorKind::Contains { .. } => "should contain a valid item".to_string(),
        ValidationErrorKind::AnyOf { .. } => "should match some schema in anyOf".to_string(),
        ValidationErrorKind::OneOfNotValid { .. } | ValidationErrorKind::OneOfMultipleValid { .. } => {
            "should match exactly one schema in oneOf".to_string()
        }
        ValidationErrorKind::Not { .. } => "should NOT be valid".to_string(),
        ValidationErrorKind::FalseSchema { .. } => FALSE_SCHEMA.to_string(),
        ValidationErrorKind::PropertyNames { .. } => {
            "should have valid property names".to_string()
        }
        _ => error.to_string(),
    }
}

/// Describe a missing value checked against `source`. Only keywords that
/// constrain instances of every type can reject it.
pub(crate) fn describe_absent(source: &Value, label: &str) -> Option<String> {
    let keywords = match source {
        Value::Bool(false) => return Some(format!("{label} {FALSE_SCHEMA}")),
        Value::Object(keywords) => keywords,
        _ => return None,
    };

    let reason = if let Some(kinds) = keywords.get("type") {
        type_reason(kinds)
    } else if keywords.contains_key("enum") {
        "should be equal to one of the allowed values".to_string()
    } else if keywords.contains_key("const") {
        "should be equal to constant".to_string()
    } else {
        return None;
    };
    Some(format!("{label} {reason}"))
}

fn type_reason(kinds: &Value) -> String {
    match kinds {
        Value::String(kind) => format!("should be {kind}"),
        Value::Array(kinds) => format!(
            "should be {}",
            kinds
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(",")
        ),
        _ => "should be of an allowed type".to_string(),
    }
}

/// Pick the `anyOf`/`oneOf` branch that matched the value's shape but broke
/// a narrower keyword, e.g. `uniqueItems` under an array-typed branch.
fn narrower_branch(kind: &ValidationErrorKind) -> Option<&ValidationError<'static>> {
    let context = match kind {
        ValidationErrorKind::AnyOf { context } | ValidationErrorKind::OneOfNotValid { context } => {
            context
        }
        _ => return None,
    };
    context
        .iter()
        .filter_map(|branch| branch.first())
        .find(|error| !is_shape_mismatch(&error.kind))
}

fn is_shape_mismatch(kind: &ValidationErrorKind) -> bool {
    matches!(
        kind,
        ValidationErrorKind::Type { .. }
            | ValidationErrorKind::Enum { .. }
            | ValidationErrorKind::Constant { .. }
            | ValidationErrorKind::FalseSchema
    )
}

/// Look up the keyword that produced `error` inside `source`.
fn keyword_value<'s>(error: &ValidationError<'_>, source: &'s Value) -> Option<&'s Value> {
    source.pointer(&error.schema_path.to_string())
}

/// Turn a JSON pointer (`/todos/0/title`) into accessor syntax
/// (`.todos[0].title`).
fn render_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                format!("[{segment}]")
            } else if is_identifier(&segment) {
                format!(".{segment}")
            } else {
                format!("['{}']", segment.replace('\\', "\\\\").replace('\'', "\\'"))
            }
        })
        .collect()
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn render_path_uses_accessor_syntax() {
        assert_eq!(render_path(""), "");
        assert_eq!(render_path("/title"), ".title");
        assert_eq!(render_path("/todos/0/value"), ".todos[0].value");
        assert_eq!(render_path("/123-abc"), "['123-abc']");
        assert_eq!(render_path("/a~1b"), "['a/b']");
        assert_eq!(render_path("/it's"), "['it\\'s']");
    }

    #[test]
    fn absent_value_against_typed_schemas() {
        assert_eq!(describe_absent(&json!(true), "return value"), None);
        assert_eq!(describe_absent(&json!({}), "return value"), None);
        assert_eq!(
            describe_absent(&json!({ "minimum": 3, "properties": {} }), "return value"),
            None
        );
        assert_eq!(
            describe_absent(&json!({ "type": "number" }), "return value").as_deref(),
            Some("return value should be number")
        );
        assert_eq!(
            describe_absent(&json!({ "type": ["string", "null"] }), "resolved value").as_deref(),
            Some("resolved value should be string,null")
        );
        assert_eq!(
            describe_absent(&json!({ "enum": [1, 2] }), "return value").as_deref(),
            Some("return value should be equal to one of the allowed values")
        );
        assert_eq!(
            describe_absent(&json!(false), "return value").as_deref(),
            Some("return value boolean schema is false")
        );
    }

    #[test]
    fn any_of_failure_reports_the_narrower_branch() {
        let source = json!({ "anyOf": [{ "type": "string" }, { "type": "integer", "minimum": 5 }] });
        let validator = jsonschema::validator_for(&source).unwrap();
        let (small, flag) = (json!(3), json!(true));

        let error = validator.iter_errors(&small).next().unwrap();
        assert_eq!(describe(&error, "n", &source), "n should be >= 5");

        let error = validator.iter_errors(&flag).next().unwrap();
        assert_eq!(
            describe(&error, "n", &source),
            "n should match some schema in anyOf"
        );
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("param1"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("with space"));
    }
}

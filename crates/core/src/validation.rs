//! Field-level validation of JSON request payloads.
//!
//! [`Payload`] reads typed values out of a JSON object one field at a time,
//! recording a [`ValidationError`] under the field name whenever a rule
//! fails. Every rule is checked before the caller sees a result, so a
//! response lists all offending fields at once.
//!
//! Strings are trimmed and empty strings are treated as `null` before any
//! rule runs.

use std::borrow::Cow;
use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
   Rule codes
   -------------------------------------------------------------------------- */

pub const RULE_REQUIRED: &str = "required";
pub const RULE_STRING: &str = "string";
pub const RULE_MAX_STRING: &str = "max.string";
pub const RULE_BOOLEAN: &str = "boolean";
pub const RULE_INTEGER: &str = "integer";
pub const RULE_DATE_FORMAT: &str = "date_format";
pub const RULE_IN: &str = "in";
pub const RULE_ARRAY: &str = "array";
pub const RULE_EXISTS: &str = "exists";

/// How a field appears in the payload after normalisation.
enum Slot<'v> {
    Missing,
    Null,
    Present(&'v Value),
}

/// A JSON object being validated field by field.
#[derive(Debug)]
pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Payload<'a> {
    /// Start validating `body`, which must be a JSON object.
    pub fn new(body: &'a Value) -> Result<Self, CoreError> {
        match body {
            Value::Object(fields) => Ok(Self {
                fields,
                errors: ValidationErrors::new(),
            }),
            _ => Err(CoreError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    fn slot(&self, field: &str) -> Slot<'a> {
        match self.fields.get(field) {
            None => Slot::Missing,
            Some(Value::Null) => Slot::Null,
            Some(Value::String(s)) if s.trim().is_empty() => Slot::Null,
            Some(value) => Slot::Present(value),
        }
    }

    /// `required|string|max:{max}`
    pub fn required_string(&mut self, field: &'static str, max: Option<usize>) -> Option<String> {
        match self.slot(field) {
            Slot::Missing | Slot::Null => {
                self.reject(field, RULE_REQUIRED, required_message(field), None);
                None
            }
            Slot::Present(value) => self.string_value(field, value, max),
        }
    }

    /// `nullable|string|max:{max}`
    ///
    /// Returns `None` when the field is absent, `Some(None)` when it is
    /// explicitly null (or empty), and `Some(Some(s))` otherwise.
    pub fn nullable_string(
        &mut self,
        field: &'static str,
        max: Option<usize>,
    ) -> Option<Option<String>> {
        match self.slot(field) {
            Slot::Missing => None,
            Slot::Null => Some(None),
            Slot::Present(value) => self.string_value(field, value, max).map(Some),
        }
    }

    /// `boolean`. Absent or empty yields `None`; an explicit `null` fails.
    pub fn boolean(&mut self, field: &'static str) -> Option<bool> {
        let value = match self.slot(field) {
            Slot::Missing => return None,
            Slot::Null if self.fields.get(field) == Some(&Value::Null) => {
                self.reject(field, RULE_BOOLEAN, boolean_message(field), None);
                return None;
            }
            Slot::Null => return None,
            Slot::Present(value) => value,
        };
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim() {
                "0" | "false" => Some(false),
                "1" | "true" => Some(true),
                _ => None,
            },
            _ => None,
        };
        if parsed.is_none() {
            self.reject(field, RULE_BOOLEAN, boolean_message(field), None);
        }
        parsed
    }

    /// `required|integer`, bounded to the `INTEGER` column range.
    pub fn required_integer(&mut self, field: &'static str) -> Option<i32> {
        match self.slot(field) {
            Slot::Missing | Slot::Null => {
                self.reject(field, RULE_REQUIRED, required_message(field), None);
                None
            }
            Slot::Present(value) => {
                let parsed = as_integer(value).and_then(|n| i32::try_from(n).ok());
                if parsed.is_none() {
                    self.reject(
                        field,
                        RULE_INTEGER,
                        format!("The {} must be an integer.", display_name(field)),
                        None,
                    );
                }
                parsed
            }
        }
    }

    /// `required|date_format:Y`: a four-digit year given as number or string.
    pub fn required_year(&mut self, field: &'static str) -> Option<i16> {
        match self.slot(field) {
            Slot::Missing | Slot::Null => {
                self.reject(field, RULE_REQUIRED, required_message(field), None);
                None
            }
            Slot::Present(value) => {
                let parsed = parse_year(value);
                if parsed.is_none() {
                    self.reject(
                        field,
                        RULE_DATE_FORMAT,
                        format!("The {} does not match the format Y.", display_name(field)),
                        Some(("format", serde_json::json!("Y"))),
                    );
                }
                parsed
            }
        }
    }

    /// `required|in:{allowed}` where `parse` maps a raw value onto the set.
    pub fn required_in<T, D>(
        &mut self,
        field: &'static str,
        allowed: &[D],
        parse: impl Fn(&Value) -> Option<T>,
    ) -> Option<T>
    where
        D: Display + Serialize,
    {
        match self.slot(field) {
            Slot::Missing | Slot::Null => {
                self.reject(field, RULE_REQUIRED, required_message(field), None);
                None
            }
            Slot::Present(value) => {
                let parsed = parse(value);
                if parsed.is_none() {
                    let listed: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
                    self.reject(
                        field,
                        RULE_IN,
                        format!(
                            "The selected {} is invalid. Must be one of: {}",
                            display_name(field),
                            listed.join(", ")
                        ),
                        Some(("values", serde_json::json!(allowed))),
                    );
                }
                parsed
            }
        }
    }

    /// `array` of ids, optionally `required` (an empty array counts as missing).
    ///
    /// Duplicate ids are collapsed, keeping first-seen order. Elements that
    /// cannot be an id fail the `exists` rule here; existence of well-formed
    /// ids is checked by the caller through [`Payload::reject_missing_ids`].
    pub fn id_array(&mut self, field: &'static str, required: bool) -> Option<Vec<DbId>> {
        let items = match self.slot(field) {
            Slot::Missing | Slot::Null => {
                if required {
                    self.reject(field, RULE_REQUIRED, required_message(field), None);
                }
                return None;
            }
            Slot::Present(Value::Array(items)) => items,
            Slot::Present(_) => {
                self.reject(
                    field,
                    RULE_ARRAY,
                    format!("The {} must be an array.", display_name(field)),
                    None,
                );
                return None;
            }
        };

        if items.is_empty() && required {
            self.reject(field, RULE_REQUIRED, required_message(field), None);
            return None;
        }

        let mut ids: Vec<DbId> = Vec::with_capacity(items.len());
        for item in items {
            match as_integer(item).filter(|id| *id > 0) {
                Some(id) => {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                None => {
                    self.reject(field, RULE_EXISTS, exists_message(field), None);
                    return None;
                }
            }
        }
        Some(ids)
    }

    /// Record an `exists` failure for `field` if `missing` is non-empty.
    pub fn reject_missing_ids(&mut self, field: &'static str, missing: &[DbId]) {
        if !missing.is_empty() {
            self.reject(
                field,
                RULE_EXISTS,
                exists_message(field),
                Some(("missing", serde_json::json!(missing))),
            );
        }
    }

    /// Whether any rule has failed so far.
    pub fn has_errors(&self) -> bool {
        !self.errors.errors().is_empty()
    }

    /// Finish validation, yielding `value` only if every rule passed.
    ///
    /// `value` is built lazily so callers can unwrap the `Option`s returned
    /// by the field readers once they know all of them are `Some`.
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, CoreError> {
        if self.has_errors() {
            return Err(CoreError::InvalidFields(self.errors));
        }
        value().ok_or_else(|| CoreError::Internal("validated payload was incomplete".into()))
    }

    /// Record a rule failure under `field`.
    pub fn reject(
        &mut self,
        field: &'static str,
        code: &'static str,
        message: String,
        param: Option<(&'static str, Value)>,
    ) {
        let mut error = ValidationError::new(code).with_message(Cow::Owned(message));
        if let Some((name, value)) = param {
            error.add_param(Cow::Borrowed(name), &value);
        }
        self.errors.add(field, error);
    }

    fn string_value(
        &mut self,
        field: &'static str,
        value: &Value,
        max: Option<usize>,
    ) -> Option<String> {
        let Value::String(s) = value else {
            self.reject(
                field,
                RULE_STRING,
                format!("The {} must be a string.", display_name(field)),
                None,
            );
            return None;
        };
        let s = s.trim();
        if let Some(max) = max {
            if s.chars().count() > max {
                self.reject(
                    field,
                    RULE_MAX_STRING,
                    format!(
                        "The {} may not be greater than {max} characters.",
                        display_name(field)
                    ),
                    Some(("max", serde_json::json!(max))),
                );
                return None;
            }
        }
        Some(s.to_string())
    }
}

/* --------------------------------------------------------------------------
   Helpers
   -------------------------------------------------------------------------- */

/// `is_active` -> `is active`.
fn display_name(field: &str) -> String {
    field.replace('_', " ")
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", display_name(field))
}

fn boolean_message(field: &str) -> String {
    format!("The {} field must be true or false.", display_name(field))
}

fn exists_message(field: &str) -> String {
    format!("The selected {} is invalid.", display_name(field))
}

/// A JSON integer, or a string holding one.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_year(value: &Value) -> Option<i16> {
    let text = match value {
        Value::Number(n) => n.as_i64()?.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn codes(err: CoreError, field: &str) -> Vec<String> {
        let CoreError::InvalidFields(errors) = err else {
            panic!("expected InvalidFields, got {err:?}");
        };
        errors
            .field_errors()
            .get(field)
            .map(|errs| errs.iter().map(|e| e.code.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn rejects_non_object_body() {
        assert_matches!(Payload::new(&json!([1, 2])), Err(CoreError::Validation(_)));
    }

    #[test]
    fn required_string_rejects_missing_and_empty() {
        let body = json!({"title": "   "});
        let mut p = Payload::new(&body).unwrap();
        p.required_string("name", Some(255));
        p.required_string("title", Some(255));
        let err = p.finish(|| Some(())).unwrap_err();
        let CoreError::InvalidFields(errors) = &err else {
            panic!("expected InvalidFields");
        };
        assert_eq!(errors.field_errors().len(), 2);
        assert_eq!(codes(err, "name"), vec![RULE_REQUIRED]);
    }

    #[test]
    fn required_string_enforces_max_length() {
        let long = "a".repeat(256);
        let body = json!({"name": long});
        let mut p = Payload::new(&body).unwrap();
        p.required_string("name", Some(255));
        let err = p.finish(|| Some(())).unwrap_err();
        assert_eq!(codes(err, "name"), vec![RULE_MAX_STRING]);
    }

    #[test]
    fn required_string_trims() {
        let body = json!({"name": "  Drama "});
        let mut p = Payload::new(&body).unwrap();
        let name = p.required_string("name", Some(255));
        assert_eq!(p.finish(|| name).unwrap(), "Drama");
    }

    #[test]
    fn required_string_rejects_non_string() {
        let body = json!({"name": 12});
        let mut p = Payload::new(&body).unwrap();
        p.required_string("name", None);
        assert_eq!(codes(p.finish(|| Some(())).unwrap_err(), "name"), vec![RULE_STRING]);
    }

    #[test]
    fn nullable_string_distinguishes_absent_from_null() {
        let body = json!({"a": null, "b": "", "c": "text"});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.nullable_string("missing", None), None);
        assert_eq!(p.nullable_string("a", None), Some(None));
        assert_eq!(p.nullable_string("b", None), Some(None));
        assert_eq!(p.nullable_string("c", None), Some(Some("text".to_string())));
        assert!(!p.has_errors());
    }

    #[test]
    fn boolean_accepts_common_encodings() {
        let body = json!({"a": true, "b": 0, "c": "1", "d": "false"});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.boolean("a"), Some(true));
        assert_eq!(p.boolean("b"), Some(false));
        assert_eq!(p.boolean("c"), Some(true));
        assert_eq!(p.boolean("d"), Some(false));
        assert_eq!(p.boolean("missing"), None);
        assert!(!p.has_errors());
    }

    #[test]
    fn boolean_rejects_other_values() {
        let body = json!({"is_active": "a"});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.boolean("is_active"), None);
        assert_eq!(
            codes(p.finish(|| Some(())).unwrap_err(), "is_active"),
            vec![RULE_BOOLEAN]
        );
    }

    #[test]
    fn boolean_rejects_explicit_null_but_not_empty_string() {
        let body = json!({"opened": null, "is_active": ""});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.boolean("opened"), None);
        assert_eq!(p.boolean("is_active"), None);
        let err = p.finish(|| Some(())).unwrap_err();
        let CoreError::InvalidFields(errors) = &err else {
            panic!("expected InvalidFields, got {err:?}");
        };
        let fields = errors.field_errors();
        assert_eq!(fields["opened"][0].code, RULE_BOOLEAN);
        assert!(!fields.contains_key("is_active"));
    }

    #[test]
    fn integer_parses_numbers_and_digit_strings() {
        let body = json!({"a": 90, "b": "45", "c": "s", "d": 1.5});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.required_integer("a"), Some(90));
        assert_eq!(p.required_integer("b"), Some(45));
        assert_eq!(p.required_integer("c"), None);
        assert_eq!(p.required_integer("d"), None);
        let err = p.finish(|| Some(())).unwrap_err();
        assert_eq!(codes(err, "c"), vec![RULE_INTEGER]);
    }

    #[test]
    fn year_requires_four_digits() {
        let body = json!({"a": 2012, "b": "1999", "c": "a", "d": 12});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.required_year("a"), Some(2012));
        assert_eq!(p.required_year("b"), Some(1999));
        assert_eq!(p.required_year("c"), None);
        assert_eq!(p.required_year("d"), None);
        let CoreError::InvalidFields(errors) = p.finish(|| Some(())).unwrap_err() else {
            panic!("expected InvalidFields");
        };
        let fields = errors.field_errors();
        let c = &fields["c"][0];
        assert_eq!(c.code, RULE_DATE_FORMAT);
        assert_eq!(c.params["format"], json!("Y"));
    }

    #[test]
    fn required_in_reports_allowed_values() {
        let body = json!({"rating": 0});
        let mut p = Payload::new(&body).unwrap();
        let parsed = p.required_in("rating", &["L", "10"], |v| v.as_str().map(str::to_owned));
        assert_eq!(parsed, None);
        let CoreError::InvalidFields(errors) = p.finish(|| Some(())).unwrap_err() else {
            panic!("expected InvalidFields");
        };
        let fields = errors.field_errors();
        let rating = &fields["rating"][0];
        assert_eq!(rating.code, RULE_IN);
        assert_eq!(rating.params["values"], json!(["L", "10"]));
    }

    #[test]
    fn id_array_rejects_scalars_and_dedupes() {
        let body = json!({"a": "a", "b": [3, "3", 1], "c": []});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.id_array("a", true), None);
        assert_eq!(p.id_array("b", true), Some(vec![3, 1]));
        assert_eq!(p.id_array("c", true), None);
        assert_eq!(p.id_array("missing", false), None);
        let err = p.finish(|| Some(())).unwrap_err();
        let CoreError::InvalidFields(errors) = &err else {
            panic!("expected InvalidFields");
        };
        assert!(errors.field_errors().get("missing").is_none());
        assert_eq!(codes(err, "a"), vec![RULE_ARRAY]);
    }

    #[test]
    fn id_array_flags_malformed_elements_as_missing() {
        let body = json!({"ids": [1, "x"]});
        let mut p = Payload::new(&body).unwrap();
        assert_eq!(p.id_array("ids", true), None);
        assert_eq!(codes(p.finish(|| Some(())).unwrap_err(), "ids"), vec![RULE_EXISTS]);
    }

    #[test]
    fn reject_missing_ids_records_exists() {
        let body = json!({});
        let mut p = Payload::new(&body).unwrap();
        p.reject_missing_ids("categories_id", &[]);
        assert!(!p.has_errors());
        p.reject_missing_ids("categories_id", &[100]);
        assert_eq!(
            codes(p.finish(|| Some(())).unwrap_err(), "categories_id"),
            vec![RULE_EXISTS]
        );
    }

    #[test]
    fn finish_returns_value_when_clean() {
        let body = json!({"name": "ok"});
        let mut p = Payload::new(&body).unwrap();
        let name = p.required_string("name", Some(255));
        assert_eq!(p.finish(|| name).unwrap(), "ok");
    }
}

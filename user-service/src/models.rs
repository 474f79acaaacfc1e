//! Data models for the users API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{Error, Result, ValidationDetail};

/// Lowest accepted age (inclusive)
pub const MIN_AGE: i64 = 0;

/// Highest accepted age (inclusive)
pub const MAX_AGE: i64 = 150;

/// Message reported when the age is outside `MIN_AGE..=MAX_AGE`
pub const AGE_OUT_OF_RANGE: &str = "Age must be between 0 and 150";

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Assigned by the store at creation
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Create user request body, as documented in the OpenAPI schema
///
/// Bodies are validated by [`NewUser::from_json`] rather than deserialized
/// into this type, so every field problem can be reported at once.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Ignored; the store assigns ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    /// Must be between 0 and 150 inclusive
    pub age: i64,
}

/// Delete confirmation body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub message: String,
}

impl DeleteUserResponse {
    /// Confirmation for a deleted id
    pub fn for_id(id: i64) -> Self {
        Self {
            message: format!("User {} deleted successfully", id),
        }
    }
}

/// A create request that passed shape validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewUser {
    /// Validate the shape of a create request body
    ///
    /// Collects every missing or mistyped field into one `Error::Validation`.
    /// Business rules are not checked here.
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(fields) = body else {
            return Err(Error::Validation(vec![ValidationDetail::new(
                ["body"],
                "model_attributes_type",
                "Input should be a valid dictionary or object to extract fields from",
            )]));
        };

        let mut problems = Vec::new();
        let name = string_field(&fields, "name", &mut problems);
        let email = string_field(&fields, "email", &mut problems);
        let age = int_field(&fields, "age", &mut problems);

        match (name, email, age) {
            (Some(name), Some(email), Some(age)) if problems.is_empty() => {
                Ok(Self { name, email, age })
            }
            _ => Err(Error::Validation(problems)),
        }
    }

    /// Check the age business rule
    pub fn check_age(&self) -> Result<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(Error::BadRequest(AGE_OUT_OF_RANGE.to_string()));
        }
        Ok(())
    }
}

fn missing(field: &str) -> ValidationDetail {
    ValidationDetail::body_field(field, "missing", "Field required")
}

fn string_field(
    fields: &Map<String, Value>,
    field: &str,
    problems: &mut Vec<ValidationDetail>,
) -> Option<String> {
    match fields.get(field) {
        None => {
            problems.push(missing(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            problems.push(ValidationDetail::body_field(
                field,
                "string_type",
                "Input should be a valid string",
            ));
            None
        }
    }
}

/// Lax integer parsing: integers, integral floats, booleans (`true` is 1) and
/// base-10 integer strings
fn int_field(
    fields: &Map<String, Value>,
    field: &str,
    problems: &mut Vec<ValidationDetail>,
) -> Option<i64> {
    let value = match fields.get(field) {
        None => {
            problems.push(missing(field));
            return None;
        }
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.as_u64().is_some() {
                // above i64::MAX; still an integer, the range rule rejects it
                Ok(i64::MAX)
            } else {
                float_to_int(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => parse_int_str(s),
        _ => Err(("int_type", "Input should be a valid integer")),
    };

    match parsed {
        Ok(i) => Some(i),
        Err((kind, msg)) => {
            problems.push(ValidationDetail::body_field(field, kind, msg));
            None
        }
    }
}

type IntProblem = (&'static str, &'static str);

fn float_to_int(f: f64) -> std::result::Result<i64, IntProblem> {
    if !f.is_finite() {
        return Err(("finite_number", "Input should be a finite number"));
    }
    if f.fract() != 0.0 {
        return Err((
            "int_from_float",
            "Input should be a valid integer, got a number with a fractional part",
        ));
    }
    Ok(f.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

fn parse_int_str(s: &str) -> std::result::Result<i64, IntProblem> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err((
            "int_parsing",
            "Input should be a valid integer, unable to parse string as an integer",
        ));
    }
    // all digits: the only possible parse failure is overflow
    Ok(trimmed.parse::<i64>().unwrap_or(if trimmed.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn problems(body: Value) -> Vec<ValidationDetail> {
        match NewUser::from_json(body) {
            Err(Error::Validation(problems)) => problems,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body() {
        let user = NewUser::from_json(json!({"name": "A", "email": "a@x.com", "age": 30})).unwrap();
        assert_eq!(
            user,
            NewUser {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                age: 30
            }
        );
    }

    #[test]
    fn test_id_and_unknown_fields_ignored() {
        let user = NewUser::from_json(
            json!({"id": 77, "name": "A", "email": "a@x.com", "age": 30, "extra": true}),
        )
        .unwrap();
        assert_eq!(user.age, 30);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let found = problems(json!({"name": "Incomplete User"}));
        assert_eq!(
            found,
            vec![
                ValidationDetail::body_field("email", "missing", "Field required"),
                ValidationDetail::body_field("age", "missing", "Field required"),
            ]
        );
    }

    #[test]
    fn test_non_numeric_age_string() {
        let found = problems(json!({"name": "A", "email": "a@x.com", "age": "not_a_number"}));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].loc, vec!["body", "age"]);
        assert_eq!(found[0].kind, "int_parsing");
    }

    #[test]
    fn test_lax_integer_forms() {
        for age in [json!("42"), json!(42.0), json!(" 42 ")] {
            let user = NewUser::from_json(json!({"name": "A", "email": "a@x.com", "age": age}))
                .unwrap();
            assert_eq!(user.age, 42);
        }
    }

    #[test]
    fn test_boolean_age_coerces() {
        let user = NewUser::from_json(json!({"name": "A", "email": "a@x.com", "age": true}))
            .unwrap();
        assert_eq!(user.age, 1);
        let user = NewUser::from_json(json!({"name": "A", "email": "a@x.com", "age": false}))
            .unwrap();
        assert_eq!(user.age, 0);
    }

    #[test]
    fn test_fractional_age() {
        let found = problems(json!({"name": "A", "email": "a@x.com", "age": 30.5}));
        assert_eq!(found[0].kind, "int_from_float");
    }

    #[test]
    fn test_wrong_types() {
        let found = problems(json!({"name": 5, "email": null, "age": [30]}));
        let kinds: Vec<&str> = found.iter().map(|p| p.kind.as_str()).collect();
        assert_eq!(kinds, vec!["string_type", "string_type", "int_type"]);
    }

    #[test]
    fn test_non_object_body() {
        let found = problems(json!([1, 2, 3]));
        assert_eq!(found[0].loc, vec!["body"]);
        assert_eq!(found[0].kind, "model_attributes_type");
    }

    #[test]
    fn test_huge_age_passes_shape_but_fails_range() {
        let user = NewUser::from_json(
            json!({"name": "A", "email": "a@x.com", "age": 18446744073709551615u64}),
        )
        .unwrap();
        assert!(matches!(user.check_age(), Err(Error::BadRequest(_))));
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let at = |age| NewUser {
            name: "A".into(),
            email: "a@x.com".into(),
            age,
        };
        assert!(at(0).check_age().is_ok());
        assert!(at(150).check_age().is_ok());
        for age in [-1, 151] {
            match at(age).check_age() {
                Err(Error::BadRequest(msg)) => assert_eq!(msg, AGE_OUT_OF_RANGE),
                other => panic!("expected age error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_delete_message() {
        assert_eq!(
            DeleteUserResponse::for_id(3).message,
            "User 3 deleted successfully"
        );
    }
}

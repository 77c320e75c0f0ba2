//! The `{data, errors}` envelope wrapped around every CI response.
//!
//! # Design
//! The envelope is decoded once into a tagged union instead of poking at keys
//! at each call site. Only the top level is checked: the response must be an
//! object whose `errors` is an array, and `data` must be present when
//! `errors` is empty. Everything inside `data` and each error entry is passed
//! through as raw JSON.

use serde_json::Value;
use thiserror::Error;

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `errors` was empty; holds the `data` payload.
    Success(Value),
    /// `errors` was non-empty; holds the entries verbatim.
    Failure(Vec<Value>),
}

/// Why a response body is not a usable envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("envelope is not a json object")]
    NotAnObject,

    #[error("envelope has no `errors` field")]
    MissingErrors,

    #[error("envelope `errors` is not an array")]
    ErrorsNotArray,

    #[error("envelope has no `data` field")]
    MissingData,
}

impl Envelope {
    pub fn decode(body: &str) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut fields) = value else {
            return Err(EnvelopeError::NotAnObject);
        };
        let errors = match fields.remove("errors") {
            Some(Value::Array(errors)) => errors,
            Some(_) => return Err(EnvelopeError::ErrorsNotArray),
            None => return Err(EnvelopeError::MissingErrors),
        };
        if !errors.is_empty() {
            return Ok(Envelope::Failure(errors));
        }
        fields
            .remove("data")
            .map(Envelope::Success)
            .ok_or(EnvelopeError::MissingData)
    }

    /// `Ok(data)` on success, `Err(errors)` on failure.
    pub fn into_result(self) -> Result<Value, Vec<Value>> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(errors) => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_errors_yields_data() {
        let envelope = Envelope::decode(r#"{"data": [1, 2, 3], "errors": []}"#).unwrap();
        assert_eq!(envelope, Envelope::Success(json!([1, 2, 3])));
    }

    #[test]
    fn null_data_is_still_success() {
        let envelope = Envelope::decode(r#"{"data": null, "errors": []}"#).unwrap();
        assert_eq!(envelope, Envelope::Success(Value::Null));
    }

    #[test]
    fn extra_keys_are_discarded() {
        let envelope =
            Envelope::decode(r#"{"data": {"suid": 52}, "errors": [], "meta": "x"}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap(), json!({"suid": 52}));
    }

    #[test]
    fn non_empty_errors_yields_failure_verbatim() {
        let errors = json!([
            {"status": 404, "type": "urn:cytoscape:ci:ndex:v1:errors:1", "message": "nope", "link": "file:///log"},
            "second"
        ]);
        let body = json!({"data": {}, "errors": errors}).to_string();
        let envelope = Envelope::decode(&body).unwrap();
        assert_eq!(envelope.into_result().unwrap_err(), errors.as_array().unwrap().clone());
    }

    #[test]
    fn failure_does_not_need_data() {
        let envelope = Envelope::decode(r#"{"errors": ["boom"]}"#).unwrap();
        assert_eq!(envelope, Envelope::Failure(vec![json!("boom")]));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = Envelope::decode("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidJson(_)));
    }

    #[test]
    fn top_level_shape_is_checked() {
        assert!(matches!(Envelope::decode("[1, 2]"), Err(EnvelopeError::NotAnObject)));
        assert!(matches!(Envelope::decode(r#"{"data": 1}"#), Err(EnvelopeError::MissingErrors)));
        assert!(matches!(
            Envelope::decode(r#"{"data": 1, "errors": null}"#),
            Err(EnvelopeError::ErrorsNotArray)
        ));
        assert!(matches!(Envelope::decode(r#"{"errors": []}"#), Err(EnvelopeError::MissingData)));
    }
}

//! `Validated<S>` extractor: runs an endpoint's rule set before the handler.
//!
//! Path params, query string and JSON body are gathered into one
//! [`RequestInput`], normalized and checked by the schema's [`RuleSet`], and
//! only then deserialized into the schema's typed parts.

use std::marker::PhantomData;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use quill_core::validation::{RequestInput, RuleSet};

use crate::middleware::error::AppError;

/// Declares the inputs of one endpoint and the rules guarding them.
pub trait Schema: 'static {
    type Params: DeserializeOwned;
    type Query: DeserializeOwned;
    type Body: DeserializeOwned;

    fn rules() -> &'static RuleSet;
}

/// Placeholder for request parts an endpoint does not read.
#[derive(Debug, Default, Deserialize)]
pub struct Empty {}

/// Request input that passed validation.
pub struct Validated<S: Schema> {
    pub params: S::Params,
    pub query: S::Query,
    pub body: S::Body,
    _schema: PhantomData<S>,
}

fn path_params(req: &HttpRequest) -> Map<String, Value> {
    req.match_info()
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}

/// Query pairs as strings. Empty values count as absent.
fn query_params(req: &HttpRequest) -> Result<Map<String, Value>, AppError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(pairs
        .into_inner()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}

fn json_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(format!("Invalid JSON: {e}")))
}

fn typed<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

impl<S: Schema> Validated<S> {
    fn from_input(mut input: RequestInput) -> Result<Self, AppError> {
        S::rules().apply(&mut input).map_err(AppError::Validation)?;

        Ok(Self {
            params: typed(Value::Object(input.params))?,
            query: typed(Value::Object(input.query))?,
            body: typed(input.body)?,
            _schema: PhantomData,
        })
    }
}

impl<S: Schema> FromRequest for Validated<S> {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let params = path_params(req);
        let query = query_params(req);
        let bytes = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            let input = RequestInput {
                params,
                query: query?,
                body: json_body(&bytes)?,
            };

            let result = Self::from_input(input);
            if let Err(AppError::Validation(errors)) = &result {
                tracing::debug!(failures = errors.len(), "Request failed validation");
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use quill_core::validation::FieldRules;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct NameBody {
        name: String,
    }

    struct Named;

    static NAMED: LazyLock<RuleSet> = LazyLock::new(|| {
        RuleSet::new([FieldRules::body("name")
            .trim()
            .not_empty("Name is required")])
    });

    impl Schema for Named {
        type Params = Empty;
        type Query = Empty;
        type Body = NameBody;

        fn rules() -> &'static RuleSet {
            &NAMED
        }
    }

    #[test]
    fn test_normalized_body_reaches_handler() {
        let input = RequestInput {
            body: serde_json::json!({ "name": "  Ada  " }),
            ..Default::default()
        };
        let validated = Validated::<Named>::from_input(input).unwrap();
        assert_eq!(validated.body.name, "Ada");
    }

    #[test]
    fn test_failures_short_circuit() {
        let result = Validated::<Named>::from_input(RequestInput::default());
        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Name is required");
            }
            _ => panic!("expected validation failure"),
        }
    }

    #[test]
    fn test_blank_body_is_empty_object() {
        assert_eq!(json_body(b"  ").unwrap(), serde_json::json!({}));
        assert!(matches!(json_body(b"{not json"), Err(AppError::BadRequest(_))));
    }
}

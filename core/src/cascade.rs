use std::fmt;

use serde::{Deserialize, Deserializer};
use url::form_urlencoded;

pub const PLACEHOLDER_LABEL: &str = "---------";
pub const BRAND_QUERY_KEY: &str = "brand_id";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelOption {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Uint(u64),
    Text(String),
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(value) => value.to_string(),
        RawId::Uint(value) => value.to_string(),
        RawId::Text(value) => value,
    })
}

pub fn decode_model_list(body: &str) -> Result<Vec<ModelOption>, LookupError> {
    serde_json::from_str(body).map_err(|err| LookupError::Decode(err.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

impl From<ModelOption> for SelectOption {
    fn from(model: ModelOption) -> Self {
        Self {
            value: model.id,
            label: model.name,
        }
    }
}

/// The dependent control of a cascade.
pub trait DependentSelect {
    fn replace_options(&mut self, options: &[SelectOption]);
    fn set_disabled(&mut self, disabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub brand_id: String,
    pub token: RequestToken,
}

impl LookupRequest {
    pub fn url(&self, models_url: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(self.brand_id.as_bytes()).collect();
        let joiner = if models_url.contains('?') { '&' } else { '?' };
        format!("{models_url}{joiner}{BRAND_QUERY_KEY}={encoded}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied { count: usize },
    Stale,
    Failed(LookupError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Network(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Network(message) => write!(f, "network error: {message}"),
            LookupError::Status(status) => write!(f, "unexpected status {status}"),
            LookupError::Decode(message) => write!(f, "malformed model list: {message}"),
        }
    }
}

impl std::error::Error for LookupError {}

pub struct Cascade<S> {
    select: S,
    next_token: u64,
    latest: Option<RequestToken>,
}

impl<S: DependentSelect> Cascade<S> {
    pub fn new(select: S) -> Self {
        Self {
            select,
            next_token: 1,
            latest: None,
        }
    }

    /// Resets the dependent control for an empty selection, otherwise mints
    /// the token for a lookup.
    pub fn on_brand_change(&mut self, value: &str) -> Option<LookupRequest> {
        if value.is_empty() {
            self.latest = None;
            self.select.replace_options(&[SelectOption::placeholder()]);
            self.select.set_disabled(true);
            return None;
        }
        let token = RequestToken(self.next_token);
        self.next_token = self.next_token.saturating_add(1);
        self.latest = Some(token);
        Some(LookupRequest {
            brand_id: value.to_string(),
            token,
        })
    }

    pub fn on_lookup_complete(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ModelOption>, LookupError>,
    ) -> LookupOutcome {
        if self.latest != Some(token) {
            return LookupOutcome::Stale;
        }
        let models = match result {
            Ok(models) => models,
            Err(err) => return LookupOutcome::Failed(err),
        };
        let count = models.len();
        let mut options = Vec::with_capacity(count + 1);
        options.push(SelectOption::placeholder());
        options.extend(models.into_iter().map(SelectOption::from));
        self.select.replace_options(&options);
        self.select.set_disabled(false);
        LookupOutcome::Applied { count }
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest
    }

    pub fn select(&self) -> &S {
        &self.select
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_numeric_and_string_ids() {
        let models = decode_model_list(r#"[{"id":7,"name":"Golf"},{"id":"x1","name":"Polo"}]"#)
            .unwrap();
        assert_eq!(models[0].id, "7");
        assert_eq!(models[1].id, "x1");
    }

    #[test]
    fn decode_rejects_non_array() {
        let err = decode_model_list(r#"{"detail":"nope"}"#).unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[test]
    fn url_appends_to_existing_query() {
        let request = LookupRequest {
            brand_id: "5 6".to_string(),
            token: RequestToken(1),
        };
        assert_eq!(request.url("/api/models/"), "/api/models/?brand_id=5+6");
        assert_eq!(
            request.url("/api/models/?format=json"),
            "/api/models/?format=json&brand_id=5+6"
        );
    }
}

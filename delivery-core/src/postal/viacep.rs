//! ViaCEP-compatible geocoding client
//!
//! `GET {base_url}/ws/{cep}/json/` returns the municipality name (`localidade`)
//! and IBGE code (`ibge`). Unknown codes come back as `{"erro": true}`.

use crate::store::PostalCodeStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PostalCode, PostalLocation};

pub const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br";

/// Provider payload (only the fields we use)
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    ibge: Option<String>,
    /// `true` (or `"true"` in newer versions) for unknown codes
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Parse a provider body into a location
fn parse_body(body: &str) -> AppResult<Option<PostalLocation>> {
    let resp: ViaCepResponse = serde_json::from_str(body).map_err(|e| {
        AppError::with_message(
            ErrorCode::PostalLookupFailed,
            format!("Invalid geocoding payload: {e}"),
        )
    })?;
    if resp.is_error() {
        return Ok(None);
    }
    match (resp.localidade, resp.ibge) {
        (Some(city), Some(region_code)) if !city.trim().is_empty() => Ok(Some(PostalLocation {
            city: city.trim().to_string(),
            region_code: region_code.trim().to_string(),
        })),
        _ => Err(AppError::with_message(
            ErrorCode::PostalLookupFailed,
            "Geocoding payload missing localidade/ibge",
        )),
    }
}

/// HTTP postal code store
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, code)
    }
}

impl Default for ViaCepClient {
    fn default() -> Self {
        Self::new(DEFAULT_VIACEP_URL)
    }
}

fn request_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::with_message(ErrorCode::TimeoutError, format!("Geocoding timed out: {e}"))
    } else {
        AppError::network(format!("Geocoding request failed: {e}"))
    }
}

#[async_trait]
impl PostalCodeStore for ViaCepClient {
    async fn get(&self, postal_code: &PostalCode) -> AppResult<Option<PostalLocation>> {
        let resp = self
            .http
            .get(self.url(postal_code))
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(AppError::new(ErrorCode::SystemBusy));
            }
            s if s.is_server_error() => {
                return Err(AppError::network(format!("Geocoding provider returned {s}")));
            }
            s if !s.is_success() => {
                return Err(AppError::with_message(
                    ErrorCode::PostalLookupFailed,
                    format!("Geocoding provider returned {s}"),
                ));
            }
            _ => {}
        }

        let body = resp.text().await.map_err(request_error)?;
        parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_found() {
        let body = r#"{
            "cep": "80010-000",
            "logradouro": "Rua XV de Novembro",
            "localidade": "Curitiba",
            "uf": "PR",
            "ibge": "4106902"
        }"#;
        let loc = parse_body(body).unwrap().unwrap();
        assert_eq!(loc.city, "Curitiba");
        assert_eq!(loc.region_code, "4106902");
    }

    #[test]
    fn test_parse_unknown_code() {
        assert!(parse_body(r#"{"erro": true}"#).unwrap().is_none());
        assert!(parse_body(r#"{"erro": "true"}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_incomplete_payload() {
        let err = parse_body(r#"{"cep": "80010-000"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::PostalLookupFailed);
        assert!(!err.is_transient());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_body("<html>").is_err());
    }

    #[test]
    fn test_url_uses_digits() {
        let client = ViaCepClient::new("https://geo.example/");
        let code = PostalCode::parse("80010-000").unwrap();
        assert_eq!(client.url(&code), "https://geo.example/ws/80010000/json/");
    }
}

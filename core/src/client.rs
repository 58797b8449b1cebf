//! Stateless HTTP request builder and response parser for the fish API.
//!
//! # Design
//! `FishClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateFish, Fish, UpdateFish};

/// Base URL of the reference fish endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Synchronous, stateless client for the fish REST contract.
#[derive(Debug, Clone)]
pub struct FishClient {
    base_url: String,
}

impl FishClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_fish(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/fish", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_fish(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_fish(&self, input: &CreateFish) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/fish", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_fish(&self, id: &str, input: &UpdateFish) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_fish(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_fish(&self, response: HttpResponse) -> Result<Vec<Fish>, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response)
    }

    pub fn parse_get_fish(&self, response: HttpResponse) -> Result<Fish, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response)
    }

    pub fn parse_create_fish(&self, response: HttpResponse) -> Result<Fish, ApiError> {
        check_status(&response, 201)?;
        parse_body(&response)
    }

    pub fn parse_update_fish(&self, response: HttpResponse) -> Result<Fish, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response)
    }

    pub fn parse_delete_fish(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/fish/{}", self.base_url, encode_segment(id))
    }
}

impl Default for FishClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    if response.status == 422 {
        return Err(ApiError::ValidationError(error_message(&response.body)));
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// The `error` field of a JSON error body, or the raw body when it has none.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FishClient {
        FishClient::new("http://localhost:8080")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_fish_produces_correct_request() {
        let req = client().build_list_fish();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/fish");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_fish_produces_correct_request() {
        let req = client().build_get_fish("3");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/fish/3");
    }

    #[test]
    fn build_create_fish_produces_correct_request() {
        let input = CreateFish {
            name: "Gill".to_string(),
            species: "Moorish Idol".to_string(),
            length_in_cm: 15.0,
            weight_in_kg: 0.3,
        };
        let req = client().build_create_fish(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/fish");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Gill");
        assert_eq!(body["species"], "Moorish Idol");
        assert_eq!(body["lengthInCm"], 15.0);
        assert_eq!(body["weightInKg"], 0.3);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_fish_sends_only_present_fields() {
        let input = UpdateFish {
            name: Some("Nemo Jr.".to_string()),
            ..UpdateFish::default()
        };
        let req = client().build_update_fish("1", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:8080/fish/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Nemo Jr." }));
    }

    #[test]
    fn build_delete_fish_produces_correct_request() {
        let req = client().build_delete_fish("2");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/fish/2");
        assert!(req.body.is_none());
    }

    #[test]
    fn ids_are_percent_encoded_in_paths() {
        let req = client().build_get_fish("a b/c");
        assert_eq!(req.path, "http://localhost:8080/fish/a%20b%2Fc");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = FishClient::new("http://localhost:8080/");
        assert_eq!(client.build_list_fish().path, "http://localhost:8080/fish");
    }

    #[test]
    fn default_client_targets_reference_endpoint() {
        assert_eq!(FishClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn parse_list_fish_success() {
        let fish = client()
            .parse_list_fish(response(
                200,
                r#"[{"id":"1","name":"Nemo","species":"Clownfish","lengthInCm":11,"weightInKg":0.025}]"#,
            ))
            .unwrap();
        assert_eq!(fish.len(), 1);
        assert_eq!(fish[0].name, "Nemo");
        assert_eq!(fish[0].length_in_cm, 11.0);
    }

    #[test]
    fn parse_list_fish_bad_json() {
        let err = client().parse_list_fish(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_fish_not_found() {
        let err = client().parse_get_fish(response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_create_fish_wrong_status() {
        let err = client().parse_create_fish(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_create_fish_unprocessable_is_validation_error() {
        let err = client()
            .parse_create_fish(response(
                422,
                r#"{"error":"lengthInCm must be a finite, non-negative number, got -1","status":422}"#,
            ))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::ValidationError("lengthInCm must be a finite, non-negative number, got -1".to_string())
        );
    }

    #[test]
    fn parse_update_fish_unprocessable_without_json_keeps_body() {
        let err = client()
            .parse_update_fish(response(422, "missing field `species`"))
            .unwrap_err();
        assert_eq!(err, ApiError::ValidationError("missing field `species`".to_string()));
    }

    #[test]
    fn parse_update_fish_success() {
        let fish = client()
            .parse_update_fish(response(
                200,
                r#"{"id":"1","name":"Nemo Jr.","species":"Clownfish","lengthInCm":11,"weightInKg":0.025}"#,
            ))
            .unwrap();
        assert_eq!(fish.name, "Nemo Jr.");
    }

    #[test]
    fn parse_delete_fish_success() {
        assert!(client().parse_delete_fish(response(204, "")).is_ok());
    }
}

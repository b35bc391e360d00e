//! Request bodies and body decoding

use actix_web::{HttpMessage, HttpRequest};
use confreg_registry::{ConfigurationInGroup, Group};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::RequestError;

pub const APPLICATION_JSON: &str = "application/json";

/// Check the Content-Type and decode a JSON body.
///
/// A missing or unparsable Content-Type is a bad request; a parsable one
/// naming anything other than `application/json` is an unsupported media type.
pub fn json_body<T: DeserializeOwned>(req: &HttpRequest, body: &[u8]) -> Result<T, RequestError> {
    require_json(req)?;
    serde_json::from_slice(body).map_err(|e| RequestError::MalformedBody(e.to_string()))
}

/// Content-Type check on its own, for handlers that must validate before any store call
pub fn require_json(req: &HttpRequest) -> Result<(), RequestError> {
    let mime = req
        .mime_type()
        .map_err(|e| RequestError::InvalidContentType(e.to_string()))?
        .ok_or_else(|| RequestError::InvalidContentType("no media type".to_string()))?;

    if mime.essence_str() != APPLICATION_JSON {
        return Err(RequestError::UnsupportedMediaType(
            mime.essence_str().to_string(),
        ));
    }

    Ok(())
}

/// Body of `POST /group`. Both `version` and `configs` must be present.
#[derive(Debug, Deserialize)]
pub struct GroupPayload {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub configs: Option<Vec<ConfigurationInGroup>>,
}

impl GroupPayload {
    pub fn into_group(self) -> Result<Group, RequestError> {
        if self.version.is_empty() {
            return Err(RequestError::MissingField("version"));
        }
        let configs = self.configs.ok_or(RequestError::MissingField("configs"))?;
        Ok(Group::new(self.version, configs))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header;
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn test_require_json() {
        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "application/json; charset=utf-8"))
            .to_http_request();
        assert!(require_json(&req).is_ok());

        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .to_http_request();
        assert!(matches!(
            require_json(&req),
            Err(RequestError::UnsupportedMediaType(m)) if m == "text/plain"
        ));

        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            require_json(&req),
            Err(RequestError::InvalidContentType(_))
        ));

        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "not a media type"))
            .to_http_request();
        assert!(matches!(
            require_json(&req),
            Err(RequestError::InvalidContentType(_))
        ));
    }

    #[test]
    fn test_json_body_rejects_malformed_json() {
        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, APPLICATION_JSON))
            .to_http_request();

        let result: Result<Group, _> = json_body(&req, b"{\"version\":");
        assert!(matches!(result, Err(RequestError::MalformedBody(_))));
    }

    #[test]
    fn test_group_payload_requires_version_and_configs() {
        let payload: GroupPayload = serde_json::from_str(r#"{"configs": []}"#).unwrap();
        assert!(matches!(
            payload.into_group(),
            Err(RequestError::MissingField("version"))
        ));

        let payload: GroupPayload = serde_json::from_str(r#"{"version": "v1"}"#).unwrap();
        assert!(matches!(
            payload.into_group(),
            Err(RequestError::MissingField("configs"))
        ));

        let payload: GroupPayload =
            serde_json::from_str(r#"{"version": "v1", "configs": null}"#).unwrap();
        assert!(payload.into_group().is_err());

        let payload: GroupPayload = serde_json::from_str(
            r#"{"version": "v1", "configs": [{"labele": {"env": "prod"}, "entries": {}}]}"#,
        )
        .unwrap();
        let group = payload.into_group().unwrap();
        assert_eq!(group.version, "v1");
        assert_eq!(group.configs[0].labels["env"], "prod");
    }
}

//! Request extractors that report failures as `ApiError`.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::common::{ApiError, Id};

/// JSON body whose rejections become 422 validation errors on `body`.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::validation("body", rejection.body_text())
}

/// Parse a path segment as a typed id. Malformed ids are reported as missing.
pub fn parse_id<T, V>(raw: &str, resource: &'static str) -> Result<Id<T, V>, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EBazaarId;

    #[test]
    fn test_parse_id_rejects_garbage_as_not_found() {
        let result: Result<EBazaarId, ApiError> = parse_id("not-a-uuid", "E-Bazaar");
        assert!(matches!(result, Err(ApiError::NotFound("E-Bazaar"))));
    }

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = EBazaarId::new();
        let parsed: EBazaarId = parse_id(&id.to_string(), "E-Bazaar").unwrap();
        assert_eq!(parsed, id);
    }
}

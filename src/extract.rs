use axum::extract::FromRequest;

use crate::errors::ApiError;

/// JSON request body whose rejections are reported as [`ApiError::InvalidBody`]
///
/// Malformed JSON, a wrong content type or a field of the wrong type answer
/// `400` with the usual `{"error": ...}` body instead of axum's plain-text
/// rejection.
#[derive(FromRequest, Debug, Clone)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::UpdateCoinsPerMinuteDto;
    use axum::body::Body;
    use axum::http::Request;

    fn request(content_type: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/")
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = request("application/json", r#"{"userId":"u1","coinMin":5}"#);

        let JsonBody(dto) = JsonBody::<UpdateCoinsPerMinuteDto>::from_request(req, &()).await.unwrap();

        assert_eq!(dto.user_id.as_deref(), Some("u1"));
        assert_eq!(dto.coin_min, Some(Some(5.0)));
    }

    #[tokio::test]
    async fn test_wrongly_typed_field() {
        let req = request("application/json", r#"{"userId":"u1","coinMin":"5"}"#);

        let result = JsonBody::<UpdateCoinsPerMinuteDto>::from_request(req, &()).await;

        match result {
            Err(ApiError::InvalidBody(message)) => assert!(message.contains("coinMin")),
            other => panic!("expected an invalid body error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let req = request("application/json", "{not json");

        let result = JsonBody::<UpdateCoinsPerMinuteDto>::from_request(req, &()).await;

        assert!(matches!(result, Err(ApiError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = request("text/plain", "{}");

        let result = JsonBody::<UpdateCoinsPerMinuteDto>::from_request(req, &()).await;

        assert!(matches!(result, Err(ApiError::InvalidBody(_))));
    }
}

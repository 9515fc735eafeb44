//! Error taxonomy for the storefront API client.

use thiserror::Error;

/// Errors surfaced by [`super::ApiClient`] operations.
///
/// Transport failures and non-2xx statuses are mapped here instead of leaking
/// `reqwest` errors to callers. The cache layer stores these alongside the
/// last known good data, so views can render an inline retry affordance.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Transport-level failure (DNS, connect, TLS, timeout).
  #[error("network error: {0}")]
  Network(String),

  /// The backend answered with a non-2xx status.
  #[error("{status} {status_text}")]
  Http { status: u16, status_text: String },

  /// 404 from the product detail endpoint. The message is the backend's
  /// `detail` field, verbatim.
  #[error("{detail}")]
  NotFound { detail: String },

  /// Client-side input validation, never sent to the backend.
  #[error("{0}")]
  Validation(String),

  /// The response body could not be decoded into the expected shape.
  #[error("failed to decode response: {0}")]
  Decode(String),
}

impl ApiError {
  /// Build the error for a failed HTTP response.
  ///
  /// `not_found_body` carries the response body when the status was 404 and
  /// the endpoint reports missing entities via `{"detail": "..."}`.
  pub fn from_status(status: reqwest::StatusCode, not_found_body: Option<&str>) -> Self {
    if status == reqwest::StatusCode::NOT_FOUND {
      if let Some(body) = not_found_body {
        let detail = serde_json::from_str::<NotFoundBody>(body)
          .map(|b| b.detail)
          .unwrap_or_else(|_| "Not found".to_string());
        return ApiError::NotFound { detail };
      }
    }

    ApiError::Http {
      status: status.as_u16(),
      status_text: status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string(),
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, ApiError::NotFound { .. })
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      ApiError::Decode(err.to_string())
    } else {
      ApiError::Network(err.to_string())
    }
  }
}

/// Error body shape used by the backend for 404 responses.
#[derive(Debug, serde::Deserialize)]
struct NotFoundBody {
  detail: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use reqwest::StatusCode;

  #[test]
  fn test_not_found_carries_backend_detail_verbatim() {
    let err = ApiError::from_status(
      StatusCode::NOT_FOUND,
      Some(r#"{"detail": "Product with id 42 not found"}"#),
    );
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Product with id 42 not found");
  }

  #[test]
  fn test_not_found_with_malformed_body_falls_back() {
    let err = ApiError::from_status(StatusCode::NOT_FOUND, Some("<html>nope</html>"));
    assert_eq!(err.to_string(), "Not found");
  }

  #[test]
  fn test_non_404_maps_to_http_error() {
    let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
    match err {
      ApiError::Http { status, status_text } => {
        assert_eq!(status, 500);
        assert_eq!(status_text, "Internal Server Error");
      }
      other => panic!("expected Http error, got {:?}", other),
    }
  }

  #[test]
  fn test_404_without_detail_body_is_http_error() {
    let err = ApiError::from_status(StatusCode::NOT_FOUND, None);
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
  }
}

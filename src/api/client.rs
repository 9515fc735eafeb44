//! Storefront API client wrapper.

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::config::Config;

use super::error::ApiError;
use super::types::{
  Cart, ChatQuery, ChatReply, Order, Product, ProductFilters, ProductPage, Voucher,
};

/// Thin typed wrapper over the storefront's HTTP endpoints.
///
/// All operations are async and surface failures as [`ApiError`] variants.
/// Timeouts and retries are left to the transport defaults; the query cache
/// layer above decides when to re-issue requests.
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: Url,
}

impl ApiClient {
  pub fn new(config: &Config) -> Result<Self, ApiError> {
    let base_url = Url::parse(&config.api.base_url)
      .map_err(|e| ApiError::Validation(format!("invalid base URL {}: {}", config.api.base_url, e)))?;
    if base_url.cannot_be_a_base() {
      return Err(ApiError::Validation(format!(
        "base URL cannot hold paths: {}",
        config.api.base_url
      )));
    }

    let http = reqwest::Client::builder()
      .user_agent(concat!("shoply/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self { http, base_url })
  }

  /// The configured backend base URL.
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  fn endpoint(&self, path: &str) -> Url {
    let mut url = self.base_url.clone();
    // Url::join would drop any base path segment, so extend in place.
    url
      .path_segments_mut()
      .expect("base URL validated at construction")
      .pop_if_empty()
      .extend(path.split('/'));
    url
  }

  /// Paged, filtered product listing.
  pub async fn list_products(&self, filters: &ProductFilters) -> Result<ProductPage, ApiError> {
    let mut url = self.endpoint("user/products");
    {
      let mut pairs = url.query_pairs_mut();
      for (name, value) in filters.query_pairs() {
        pairs.append_pair(name, &value);
      }
    }

    let response = self.get(url).await?;
    decode(check_status(response, false).await?).await
  }

  /// Full detail for a single product. 404 maps to [`ApiError::NotFound`]
  /// carrying the backend's `detail` message.
  pub async fn get_product(&self, id: u64) -> Result<Product, ApiError> {
    let url = self.endpoint(&format!("user/products/{}", id));
    let response = self.get(url).await?;
    decode(check_status(response, true).await?).await
  }

  /// Current cart snapshot.
  pub async fn get_cart(&self) -> Result<Cart, ApiError> {
    let response = self.get(self.endpoint("user/cart")).await?;
    decode(check_status(response, false).await?).await
  }

  /// Order history for the session.
  pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
    let response = self.get(self.endpoint("user/orders")).await?;
    decode(check_status(response, false).await?).await
  }

  /// Send a chat query to the conversational assistant.
  ///
  /// Pass the `session_id` from the previous reply to keep the conversation
  /// going; the backend owns the conversation state.
  pub async fn send_chat_message(
    &self,
    text: &str,
    session_id: Option<&str>,
  ) -> Result<ChatReply, ApiError> {
    let url = self.endpoint("user/query");
    let body = ChatQuery {
      query: text,
      session_id,
    };

    let response = self
      .http
      .post(url.clone())
      .json(&body)
      .send()
      .await
      .map_err(|e| {
        warn!(url = %url, error = %e, "chat request failed");
        ApiError::Network(e.to_string())
      })?;

    decode(check_status(response, false).await?).await
  }

  /// Issue a new voucher.
  pub async fn generate_voucher(&self) -> Result<Voucher, ApiError> {
    let url = self.endpoint("user/vouchers/generate");
    let response = self.http.post(url.clone()).send().await.map_err(|e| {
      warn!(url = %url, error = %e, "voucher request failed");
      ApiError::Network(e.to_string())
    })?;

    decode(check_status(response, false).await?).await
  }

  async fn get(&self, url: Url) -> Result<Response, ApiError> {
    self.http.get(url.clone()).send().await.map_err(|e| {
      warn!(url = %url, error = %e, "request failed");
      ApiError::Network(e.to_string())
    })
  }
}

/// Map a non-2xx response to the right [`ApiError`] variant.
///
/// When `detail_on_404` is set, a 404 body is parsed for the backend's
/// `{"detail": ...}` message (the product detail endpoint's contract).
async fn check_status(response: Response, detail_on_404: bool) -> Result<Response, ApiError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  warn!(status = %status, url = %response.url(), "backend returned error status");

  if detail_on_404 && status == reqwest::StatusCode::NOT_FOUND {
    let body = response.text().await.unwrap_or_default();
    return Err(ApiError::from_status(status, Some(&body)));
  }

  Err(ApiError::from_status(status, None))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
  response
    .json::<T>()
    .await
    .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;

  fn client_for(base: &str) -> ApiClient {
    let mut config = Config::default();
    config.api.base_url = base.to_string();
    ApiClient::new(&config).unwrap()
  }

  #[test]
  fn test_endpoint_joins_paths() {
    let client = client_for("https://shop.example.com");
    assert_eq!(
      client.endpoint("user/products/3").as_str(),
      "https://shop.example.com/user/products/3"
    );
  }

  #[test]
  fn test_endpoint_preserves_base_path() {
    let client = client_for("https://shop.example.com/api/v1");
    assert_eq!(
      client.endpoint("user/cart").as_str(),
      "https://shop.example.com/api/v1/user/cart"
    );
  }

  #[test]
  fn test_product_listing_query_string() {
    let client = client_for("https://shop.example.com");
    let filters = ProductFilters {
      search: Some("shoes".to_string()),
      min_price: Some(20.0),
      max_price: Some(100.0),
      ..Default::default()
    };

    let mut url = client.endpoint("user/products");
    {
      let mut pairs = url.query_pairs_mut();
      for (name, value) in filters.query_pairs() {
        pairs.append_pair(name, &value);
      }
    }

    assert_eq!(
      url.query(),
      Some("is_active=true&page=1&page_size=20&search=shoes&min_price=20&max_price=100")
    );
  }

  #[test]
  fn test_invalid_base_url_is_rejected() {
    let mut config = Config::default();
    config.api.base_url = "not a url".to_string();
    assert!(ApiClient::new(&config).is_err());
  }
}

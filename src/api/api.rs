use super::{GiftsAPIBuilder, ReservationService, StatusResponse};
use crate::enums::ReservationStatus;
use crate::error::Error;
use crate::helpers::parses_response;
use crate::types::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use url::{ParseError, Url};

/// HTTP client for the gift service.
#[derive(Debug, Clone)]
pub struct GiftsAPI {
    pub(crate) client: HttpClient,
    pub(crate) base_url: Url,
}

impl GiftsAPI {
    /// Creates a new [`GiftsAPIBuilder`].
    pub fn builder() -> GiftsAPIBuilder {
        GiftsAPIBuilder::new()
    }
    
    /// The base URL requests are made against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
    
    /// Builds `{base}/gifts/{id}` followed by `extra` segments. The id is encoded as a single
    /// path segment.
    fn get_url(
        &self,
        id: &str,
        extra: &[&str],
    ) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        
        url.path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("gifts")
            .push(id)
            .extend(extra);
        
        Ok(url)
    }
    
    /// Gets the status of a listing.
    pub async fn get_status(
        &self,
        id: &str,
    ) -> Result<ReservationStatus, Error> {
        let url = self.get_url(id, &[])?;
        
        log::debug!("GET {url}");
        
        let response = self.client.get(url)
            .send()
            .await?;
        let body: StatusResponse = parses_response(response).await?;
        
        body.into_status()
    }
    
    /// Flips the status of a listing and returns the status the service now holds.
    pub async fn toggle_status(
        &self,
        id: &str,
    ) -> Result<ReservationStatus, Error> {
        let url = self.get_url(id, &["toggle"])?;
        
        log::debug!("POST {url}");
        
        let response = self.client.post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        let body: StatusResponse = parses_response(response).await?;
        
        body.into_status()
    }
}

#[async_trait]
impl ReservationService for GiftsAPI {
    async fn status(&self, id: &str) -> Result<ReservationStatus, Error> {
        self.get_status(id).await
    }
    
    async fn toggle(&self, id: &str) -> Result<ReservationStatus, Error> {
        self.toggle_status(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    
    fn api(base_url: &str) -> GiftsAPI {
        GiftsAPI::builder()
            .base_url(base_url)
            .build()
            .unwrap()
    }
    
    #[test]
    fn builds_status_url() {
        let url = api("https://gifts.example.com").get_url("42", &[]).unwrap();
        
        assert_eq!(url.as_str(), "https://gifts.example.com/gifts/42");
    }
    
    #[test]
    fn builds_toggle_url_under_base_path() {
        let url = api("http://127.0.0.1:8080/registry/").get_url("42", &["toggle"]).unwrap();
        
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/registry/gifts/42/toggle");
    }
    
    #[test]
    fn encodes_id_as_one_segment() {
        let url = api("https://gifts.example.com").get_url("a/b c", &["toggle"]).unwrap();
        
        assert_eq!(url.as_str(), "https://gifts.example.com/gifts/a%2Fb%20c/toggle");
    }
    
    async fn serve(http_method: &str, route: &str, response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        
        server
    }
    
    #[tokio::test]
    async fn gets_status() {
        let server = serve("GET", "/gifts/42", ResponseTemplate::new(200)
            .set_body_string(r#"{"status":"bought"}"#)).await;
        let status = api(&server.uri()).get_status("42").await.unwrap();
        
        assert_eq!(status, ReservationStatus::Bought);
    }
    
    #[tokio::test]
    async fn toggles_with_empty_json_request() {
        let server = MockServer::start().await;
        
        Mock::given(method("POST"))
            .and(path("/gifts/42/toggle"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_string(r#"{"status":"unbought"}"#))
            .expect(1)
            .mount(&server)
            .await;
        
        let status = api(&server.uri()).toggle_status("42").await.unwrap();
        let requests = server.received_requests().await.unwrap();
        
        assert_eq!(status, ReservationStatus::Unbought);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
    }
    
    #[tokio::test]
    async fn error_status_is_http_error() {
        let server = serve("GET", "/gifts/42", ResponseTemplate::new(500)
            .set_body_string(r#"{"status":"bought"}"#)).await;
        let error = api(&server.uri()).get_status("42").await.unwrap_err();
        
        assert!(matches!(error, Error::Http(StatusCode::INTERNAL_SERVER_ERROR)));
    }
    
    #[tokio::test]
    async fn success_status_other_than_ok_is_http_error() {
        let server = serve("POST", "/gifts/42/toggle", ResponseTemplate::new(201)
            .set_body_string(r#"{"status":"bought"}"#)).await;
        let error = api(&server.uri()).toggle_status("42").await.unwrap_err();
        
        assert!(matches!(error, Error::Http(StatusCode::CREATED)));
    }
    
    #[tokio::test]
    async fn unknown_status_is_invalid() {
        let server = serve("GET", "/gifts/42", ResponseTemplate::new(200)
            .set_body_string(r#"{"status":"ubought"}"#)).await;
        let error = api(&server.uri()).get_status("42").await.unwrap_err();
        
        assert!(matches!(error, Error::InvalidStatus(ref status) if status == "ubought"));
        assert!(error.is_contract_violation());
    }
    
    #[tokio::test]
    async fn unparsable_body_is_parse_error() {
        let server = serve("GET", "/gifts/42", ResponseTemplate::new(200)
            .set_body_string("<html>Bad Gateway</html>")).await;
        let error = api(&server.uri()).get_status("42").await.unwrap_err();
        
        assert!(matches!(error, Error::Parse(_)));
    }
}

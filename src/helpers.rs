use crate::error::Error;
use crate::types::HttpClient;
use reqwest::{header, StatusCode};
use reqwest_middleware::ClientBuilder;
use serde::de::DeserializeOwned;

pub const USER_AGENT_STRING: &str = concat!("gift-item/", env!("CARGO_PKG_VERSION"));

/// Creates the default client. No retry middleware is attached: toggles are not idempotent, so
/// retrying is left to the caller.
pub fn get_default_middleware(user_agent_string: &'static str) -> Result<HttpClient, Error> {
    let mut headers = header::HeaderMap::new();
    
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));
    
    let client = reqwest::ClientBuilder::new()
        .default_headers(headers)
        .build()?;
    
    Ok(ClientBuilder::new(client).build())
}

/// Returns the body of a response. The service answers `200 OK`; any other status is an error.
pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let status = response.status();
    
    if status != StatusCode::OK {
        return Err(Error::Http(status));
    }
    
    Ok(response.bytes().await?)
}

/// Checks the status of a response and deserializes its body.
pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;
    
    match serde_json::from_slice::<D>(&body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            log::debug!("Unexpected response body: {}", String::from_utf8_lossy(&body));
            Err(Error::Parse(parse_error))
        },
    }
}

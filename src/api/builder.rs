use super::{GiftsAPI, DEFAULT_BASE_URL};
use crate::error::Error;
use crate::helpers::{get_default_middleware, USER_AGENT_STRING};
use crate::types::HttpClient;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

/// Builder for constructing a [`GiftsAPI`].
#[derive(Debug, Clone)]
pub struct GiftsAPIBuilder {
    /// Where the gift service is hosted.
    pub(crate) base_url: String,
    /// Client to use for requests.
    pub(crate) client: Option<HttpClient>,
    /// User agent for requests. Ignored if a client is supplied.
    pub(crate) user_agent: &'static str,
}

impl Default for GiftsAPIBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            client: None,
            user_agent: USER_AGENT_STRING,
        }
    }
}

impl GiftsAPIBuilder {
    /// Creates a new [`GiftsAPIBuilder`].
    pub fn new() -> Self {
        Self::default()
    }
    
    /// The location of the gift service. Any path is kept and `gifts/{id}` is appended to it.
    pub fn base_url<T>(mut self, base_url: T) -> Self
    where
        T: Into<String>,
    {
        self.base_url = base_url.into();
        self
    }
    
    /// Client to use for requests.
    pub fn client(mut self, client: ClientWithMiddleware) -> Self {
        self.client = Some(client);
        self
    }
    
    /// User agent for requests.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }
    
    /// Builds the [`GiftsAPI`].
    pub fn build(self) -> Result<GiftsAPI, Error> {
        let base_url = Url::parse(&self.base_url)?;
        let client = match self.client {
            Some(client) => client,
            None => get_default_middleware(self.user_agent)?,
        };
        
        Ok(GiftsAPI {
            client,
            base_url,
        })
    }
}

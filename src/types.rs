//! Types for common values.

/// Opaque identifier of a listing on the gift service. Only used for network calls, never
/// rendered.
pub type ListingId = String;

// Types internally used by the crate.
use reqwest_middleware::ClientWithMiddleware;

pub(crate) type HttpClient = ClientWithMiddleware;

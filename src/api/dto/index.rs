//! DTOs for the service index endpoint.

use serde::{Deserialize, Serialize};

/// Query string of `GET /`; carries the error flag set by failed redirects.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

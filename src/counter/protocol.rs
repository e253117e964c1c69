//! Counter HTTP Protocol
//!
//! Endpoints and Data Transfer Objects for the two counter queries. Field
//! names follow the public JSON contract (`searchText`, `resourceName`).

use super::types::WordCount;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Word occurrence lookup (POST, JSON in / JSON out).
pub const ENDPOINT_SEARCH: &str = "/counter-api/search";
/// Most frequent words (GET, CSV out). `:count` is the number of rows.
pub const ENDPOINT_TOP: &str = "/counter-api/top/:count";

/// Content type of the top-N response.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

// --- Data Transfer Objects ---

/// Body of a search request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Words to count, in the order the results should come back.
    #[serde(rename = "searchText")]
    pub search_text: Vec<String>,
    /// Resource to search; the configured default when absent.
    #[serde(rename = "resourceName", default)]
    pub resource_name: Option<String>,
}

/// Response to a search request: one `{"<word>": <count>}` object per
/// requested word.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub counts: Vec<WordCount>,
}

/// Query string of a top-N request.
#[derive(Debug, Default, Deserialize)]
pub struct TopParams {
    #[serde(rename = "resourceName")]
    pub resource_name: Option<String>,
}

/// Error body returned for failed queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Renders top-N rows as `word|count` records, each terminated by CRLF.
pub fn encode_csv(entries: &[WordCount]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.word);
        out.push('|');
        out.push_str(&entry.count.to_string());
        out.push_str("\r\n");
    }
    out
}

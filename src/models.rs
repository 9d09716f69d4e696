//! Core data types shared by the search gateway, the CLI, and the
//! frontend proxy.

use serde::Serialize;
use serde_json::Value;

/// Default page size when the client sends no (or an unparseable) `limit`.
pub const DEFAULT_LIMIT: u32 = 20;
/// Default result offset.
pub const DEFAULT_OFFSET: u32 = 0;
/// Upper bound applied to client-supplied `limit` values. Larger requests
/// are served at this size; the index applies its own caps below it.
pub const MAX_LIMIT: u32 = 1000;

/// A fully normalized search request, ready to send to the index.
///
/// `limit` and `offset` are non-negative by construction. The optional
/// fields are opaque pass-through values: the gateway never interprets
/// filter or sort syntax, it only forwards them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub index: String,
    pub limit: u32,
    pub offset: u32,
    pub filter: Option<Value>,
    pub sort: Option<Value>,
    pub attributes_to_retrieve: Option<Value>,
    pub attributes_to_highlight: Option<Value>,
}

/// Minimal public projection of an index: its uid and primary key,
/// nothing else. Settings, document counts, and ranking rules are
/// deliberately withheld from the public surface.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexDescriptor {
    pub uid: String,
    #[serde(rename = "primaryKey")]
    pub primary_key: Option<String>,
}

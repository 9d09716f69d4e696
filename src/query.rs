//! Query normalization: the trust boundary between raw client input and
//! typed search requests.
//!
//! Both entry points are total — malformed or missing fields degrade to
//! documented defaults, never to an error. The search surface interprets
//! input leniently instead of rejecting it.
//!
//! The GET and POST variants are deliberately distinct: GET reads only
//! `q`/`query`, `index`, `limit`, and `offset`; POST additionally passes
//! `filter`, `sort`, `attributesToRetrieve`, and `attributesToHighlight`
//! through to the index untouched.

use serde_json::Value;
use std::collections::HashMap;

use crate::models::{SearchRequest, DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT};

impl SearchRequest {
    /// Normalize GET query-string parameters.
    ///
    /// Accepts `q` (primary) or `query` (fallback) for the query text.
    /// Filter, sort, and projection fields are not part of the GET
    /// vocabulary and are ignored even if present.
    pub fn from_query_params(params: &HashMap<String, String>, default_index: &str) -> Self {
        let query = params
            .get("q")
            .or_else(|| params.get("query"))
            .cloned()
            .unwrap_or_default();

        Self {
            query,
            index: pick_index(params.get("index").map(String::as_str), default_index),
            limit: parse_limit(params.get("limit").map(String::as_str)),
            offset: parse_offset(params.get("offset").map(String::as_str)),
            filter: None,
            sort: None,
            attributes_to_retrieve: None,
            attributes_to_highlight: None,
        }
    }

    /// Normalize a POST JSON body.
    ///
    /// Numeric fields are accepted as JSON numbers or numeric strings.
    /// A non-object body normalizes to the defaults wholesale.
    pub fn from_body(body: &Value, default_index: &str) -> Self {
        let query = body
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            query,
            index: pick_index(body.get("index").and_then(Value::as_str), default_index),
            limit: parse_limit_value(body.get("limit")),
            offset: parse_offset_value(body.get("offset")),
            filter: body.get("filter").cloned(),
            sort: body.get("sort").cloned(),
            attributes_to_retrieve: body.get("attributesToRetrieve").cloned(),
            attributes_to_highlight: body.get("attributesToHighlight").cloned(),
        }
    }
}

fn pick_index(raw: Option<&str>, default_index: &str) -> String {
    match raw {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default_index.to_string(),
    }
}

/// Base-10 parse with lenient fallback: absent, non-numeric, or negative
/// input yields the default. Values above [`MAX_LIMIT`] are clamped.
fn parse_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT)
}

fn parse_offset(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_OFFSET)
}

fn parse_limit_value(raw: Option<&Value>) -> u32 {
    parse_u32_value(raw).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

fn parse_offset_value(raw: Option<&Value>) -> u32 {
    parse_u32_value(raw).unwrap_or(DEFAULT_OFFSET)
}

fn parse_u32_value(raw: Option<&Value>) -> Option<u32> {
    match raw? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.parse::<u32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_params_normalize_to_defaults() {
        let req = SearchRequest::from_query_params(&HashMap::new(), "ebooks");
        assert_eq!(req.query, "");
        assert_eq!(req.index, "ebooks");
        assert_eq!(req.limit, DEFAULT_LIMIT);
        assert_eq!(req.offset, DEFAULT_OFFSET);
        assert!(req.filter.is_none());
    }

    #[test]
    fn q_takes_precedence_over_query() {
        let req =
            SearchRequest::from_query_params(&params(&[("q", "rust"), ("query", "go")]), "ebooks");
        assert_eq!(req.query, "rust");
    }

    #[test]
    fn query_key_is_accepted_when_q_is_absent() {
        let req = SearchRequest::from_query_params(&params(&[("query", "rust")]), "ebooks");
        assert_eq!(req.query, "rust");
    }

    #[test]
    fn non_numeric_limit_and_offset_fall_back() {
        let req = SearchRequest::from_query_params(
            &params(&[("limit", "lots"), ("offset", "-3")]),
            "ebooks",
        );
        assert_eq!(req.limit, DEFAULT_LIMIT);
        assert_eq!(req.offset, DEFAULT_OFFSET);
    }

    #[test]
    fn limit_is_clamped_to_max() {
        let req = SearchRequest::from_query_params(&params(&[("limit", "999999")]), "ebooks");
        assert_eq!(req.limit, MAX_LIMIT);
    }

    #[test]
    fn explicit_values_are_kept() {
        let req = SearchRequest::from_query_params(
            &params(&[("q", "test"), ("limit", "5"), ("offset", "10")]),
            "ebooks",
        );
        assert_eq!(req.limit, 5);
        assert_eq!(req.offset, 10);
    }

    #[test]
    fn empty_index_param_falls_back_to_default() {
        let req = SearchRequest::from_query_params(&params(&[("index", "")]), "ebooks");
        assert_eq!(req.index, "ebooks");
    }

    #[test]
    fn get_variant_ignores_filter_fields() {
        let req =
            SearchRequest::from_query_params(&params(&[("filter", "year > 2000")]), "ebooks");
        assert!(req.filter.is_none());
    }

    #[test]
    fn body_passes_filter_sort_and_projections_through() {
        let body = json!({
            "query": "test",
            "filter": "year > 2000",
            "sort": ["title:asc"],
            "attributesToRetrieve": ["title", "authors"],
            "attributesToHighlight": ["title"],
        });
        let req = SearchRequest::from_body(&body, "ebooks");
        assert_eq!(req.filter, Some(json!("year > 2000")));
        assert_eq!(req.sort, Some(json!(["title:asc"])));
        assert_eq!(req.attributes_to_retrieve, Some(json!(["title", "authors"])));
        assert_eq!(req.attributes_to_highlight, Some(json!(["title"])));
    }

    #[test]
    fn body_accepts_numbers_and_numeric_strings() {
        let req = SearchRequest::from_body(&json!({"limit": 5, "offset": "10"}), "ebooks");
        assert_eq!(req.limit, 5);
        assert_eq!(req.offset, 10);
    }

    #[test]
    fn body_with_garbage_numerics_falls_back() {
        let req =
            SearchRequest::from_body(&json!({"limit": "many", "offset": -7, "query": 42}), "ebooks");
        assert_eq!(req.limit, DEFAULT_LIMIT);
        assert_eq!(req.offset, DEFAULT_OFFSET);
        assert_eq!(req.query, "");
    }

    #[test]
    fn non_object_body_normalizes_to_defaults() {
        let req = SearchRequest::from_body(&json!("just a string"), "ebooks");
        assert_eq!(req.query, "");
        assert_eq!(req.index, "ebooks");
        assert_eq!(req.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = SearchRequest::from_query_params(
            &params(&[("q", "test"), ("limit", "7"), ("offset", "3")]),
            "ebooks",
        );
        let again = SearchRequest::from_query_params(
            &params(&[
                ("q", first.query.as_str()),
                ("limit", &first.limit.to_string()),
                ("offset", &first.offset.to_string()),
                ("index", first.index.as_str()),
            ]),
            "ebooks",
        );
        assert_eq!(first, again);
    }
}

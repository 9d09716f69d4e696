//! CLI search and index-listing commands.
//!
//! These go straight to the index client, sharing the gateway's request
//! types, so a search from the terminal and a search through the HTTP
//! surface normalize identically.

use anyhow::Result;
use serde_json::Value;

use crate::config::Config;
use crate::index_client::IndexClient;
use crate::models::{SearchRequest, DEFAULT_LIMIT, DEFAULT_OFFSET};

pub async fn run_search(
    config: &Config,
    query: &str,
    index: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<()> {
    let client = IndexClient::new(&config.index)?;

    let req = SearchRequest {
        query: query.to_string(),
        index: index.unwrap_or_else(|| config.index.default_index.clone()),
        limit: limit.unwrap_or(DEFAULT_LIMIT),
        offset: offset.unwrap_or(DEFAULT_OFFSET),
        filter: None,
        sort: None,
        attributes_to_retrieve: None,
        attributes_to_highlight: None,
    };

    let results = client.search(&req).await?;

    let hits = results
        .get("hits")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let total = results
        .get("estimatedTotalHits")
        .and_then(Value::as_u64)
        .unwrap_or(hits.len() as u64);
    let time_ms = results
        .get("processingTimeMs")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    println!(
        "{} hits (showing {} from offset {}, {} ms)\n",
        total,
        hits.len(),
        req.offset,
        time_ms
    );

    for (i, hit) in hits.iter().enumerate() {
        let title = hit
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("(untitled)");
        println!("{}. {}", req.offset as usize + i + 1, title);

        if let Some(authors) = hit.get("authors") {
            match authors {
                Value::Array(list) => {
                    let joined: Vec<&str> = list.iter().filter_map(Value::as_str).collect();
                    if !joined.is_empty() {
                        println!("   by {}", joined.join(", "));
                    }
                }
                Value::String(s) => println!("   by {}", s),
                _ => {}
            }
        }

        if let Some(id) = hit
            .get("content_id")
            .or_else(|| hit.get("id"))
            .and_then(Value::as_str)
        {
            println!("   id: {}", id);
        }
    }

    Ok(())
}

pub async fn run_list_indexes(config: &Config) -> Result<()> {
    let client = IndexClient::new(&config.index)?;
    let indexes = client.list_indexes().await?;

    if indexes.is_empty() {
        println!("No indexes.");
        return Ok(());
    }

    for descriptor in indexes {
        match descriptor.primary_key {
            Some(pk) => println!("{} (primary key: {})", descriptor.uid, pk),
            None => println!("{} (no primary key)", descriptor.uid),
        }
    }

    Ok(())
}

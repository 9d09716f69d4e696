//! # pdfshelf
//!
//! A full-text PDF catalogue composed of small read-only services behind
//! one binary: a search gateway in front of an external
//! Meilisearch-compatible index, a pair of blob servers for the stored
//! PDFs and thumbnails, and a frontend proxy for browser clients.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────┐
//!  browser ─────────▶│   frontend    │──▶ /search ─┐
//!                    │  (/api/search)│            │
//!                    └──────────────┘            ▼
//!                    ┌──────────────┐   ┌──────────────┐
//!  client ──────────▶│   gateway     │──▶│ external     │
//!                    │ GET/POST      │   │ index        │
//!                    │ /search       │   │ (Meilisearch)│
//!                    └──────────────┘   └──────────────┘
//!                    ┌──────────────┐
//!  client ──────────▶│ blob servers  │──▶ <root>/<id>.{pdf,png}
//!                    │ GET /{id}     │
//!                    └──────────────┘
//! ```
//!
//! The system is read-only: storage directories and the index are
//! pre-populated, and no request mutates anything. Handlers share no
//! mutable state, so every request runs independently.
//!
//! ## Quick Start
//!
//! ```bash
//! pdfshelf serve api          # search gateway
//! pdfshelf serve documents    # PDF blob server
//! pdfshelf serve thumbnails   # thumbnail blob server
//! pdfshelf serve frontend     # browser-facing proxy
//! pdfshelf search "rust"      # query the index from the terminal
//! pdfshelf indexes            # list index descriptors
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`query`] | Raw-parameter normalization into [`models::SearchRequest`] |
//! | [`index_client`] | Client for the external index |
//! | [`gateway`] | Search gateway HTTP server |
//! | [`blob`] | Identifier validation and blob resolution |
//! | [`blob_server`] | PDF/thumbnail HTTP server |
//! | [`frontend`] | Browser-facing proxy server |
//! | [`search`] | CLI search commands |

pub mod blob;
pub mod blob_server;
pub mod config;
pub mod frontend;
pub mod gateway;
pub mod http_error;
pub mod index_client;
pub mod models;
pub mod query;
pub mod search;

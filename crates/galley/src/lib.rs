//! Galley - Recipe Search Service
//!
//! A small recipe-search service providing title autocomplete, fuzzy
//! full-text search, vector similarity search, and an offline embedding
//! backfill job over a recipe store.

pub mod backfill;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod fuzzy;
pub mod recipe;
pub mod server;
pub mod similarity;
pub mod store;

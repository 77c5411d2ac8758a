//! GitHub content adapter

pub mod client;

pub use client::GitHubContentClient;

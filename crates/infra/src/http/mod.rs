//! Thin reqwest wrapper shared by the request client

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};

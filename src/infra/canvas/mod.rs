mod client;

pub use client::CanvasHttpClient;

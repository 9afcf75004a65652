//! HTTP adapter for the shortener API.

pub mod dto;
mod gateway;

pub use gateway::HttpGateway;

//! The HTTP seam of the client.
//!
//! [`WeatherClient`](crate::WeatherClient) never talks to reqwest directly; it
//! hands a [`TransportRequest`] to an [`HttpTransport`] and reads the body back
//! through [`ResponseBody`]. Tests swap in their own transport to observe
//! requests and connection release.

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header::HeaderMap};

use crate::WeatherError;

/// A fully-built GET request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: Url,
    pub headers: HeaderMap,
}

/// Status plus a body that has not been read yet.
///
/// Dropping the response releases the underlying connection.
#[derive(Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Box<dyn ResponseBody>,
}

#[async_trait]
pub trait ResponseBody: Send + Debug {
    async fn read_to_end(&mut self) -> Result<Vec<u8>, WeatherError>;
}

#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, WeatherError>;
}

/// Default transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, WeatherError> {
        let res = self
            .http
            .get(request.url)
            .headers(request.headers)
            .send()
            .await?;

        Ok(TransportResponse {
            status: res.status(),
            body: Box::new(ReqwestBody(res)),
        })
    }
}

#[derive(Debug)]
struct ReqwestBody(reqwest::Response);

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn read_to_end(&mut self) -> Result<Vec<u8>, WeatherError> {
        let mut buf = Vec::new();
        while let Some(chunk) = self.0.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf)
    }
}

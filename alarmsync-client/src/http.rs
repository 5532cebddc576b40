use std::sync::Arc;

use alarmsync_api::routes;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::context::SessionContext;
use crate::error::{Result, TransportError};

/// Thin JSON wrapper over `reqwest` that resolves paths against the context's
/// current backend and attaches the stored session token.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    context: Arc<SessionContext>,
}

impl HttpClient {
    pub fn new(context: Arc<SessionContext>) -> Result<Self> {
        let client = Client::builder()
            .timeout(context.api().timeout())
            .connect_timeout(context.api().connect_timeout())
            .build()?;

        Ok(Self { client, context })
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    pub fn url(&self, path: &str) -> String {
        routes::join(self.context.base_url(), path)
    }

    /// Request without credentials.
    pub fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "preparing request");

        self.client.request(method, url)
    }

    /// Request carrying the stored token as a bearer credential, if any.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.public_request(method, path);

        Ok(match self.context.token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, TransportError> {
        let body = self.send(builder).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Sends and accepts any 2xx response, ignoring the body.
    pub async fn send_ack(&self, builder: RequestBuilder) -> Result<(), TransportError> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, TransportError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}

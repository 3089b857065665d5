use super::HttpClientError;
use crate::prelude::*;
use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use easy_ext::ext;
use reqwest::Response;
use reqwest_middleware::RequestBuilder;
use serde::de::DeserializeOwned;

#[ext(RequestBuilderExt)]
#[async_trait]
pub(crate) impl RequestBuilder {
    /// Same as [`RequestBuilder::send`], but a 4xx or 5xx status code is
    /// turned into [`HttpClientError::BadResponseStatusCode`].
    async fn try_send(self) -> Result<Response> {
        let response = self.send().await.map_err(err_ctx!(HttpClientError::Request))?;

        let status = response.status();

        if !status.is_client_error() && !status.is_server_error() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => format!("<failed to read the body: {}>", err.display_chain()),
        };

        Err(err!(HttpClientError::BadResponseStatusCode { status, body }))
    }

    async fn read_bytes(self) -> Result<Bytes> {
        self.try_send()
            .await?
            .bytes()
            .await
            .map_err(err_ctx!(HttpClientError::ReadPayload))
    }

    async fn read_json<Res: DeserializeOwned>(self) -> Result<Res> {
        let bytes = self.read_bytes().await?;

        serde_json::from_slice(&bytes).map_err(|source| {
            let response_body = String::from_utf8_lossy(&bytes);
            warn!(%response_body, "Response JSON has unexpected shape");
            err!(HttpClientError::UnexpectedResponseJsonShape { source })
        })
    }
}

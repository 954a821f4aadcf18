//! Request helpers shared by the gateway calls.

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use list_sync::GatewayError;

use super::HttpGateway;

impl HttpGateway {
    pub(super) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.client.get(self.url(path)).send().await.map_err(transport)?;
        decode(check(response)?).await
    }

    /// List endpoints answer `null` when nothing matches.
    pub(super) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GatewayError> {
        let list: Option<Vec<T>> = self.get_json(path).await?;
        Ok(list.unwrap_or_default())
    }

    pub(super) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(check(response)?).await
    }

    pub(super) async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        let response = self.client.delete(self.url(path)).send().await.map_err(transport)?;
        check(response).map(|_| ())
    }
}

fn check(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    response.json::<T>().await.map_err(|e| GatewayError::Decode(e.to_string()))
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{EventId, OrderId},
    error::{ApiException, ErrorCode},
    protocol::{
        Acknowledgement, Event, Order, OrderStatusUpdate, PasswordResetRequest,
        ResetEmailRequest,
    },
};
use tracing::{info, warn};
use url::Url;

pub mod confirm;
pub mod error;
pub mod filter;
pub mod notice;
pub mod password;
pub mod present;
pub mod report;
pub mod screens;

pub use error::{ClientError, ClientResult, ErrorKind};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Operations the admin screens need from the backend. `AdminClient` is the HTTP
/// implementation; the desktop worker only depends on this trait.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_events(&self) -> ClientResult<Vec<Event>>;
    async fn delete_event(&self, id: &EventId) -> ClientResult<()>;
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;
    async fn mark_order_delivered(&self, id: &OrderId) -> ClientResult<()>;
    async fn send_reset_email(&self, email: &str) -> ClientResult<()>;
    async fn reset_password(&self, new_password: &str) -> ClientResult<()>;
}

pub struct AdminClient {
    http: Client,
    base_url: Url,
}

impl AdminClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http_client(base_url, Client::new())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_http_client(base_url, http)
    }

    pub fn with_http_client(base_url: &str, http: Client) -> ClientResult<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Validation(format!(
                "api base url '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn ensure_success(res: Response) -> ClientResult<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "api request failed");
        Err(ApiException::new(
            ErrorCode::from_status(status.as_u16()),
            format!("HTTP {status}: {}", body.trim()),
        )
        .into())
    }

    async fn acknowledged(res: Response) -> ClientResult<()> {
        let ack: Acknowledgement = Self::ensure_success(res).await?.json().await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiException::rejected(ack.message.unwrap_or_default()).into())
        }
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let res = self.http.get(self.endpoint(&["eventos"])).send().await?;
        let events: Vec<Event> = Self::ensure_success(res).await?.json().await?;
        info!(count = events.len(), "loaded events");
        Ok(events)
    }

    async fn delete_event(&self, id: &EventId) -> ClientResult<()> {
        let res = self
            .http
            .delete(self.endpoint(&["eventos", id.as_str()]))
            .send()
            .await?;
        Self::ensure_success(res).await?;
        info!(event_id = %id, "deleted event");
        Ok(())
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let res = self.http.get(self.endpoint(&["pedidos"])).send().await?;
        let orders: Vec<Order> = Self::ensure_success(res).await?.json().await?;
        info!(count = orders.len(), "loaded orders");
        Ok(orders)
    }

    async fn mark_order_delivered(&self, id: &OrderId) -> ClientResult<()> {
        let res = self
            .http
            .patch(self.endpoint(&["pedidos", id.as_str()]))
            .json(&OrderStatusUpdate::delivered())
            .send()
            .await?;
        Self::ensure_success(res).await?;
        info!(order_id = %id, "order marked delivered");
        Ok(())
    }

    async fn send_reset_email(&self, email: &str) -> ClientResult<()> {
        let res = self
            .http
            .post(self.endpoint(&["enviar-correo"]))
            .json(&ResetEmailRequest {
                email: email.trim().to_string(),
            })
            .send()
            .await?;
        Self::acknowledged(res).await
    }

    async fn reset_password(&self, new_password: &str) -> ClientResult<()> {
        password::validate_new_password(new_password)?;
        let res = self
            .http
            .post(self.endpoint(&["restablecer-contrasena"]))
            .json(&PasswordResetRequest {
                new_password: new_password.to_string(),
            })
            .send()
            .await?;
        Self::acknowledged(res).await
    }
}

#[cfg(test)]
#[path = "tests/test_support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

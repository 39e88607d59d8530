use anyhow::Context as _;
use serde::Serialize;

use crate::domain::repository::EmailSender;
use crate::error::StoreServiceError;

/// HTTP mail gateway client. One POST per message.
#[derive(Clone)]
pub struct HttpEmailSender {
    client: reqwest::Client,
    endpoint: String,
    sender: String,
}

#[derive(Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl HttpEmailSender {
    pub fn new(endpoint: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            sender: sender.into(),
        }
    }
}

impl EmailSender for HttpEmailSender {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), StoreServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendMailRequest {
                from: &self.sender,
                to,
                subject,
                html: html_body,
            })
            .send()
            .await
            .context("post to mail gateway")
            .map_err(StoreServiceError::EmailDelivery)?;
        if !response.status().is_success() {
            return Err(StoreServiceError::EmailDelivery(anyhow::anyhow!(
                "mail gateway returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

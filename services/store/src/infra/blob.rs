use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::BlobStore;
use crate::error::StoreServiceError;

/// Media store client. Files are PUT to `{api_url}/{bucket}/{filename}` and
/// served back from `{public_url}/{bucket}/{filename}`.
#[derive(Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    api_url: String,
    public_url: String,
}

impl HttpBlobStore {
    pub fn new(api_url: impl Into<String>, public_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            public_url: public_url.into(),
        }
    }
}

impl BlobStore for HttpBlobStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        bucket: &str,
    ) -> Result<String, StoreServiceError> {
        let response = self
            .client
            .put(format!("{}/{bucket}/{filename}", self.api_url))
            .body(bytes)
            .send()
            .await
            .context("put to media store")
            .map_err(StoreServiceError::UploadFailed)?;
        if !response.status().is_success() {
            return Err(StoreServiceError::UploadFailed(anyhow::anyhow!(
                "media store returned {}",
                response.status()
            )));
        }
        Ok(format!("{}/{bucket}/{filename}", self.public_url))
    }

    async fn sideload(
        &self,
        source_url: &str,
        bucket: &str,
    ) -> Result<String, StoreServiceError> {
        let response = self
            .client
            .get(source_url)
            .send()
            .await
            .context("fetch source image")
            .map_err(StoreServiceError::UploadFailed)?;
        if !response.status().is_success() {
            return Err(StoreServiceError::UploadFailed(anyhow::anyhow!(
                "source returned {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .context("read source image body")
            .map_err(StoreServiceError::UploadFailed)?;

        // Keep the source extension so the media store serves the right type.
        let extension = source_url
            .rsplit('/')
            .next()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("bin");
        let filename = format!("{}.{extension}", Uuid::new_v4());
        self.upload(bytes.to_vec(), &filename, bucket).await
    }
}

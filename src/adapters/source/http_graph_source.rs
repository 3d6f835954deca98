//! HTTP graph source.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;

use crate::domain::questionnaire::QuestionDefinition;
use crate::ports::{GraphSource, GraphSourceError};

use super::{parse_definitions, DocumentFormat};

/// Fetches a graph document with a GET request.
///
/// The response content type decides between JSON and YAML; when it names
/// neither, the URL suffix does.
#[derive(Debug, Clone)]
pub struct HttpGraphSource {
    url: String,
    timeout: Duration,
    client: Client,
}

impl HttpGraphSource {
    /// Creates a source for `url` with a whole-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GraphSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GraphSourceError::Io(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            timeout,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_error(&self, e: reqwest::Error) -> GraphSourceError {
        if e.is_timeout() {
            GraphSourceError::Timeout(self.timeout.as_secs())
        } else if e.is_connect() {
            GraphSourceError::Io(format!("Connection failed: {}", e))
        } else {
            GraphSourceError::Io(e.to_string())
        }
    }
}

#[async_trait]
impl GraphSource for HttpGraphSource {
    async fn load(&self) -> Result<Vec<QuestionDefinition>, GraphSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(GraphSourceError::NotFound(self.url.clone()));
        }
        if !status.is_success() {
            return Err(GraphSourceError::Status {
                status: status.as_u16(),
            });
        }

        let format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(DocumentFormat::from_content_type)
            .unwrap_or_else(|| DocumentFormat::from_location(&self.url));

        let text = response.text().await.map_err(|e| self.map_error(e))?;
        parse_definitions(&text, format)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

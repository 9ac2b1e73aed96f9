//! Scripted [`ZoomApi`] used by unit tests.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Mutex;

use super::client::ZoomApi;
use super::error::{Result, ZoomError};

type Responder = Box<dyn Fn(&str, &[(&str, String)]) -> Result<Value> + Send + Sync>;
type Downloader = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

pub struct FakeZoomApi {
    respond: Responder,
    download: Downloader,
    calls: Mutex<Vec<String>>,
}

impl FakeZoomApi {
    pub fn new(
        respond: impl Fn(&str, &[(&str, String)]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            download: Box::new(|_| Err(http_error(404, ""))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_download(
        mut self,
        download: impl Fn(&str) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.download = Box::new(download);
        self
    }

    /// Paths requested so far, downloads prefixed with `download:`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == path).count()
    }
}

pub fn http_error(status: u16, body: &str) -> ZoomError {
    ZoomError::Http {
        status,
        body: body.to_string(),
    }
}

#[async_trait]
impl ZoomApi for FakeZoomApi {
    async fn request(
        &self,
        _method: Method,
        path: &str,
        query: &[(&str, String)],
        _body: Option<&Value>,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(path.to_string());
        (self.respond)(path, query)
    }

    async fn download_text(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(format!("download:{}", url));
        (self.download)(url)
    }
}

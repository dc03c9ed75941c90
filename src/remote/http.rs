use std::io::Read;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    ApplyRequest, CompositeRequest, ImageService, MultipartForm, RemoteError, RenderedImage,
    Result, SquareCheckRequest, WireImage,
};

const ERROR_BODY_LIMIT: u64 = 4 * 1024;

/// `ImageService` over HTTP using a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct HttpImageService {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpImageService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn post<T: DeserializeOwned>(&self, endpoint: &str, form: &MultipartForm) -> Result<T> {
        let url = self.url(endpoint);
        let body = form.to_body();
        debug!(%url, bytes = body.len(), "posting form");
        let response = self
            .agent
            .post(&url)
            .set("Content-Type", &form.content_type())
            .send_bytes(&body)
            .map_err(|error| match error {
                ureq::Error::Status(code, response) => {
                    let mut body = String::new();
                    if let Err(read_error) = response
                        .into_reader()
                        .take(ERROR_BODY_LIMIT)
                        .read_to_string(&mut body)
                    {
                        debug!(endpoint, code, error = %read_error, "error body unreadable");
                    }
                    warn!(endpoint, code, "service rejected request");
                    RemoteError::Status {
                        endpoint: endpoint.to_string(),
                        code,
                        body,
                    }
                }
                ureq::Error::Transport(transport) => {
                    warn!(endpoint, error = %transport, "transport failure");
                    RemoteError::Transport {
                        endpoint: endpoint.to_string(),
                        message: transport.to_string(),
                    }
                }
            })?;
        Ok(serde_json::from_reader(response.into_reader())?)
    }
}

impl ImageService for HttpImageService {
    fn apply(&self, request: &ApplyRequest) -> Result<RenderedImage> {
        let wire: WireImage = self.post(request.endpoint(), &request.form())?;
        wire.decode()
    }

    fn is_square(&self, request: &SquareCheckRequest) -> Result<bool> {
        self.post(request.endpoint(), &request.form())
    }

    fn composite(&self, request: &CompositeRequest) -> Result<RenderedImage> {
        let wire: WireImage = self.post(request.endpoint(), &request.form())?;
        wire.decode()
    }
}

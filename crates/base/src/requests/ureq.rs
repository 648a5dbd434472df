use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{HttpRequestData, HttpRequestMethod};
use anyhow::{bail, Context, Result};
use std::time::Duration;
use ureq::{Agent, AgentBuilder, Error};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct UreqRequestApi {
    agent: Agent,
}

impl Default for UreqRequestApi {
    fn default() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }
}

impl UreqRequestApi {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl SyncHttpRequest for UreqRequestApi {
    fn call(&self, req: HttpRequestData) -> Result<String> {
        let method = match req.method {
            HttpRequestMethod::Get => "GET",
            HttpRequestMethod::Post => "POST",
        };

        let mut request = self
            .agent
            .request(method, &req.url)
            .set("Accept", "application/json");

        if let Some(headers) = &req.headers {
            for (header, value) in headers {
                request = request.set(header, value);
            }
        }

        if let Some(queries) = &req.queries {
            for (param, value) in queries {
                request = request.query(param, value);
            }
        }

        let res = match req.body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match res {
            Ok(resp) => resp
                .into_string()
                .context(format!("unreadable response body from {}", req.url)),
            Err(Error::Status(code, resp)) => {
                let url = resp.get_url().to_string();
                bail!(
                    "request to {} failed with a code {}: {}",
                    url,
                    code,
                    resp.into_string().unwrap_or_default()
                );
            }
            Err(e) => bail!("request to {} failed: {}", req.url, e),
        }
    }
}

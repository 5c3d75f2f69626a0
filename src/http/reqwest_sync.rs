use std::time::Duration;

use log::debug;
use serde_json::Value;
use thirtyfour::common::connection_common::reqwest_support::build_reqwest_headers;
use thirtyfour::{RequestData, RequestMethod};

use crate::error::{DriverError, DriverResult};
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Blocking connection to a WebDriver server.
#[derive(Debug)]
pub struct ReqwestDriverSync {
    url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl WebDriverHttpClientSync for ReqwestDriverSync {
    fn create(params: HttpClientCreateParams) -> DriverResult<Self> {
        let url = params.server_url.trim_end_matches('/').to_owned();
        let headers = build_reqwest_headers(&url)?;
        let client = reqwest::blocking::Client::builder().default_headers(headers).build()?;
        Ok(ReqwestDriverSync {
            url,
            client,
            timeout: params.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// Send one request. Any status outside 2xx/3xx is turned into a
    /// [`DriverError`] from the W3C error body.
    fn execute(&self, request_data: RequestData) -> DriverResult<Value> {
        let url = format!("{}{}", self.url, request_data.url);
        let builder = match request_data.method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
            RequestMethod::Delete => self.client.delete(&url),
        }
        .timeout(self.timeout);
        let builder = match &request_data.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder.send()?;
        let status = resp.status();
        debug!("{} -> {}", url, status);
        if status.is_success() || status.is_redirection() {
            Ok(resp.json()?)
        } else {
            Err(DriverError::parse(status.as_u16(), resp.text()?))
        }
    }
}

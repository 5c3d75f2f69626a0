use std::fmt::Debug;
use std::time::Duration;

use thirtyfour::RequestData;

use crate::error::DriverResult;

/// Parameters passed to [`WebDriverHttpClientSync::create`].
#[derive(Debug, Clone)]
pub struct HttpClientCreateParams {
    pub server_url: String,
    pub timeout: Option<Duration>,
}

/// Transport for W3C WebDriver requests.
///
/// Any implementation can back a browser session:
///
/// ```ignore
/// // Assuming MyHttpClient implements WebDriverHttpClientSync.
/// let driver = GenericWebDriver::<MyHttpClient>::launch(&config)?;
/// ```
pub trait WebDriverHttpClientSync: Debug + Send + Sync {
    fn create(params: HttpClientCreateParams) -> DriverResult<Self>
    where
        Self: Sized;

    /// Execute one request and return the full JSON response body.
    fn execute(&self, request_data: RequestData) -> DriverResult<serde_json::Value>;
}

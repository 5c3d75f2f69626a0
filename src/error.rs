use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thiserror::Error;

use crate::locator::Locator;

pub type DriverResult<T> = Result<T, DriverError>;
pub type PageResult<T> = Result<T, PageError>;

/// Errors raised by a [`Driver`](crate::Driver) implementation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base64 screenshot data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("webdriver error: {0}")]
    WebDriver(#[from] WebDriverError),
    #[error("no such element: {0}")]
    NoSuchElement(String),
    #[error("stale element reference: {0}")]
    StaleElement(String),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl DriverError {
    /// Decode a W3C error response. Lookup failures map to
    /// [`NoSuchElement`](Self::NoSuchElement) and [`StaleElement`](Self::StaleElement).
    pub fn parse(status: u16, body: String) -> Self {
        match WebDriverError::parse(status, body) {
            WebDriverError::NoSuchElement(info) => DriverError::NoSuchElement(info.value.message),
            WebDriverError::StaleElementReference(info) => {
                DriverError::StaleElement(info.value.message)
            }
            other => DriverError::WebDriver(other),
        }
    }

    /// True for errors a wait loop should treat as "condition not met yet".
    pub fn is_transient(&self) -> bool {
        match self {
            DriverError::NoSuchElement(_) | DriverError::StaleElement(_) => true,
            DriverError::WebDriver(e) => matches!(
                e,
                WebDriverError::NoSuchElement(_) | WebDriverError::StaleElementReference(_)
            ),
            _ => false,
        }
    }
}

/// Errors raised by page objects.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("element {locator} not visible within {timeout:?}")]
    ElementNotVisible {
        locator: Locator,
        timeout: Duration,
    },
    #[error("element {locator} not clickable within {timeout:?}")]
    ElementNotClickable {
        locator: Locator,
        timeout: Duration,
    },
    #[error("no element {locator} at index {index} (found {found})")]
    ElementNotFound {
        locator: Locator,
        index: usize,
        found: usize,
    },
    #[error("cannot parse a number from {text:?}")]
    PriceFormat {
        text: String,
    },
    #[error("unknown user type: {0:?}")]
    UnknownUserType(String),
    #[error("unknown sort option: {0:?}")]
    UnknownSortOption(String),
    #[error("{0} did not load")]
    PageNotLoaded(&'static str),
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        key: String,
        value: String,
    },
}

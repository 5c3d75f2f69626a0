use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thirtyfour::query::ElementPoller;

use crate::error::{ConfigError, PageError};

/// Browser launched by [`Fixture::launch`](crate::Fixture::launch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Edge,
}

impl FromStr for Browser {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "firefox" => Ok(Browser::Firefox),
            "edge" => Ok(Browser::Edge),
            _ => Err(ConfigError::InvalidValue {
                key: String::from("BROWSER"),
                value: s.to_string(),
            }),
        }
    }
}

/// The account kinds the storefront ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserType {
    Standard,
    LockedOut,
    Problem,
    PerformanceGlitch,
}

impl FromStr for UserType {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(UserType::Standard),
            "locked_out" => Ok(UserType::LockedOut),
            "problem" => Ok(UserType::Problem),
            "performance_glitch" => Ok(UserType::PerformanceGlitch),
            _ => Err(PageError::UnknownUserType(s.to_string())),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            UserType::Standard => "standard",
            UserType::LockedOut => "locked_out",
            UserType::Problem => "problem",
            UserType::PerformanceGlitch => "performance_glitch",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Usernames per account kind. Every account shares one password.
#[derive(Debug, Clone)]
pub struct Users {
    pub standard: String,
    pub locked_out: String,
    pub problem: String,
    pub performance_glitch: String,
    pub password: String,
}

impl Default for Users {
    fn default() -> Self {
        Self {
            standard: String::from("standard_user"),
            locked_out: String::from("locked_out_user"),
            problem: String::from("problem_user"),
            performance_glitch: String::from("performance_glitch_user"),
            password: String::from("secret_sauce"),
        }
    }
}

impl Users {
    pub fn credentials(&self, user: UserType) -> Credentials {
        let username = match user {
            UserType::Standard => &self.standard,
            UserType::LockedOut => &self.locked_out,
            UserType::Problem => &self.problem,
            UserType::PerformanceGlitch => &self.performance_glitch,
        };
        Credentials {
            username: username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Settings shared by every page object of a test run.
///
/// Build it once, then hand a reference to each page object.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Entry URL of the application under test.
    pub base_url: String,
    /// Address of the WebDriver server (chromedriver, geckodriver, selenium).
    pub webdriver_url: String,
    pub browser: Browser,
    pub headless: bool,
    /// Default bound for every explicit wait.
    pub timeout: Duration,
    /// Bound for checks that are expected to fail fast, e.g. "is an error shown".
    pub short_timeout: Duration,
    /// Bound for waits that follow a page transition.
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
    pub screenshot_on_failure: bool,
    pub users: Users,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://www.saucedemo.com"),
            webdriver_url: String::from("http://localhost:4444"),
            browser: Browser::Chrome,
            headless: false,
            timeout: Duration::from_secs(10),
            short_timeout: Duration::from_secs(3),
            navigation_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(500),
            screenshot_on_failure: true,
            users: Users::default(),
        }
    }
}

impl PageConfig {
    /// Read settings from the process environment. Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a key to its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup("BASE_URL") {
            config.base_url = v;
        }
        if let Some(v) = lookup("WEBDRIVER_URL") {
            config.webdriver_url = v;
        }
        if let Some(v) = lookup("BROWSER") {
            config.browser = v.parse()?;
        }
        if let Some(v) = lookup("HEADLESS") {
            config.headless = parse_bool("HEADLESS", &v)?;
        }
        if let Some(v) = lookup("TIMEOUT") {
            let secs = v.trim().parse::<u64>().map_err(|_| invalid("TIMEOUT", &v))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = lookup("SCREENSHOT_ON_FAILURE") {
            config.screenshot_on_failure = parse_bool("SCREENSHOT_ON_FAILURE", &v)?;
        }
        if let Some(v) = lookup("STANDARD_USER") {
            config.users.standard = v;
        }
        if let Some(v) = lookup("LOCKED_OUT_USER") {
            config.users.locked_out = v;
        }
        if let Some(v) = lookup("PROBLEM_USER") {
            config.users.problem = v;
        }
        if let Some(v) = lookup("PERFORMANCE_GLITCH_USER") {
            config.users.performance_glitch = v;
        }
        if let Some(v) = lookup("PASSWORD") {
            config.users.password = v;
        }
        Ok(config)
    }

    /// Poller that waits up to `timeout`, checking every `poll_interval`.
    pub fn poller(&self, timeout: Duration) -> ElementPoller {
        ElementPoller::TimeoutWithInterval(timeout, self.poll_interval)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use serde::Serialize;
use serde_json::{json, Value};
use thirtyfour::{Capabilities, DesiredCapabilities, SessionId};

use crate::config::{Browser, PageConfig};
use crate::driver::{Driver, ElementHandle};
use crate::error::DriverResult;
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};
use crate::http::reqwest_sync::ReqwestDriverSync;
use crate::locator::Locator;
use crate::session::{start_session, WebDriverSession};

/// A browser session driven over HTTP with `reqwest`.
pub type WebDriver = GenericWebDriver<ReqwestDriverSync>;

const EDGE_OPTIONS: &str = "ms:edgeOptions";
const HEADLESS_CHROMIUM: &str = "--headless=new";
const CHROMIUM_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--window-size=1920,1080",
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-save-password-bubble",
];
const EXCLUDED_SWITCHES: &[&str] = &["enable-automation", "enable-logging"];

fn chromium_prefs() -> Value {
    json!({
        "credentials_enable_service": false,
        "profile.password_manager_enabled": false,
        "profile.password_manager_leak_detection": false,
        "autofill.profile_enabled": false,
        "profile.default_content_setting_values.notifications": 2,
    })
}

fn chromium_args(headless: bool) -> Vec<&'static str> {
    let mut args = Vec::with_capacity(CHROMIUM_ARGS.len() + 1);
    if headless {
        args.push(HEADLESS_CHROMIUM);
    }
    args.extend_from_slice(CHROMIUM_ARGS);
    args
}

/// Capabilities for `browser`.
///
/// Chromium browsers get a fixed 1920x1080 window with password and
/// notification prompts turned off.
pub fn capabilities_for(browser: Browser, headless: bool) -> DriverResult<DesiredCapabilities> {
    let caps = match browser {
        Browser::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            for arg in chromium_args(headless) {
                caps.add_chrome_arg(arg)?;
            }
            caps.add_chrome_option("prefs", chromium_prefs())?;
            caps.add_chrome_option("excludeSwitches", EXCLUDED_SWITCHES)?;
            caps.get().clone()
        }
        Browser::Edge => {
            let mut caps = DesiredCapabilities::edge();
            caps.add_subkey(EDGE_OPTIONS, "args", chromium_args(headless))?;
            caps.add_subkey(EDGE_OPTIONS, "prefs", chromium_prefs())?;
            caps.add_subkey(EDGE_OPTIONS, "excludeSwitches", EXCLUDED_SWITCHES)?;
            caps.get().clone()
        }
        Browser::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if headless {
                caps.set_headless()?;
            }
            caps.get().clone()
        }
    };
    Ok(DesiredCapabilities::new(caps))
}

/// A WebDriver browser session, generic over the HTTP client.
///
/// The session is deleted when the struct is dropped, unless it was already
/// closed with [`quit`](Self::quit).
#[derive(Debug)]
pub struct GenericWebDriver<T: WebDriverHttpClientSync> {
    session: WebDriverSession,
    capabilities: Value,
    quit_on_drop: bool,
    phantom: PhantomData<T>,
}

impl<T: 'static> GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    /// Open a session on the server at `server_url`.
    pub fn new<C>(server_url: &str, capabilities: C) -> DriverResult<Self>
    where
        C: Serialize,
    {
        Self::new_with_timeout(server_url, capabilities, None)
    }

    /// Like [`new`](Self::new), with a bound on every HTTP request
    /// including session creation.
    pub fn new_with_timeout<C>(
        server_url: &str,
        capabilities: C,
        timeout: Option<Duration>,
    ) -> DriverResult<Self>
    where
        C: Serialize,
    {
        let params = HttpClientCreateParams {
            server_url: server_url.to_string(),
            timeout,
        };
        let conn = T::create(params)?;
        let (session_id, capabilities) =
            start_session(&conn, serde_json::to_value(capabilities)?)?;
        debug!("started session {} on {}", session_id, server_url);

        Ok(GenericWebDriver {
            session: WebDriverSession::new(session_id, Arc::new(conn)),
            capabilities,
            quit_on_drop: true,
            phantom: PhantomData,
        })
    }

    /// Open a session for the browser named in `config`.
    pub fn launch(config: &PageConfig) -> DriverResult<Self> {
        let caps = capabilities_for(config.browser, config.headless)?;
        Self::new(&config.webdriver_url, caps)
    }

    /// Capabilities as granted by the server.
    pub fn capabilities(&self) -> DesiredCapabilities {
        DesiredCapabilities::new(self.capabilities.clone())
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.session_id()
    }

    /// End the session.
    pub fn quit(mut self) -> DriverResult<()> {
        self.session.delete()?;
        self.quit_on_drop = false;
        Ok(())
    }
}

impl<T> Driver for GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    fn get(&self, url: &str) -> DriverResult<()> {
        self.session.get(url)
    }

    fn find_elements(&self, locator: &Locator) -> DriverResult<Vec<ElementHandle>> {
        self.session.find_elements(locator)
    }

    fn find_elements_from(
        &self,
        parent: &ElementHandle,
        locator: &Locator,
    ) -> DriverResult<Vec<ElementHandle>> {
        self.session.find_elements_from(parent, locator)
    }

    fn is_displayed(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.session.is_displayed(element)
    }

    fn is_enabled(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.session.is_enabled(element)
    }

    fn is_selected(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.session.is_selected(element)
    }

    fn click(&self, element: &ElementHandle) -> DriverResult<()> {
        self.session.click(element)
    }

    fn clear(&self, element: &ElementHandle) -> DriverResult<()> {
        self.session.clear(element)
    }

    fn send_keys(&self, element: &ElementHandle, text: &str) -> DriverResult<()> {
        self.session.send_keys(element, text)
    }

    fn text(&self, element: &ElementHandle) -> DriverResult<String> {
        self.session.text(element)
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>> {
        self.session.attribute(element, name)
    }

    fn current_url(&self) -> DriverResult<String> {
        self.session.current_url()
    }

    fn title(&self) -> DriverResult<String> {
        self.session.title()
    }

    fn screenshot_as_png(&self) -> DriverResult<Vec<u8>> {
        let s = self.session.screenshot_as_base64()?;
        Ok(base64::decode(&s)?)
    }

    fn execute_script(&self, script: &str, args: Vec<Value>) -> DriverResult<Value> {
        self.session.execute_script(script, args)
    }
}

impl<T> Drop for GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    /// Close the session when the WebDriver goes out of scope.
    fn drop(&mut self) {
        if self.quit_on_drop && !self.session.session_id().is_empty() {
            if let Err(e) = self.session.delete() {
                error!("Failed to close session: {:?}", e);
            }
        }
    }
}

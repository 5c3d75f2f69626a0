use std::time::Duration;

use log::warn;
use stringmatch::{Needle, StringMatch};

use crate::config::PageConfig;
use crate::driver::{Driver, ElementHandle};
use crate::error::{DriverResult, PageError, PageResult};
use crate::locator::Locator;
use crate::query::{conditions, Condition, Waiter};
use crate::report::{LogReporter, Reporter};

static LOG_REPORTER: LogReporter = LogReporter;

/// Timeout-bounded access to the driver, shared by every page object.
///
/// Every interaction is preceded by an explicit wait. Methods come in two
/// flavours:
///
/// - required steps (`find_visible`, `click`, `type_text`, `get_text`,
///   `get_attribute`) return a typed [`PageError`] when their wait times out;
/// - checks (`is_visible`, `is_present`, `wait_url_contains`,
///   `wait_disappear`, ...) return `false` instead and never fail.
#[derive(Debug, Clone, Copy)]
pub struct BasePage<'a> {
    driver: &'a dyn Driver,
    config: &'a PageConfig,
    reporter: &'a dyn Reporter,
}

impl<'a> BasePage<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        Self {
            driver,
            config,
            reporter: &LOG_REPORTER,
        }
    }

    /// Send step annotations and screenshots to `reporter` instead of the log.
    pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn driver(&self) -> &'a dyn Driver {
        self.driver
    }

    pub fn config(&self) -> &'a PageConfig {
        self.config
    }

    /// Announce a named step to the reporter.
    pub fn step(&self, name: &str) {
        self.reporter.step(name);
    }

    fn wait<T>(
        &self,
        timeout: Duration,
        what: &str,
        condition: Condition<'_, T>,
    ) -> DriverResult<Option<T>> {
        Waiter::new(self.config.poller(timeout)).desc(what).until(self.driver, condition)
    }

    /// Collapse a check outcome to a bool, logging driver failures.
    fn settle<T>(&self, what: &str, result: DriverResult<Option<T>>) -> bool {
        match result {
            Ok(x) => x.is_some(),
            Err(e) => {
                warn!("check for {} failed: {}", what, e);
                false
            }
        }
    }

    /// Wait for the first element matching `locator` to be displayed.
    pub fn find_visible(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> PageResult<ElementHandle> {
        let timeout = timeout.unwrap_or(self.config.timeout);
        let what = format!("{} to be visible", locator);
        match self.wait(timeout, &what, conditions::visibility_of(locator))? {
            Some(elem) => Ok(elem),
            None => Err(PageError::ElementNotVisible {
                locator: locator.clone(),
                timeout,
            }),
        }
    }

    /// All elements matching `locator`, waiting up to the default timeout for
    /// at least one to appear. Empty when none do.
    pub fn find_all(&self, locator: &Locator) -> PageResult<Vec<ElementHandle>> {
        let what = format!("{} to be present", locator);
        let found = self.wait(self.config.timeout, &what, conditions::presence_of_all(locator))?;
        Ok(found.unwrap_or_default())
    }

    /// Descendants of `parent` matching `locator`, without waiting.
    pub fn find_within(
        &self,
        parent: &ElementHandle,
        locator: &Locator,
    ) -> PageResult<Vec<ElementHandle>> {
        Ok(self.driver.find_elements_from(parent, locator)?)
    }

    /// Wait for the element to be clickable, then click it.
    ///
    /// With `scroll_first` the element is scrolled into view before the click.
    pub fn click(&self, locator: &Locator, scroll_first: bool) -> PageResult<()> {
        let timeout = self.config.timeout;
        let what = format!("{} to be clickable", locator);
        let elem = match self.wait(timeout, &what, conditions::clickable(locator))? {
            Some(elem) => elem,
            None => {
                return Err(PageError::ElementNotClickable {
                    locator: locator.clone(),
                    timeout,
                })
            }
        };
        if scroll_first {
            self.driver.scroll_into_view(&elem)?;
        }
        self.driver.click(&elem)?;
        Ok(())
    }

    /// Wait for the first descendant of `parent` matching `locator` to be
    /// clickable, then click it.
    pub fn click_within(&self, parent: &ElementHandle, locator: &Locator) -> PageResult<()> {
        let timeout = self.config.timeout;
        let what = format!("{} within {} to be clickable", locator, parent);
        match self.wait(timeout, &what, conditions::clickable_within(parent, locator))? {
            Some(elem) => Ok(self.driver.click(&elem)?),
            None => Err(PageError::ElementNotClickable {
                locator: locator.clone(),
                timeout,
            }),
        }
    }

    /// Type `text` into a visible field, optionally clearing it first.
    pub fn type_text(&self, locator: &Locator, text: &str, clear_first: bool) -> PageResult<()> {
        let elem = self.find_visible(locator, None)?;
        if clear_first {
            self.driver.clear(&elem)?;
        }
        self.driver.send_keys(&elem, text)?;
        Ok(())
    }

    pub fn get_text(&self, locator: &Locator) -> PageResult<String> {
        let elem = self.find_visible(locator, None)?;
        Ok(self.driver.text(&elem)?)
    }

    pub fn get_attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        let elem = self.find_visible(locator, None)?;
        Ok(self.driver.attribute(&elem, name)?)
    }

    /// True if the element becomes visible within the timeout.
    pub fn is_visible(&self, locator: &Locator, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or(self.config.timeout);
        let what = format!("{} to be visible", locator);
        let result = self.wait(timeout, &what, conditions::visibility_of(locator));
        self.settle(&what, result)
    }

    /// True if the element is in the document right now, visible or not.
    pub fn is_present(&self, locator: &Locator) -> bool {
        match self.driver.find_elements(locator) {
            Ok(elems) => !elems.is_empty(),
            Err(e) if e.is_transient() => false,
            Err(e) => {
                warn!("presence check for {} failed: {}", locator, e);
                false
            }
        }
    }

    /// True if the current URL contains `fragment` within the timeout.
    pub fn wait_url_contains(&self, fragment: &str, timeout: Option<Duration>) -> bool {
        self.wait_url_matches(&StringMatch::new(fragment).partial(), timeout)
    }

    /// True if the current URL matches `needle` within the timeout.
    pub fn wait_url_matches<N>(&self, needle: &N, timeout: Option<Duration>) -> bool
    where
        N: Needle,
    {
        let timeout = timeout.unwrap_or(self.config.timeout);
        let result = self.wait(timeout, "url", conditions::url_matches(needle));
        self.settle("url", result)
    }

    /// True if the element's text matches `needle` within the timeout.
    pub fn wait_text_matches<N>(
        &self,
        locator: &Locator,
        needle: &N,
        timeout: Option<Duration>,
    ) -> bool
    where
        N: Needle,
    {
        let timeout = timeout.unwrap_or(self.config.timeout);
        let what = format!("text of {}", locator);
        let result = self.wait(timeout, &what, conditions::text_matches(locator, needle));
        self.settle(&what, result)
    }

    /// True once the element is hidden or gone.
    pub fn wait_disappear(&self, locator: &Locator, timeout: Option<Duration>) -> bool {
        let timeout = timeout.unwrap_or(self.config.timeout);
        let what = format!("{} to disappear", locator);
        let result = self.wait(timeout, &what, conditions::invisibility_of(locator));
        self.settle(&what, result)
    }

    pub fn current_url(&self) -> PageResult<String> {
        Ok(self.driver.current_url()?)
    }

    pub fn page_title(&self) -> PageResult<String> {
        Ok(self.driver.title()?)
    }

    /// Capture the viewport and attach it to the report under `name`.
    pub fn screenshot(&self, name: &str) {
        self.step(&format!("Taking screenshot: {}", name));
        match self.driver.screenshot_as_png() {
            Ok(png) => self.reporter.attach_png(name, &png),
            Err(e) => warn!("failed to capture screenshot {:?}: {}", name, e),
        }
    }
}

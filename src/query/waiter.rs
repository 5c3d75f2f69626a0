use log::debug;

use crate::driver::Driver;
use crate::error::DriverResult;
use crate::query::conditions::Condition;
use crate::query::{ElementPoller, ElementPollerTicker};

/// Runs an explicit wait: re-evaluates a [`Condition`] until it yields a
/// value or the poller gives up.
///
/// # Example:
/// ```rust
/// # use storefront_pages::prelude::*;
/// # use storefront_pages::query::{conditions, ElementPoller, Waiter};
/// # use std::time::Duration;
/// #
/// # fn run(driver: &dyn Driver) -> DriverResult<()> {
/// let poller =
///     ElementPoller::TimeoutWithInterval(Duration::from_secs(5), Duration::from_millis(250));
/// let button = Locator::id("login-button");
/// let elem = Waiter::new(poller)
///     .desc("login button")
///     .until(driver, conditions::clickable(&button))?;
/// #     let _ = elem;
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Waiter {
    poller: ElementPoller,
    description: String,
}

impl Waiter {
    pub fn new(poller: ElementPoller) -> Self {
        Self {
            poller,
            description: String::new(),
        }
    }

    /// Name the thing being waited for, for log output.
    pub fn desc(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Poll `condition` until it yields a value.
    ///
    /// Returns `Ok(None)` on timeout. Errors raised by the condition abort the
    /// wait immediately.
    pub fn until<T>(
        &self,
        driver: &dyn Driver,
        condition: Condition<'_, T>,
    ) -> DriverResult<Option<T>> {
        let mut ticker = ElementPollerTicker::new(self.poller.clone());
        loop {
            if let Some(value) = condition(driver)? {
                debug!("wait for {} satisfied after {:?}", self.description, ticker.elapsed());
                return Ok(Some(value));
            }

            if !ticker.tick() {
                debug!("wait for {} timed out after {:?}", self.description, ticker.elapsed());
                return Ok(None);
            }
        }
    }
}

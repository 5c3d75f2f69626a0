//! Composition root for a browser test.
//!
//! A [`Fixture`] owns one driver session, the run's [`PageConfig`] and a
//! [`Reporter`]. Page objects it hands out borrow all three, so none of them
//! can outlive the session.

use log::warn;

use crate::config::{PageConfig, UserType};
use crate::driver::Driver;
use crate::error::{DriverResult, PageError, PageResult};
use crate::pages::{BasePage, CartPage, CheckoutPage, InventoryPage, LoginPage, Page};
use crate::report::{LogReporter, Reporter};
use crate::webdriver::WebDriver;

#[derive(Debug)]
pub struct Fixture<D: Driver = WebDriver> {
    driver: D,
    config: PageConfig,
    reporter: Box<dyn Reporter>,
}

impl Fixture<WebDriver> {
    /// Start a browser session as described by `config`.
    pub fn launch(config: PageConfig) -> DriverResult<Self> {
        let driver = WebDriver::launch(&config)?;
        Ok(Self::new(driver, config))
    }
}

impl<D: Driver> Fixture<D> {
    pub fn new(driver: D, config: PageConfig) -> Self {
        Self {
            driver,
            config,
            reporter: Box::new(LogReporter),
        }
    }

    pub fn with_reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    fn base(&self) -> BasePage<'_> {
        BasePage::new(&self.driver, &self.config).with_reporter(&*self.reporter)
    }

    pub fn login_page(&self) -> LoginPage<'_> {
        LoginPage::with_base(self.base())
    }

    pub fn inventory_page(&self) -> InventoryPage<'_> {
        InventoryPage::with_base(self.base())
    }

    pub fn cart_page(&self) -> CartPage<'_> {
        CartPage::with_base(self.base())
    }

    pub fn checkout_page(&self) -> CheckoutPage<'_> {
        CheckoutPage::with_base(self.base())
    }

    /// Log in as the standard user and return the loaded catalog.
    pub fn authenticated_user(&self) -> PageResult<InventoryPage<'_>> {
        let login = self.login_page();
        login.navigate()?;
        login.login_as_user(UserType::Standard)?;

        let inventory = self.inventory_page();
        let timeout = Some(self.config.navigation_timeout);
        if !inventory.wait_url_contains("inventory.html", timeout) || !inventory.is_loaded() {
            return Err(PageError::PageNotLoaded("inventory"));
        }
        Ok(inventory)
    }

    /// Run a named test body. When it fails, a screenshot named
    /// `failure_<name>` is attached first if the config asks for one.
    pub fn run<T, F>(&self, name: &str, test: F) -> PageResult<T>
    where
        F: FnOnce(&Self) -> PageResult<T>,
    {
        let result = test(self);
        if let Err(e) = &result {
            warn!("{} failed: {}", name, e);
            if self.config.screenshot_on_failure {
                self.base().screenshot(&format!("failure_{}", name));
            }
        }
        result
    }
}

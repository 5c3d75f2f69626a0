use crate::config::{PageConfig, UserType};
use crate::driver::Driver;
use crate::error::PageResult;
use crate::locator::Locator;
use crate::pages::{BasePage, Page};

const USERNAME_INPUT: Locator = Locator::id("user-name");
const PASSWORD_INPUT: Locator = Locator::id("password");
const LOGIN_BUTTON: Locator = Locator::id("login-button");
const ERROR_MESSAGE: Locator = Locator::css("h3[data-test='error']");
const ERROR_BUTTON: Locator = Locator::css("button.error-button");

/// The sign-in form at the storefront root.
#[derive(Debug, Clone, Copy)]
pub struct LoginPage<'a> {
    base: BasePage<'a>,
}

impl<'a> LoginPage<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        Self::with_base(BasePage::new(driver, config))
    }

    pub fn with_base(base: BasePage<'a>) -> Self {
        Self {
            base,
        }
    }

    /// Load the storefront root.
    pub fn navigate(&self) -> PageResult<()> {
        self.base.step("Navigate to login page");
        self.base.driver().get(&self.base.config().base_url)?;
        Ok(())
    }

    /// Fill in both fields and submit. Does not wait for the next page.
    pub fn login(&self, username: &str, password: &str) -> PageResult<()> {
        self.base.step(&format!("Login with username: {}", username));
        self.base.type_text(&USERNAME_INPUT, username, true)?;
        self.base.type_text(&PASSWORD_INPUT, password, true)?;
        self.base.click(&LOGIN_BUTTON, false)
    }

    /// Log in as one of the configured accounts, named as in
    /// `"standard"` or `"locked_out"`.
    pub fn login_as(&self, user_type: &str) -> PageResult<()> {
        self.login_as_user(user_type.parse()?)
    }

    pub fn login_as_user(&self, user: UserType) -> PageResult<()> {
        self.base.step(&format!("Login as {} user", user));
        let creds = self.base.config().users.credentials(user);
        self.login(&creds.username, &creds.password)
    }

    pub fn error_message(&self) -> PageResult<String> {
        self.base.get_text(&ERROR_MESSAGE)
    }

    pub fn has_error(&self) -> bool {
        self.base.is_visible(&ERROR_MESSAGE, Some(self.base.config().short_timeout))
    }

    /// Close the error banner if one is showing.
    pub fn dismiss_error(&self) -> PageResult<()> {
        if self.base.is_visible(&ERROR_BUTTON, Some(self.base.config().short_timeout)) {
            self.base.step("Dismiss login error");
            self.base.click(&ERROR_BUTTON, false)?;
        }
        Ok(())
    }

    pub fn is_on_login_page(&self) -> bool {
        self.base.is_present(&LOGIN_BUTTON)
    }
}

impl<'a> Page for LoginPage<'a> {
    fn base(&self) -> &BasePage<'_> {
        &self.base
    }
}

use stringmatch::Needle;

use crate::config::PageConfig;
use crate::driver::Driver;
use crate::error::PageResult;
use crate::locator::Locator;
use crate::pages::{parse_amount, BasePage, Page};

const FIRST_NAME: Locator = Locator::id("first-name");
const LAST_NAME: Locator = Locator::id("last-name");
const POSTAL_CODE: Locator = Locator::id("postal-code");
const CONTINUE_BUTTON: Locator = Locator::id("continue");
const CANCEL_BUTTON: Locator = Locator::id("cancel");
const ERROR_MESSAGE: Locator = Locator::css("h3[data-test='error']");

const SUBTOTAL_LABEL: Locator = Locator::class_name("summary_subtotal_label");
const TAX_LABEL: Locator = Locator::class_name("summary_tax_label");
const TOTAL_LABEL: Locator = Locator::class_name("summary_total_label");
const FINISH_BUTTON: Locator = Locator::id("finish");

const COMPLETE_HEADER: Locator = Locator::class_name("complete-header");
const COMPLETE_TEXT: Locator = Locator::class_name("complete-text");
const BACK_HOME: Locator = Locator::id("back-to-products");

/// The three checkout steps: buyer information, order overview and
/// confirmation.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPage<'a> {
    base: BasePage<'a>,
}

impl<'a> CheckoutPage<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        Self::with_base(BasePage::new(driver, config))
    }

    pub fn with_base(base: BasePage<'a>) -> Self {
        Self {
            base,
        }
    }

    pub fn fill_info(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> PageResult<()> {
        self.base
            .step(&format!("Fill checkout info: {} {} {}", first_name, last_name, postal_code));
        self.base.type_text(&FIRST_NAME, first_name, true)?;
        self.base.type_text(&LAST_NAME, last_name, true)?;
        self.base.type_text(&POSTAL_CODE, postal_code, true)
    }

    /// Submit the information step. Returns whether the overview appeared
    /// within the navigation timeout.
    pub fn continue_to_overview(&self) -> PageResult<bool> {
        self.base.step("Continue to overview");
        self.base.click(&CONTINUE_BUTTON, false)?;
        Ok(self.base.is_visible(&SUBTOTAL_LABEL, Some(self.base.config().navigation_timeout)))
    }

    /// [`fill_info`](Self::fill_info) followed by
    /// [`continue_to_overview`](Self::continue_to_overview).
    pub fn complete_step_one(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> PageResult<bool> {
        self.fill_info(first_name, last_name, postal_code)?;
        self.continue_to_overview()
    }

    pub fn cancel(&self) -> PageResult<()> {
        self.base.step("Cancel checkout");
        self.base.click(&CANCEL_BUTTON, false)
    }

    pub fn error_message(&self) -> PageResult<String> {
        self.base.get_text(&ERROR_MESSAGE)
    }

    pub fn has_error(&self) -> bool {
        self.base.is_visible(&ERROR_MESSAGE, Some(self.base.config().short_timeout))
    }

    /// True if an error matching `needle` shows within the short timeout.
    pub fn has_error_mentioning<N: Needle>(&self, needle: &N) -> bool {
        let timeout = self.base.config().short_timeout;
        self.base.wait_text_matches(&ERROR_MESSAGE, needle, Some(timeout))
    }

    pub fn subtotal(&self) -> PageResult<f64> {
        parse_amount(&self.base.get_text(&SUBTOTAL_LABEL)?, "Item total: $")
    }

    pub fn tax(&self) -> PageResult<f64> {
        parse_amount(&self.base.get_text(&TAX_LABEL)?, "Tax: $")
    }

    pub fn total(&self) -> PageResult<f64> {
        parse_amount(&self.base.get_text(&TOTAL_LABEL)?, "Total: $")
    }

    /// Place the order.
    pub fn finish(&self) -> PageResult<()> {
        self.base.step("Finish checkout");
        self.base.click(&FINISH_BUTTON, true)
    }

    pub fn is_complete(&self) -> bool {
        self.base.is_visible(&COMPLETE_HEADER, None)
    }

    pub fn completion_message(&self) -> PageResult<String> {
        self.base.get_text(&COMPLETE_HEADER)
    }

    pub fn completion_text(&self) -> PageResult<String> {
        self.base.get_text(&COMPLETE_TEXT)
    }

    pub fn back_to_catalog(&self) -> PageResult<()> {
        self.base.step("Back to products");
        self.base.click(&BACK_HOME, false)
    }
}

impl<'a> Page for CheckoutPage<'a> {
    fn base(&self) -> &BasePage<'_> {
        &self.base
    }
}

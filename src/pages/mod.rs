//! Page objects for the storefront.
//!
//! Each page composes a [`BasePage`] bound to one driver session and declares
//! its locators as constants. Shared behaviour lives on the [`Page`] trait.

use std::time::Duration;

use crate::error::{PageError, PageResult};

mod base;
mod cart;
mod checkout;
mod inventory;
mod login;

pub use base::BasePage;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use inventory::{InventoryPage, ProductDetails, SortOption};
pub use login::LoginPage;

/// Capabilities every page object offers through its [`BasePage`].
pub trait Page {
    fn base(&self) -> &BasePage<'_>;

    fn current_url(&self) -> PageResult<String> {
        self.base().current_url()
    }

    fn page_title(&self) -> PageResult<String> {
        self.base().page_title()
    }

    fn wait_url_contains(&self, fragment: &str, timeout: Option<Duration>) -> bool {
        self.base().wait_url_contains(fragment, timeout)
    }

    fn screenshot(&self, name: &str) {
        self.base().screenshot(name)
    }
}

/// Parse a displayed amount such as `"$29.99"` or `"Tax: $2.40"`.
///
/// `prefix` is stripped when present; whatever remains must be a finite number.
pub(crate) fn parse_amount(text: &str, prefix: &str) -> PageResult<f64> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix(prefix).unwrap_or(trimmed).trim();
    match rest.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PageError::PriceFormat {
            text: text.to_string(),
        }),
    }
}

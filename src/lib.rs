//! Page objects for browser tests of a demo storefront, driven over the W3C
//! WebDriver protocol.
//!
//! Every browser interaction goes through a page object, and every page
//! object goes through [`BasePage`], which puts an explicit, bounded wait in
//! front of each action. Tests read as a series of named steps and never
//! sleep or poll by hand.
//!
//! ## Features
//!
//! - Blocking WebDriver client (chromedriver, geckodriver, msedgedriver or a
//!   Selenium grid)
//! - Login, catalog, cart and checkout page objects
//! - Typed errors for timeouts, missing elements and malformed prices
//! - Configuration from the environment, with per-run timeouts
//! - Step annotations and failure screenshots through a pluggable [`Reporter`]
//! - The [`Driver`] trait, so page objects can run against any browser backend
//!
//! ## Example
//!
//! The following example assumes a chromedriver listening on
//! `localhost:4444`.
//!
//! ```no_run
//! use storefront_pages::prelude::*;
//!
//! fn main() -> PageResult<()> {
//!     let config = PageConfig::from_env().expect("invalid configuration");
//!     let fixture = Fixture::launch(config)?;
//!
//!     let inventory = fixture.authenticated_user()?;
//!     inventory.add_to_cart_by_name("Sauce Labs Backpack")?;
//!     inventory.go_to_cart()?;
//!
//!     let cart = fixture.cart_page();
//!     assert_eq!(cart.item_count()?, 1);
//!     cart.proceed_to_checkout()?;
//!
//!     let checkout = fixture.checkout_page();
//!     assert!(checkout.complete_step_one("Ada", "Lovelace", "12345")?);
//!     checkout.finish()?;
//!     assert!(checkout.is_complete());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::needless_doctest_main)]

pub use config::{Browser, Credentials, PageConfig, UserType, Users};
pub use driver::{Driver, ElementHandle};
pub use error::{ConfigError, DriverError, DriverResult, PageError, PageResult};
pub use fixture::Fixture;
pub use locator::{product_slug, Locator, Strategy};
pub use report::{ArtifactDir, LogReporter, Reporter};
pub use session::WebDriverSession;
pub use webdriver::{capabilities_for, GenericWebDriver, WebDriver};

pub mod prelude {
    pub use crate::config::{PageConfig, UserType};
    pub use crate::driver::{Driver, ElementHandle};
    pub use crate::error::{DriverResult, PageError, PageResult};
    pub use crate::fixture::Fixture;
    pub use crate::locator::Locator;
    pub use crate::pages::{
        CartPage, CheckoutPage, InventoryPage, LoginPage, Page, ProductDetails, SortOption,
    };
}

pub mod components {
    mod select;

    pub use select::{escape_string, SelectElement};
}
mod config;
mod driver;
mod error;
mod fixture;
pub mod http {
    pub mod connection_sync;
    pub mod reqwest_sync;
}
mod locator;
pub mod pages;
pub mod query;
mod report;
mod session;
#[cfg(test)]
mod testing;
mod webdriver;

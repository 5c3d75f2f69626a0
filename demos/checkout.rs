//! Requires chromedriver running on port 4444:
//!
//!     chromedriver --port=4444
//!
//! Run as follows:
//!
//!     cargo run --example checkout
//!
//! Set BASE_URL, BROWSER, HEADLESS etc. to point it elsewhere. Failure
//! screenshots land in ./screenshots.

use storefront_pages::prelude::*;
use storefront_pages::ArtifactDir;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = PageConfig::from_env()?;
    let fixture = Fixture::launch(config)?.with_reporter(ArtifactDir::new("screenshots"));

    let total = fixture.run("checkout_two_items", |f| {
        let inventory = f.authenticated_user()?;
        inventory.sort_by(SortOption::LoHi)?;
        let added = inventory.add_multiple_to_cart(2)?;
        println!("Added {:?}", added);
        inventory.go_to_cart()?;

        let cart = f.cart_page();
        println!("Cart subtotal: ${:.2}", cart.total_price()?);
        cart.proceed_to_checkout()?;

        let checkout = f.checkout_page();
        if !checkout.complete_step_one("Ada", "Lovelace", "12345")? {
            return Err(PageError::PageNotLoaded("checkout overview"));
        }
        let total = checkout.total()?;
        checkout.finish()?;
        println!("{}", checkout.completion_message()?);
        Ok(total)
    })?;

    println!("Order total: ${:.2}", total);
    Ok(())
}

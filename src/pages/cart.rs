use crate::config::PageConfig;
use crate::driver::Driver;
use crate::error::{PageError, PageResult};
use crate::locator::{product_slug, Locator, Strategy};
use crate::pages::{parse_amount, BasePage, Page};

const CART_ITEMS: Locator = Locator::class_name("cart_item");
const ITEM_NAMES: Locator = Locator::class_name("inventory_item_name");
const ITEM_PRICES: Locator = Locator::class_name("inventory_item_price");
const ITEM_QUANTITIES: Locator = Locator::class_name("cart_quantity");
const REMOVE_BUTTONS: Locator = Locator::css("button[id^='remove']");
const CONTINUE_SHOPPING: Locator = Locator::id("continue-shopping");
const CHECKOUT_BUTTON: Locator = Locator::css("[data-test='checkout']");

#[derive(Debug, Clone, Copy)]
pub struct CartPage<'a> {
    base: BasePage<'a>,
}

impl<'a> CartPage<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        Self::with_base(BasePage::new(driver, config))
    }

    pub fn with_base(base: BasePage<'a>) -> Self {
        Self {
            base,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.base.is_visible(&CHECKOUT_BUTTON, None)
    }

    /// Number of cart lines. Waits the default timeout when the cart is empty.
    pub fn item_count(&self) -> PageResult<usize> {
        Ok(self.base.find_all(&CART_ITEMS)?.len())
    }

    fn texts(&self, locator: &Locator) -> PageResult<Vec<String>> {
        let driver = self.base.driver();
        self.base
            .find_all(locator)?
            .iter()
            .map(|elem| driver.text(elem).map_err(PageError::from))
            .collect()
    }

    pub fn item_names(&self) -> PageResult<Vec<String>> {
        self.texts(&ITEM_NAMES)
    }

    pub fn item_prices(&self) -> PageResult<Vec<f64>> {
        self.texts(&ITEM_PRICES)?.iter().map(|text| parse_amount(text, "$")).collect()
    }

    /// The quantity column, one entry per line.
    pub fn quantities(&self) -> PageResult<Vec<u32>> {
        self.texts(&ITEM_QUANTITIES)?
            .into_iter()
            .map(|text| match text.trim().parse::<u32>() {
                Ok(n) => Ok(n),
                Err(_) => Err(PageError::PriceFormat {
                    text,
                }),
            })
            .collect()
    }

    pub fn contains_product(&self, name: &str) -> PageResult<bool> {
        Ok(self.item_names()?.iter().any(|n| n == name))
    }

    pub fn remove_by_name(&self, name: &str) -> PageResult<()> {
        self.base.step(&format!("Remove '{}' from cart", name));
        let button = Locator::dynamic(Strategy::Id, format!("remove-{}", product_slug(name)));
        self.base.click(&button, false)
    }

    pub fn remove_by_index(&self, index: usize) -> PageResult<()> {
        self.base.step(&format!("Remove cart line #{}", index));
        let lines = self.base.find_all(&CART_ITEMS)?;
        match lines.get(index) {
            Some(line) => self.base.click_within(line, &REMOVE_BUTTONS),
            None => Err(PageError::ElementNotFound {
                locator: CART_ITEMS,
                index,
                found: lines.len(),
            }),
        }
    }

    /// Remove every line, first line first. Not atomic: an error part way
    /// leaves the remaining lines in place.
    pub fn clear(&self) -> PageResult<()> {
        self.base.step("Clear cart");
        for _ in 0..self.item_count()? {
            self.remove_by_index(0)?;
        }
        Ok(())
    }

    pub fn continue_shopping(&self) -> PageResult<()> {
        self.base.step("Continue shopping");
        self.base.click(&CONTINUE_SHOPPING, false)
    }

    pub fn proceed_to_checkout(&self) -> PageResult<()> {
        self.base.step("Proceed to checkout");
        self.base.click(&CHECKOUT_BUTTON, false)
    }

    pub fn is_empty(&self) -> PageResult<bool> {
        Ok(self.item_count()? == 0)
    }

    /// Sum of the line prices, before tax.
    pub fn total_price(&self) -> PageResult<f64> {
        Ok(self.item_prices()?.iter().sum())
    }
}

impl<'a> Page for CartPage<'a> {
    fn base(&self) -> &BasePage<'_> {
        &self.base
    }
}

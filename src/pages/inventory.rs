use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::components::SelectElement;
use crate::config::PageConfig;
use crate::driver::{Driver, ElementHandle};
use crate::error::{PageError, PageResult};
use crate::locator::{product_slug, Locator, Strategy};
use crate::pages::{parse_amount, BasePage, Page};

const INVENTORY_CONTAINER: Locator = Locator::id("inventory_container");
const INVENTORY_ITEMS: Locator = Locator::class_name("inventory_item");
const ITEM_NAMES: Locator = Locator::class_name("inventory_item_name");
const ITEM_PRICES: Locator = Locator::class_name("inventory_item_price");
const ITEM_DESCRIPTIONS: Locator = Locator::class_name("inventory_item_desc");
const ADD_BUTTONS: Locator = Locator::css("button[id^='add-to-cart']");
const REMOVE_BUTTONS: Locator = Locator::css("button[id^='remove']");
const CART_BADGE: Locator = Locator::class_name("shopping_cart_badge");
const CART_LINK: Locator = Locator::class_name("shopping_cart_link");
const SORT_DROPDOWN: Locator = Locator::class_name("product_sort_container");
const BURGER_MENU: Locator = Locator::id("react-burger-menu-btn");
const LOGOUT_LINK: Locator = Locator::id("logout_sidebar_link");

fn add_button(name: &str) -> Locator {
    Locator::dynamic(Strategy::Id, format!("add-to-cart-{}", product_slug(name)))
}

fn remove_button(name: &str) -> Locator {
    Locator::dynamic(Strategy::Id, format!("remove-{}", product_slug(name)))
}

/// Catalog orderings offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Name, A to Z.
    Az,
    /// Name, Z to A.
    Za,
    /// Price, low to high.
    LoHi,
    /// Price, high to low.
    HiLo,
}

impl SortOption {
    /// The `value` of the matching `<option>`.
    pub fn value(self) -> &'static str {
        match self {
            SortOption::Az => "az",
            SortOption::Za => "za",
            SortOption::LoHi => "lohi",
            SortOption::HiLo => "hilo",
        }
    }
}

impl FromStr for SortOption {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "az" => Ok(SortOption::Az),
            "za" => Ok(SortOption::Za),
            "lohi" => Ok(SortOption::LoHi),
            "hilo" => Ok(SortOption::HiLo),
            _ => Err(PageError::UnknownSortOption(s.to_string())),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// One catalog entry as displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ProductDetails {
    /// True for the placeholder returned for an out-of-range index.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.price.is_empty() && self.description.is_empty()
    }
}

/// The product catalog shown after login.
#[derive(Debug, Clone, Copy)]
pub struct InventoryPage<'a> {
    base: BasePage<'a>,
}

impl<'a> InventoryPage<'a> {
    pub fn new(driver: &'a dyn Driver, config: &'a PageConfig) -> Self {
        Self::with_base(BasePage::new(driver, config))
    }

    pub fn with_base(base: BasePage<'a>) -> Self {
        Self {
            base,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.base.is_visible(&INVENTORY_CONTAINER, None)
    }

    pub fn product_count(&self) -> PageResult<usize> {
        Ok(self.base.find_all(&INVENTORY_ITEMS)?.len())
    }

    fn texts(&self, locator: &Locator) -> PageResult<Vec<String>> {
        let driver = self.base.driver();
        let mut texts = Vec::new();
        for elem in self.base.find_all(locator)? {
            texts.push(driver.text(&elem)?);
        }
        Ok(texts)
    }

    /// Product names in display order.
    pub fn all_product_names(&self) -> PageResult<Vec<String>> {
        self.texts(&ITEM_NAMES)
    }

    /// Product prices in display order.
    pub fn all_product_prices(&self) -> PageResult<Vec<f64>> {
        self.texts(&ITEM_PRICES)?.iter().map(|text| parse_amount(text, "$")).collect()
    }

    /// Add the named product. A product that is already in the cart is left
    /// alone.
    pub fn add_to_cart_by_name(&self, name: &str) -> PageResult<()> {
        self.base.step(&format!("Add '{}' to cart", name));
        if self.base.is_present(&remove_button(name)) {
            debug!("'{}' is already in the cart", name);
            return Ok(());
        }
        self.base.click(&add_button(name), false)
    }

    /// Add the product at `index` in display order. Like
    /// [`add_to_cart_by_name`](Self::add_to_cart_by_name), a product whose add
    /// button never becomes clickable fails with `ElementNotClickable`.
    pub fn add_to_cart_by_index(&self, index: usize) -> PageResult<()> {
        self.base.step(&format!("Add product #{} to cart", index));
        let item = self.item(index)?;
        if !self.base.find_within(&item, &REMOVE_BUTTONS)?.is_empty() {
            debug!("product #{} is already in the cart", index);
            return Ok(());
        }
        self.base.click_within(&item, &ADD_BUTTONS)
    }

    pub fn remove_from_cart_by_name(&self, name: &str) -> PageResult<()> {
        self.base.step(&format!("Remove '{}' from cart", name));
        self.base.click(&remove_button(name), false)
    }

    /// Add the first `count` products and return their names. Asking for more
    /// products than the catalog holds adds all of them.
    pub fn add_multiple_to_cart(&self, count: usize) -> PageResult<Vec<String>> {
        let names: Vec<String> = self.all_product_names()?.into_iter().take(count).collect();
        for name in &names {
            self.add_to_cart_by_name(name)?;
        }
        Ok(names)
    }

    /// Number shown on the cart icon, 0 when the badge is absent.
    pub fn cart_badge_count(&self) -> PageResult<usize> {
        if !self.base.is_visible(&CART_BADGE, Some(self.base.config().short_timeout)) {
            return Ok(0);
        }
        let text = self.base.get_text(&CART_BADGE)?;
        let count = text.trim().parse::<usize>();
        count.map_err(|_| PageError::PriceFormat {
            text,
        })
    }

    pub fn go_to_cart(&self) -> PageResult<()> {
        self.base.step("Open cart");
        self.base.click(&CART_LINK, false)
    }

    pub fn sort_by(&self, option: SortOption) -> PageResult<()> {
        self.base.step(&format!("Sort products by {}", option));
        let dropdown = self.base.find_visible(&SORT_DROPDOWN, None)?;
        SelectElement::new(self.base.driver(), dropdown)?.select_by_value(option.value())?;
        Ok(())
    }

    /// Sort by the raw option value: `az`, `za`, `lohi` or `hilo`.
    pub fn sort_by_value(&self, value: &str) -> PageResult<()> {
        self.sort_by(value.parse()?)
    }

    /// The ordering currently selected in the dropdown.
    pub fn current_sort(&self) -> PageResult<SortOption> {
        let dropdown = self.base.find_visible(&SORT_DROPDOWN, None)?;
        let value = SelectElement::new(self.base.driver(), dropdown)?.selected_value()?;
        value.unwrap_or_default().parse()
    }

    pub fn logout(&self) -> PageResult<()> {
        self.base.step("Logout");
        self.base.click(&BURGER_MENU, false)?;
        self.base.click(&LOGOUT_LINK, false)
    }

    fn item(&self, index: usize) -> PageResult<ElementHandle> {
        let items = self.base.find_all(&INVENTORY_ITEMS)?;
        let found = items.len();
        items.into_iter().nth(index).ok_or(PageError::ElementNotFound {
            locator: INVENTORY_ITEMS,
            index,
            found,
        })
    }

    fn child_text(&self, item: &ElementHandle, locator: &Locator) -> PageResult<String> {
        match self.base.find_within(item, locator)?.first() {
            Some(elem) => Ok(self.base.driver().text(elem)?),
            None => Ok(String::new()),
        }
    }

    /// Name, price and description of the product at `index`. Out of range
    /// yields an empty [`ProductDetails`].
    pub fn product_details(&self, index: usize) -> PageResult<ProductDetails> {
        let item = match self.item(index) {
            Ok(item) => item,
            Err(PageError::ElementNotFound {
                ..
            }) => return Ok(ProductDetails::default()),
            Err(e) => return Err(e),
        };
        Ok(ProductDetails {
            name: self.child_text(&item, &ITEM_NAMES)?,
            price: self.child_text(&item, &ITEM_PRICES)?,
            description: self.child_text(&item, &ITEM_DESCRIPTIONS)?,
        })
    }
}

impl<'a> Page for InventoryPage<'a> {
    fn base(&self) -> &BasePage<'_> {
        &self.base
    }
}

//! In-memory storefront used by the unit tests.
//!
//! `FakeStore` implements [`Driver`] over a tiny model of the demo shop: it
//! renders the current screen into a flat node list on every call and answers
//! locator queries against it, so page objects run exactly the code paths
//! they run against a real browser.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;
use thirtyfour::common::command::MAGIC_ELEMENTID;
use thirtyfour::error::{WebDriverError, WebDriverErrorInfo};

use crate::config::PageConfig;
use crate::driver::{Driver, ElementHandle};
use crate::error::{DriverError, DriverResult};
use crate::locator::{product_slug, Locator, Strategy};
use crate::report::Reporter;

pub const BASE_URL: &str = "https://shop.test";

pub const CATALOG: [(&str, f64, &str); 6] = [
    ("Sauce Labs Backpack", 29.99, "carry.allTheThings() with the sleek backpack."),
    ("Sauce Labs Bike Light", 9.99, "A red light isn't the desired state in testing."),
    ("Sauce Labs Bolt T-Shirt", 15.99, "Get your testing superhero on."),
    ("Sauce Labs Fleece Jacket", 49.99, "A midweight quarter-zip fleece jacket."),
    ("Sauce Labs Onesie", 7.99, "Rib snap infant onesie for the junior automation engineer."),
    ("Test.allTheThings() T-Shirt (Red)", 15.99, "This classic Sauce Labs t-shirt is perfect."),
];

const VALID_USERS: &[&str] = &["standard_user", "problem_user", "performance_glitch_user"];
const PASSWORD: &str = "secret_sauce";
const TAX_RATE: f64 = 0.08;

/// Config with waits short enough for unit tests.
pub fn fast_config() -> PageConfig {
    PageConfig {
        base_url: BASE_URL.to_string(),
        timeout: Duration::from_millis(200),
        short_timeout: Duration::from_millis(80),
        navigation_timeout: Duration::from_millis(300),
        poll_interval: Duration::from_millis(10),
        ..PageConfig::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Blank,
    Login,
    Inventory,
    Cart,
    CheckoutInfo,
    CheckoutOverview,
    Complete,
}

impl Screen {
    fn path(self) -> &'static str {
        match self {
            Screen::Blank => "about:blank",
            Screen::Login => "/",
            Screen::Inventory => "/inventory.html",
            Screen::Cart => "/cart.html",
            Screen::CheckoutInfo => "/checkout-step-one.html",
            Screen::CheckoutOverview => "/checkout-step-two.html",
            Screen::Complete => "/checkout-complete.html",
        }
    }
}

#[derive(Debug)]
struct State {
    screen: Screen,
    user: Option<String>,
    fields: HashMap<String, String>,
    error: Option<String>,
    cart: Vec<usize>,
    sort: String,
    menu_open: bool,
    /// Number of lookups during which the catalog is still loading.
    loading: usize,
    dead: bool,
    clicks: Vec<String>,
    scrolled: Vec<String>,
}

#[derive(Debug, Clone)]
struct Node {
    handle: String,
    parent: Option<String>,
    tag: &'static str,
    html_id: Option<String>,
    classes: Vec<&'static str>,
    data_test: Option<&'static str>,
    value: Option<String>,
    text: String,
    displayed: bool,
    selected: bool,
}

impl Node {
    fn new(handle: impl Into<String>, tag: &'static str) -> Self {
        Node {
            handle: handle.into(),
            parent: None,
            tag,
            html_id: None,
            classes: Vec::new(),
            data_test: None,
            value: None,
            text: String::new(),
            displayed: true,
            selected: false,
        }
    }

    /// Node addressed by its html id.
    fn with_id(id: impl Into<String>, tag: &'static str) -> Self {
        let id = id.into();
        let mut node = Node::new(id.clone(), tag);
        node.html_id = Some(id);
        node
    }

    fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn child_of(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    fn attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.html_id.clone(),
            "class" => Some(self.classes.join(" ")),
            "data-test" => self.data_test.map(String::from),
            "value" => self.value.clone(),
            _ => None,
        }
    }
}

/// A selector of the form `tag.class[attr^='value']`, every part optional.
struct Css<'s> {
    tag: Option<&'s str>,
    class: Option<&'s str>,
    attr: Option<(&'s str, bool, &'s str)>,
}

impl<'s> Css<'s> {
    fn parse(selector: &'s str) -> Self {
        let (head, attr) = match selector.find('[') {
            Some(i) => {
                let inner = selector[i + 1..].trim_end_matches(']');
                let (name, prefix, value) = match inner.find("^=") {
                    Some(j) => (&inner[..j], true, &inner[j + 2..]),
                    None => {
                        let j = inner.find('=').unwrap_or(inner.len());
                        (&inner[..j], false, inner.get(j + 1..).unwrap_or(""))
                    }
                };
                let value = value.trim_matches(|c| c == '\'' || c == '"');
                (&selector[..i], Some((name, prefix, value)))
            }
            None => (selector, None),
        };
        let (tag, class) = match head.find('.') {
            Some(i) => (&head[..i], Some(&head[i + 1..])),
            None => (head, None),
        };
        Css {
            tag: if tag.is_empty() { None } else { Some(tag) },
            class,
            attr,
        }
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = self.tag {
            if node.tag != tag {
                return false;
            }
        }
        if let Some(class) = self.class {
            if !node.classes.contains(&class) {
                return false;
            }
        }
        if let Some((name, prefix, value)) = self.attr {
            match node.attr(name) {
                Some(actual) if prefix => actual.starts_with(value),
                Some(actual) => actual == value,
                None => false,
            }
        } else {
            true
        }
    }
}

fn matches(node: &Node, locator: &Locator) -> bool {
    let selector = locator.selector();
    match locator.strategy() {
        Strategy::Id => node.html_id.as_deref() == Some(selector),
        Strategy::ClassName => node.classes.contains(&selector),
        Strategy::Tag => node.tag == selector,
        Strategy::Css => Css::parse(selector).matches(node),
        _ => false,
    }
}

fn money(v: f64) -> String {
    format!("{:.2}", v)
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// The simulated browser session.
#[derive(Debug)]
pub struct FakeStore {
    state: RefCell<State>,
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore {
            state: RefCell::new(State {
                screen: Screen::Blank,
                user: None,
                fields: HashMap::new(),
                error: None,
                cart: Vec::new(),
                sort: String::from("az"),
                menu_open: false,
                loading: 0,
                dead: false,
                clicks: Vec::new(),
                scrolled: Vec::new(),
            }),
        }
    }

    /// A session already past the login form.
    pub fn logged_in() -> Self {
        let store = FakeStore::new();
        {
            let mut s = store.state.borrow_mut();
            s.user = Some(String::from("standard_user"));
            s.screen = Screen::Inventory;
        }
        store
    }

    pub fn screen(&self) -> Screen {
        self.state.borrow().screen
    }

    pub fn goto(&self, screen: Screen) {
        self.state.borrow_mut().screen = screen;
    }

    pub fn cart(&self) -> Vec<&'static str> {
        self.state.borrow().cart.iter().map(|&i| CATALOG[i].0).collect()
    }

    pub fn put_in_cart(&self, index: usize) {
        self.state.borrow_mut().cart.push(index);
    }

    pub fn set_error(&self, message: &str) {
        self.state.borrow_mut().error = Some(message.to_string());
    }

    pub fn close_menu(&self) {
        self.state.borrow_mut().menu_open = false;
    }

    /// Keep the catalog hidden for the next `lookups` element lookups.
    pub fn delay_catalog(&self, lookups: usize) {
        self.state.borrow_mut().loading = lookups;
    }

    /// Make every further call fail as if the browser had gone away.
    pub fn kill(&self) {
        self.state.borrow_mut().dead = true;
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.borrow().clicks.clone()
    }

    pub fn scrolled(&self) -> Vec<String> {
        self.state.borrow().scrolled.clone()
    }

    pub fn field(&self, id: &str) -> String {
        self.state.borrow().fields.get(id).cloned().unwrap_or_default()
    }

    fn check_alive(&self) -> DriverResult<()> {
        if self.state.borrow().dead {
            let info = WebDriverErrorInfo::new("session deleted");
            return Err(WebDriverError::InvalidSessionId(info).into());
        }
        Ok(())
    }

    fn sorted_catalog(state: &State) -> Vec<usize> {
        let mut order: Vec<usize> = (0..CATALOG.len()).collect();
        match state.sort.as_str() {
            "za" => order.sort_by(|&a, &b| CATALOG[b].0.cmp(CATALOG[a].0)),
            "lohi" => order.sort_by(|&a, &b| CATALOG[a].1.partial_cmp(&CATALOG[b].1).unwrap()),
            "hilo" => order.sort_by(|&a, &b| CATALOG[b].1.partial_cmp(&CATALOG[a].1).unwrap()),
            _ => order.sort_by(|&a, &b| CATALOG[a].0.cmp(CATALOG[b].0)),
        }
        order
    }

    fn render(&self) -> Vec<Node> {
        let s = self.state.borrow();
        let mut dom = Vec::new();
        let input = |id: &str| {
            let mut node = Node::with_id(id, "input");
            node.value = Some(s.fields.get(id).cloned().unwrap_or_default());
            node
        };
        let error_banner = |dom: &mut Vec<Node>| {
            if let Some(message) = &s.error {
                let mut h3 = Node::new("error-banner", "h3").text(message.clone());
                h3.data_test = Some("error");
                dom.push(h3);
                dom.push(Node::new("error-dismiss", "button").class("error-button"));
            }
        };
        let header = |dom: &mut Vec<Node>| {
            dom.push(Node::new("cart-link", "a").class("shopping_cart_link"));
            if !s.cart.is_empty() {
                dom.push(
                    Node::new("cart-badge", "span")
                        .class("shopping_cart_badge")
                        .text(s.cart.len().to_string()),
                );
            }
            dom.push(Node::with_id("react-burger-menu-btn", "button"));
            let mut logout = Node::with_id("logout_sidebar_link", "a").text("Logout");
            logout.displayed = s.menu_open;
            dom.push(logout);
        };
        let cart_lines = |dom: &mut Vec<Node>, with_remove: bool| {
            for (line, &p) in s.cart.iter().enumerate() {
                let (name, price, desc) = CATALOG[p];
                let item = format!("cart-line-{}", line);
                dom.push(Node::new(item.clone(), "div").class("cart_item"));
                dom.push(
                    Node::new(format!("{}/qty", item), "div")
                        .class("cart_quantity")
                        .text("1")
                        .child_of(&item),
                );
                dom.push(
                    Node::new(format!("{}/name", item), "div")
                        .class("inventory_item_name")
                        .text(name)
                        .child_of(&item),
                );
                dom.push(
                    Node::new(format!("{}/desc", item), "div")
                        .class("inventory_item_desc")
                        .text(desc)
                        .child_of(&item),
                );
                dom.push(
                    Node::new(format!("{}/price", item), "div")
                        .class("inventory_item_price")
                        .text(format!("${}", money(price)))
                        .child_of(&item),
                );
                if with_remove {
                    dom.push(
                        Node::with_id(format!("remove-{}", product_slug(name)), "button")
                            .text("Remove")
                            .child_of(&item),
                    );
                }
            }
        };

        match s.screen {
            Screen::Blank => {}
            Screen::Login => {
                dom.push(input("user-name"));
                dom.push(input("password"));
                dom.push(Node::with_id("login-button", "input"));
                error_banner(&mut dom);
            }
            Screen::Inventory => {
                header(&mut dom);
                let mut select = Node::new("sort-select", "select").class("product_sort_container");
                select.value = Some(s.sort.clone());
                dom.push(select);
                for value in &["az", "za", "lohi", "hilo"] {
                    let mut option = Node::new(format!("sort-{}", value), "option")
                        .child_of("sort-select")
                        .text(*value);
                    option.value = Some(value.to_string());
                    option.selected = s.sort == *value;
                    dom.push(option);
                }
                if s.loading == 0 {
                    dom.push(Node::with_id("inventory_container", "div"));
                    for (pos, p) in Self::sorted_catalog(&s).into_iter().enumerate() {
                        let (name, price, desc) = CATALOG[p];
                        let item = format!("item-{}", pos);
                        dom.push(Node::new(item.clone(), "div").class("inventory_item"));
                        dom.push(
                            Node::new(format!("{}/name", item), "div")
                                .class("inventory_item_name")
                                .text(name)
                                .child_of(&item),
                        );
                        dom.push(
                            Node::new(format!("{}/desc", item), "div")
                                .class("inventory_item_desc")
                                .text(desc)
                                .child_of(&item),
                        );
                        dom.push(
                            Node::new(format!("{}/price", item), "div")
                                .class("inventory_item_price")
                                .text(format!("${}", money(price)))
                                .child_of(&item),
                        );
                        let button = if s.cart.contains(&p) {
                            Node::with_id(format!("remove-{}", product_slug(name)), "button")
                                .text("Remove")
                        } else {
                            Node::with_id(format!("add-to-cart-{}", product_slug(name)), "button")
                                .text("Add to cart")
                        };
                        dom.push(button.child_of(&item));
                    }
                }
            }
            Screen::Cart => {
                header(&mut dom);
                cart_lines(&mut dom, true);
                dom.push(Node::with_id("continue-shopping", "button"));
                let mut checkout = Node::with_id("checkout", "button");
                checkout.data_test = Some("checkout");
                dom.push(checkout);
            }
            Screen::CheckoutInfo => {
                header(&mut dom);
                dom.push(input("first-name"));
                dom.push(input("last-name"));
                dom.push(input("postal-code"));
                dom.push(Node::with_id("continue", "input"));
                dom.push(Node::with_id("cancel", "button"));
                error_banner(&mut dom);
            }
            Screen::CheckoutOverview => {
                header(&mut dom);
                cart_lines(&mut dom, false);
                let subtotal: f64 = s.cart.iter().map(|&p| CATALOG[p].1).sum();
                let tax = round_cents(subtotal * TAX_RATE);
                dom.push(
                    Node::new("subtotal", "div")
                        .class("summary_subtotal_label")
                        .text(format!("Item total: ${}", money(subtotal))),
                );
                dom.push(
                    Node::new("tax", "div")
                        .class("summary_tax_label")
                        .text(format!("Tax: ${}", money(tax))),
                );
                dom.push(
                    Node::new("total", "div")
                        .class("summary_total_label")
                        .text(format!("Total: ${}", money(subtotal + tax))),
                );
                dom.push(Node::with_id("finish", "button"));
                dom.push(Node::with_id("cancel", "button"));
            }
            Screen::Complete => {
                header(&mut dom);
                dom.push(
                    Node::new("complete-header", "h2")
                        .class("complete-header")
                        .text("Thank you for your order!"),
                );
                dom.push(
                    Node::new("complete-text", "div")
                        .class("complete-text")
                        .text("Your order has been dispatched, and will arrive shortly."),
                );
                dom.push(Node::with_id("back-to-products", "button"));
            }
        }
        dom
    }

    fn node(&self, element: &ElementHandle) -> DriverResult<Node> {
        self.check_alive()?;
        self.render()
            .into_iter()
            .find(|n| n.handle == element.id())
            .ok_or_else(|| DriverError::StaleElement(element.id().to_string()))
    }

    fn show(&self, screen: Screen) {
        let mut s = self.state.borrow_mut();
        s.screen = screen;
        s.error = None;
        s.menu_open = false;
    }

    fn submit_login(&self) {
        let (user, password) = {
            let s = self.state.borrow();
            (
                s.fields.get("user-name").cloned().unwrap_or_default(),
                s.fields.get("password").cloned().unwrap_or_default(),
            )
        };
        let error = if user.is_empty() {
            Some("Epic sadface: Username is required")
        } else if password.is_empty() {
            Some("Epic sadface: Password is required")
        } else if password != PASSWORD {
            Some("Epic sadface: Username and password do not match any user in this service")
        } else if user == "locked_out_user" {
            Some("Epic sadface: Sorry, this user has been locked out.")
        } else if !VALID_USERS.contains(&user.as_str()) {
            Some("Epic sadface: Username and password do not match any user in this service")
        } else {
            None
        };
        match error {
            Some(message) => self.set_error(message),
            None => {
                self.show(Screen::Inventory);
                let mut s = self.state.borrow_mut();
                s.user = Some(user.clone());
                if user == "performance_glitch_user" {
                    s.loading = 5;
                }
            }
        }
    }

    fn submit_checkout_info(&self) {
        let error = {
            let s = self.state.borrow();
            let empty = |id: &str| s.fields.get(id).map_or(true, |v| v.is_empty());
            if empty("first-name") {
                Some("Error: First Name is required")
            } else if empty("last-name") {
                Some("Error: Last Name is required")
            } else if empty("postal-code") {
                Some("Error: Postal Code is required")
            } else {
                None
            }
        };
        match error {
            Some(message) => self.set_error(message),
            None => self.show(Screen::CheckoutOverview),
        }
    }

    fn activate(&self, node: &Node) {
        let screen = self.screen();
        let id = node.handle.as_str();
        match id {
            "login-button" => self.submit_login(),
            "error-dismiss" => self.state.borrow_mut().error = None,
            "cart-link" => self.show(Screen::Cart),
            "react-burger-menu-btn" => self.state.borrow_mut().menu_open = true,
            "logout_sidebar_link" => {
                self.show(Screen::Login);
                self.state.borrow_mut().user = None;
            }
            "continue-shopping" | "back-to-products" => self.show(Screen::Inventory),
            "checkout" => self.show(Screen::CheckoutInfo),
            "continue" => self.submit_checkout_info(),
            "cancel" => self.show(Screen::Cart),
            "finish" => {
                self.show(Screen::Complete);
                self.state.borrow_mut().cart.clear();
            }
            _ if id.starts_with("sort-") && node.tag == "option" => {
                self.state.borrow_mut().sort = id["sort-".len()..].to_string();
            }
            _ if id.starts_with("add-to-cart-") => {
                let slug = &id["add-to-cart-".len()..];
                if let Some(p) = CATALOG.iter().position(|c| product_slug(c.0) == slug) {
                    self.put_in_cart(p);
                }
            }
            _ if id.starts_with("remove-") => {
                let slug = &id["remove-".len()..];
                self.state.borrow_mut().cart.retain(|&p| product_slug(CATALOG[p].0) != slug);
            }
            _ => {}
        }
        if screen != self.screen() {
            let mut s = self.state.borrow_mut();
            s.fields.clear();
        }
    }
}

impl Driver for FakeStore {
    fn get(&self, url: &str) -> DriverResult<()> {
        self.check_alive()?;
        let path = match url.strip_prefix(BASE_URL) {
            Some(path) => path,
            None => {
                self.show(Screen::Blank);
                return Ok(());
            }
        };
        let logged_in = self.state.borrow().user.is_some();
        let screen = match path {
            "" | "/" => Screen::Login,
            "/inventory.html" if logged_in => Screen::Inventory,
            "/cart.html" if logged_in => Screen::Cart,
            _ => Screen::Login,
        };
        self.show(screen);
        Ok(())
    }

    fn find_elements(&self, locator: &Locator) -> DriverResult<Vec<ElementHandle>> {
        self.check_alive()?;
        let dom = self.render();
        {
            let mut s = self.state.borrow_mut();
            s.loading = s.loading.saturating_sub(1);
        }
        Ok(dom
            .iter()
            .filter(|n| matches(n, locator))
            .map(|n| ElementHandle::new(n.handle.clone()))
            .collect())
    }

    fn find_elements_from(
        &self,
        parent: &ElementHandle,
        locator: &Locator,
    ) -> DriverResult<Vec<ElementHandle>> {
        self.node(parent)?;
        Ok(self
            .render()
            .iter()
            .filter(|n| n.parent.as_deref() == Some(parent.id()) && matches(n, locator))
            .map(|n| ElementHandle::new(n.handle.clone()))
            .collect())
    }

    fn is_displayed(&self, element: &ElementHandle) -> DriverResult<bool> {
        Ok(self.node(element)?.displayed)
    }

    fn is_enabled(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.node(element).map(|_| true)
    }

    fn is_selected(&self, element: &ElementHandle) -> DriverResult<bool> {
        Ok(self.node(element)?.selected)
    }

    fn click(&self, element: &ElementHandle) -> DriverResult<()> {
        let node = self.node(element)?;
        if !node.displayed {
            let info = WebDriverErrorInfo::new(&format!("{} is not displayed", node.handle));
            return Err(WebDriverError::ElementNotInteractable(info).into());
        }
        self.state.borrow_mut().clicks.push(node.handle.clone());
        self.activate(&node);
        Ok(())
    }

    fn clear(&self, element: &ElementHandle) -> DriverResult<()> {
        let node = self.node(element)?;
        if let Some(id) = node.html_id {
            self.state.borrow_mut().fields.insert(id, String::new());
        }
        Ok(())
    }

    fn send_keys(&self, element: &ElementHandle, text: &str) -> DriverResult<()> {
        let node = self.node(element)?;
        if let Some(id) = node.html_id {
            self.state.borrow_mut().fields.entry(id).or_default().push_str(text);
        }
        Ok(())
    }

    fn text(&self, element: &ElementHandle) -> DriverResult<String> {
        Ok(self.node(element)?.text)
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>> {
        Ok(self.node(element)?.attr(name))
    }

    fn current_url(&self) -> DriverResult<String> {
        self.check_alive()?;
        Ok(match self.screen() {
            Screen::Blank => Screen::Blank.path().to_string(),
            screen => format!("{}{}", BASE_URL, screen.path()),
        })
    }

    fn title(&self) -> DriverResult<String> {
        self.check_alive()?;
        Ok(String::from("Swag Labs"))
    }

    fn screenshot_as_png(&self) -> DriverResult<Vec<u8>> {
        self.check_alive()?;
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.extend_from_slice(format!("{:?}", self.screen()).as_bytes());
        Ok(png)
    }

    fn execute_script(&self, script: &str, args: Vec<Value>) -> DriverResult<Value> {
        self.check_alive()?;
        if script.contains("scrollIntoView") {
            if let Some(id) = args.get(0).and_then(|a| a[MAGIC_ELEMENTID].as_str()) {
                self.node(&ElementHandle::new(id))?;
                self.state.borrow_mut().scrolled.push(id.to_string());
            }
        }
        Ok(Value::Null)
    }
}

/// [`FakeStore`] seen through a driver that logs element state checks and
/// clicks in call order. Elements can be disabled or detached by handle
/// prefix to model buttons that never become clickable.
#[derive(Debug)]
pub struct WatchedStore<'a> {
    store: &'a FakeStore,
    events: RefCell<Vec<String>>,
    disabled: RefCell<Vec<String>>,
    detached: RefCell<Vec<String>>,
}

impl<'a> WatchedStore<'a> {
    pub fn new(store: &'a FakeStore) -> Self {
        WatchedStore {
            store,
            events: RefCell::new(Vec::new()),
            disabled: RefCell::new(Vec::new()),
            detached: RefCell::new(Vec::new()),
        }
    }

    /// Report elements whose handle starts with `prefix` as disabled.
    pub fn disable(&self, prefix: &str) {
        self.disabled.borrow_mut().push(prefix.to_string());
    }

    /// Leave elements whose handle starts with `prefix` out of child lookups.
    pub fn detach(&self, prefix: &str) {
        self.detached.borrow_mut().push(prefix.to_string());
    }

    /// `displayed <handle>`, `enabled <handle>` and `click <handle>` entries.
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Handles clicked so far.
    pub fn clicked(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix("click "))
            .map(String::from)
            .collect()
    }

    /// True if `handle` was checked for display and enabled state before each
    /// of its clicks.
    pub fn checked_before_click(&self, handle: &str) -> bool {
        let events = self.events.borrow();
        let (mut displayed, mut enabled) = (false, false);
        let mut clicked = false;
        for event in events.iter() {
            match event.split_once(' ') {
                Some(("displayed", h)) if h == handle => displayed = true,
                Some(("enabled", h)) if h == handle => enabled = displayed,
                Some(("click", h)) if h == handle => {
                    if !(displayed && enabled) {
                        return false;
                    }
                    clicked = true;
                    displayed = false;
                    enabled = false;
                }
                _ => {}
            }
        }
        clicked
    }

    fn record(&self, kind: &str, element: &ElementHandle) {
        self.events.borrow_mut().push(format!("{} {}", kind, element.id()));
    }

    fn listed(list: &RefCell<Vec<String>>, element: &ElementHandle) -> bool {
        list.borrow().iter().any(|p| element.id().starts_with(p.as_str()))
    }
}

impl Driver for WatchedStore<'_> {
    fn get(&self, url: &str) -> DriverResult<()> {
        self.store.get(url)
    }

    fn find_elements(&self, locator: &Locator) -> DriverResult<Vec<ElementHandle>> {
        self.store.find_elements(locator)
    }

    fn find_elements_from(
        &self,
        parent: &ElementHandle,
        locator: &Locator,
    ) -> DriverResult<Vec<ElementHandle>> {
        let mut found = self.store.find_elements_from(parent, locator)?;
        found.retain(|e| !Self::listed(&self.detached, e));
        Ok(found)
    }

    fn is_displayed(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.record("displayed", element);
        self.store.is_displayed(element)
    }

    fn is_enabled(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.record("enabled", element);
        Ok(self.store.is_enabled(element)? && !Self::listed(&self.disabled, element))
    }

    fn is_selected(&self, element: &ElementHandle) -> DriverResult<bool> {
        self.store.is_selected(element)
    }

    fn click(&self, element: &ElementHandle) -> DriverResult<()> {
        self.record("click", element);
        self.store.click(element)
    }

    fn clear(&self, element: &ElementHandle) -> DriverResult<()> {
        self.store.clear(element)
    }

    fn send_keys(&self, element: &ElementHandle, text: &str) -> DriverResult<()> {
        self.store.send_keys(element, text)
    }

    fn text(&self, element: &ElementHandle) -> DriverResult<String> {
        self.store.text(element)
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>> {
        self.store.attribute(element, name)
    }

    fn current_url(&self) -> DriverResult<String> {
        self.store.current_url()
    }

    fn title(&self) -> DriverResult<String> {
        self.store.title()
    }

    fn screenshot_as_png(&self) -> DriverResult<Vec<u8>> {
        self.store.screenshot_as_png()
    }

    fn execute_script(&self, script: &str, args: Vec<Value>) -> DriverResult<Value> {
        self.store.execute_script(script, args)
    }
}

/// Reporter that remembers everything it is told. Clones share the record.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub steps: Rc<RefCell<Vec<String>>>,
    pub attachments: Rc<RefCell<Vec<(String, usize)>>>,
}

impl Reporter for RecordingReporter {
    fn step(&self, name: &str) {
        self.steps.borrow_mut().push(name.to_string());
    }

    fn attach_png(&self, name: &str, png: &[u8]) {
        self.attachments.borrow_mut().push((name.to_string(), png.len()));
    }
}

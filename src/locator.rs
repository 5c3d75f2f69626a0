use std::borrow::Cow;
use std::fmt;

use thirtyfour::By;

/// How a [`Locator`] selects elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Id,
    ClassName,
    Css,
    Name,
    Tag,
    XPath,
    LinkText,
}

/// Identifies zero or more elements in the current document.
///
/// Locators are immutable. Page objects declare theirs as constants:
///
/// ```rust
/// use storefront_pages::Locator;
///
/// const LOGIN_BUTTON: Locator = Locator::id("login-button");
/// assert_eq!(LOGIN_BUTTON.selector(), "login-button");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    selector: Cow<'static, str>,
}

impl Locator {
    pub const fn new(strategy: Strategy, selector: &'static str) -> Self {
        Self {
            strategy,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Build a locator from a selector computed at runtime.
    pub fn dynamic<S: Into<String>>(strategy: Strategy, selector: S) -> Self {
        Self {
            strategy,
            selector: Cow::Owned(selector.into()),
        }
    }

    pub const fn id(selector: &'static str) -> Self {
        Self::new(Strategy::Id, selector)
    }

    pub const fn class_name(selector: &'static str) -> Self {
        Self::new(Strategy::ClassName, selector)
    }

    pub const fn css(selector: &'static str) -> Self {
        Self::new(Strategy::Css, selector)
    }

    pub const fn tag(selector: &'static str) -> Self {
        Self::new(Strategy::Tag, selector)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The equivalent thirtyfour selector.
    pub fn to_by(&self) -> By {
        let s = self.selector();
        match self.strategy {
            Strategy::Id => By::Id(s),
            Strategy::ClassName => By::ClassName(s),
            Strategy::Css => By::Css(s),
            Strategy::Name => By::Name(s),
            Strategy::Tag => By::Tag(s),
            Strategy::XPath => By::XPath(s),
            Strategy::LinkText => By::LinkText(s),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let strategy = match self.strategy {
            Strategy::Id => "id",
            Strategy::ClassName => "class name",
            Strategy::Css => "css",
            Strategy::Name => "name",
            Strategy::Tag => "tag",
            Strategy::XPath => "xpath",
            Strategy::LinkText => "link text",
        };
        write!(f, "({}, {:?})", strategy, self.selector)
    }
}

/// Derive the identifier fragment the storefront uses for a product's controls.
///
/// The product name is lowercased and every space becomes a hyphen. No other
/// characters are touched, so `"Test.allTheThings() T-Shirt (Red)"` maps to
/// `"test.allthethings()-t-shirt-(red)"`. When the application encodes names
/// differently, the resulting locator simply matches nothing.
pub fn product_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

// Selection helpers for `<select>` elements, modelled on the Select class
// from the python selenium library at:
// https://github.com/SeleniumHQ/selenium/blob/trunk/py/selenium/webdriver/support/select.py

// Copyright 2021 Stephen Pryde and the thirtyfour_sync contributors
// Derived (and modified) from the Selenium project at https://github.com/SeleniumHQ/selenium.
//
// Copyright 2011-2020 Software Freedom Conservancy
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::driver::{Driver, ElementHandle};
use crate::error::{DriverError, DriverResult};
use crate::locator::{Locator, Strategy};

const OPTION: Locator = Locator::tag("option");

/// Escape the specified string for use in a Css attribute selector.
pub fn escape_string(value: &str) -> String {
    if value.contains('"') {
        format!("'{}'", value.replace('\'', "\\'"))
    } else {
        format!("\"{}\"", value)
    }
}

/// Convenience wrapper for `<select>` elements.
#[derive(Debug)]
pub struct SelectElement<'a> {
    driver: &'a dyn Driver,
    element: ElementHandle,
    multiple: bool,
}

impl<'a> SelectElement<'a> {
    /// Wrap `element`, which must be a `<select>` element.
    pub fn new(driver: &'a dyn Driver, element: ElementHandle) -> DriverResult<Self> {
        let multiple =
            driver.attribute(&element, "multiple")?.filter(|x| x != "false").is_some();
        Ok(SelectElement {
            driver,
            element,
            multiple,
        })
    }

    /// All options belonging to this select tag, in document order.
    pub fn options(&self) -> DriverResult<Vec<ElementHandle>> {
        self.driver.find_elements_from(&self.element, &OPTION)
    }

    /// The first selected option.
    pub fn first_selected_option(&self) -> DriverResult<ElementHandle> {
        for option in self.options()? {
            if self.driver.is_selected(&option)? {
                return Ok(option);
            }
        }
        Err(DriverError::NoSuchElement(String::from("no options are selected")))
    }

    /// The `value` attribute of the first selected option.
    pub fn selected_value(&self) -> DriverResult<Option<String>> {
        let option = self.first_selected_option()?;
        self.driver.attribute(&option, "value")
    }

    fn set_selected(&self, option: &ElementHandle) -> DriverResult<()> {
        if !self.driver.is_selected(option)? {
            self.driver.click(option)?;
        }
        Ok(())
    }

    /// Select the option(s) whose `value` attribute equals `value`.
    pub fn select_by_value(&self, value: &str) -> DriverResult<()> {
        let selector = format!("option[value={}]", escape_string(value));
        let locator = Locator::dynamic(Strategy::Css, selector);
        let options = self.driver.find_elements_from(&self.element, &locator)?;
        if options.is_empty() {
            return Err(DriverError::NoSuchElement(format!(
                "could not locate option with value: {}",
                value
            )));
        }
        for option in &options {
            self.set_selected(option)?;
            if !self.multiple {
                break;
            }
        }
        Ok(())
    }
}

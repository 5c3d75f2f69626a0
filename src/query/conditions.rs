//! Wait conditions over the live document.
//!
//! A condition is evaluated afresh on every poll. It returns `Ok(Some(_))`
//! once satisfied and `Ok(None)` while it is not. Errors that only mean
//! "not there yet" are folded into `Ok(None)` by [`handle_errors`]; any
//! other error aborts the wait.

use stringmatch::Needle;

use crate::driver::{Driver, ElementHandle};
use crate::error::DriverResult;
use crate::locator::Locator;

pub type Condition<'a, T> = Box<dyn Fn(&dyn Driver) -> DriverResult<Option<T>> + 'a>;

/// Treat transient driver errors as an unmet condition.
pub fn handle_errors<T>(result: DriverResult<Option<T>>) -> DriverResult<Option<T>> {
    match result {
        Err(e) if e.is_transient() => Ok(None),
        x => x,
    }
}

/// First element matching `locator`, if any.
fn first_match(driver: &dyn Driver, locator: &Locator) -> DriverResult<Option<ElementHandle>> {
    Ok(driver.find_elements(locator)?.into_iter().next())
}

fn displayed(driver: &dyn Driver, elem: Option<ElementHandle>) -> DriverResult<Option<ElementHandle>> {
    match elem {
        Some(elem) if driver.is_displayed(&elem)? => Ok(Some(elem)),
        _ => Ok(None),
    }
}

fn enabled(driver: &dyn Driver, elem: Option<ElementHandle>) -> DriverResult<Option<ElementHandle>> {
    match elem {
        Some(elem) if driver.is_enabled(&elem)? => Ok(Some(elem)),
        _ => Ok(None),
    }
}

fn first_displayed(driver: &dyn Driver, locator: &Locator) -> DriverResult<Option<ElementHandle>> {
    displayed(driver, first_match(driver, locator)?)
}

fn first_clickable(driver: &dyn Driver, locator: &Locator) -> DriverResult<Option<ElementHandle>> {
    enabled(driver, first_displayed(driver, locator)?)
}

fn first_clickable_within(
    driver: &dyn Driver,
    parent: &ElementHandle,
    locator: &Locator,
) -> DriverResult<Option<ElementHandle>> {
    let elem = driver.find_elements_from(parent, locator)?.into_iter().next();
    enabled(driver, displayed(driver, elem)?)
}

fn first_text_match<N: Needle>(
    driver: &dyn Driver,
    locator: &Locator,
    needle: &N,
) -> DriverResult<Option<String>> {
    match first_displayed(driver, locator)? {
        Some(elem) => {
            let text = driver.text(&elem)?;
            Ok(if needle.is_match(&text) {
                Some(text)
            } else {
                None
            })
        }
        None => Ok(None),
    }
}

/// The first matching element exists and is displayed.
pub fn visibility_of(locator: &Locator) -> Condition<'_, ElementHandle> {
    Box::new(move |driver: &dyn Driver| handle_errors(first_displayed(driver, locator)))
}

/// The first matching element is displayed and enabled.
pub fn clickable(locator: &Locator) -> Condition<'_, ElementHandle> {
    Box::new(move |driver: &dyn Driver| handle_errors(first_clickable(driver, locator)))
}

/// The first descendant of `parent` matching `locator` is displayed and
/// enabled. A stale `parent` counts as not yet clickable.
pub fn clickable_within<'a>(
    parent: &'a ElementHandle,
    locator: &'a Locator,
) -> Condition<'a, ElementHandle> {
    Box::new(move |driver: &dyn Driver| {
        handle_errors(first_clickable_within(driver, parent, locator))
    })
}

/// At least one element matches. Yields all of them.
pub fn presence_of_all(locator: &Locator) -> Condition<'_, Vec<ElementHandle>> {
    Box::new(move |driver: &dyn Driver| {
        handle_errors(driver.find_elements(locator).map(|elems| {
            if elems.is_empty() {
                None
            } else {
                Some(elems)
            }
        }))
    })
}

/// No element matches, or the first match is hidden or has gone stale.
pub fn invisibility_of(locator: &Locator) -> Condition<'_, ()> {
    Box::new(move |driver: &dyn Driver| {
        let elem = match first_match(driver, locator) {
            Ok(Some(elem)) => elem,
            Ok(None) => return Ok(Some(())),
            Err(e) if e.is_transient() => return Ok(Some(())),
            Err(e) => return Err(e),
        };
        match driver.is_displayed(&elem) {
            Ok(true) => Ok(None),
            Ok(false) => Ok(Some(())),
            Err(e) if e.is_transient() => Ok(Some(())),
            Err(e) => Err(e),
        }
    })
}

/// The current URL matches `needle`.
pub fn url_matches<'a, N>(needle: &'a N) -> Condition<'a, ()>
where
    N: Needle,
{
    Box::new(move |driver: &dyn Driver| {
        let url = driver.current_url()?;
        Ok(if needle.is_match(&url) {
            Some(())
        } else {
            None
        })
    })
}

/// The first matching element is displayed and its text matches `needle`.
pub fn text_matches<'a, N>(locator: &'a Locator, needle: &'a N) -> Condition<'a, String>
where
    N: Needle,
{
    Box::new(move |driver: &dyn Driver| {
        handle_errors(first_text_match(driver, locator, needle))
    })
}

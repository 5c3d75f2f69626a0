use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thirtyfour::common::command::MAGIC_ELEMENTID;

use crate::error::DriverResult;
use crate::locator::Locator;

/// Reference to a single element in the live document.
///
/// Handles are only meaningful to the driver that returned them, and only
/// for as long as the element stays attached to the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: String,
}

impl ElementHandle {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The JSON form used to pass this element as a script argument.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(MAGIC_ELEMENTID.to_string(), Value::String(self.id.clone()));
        Value::Object(map)
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"(element="{}")"#, self.id)
    }
}

impl Serialize for ElementHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(MAGIC_ELEMENTID, &self.id)?;
        map.end()
    }
}

/// The browser primitives page objects are built from.
///
/// Every method is a single immediate round trip: waiting is layered on top
/// by [`Waiter`](crate::query::Waiter), never done here.
pub trait Driver: fmt::Debug {
    /// Navigate to the specified URL.
    fn get(&self, url: &str) -> DriverResult<()>;

    /// All elements in the document matching `locator`, in document order.
    fn find_elements(&self, locator: &Locator) -> DriverResult<Vec<ElementHandle>>;

    /// All descendants of `parent` matching `locator`, in document order.
    fn find_elements_from(
        &self,
        parent: &ElementHandle,
        locator: &Locator,
    ) -> DriverResult<Vec<ElementHandle>>;

    fn is_displayed(&self, element: &ElementHandle) -> DriverResult<bool>;

    fn is_enabled(&self, element: &ElementHandle) -> DriverResult<bool>;

    fn is_selected(&self, element: &ElementHandle) -> DriverResult<bool>;

    fn click(&self, element: &ElementHandle) -> DriverResult<()>;

    fn clear(&self, element: &ElementHandle) -> DriverResult<()>;

    fn send_keys(&self, element: &ElementHandle, text: &str) -> DriverResult<()>;

    /// Rendered text of the element.
    fn text(&self, element: &ElementHandle) -> DriverResult<String>;

    fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>>;

    fn current_url(&self) -> DriverResult<String>;

    fn title(&self) -> DriverResult<String>;

    /// Screenshot of the current viewport, PNG encoded.
    fn screenshot_as_png(&self) -> DriverResult<Vec<u8>>;

    /// Execute synchronous javascript. Elements are passed via
    /// [`ElementHandle::to_json`].
    fn execute_script(&self, script: &str, args: Vec<Value>) -> DriverResult<Value>;

    fn scroll_into_view(&self, element: &ElementHandle) -> DriverResult<()> {
        self.execute_script("arguments[0].scrollIntoView(true);", vec![element.to_json()])?;
        Ok(())
    }
}

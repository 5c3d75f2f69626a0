use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thirtyfour::common::command::{Command, FormatRequestData, MAGIC_ELEMENTID};
use thirtyfour::{ElementId, SessionId};

use crate::driver::ElementHandle;
use crate::error::{DriverError, DriverResult};
use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::locator::Locator;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
    #[serde(default)]
    capabilities: Value,
}

/// Start a new session and return its id plus the capabilities the server granted.
pub fn start_session(
    conn: &dyn WebDriverHttpClientSync,
    capabilities: Value,
) -> DriverResult<(SessionId, Value)> {
    let request = Command::NewSession(capabilities).format_request(&SessionId::null());
    let v = conn.execute(request)?;
    let session: NewSession = serde_json::from_value(v["value"].clone())?;
    Ok((SessionId::from(session.session_id), session.capabilities))
}

/// Unwrap the raw JSON into an ElementHandle.
fn convert_element(value: &Value) -> DriverResult<ElementHandle> {
    value[MAGIC_ELEMENTID]
        .as_str()
        .map(ElementHandle::new)
        .ok_or_else(|| DriverError::UnexpectedResponse(format!("not an element: {}", value)))
}

/// Unwrap the raw JSON into a Vec of ElementHandles.
fn convert_elements(value: &Value) -> DriverResult<Vec<ElementHandle>> {
    match value.as_array() {
        Some(values) => values.iter().map(convert_element).collect(),
        None => Err(DriverError::UnexpectedResponse(format!("not an element list: {}", value))),
    }
}

fn convert_string(value: &Value) -> DriverResult<String> {
    Ok(serde_json::from_value(value.clone())?)
}

fn convert_bool(value: &Value) -> DriverResult<bool> {
    Ok(serde_json::from_value(value.clone())?)
}

fn element_id(element: &ElementHandle) -> ElementId {
    ElementId::from(element.id())
}

/// An open W3C session on a WebDriver server.
///
/// Each method sends exactly one [`Command`] and returns the unwrapped
/// `value` member of the response.
#[derive(Debug)]
pub struct WebDriverSession {
    session_id: SessionId,
    conn: Arc<dyn WebDriverHttpClientSync>,
}

impl WebDriverSession {
    pub fn new(session_id: SessionId, conn: Arc<dyn WebDriverHttpClientSync>) -> Self {
        Self {
            session_id,
            conn,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn execute(&self, command: Command) -> DriverResult<Value> {
        let mut v = self.conn.execute(command.format_request(&self.session_id))?;
        Ok(v.get_mut("value").map(Value::take).unwrap_or(Value::Null))
    }

    pub fn delete(&self) -> DriverResult<()> {
        self.execute(Command::DeleteSession)?;
        Ok(())
    }

    pub fn get(&self, url: &str) -> DriverResult<()> {
        self.execute(Command::NavigateTo(url.to_string()))?;
        Ok(())
    }

    pub fn current_url(&self) -> DriverResult<String> {
        convert_string(&self.execute(Command::GetCurrentUrl)?)
    }

    pub fn title(&self) -> DriverResult<String> {
        convert_string(&self.execute(Command::GetTitle)?)
    }

    pub fn find_elements(&self, locator: &Locator) -> DriverResult<Vec<ElementHandle>> {
        let selector = locator.to_by().get_w3c_selector();
        convert_elements(&self.execute(Command::FindElements(selector))?)
    }

    pub fn find_elements_from(
        &self,
        parent: &ElementHandle,
        locator: &Locator,
    ) -> DriverResult<Vec<ElementHandle>> {
        let selector = locator.to_by().get_w3c_selector();
        let v = self.execute(Command::FindElementsFromElement(element_id(parent), selector))?;
        convert_elements(&v)
    }

    pub fn is_displayed(&self, element: &ElementHandle) -> DriverResult<bool> {
        convert_bool(&self.execute(Command::IsElementDisplayed(element_id(element)))?)
    }

    pub fn is_enabled(&self, element: &ElementHandle) -> DriverResult<bool> {
        convert_bool(&self.execute(Command::IsElementEnabled(element_id(element)))?)
    }

    pub fn is_selected(&self, element: &ElementHandle) -> DriverResult<bool> {
        convert_bool(&self.execute(Command::IsElementSelected(element_id(element)))?)
    }

    pub fn click(&self, element: &ElementHandle) -> DriverResult<()> {
        self.execute(Command::ElementClick(element_id(element)))?;
        Ok(())
    }

    pub fn clear(&self, element: &ElementHandle) -> DriverResult<()> {
        self.execute(Command::ElementClear(element_id(element)))?;
        Ok(())
    }

    pub fn send_keys(&self, element: &ElementHandle, text: &str) -> DriverResult<()> {
        self.execute(Command::ElementSendKeys(element_id(element), text.into()))?;
        Ok(())
    }

    pub fn text(&self, element: &ElementHandle) -> DriverResult<String> {
        convert_string(&self.execute(Command::GetElementText(element_id(element)))?)
    }

    pub fn attribute(&self, element: &ElementHandle, name: &str) -> DriverResult<Option<String>> {
        let v =
            self.execute(Command::GetElementAttribute(element_id(element), name.to_string()))?;
        if !v.is_string() {
            Ok(None)
        } else {
            convert_string(&v).map(Some)
        }
    }

    pub fn screenshot_as_base64(&self) -> DriverResult<String> {
        convert_string(&self.execute(Command::TakeScreenshot)?)
    }

    pub fn execute_script(&self, script: &str, args: Vec<Value>) -> DriverResult<Value> {
        self.execute(Command::ExecuteScript(script.to_string(), args))
    }
}

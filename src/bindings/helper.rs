//! `SecurityHelper` JS class.

use std::rc::Rc;

use log::LevelFilter;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::CspListener;
use crate::config::LOG_TARGET;
use crate::core::{BrowserEnvironment, ContentValidator};
use crate::models::{ValidationResult, Violation};
use crate::utils::console;

/// Serialize to plain JS objects (maps as objects, not `Map`).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsError::from)
}

/// Page-facing wrapper around [`ContentValidator`].
///
/// Constructing it also starts CSP violation monitoring when supported.
#[wasm_bindgen]
pub struct SecurityHelper {
    validator: Rc<ContentValidator<BrowserEnvironment>>,
    listener: Option<CspListener>,
}

#[wasm_bindgen]
impl SecurityHelper {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SecurityHelper, JsError> {
        console_error_panic_hook::set_once();
        console::init(LevelFilter::Info);

        let mut helper = Self {
            validator: Rc::new(ContentValidator::new(BrowserEnvironment)?),
            listener: None,
        };
        helper.monitor_violations()?;
        log::info!(target: LOG_TARGET, "security helper initialized");
        Ok(helper)
    }

    /// Escape strings; any other value is returned unchanged.
    #[wasm_bindgen(js_name = sanitizeInput)]
    pub fn sanitize_input(&self, input: JsValue) -> JsValue {
        match input.as_string() {
            Some(text) => JsValue::from_str(&self.validator.sanitize_input(&text)),
            None => input,
        }
    }

    #[wasm_bindgen(js_name = validateContent)]
    pub fn validate_content(&self, content: JsValue) -> Result<JsValue, JsError> {
        let result = match content.as_string() {
            Some(text) => self.validator.validate_content(&text),
            None => ValidationResult::valid(),
        };
        to_js(&result)
    }

    /// `false` for anything that is not a string with an allowed scheme.
    #[wasm_bindgen(js_name = isValidUrl)]
    pub fn is_valid_url(&self, url: JsValue) -> bool {
        url.as_string().is_some_and(|url| self.validator.is_valid_url(&url))
    }

    #[wasm_bindgen(js_name = generateToken)]
    pub fn generate_token(&self) -> Result<String, JsError> {
        Ok(self.validator.generate_token()?)
    }

    #[wasm_bindgen(js_name = generateCSRFToken)]
    pub fn generate_csrf_token(&self) -> Result<String, JsError> {
        self.generate_token()
    }

    #[wasm_bindgen(js_name = isSecureContext)]
    pub fn is_secure_context(&self) -> bool {
        self.validator.is_secure_context()
    }

    /// Validate a `FormData`, `Map` or any iterable of `[name, value]` pairs.
    ///
    /// Non-string values (e.g. `File`) are skipped.
    #[wasm_bindgen(js_name = validateFormData)]
    pub fn validate_form_data(&self, entries: JsValue) -> Result<JsValue, JsError> {
        let iter = js_sys::try_iter(&entries)
            .map_err(|_| JsError::new("form data is not iterable"))?
            .ok_or_else(|| JsError::new("form data is not iterable"))?;

        let mut fields = Vec::new();
        for entry in iter {
            let pair = js_sys::Array::from(&entry.map_err(|_| JsError::new("form data iteration failed"))?);
            let Some(name) = pair.get(0).as_string() else {
                continue;
            };
            let value = pair.get(1).as_string().map_or(Value::Null, Value::String);
            fields.push((name, value));
        }
        to_js(&self.validator.validate_form_data(fields))
    }

    /// Accepts any value. Objects keep all their fields; anything that cannot
    /// be read as an object is logged as an empty record.
    #[wasm_bindgen(js_name = logViolation)]
    pub fn log_violation(&self, violation: JsValue) {
        let fields: Value = serde_wasm_bindgen::from_value(violation).unwrap_or(Value::Null);
        self.validator.log_violation(Violation::from(fields));
    }

    #[wasm_bindgen(js_name = getSecurityReport)]
    pub fn security_report(&self) -> Result<JsValue, JsError> {
        to_js(&self.validator.security_report())
    }

    #[wasm_bindgen(js_name = clearViolations)]
    pub fn clear_violations(&self) {
        self.validator.clear_violations();
    }

    /// Start forwarding CSP violation events. Returns whether monitoring is active.
    #[wasm_bindgen(js_name = monitorViolations)]
    pub fn monitor_violations(&mut self) -> Result<bool, JsError> {
        if self.listener.is_none() {
            self.listener = CspListener::attach(Rc::clone(&self.validator))?;
        }
        Ok(self.listener.is_some())
    }

    #[wasm_bindgen(js_name = stopMonitoring)]
    pub fn stop_monitoring(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.detach();
        }
    }
}

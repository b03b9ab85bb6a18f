//! `securitypolicyviolation` listener.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, SecurityPolicyViolationEvent};

use crate::config::{CSP_VIOLATION_KIND, LOG_TARGET};
use crate::core::{BrowserEnvironment, ContentValidator, PageEnvironment, Result, SecurityError};
use crate::models::Violation;
use crate::utils::dom;

const EVENT_NAME: &str = "securitypolicyviolation";

type Handler = Closure<dyn FnMut(SecurityPolicyViolationEvent)>;

/// Forwards CSP violation events from the document into a validator's log.
///
/// The handler stays registered for as long as this value lives.
pub struct CspListener {
    document: Document,
    handler: Handler,
}

impl CspListener {
    /// Register on the current document.
    ///
    /// Returns `Ok(None)` when the browser has no `SecurityPolicyViolationEvent`.
    pub fn attach(validator: Rc<ContentValidator<BrowserEnvironment>>) -> Result<Option<Self>> {
        if !dom::has_global("SecurityPolicyViolationEvent") {
            log::debug!(target: LOG_TARGET, "SecurityPolicyViolationEvent unsupported, CSP monitoring disabled");
            return Ok(None);
        }
        let document =
            dom::document().ok_or_else(|| SecurityError::Environment("no document".into()))?;

        let handler: Handler = Closure::new(move |event: SecurityPolicyViolationEvent| {
            let violation = Violation::new(CSP_VIOLATION_KIND)
                .with_directive(event.violated_directive())
                .with_blocked_uri(event.blocked_uri())
                .with_source_file(event.source_file())
                .with_timestamp(validator.environment().timestamp());
            validator.log_violation(violation);
        });

        document
            .add_event_listener_with_callback(EVENT_NAME, handler.as_ref().unchecked_ref())
            .map_err(|err| SecurityError::Environment(format!("{:?}", err)))?;

        Ok(Some(Self { document, handler }))
    }

    /// Unregister now instead of on drop.
    pub fn detach(self) {}
}

impl Drop for CspListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback(EVENT_NAME, self.handler.as_ref().unchecked_ref());
    }
}

//! JavaScript bindings: one service per thread, driven by action name and
//! JSON payload.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;
use crate::logging;
use crate::service::{dispatch, SlideService};

thread_local! {
    static SERVICE: RefCell<SlideService> = RefCell::new(SlideService::new(LayoutConfig::default()));
}

#[wasm_bindgen]
pub fn init_logging() {
    logging::init();
}

/// Runs one action and returns the JSON result envelope.
#[wasm_bindgen]
pub fn run_action(action: &str, payload_json: &str) -> String {
    SERVICE.with(|service| dispatch(&mut service.borrow_mut(), action, payload_json).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn actions_share_one_service_per_thread() {
        let created: Value =
            serde_json::from_str(&run_action("create_presentation", r#"{"title": "T"}"#)).unwrap();
        let id = created["presentation_id"].as_str().unwrap().to_string();

        let payload = format!(r#"{{"presentation_id": "{}"}}"#, id);
        let exported: Value = serde_json::from_str(&run_action("export_markdown", &payload)).unwrap();
        assert_eq!(exported["success"], true);
        assert!(exported["markdown"].as_str().unwrap().contains("### T"));
    }
}

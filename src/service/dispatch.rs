//! JSON entry point: action name plus payload in, result envelope out.

use anyhow::{bail, Context};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::store::PresentationStore;
use super::SlideService;

/// Every action name [`dispatch`] accepts.
pub const ACTIONS: &[&str] = &[
    "create_presentation",
    "load_presentation",
    "add_slide",
    "build_slide_from_markup",
    "build_presentation_from_outline",
    "get_slide_elements",
    "modify_element",
    "find_and_replace",
    "add_text_box",
    "add_image",
    "add_table",
    "add_chart",
    "export_markdown",
];

fn parse<T: DeserializeOwned>(action: &str, payload: &str) -> anyhow::Result<T> {
    let payload = if payload.trim().is_empty() { "{}" } else { payload };
    serde_json::from_str(payload).with_context(|| format!("invalid payload for '{}'", action))
}

fn to_value<T: Serialize>(response: T) -> anyhow::Result<Value> {
    serde_json::to_value(response).context("failed to encode the action result")
}

fn run<S: PresentationStore>(
    service: &mut SlideService<S>,
    action: &str,
    payload: &str,
) -> anyhow::Result<Value> {
    match action {
        "create_presentation" => to_value(service.create_presentation(parse(action, payload)?)?),
        "load_presentation" => to_value(service.load_presentation(parse(action, payload)?)?),
        "add_slide" => to_value(service.add_slide(parse(action, payload)?)?),
        "build_slide_from_markup" => {
            to_value(service.build_slide_from_markup(parse(action, payload)?)?)
        }
        "build_presentation_from_outline" => {
            to_value(service.build_presentation_from_outline(parse(action, payload)?)?)
        }
        "get_slide_elements" => to_value(service.get_slide_elements(parse(action, payload)?)?),
        "modify_element" => to_value(service.modify_element(parse(action, payload)?)?),
        "find_and_replace" => to_value(service.find_and_replace(parse(action, payload)?)?),
        "add_text_box" => to_value(service.add_text_box(parse(action, payload)?)?),
        "add_image" => to_value(service.add_image(parse(action, payload)?)?),
        "add_table" => to_value(service.add_table(parse(action, payload)?)?),
        "add_chart" => to_value(service.add_chart(parse(action, payload)?)?),
        "export_markdown" => to_value(service.export_markdown(parse(action, payload)?)?),
        other => bail!(
            "unknown action '{}'; expected one of: {}",
            other,
            ACTIONS.join(", ")
        ),
    }
}

/// Runs `action` with a JSON `payload`.
///
/// Always returns an object with `success` and, on failure, a `message`
/// naming the cause.
pub fn dispatch<S: PresentationStore>(
    service: &mut SlideService<S>,
    action: &str,
    payload: &str,
) -> Value {
    debug!("Dispatching '{}'", action);
    match run(service, action, payload) {
        Ok(value) => value,
        Err(e) => {
            warn!("Action '{}' failed: {:#}", action, e);
            json!({ "success": false, "message": format!("{:#}", e) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn unknown_action_is_reported() {
        let mut service = SlideService::new(LayoutConfig::default());
        let value = dispatch(&mut service, "explode", "{}");
        assert_eq!(value["success"], false);
        assert!(value["message"].as_str().unwrap().contains("unknown action 'explode'"));
    }

    #[test]
    fn bad_payload_names_the_action() {
        let mut service = SlideService::new(LayoutConfig::default());
        let value = dispatch(&mut service, "add_slide", "{\"slide\": 1}");
        assert_eq!(value["success"], false);
        assert!(value["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid payload for 'add_slide'"));
    }

    #[test]
    fn created_presentation_can_be_addressed() {
        let mut service = SlideService::new(LayoutConfig::default());
        let created = dispatch(&mut service, "create_presentation", "");
        assert_eq!(created["success"], true);
        assert!(created["file"]["content_base64"].is_string());

        let id = created["presentation_id"].as_str().unwrap();
        let payload = json!({ "presentation_id": id }).to_string();
        let added = dispatch(&mut service, "add_slide", &payload);
        assert_eq!(added["slide_index"], 0);
        assert_eq!(added["slide_count"], 1);
    }

    #[test]
    fn not_found_carries_the_id() {
        let mut service = SlideService::new(LayoutConfig::default());
        let value = dispatch(
            &mut service,
            "get_slide_elements",
            r#"{"presentation_id": "gone", "slide_index": 0}"#,
        );
        assert_eq!(value["success"], false);
        assert!(value["message"].as_str().unwrap().contains("'gone' not found"));
    }
}

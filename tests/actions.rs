use serde_json::{json, Value};
use slides_autolayout::{dispatch, LayoutConfig, SlideService};

fn call(service: &mut SlideService, action: &str, payload: Value) -> Value {
    let result = dispatch(service, action, &payload.to_string());
    assert_eq!(
        result["success"], true,
        "{} failed: {}",
        action, result["message"]
    );
    result
}

fn new_deck(service: &mut SlideService) -> String {
    let created = call(service, "create_presentation", json!({}));
    created["presentation_id"].as_str().unwrap().to_string()
}

#[test]
fn markup_slide_has_three_clean_shapes() {
    let mut service = SlideService::new(LayoutConfig::default());
    let id = new_deck(&mut service);
    call(&mut service, "add_slide", json!({ "presentation_id": id }));

    let built = call(
        &mut service,
        "build_slide_from_markup",
        json!({
            "presentation_id": id,
            "slide_index": 0,
            "markup": "# Title\n\nSome body text.\n\n- item one\n- item two",
        }),
    );
    assert_eq!(built["elements_created"], 3);
    let types: Vec<_> = built["shapes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["block_type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, ["title", "paragraph", "bullet_list"]);
    assert_eq!(built["shapes"][2]["item_count"], 2);

    let elements = call(
        &mut service,
        "get_slide_elements",
        json!({ "presentation_id": id, "slide_index": 0, "include_content": true }),
    );
    assert_eq!(elements["summary"]["total_elements"], 3);
    assert_eq!(elements["summary"]["outside"], 0);
    assert_eq!(elements["summary"]["overlaps"], 0);
    assert_eq!(elements["elements"][1]["content"], "Some body text.");
    assert_eq!(elements["elements"][0]["status"], "inside");
}

#[test]
fn outline_becomes_one_slide_per_section() {
    let mut service = SlideService::new(LayoutConfig::default());
    let id = new_deck(&mut service);

    let outline = "# Agenda\n\n1. Intro\n2. Numbers\n\n\
                   # Numbers\n\n| Q | Revenue |\n|---|---|\n| Q1 | 10 |\n| Q2 | 12 |\n\n\
                   # Close\n\n> Thanks for listening\n";
    let built = call(
        &mut service,
        "build_presentation_from_outline",
        json!({ "presentation_id": id, "outline": outline }),
    );
    assert_eq!(built["slides_created"], 3);
    assert_eq!(built["slide_count"], 3);
    let results = built["per_slide_results"].as_array().unwrap();
    let titles: Vec<_> = results.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Agenda", "Numbers", "Close"]);
    assert!(results.iter().all(|r| r["elements_created"] == 2));

    for slide_index in 0..3 {
        let elements = call(
            &mut service,
            "get_slide_elements",
            json!({ "presentation_id": id, "slide_index": slide_index }),
        );
        assert_eq!(elements["summary"]["outside"], 0);
        assert_eq!(elements["summary"]["overlaps"], 0);
    }

    let markdown = call(&mut service, "export_markdown", json!({ "presentation_id": id }));
    let markdown = markdown["markdown"].as_str().unwrap();
    assert!(markdown.contains("## Slide 2\n\nNumbers\n\n| Q | Revenue |"));
    assert!(markdown.contains("Thanks for listening"));
}

#[test]
fn ambiguous_replace_needs_confirmation() {
    let mut service = SlideService::new(LayoutConfig::default());
    let id = new_deck(&mut service);
    call(&mut service, "add_slide", json!({ "presentation_id": id }));
    for (top, text) in [(1.0, "Acme quarterly update"), (3.0, "Thanks from Acme")] {
        call(
            &mut service,
            "add_text_box",
            json!({
                "presentation_id": id,
                "slide_index": 0,
                "left": 1.0, "top": top, "width": 8.0, "height": 1.0,
                "text": text,
                "color": "#204060",
            }),
        );
    }

    let blocked = call(
        &mut service,
        "find_and_replace",
        json!({
            "presentation_id": id,
            "replacements": [{ "find": "Acme", "replace": "Globex" }],
        }),
    );
    assert_eq!(blocked["total_replacements"], 0);
    assert_eq!(blocked["blocked"][0]["match_count"], 2);
    assert_eq!(blocked["blocked"][0]["locations"].as_array().unwrap().len(), 2);

    let applied = call(
        &mut service,
        "find_and_replace",
        json!({
            "presentation_id": id,
            "replacements": [{ "find": "Acme", "replace": "Globex", "replace_all": true }],
        }),
    );
    assert_eq!(applied["total_replacements"], 2);

    let elements = call(
        &mut service,
        "get_slide_elements",
        json!({ "presentation_id": id, "slide_index": 0, "include_content": true }),
    );
    assert_eq!(elements["elements"][0]["content"], "Globex quarterly update");
    assert_eq!(elements["elements"][1]["content"], "Thanks from Globex");
}

#[test]
fn file_round_trip_into_a_fresh_service() {
    let mut first = SlideService::new(LayoutConfig::default());
    let id = new_deck(&mut first);
    call(&mut first, "add_slide", json!({ "presentation_id": id }));
    let added = call(
        &mut first,
        "add_table",
        json!({
            "presentation_id": id,
            "slide_index": 0,
            "left": 0.5, "top": 1.0, "width": 9.0, "height": 1.2,
            "rows": [["Name", "Role"], ["Ada", "Engineer"], ["Lin", "Designer"]],
        }),
    );
    let file = added["file"]["content_base64"].as_str().unwrap().to_string();

    let mut second = SlideService::new(LayoutConfig::default());
    let modified = call(
        &mut second,
        "modify_element",
        json!({
            "presentation_id": "restored",
            "input_file": file,
            "slide_index": 0,
            "element_index": 0,
            "position": { "top": 2.0 },
            "table_cell_updates": [{ "row": 2, "column": 1, "text": "Researcher" }],
        }),
    );
    assert_eq!(modified["new_position"]["top"], 2.0);
    assert_eq!(modified["changes_made"].as_array().unwrap().len(), 2);

    let elements = call(
        &mut second,
        "get_slide_elements",
        json!({ "presentation_id": "restored", "slide_index": 0, "include_content": true }),
    );
    assert_eq!(
        elements["elements"][0]["content"],
        "Name | Role\nAda | Engineer\nLin | Researcher"
    );

    let missing = dispatch(
        &mut second,
        "modify_element",
        &json!({ "presentation_id": "restored", "slide_index": 0, "element_index": 9 }).to_string(),
    );
    assert_eq!(missing["success"], false);
    assert!(missing["message"]
        .as_str()
        .unwrap()
        .contains("valid range is 0..=0"));
}

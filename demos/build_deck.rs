// demos/build_deck.rs
//
// Builds a deck from an outline file (or a built-in sample), prints the
// geometry check for each slide and writes the presentation JSON.
//
//   cargo run --example build_deck -- outline.md deck.slides.json

use std::{env, fs};

use anyhow::{Context, Result};
use log::info;
use serde_json::{json, Value};
use slides_autolayout::{dispatch, logging, LayoutConfig, SlideService};

const SAMPLE_OUTLINE: &str = "\
# Project Falcon

A __fast__ and **reliable** delivery pipeline.

- Ships every day
- Rolls back in *minutes*
  - with one command

# Numbers

| Quarter | Deploys | Incidents |
|---|---|---|
| Q1 | 120 | 3 |
| Q2 | 180 | 1 |

# Next steps

1. Migrate the remaining services
2. Retire the old runners

```sh
falcon deploy --all
```
";

fn call(service: &mut SlideService, action: &str, payload: Value) -> Result<Value> {
    let result = dispatch(service, action, &payload.to_string());
    if result["success"] != true {
        anyhow::bail!("{} failed: {}", action, result["message"]);
    }
    Ok(result)
}

fn main() -> Result<()> {
    logging::init();
    let mut args = env::args().skip(1);
    let outline = match args.next() {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {}", path))?,
        None => SAMPLE_OUTLINE.to_string(),
    };
    let output = args.next().unwrap_or_else(|| "deck.slides.json".to_string());

    let config = LayoutConfig::from_env().context("loading layout configuration")?;
    let mut service = SlideService::new(config);

    let created = call(&mut service, "create_presentation", json!({ "title": "Demo deck" }))?;
    let id = created["presentation_id"].as_str().unwrap_or_default().to_string();

    let built = call(
        &mut service,
        "build_presentation_from_outline",
        json!({ "presentation_id": id, "outline": outline }),
    )?;
    info!("Created {} slides", built["slides_created"]);

    let slide_count = built["slide_count"].as_u64().unwrap_or(0);
    for slide_index in 0..slide_count {
        let report = call(
            &mut service,
            "get_slide_elements",
            json!({ "presentation_id": id, "slide_index": slide_index }),
        )?;
        println!(
            "slide {}: {} elements, {} outside, {} overlaps",
            slide_index,
            report["summary"]["total_elements"],
            report["summary"]["outside"],
            report["summary"]["overlaps"]
        );
    }

    let markdown = call(&mut service, "export_markdown", json!({ "presentation_id": id }))?;
    println!("\n{}", markdown["markdown"].as_str().unwrap_or_default());

    let encoded = built["file"]["content_base64"].as_str().unwrap_or_default();
    let presentation = slides_autolayout::service::file::decode(encoded)?;
    fs::write(&output, serde_json::to_string_pretty(&presentation)?)
        .with_context(|| format!("writing {}", output))?;
    println!("Wrote {}", output);
    Ok(())
}

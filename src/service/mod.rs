//! Named actions over stored presentations.
//!
//! Each action resolves its presentation, performs one operation and, when it
//! mutated anything, returns the re-encoded presentation with the result.

pub mod actions;
pub mod dispatch;
pub mod file;
pub mod store;

pub use actions::*;
pub use dispatch::dispatch;
pub use file::FileAttachment;
pub use store::{InMemoryStore, PresentationStore};

use log::{info, warn};
use uuid::Uuid;

use crate::analysis::{self, canvas_size};
use crate::config::LayoutConfig;
use crate::converters::markdown::extract_text_from_presentation;
use crate::document::{new_object_id, ParagraphSpec, SlideEditor};
use crate::edit;
use crate::errors::{Result, SlidesError};
use crate::layout::fit::{self, FitHints};
use crate::layout::{build_outline, layout_markup, RunStyle};
use crate::models::chart::Chart;
use crate::models::colors::RgbColor;
use crate::models::common::Size;
use crate::models::page::Page;
use crate::models::placeholder::{Placeholder, PlaceholderType};
use crate::models::presentation::Presentation;
use crate::models::properties::Alignment;
use crate::units::{inches_to_emu, Rect};

/// Finds the presentation named by `target`, reloading it from the
/// supplied file when it is not held.
fn resolve<'s, S: PresentationStore>(
    store: &'s mut S,
    target: &PresentationRef,
) -> Result<&'s mut Presentation> {
    let id = &target.presentation_id;
    if !store.contains(id) {
        let Some(input_file) = &target.input_file else {
            return Err(SlidesError::PresentationNotFound(id.clone()));
        };
        let mut presentation = file::decode(input_file)?;
        presentation.presentation_id = id.clone();
        info!(
            "Reloaded presentation '{}' from file ({} slides)",
            id,
            presentation.slide_count()
        );
        store.put(id.clone(), presentation);
    }
    store
        .get_mut(id)
        .ok_or_else(|| SlidesError::PresentationNotFound(id.clone()))
}

fn slide_mut(presentation: &mut Presentation, slide_index: usize) -> Result<&mut Page> {
    let count = presentation.slide_count();
    presentation
        .slides_mut()
        .get_mut(slide_index)
        .ok_or(SlidesError::SlideIndexOutOfRange {
            index: slide_index,
            count,
        })
}

fn parse_color(color: Option<&str>) -> Result<Option<RgbColor>> {
    match color {
        None => Ok(None),
        Some(hex) => RgbColor::from_hex(hex)
            .map(Some)
            .ok_or_else(|| SlidesError::InvalidInput(format!("'{}' is not a #RRGGBB color", hex))),
    }
}

fn parse_alignment(alignment: Option<&str>) -> Result<Alignment> {
    match alignment.map(str::to_ascii_lowercase).as_deref() {
        None | Some("left") | Some("start") => Ok(Alignment::Start),
        Some("center") => Ok(Alignment::Center),
        Some("right") | Some("end") => Ok(Alignment::End),
        Some("justify") | Some("justified") => Ok(Alignment::Justified),
        Some(other) => Err(SlidesError::InvalidInput(format!(
            "unknown alignment '{}'",
            other
        ))),
    }
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(SlidesError::InvalidInput(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// Runs actions against a [`PresentationStore`].
pub struct SlideService<S: PresentationStore = InMemoryStore> {
    store: S,
    config: LayoutConfig,
}

impl SlideService<InMemoryStore> {
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_store(InMemoryStore::new(), config)
    }
}

impl Default for SlideService<InMemoryStore> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<S: PresentationStore> SlideService<S> {
    pub fn with_store(store: S, config: LayoutConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn encoded(&self, id: &str) -> Result<FileAttachment> {
        let presentation = self
            .store
            .get(id)
            .ok_or_else(|| SlidesError::PresentationNotFound(id.to_string()))?;
        file::encode(presentation)
    }

    /// Creates an empty presentation, with a title slide when a title is given.
    pub fn create_presentation(
        &mut self,
        request: CreatePresentationRequest,
    ) -> Result<ActionResponse<PresentationCreated>> {
        let config = &self.config;
        let id = Uuid::new_v4().to_string();
        let mut presentation = Presentation::new(
            id.clone(),
            Size::emu(
                inches_to_emu(config.canvas_width),
                inches_to_emu(config.canvas_height),
            ),
        );
        presentation.title = request.title.clone();

        if let Some(title) = request.title.as_deref().filter(|t| !t.trim().is_empty()) {
            let mut slide = Page::new_slide(new_object_id("slide"));
            let mut editor = SlideEditor::new(&mut slide);
            let width = config.content_width();
            let title_frame = Rect::new(config.margin_left, config.canvas_height * 0.3, width, 1.5);
            let size = fit::estimate(
                &config.fit,
                title,
                title_frame.width,
                title_frame.height,
                config.font_sizes.title,
                FitHints::formatted(),
            );
            let style = RunStyle::from_config(config, size).bold();
            let mut paragraph = ParagraphSpec::new(Some(Alignment::Center));
            paragraph.runs.push(style.run(title));
            editor.add_placeholder_text(
                title_frame,
                &[paragraph],
                Placeholder::of(PlaceholderType::CenteredTitle),
            )?;

            if let Some(subtitle) = request.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
                let frame = Rect::new(config.margin_left, title_frame.bottom() + 0.25, width, 1.0);
                let size = fit::estimate(
                    &config.fit,
                    subtitle,
                    frame.width,
                    frame.height,
                    config.font_sizes.subtitle,
                    FitHints::plain(),
                );
                let style = RunStyle::from_config(config, size);
                let mut paragraph = ParagraphSpec::new(Some(Alignment::Center));
                paragraph.runs.push(style.run(subtitle));
                editor.add_placeholder_text(
                    frame,
                    &[paragraph],
                    Placeholder::of(PlaceholderType::Subtitle),
                )?;
            }
            presentation.slides_mut().push(slide);
        }

        let slide_count = presentation.slide_count();
        info!("Created presentation '{}' with {} slides", id, slide_count);
        self.store.put(id.clone(), presentation);
        Ok(ActionResponse::ok(PresentationCreated {
            presentation_id: id.clone(),
            slide_count,
        })
        .with_file(self.encoded(&id)?))
    }

    /// Stores a presentation decoded from a file.
    pub fn load_presentation(
        &mut self,
        request: LoadPresentationRequest,
    ) -> Result<ActionResponse<PresentationCreated>> {
        let mut presentation = file::decode(&request.input_file)?;
        let id = match request.presentation_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None if !presentation.presentation_id.is_empty() => {
                presentation.presentation_id.clone()
            }
            None => Uuid::new_v4().to_string(),
        };
        presentation.presentation_id = id.clone();
        let slide_count = presentation.slide_count();
        self.store.put(id.clone(), presentation);
        Ok(ActionResponse::ok(PresentationCreated {
            presentation_id: id,
            slide_count,
        }))
    }

    pub fn add_slide(&mut self, request: AddSlideRequest) -> Result<ActionResponse<SlideAdded>> {
        let presentation = resolve(&mut self.store, &request.target)?;
        let slides = presentation.slides_mut();
        slides.push(Page::new_slide(new_object_id("slide")));
        let slide_count = slides.len();
        Ok(ActionResponse::ok(SlideAdded {
            slide_index: slide_count - 1,
            slide_count,
        })
        .with_file(self.encoded(&request.target.presentation_id)?))
    }

    /// Lays markup out on an existing slide from the top margin down.
    /// Shapes already on the slide are not avoided.
    pub fn build_slide_from_markup(
        &mut self,
        request: BuildSlideRequest,
    ) -> Result<ActionResponse<SlideBuilt>> {
        require(&request.markup, "markup")?;
        let color = parse_color(request.color.as_deref())?;
        let presentation = resolve(&mut self.store, &request.target)?;
        let page = slide_mut(presentation, request.slide_index)?;
        let layout = layout_markup(page, &request.markup, &self.config, color.as_ref());

        let created = layout.elements_created();
        let skipped = layout.skipped.len();
        let mut response = ActionResponse::ok(SlideBuilt {
            slide_index: request.slide_index,
            elements_created: created,
            shapes: layout.shapes,
            skipped: layout.skipped,
        });
        if created == 0 {
            response = response.failed().with_message("no block of the markup could be placed");
        } else if skipped > 0 {
            response = response.with_message(format!("{} block(s) were skipped", skipped));
        }
        Ok(response.with_file(self.encoded(&request.target.presentation_id)?))
    }

    /// Appends one slide per level-1 section of the outline.
    pub fn build_presentation_from_outline(
        &mut self,
        request: BuildOutlineRequest,
    ) -> Result<ActionResponse<OutlineBuilt>> {
        require(&request.outline, "outline")?;
        let color = parse_color(request.color.as_deref())?;
        let presentation = resolve(&mut self.store, &request.target)?;
        let results = build_outline(presentation, &request.outline, &self.config, color.as_ref());

        let failed = results.iter().filter(|r| !r.success).count();
        let mut response = ActionResponse::ok(OutlineBuilt {
            slides_created: results.len(),
            slide_count: presentation.slide_count(),
            per_slide_results: results,
        });
        if failed > 0 {
            warn!("{} outline section(s) failed to render", failed);
            response = response.with_message(format!("{} section(s) failed to render", failed));
            if failed == response.result.slides_created {
                response = response.failed();
            }
        }
        Ok(response.with_file(self.encoded(&request.target.presentation_id)?))
    }

    /// Geometry report for one slide. Read only.
    pub fn get_slide_elements(
        &mut self,
        request: GetSlideElementsRequest,
    ) -> Result<ActionResponse<SlideElements>> {
        let config = &self.config;
        let presentation = resolve(&mut self.store, &request.target)?;
        let (canvas_width, canvas_height) = canvas_size(presentation, config);
        let page = slide_mut(presentation, request.slide_index)?;
        let report = analysis::analyze(page, canvas_width, canvas_height);

        let elements = report
            .elements
            .into_iter()
            .map(|geometry| {
                let content = request
                    .include_content
                    .then(|| page.elements().get(geometry.index).and_then(|e| e.text()))
                    .flatten();
                ElementReport { geometry, content }
            })
            .collect();
        Ok(ActionResponse::ok(SlideElements {
            slide_index: request.slide_index,
            canvas_width,
            canvas_height,
            elements,
            overlaps: report.overlaps,
            summary: report.summary,
        }))
    }

    pub fn modify_element(
        &mut self,
        request: ModifyElementRequest,
    ) -> Result<ActionResponse<ElementModified>> {
        let presentation = resolve(&mut self.store, &request.target)?;
        let page = slide_mut(presentation, request.slide_index)?;
        let outcome = edit::modify_element(
            page,
            request.slide_index,
            request.element_index,
            request.position.as_ref(),
            &request.table_cell_updates,
            &self.config,
        )?;
        let mut response = ActionResponse::ok(ElementModified {
            new_position: outcome.new_position,
            changes_made: outcome.changes_made,
        });
        if response.result.changes_made.is_empty() {
            response = response.with_message("nothing to change");
        }
        Ok(response.with_file(self.encoded(&request.target.presentation_id)?))
    }

    pub fn find_and_replace(
        &mut self,
        request: FindReplaceRequest,
    ) -> Result<ActionResponse<ReplacementsMade>> {
        if request.replacements.is_empty() {
            return Err(SlidesError::InvalidInput(
                "replacements must not be empty".to_string(),
            ));
        }
        let presentation = resolve(&mut self.store, &request.target)?;
        let outcome = edit::find_and_replace(presentation, &request.replacements, &self.config);

        let blocked = outcome.blocked.len();
        let mut response = ActionResponse::ok(ReplacementsMade {
            total_replacements: outcome.total_replacements,
            applied: outcome.applied,
            blocked: outcome.blocked,
            warnings: outcome.warnings,
        });
        if blocked > 0 {
            response = response.with_message(format!(
                "{} instruction(s) blocked: multiple matches need replace_all",
                blocked
            ));
        }
        Ok(response.with_file(self.encoded(&request.target.presentation_id)?))
    }

    /// Adds a text box at an explicit position, fitting the font size to it.
    pub fn add_text_box(
        &mut self,
        request: AddTextBoxRequest,
    ) -> Result<ActionResponse<ElementAdded>> {
        require(&request.text, "text")?;
        let color = parse_color(request.color.as_deref())?;
        let alignment = parse_alignment(request.alignment.as_deref())?;
        let config = &self.config;
        let frame = Rect::from(request.frame);
        let hints = FitHints {
            formatted: request.bold || request.italic,
            bullets: false,
        };
        let max_size = request.font_size.unwrap_or(config.font_sizes.body);
        let size = fit::estimate(
            &config.fit,
            &request.text,
            frame.width,
            frame.height,
            max_size,
            hints,
        );

        let mut style = RunStyle::from_config(config, size).with_color(color.as_ref());
        style.bold = request.bold;
        style.italic = request.italic;
        let paragraphs: Vec<ParagraphSpec> = request
            .text
            .lines()
            .map(|line| {
                let mut spec = ParagraphSpec::new(Some(alignment.clone()));
                spec.runs.push(style.run(line));
                spec
            })
            .collect();

        let presentation = resolve(&mut self.store, &request.target)?;
        let page = slide_mut(presentation, request.slide_index)?;
        let handle = SlideEditor::new(page).add_text_box(frame, &paragraphs)?;
        Ok(ActionResponse::ok(ElementAdded {
            slide_index: request.slide_index,
            element_index: handle.element_index,
            object_id: handle.object_id,
            font_size: Some(size),
        })
        .with_file(self.encoded(&request.target.presentation_id)?))
    }

    pub fn add_image(&mut self, request: AddImageRequest) -> Result<ActionResponse<ElementAdded>> {
        require(&request.source_url, "source_url")?;
        let presentation = resolve(&mut self.store, &request.target)?;
        let page = slide_mut(presentation, request.slide_index)?;
        let frame = Rect::from(request.frame);
        let handle = SlideEditor::new(page).add_image(frame, &request.source_url)?;
        Ok(ActionResponse::ok(ElementAdded {
            slide_index: request.slide_index,
            element_index: handle.element_index,
            object_id: handle.object_id,
            font_size: None,
        })
        .with_file(self.encoded(&request.target.presentation_id)?))
    }

    /// Adds a table with every cell fitted to its share of the frame.
    pub fn add_table(&mut self, request: AddTableRequest) -> Result<ActionResponse<ElementAdded>> {
        let config = &self.config;
        let frame = Rect::from(request.frame);
        let columns = request.rows.iter().map(Vec::len).max().unwrap_or(0);
        if request.rows.is_empty() || columns == 0 {
            return Err(SlidesError::InvalidInput(
                "rows must contain at least one cell".to_string(),
            ));
        }
        let cell_width = frame.width / columns as f64;
        let cell_height = frame.height / request.rows.len() as f64;

        let mut smallest = None;
        let mut cells = Vec::with_capacity(request.rows.len());
        for (row_index, row) in request.rows.iter().enumerate() {
            let header = request.header && row_index == 0;
            let mut row_cells = Vec::with_capacity(row.len());
            for text in row {
                let hints = if header { FitHints::formatted() } else { FitHints::plain() };
                let size = fit::estimate(
                    &config.fit,
                    text,
                    cell_width,
                    cell_height,
                    config.font_sizes.table_cell,
                    hints,
                );
                smallest = Some(smallest.map_or(size, |s: u32| s.min(size)));
                let mut style = RunStyle::from_config(config, size);
                style.bold = header;
                let mut spec = ParagraphSpec::new(Some(Alignment::Start));
                spec.runs.push(style.run(text));
                row_cells.push(vec![spec]);
            }
            cells.push(row_cells);
        }

        let presentation = resolve(&mut self.store, &request.target)?;
        let page = slide_mut(presentation, request.slide_index)?;
        let handle = SlideEditor::new(page).add_table(frame, &cells)?;
        Ok(ActionResponse::ok(ElementAdded {
            slide_index: request.slide_index,
            element_index: handle.element_index,
            object_id: handle.object_id,
            font_size: smallest,
        })
        .with_file(self.encoded(&request.target.presentation_id)?))
    }

    pub fn add_chart(&mut self, request: AddChartRequest) -> Result<ActionResponse<ElementAdded>> {
        let chart = Chart {
            chart_type: request.chart_type,
            title: request.title,
            categories: request.categories,
            series: request.series,
        };
        let presentation = resolve(&mut self.store, &request.target)?;
        let page = slide_mut(presentation, request.slide_index)?;
        let handle = SlideEditor::new(page).add_chart(Rect::from(request.frame), chart)?;
        Ok(ActionResponse::ok(ElementAdded {
            slide_index: request.slide_index,
            element_index: handle.element_index,
            object_id: handle.object_id,
            font_size: None,
        })
        .with_file(self.encoded(&request.target.presentation_id)?))
    }

    /// Text of the whole presentation as Markdown. Read only.
    pub fn export_markdown(
        &mut self,
        request: ExportMarkdownRequest,
    ) -> Result<ActionResponse<MarkdownExport>> {
        let presentation = resolve(&mut self.store, &request.target)?;
        Ok(ActionResponse::ok(MarkdownExport {
            markdown: extract_text_from_presentation(presentation),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_deck() -> (SlideService, String) {
        let mut service = SlideService::new(LayoutConfig::default());
        let created = service
            .create_presentation(CreatePresentationRequest::default())
            .unwrap();
        let id = created.result.presentation_id;
        service
            .add_slide(AddSlideRequest {
                target: PresentationRef::new(id.clone()),
            })
            .unwrap();
        (service, id)
    }

    #[test]
    fn unknown_presentation_is_not_found() {
        let mut service = SlideService::new(LayoutConfig::default());
        let err = service
            .add_slide(AddSlideRequest {
                target: PresentationRef::new("nope"),
            })
            .unwrap_err();
        assert!(matches!(err, SlidesError::PresentationNotFound(id) if id == "nope"));
    }

    #[test]
    fn slide_index_error_names_the_range() {
        let (mut service, id) = service_with_deck();
        let err = service
            .build_slide_from_markup(BuildSlideRequest {
                target: PresentationRef::new(id),
                slide_index: 4,
                markup: "# x".into(),
                color: None,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Slide index 4 out of range: valid range is 0..=0");
    }

    #[test]
    fn missing_markup_is_invalid_input() {
        let (mut service, id) = service_with_deck();
        let err = service
            .build_slide_from_markup(BuildSlideRequest {
                target: PresentationRef::new(id),
                slide_index: 0,
                markup: "   ".into(),
                color: None,
            })
            .unwrap_err();
        assert!(matches!(err, SlidesError::InvalidInput(_)));
    }

    #[test]
    fn title_slide_has_placeholders() {
        let mut service = SlideService::new(LayoutConfig::default());
        let created = service
            .create_presentation(CreatePresentationRequest {
                title: Some("Roadmap".into()),
                subtitle: Some("2026".into()),
            })
            .unwrap();
        assert_eq!(created.result.slide_count, 1);
        assert_eq!(created.file.as_ref().unwrap().file_name, "Roadmap.slides.json");

        let markdown = service
            .export_markdown(ExportMarkdownRequest {
                target: PresentationRef::new(created.result.presentation_id),
            })
            .unwrap();
        assert!(markdown.result.markdown.contains("### Roadmap\n\n2026"));
    }

    #[test]
    fn reload_from_file_under_requested_id() {
        let (mut service, id) = service_with_deck();
        let file = service.encoded(&id).unwrap();

        let mut fresh = SlideService::new(LayoutConfig::default());
        let added = fresh
            .add_slide(AddSlideRequest {
                target: PresentationRef {
                    presentation_id: "restored".into(),
                    input_file: Some(file.content_base64),
                },
            })
            .unwrap();
        assert_eq!(added.result.slide_count, 2);
        assert!(fresh.store().contains("restored"));
    }

    #[test]
    fn text_box_size_is_capped_and_fitted() {
        let (mut service, id) = service_with_deck();
        let added = service
            .add_text_box(AddTextBoxRequest {
                target: PresentationRef::new(id.clone()),
                slide_index: 0,
                frame: Frame {
                    left: 1.0,
                    top: 1.0,
                    width: 3.0,
                    height: 0.5,
                },
                text: "A rather long sentence that cannot fit in a small box at all".into(),
                font_size: Some(28.0),
                bold: true,
                italic: false,
                color: Some("#112233".into()),
                alignment: Some("center".into()),
            })
            .unwrap();
        let size = added.result.font_size.unwrap();
        assert!((8..28).contains(&size));

        let err = service
            .add_text_box(AddTextBoxRequest {
                target: PresentationRef::new(id),
                slide_index: 0,
                frame: Frame {
                    left: 1.0,
                    top: 1.0,
                    width: 3.0,
                    height: 0.5,
                },
                text: "x".into(),
                font_size: None,
                bold: false,
                italic: false,
                color: Some("blue".into()),
                alignment: None,
            })
            .unwrap_err();
        assert!(matches!(err, SlidesError::InvalidInput(_)));
    }
}

//! Direct edits to one element: move, resize, and table cell text.

use log::debug;
use serde::{Deserialize, Serialize};

use super::refit::TextTemplate;
use crate::config::LayoutConfig;
use crate::errors::{Result, SlidesError};
use crate::models::common::{AffineTransform, Size};
use crate::models::elements::PageElementKind;
use crate::models::page::Page;
use crate::units::{emu_to_inches, inches_to_emu, round3, Rect};

/// New position and size in inches; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifyOutcome {
    pub new_position: Rect,
    pub changes_made: Vec<String>,
}

fn check_position(position: &PositionUpdate) -> Result<()> {
    for (name, value) in [("left", position.left), ("top", position.top)] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(SlidesError::InvalidInput(format!("{} must be a finite number", name)));
        }
    }
    for (name, value) in [("width", position.width), ("height", position.height)] {
        if value.is_some_and(|v| !v.is_finite() || v <= 0.0) {
            return Err(SlidesError::InvalidInput(format!("{} must be greater than zero", name)));
        }
    }
    Ok(())
}

/// Applies the updates to element `element_index` of `page`.
///
/// All inputs are validated before anything changes.
pub fn modify_element(
    page: &mut Page,
    slide_index: usize,
    element_index: usize,
    position: Option<&PositionUpdate>,
    cell_updates: &[CellUpdate],
    config: &LayoutConfig,
) -> Result<ModifyOutcome> {
    let count = page.elements().len();
    let element = page
        .elements_mut()
        .get_mut(element_index)
        .ok_or(SlidesError::ElementIndexOutOfRange {
            slide_index,
            index: element_index,
            count,
        })?;

    if let Some(position) = position {
        check_position(position)?;
    }
    if !cell_updates.is_empty() {
        let PageElementKind::Table(table) = &element.element_kind else {
            return Err(SlidesError::InvalidInput(format!(
                "cell updates need a table, element {} is a {}",
                element_index,
                element.element_kind.type_name()
            )));
        };
        if let Some(bad) = cell_updates
            .iter()
            .find(|u| table.cell(u.row, u.column).is_none())
        {
            return Err(SlidesError::InvalidInput(format!(
                "cell ({}, {}) is outside the {}x{} table",
                bad.row, bad.column, table.rows, table.columns
            )));
        }
    }

    let mut changes_made = Vec::new();
    let mut frame = element.frame();

    if let Some(position) = position {
        let old = frame;
        frame = Rect::new(
            position.left.unwrap_or(old.left),
            position.top.unwrap_or(old.top),
            position.width.unwrap_or(old.width),
            position.height.unwrap_or(old.height),
        );
        if (frame.left, frame.top) != (old.left, old.top) {
            changes_made.push(format!("moved to ({:.2}, {:.2})", frame.left, frame.top));
        }
        if (frame.width, frame.height) != (old.width, old.height) {
            changes_made.push(format!("resized to {:.2} x {:.2}", frame.width, frame.height));
        }
        element.size = Some(Size::emu(
            inches_to_emu(frame.width),
            inches_to_emu(frame.height),
        ));
        element.transform = Some(AffineTransform::translate(
            inches_to_emu(frame.left),
            inches_to_emu(frame.top),
        ));
        if let PageElementKind::Table(table) = &mut element.element_kind {
            let x = frame.width / old.width;
            let y = frame.height / old.height;
            if x.is_finite() && y.is_finite() && (x, y) != (1.0, 1.0) {
                table.scale_tracks(x, y);
            }
        }
    }

    if let PageElementKind::Table(table) = &mut element.element_kind {
        for update in cell_updates {
            let width = emu_to_inches(table.column_width_emu(update.column));
            let height = emu_to_inches(table.row_height_emu(update.row));
            if let Some(cell) = table.cell_mut(update.row, update.column) {
                let template = cell
                    .text
                    .as_ref()
                    .map(TextTemplate::from_content)
                    .unwrap_or_else(|| TextTemplate::from_content(&Default::default()));
                let (content, size) = template.render(
                    &update.text,
                    width,
                    height,
                    Some(config.font_sizes.table_cell),
                    config,
                );
                cell.text = Some(content);
                changes_made.push(format!(
                    "updated cell ({}, {}) at {}pt",
                    update.row, update.column, size
                ));
            }
        }
    }

    debug!(
        "Modified element {} on slide {}: {:?}",
        element_index, slide_index, changes_made
    );
    Ok(ModifyOutcome {
        new_position: Rect::new(
            round3(frame.left),
            round3(frame.top),
            round3(frame.width),
            round3(frame.height),
        ),
        changes_made,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ParagraphSpec, RunSpec, SlideEditor};

    fn cell(text: &str, bold: bool) -> Vec<ParagraphSpec> {
        let mut p = ParagraphSpec::new(None);
        p.runs.push(RunSpec {
            text: text.to_string(),
            font_family: "Calibri".to_string(),
            font_size: 14.0,
            bold,
            ..RunSpec::default()
        });
        vec![p]
    }

    fn page() -> Page {
        let mut page = Page::new_slide("s");
        let mut editor = SlideEditor::new(&mut page);
        editor
            .add_text_box(Rect::new(0.5, 0.5, 9.0, 1.0), &cell("Title", true))
            .unwrap();
        editor
            .add_table(
                Rect::new(0.5, 2.0, 9.0, 0.8),
                &[
                    vec![cell("Name", true), cell("Score", true)],
                    vec![cell("ann", false), cell("3", false)],
                ],
            )
            .unwrap();
        page
    }

    #[test]
    fn partial_position_keeps_other_fields() {
        let mut page = page();
        let update = PositionUpdate {
            top: Some(1.25),
            width: Some(6.0),
            ..PositionUpdate::default()
        };
        let outcome =
            modify_element(&mut page, 0, 0, Some(&update), &[], &LayoutConfig::default()).unwrap();
        assert_eq!(outcome.new_position, Rect::new(0.5, 1.25, 6.0, 1.0));
        assert_eq!(outcome.changes_made.len(), 2);
        assert_eq!(page.elements()[0].frame(), Rect::new(0.5, 1.25, 6.0, 1.0));
    }

    #[test]
    fn cell_text_is_replaced_with_its_style() {
        let mut page = page();
        let updates = [CellUpdate {
            row: 0,
            column: 1,
            text: "Points".into(),
        }];
        let outcome =
            modify_element(&mut page, 0, 1, None, &updates, &LayoutConfig::default()).unwrap();
        assert_eq!(outcome.changes_made, ["updated cell (0, 1) at 14pt"]);
        assert_eq!(page.elements()[1].text().unwrap(), "Name | Points\nann | 3");

        let PageElementKind::Table(table) = &page.elements()[1].element_kind else {
            panic!("expected a table");
        };
        let style = table.cell(0, 1).unwrap().text.as_ref().unwrap().first_run_style().unwrap();
        assert_eq!(style.bold, Some(true));
    }

    #[test]
    fn resizing_a_table_scales_its_cells() {
        let mut page = page();
        let resize = PositionUpdate {
            width: Some(4.5),
            height: Some(1.6),
            ..PositionUpdate::default()
        };
        let long = CellUpdate {
            row: 1,
            column: 0,
            text: "a considerably longer cell value".into(),
        };
        let outcome = modify_element(
            &mut page,
            0,
            1,
            Some(&resize),
            &[long],
            &LayoutConfig::default(),
        )
        .unwrap();

        let PageElementKind::Table(table) = &page.elements()[1].element_kind else {
            panic!("expected a table");
        };
        assert!((emu_to_inches(table.column_width_emu(0)) - 2.25).abs() < 1e-5);
        assert!((emu_to_inches(table.column_width_emu(1)) - 2.25).abs() < 1e-5);
        assert!((emu_to_inches(table.row_height_emu(0)) - 0.8).abs() < 1e-5);

        let expected = crate::layout::fit::estimate(
            &LayoutConfig::default().fit,
            "a considerably longer cell value",
            2.25,
            0.8,
            14.0,
            crate::layout::fit::FitHints::plain(),
        );
        assert_eq!(
            outcome.changes_made.last().unwrap(),
            &format!("updated cell (1, 0) at {}pt", expected)
        );
    }

    #[test]
    fn invalid_updates_change_nothing() {
        let mut page = page();
        let config = LayoutConfig::default();
        let bad_cell = [CellUpdate {
            row: 5,
            column: 0,
            text: "x".into(),
        }];
        let move_it = PositionUpdate {
            left: Some(3.0),
            ..PositionUpdate::default()
        };
        let err = modify_element(&mut page, 0, 1, Some(&move_it), &bad_cell, &config).unwrap_err();
        assert!(matches!(err, SlidesError::InvalidInput(_)));
        assert_eq!(page.elements()[1].frame().left, 0.5);

        let err = modify_element(&mut page, 0, 0, None, &bad_cell, &config).unwrap_err();
        assert!(err.to_string().contains("need a table"));

        let zero = PositionUpdate {
            height: Some(0.0),
            ..PositionUpdate::default()
        };
        assert!(modify_element(&mut page, 0, 0, Some(&zero), &[], &config).is_err());
    }

    #[test]
    fn missing_element_reports_the_range() {
        let mut page = page();
        let err = modify_element(&mut page, 2, 7, None, &[], &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Element index 7 out of range on slide 2: valid range is 0..=1"
        );
    }
}

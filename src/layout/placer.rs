//! Per-block placement: box geometry, font size and the created shape.

use log::debug;
use serde::Serialize;

use super::cursor::LayoutCursor;
use super::fit::{self, FitHints};
use super::runs::{emit_runs, paragraph, RunStyle};
use crate::config::LayoutConfig;
use crate::document::{DocumentError, ParagraphSpec, ShapeHandle, SlideEditor};
use crate::markup::{has_formatting, plain_text, Block, Inline, ListItem};
use crate::models::colors::RgbColor;
use crate::models::properties::Alignment;
use crate::units::{round3, Rect};

/// Bullet glyphs by nesting depth, repeating past the third level.
const BULLET_GLYPHS: [&str; 3] = ["•", "◦", "▪"];

/// Describes one shape created by a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedShape {
    pub object_id: String,
    pub element_index: usize,
    pub block_type: &'static str,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Font size of the block; for tables, the smallest cell size.
    pub font_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    pub text: String,
}

/// A created shape and the cursor for the block after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub shape: PlacedShape,
    pub next: LayoutCursor,
}

/// Places blocks onto a slide according to a [`LayoutConfig`].
pub struct BlockPlacer<'a> {
    config: &'a LayoutConfig,
    color: Option<&'a RgbColor>,
}

impl<'a> BlockPlacer<'a> {
    pub fn new(config: &'a LayoutConfig, color: Option<&'a RgbColor>) -> Self {
        Self { config, color }
    }

    /// Creates the shape for `block` with its top edge at `cursor`.
    pub fn place(
        &self,
        editor: &mut SlideEditor<'_>,
        block: &Block,
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let placement = match block {
            Block::Heading { level: 1, content } => self.place_title(editor, content, cursor),
            Block::Heading { level, content } => {
                self.place_heading(editor, *level, content, cursor)
            }
            Block::Paragraph(content) => self.place_paragraph(editor, content, cursor),
            Block::List { ordered, items } => self.place_list(editor, *ordered, items, cursor),
            Block::Table(rows) => self.place_table(editor, rows, cursor),
            Block::BlockQuote(paragraphs) => self.place_quote(editor, paragraphs, cursor),
            Block::CodeBlock { code, .. } => self.place_code(editor, code, cursor),
        }?;
        debug!(
            "Placed {} at top {:.2}in ({:.2}in tall, {}pt)",
            placement.shape.block_type,
            placement.shape.top,
            placement.shape.height,
            placement.shape.font_size
        );
        Ok(placement)
    }

    fn style(&self, size: u32) -> RunStyle {
        RunStyle::from_config(self.config, size).with_color(self.color)
    }

    fn fit(&self, text: &str, width: f64, height: f64, max_size: f64, hints: FitHints) -> u32 {
        fit::estimate(&self.config.fit, text, width, height, max_size, hints)
    }

    /// Room left between the cursor and the bottom margin, never less than
    /// one paragraph.
    fn available_height(&self, cursor: LayoutCursor) -> f64 {
        let config = self.config;
        (config.content_bottom() - cursor.top()).max(config.paragraph_min_height)
    }

    /// Height of flowing text at `size`, between the paragraph minimum and `available`.
    fn flow_height(&self, text: &str, width: f64, size: u32, hints: FitHints, available: f64) -> f64 {
        let config = self.config;
        let size = f64::from(size);
        let lines = fit::estimated_lines(&config.fit, text, width, size, hints).ceil();
        let line_height = fit::line_height(&config.fit, size, hints);
        (lines * line_height + config.paragraph_padding)
            .max(config.paragraph_min_height)
            .min(available)
    }

    fn place_title(
        &self,
        editor: &mut SlideEditor<'_>,
        content: &[Inline],
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let text = plain_text(content);
        let frame = Rect::new(
            config.margin_left,
            cursor.top(),
            config.content_width(),
            config.title_height,
        );
        let size = self.fit(
            &text,
            frame.width,
            frame.height,
            config.font_sizes.title,
            FitHints::formatted(),
        );
        let paragraphs = [paragraph(content, &self.style(size).bold(), Some(Alignment::Center))];
        let handle = editor.add_text_box(frame, &paragraphs)?;
        let next = cursor
            .advance(frame.height, config.gaps.heading)
            .anchor(config.title_reserved_offset);
        Ok(placed(handle, "title", frame, size, None, text, next))
    }

    fn place_heading(
        &self,
        editor: &mut SlideEditor<'_>,
        level: u8,
        content: &[Inline],
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let text = plain_text(content);
        let frame = Rect::new(
            config.margin_left,
            cursor.top(),
            config.content_width(),
            config.heading_height,
        );
        let size = self.fit(
            &text,
            frame.width,
            frame.height,
            config.font_sizes.heading(level),
            FitHints::formatted(),
        );
        let paragraphs = [paragraph(content, &self.style(size).bold(), Some(Alignment::Start))];
        let handle = editor.add_text_box(frame, &paragraphs)?;
        let next = cursor.advance(frame.height, config.gaps.heading);
        Ok(placed(handle, "heading", frame, size, None, text, next))
    }

    fn place_paragraph(
        &self,
        editor: &mut SlideEditor<'_>,
        content: &[Inline],
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let text = plain_text(content);
        let hints = FitHints {
            formatted: has_formatting(content),
            bullets: false,
        };
        let width = config.content_width();
        let available = self.available_height(cursor);
        let size = self.fit(&text, width, available, config.font_sizes.body, hints);
        let height = self.flow_height(&text, width, size, hints, available);
        let frame = Rect::new(config.margin_left, cursor.top(), width, height);

        let paragraphs = [paragraph(content, &self.style(size), Some(Alignment::Start))];
        let handle = editor.add_text_box(frame, &paragraphs)?;
        let next = cursor.advance(height, config.gaps.paragraph);
        Ok(placed(handle, "paragraph", frame, size, None, text, next))
    }

    fn place_list(
        &self,
        editor: &mut SlideEditor<'_>,
        ordered: bool,
        items: &[ListItem],
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let hints = FitHints::list(items.iter().any(|item| has_formatting(&item.content)));
        let text = items
            .iter()
            .map(|item| format!("{}{}", list_prefix(item), plain_text(&item.content)))
            .collect::<Vec<_>>()
            .join("\n");
        let frame = Rect::new(
            config.margin_left,
            cursor.top(),
            config.content_width(),
            config.list_item_height * items.len() as f64 + config.list_base_height,
        );
        let size = self.fit(&text, frame.width, frame.height, config.font_sizes.list, hints);

        let style = self.style(size);
        let paragraphs: Vec<ParagraphSpec> = items
            .iter()
            .map(|item| {
                let mut spec = ParagraphSpec::new(Some(Alignment::Start));
                spec.indent_start = config.list_indent * item.level as f64;
                spec.runs.push(style.run(&list_prefix(item)));
                emit_runs(&item.content, &style, &mut spec.runs);
                spec
            })
            .collect();
        let handle = editor.add_text_box(frame, &paragraphs)?;
        let block_type = if ordered { "numbered_list" } else { "bullet_list" };
        let next = cursor.advance(frame.height, config.gaps.list);
        Ok(placed(handle, block_type, frame, size, Some(items.len()), text, next))
    }

    fn place_table(
        &self,
        editor: &mut SlideEditor<'_>,
        rows: &[Vec<Vec<Inline>>],
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let frame = Rect::new(
            config.margin_left,
            cursor.top(),
            config.content_width(),
            config.table_row_height * rows.len() as f64,
        );
        let cell_width = frame.width / columns.max(1) as f64;

        let mut smallest: Option<u32> = None;
        let mut cells = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let header = row_index == 0;
            let mut row_cells = Vec::with_capacity(row.len());
            for cell in row {
                let hints = FitHints {
                    formatted: header || has_formatting(cell),
                    bullets: false,
                };
                let size = self.fit(
                    &plain_text(cell),
                    cell_width,
                    config.table_row_height,
                    config.font_sizes.table_cell,
                    hints,
                );
                smallest = Some(smallest.map_or(size, |s| s.min(size)));
                let style = if header {
                    self.style(size).bold()
                } else {
                    self.style(size)
                };
                row_cells.push(vec![paragraph(cell, &style, Some(Alignment::Start))]);
            }
            cells.push(row_cells);
        }

        let handle = editor.add_table(frame, &cells)?;
        let text = rows
            .iter()
            .map(|row| row.iter().map(|c| plain_text(c)).collect::<Vec<_>>().join(" | "))
            .collect::<Vec<_>>()
            .join("\n");
        let size = smallest.unwrap_or(config.font_sizes.table_cell as u32);
        let next = cursor.advance(frame.height, config.gaps.table);
        Ok(placed(handle, "table", frame, size, Some(rows.len()), text, next))
    }

    fn place_quote(
        &self,
        editor: &mut SlideEditor<'_>,
        paragraphs: &[Vec<Inline>],
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let text = paragraphs
            .iter()
            .map(|p| plain_text(p))
            .collect::<Vec<_>>()
            .join("\n");
        let hints = FitHints::formatted();
        let width = config.content_width() - config.quote_indent;
        let available = self.available_height(cursor);
        let size = self.fit(&text, width, available, config.font_sizes.quote, hints);
        let height = self.flow_height(&text, width, size, hints, available);
        let frame = Rect::new(config.margin_left + config.quote_indent, cursor.top(), width, height);

        let style = self.style(size).italic();
        let specs: Vec<ParagraphSpec> = paragraphs
            .iter()
            .map(|p| paragraph(p, &style, Some(Alignment::Start)))
            .collect();
        let handle = editor.add_text_box(frame, &specs)?;
        let next = cursor.advance(height, config.gaps.quote);
        Ok(placed(handle, "blockquote", frame, size, None, text, next))
    }

    fn place_code(
        &self,
        editor: &mut SlideEditor<'_>,
        code: &str,
        cursor: LayoutCursor,
    ) -> Result<Placement, DocumentError> {
        let config = self.config;
        let code = code.trim_end_matches('\n');
        let lines: Vec<&str> = code.split('\n').collect();
        let frame = Rect::new(
            config.margin_left,
            cursor.top(),
            config.content_width(),
            config.code_line_height * lines.len() as f64 + config.code_padding,
        );
        let size = self.fit(
            code,
            frame.width,
            frame.height,
            config.font_sizes.code,
            FitHints::plain(),
        );

        let family = &config.monospace_font_family;
        let style = RunStyle::new(family, family, f64::from(size)).with_color(self.color);
        let specs: Vec<ParagraphSpec> = lines
            .iter()
            .map(|line| {
                let mut spec = ParagraphSpec::new(Some(Alignment::Start));
                spec.runs.push(style.run(line));
                spec
            })
            .collect();
        let handle = editor.add_text_box(frame, &specs)?;
        let next = cursor.advance(frame.height, config.gaps.code);
        Ok(placed(handle, "code_block", frame, size, Some(lines.len()), code.to_string(), next))
    }
}

fn list_prefix(item: &ListItem) -> String {
    match item.number {
        Some(n) => format!("{}. ", n),
        None => format!("{} ", BULLET_GLYPHS[item.level % BULLET_GLYPHS.len()]),
    }
}

fn placed(
    handle: ShapeHandle,
    block_type: &'static str,
    frame: Rect,
    font_size: u32,
    item_count: Option<usize>,
    text: String,
    next: LayoutCursor,
) -> Placement {
    Placement {
        shape: PlacedShape {
            object_id: handle.object_id,
            element_index: handle.element_index,
            block_type,
            left: round3(frame.left),
            top: round3(frame.top),
            width: round3(frame.width),
            height: round3(frame.height),
            font_size,
            item_count,
            text,
        },
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::elements::PageElementKind;
    use crate::models::page::Page;
    use crate::models::text_element::TextElementKind;

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.to_string())]
    }

    fn place(page: &mut Page, block: &Block, top: f64) -> Placement {
        let config = LayoutConfig::default();
        let mut editor = SlideEditor::new(page);
        BlockPlacer::new(&config, None)
            .place(&mut editor, block, LayoutCursor::at(top))
            .unwrap()
    }

    #[test]
    fn title_anchors_the_cursor() {
        let mut page = Page::new_slide("s");
        let block = Block::Heading {
            level: 1,
            content: text("Welcome"),
        };
        let placement = place(&mut page, &block, 0.5);
        assert_eq!(placement.shape.block_type, "title");
        assert_eq!(placement.shape.font_size, 32);
        assert_eq!(placement.shape.width, 9.0);
        assert_eq!(placement.next.top(), 1.75);

        let shape = match &page.elements()[0].element_kind {
            PageElementKind::Shape(shape) => shape,
            other => panic!("expected a shape, got {:?}", other),
        };
        let style = shape.text.as_ref().unwrap().first_run_style().unwrap();
        assert_eq!(style.bold, Some(true));
    }

    #[test]
    fn heading_size_steps_down_with_level() {
        let mut page = Page::new_slide("s");
        let h2 = place(&mut page, &Block::Heading { level: 2, content: text("Two") }, 2.0);
        let h5 = place(&mut page, &Block::Heading { level: 5, content: text("Five") }, 3.0);
        assert_eq!(h2.shape.font_size, 24);
        assert_eq!(h5.shape.font_size, 16);
        assert!((h2.next.top() - 2.8).abs() < 1e-9);
    }

    #[test]
    fn list_height_follows_item_count() {
        let mut page = Page::new_slide("s");
        let items = vec![
            ListItem {
                level: 0,
                number: None,
                content: text("one"),
            },
            ListItem {
                level: 1,
                number: None,
                content: text("nested"),
            },
            ListItem {
                level: 0,
                number: None,
                content: text("two"),
            },
        ];
        let placement = place(
            &mut page,
            &Block::List {
                ordered: false,
                items,
            },
            1.75,
        );
        assert_eq!(placement.shape.item_count, Some(3));
        assert!((placement.shape.height - 1.7).abs() < 1e-9);
        assert_eq!(placement.shape.text, "• one\n◦ nested\n• two");
    }

    #[test]
    fn numbered_items_keep_their_numbers() {
        let item = |n| ListItem {
            level: 0,
            number: Some(n),
            content: text("step"),
        };
        assert_eq!(list_prefix(&item(3)), "3. ");
    }

    #[test]
    fn table_header_is_bold_and_cells_are_fitted() {
        let mut page = Page::new_slide("s");
        let rows = vec![
            vec![text("Name"), text("Value")],
            vec![text("alpha"), text("1")],
        ];
        let placement = place(&mut page, &Block::Table(rows), 2.0);
        assert_eq!(placement.shape.block_type, "table");
        assert!((placement.shape.height - 0.8).abs() < 1e-9);
        assert!(placement.shape.font_size <= 14);

        let table = match &page.elements()[0].element_kind {
            PageElementKind::Table(table) => table,
            other => panic!("expected a table, got {:?}", other),
        };
        let header = table.cell(0, 0).unwrap().text.as_ref().unwrap();
        assert_eq!(header.first_run_style().unwrap().bold, Some(true));
        let body = table.cell(1, 0).unwrap().text.as_ref().unwrap();
        assert_eq!(body.first_run_style().unwrap().bold, None);
    }

    #[test]
    fn quote_is_indented_and_italic() {
        let mut page = Page::new_slide("s");
        let placement = place(&mut page, &Block::BlockQuote(vec![text("Said someone")]), 2.0);
        assert_eq!(placement.shape.left, 1.0);
        assert_eq!(placement.shape.width, 8.5);
        let shape = match &page.elements()[0].element_kind {
            PageElementKind::Shape(shape) => shape,
            other => panic!("expected a shape, got {:?}", other),
        };
        let style = shape.text.as_ref().unwrap().first_run_style().unwrap();
        assert_eq!(style.italic, Some(true));
    }

    #[test]
    fn code_block_is_monospace_and_sized_by_lines() {
        let mut page = Page::new_slide("s");
        let block = Block::CodeBlock {
            language: Some("rust".into()),
            code: "fn main() {\n    run();\n}\n".into(),
        };
        let placement = place(&mut page, &block, 2.0);
        assert_eq!(placement.shape.item_count, Some(3));
        assert!((placement.shape.height - 1.05).abs() < 1e-9);

        let shape = match &page.elements()[0].element_kind {
            PageElementKind::Shape(shape) => shape,
            other => panic!("expected a shape, got {:?}", other),
        };
        let content = shape.text.as_ref().unwrap();
        assert_eq!(content.plain_text(), "fn main() {\n    run();\n}\n");
        let families: Vec<_> = content
            .elements()
            .iter()
            .filter_map(|e| match &e.kind {
                TextElementKind::TextRun(run) => run.style.as_ref()?.font_family.clone(),
                _ => None,
            })
            .collect();
        assert!(families.iter().all(|f| f == "Courier New"));
    }

    #[test]
    fn long_paragraph_grows_but_stays_on_the_canvas() {
        let mut page = Page::new_slide("s");
        let long = "word ".repeat(400);
        let placement = place(&mut page, &Block::Paragraph(text(&long)), 1.75);
        let bottom = placement.shape.top + placement.shape.height;
        assert!(placement.shape.height > 0.6);
        assert!(bottom <= 7.5 + 1e-9);
        assert!(placement.shape.font_size < 18);
    }

    #[test]
    fn flowing_text_stops_at_the_bottom_margin() {
        let config = LayoutConfig {
            margin_bottom: 1.5,
            ..LayoutConfig::default()
        };
        let mut page = Page::new_slide("s");
        let mut editor = SlideEditor::new(&mut page);
        let long = "word ".repeat(400);
        let placement = BlockPlacer::new(&config, None)
            .place(&mut editor, &Block::Paragraph(text(&long)), LayoutCursor::at(1.75))
            .unwrap();
        let bottom = placement.shape.top + placement.shape.height;
        assert!(bottom <= 6.0 + 1e-9, "bottom at {}", bottom);
        assert!(bottom > 5.9);
    }
}

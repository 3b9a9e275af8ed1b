use crate::models::{
    elements::{PageElement, PageElementKind},
    page::Page,
    presentation::Presentation,
    shape::Shape,
    table::Table,
};
use std::cmp::Ordering;

// --- Helper Functions for Sorting ---

/// Compares two elements by their top edge, then their left edge.
/// Elements with a non-comparable position (NaN) are treated as equal.
fn compare_elements_by_position(a: &PageElement, b: &PageElement) -> Ordering {
    let (fa, fb) = (a.frame(), b.frame());
    fa.top
        .partial_cmp(&fb.top)
        .unwrap_or(Ordering::Equal)
        .then(fa.left.partial_cmp(&fb.left).unwrap_or(Ordering::Equal))
}

// --- Text Extraction Logic ---

/// Text of a shape, with title placeholders rendered as a heading.
fn extract_text_from_shape(shape: &Shape) -> Option<String> {
    let text = shape.text.as_ref()?.plain_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match &shape.placeholder {
        Some(placeholder) if placeholder.is_title() => Some(format!("### {}", trimmed)),
        _ => Some(trimmed.to_string()),
    }
}

/// Escapes the pipe character so cell text cannot break the table syntax.
fn escape_cell(text: &str) -> String {
    text.trim().replace('|', "\\|").replace('\n', " ")
}

/// Renders a table as a Markdown pipe table; the first row is the header.
fn extract_text_from_table(table: &Table) -> Option<String> {
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            row.table_cells
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(|cell| {
                    cell.text
                        .as_ref()
                        .map(|t| escape_cell(&t.plain_text()))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    if rows.iter().flatten().all(String::is_empty) {
        return None;
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        let mut cells = row.clone();
        cells.resize(columns, String::new());
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            lines.push(format!("|{}", "---|".repeat(columns)));
        }
    }
    Some(lines.join("\n"))
}

fn extract_text_from_page_element(element: &PageElement) -> Option<String> {
    match &element.element_kind {
        PageElementKind::Shape(shape) => extract_text_from_shape(shape),
        PageElementKind::Table(table) => extract_text_from_table(table),
        PageElementKind::Image(image) => image
            .source_url
            .as_ref()
            .or(image.content_url.as_ref())
            .map(|url| format!("![image]({})", url)),
        PageElementKind::Chart(chart) => Some(format!(
            "*{} chart: {}*",
            format!("{:?}", chart.chart_type).to_lowercase(),
            chart.title.as_deref().unwrap_or("untitled")
        )),
    }
}

/// Text of every element on a slide, top to bottom, separated by blank lines.
fn extract_text_from_slide(slide: &Page) -> Option<String> {
    let mut sorted_elements: Vec<&PageElement> = slide.elements().iter().collect();
    sorted_elements.sort_by(|a, b| compare_elements_by_position(a, b));

    let slide_parts: Vec<String> = sorted_elements
        .into_iter()
        .filter_map(extract_text_from_page_element)
        .collect();

    if slide_parts.is_empty() {
        None
    } else {
        Some(slide_parts.join("\n\n"))
    }
}

// --- Public API Function ---

/// Extracts the text of every slide as Markdown.
///
/// The document starts with a `# Presentation` header (and the title when
/// set); each slide with content gets a `## Slide N` header, slides are
/// separated by `---`, and slides without any text are skipped.
pub fn extract_text_from_presentation(presentation: &Presentation) -> String {
    let mut full_text = String::from("# Presentation\n");
    if let Some(title) = &presentation.title {
        full_text.push_str(title);
        full_text.push('\n');
    }
    full_text.push('\n');

    let mut first_slide = true;
    for (index, slide) in presentation.slides().iter().enumerate() {
        let Some(slide_content) = extract_text_from_slide(slide) else {
            continue;
        };
        if !first_slide {
            full_text.push_str("\n---\n\n");
        }
        first_slide = false;
        full_text.push_str(&format!("## Slide {}\n\n{}\n", index + 1, slide_content));
    }

    full_text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::layout_markup;
    use crate::models::common::Size;

    #[test]
    fn slides_are_exported_in_reading_order() {
        let mut presentation = Presentation::new("p", Size::emu(9144000.0, 6858000.0));
        presentation.title = Some("Quarterly review".into());
        let config = LayoutConfig::default();

        let mut first = Page::new_slide("a");
        layout_markup(
            &mut first,
            "# Results\n\nRevenue grew.\n\n| Region | Total |\n|---|---|\n| North | 1 |\n",
            &config,
            None,
        );
        // Reverse the element order to check sorting by position.
        first.elements_mut().reverse();
        presentation.slides_mut().push(first);
        presentation.slides_mut().push(Page::new_slide("empty"));
        let mut third = Page::new_slide("c");
        layout_markup(&mut third, "# Next\n\n- one\n- two", &config, None);
        presentation.slides_mut().push(third);

        let markdown = extract_text_from_presentation(&presentation);
        assert_eq!(
            markdown,
            "# Presentation\nQuarterly review\n\n\
             ## Slide 1\n\nResults\n\nRevenue grew.\n\n\
             | Region | Total |\n|---|---|\n| North | 1 |\n\
             \n---\n\n\
             ## Slide 3\n\nNext\n\n• one\n• two\n"
        );
    }

    #[test]
    fn cell_pipes_are_escaped() {
        assert_eq!(escape_cell(" a|b \n"), "a\\|b");
    }
}

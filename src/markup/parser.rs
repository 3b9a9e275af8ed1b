//! Event-driven conversion of CommonMark into [`Block`] nodes.

use log::debug;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use super::nodes::{Block, Inline, ListItem};
use super::underline::rewrite_underline;

/// Extensions enabled for every parse of slide markup.
pub fn markup_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Parses markup into blocks in document order. Never fails: constructs
/// without a block counterpart are skipped and unbalanced spans degrade to
/// plain text.
pub fn parse(markup: &str) -> Vec<Block> {
    let source = rewrite_underline(markup);
    let mut builder = BlockBuilder::new();
    for event in Parser::new_ext(&source, markup_options()) {
        builder.handle(event);
    }
    let blocks = builder.finish();
    debug!("Parsed {} block(s) from {} bytes of markup", blocks.len(), markup.len());
    blocks
}

#[derive(Debug, Clone, PartialEq)]
enum SpanKind {
    Root,
    Bold,
    Italic,
    Underline,
    Link(String),
    /// Strikethrough, image alt text: children are kept, the span is not.
    Transparent,
}

#[derive(Debug)]
struct Span {
    kind: SpanKind,
    children: Vec<Inline>,
}

impl Span {
    fn new(kind: SpanKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    fn push(&mut self, inline: Inline) {
        if let Inline::Text(text) = &inline {
            if let Some(Inline::Text(last)) = self.children.last_mut() {
                last.push_str(text);
                return;
            }
        }
        self.children.push(inline);
    }

    /// Folds this span into its parent.
    fn close_into(self, parent: &mut Span) {
        match self.kind {
            SpanKind::Bold => parent.push(Inline::Bold(self.children)),
            SpanKind::Italic => parent.push(Inline::Italic(self.children)),
            SpanKind::Underline => parent.push(Inline::Underline(self.children)),
            SpanKind::Link(url) => parent.push(Inline::Link {
                url,
                children: self.children,
            }),
            SpanKind::Root | SpanKind::Transparent => {
                self.children.into_iter().for_each(|c| parent.push(c))
            }
        }
    }
}

struct ListFrame {
    ordered: bool,
    next_number: u64,
}

struct ItemFrame {
    level: usize,
    number: Option<u64>,
    flushed: bool,
}

#[derive(Default)]
struct TableFrame {
    rows: Vec<Vec<Vec<Inline>>>,
    current_row: Vec<Vec<Inline>>,
}

struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    heading: Option<u8>,
    quote_depth: usize,
    quote: Vec<Vec<Inline>>,
    lists: Vec<ListFrame>,
    outer_list_ordered: bool,
    list_items: Vec<ListItem>,
    items: Vec<ItemFrame>,
    table: Option<TableFrame>,
    code: Option<(Option<String>, String)>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            spans: vec![Span::new(SpanKind::Root)],
            heading: None,
            quote_depth: 0,
            quote: Vec::new(),
            lists: Vec::new(),
            outer_list_ordered: false,
            list_items: Vec::new(),
            items: Vec::new(),
            table: None,
            code: None,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match &mut self.code {
                Some((_, code)) => code.push_str(&text),
                None => self.push_inline(Inline::Text(text.into_string())),
            },
            Event::Code(code) => self.push_inline(Inline::Monospace(code.into_string())),
            Event::SoftBreak | Event::HardBreak => self.push_inline(Inline::Text(" ".into())),
            Event::InlineHtml(html) => match html.trim().to_ascii_lowercase().as_str() {
                "<u>" => self.spans.push(Span::new(SpanKind::Underline)),
                "</u>" => self.close_span(|k| *k == SpanKind::Underline),
                _ => {}
            },
            // Raw HTML blocks, rules, footnotes, task markers and math have
            // no slide counterpart.
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Later paragraphs of a loose list item continue the item.
                if !self.items.is_empty() && !self.root().children.is_empty() {
                    self.push_inline(Inline::Text(" ".into()));
                }
            }
            Tag::Heading { level, .. } => self.heading = Some(level as u8),
            Tag::BlockQuote { .. } => self.quote_depth += 1,
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.trim().is_empty() => {
                        Some(lang.trim().to_string())
                    }
                    _ => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::List(start) => {
                if !self.items.is_empty() {
                    self.flush_item();
                }
                if self.lists.is_empty() {
                    self.outer_list_ordered = start.is_some();
                }
                self.lists.push(ListFrame {
                    ordered: start.is_some(),
                    next_number: start.unwrap_or(1),
                });
            }
            Tag::Item => {
                let level = self.lists.len().saturating_sub(1);
                let number = self.lists.last_mut().and_then(|frame| {
                    frame.ordered.then(|| {
                        let n = frame.next_number;
                        frame.next_number += 1;
                        n
                    })
                });
                self.items.push(ItemFrame {
                    level,
                    number,
                    flushed: false,
                });
            }
            Tag::Table(_) => self.table = Some(TableFrame::default()),
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = &mut self.table {
                    table.current_row.clear();
                }
            }
            Tag::Emphasis => self.spans.push(Span::new(SpanKind::Italic)),
            Tag::Strong => self.spans.push(Span::new(SpanKind::Bold)),
            Tag::Link { dest_url, .. } => self
                .spans
                .push(Span::new(SpanKind::Link(dest_url.into_string()))),
            Tag::Strikethrough | Tag::Image { .. } => {
                self.spans.push(Span::new(SpanKind::Transparent))
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.items.is_empty() {
                    let inlines = self.take_inlines();
                    self.emit_text_block(inlines, Block::Paragraph);
                }
            }
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                if self.items.is_empty() {
                    let content = self.take_inlines();
                    self.emit_text_block(content, |content| Block::Heading { level, content });
                }
            }
            TagEnd::BlockQuote { .. } => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 && !self.quote.is_empty() {
                    let paragraphs = std::mem::take(&mut self.quote);
                    self.blocks.push(Block::BlockQuote(paragraphs));
                }
            }
            TagEnd::CodeBlock => {
                if let Some((language, mut code)) = self.code.take() {
                    while code.ends_with('\n') {
                        code.pop();
                    }
                    if self.quote_depth > 0 {
                        self.quote.push(vec![Inline::Monospace(code)]);
                    } else {
                        self.blocks.push(Block::CodeBlock { language, code });
                    }
                }
            }
            TagEnd::Item => {
                self.flush_item();
                self.items.pop();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    let items = std::mem::take(&mut self.list_items);
                    if self.quote_depth > 0 {
                        self.quote.extend(items.into_iter().map(|i| i.content));
                    } else if !items.is_empty() {
                        self.blocks.push(Block::List {
                            ordered: self.outer_list_ordered,
                            items,
                        });
                    }
                }
            }
            TagEnd::TableCell => {
                let cell = self.take_inlines();
                if let Some(table) = &mut self.table {
                    table.current_row.push(cell);
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    if !table.rows.is_empty() {
                        self.blocks.push(Block::Table(table.rows));
                    }
                }
            }
            TagEnd::Emphasis => self.close_span(|k| *k == SpanKind::Italic),
            TagEnd::Strong => self.close_span(|k| *k == SpanKind::Bold),
            TagEnd::Link => self.close_span(|k| matches!(k, SpanKind::Link(_))),
            TagEnd::Strikethrough | TagEnd::Image => {
                self.close_span(|k| *k == SpanKind::Transparent)
            }
            _ => {}
        }
    }

    fn root(&self) -> &Span {
        &self.spans[0]
    }

    fn push_inline(&mut self, inline: Inline) {
        if let Some(top) = self.spans.last_mut() {
            top.push(inline);
        }
    }

    /// Closes spans down to and including the innermost one matching `is_target`.
    /// Unclosed spans above it are folded in as if closed at the same point.
    fn close_span(&mut self, is_target: impl Fn(&SpanKind) -> bool) {
        let Some(position) = self.spans.iter().skip(1).rposition(|s| is_target(&s.kind)) else {
            return;
        };
        let target = position + 1;
        while self.spans.len() > target {
            if let Some(span) = self.spans.pop() {
                let parent = self.spans.len() - 1;
                span.close_into(&mut self.spans[parent]);
            }
        }
    }

    /// Drains everything collected since the last text block, trimming the
    /// outer whitespace.
    fn take_inlines(&mut self) -> Vec<Inline> {
        while self.spans.len() > 1 {
            if let Some(span) = self.spans.pop() {
                span.close_into(&mut self.spans[0]);
            }
        }
        let mut inlines = std::mem::take(&mut self.spans[0].children);
        if let Some(Inline::Text(first)) = inlines.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(Inline::Text(last)) = inlines.last_mut() {
            *last = last.trim_end().to_string();
        }
        inlines.retain(|i| !matches!(i, Inline::Text(t) if t.is_empty()));
        inlines
    }

    /// Adds a paragraph or heading, or folds it into the open quote.
    fn emit_text_block(&mut self, content: Vec<Inline>, make: impl FnOnce(Vec<Inline>) -> Block) {
        if content.is_empty() {
            return;
        }
        if self.quote_depth > 0 {
            self.quote.push(content);
        } else {
            self.blocks.push(make(content));
        }
    }

    fn flush_item(&mut self) {
        let content = self.take_inlines();
        let Some(frame) = self.items.last_mut() else {
            return;
        };
        if frame.flushed && content.is_empty() {
            return;
        }
        let number = if frame.flushed { None } else { frame.number };
        frame.flushed = true;
        self.list_items.push(ListItem {
            level: frame.level,
            number,
            content,
        });
    }

    fn finish(mut self) -> Vec<Block> {
        // Whatever an unterminated construct left behind becomes a paragraph.
        let trailing = self.take_inlines();
        if !trailing.is_empty() {
            self.blocks.push(Block::Paragraph(trailing));
        }
        self.blocks
    }
}

/// A formatting span within a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Underline(Vec<Inline>),
    /// Inline code; rendered in the monospace family.
    Monospace(String),
    /// Link text with its destination.
    Link { url: String, children: Vec<Inline> },
}

impl Inline {
    /// True for every variant that carries styling.
    pub fn is_formatted(&self) -> bool {
        !matches!(self, Inline::Text(_))
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(text) | Inline::Monospace(text) => out.push_str(text),
            Inline::Bold(children)
            | Inline::Italic(children)
            | Inline::Underline(children)
            | Inline::Link { children, .. } => {
                children.iter().for_each(|c| c.push_plain_text(out))
            }
        }
    }
}

/// Text of a span sequence with every formatting marker removed.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    inlines.iter().for_each(|i| i.push_plain_text(&mut out));
    out
}

/// True when any span in the sequence carries formatting.
pub fn has_formatting(inlines: &[Inline]) -> bool {
    inlines.iter().any(Inline::is_formatted)
}

/// One list entry. Nested lists are flattened into their outermost list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Nesting depth, 0 for top-level items.
    pub level: usize,
    /// The item's number when it belongs to an ordered list.
    pub number: Option<u64>,
    pub content: Vec<Inline>,
}

/// One markup-derived structural unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    /// Rows of cells; the first row is the header.
    Table(Vec<Vec<Vec<Inline>>>),
    /// The quote's paragraphs.
    BlockQuote(Vec<Vec<Inline>>),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
}

impl Block {
    /// Short type tag used in layout reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { level: 1, .. } => "title",
            Block::Heading { .. } => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::List { ordered: false, .. } => "bullet_list",
            Block::List { ordered: true, .. } => "numbered_list",
            Block::Table(_) => "table",
            Block::BlockQuote(_) => "blockquote",
            Block::CodeBlock { .. } => "code_block",
        }
    }
}

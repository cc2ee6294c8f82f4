//! Markdown to raw blocks, via pulldown-cmark.
//!
//! Inline markup is flattened to plain text. Headings deeper than level 3
//! become level 3. Nested lists flatten into their outermost list and each
//! item keeps only its first paragraph. Images, HTML and tables are dropped.

use mdpage::RawBlock;
use pulldown_cmark::{Event, Options, Parser, Tag};

/// Open element on the parser stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Heading(u8),
    Paragraph,
    CodeBlock,
    BlockQuote,
    List { ordered: bool },
    Item,
    Skipped,
    Inline,
}

/// Text gathered for the innermost open list item.
#[derive(Debug, Default)]
struct ItemText {
    text: String,
    /// First paragraph finished; later text is ignored
    done: bool,
    /// Text already moved to the list because a nested list started
    flushed: bool,
}

#[derive(Debug, Default)]
struct BlockCollector {
    blocks: Vec<RawBlock>,
    stack: Vec<Frame>,
    text: String,
    quote_parts: Vec<String>,
    list_items: Vec<String>,
    items: Vec<ItemText>,
}

/// Parse markdown into raw blocks ready for layout.
pub fn parse_markdown(content: &str) -> Vec<RawBlock> {
    let parser = Parser::new_ext(content, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut collector = BlockCollector::default();

    for event in parser {
        match event {
            Event::Start(tag) => collector.start(tag),
            Event::End(_) => collector.end(),
            Event::Text(text) | Event::Code(text) => collector.push_text(&text),
            Event::SoftBreak | Event::HardBreak => collector.push_text(" "),
            Event::Rule => collector.rule(),
            Event::Html(_) | Event::InlineHtml(_) => {
                log::debug!("Dropping inline HTML");
            }
            _ => {}
        }
    }

    collector.blocks
}

impl BlockCollector {
    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Heading { level, .. } => Frame::Heading((level as u8).min(3)),
            Tag::Paragraph => Frame::Paragraph,
            Tag::CodeBlock(_) => Frame::CodeBlock,
            Tag::BlockQuote(_) => Frame::BlockQuote,
            Tag::List(start) => {
                if self.list_depth() > 0 {
                    self.flush_item();
                }
                Frame::List {
                    ordered: start.is_some(),
                }
            }
            Tag::Item => {
                self.items.push(ItemText::default());
                Frame::Item
            }
            Tag::Image { .. } | Tag::Table(_) | Tag::HtmlBlock => {
                log::debug!("Skipping unsupported markdown element");
                Frame::Skipped
            }
            _ => Frame::Inline,
        };

        if matches!(
            frame,
            Frame::Heading(_) | Frame::Paragraph | Frame::CodeBlock
        ) && self.items.is_empty()
        {
            self.text.clear();
        }
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Heading(level) => {
                if let Some(text) = self.finish_text() {
                    self.emit(RawBlock::new(format!("h{}", level)).with_text(text));
                }
            }
            Frame::Paragraph => {
                if let Some(text) = self.finish_text() {
                    if !text.trim().is_empty() {
                        self.emit(RawBlock::new("p").with_text(text));
                    }
                }
            }
            Frame::CodeBlock => {
                if let Some(text) = self.finish_text() {
                    self.emit(RawBlock::new("pre").with_text(text));
                }
            }
            Frame::BlockQuote => {
                if !self.in_quote() {
                    let text = self.quote_parts.drain(..).collect::<Vec<_>>().join(" ");
                    if !text.trim().is_empty() {
                        self.emit(RawBlock::new("blockquote").with_text(text));
                    }
                }
            }
            Frame::List { ordered } => {
                if self.list_depth() == 0 {
                    let items = std::mem::take(&mut self.list_items);
                    let tag = if ordered { "ol" } else { "ul" };
                    self.emit(RawBlock::new(tag).with_items(items));
                }
            }
            Frame::Item => {
                if let Some(item) = self.items.pop() {
                    if !item.flushed {
                        self.list_items.push(item.text.trim().to_string());
                    }
                }
            }
            Frame::Skipped | Frame::Inline => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.stack.contains(&Frame::Skipped) {
            return;
        }
        match self.items.last_mut() {
            Some(item) if !item.done => item.text.push_str(text),
            Some(_) => {}
            None => self.text.push_str(text),
        }
    }

    fn rule(&mut self) {
        if self.items.is_empty() && !self.in_quote() {
            self.blocks.push(RawBlock::new("hr"));
        }
    }

    /// Close a text-bearing block. Inside a list item this ends the item's
    /// first paragraph and yields nothing.
    fn finish_text(&mut self) -> Option<String> {
        if let Some(item) = self.items.last_mut() {
            item.done = true;
            return None;
        }
        Some(std::mem::take(&mut self.text))
    }

    /// Route a finished block to the enclosing blockquote, or the output.
    fn emit(&mut self, block: RawBlock) {
        if self.in_quote() {
            if let Some(text) = block.text {
                self.quote_parts.push(text);
            }
            if let Some(items) = block.items {
                self.quote_parts.extend(items);
            }
        } else {
            self.blocks.push(block);
        }
    }

    /// Move the open item's text into the list before a nested list starts.
    fn flush_item(&mut self) {
        if let Some(item) = self.items.last_mut() {
            if !item.flushed && !item.text.trim().is_empty() {
                self.list_items.push(item.text.trim().to_string());
            }
            item.text.clear();
            item.done = true;
            item.flushed = true;
        }
    }

    fn list_depth(&self) -> usize {
        self.stack
            .iter()
            .filter(|frame| matches!(frame, Frame::List { .. }))
            .count()
    }

    fn in_quote(&self) -> bool {
        self.stack.contains(&Frame::BlockQuote)
    }
}

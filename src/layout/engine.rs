//! Pagination engine.

use rayon::prelude::*;

use crate::error::Result;
use crate::measure::{ApproximateMetrics, GreedyWrapper, TextWrapper};
use crate::model::{
    BlockNode, DrawCommand, FilledRect, LineSegment, ListKind, PageGeometry, RawBlock,
    TextCommand,
};

use super::rules::{self, BlockStyle};
use super::{
    Cursor, DefaultPaginator, ErrorMode, LayoutOptions, LayoutResult, LayoutStats, LayoutWarning,
};

/// Lays out block sequences into draw commands.
///
/// A `Paginator` holds only immutable configuration. Every call to
/// [`run`](Self::run) builds its own cursor and output buffer, so one
/// instance may serve any number of runs, including concurrent ones when
/// the wrapper is `Sync`.
///
/// # Example
///
/// ```
/// use mdpage::{BlockNode, DefaultPaginator, HeadingLevel, PageGeometry};
///
/// let blocks = vec![
///     BlockNode::heading(HeadingLevel::H1, "Hello"),
///     BlockNode::paragraph("Some body text."),
/// ];
/// let result = DefaultPaginator::default().run(&blocks, &PageGeometry::a4())?;
/// assert_eq!(result.page_count, 1);
/// # Ok::<(), mdpage::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Paginator<W> {
    wrapper: W,
    options: LayoutOptions,
}

impl Default for DefaultPaginator {
    fn default() -> Self {
        Self::new(GreedyWrapper::new(ApproximateMetrics::default()))
    }
}

impl<W: TextWrapper> Paginator<W> {
    /// Create a paginator wrapping text with `wrapper`.
    pub fn new(wrapper: W) -> Self {
        Self {
            wrapper,
            options: LayoutOptions::default(),
        }
    }

    /// Replace the layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip unknown raw block kinds instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel batch layout.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the minimum runway in points.
    pub fn with_min_runway(mut self, points: f32) -> Self {
        self.options = self.options.with_min_runway(points);
        self
    }

    /// Set the unordered list marker.
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.options = self.options.with_bullet(bullet);
        self
    }

    /// Lay out `blocks` on pages of `geometry`.
    ///
    /// Fails without producing output if the geometry is unusable or the
    /// wrapper reports an error.
    pub fn run(&self, blocks: &[BlockNode], geometry: &PageGeometry) -> Result<LayoutResult> {
        geometry.validate()?;
        LayoutRun::new(&self.wrapper, &self.options, *geometry)
            .execute(blocks.iter().enumerate(), Vec::new())
    }

    /// Lay out loosely typed blocks from a tag-based supplier.
    ///
    /// Unknown kinds fail the run in [`ErrorMode::Strict`] and are skipped
    /// with a [`LayoutWarning::SkippedBlock`] in [`ErrorMode::Lenient`].
    /// Malformed blocks of known kinds always fail.
    pub fn run_raw(&self, raw: &[RawBlock], geometry: &PageGeometry) -> Result<LayoutResult> {
        geometry.validate()?;

        let mut blocks = Vec::with_capacity(raw.len());
        let mut warnings = Vec::new();
        for (index, block) in raw.iter().enumerate() {
            if !block.is_known_kind() && self.options.unknown_blocks == ErrorMode::Lenient {
                log::warn!("Skipping block {} of unknown kind '{}'", index, block.tag);
                warnings.push(LayoutWarning::SkippedBlock {
                    block_index: index,
                    kind: block.tag.clone(),
                });
                continue;
            }
            blocks.push((index, block.clone().into_block(index)?));
        }

        LayoutRun::new(&self.wrapper, &self.options, *geometry).execute(
            blocks.iter().map(|(index, block)| (*index, block)),
            warnings,
        )
    }
}

impl<W: TextWrapper + Sync> Paginator<W> {
    /// Lay out several independent documents on the same geometry.
    ///
    /// Results are returned in input order. Documents run in parallel
    /// unless the options are [`sequential`](LayoutOptions::sequential).
    pub fn run_batch(
        &self,
        documents: &[Vec<BlockNode>],
        geometry: &PageGeometry,
    ) -> Vec<Result<LayoutResult>> {
        if self.options.parallel {
            documents
                .par_iter()
                .map(|blocks| self.run(blocks, geometry))
                .collect()
        } else {
            documents
                .iter()
                .map(|blocks| self.run(blocks, geometry))
                .collect()
        }
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Laying,
    Done,
}

/// Private state of one layout run.
struct LayoutRun<'a, W> {
    wrapper: &'a W,
    options: &'a LayoutOptions,
    geometry: PageGeometry,
    state: RunState,
    cursor: Cursor,
    commands: Vec<DrawCommand>,
    warnings: Vec<LayoutWarning>,
    stats: LayoutStats,
}

impl<'a, W: TextWrapper> LayoutRun<'a, W> {
    fn new(wrapper: &'a W, options: &'a LayoutOptions, geometry: PageGeometry) -> Self {
        Self {
            wrapper,
            options,
            geometry,
            state: RunState::Idle,
            cursor: Cursor::new(geometry.margin),
            commands: Vec::new(),
            warnings: Vec::new(),
            stats: LayoutStats::new(),
        }
    }

    fn execute<'b, I>(mut self, blocks: I, warnings: Vec<LayoutWarning>) -> Result<LayoutResult>
    where
        I: IntoIterator<Item = (usize, &'b BlockNode)>,
    {
        debug_assert_eq!(self.state, RunState::Idle);
        self.state = RunState::Laying;
        self.warnings = warnings;

        for (index, block) in blocks {
            self.lay_block(index, block)?;
        }

        self.state = RunState::Done;
        let page_count = self.cursor.page_index + 1;
        self.stats.page_count = page_count;
        log::debug!(
            "Layout finished: {} pages, {} commands, {} warnings",
            page_count,
            self.commands.len(),
            self.warnings.len()
        );

        Ok(LayoutResult {
            commands: self.commands,
            page_count,
            warnings: self.warnings,
            stats: self.stats,
            cursor: self.cursor,
        })
    }

    fn lay_block(&mut self, index: usize, block: &BlockNode) -> Result<()> {
        log::debug!(
            "Block {} ({}) at y={:.1} on page {}",
            index,
            block.kind_name(),
            self.cursor.y,
            self.cursor.page_index + 1
        );

        match block {
            BlockNode::Heading { level, text } => {
                self.stats.add_heading();
                let x = self.geometry.margin;
                let width = self.geometry.usable_width();
                self.lay_flow(index, text, rules::heading(*level), x, width, false)
            }
            BlockNode::Paragraph { text } => {
                self.stats.add_paragraph();
                let x = self.geometry.margin;
                let width = self.geometry.usable_width();
                self.lay_flow(index, text, rules::paragraph(), x, width, false)
            }
            BlockNode::UnorderedList { items } => self.lay_list(index, ListKind::Unordered, items),
            BlockNode::OrderedList { items } => self.lay_list(index, ListKind::Ordered, items),
            BlockNode::CodeBlock { text } => {
                self.lay_code(index, text);
                Ok(())
            }
            BlockNode::Blockquote { text } => {
                self.stats.add_blockquote();
                let x = self.geometry.margin + rules::QUOTE_TEXT_INDENT;
                let width = self.geometry.usable_width() - rules::QUOTE_WRAP_INSET;
                self.lay_flow(index, text, rules::blockquote(), x, width, true)
            }
            BlockNode::Rule => {
                self.lay_rule();
                Ok(())
            }
        }
    }

    /// Headings, paragraphs and blockquotes. The block moves to a fresh
    /// page when it does not fit but would fit there; a block taller than
    /// a page flows across pages line by line.
    fn lay_flow(
        &mut self,
        index: usize,
        text: &str,
        style: BlockStyle,
        x: f32,
        width: f32,
        quote: bool,
    ) -> Result<()> {
        let lines = self.wrapper.wrap(text, width, &style.font)?;
        self.stats.add_text_lines(lines.len());
        if lines.is_empty() {
            // Nothing to draw, so no page break either
            self.cursor.y += style.gap_after;
            return Ok(());
        }

        self.ensure_runway();

        let height = style.height(lines.len());
        if height <= self.geometry.usable_height() && height > self.remaining() {
            self.break_unless_top();
        }

        let mut pending = lines.as_slice();
        while !pending.is_empty() {
            let mut fit = (self.remaining() / style.line_height).floor().max(0.0) as usize;
            if fit == 0 {
                if !self.at_page_top() {
                    self.page_break();
                    continue;
                }
                // A single line taller than the page
                self.overflow(index, None, style.line_height);
                fit = 1;
            }

            let (chunk, rest) = pending.split_at(fit.min(pending.len()));
            let chunk_height = style.height(chunk.len());
            let top = self.cursor.y;

            if quote {
                let rule_x = self.geometry.margin - rules::QUOTE_RULE_OFFSET;
                self.commands.push(DrawCommand::Line(LineSegment {
                    x1: rule_x,
                    y1: top,
                    x2: rule_x,
                    y2: top + chunk_height,
                    color: self.options.quote_rule_color,
                    width: rules::QUOTE_RULE_WIDTH,
                }));
            }
            self.commands.push(DrawCommand::Text(TextCommand::new(
                chunk.to_vec(),
                x,
                top + style.ascent(),
                &style.font,
                style.line_height,
            )));

            self.cursor.y += chunk_height;
            pending = rest;
            if !pending.is_empty() {
                self.page_break();
            }
        }

        self.cursor.y += style.gap_after;
        Ok(())
    }

    /// Lists. Each item is kept on one page unless it alone is taller than
    /// a page.
    fn lay_list(&mut self, index: usize, kind: ListKind, items: &[String]) -> Result<()> {
        self.stats.add_list();
        if items.is_empty() {
            return Ok(());
        }
        self.ensure_runway();

        let style = rules::list_item();
        let marker_x = self.geometry.margin;
        let text_x = marker_x + rules::LIST_TEXT_INDENT;
        let width = self.geometry.usable_width() - rules::LIST_WRAP_INSET;

        for (item_index, item) in items.iter().enumerate() {
            let mut lines = self.wrapper.wrap(item, width, &style.font)?;
            if lines.is_empty() {
                lines.push(String::new());
            }
            self.stats.add_list_item(lines.len());

            let height = style.height(lines.len());
            if height > self.remaining() {
                self.break_unless_top();
            }
            if height > self.geometry.usable_height() {
                self.overflow(index, Some(item_index), height);
            }

            let marker = match kind {
                ListKind::Unordered => self.options.bullet.clone(),
                ListKind::Ordered => format!("{}.", item_index + 1),
            };
            let baseline = self.cursor.y + style.ascent();
            self.commands.push(DrawCommand::Text(TextCommand::new(
                vec![marker],
                marker_x,
                baseline,
                &style.font,
                style.line_height,
            )));
            self.commands.push(DrawCommand::Text(TextCommand::new(
                lines,
                text_x,
                baseline,
                &style.font,
                style.line_height,
            )));

            self.cursor.y += height + style.gap_after;
        }

        self.cursor.y += rules::LIST_TRAILING_GAP;
        Ok(())
    }

    /// Code blocks: a background rectangle, then one command per verbatim
    /// line. Never split across pages.
    fn lay_code(&mut self, index: usize, text: &str) {
        self.ensure_runway();

        let style = rules::code();
        let lines = code_lines(text);
        let height = style.height(lines.len()) + 2.0 * rules::CODE_PADDING;

        if height > self.remaining() {
            self.break_unless_top();
        }
        if height > self.geometry.usable_height() {
            self.overflow(index, None, height);
        }

        let top = self.cursor.y;
        self.commands.push(DrawCommand::FilledRect(FilledRect {
            x: self.geometry.margin - rules::CODE_BLEED,
            y: top,
            width: self.geometry.usable_width() + 2.0 * rules::CODE_BLEED,
            height,
            color: self.options.code_background,
        }));

        let mut baseline = top + rules::CODE_PADDING + style.ascent();
        for line in &lines {
            self.commands.push(DrawCommand::Text(TextCommand::new(
                vec![line.to_string()],
                self.geometry.margin,
                baseline,
                &style.font,
                style.line_height,
            )));
            baseline += style.line_height;
        }

        self.stats.add_code_block(lines.len());
        self.cursor.y += height;
    }

    fn lay_rule(&mut self) {
        self.stats.add_rule();
        self.ensure_runway();

        let y = self.cursor.y;
        self.commands.push(DrawCommand::Line(LineSegment {
            x1: self.geometry.margin,
            y1: y,
            x2: self.geometry.width - self.geometry.margin,
            y2: y,
            color: self.options.rule_color,
            width: rules::RULE_WIDTH,
        }));
        self.cursor.y += rules::RULE_GAP;
    }

    /// Height left above the bottom margin on the current page.
    fn remaining(&self) -> f32 {
        self.geometry.height - self.cursor.y - self.geometry.margin
    }

    fn at_page_top(&self) -> bool {
        self.cursor.y <= self.geometry.margin
    }

    fn ensure_runway(&mut self) {
        if self.remaining() < self.options.min_runway {
            self.break_unless_top();
        }
    }

    /// Break the page unless nothing has been drawn on it yet, so no page
    /// is ever left empty.
    fn break_unless_top(&mut self) {
        if !self.at_page_top() {
            self.page_break();
        }
    }

    fn page_break(&mut self) {
        debug_assert_eq!(self.state, RunState::Laying);
        self.commands.push(DrawCommand::PageBreak);
        self.cursor.page_index += 1;
        self.cursor.y = self.geometry.margin;
        log::debug!("Page break, now on page {}", self.cursor.page_index + 1);
    }

    fn overflow(&mut self, block_index: usize, item_index: Option<usize>, required_height: f32) {
        let warning = LayoutWarning::Overflow {
            block_index,
            item_index,
            page_index: self.cursor.page_index,
            required_height,
            available_height: self.geometry.usable_height(),
        };
        log::warn!("Layout overflow: {}", warning);
        self.warnings.push(warning);
    }
}

/// Verbatim code lines with surrounding blank lines removed. Empty code
/// still occupies one line.
fn code_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].to_vec(),
        _ => vec![""],
    }
}

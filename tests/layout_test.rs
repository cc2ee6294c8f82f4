//! Integration tests for the pagination engine.

use std::cell::RefCell;

use mdpage::{
    BlockNode, DefaultPaginator, DrawCommand, Error, FontFamily, FontSpec, FontWeight,
    HeadingLevel, LayoutResult, LayoutWarning, ListKind, MeasureError, PageGeometry, Paginator,
    TextWrapper,
};

/// Wrapper that breaks lines only at `|`, so tests control line counts.
fn pipe_wrapper(
) -> impl Fn(&str, f32, &FontSpec) -> Result<Vec<String>, MeasureError> + Sync + Clone {
    |text: &str, _max_width: f32, _font: &FontSpec| -> Result<Vec<String>, MeasureError> {
        Ok(text.split('|').map(str::to_string).collect())
    }
}

fn pipe_paginator() -> Paginator<impl TextWrapper + Sync + Clone> {
    Paginator::new(pipe_wrapper())
}

fn a4() -> PageGeometry {
    PageGeometry::new(595.0, 842.0, 40.0)
}

fn long_text(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{}", i % 17))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A mixed document spanning several pages, with no oversized content.
fn long_document() -> Vec<BlockNode> {
    let mut blocks = Vec::new();
    for section in 0..8 {
        blocks.push(BlockNode::heading(
            HeadingLevel::H1,
            format!("Chapter {}", section),
        ));
        blocks.push(BlockNode::paragraph(long_text(120)));
        blocks.push(BlockNode::heading(HeadingLevel::H2, "Details"));
        blocks.push(BlockNode::list(
            ListKind::Ordered,
            (0..12).map(|i| long_text(5 + i * 3)),
        ));
        blocks.push(BlockNode::code(
            (0..10)
                .map(|i| format!("let value_{} = {};", i, i * i))
                .collect::<Vec<_>>()
                .join("\n"),
        ));
        blocks.push(BlockNode::blockquote(long_text(40)));
        blocks.push(BlockNode::heading(HeadingLevel::H3, "Aside"));
        blocks.push(BlockNode::list(ListKind::Unordered, ["one", "two", "three"]));
        blocks.push(BlockNode::Rule);
    }
    blocks
}

fn assert_within_bottom_margin(result: &LayoutResult, geometry: &PageGeometry) {
    let bottom = geometry.content_bottom();
    for (page_index, page) in result.pages().enumerate() {
        for command in page {
            let lowest = command.bottom().unwrap();
            assert!(
                lowest <= bottom + 1e-3,
                "page {} command {:?} reaches {} below {}",
                page_index,
                command,
                lowest,
                bottom
            );
        }
    }
}

#[test]
fn test_empty_sequence_is_one_blank_page() {
    let result = DefaultPaginator::default().run(&[], &a4()).unwrap();
    assert!(result.commands.is_empty());
    assert_eq!(result.page_break_count(), 0);
    assert_eq!(result.page_count, 1);
}

#[test]
fn test_single_heading() {
    let blocks = vec![BlockNode::heading(HeadingLevel::H1, "Hello")];
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    assert_eq!(result.commands.len(), 1);
    match &result.commands[0] {
        DrawCommand::Text(text) => {
            assert_eq!(text.lines, vec!["Hello"]);
            assert_eq!(text.x, 40.0);
            assert_eq!(text.y, 40.0 + 24.0);
            assert_eq!(text.font_size, 24.0);
            assert_eq!(text.font_weight, FontWeight::Bold);
        }
        other => panic!("Expected text, got {:?}", other),
    }
    assert_eq!(result.cursor.y - 40.0, 1.0 * 30.0 + 20.0);
}

#[test]
fn test_ordered_list_of_three() {
    let blocks = vec![BlockNode::list(
        ListKind::Ordered,
        ["First item", "Second item", "Third item"],
    )];
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    assert_eq!(result.page_break_count(), 0);
    let texts: Vec<_> = result.text_commands().collect();
    assert_eq!(texts.len(), 6);

    for (item, pair) in texts.chunks(2).enumerate() {
        let (marker, content) = (pair[0], pair[1]);
        assert_eq!(marker.lines, vec![format!("{}.", item + 1)]);
        assert_eq!(marker.x, 40.0);
        assert_eq!(content.x, 55.0);
        assert_eq!(marker.y, content.y);
        assert_eq!(marker.y, 52.0 + item as f32 * (15.0 + 10.0));
    }
    assert_eq!(result.cursor.y, 40.0 + 3.0 * 25.0 + 10.0);
}

#[test]
fn test_paragraph_without_room_starts_new_page() {
    // 49 code lines leave the cursor at 795, 7pt above the bottom margin
    let code = vec!["x"; 49].join("\n");
    let blocks = vec![BlockNode::code(code), BlockNode::paragraph("Tail")];
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    assert_eq!(result.page_break_count(), 1);
    assert_eq!(result.page_count, 2);

    let n = result.commands.len();
    assert!(result.commands[n - 2].is_page_break());
    match &result.commands[n - 1] {
        DrawCommand::Text(text) => {
            assert_eq!(text.lines, vec!["Tail"]);
            assert_eq!(text.y, 40.0 + 12.0);
        }
        other => panic!("Expected text, got {:?}", other),
    }
    assert_eq!(result.cursor.page_index, 1);
}

#[test]
fn test_code_block_of_five_lines() {
    let blocks = vec![BlockNode::code("a\nb\nc\nd\ne")];
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    assert_eq!(result.commands.len(), 6);
    match &result.commands[0] {
        DrawCommand::FilledRect(rect) => {
            assert_eq!(rect.height, 5.0 * 15.0 + 20.0);
            assert_eq!(rect.x, 35.0);
            assert_eq!(rect.width, 525.0);
        }
        other => panic!("Expected rect, got {:?}", other),
    }

    let texts: Vec<_> = result.text_commands().collect();
    assert_eq!(texts.len(), 5);
    for pair in texts.windows(2) {
        assert_eq!(pair[1].y - pair[0].y, 15.0);
    }
    assert!(texts
        .iter()
        .all(|t| t.font_family == FontFamily::Courier && t.font_size == 11.0));
}

#[test]
fn test_page_breaks_match_page_count() {
    let geometry = a4();
    let result = DefaultPaginator::default()
        .run(&long_document(), &geometry)
        .unwrap();

    assert!(result.page_count > 3);
    assert_eq!(result.page_break_count() as u32, result.page_count - 1);
    assert_eq!(result.pages().count() as u32, result.page_count);
    assert_eq!(result.stats.page_count, result.page_count);
}

#[test]
fn test_layout_is_deterministic() {
    let blocks = long_document();
    let paginator = DefaultPaginator::default();
    let first = paginator.run(&blocks, &a4()).unwrap();
    let second = paginator.run(&blocks, &a4()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_nothing_below_bottom_margin() {
    let geometry = a4();
    let result = DefaultPaginator::default()
        .run(&long_document(), &geometry)
        .unwrap();
    assert!(!result.has_warnings());
    assert_within_bottom_margin(&result, &geometry);

    let letter = PageGeometry::letter().with_margin(72.0);
    let result = DefaultPaginator::default()
        .run(&long_document(), &letter)
        .unwrap();
    assert!(!result.has_warnings());
    assert_within_bottom_margin(&result, &letter);
}

#[test]
fn test_long_paragraph_flows_across_pages() {
    let geometry = a4();
    let blocks = vec![BlockNode::paragraph(long_text(3000))];
    let result = DefaultPaginator::default().run(&blocks, &geometry).unwrap();

    assert!(result.page_count >= 3);
    assert!(!result.has_warnings());
    assert_within_bottom_margin(&result, &geometry);

    let drawn: usize = result.text_commands().map(|t| t.lines.len()).sum();
    assert_eq!(drawn as u32, result.stats.text_line_count);
    for page in result.pages() {
        assert_eq!(page.len(), 1);
    }
}

#[test]
fn test_paragraph_that_fits_a_page_is_not_split() {
    // 35 rules leave 62pt; the 150pt paragraph moves to the next page
    let mut blocks = vec![BlockNode::Rule; 35];
    blocks.push(BlockNode::paragraph(vec!["line"; 10].join("|")));
    let result = pipe_paginator().run(&blocks, &a4()).unwrap();

    assert_eq!(result.page_break_count(), 1);
    let text = result.text_commands().next().unwrap();
    assert_eq!(text.lines.len(), 10);
    assert_eq!(text.y, 52.0);
}

#[test]
fn test_list_item_is_not_split_across_pages() {
    // 35 rules put the cursor at 740: 62pt left, enough runway for the
    // list but not for a 5-line item
    let mut blocks = vec![BlockNode::Rule; 35];
    blocks.push(BlockNode::UnorderedList {
        items: vec!["a|b|c|d|e".to_string(), "f".to_string()],
    });
    let result = pipe_paginator().run(&blocks, &a4()).unwrap();

    assert_eq!(result.page_break_count(), 1);
    let pages: Vec<_> = result.pages().collect();
    assert_eq!(pages[0].len(), 35);
    assert!(pages[0]
        .iter()
        .all(|c| matches!(c, DrawCommand::Line(_))));

    let texts: Vec<_> = pages[1].iter().filter_map(DrawCommand::as_text).collect();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[1].lines.len(), 5);
    assert_eq!(texts[0].y, 52.0);
}

#[test]
fn test_long_list_checks_each_item() {
    let items: Vec<String> = (0..80).map(|i| format!("item {}", i)).collect();
    let blocks = vec![BlockNode::list(ListKind::Unordered, items)];
    let geometry = a4();
    let result = DefaultPaginator::default().run(&blocks, &geometry).unwrap();

    // 25pt per item, 762pt per page
    assert_eq!(result.page_count, 3);
    assert_eq!(result.stats.list_item_count, 80);
    assert_within_bottom_margin(&result, &geometry);
}

#[test]
fn test_oversized_list_item_overflows_with_warning() {
    let huge = vec!["x"; 60].join("|");
    let blocks = vec![
        BlockNode::paragraph("intro"),
        BlockNode::OrderedList {
            items: vec!["short".to_string(), huge],
        },
    ];
    let result = pipe_paginator().run(&blocks, &a4()).unwrap();

    assert_eq!(result.warnings.len(), 1);
    match &result.warnings[0] {
        LayoutWarning::Overflow {
            block_index,
            item_index,
            page_index,
            required_height,
            available_height,
        } => {
            assert_eq!(*block_index, 1);
            assert_eq!(*item_index, Some(1));
            assert_eq!(*page_index, 1);
            assert_eq!(*required_height, 900.0);
            assert_eq!(*available_height, 762.0);
        }
        other => panic!("Expected overflow, got {:?}", other),
    }
    // The oversized item starts on a fresh page rather than mid-page
    assert_eq!(result.page_break_count(), 1);
}

#[test]
fn test_oversized_code_block_overflows_with_warning() {
    let code = (0..60)
        .map(|i| format!("line {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let blocks = vec![BlockNode::code(code)];
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    assert_eq!(result.page_break_count(), 0);
    assert!(matches!(
        result.warnings.as_slice(),
        [LayoutWarning::Overflow {
            block_index: 0,
            item_index: None,
            ..
        }]
    ));
    assert_eq!(result.text_commands().count(), 60);
}

#[test]
fn test_code_block_moves_to_fresh_page() {
    let mut blocks = vec![BlockNode::Rule; 30];
    blocks.push(BlockNode::code("a\nb\nc\nd\ne\nf"));
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    // 30 rules put the cursor at 640; the 110pt block fits in 162pt
    assert_eq!(result.page_break_count(), 0);

    let mut blocks = vec![BlockNode::Rule; 34];
    blocks.push(BlockNode::code("a\nb\nc\nd\ne\nf"));
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    // 34 rules put the cursor at 720; 82pt left is not enough for 110pt
    assert_eq!(result.page_break_count(), 1);
    let last_page = result.pages().last().unwrap();
    match &last_page[0] {
        DrawCommand::FilledRect(rect) => assert_eq!(rect.y, 40.0),
        other => panic!("Expected rect, got {:?}", other),
    }
}

#[test]
fn test_measurement_failure_aborts_run() {
    let failing = |text: &str, _max: f32, _font: &FontSpec| -> Result<Vec<String>, MeasureError> {
        if text.contains("boom") {
            Err(MeasureError::new("glyph table missing"))
        } else {
            Ok(vec![text.to_string()])
        }
    };
    let blocks = vec![
        BlockNode::paragraph("fine"),
        BlockNode::paragraph("boom"),
        BlockNode::paragraph("never reached"),
    ];
    let err = Paginator::new(failing).run(&blocks, &a4()).unwrap_err();
    match err {
        Error::Measurement(cause) => assert_eq!(cause.message(), "glyph table missing"),
        other => panic!("Expected measurement error, got {:?}", other),
    }
}

#[test]
fn test_invalid_geometry_is_rejected() {
    let blocks = vec![BlockNode::paragraph("text")];
    for geometry in [
        PageGeometry::new(80.0, 842.0, 40.0),
        PageGeometry::new(595.0, 80.0, 40.0),
        PageGeometry::new(0.0, 0.0, 0.0),
    ] {
        let err = DefaultPaginator::default()
            .run(&blocks, &geometry)
            .unwrap_err();
        assert!(matches!(err, Error::Geometry { .. }));
    }
}

#[test]
fn test_batch_matches_individual_runs() {
    let documents = vec![
        long_document(),
        vec![BlockNode::paragraph("short")],
        Vec::new(),
    ];
    let parallel = DefaultPaginator::default().run_batch(&documents, &a4());
    let sequential = DefaultPaginator::default()
        .sequential()
        .run_batch(&documents, &a4());

    assert_eq!(parallel.len(), 3);
    for (left, right) in parallel.into_iter().zip(sequential) {
        assert_eq!(left.unwrap(), right.unwrap());
    }
}

#[test]
fn test_stats_count_blocks() {
    let result = DefaultPaginator::default()
        .run(&long_document(), &a4())
        .unwrap();
    let stats = &result.stats;
    assert_eq!(stats.heading_count, 24);
    assert_eq!(stats.paragraph_count, 8);
    assert_eq!(stats.list_count, 16);
    assert_eq!(stats.list_item_count, 8 * 15);
    assert_eq!(stats.code_block_count, 8);
    assert_eq!(stats.code_line_count, 80);
    assert_eq!(stats.blockquote_count, 8);
    assert_eq!(stats.rule_count, 8);
}

#[test]
fn test_long_blockquote_draws_rule_per_page() {
    let text = vec!["quoted"; 120].join("|");
    let blocks = vec![BlockNode::blockquote(text)];
    let geometry = a4();
    let result = pipe_paginator().run(&blocks, &geometry).unwrap();

    assert!(!result.has_warnings());
    assert_eq!(result.page_count, 3);
    assert_within_bottom_margin(&result, &geometry);

    let mut drawn = Vec::new();
    for page in result.pages() {
        match page {
            [DrawCommand::Line(rule), DrawCommand::Text(text)] => {
                assert_eq!((rule.x1, rule.x2), (30.0, 30.0));
                assert_eq!(rule.y1, text.y - 12.0);
                assert_eq!(rule.y2, rule.y1 + text.lines.len() as f32 * 15.0);
                assert_eq!(text.x, 50.0);
                drawn.push((rule.y1, rule.y2, text.lines.len()));
            }
            other => panic!("Expected rule and text, got {:?}", other),
        }
    }
    assert_eq!(
        drawn,
        vec![(40.0, 790.0, 50), (40.0, 790.0, 50), (40.0, 340.0, 20)]
    );
}

#[test]
fn test_wrap_widths_per_block_kind() {
    let widths = RefCell::new(Vec::new());
    let recorder = |text: &str, max_width: f32, _font: &FontSpec| -> Result<Vec<String>, MeasureError> {
        widths.borrow_mut().push(max_width);
        Ok(vec![text.to_string()])
    };
    let blocks = vec![
        BlockNode::paragraph("body"),
        BlockNode::list(ListKind::Unordered, ["item"]),
        BlockNode::blockquote("quote"),
        BlockNode::heading(HeadingLevel::H2, "title"),
    ];
    Paginator::new(recorder).run(&blocks, &a4()).unwrap();

    // Lists and quotes lose 20pt of the 515pt column
    assert_eq!(*widths.borrow(), vec![515.0, 495.0, 495.0, 515.0]);
}

#[test]
fn test_empty_trailing_blocks_add_no_page() {
    // 49 code lines leave 7pt, below the runway
    let code = vec!["x"; 49].join("\n");
    let blocks = vec![
        BlockNode::code(code),
        BlockNode::heading(HeadingLevel::H1, ""),
        BlockNode::paragraph("   "),
        BlockNode::UnorderedList { items: Vec::new() },
    ];
    let result = DefaultPaginator::default().run(&blocks, &a4()).unwrap();

    assert_eq!(result.page_count, 1);
    assert_eq!(result.page_break_count(), 0);
    assert_eq!(result.text_commands().count(), 49);
    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.stats.list_count, 1);
}

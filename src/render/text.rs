//! Human-readable listing of draw commands.

use std::fmt::Write;

use crate::layout::LayoutResult;
use crate::measure::{FontFamily, FontSpec, FontStyle, FontWeight};
use crate::model::DrawCommand;

/// Render a layout as one line per command, grouped by page.
///
/// ```text
/// page 1
///   text (40.0, 64.0) helvetica bold 24pt: "Hello"
///   rect (35.0, 90.0) 525.0x35.0 #f5f5f5
/// ```
pub fn to_text(result: &LayoutResult) -> String {
    let mut output = String::new();

    for (index, page) in result.pages().enumerate() {
        let _ = writeln!(output, "page {}", index + 1);
        for command in page {
            let _ = match command {
                DrawCommand::Text(text) => writeln!(
                    output,
                    "  text ({:.1}, {:.1}) {}: {}",
                    text.x,
                    text.y,
                    describe_font(&text.font()),
                    text.lines
                        .iter()
                        .map(|line| format!("{:?}", line))
                        .collect::<Vec<_>>()
                        .join(" / ")
                ),
                DrawCommand::FilledRect(rect) => writeln!(
                    output,
                    "  rect ({:.1}, {:.1}) {:.1}x{:.1} {}",
                    rect.x, rect.y, rect.width, rect.height, rect.color
                ),
                DrawCommand::Line(line) => writeln!(
                    output,
                    "  line ({:.1}, {:.1}) -> ({:.1}, {:.1}) {} {}pt",
                    line.x1, line.y1, line.x2, line.y2, line.color, line.width
                ),
                DrawCommand::PageBreak => Ok(()),
            };
        }
    }

    for warning in &result.warnings {
        let _ = writeln!(output, "warning: {}", warning);
    }

    output
}

fn describe_font(font: &FontSpec) -> String {
    let mut parts = vec![match font.family {
        FontFamily::Helvetica => "helvetica",
        FontFamily::Courier => "courier",
    }];
    if font.weight == FontWeight::Bold {
        parts.push("bold");
    }
    if font.style == FontStyle::Italic {
        parts.push("italic");
    }
    format!("{} {}pt", parts.join(" "), font.size)
}

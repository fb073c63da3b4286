//! Monospace grid measurement.

use std::ops::Range;
use std::sync::Arc;

use kurbo::{Point, Rect};
use marquee_traits::{BoundaryKind, TextDirection, TextLayout};

use crate::boundaries::{next_word_end, prev_word_start, word_segment_at};
use crate::direction::first_strong_direction;

/// A [`TextLayout`] over a fixed character grid.
///
/// Every character advances by the same amount and visual lines are the
/// `\n`-separated segments of the text, so any offset maps to an exact
/// point and back. Right-to-left text keeps its logical byte order and is
/// measured from the right edge of the bounds.
#[derive(Clone)]
pub struct PlainTextLayout {
    text: Arc<str>,
    origin: Point,
    advance: f64,
    line_height: f64,
    width: f64,
    direction: TextDirection,
    /// Byte span of each visual line, newline separators excluded.
    lines: Vec<Range<usize>>,
    ready: bool,
}

const DEFAULT_ADVANCE: f64 = 8.0;
const DEFAULT_LINE_HEIGHT: f64 = 16.0;

impl PlainTextLayout {
    pub fn new(text: impl Into<Arc<str>>, origin: Point) -> Self {
        let text = text.into();
        let lines = split_lines(&text);
        let direction = first_strong_direction(&text);
        let widest = lines
            .iter()
            .map(|line| text[line.clone()].chars().count())
            .max()
            .unwrap_or(0);
        Self {
            width: widest as f64 * DEFAULT_ADVANCE,
            text,
            origin,
            advance: DEFAULT_ADVANCE,
            line_height: DEFAULT_LINE_HEIGHT,
            direction,
            lines,
            ready: true,
        }
    }

    /// Override the per-character advance and line height.
    pub fn with_metrics(mut self, advance: f64, line_height: f64) -> Self {
        let widest = self
            .lines
            .iter()
            .map(|line| self.text[line.clone()].chars().count())
            .max()
            .unwrap_or(0);
        self.advance = advance;
        self.line_height = line_height;
        self.width = widest as f64 * advance;
        self
    }

    /// Mark the layout as not yet measured. Queries answer `None` until
    /// [`mark_ready`](Self::mark_ready) flips it back.
    pub fn pending(mut self) -> Self {
        self.ready = false;
        self
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    fn line_index_of(&self, offset: usize) -> usize {
        self.lines
            .iter()
            .position(|line| offset <= line.end)
            .unwrap_or(self.lines.len() - 1)
    }

    /// Caret column (in characters) of `offset` within its line.
    fn column_of(&self, offset: usize, line: &Range<usize>) -> usize {
        self.text[line.start..offset.min(line.end).max(line.start)]
            .chars()
            .count()
    }

    /// Byte offset of caret column `col` within `line`.
    fn offset_at_column(&self, col: usize, line: &Range<usize>) -> usize {
        self.text[line.clone()]
            .char_indices()
            .nth(col)
            .map(|(i, _)| line.start + i)
            .unwrap_or(line.end)
    }

    fn caret_x(&self, col: usize) -> f64 {
        match self.direction {
            TextDirection::Ltr => self.origin.x + col as f64 * self.advance,
            TextDirection::Rtl => self.origin.x + self.width - col as f64 * self.advance,
        }
    }
}

fn split_lines(text: &str) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            lines.push(start..i);
            start = i + 1;
        }
    }
    lines.push(start..text.len());
    lines
}

impl TextLayout for PlainTextLayout {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.lines.len() as f64 * self.line_height,
        )
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn base_direction(&self) -> TextDirection {
        self.direction
    }

    fn offset_for_point(&self, point: Point) -> Option<usize> {
        if !self.ready {
            return None;
        }
        let row = ((point.y - self.origin.y) / self.line_height).floor() as isize;
        let row = row.clamp(0, self.lines.len() as isize - 1) as usize;
        let line = &self.lines[row];
        let chars = self.text[line.clone()].chars().count();
        let along = match self.direction {
            TextDirection::Ltr => point.x - self.origin.x,
            TextDirection::Rtl => self.origin.x + self.width - point.x,
        };
        let col = (along / self.advance).round().clamp(0.0, chars as f64) as usize;
        Some(self.offset_at_column(col, line))
    }

    fn boundary_at(&self, offset: usize, kind: BoundaryKind) -> Option<Range<usize>> {
        if !self.ready {
            return None;
        }
        match kind {
            BoundaryKind::Character => {
                if self.text.is_empty() {
                    return Some(0..0);
                }
                let start = if offset >= self.text.len() {
                    prev_char_boundary(&self.text, self.text.len())
                } else {
                    snap_to_char_start(&self.text, offset)
                };
                let end = start + self.text[start..].chars().next().map_or(0, char::len_utf8);
                Some(start..end)
            }
            BoundaryKind::Word => Some(word_segment_at(&self.text, offset)),
            BoundaryKind::Line => Some(self.lines[self.line_index_of(offset)].clone()),
        }
    }

    fn next_boundary(&self, offset: usize, kind: BoundaryKind) -> Option<usize> {
        if !self.ready || offset >= self.text.len() {
            return None;
        }
        match kind {
            BoundaryKind::Character => {
                let start = snap_to_char_start(&self.text, offset);
                Some(start + self.text[start..].chars().next().map_or(0, char::len_utf8))
            }
            BoundaryKind::Word => next_word_end(&self.text, offset),
            BoundaryKind::Line => {
                let row = self.line_index_of(offset);
                let line = &self.lines[row];
                if line.end > offset {
                    Some(line.end)
                } else {
                    // Caret sits at a line end; step to the end of the next
                    // line (crossing the separator).
                    self.lines.get(row + 1).map(|next| next.end)
                }
            }
        }
    }

    fn prev_boundary(&self, offset: usize, kind: BoundaryKind) -> Option<usize> {
        if !self.ready || offset == 0 {
            return None;
        }
        match kind {
            BoundaryKind::Character => Some(prev_char_boundary(&self.text, offset)),
            BoundaryKind::Word => prev_word_start(&self.text, offset),
            BoundaryKind::Line => {
                let row = self.line_index_of(offset);
                let line = &self.lines[row];
                if line.start < offset {
                    Some(line.start)
                } else if row > 0 {
                    Some(self.lines[row - 1].start)
                } else {
                    None
                }
            }
        }
    }

    fn line_bounds_at(&self, offset: usize) -> Option<Rect> {
        if !self.ready {
            return None;
        }
        let row = self.line_index_of(offset);
        let line = &self.lines[row];
        let chars = self.text[line.clone()].chars().count();
        let line_width = chars as f64 * self.advance;
        let (x0, x1) = match self.direction {
            TextDirection::Ltr => (self.origin.x, self.origin.x + line_width),
            TextDirection::Rtl => (self.origin.x + self.width - line_width, self.origin.x + self.width),
        };
        let y0 = self.origin.y + row as f64 * self.line_height;
        Some(Rect::new(x0, y0, x1, y0 + self.line_height))
    }

    fn visual_position_for(&self, offset: usize) -> Option<Point> {
        if !self.ready {
            return None;
        }
        let row = self.line_index_of(offset);
        let line = &self.lines[row];
        let col = self.column_of(offset, line);
        let y = self.origin.y + (row + 1) as f64 * self.line_height;
        Some(Point::new(self.caret_x(col), y))
    }

    fn line_index_at(&self, offset: usize) -> Option<usize> {
        if !self.ready {
            return None;
        }
        Some(self.line_index_of(offset))
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

fn snap_to_char_start(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn prev_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = snap_to_char_start(text, offset);
    if offset > 0 {
        offset -= 1;
        while offset > 0 && !text.is_char_boundary(offset) {
            offset -= 1;
        }
    }
    offset
}

//! The non-text leaf.

use kurbo::{Point, Rect};
use marquee_traits::{
    DispatchResult, Granularity, HandleSide, SelectedContent, Selectable, SelectionEdge,
    SelectionError, SelectionEvent, SelectionGeometry, SelectionPoint, SelectionRange,
    SelectionStatus,
};

use crate::resolver;

/// An embedded element: occupies space inside the selected span but renders
/// no text.
///
/// It behaves as a single placeholder position so edge clamping and
/// extension treat it like any other unit, contributes bounds-derived
/// geometry when selected, and is transparent to content aggregation.
pub struct EmbeddedUnit {
    bounds: Rect,
    range: Option<SelectionRange>,
}

const PLACEHOLDER_LEN: usize = 1;

impl EmbeddedUnit {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            range: None,
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn is_selected(&self) -> bool {
        self.range.is_some_and(|range| !range.is_collapsed())
    }

    fn clamp(&self, point: Point) -> usize {
        if point.y < self.bounds.y0 {
            0
        } else if point.y >= self.bounds.y1 {
            PLACEHOLDER_LEN
        } else if point.x < self.bounds.center().x {
            0
        } else {
            PLACEHOLDER_LEN
        }
    }
}

impl Selectable for EmbeddedUnit {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn text_len(&self) -> usize {
        PLACEHOLDER_LEN
    }

    fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    fn layout_ready(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &SelectionEvent) -> Result<DispatchResult, SelectionError> {
        Ok(match event {
            SelectionEvent::SetEdge { edge, point, .. } => {
                let offset = self.clamp(*point);
                let mut range = self.range.unwrap_or(SelectionRange::collapsed(offset));
                match edge {
                    SelectionEdge::Start => range.base = offset,
                    SelectionEdge::End => range.extent = offset,
                }
                self.range = Some(range);
                if self.bounds.contains(*point) {
                    DispatchResult::End
                } else {
                    DispatchResult::Next(event.clone())
                }
            }
            SelectionEvent::SelectBoundary { .. } | SelectionEvent::SelectAll => {
                self.range = Some(SelectionRange::new(0, PLACEHOLDER_LEN));
                DispatchResult::End
            }
            SelectionEvent::Extend {
                granularity,
                direction,
                ..
            } => {
                let forward = direction.is_forward();
                let resume = resolver::resume_range(self.range, forward, PLACEHOLDER_LEN);
                let seam = resolver::seam_offset(forward, PLACEHOLDER_LEN);
                if resume.extent == seam || *granularity == Granularity::Document {
                    self.range = Some(SelectionRange::new(resume.base, seam));
                    DispatchResult::Next(event.clone())
                } else {
                    // One step selects the whole element.
                    self.range = Some(SelectionRange::new(resume.base, seam));
                    DispatchResult::End
                }
            }
            SelectionEvent::ExtendVertically { motion, target_x } => {
                // No lines to travel: pass straight through, fully covered.
                let down = motion.is_downward();
                let resume = resolver::resume_range(self.range, down, PLACEHOLDER_LEN);
                self.range = Some(SelectionRange::new(
                    resume.base,
                    resolver::seam_offset(down, PLACEHOLDER_LEN),
                ));
                DispatchResult::Next(SelectionEvent::ExtendVertically {
                    motion: motion.continuation(),
                    target_x: *target_x,
                })
            }
            SelectionEvent::Clear => {
                self.range = None;
                DispatchResult::End
            }
        })
    }

    fn restore_range(&mut self, range: Option<SelectionRange>) -> Result<(), SelectionError> {
        if let Some(range) = range {
            for offset in [range.base, range.extent] {
                if offset > PLACEHOLDER_LEN {
                    return Err(SelectionError::OffsetOutOfRange {
                        offset,
                        len: PLACEHOLDER_LEN,
                    });
                }
            }
        }
        self.range = range;
        Ok(())
    }

    fn geometry(&self) -> Option<SelectionGeometry> {
        let Some(range) = self.range else {
            return Some(SelectionGeometry::empty());
        };
        if range.is_collapsed() {
            return Some(SelectionGeometry {
                status: SelectionStatus::Collapsed,
                start: None,
                end: None,
                has_content: false,
            });
        }
        let height = self.bounds.height();
        Some(SelectionGeometry {
            status: SelectionStatus::Uncollapsed,
            start: Some(SelectionPoint {
                position: Point::new(self.bounds.x0, self.bounds.y1),
                line_height: height,
                handle: HandleSide::Left,
            }),
            end: Some(SelectionPoint {
                position: Point::new(self.bounds.x1, self.bounds.y1),
                line_height: height,
                handle: HandleSide::Right,
            }),
            has_content: true,
        })
    }

    fn selected_content(&self) -> Option<SelectedContent> {
        None
    }

    fn has_selection_at(&self, point: Point) -> bool {
        self.is_selected() && self.bounds.contains(point)
    }

    fn position_at(&self, offset: usize) -> Option<Point> {
        let x = if offset == 0 {
            self.bounds.x0
        } else {
            self.bounds.x1
        };
        Some(Point::new(x, self.bounds.center().y))
    }
}

//! The text leaf.

use std::sync::Arc;

use kurbo::{Point, Rect};
use marquee_traits::{
    BoundaryKind, Direction, DispatchResult, Granularity, HandleSide, SelectedContent,
    Selectable, SelectionEdge, SelectionError, SelectionEvent, SelectionGeometry,
    SelectionPoint, SelectionRange, SelectionStatus, TextDirection, TextLayout, VerticalMotion,
};

use crate::resolver;

/// Where a global point falls relative to a unit's bounds, in screen order.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Placement {
    Before,
    Inside,
    After,
}

/// A selectable run of text backed by an external layout collaborator.
///
/// The unit owns nothing but its local range; text and measurement stay
/// with the layout. Edge updates are clamped locally: a point before the
/// unit's bounds places the edge at the offset of its leading screen edge,
/// a point past them at the trailing one, so a unit lying between the two
/// global edges adopts its full range without ever seeing its neighbors.
pub struct TextUnit {
    layout: Arc<dyn TextLayout>,
    range: Option<SelectionRange>,
}

impl TextUnit {
    pub fn new(layout: Arc<dyn TextLayout>) -> Self {
        Self {
            layout,
            range: None,
        }
    }

    pub fn layout(&self) -> &dyn TextLayout {
        &*self.layout
    }

    /// Swap in a re-measured layout. The range is clamped to the new text
    /// length; hosts that changed the text itself should clear instead.
    pub fn set_layout(&mut self, layout: Arc<dyn TextLayout>) {
        let len = layout.text_len();
        self.layout = layout;
        if let Some(range) = &mut self.range {
            range.base = range.base.min(len);
            range.extent = range.extent.min(len);
        }
    }

    /// Replace the local range, validating both offsets before any mutation.
    pub fn set_range(&mut self, range: Option<SelectionRange>) -> Result<(), SelectionError> {
        if let Some(range) = range {
            let len = self.layout.text_len();
            for offset in [range.base, range.extent] {
                if offset > len {
                    return Err(SelectionError::OffsetOutOfRange { offset, len });
                }
            }
        }
        self.range = range;
        Ok(())
    }

    fn placement(&self, point: Point) -> Placement {
        let bounds = self.layout.bounds();
        if point.y < bounds.y0 {
            Placement::Before
        } else if point.y >= bounds.y1 {
            Placement::After
        } else if point.x < bounds.x0 {
            Placement::Before
        } else if point.x >= bounds.x1 {
            Placement::After
        } else {
            Placement::Inside
        }
    }

    fn set_edge(
        &mut self,
        edge: SelectionEdge,
        point: Point,
        granularity: Option<Granularity>,
        event: &SelectionEvent,
    ) -> DispatchResult {
        let len = self.layout.text_len();
        let placement = self.placement(point);
        // Clamping is visual: the offset at the unit's leading screen edge
        // is 0 for left-to-right text but `len` for right-to-left.
        let (before_offset, after_offset) = match self.layout.base_direction() {
            TextDirection::Ltr => (0, len),
            TextDirection::Rtl => (len, 0),
        };
        let offset = match placement {
            Placement::Before => before_offset,
            Placement::After => after_offset,
            Placement::Inside => {
                let Some(hit) = self.layout.offset_for_point(point) else {
                    // Layout pending: no information yet, so no mutation.
                    return DispatchResult::End;
                };
                match granularity.and_then(resolver::boundary_kind) {
                    Some(kind) if kind != BoundaryKind::Character => {
                        let other = match (edge, self.range) {
                            (SelectionEdge::Start, Some(range)) => range.extent,
                            (SelectionEdge::End, Some(range)) => range.base,
                            (_, None) => hit,
                        };
                        resolver::snap_edge(&*self.layout, hit, other, edge, kind)
                    }
                    _ => hit,
                }
            }
        };
        let mut range = self.range.unwrap_or(SelectionRange::collapsed(offset));
        match edge {
            SelectionEdge::Start => range.base = offset,
            SelectionEdge::End => range.extent = offset,
        }
        self.range = Some(range);
        match placement {
            Placement::Inside => DispatchResult::End,
            _ => DispatchResult::Next(event.clone()),
        }
    }

    fn select_boundary(&mut self, point: Point, kind: BoundaryKind) -> DispatchResult {
        let Some(hit) = self.layout.offset_for_point(point) else {
            return DispatchResult::End;
        };
        let Some(span) = self.layout.boundary_at(hit, kind) else {
            return DispatchResult::End;
        };
        self.range = Some(SelectionRange::new(span.start, span.end));
        DispatchResult::End
    }

    fn extend(
        &mut self,
        granularity: Granularity,
        direction: Direction,
        event: &SelectionEvent,
    ) -> DispatchResult {
        if !self.layout.is_ready() {
            return DispatchResult::End;
        }
        let len = self.layout.text_len();
        let forward = direction.is_forward();
        let resume = resolver::resume_range(self.range, forward, len);
        if granularity == Granularity::Document {
            // Document travel swallows the whole unit and always continues.
            self.range = Some(SelectionRange::new(
                resume.base,
                resolver::seam_offset(forward, len),
            ));
            return DispatchResult::Next(event.clone());
        }
        match resolver::step(&*self.layout, resume.extent, granularity, direction) {
            Some(target) => {
                self.range = Some(SelectionRange::new(resume.base, target));
                DispatchResult::End
            }
            None => {
                self.range = Some(SelectionRange::new(
                    resume.base,
                    resolver::seam_offset(forward, len),
                ));
                DispatchResult::Next(event.clone())
            }
        }
    }

    fn extend_vertically(
        &mut self,
        motion: VerticalMotion,
        target_x: Option<f64>,
    ) -> DispatchResult {
        if !self.layout.is_ready() {
            return DispatchResult::End;
        }
        let len = self.layout.text_len();
        let down = motion.is_downward();
        let resume = resolver::resume_range(self.range, down, len);
        let Some(x) = target_x.or_else(|| {
            self.layout
                .visual_position_for(resume.extent)
                .map(|point| point.x)
        }) else {
            return DispatchResult::End;
        };
        match resolver::vertical_step(&*self.layout, resume.extent, motion, x) {
            Some(target) => {
                self.range = Some(SelectionRange::new(resume.base, target));
                DispatchResult::End
            }
            None => {
                self.range = Some(SelectionRange::new(
                    resume.base,
                    resolver::seam_offset(down, len),
                ));
                DispatchResult::Next(SelectionEvent::ExtendVertically {
                    motion: motion.continuation(),
                    target_x: Some(x),
                })
            }
        }
    }

    fn point_at(&self, offset: usize, handle: HandleSide) -> Option<SelectionPoint> {
        Some(SelectionPoint {
            position: self.layout.visual_position_for(offset)?,
            line_height: self.layout.line_bounds_at(offset)?.height(),
            handle,
        })
    }
}

impl Selectable for TextUnit {
    fn bounds(&self) -> Rect {
        self.layout.bounds()
    }

    fn text_len(&self) -> usize {
        self.layout.text_len()
    }

    fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    fn layout_ready(&self) -> bool {
        self.layout.is_ready()
    }

    fn handle_event(&mut self, event: &SelectionEvent) -> Result<DispatchResult, SelectionError> {
        Ok(match event {
            SelectionEvent::SetEdge {
                edge,
                point,
                granularity,
            } => self.set_edge(*edge, *point, *granularity, event),
            SelectionEvent::SelectBoundary { point, kind } => self.select_boundary(*point, *kind),
            SelectionEvent::Extend {
                granularity,
                direction,
            } => self.extend(*granularity, *direction, event),
            SelectionEvent::ExtendVertically { motion, target_x } => {
                self.extend_vertically(*motion, *target_x)
            }
            SelectionEvent::SelectAll => {
                self.range = Some(SelectionRange::new(0, self.layout.text_len()));
                DispatchResult::End
            }
            SelectionEvent::Clear => {
                self.range = None;
                DispatchResult::End
            }
        })
    }

    fn restore_range(&mut self, range: Option<SelectionRange>) -> Result<(), SelectionError> {
        self.set_range(range)
    }

    fn geometry(&self) -> Option<SelectionGeometry> {
        let Some(range) = self.range else {
            return Some(SelectionGeometry::empty());
        };
        if !self.layout.is_ready() {
            return None;
        }
        let norm = range.normalized();
        let (start_side, end_side) = match self.layout.base_direction() {
            TextDirection::Ltr => (HandleSide::Left, HandleSide::Right),
            TextDirection::Rtl => (HandleSide::Right, HandleSide::Left),
        };
        let start = self.point_at(norm.start, start_side)?;
        let end = self.point_at(norm.end, end_side)?;
        Some(SelectionGeometry {
            status: if range.is_collapsed() {
                SelectionStatus::Collapsed
            } else {
                SelectionStatus::Uncollapsed
            },
            start: Some(start),
            end: Some(end),
            has_content: !range.is_collapsed(),
        })
    }

    fn selected_content(&self) -> Option<SelectedContent> {
        let range = self.range?;
        if range.is_collapsed() {
            return None;
        }
        let text = self.layout.text();
        let mut norm = range.normalized();
        norm.end = norm.end.min(text.len());
        norm.start = norm.start.min(norm.end);
        Some(SelectedContent::new(text[norm].to_string()))
    }

    fn text_direction(&self) -> TextDirection {
        self.layout.base_direction()
    }

    fn has_selection_at(&self, point: Point) -> bool {
        let Some(range) = self.range else {
            return false;
        };
        if range.is_collapsed() || !self.layout.bounds().contains(point) {
            return false;
        }
        match self.layout.offset_for_point(point) {
            Some(offset) => range.contains(offset),
            None => false,
        }
    }

    fn extent_position(&self) -> Option<Point> {
        self.range
            .and_then(|range| self.layout.visual_position_for(range.extent))
    }

    fn position_at(&self, offset: usize) -> Option<Point> {
        let position = self.layout.visual_position_for(offset)?;
        let line = self.layout.line_bounds_at(offset)?;
        Some(Point::new(position.x, line.y0 + line.height() / 2.0))
    }
}

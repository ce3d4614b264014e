//! Millimeter geometry for the 3x3 card grid.
//!
//! `slot_rect` is the single source of truth for where a card sits on the
//! paper. The screen preview and the print export both go through it, so a
//! card never lands in a different place on paper than it did on screen.

use cardgrid_types::{GRID_COLUMNS, LayoutConfig, Point, Rect, SLOTS_PER_PAGE, Size};

/// Top-left corner of the slot at `position_in_page`, in millimeters.
///
/// Positions outside `0..9` are reduced modulo 9.
pub fn slot_origin(position_in_page: usize, config: &LayoutConfig) -> Point {
    let position = position_in_page % SLOTS_PER_PAGE;
    let column = (position % GRID_COLUMNS) as f32;
    let row = (position / GRID_COLUMNS) as f32;
    Point::new(
        config.margin_left + column * (config.card_width + config.gap),
        config.margin_top + row * (config.card_height + config.gap),
    )
}

/// The full card rectangle of the slot at `position_in_page`.
pub fn slot_rect(position_in_page: usize, config: &LayoutConfig) -> Rect {
    Rect::from_origin_size(slot_origin(position_in_page, config), config.card_size())
}

/// Uniform scale and offset that fit the paper into a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    /// Screen units per millimeter.
    pub scale: f32,
    /// Screen position of the paper's top-left corner.
    pub origin: Point,
    paper: Size,
}

impl ViewportFit {
    /// The paper rectangle in screen space.
    pub fn paper_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.paper.width * self.scale,
            self.paper.height * self.scale,
        )
    }

    pub fn map_point(&self, point: Point) -> Point {
        Point::new(
            self.origin.x + point.x * self.scale,
            self.origin.y + point.y * self.scale,
        )
    }

    /// Maps a millimeter rectangle on the paper into screen space.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        Rect::from_origin_size(
            self.map_point(rect.origin()),
            Size::new(rect.width * self.scale, rect.height * self.scale),
        )
    }
}

/// Fits `paper` inside `viewport`, leaving `padding` screen units on the
/// constraining axis, and centers it.
///
/// Returns `None` when either size has a non-positive side.
pub fn fit_to_viewport(paper: Size, viewport: Size, padding: f32) -> Option<ViewportFit> {
    let paper_ratio = paper.aspect_ratio()?;
    let view_ratio = viewport.aspect_ratio()?;

    let scale = if view_ratio > paper_ratio {
        (viewport.height - padding) / paper.height
    } else {
        (viewport.width - padding) / paper.width
    };
    let scale = scale.max(0.0);

    let origin = Point::new(
        (viewport.width - paper.width * scale) / 2.0,
        (viewport.height - paper.height * scale) / 2.0,
    );

    Some(ViewportFit { scale, origin, paper })
}

/// Everything a preview needs to draw one page: the paper and its nine
/// cells, already mapped to screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub fit: ViewportFit,
    pub paper: Rect,
    pub slots: [Rect; SLOTS_PER_PAGE],
}

impl PreviewLayout {
    pub fn compute(config: &LayoutConfig, viewport: Size, padding: f32) -> Option<Self> {
        let fit = fit_to_viewport(config.paper_size(), viewport, padding)?;
        let slots = std::array::from_fn(|position| fit.map_rect(slot_rect(position, config)));
        Some(Self {
            fit,
            paper: fit.paper_rect(),
            slots,
        })
    }

    /// Position-in-page of the cell under a screen point, if any.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.slots.iter().position(|rect| rect.contains(point))
    }
}

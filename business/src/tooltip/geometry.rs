use std::f32::consts::SQRT_2;

/// Gap between the trigger edge and the tooltip.
pub const TOOLTIP_GAP: f32 = 10.0;

/// Side length of the arrow square before it is rotated by 45°.
pub const ARROW_SIZE: f32 = 8.0;

/// Where the tooltip sits relative to its trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Placement {
    /// The tooltip edge that faces the trigger.
    pub fn facing_edge(self) -> Edge {
        match self {
            Self::Top => Edge::Bottom,
            Self::Bottom => Edge::Top,
            Self::Left => Edge::Right,
            Self::Right => Edge::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Document scroll, added to viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

/// Top-left corner of the floating tooltip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TooltipPosition {
    pub top: f32,
    pub left: f32,
}

/// Places the tooltip [`TOOLTIP_GAP`] away from the trigger along the
/// placement axis, centered on the other axis.
pub fn compute_position(
    placement: Placement,
    trigger: Rect,
    tooltip: Size,
    scroll: ScrollOffset,
) -> TooltipPosition {
    let centered_left = trigger.left + (trigger.width - tooltip.width) / 2.0;
    let centered_top = trigger.top + (trigger.height - tooltip.height) / 2.0;

    let (top, left) = match placement {
        Placement::Top => (trigger.top - tooltip.height - TOOLTIP_GAP, centered_left),
        Placement::Bottom => (trigger.bottom() + TOOLTIP_GAP, centered_left),
        Placement::Left => (centered_top, trigger.left - tooltip.width - TOOLTIP_GAP),
        Placement::Right => (centered_top, trigger.right() + TOOLTIP_GAP),
    };

    TooltipPosition {
        top: top + scroll.y,
        left: left + scroll.x,
    }
}

/// Rotated square drawn on the tooltip edge facing the trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub edge: Edge,
    /// Center of the square, on the midpoint of `edge`.
    pub center_x: f32,
    pub center_y: f32,
    pub size: f32,
}

impl Arrow {
    /// Corners of the rotated square, clockwise from the top.
    pub fn corners(&self) -> [(f32, f32); 4] {
        let half = self.size * SQRT_2 / 2.0;
        let (x, y) = (self.center_x, self.center_y);
        [(x, y - half), (x + half, y), (x, y + half), (x - half, y)]
    }
}

pub fn arrow_geometry(placement: Placement, position: TooltipPosition, tooltip: Size) -> Arrow {
    let edge = placement.facing_edge();
    let mid_x = position.left + tooltip.width / 2.0;
    let mid_y = position.top + tooltip.height / 2.0;

    let (center_x, center_y) = match edge {
        Edge::Top => (mid_x, position.top),
        Edge::Bottom => (mid_x, position.top + tooltip.height),
        Edge::Left => (position.left, mid_y),
        Edge::Right => (position.left + tooltip.width, mid_y),
    };

    Arrow {
        edge,
        center_x,
        center_y,
        size: ARROW_SIZE,
    }
}

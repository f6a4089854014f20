//! Hover tooltip logic: the delayed show state machine, placement geometry and
//! the per-frame registry that ties machine lifetimes to their widgets.

mod geometry;
mod machine;
mod registry;

pub use geometry::{
    ARROW_SIZE, Arrow, Edge, Placement, Rect, ScrollOffset, Size, TOOLTIP_GAP, TooltipPosition,
    arrow_geometry, compute_position,
};
pub use machine::{DEFAULT_DELAY, Measure, TooltipConfig, TooltipMachine, TooltipPhase};
pub use registry::{TooltipEntry, TooltipRegistry};

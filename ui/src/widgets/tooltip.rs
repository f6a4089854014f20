//! Hover tooltip rendered as a floating, non-interactive egui area.
//!
//! Timing and placement come from [`qrgen_business::tooltip::TooltipMachine`];
//! this module measures the trigger and the floating label and paints them.

use std::hash::Hash;
use std::time::Duration;

use egui::{
    Align, Area, Frame, Id, InnerResponse, Label, Margin, Order, Shape, Stroke, Ui, WidgetText,
    pos2,
};
use qrgen_business::ViewportEvents;
use qrgen_business::tooltip::{
    Measure, Placement, Rect, Size, TooltipConfig, TooltipPosition, TooltipRegistry,
    arrow_geometry,
};
use qrgen_states::StateCtx;

/// Widest the floating label may grow before wrapping.
pub const MAX_WIDTH: f32 = 200.0;

const FADE_IN_SECS: f32 = 0.15;

/// Measurements taken from the current frame's layout.
struct FrameMeasure {
    trigger: egui::Rect,
    tooltip: Option<Size>,
}

impl Measure for FrameMeasure {
    fn trigger_rect(&self) -> Option<Rect> {
        let rect = self.trigger;
        rect.is_finite()
            .then(|| Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn tooltip_size(&self) -> Option<Size> {
        self.tooltip
    }
}

pub struct Tooltip {
    id_salt: Id,
    label: WidgetText,
    config: TooltipConfig,
}

impl Tooltip {
    pub fn new(id_salt: impl Hash, label: impl Into<WidgetText>) -> Self {
        Self {
            id_salt: Id::new(id_salt),
            label: label.into(),
            config: TooltipConfig::default(),
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.config = self.config.placement(placement);
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config = self.config.delay_ms(delay_ms);
        self
    }

    pub fn with_arrow(mut self, with_arrow: bool) -> Self {
        self.config = self.config.with_arrow(with_arrow);
        self
    }

    /// Adds the trigger and, once hovered past the delay, the floating label.
    ///
    /// Requires [`TooltipRegistry`] and [`ViewportEvents`] in `ctx`.
    pub fn show<R>(
        self,
        ui: &mut Ui,
        ctx: &mut StateCtx,
        add_trigger: impl FnOnce(&mut Ui) -> R,
    ) -> InnerResponse<R> {
        let id = ui.make_persistent_id(self.id_salt);
        let trigger = ui.scope(add_trigger);
        let trigger_rect = trigger.response.rect;

        let hovered = ui.rect_contains_pointer(trigger_rect);
        let now = Duration::from_secs_f64(ui.input(|i| i.time));
        let bus = ctx.state::<ViewportEvents>().bus().clone();

        let entry = ctx
            .state_mut::<TooltipRegistry>()
            .entry(id.value(), self.config);
        entry.machine.set_hovered(hovered, now);

        let measure = FrameMeasure {
            trigger: trigger_rect,
            tooltip: entry.measured_size,
        };
        if entry.machine.poll(now, &bus, &measure) {
            ui.ctx().request_repaint();
        }
        if let Some(remaining) = entry.machine.remaining(now) {
            ui.ctx().request_repaint_after(remaining);
        }

        let visible = entry.machine.is_visible();
        let opacity = ui
            .ctx()
            .animate_bool_with_time(id.with("fade"), visible, FADE_IN_SECS);

        if visible {
            let size = paint_floating(
                ui,
                id,
                &self.label,
                self.config,
                entry.machine.position(),
                trigger_rect,
                opacity,
            );

            if entry.measured_size != Some(size) {
                entry.measured_size = Some(size);
                let measure = FrameMeasure {
                    trigger: trigger_rect,
                    tooltip: Some(size),
                };
                if entry.machine.update_position(&measure) {
                    ui.ctx().request_repaint();
                }
            }
        }

        trigger
    }
}

/// Draws the label at `position` and returns its measured size.
///
/// Without a position yet the label is laid out fully transparent, which
/// only serves to measure it.
fn paint_floating(
    ui: &Ui,
    id: Id,
    label: &WidgetText,
    config: TooltipConfig,
    position: Option<TooltipPosition>,
    trigger_rect: egui::Rect,
    opacity: f32,
) -> Size {
    let (pos, opacity) = match position {
        Some(position) => (pos2(position.left, position.top), opacity),
        None => (trigger_rect.left_top(), 0.0),
    };

    let area = Area::new(id.with("floating"))
        .order(Order::Tooltip)
        .fixed_pos(pos)
        .interactable(false)
        .constrain(false)
        .show(ui.ctx(), |ui| {
            ui.multiply_opacity(opacity);
            Frame::popup(ui.style())
                .inner_margin(Margin::symmetric(8, 4))
                .corner_radius(4)
                .show(ui, |ui| {
                    ui.set_max_width(MAX_WIDTH);
                    ui.add(Label::new(label.clone()).wrap().halign(Align::Center));
                });
        });

    let rect = area.response.rect;
    let size = Size::new(rect.width(), rect.height());

    if config.with_arrow
        && let Some(position) = position
    {
        let arrow = arrow_geometry(config.placement, position, size);
        let points = arrow
            .corners()
            .into_iter()
            .map(|(x, y)| pos2(x, y))
            .collect();
        let fill = ui.visuals().window_fill.gamma_multiply(opacity);
        ui.ctx()
            .layer_painter(area.response.layer_id)
            .add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }

    size
}

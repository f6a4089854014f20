use std::any::TypeId;
use std::time::Duration;

use log::debug;
use qrgen_states::{Delay, EventBus, Subscription, TaskId};

use super::geometry::{Placement, Rect, ScrollOffset, Size, TooltipPosition, compute_position};
use crate::viewport::ViewportEvent;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipConfig {
    pub placement: Placement,
    pub delay: Duration,
    pub with_arrow: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            delay: DEFAULT_DELAY,
            with_arrow: false,
        }
    }
}

impl TooltipConfig {
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_arrow(mut self, with_arrow: bool) -> Self {
        self.with_arrow = with_arrow;
        self
    }
}

/// Source of the measurements a position update needs.
///
/// Either side may be unmeasurable (not laid out yet); the update is then
/// skipped for that cycle.
pub trait Measure {
    fn trigger_rect(&self) -> Option<Rect>;

    fn tooltip_size(&self) -> Option<Size>;

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPhase {
    Hidden,
    Pending,
    Visible,
}

#[derive(Debug)]
enum Phase {
    Hidden,
    Pending(Delay),
    Visible {
        position: Option<TooltipPosition>,
        // Dropped on leaving this phase, which detaches the listener.
        listener: Subscription<ViewportEvent>,
        listener_events: usize,
    },
}

/// Hover state machine for one tooltip.
///
/// `hidden → pending` on pointer enter, `pending → visible` once the delay
/// elapses, and back to `hidden` immediately on pointer leave.
#[derive(Debug)]
pub struct TooltipMachine {
    config: TooltipConfig,
    phase: Phase,
    hovered: bool,
    generation: u64,
    position_updates: u64,
}

impl TooltipMachine {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            phase: Phase::Hidden,
            hovered: false,
            generation: 0,
            position_updates: 0,
        }
    }

    pub fn config(&self) -> TooltipConfig {
        self.config
    }

    /// Takes effect on the next hover session or position update.
    pub fn set_config(&mut self, config: TooltipConfig) {
        self.config = config;
    }

    pub fn phase(&self) -> TooltipPhase {
        match self.phase {
            Phase::Hidden => TooltipPhase::Hidden,
            Phase::Pending(_) => TooltipPhase::Pending,
            Phase::Visible { .. } => TooltipPhase::Visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, Phase::Visible { .. })
    }

    pub fn position(&self) -> Option<TooltipPosition> {
        match self.phase {
            Phase::Visible { position, .. } => position,
            _ => None,
        }
    }

    /// Number of times the position has been recomputed.
    pub fn position_updates(&self) -> u64 {
        self.position_updates
    }

    /// The running show-delay, if pending.
    pub fn pending_delay(&self) -> Option<&Delay> {
        match &self.phase {
            Phase::Pending(delay) => Some(delay),
            _ => None,
        }
    }

    /// Time until the pending delay elapses.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending_delay().map(|delay| delay.remaining(now))
    }

    pub fn pointer_enter(&mut self, now: Duration) {
        self.hovered = true;
        if matches!(self.phase, Phase::Hidden) {
            self.generation += 1;
            let delay = Delay::schedule(
                TaskId::new(TypeId::of::<Self>(), self.generation),
                now,
                self.config.delay,
            );
            debug!(
                "Tooltip pending (session {}), shows in {:?}",
                delay.handle().id().generation(),
                self.config.delay
            );
            self.phase = Phase::Pending(delay);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        if let Phase::Pending(delay) = &self.phase {
            delay.cancel();
        }
        if !matches!(self.phase, Phase::Hidden) {
            debug!("Tooltip hidden");
        }
        self.phase = Phase::Hidden;
    }

    /// Feeds the current hover state, firing enter/leave on changes.
    pub fn set_hovered(&mut self, hovered: bool, now: Duration) {
        match (self.hovered, hovered) {
            (false, true) => self.pointer_enter(now),
            (true, false) => self.pointer_leave(),
            _ => {}
        }
    }

    /// Advances the machine to `now`.
    ///
    /// Makes a pending tooltip visible once its delay elapsed, and recomputes
    /// the position when the tooltip just became visible, has not been
    /// measured yet, or received viewport events. Returns `true` when the
    /// phase or position changed.
    pub fn poll(
        &mut self,
        now: Duration,
        viewport: &EventBus<ViewportEvent>,
        measure: &impl Measure,
    ) -> bool {
        let mut changed = false;

        if let Phase::Pending(delay) = &self.phase
            && delay.is_due(now)
        {
            debug!("Tooltip visible");
            self.phase = Phase::Visible {
                position: None,
                listener: viewport.subscribe(),
                listener_events: 0,
            };
            changed = true;
        }

        let needs_update = match &mut self.phase {
            Phase::Visible {
                position,
                listener,
                listener_events,
            } => {
                let events = listener.drain().len();
                *listener_events += events;
                position.is_none() || events > 0
            }
            _ => false,
        };

        if needs_update {
            changed |= self.update_position(measure);
        }

        changed
    }

    /// Number of viewport events received by the current visible session.
    pub fn listener_events(&self) -> usize {
        match self.phase {
            Phase::Visible {
                listener_events, ..
            } => listener_events,
            _ => 0,
        }
    }

    /// Recomputes the position from fresh measurements.
    ///
    /// No-op unless visible and both trigger and tooltip can be measured.
    pub fn update_position(&mut self, measure: &impl Measure) -> bool {
        let Phase::Visible { position, .. } = &mut self.phase else {
            return false;
        };
        let (Some(trigger), Some(tooltip)) = (measure.trigger_rect(), measure.tooltip_size())
        else {
            return false;
        };

        *position = Some(compute_position(
            self.config.placement,
            trigger,
            tooltip,
            measure.scroll_offset(),
        ));
        self.position_updates += 1;
        true
    }
}

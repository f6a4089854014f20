//! Hover timing, positioning and listener scoping of the tooltip machine.

use std::time::Duration;

use qrgen_business::tooltip::{
    Measure, Placement, Rect, ScrollOffset, Size, TOOLTIP_GAP, TooltipConfig, TooltipMachine,
    TooltipPhase, TooltipRegistry,
};
use qrgen_business::{ViewportEvent, ViewportEvents};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

struct FakeMeasure {
    trigger: Option<Rect>,
    tooltip: Option<Size>,
    scroll: ScrollOffset,
}

impl FakeMeasure {
    fn mounted() -> Self {
        Self {
            trigger: Some(Rect::new(100.0, 40.0, 120.0, 30.0)),
            tooltip: Some(Size::new(60.0, 20.0)),
            scroll: ScrollOffset::default(),
        }
    }

    fn unmounted() -> Self {
        Self {
            trigger: None,
            tooltip: None,
            scroll: ScrollOffset::default(),
        }
    }
}

impl Measure for FakeMeasure {
    fn trigger_rect(&self) -> Option<Rect> {
        self.trigger
    }

    fn tooltip_size(&self) -> Option<Size> {
        self.tooltip
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }
}

mod hover_timing {
    use super::*;

    #[test]
    fn leave_before_delay_never_shows() {
        let viewport = ViewportEvents::default();
        let measure = FakeMeasure::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default().delay_ms(200));

        machine.pointer_enter(ms(0));
        assert_eq!(machine.phase(), TooltipPhase::Pending);

        for t in (0..150).step_by(10) {
            machine.poll(ms(t), viewport.bus(), &measure);
            assert_ne!(machine.phase(), TooltipPhase::Visible, "shown early at {t}ms");
        }

        let token = machine
            .pending_delay()
            .expect("delay is pending")
            .handle()
            .cancellation_token();
        machine.pointer_leave();
        assert!(token.is_cancelled(), "leave must cancel the delay");

        for t in (150..1000).step_by(50) {
            machine.poll(ms(t), viewport.bus(), &measure);
            assert_eq!(machine.phase(), TooltipPhase::Hidden);
        }
    }

    #[test]
    fn visible_window_is_from_delay_until_leave() {
        let viewport = ViewportEvents::default();
        let measure = FakeMeasure::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default().delay_ms(200));

        machine.pointer_enter(ms(0));
        machine.poll(ms(199), viewport.bus(), &measure);
        assert!(!machine.is_visible());

        assert!(machine.poll(ms(200), viewport.bus(), &measure));
        assert!(machine.is_visible());

        machine.poll(ms(299), viewport.bus(), &measure);
        assert!(machine.is_visible());

        machine.pointer_leave();
        assert_eq!(machine.phase(), TooltipPhase::Hidden);
        assert!(machine.position().is_none());
    }

    #[test]
    fn repeated_enter_does_not_restart_delay() {
        let viewport = ViewportEvents::default();
        let measure = FakeMeasure::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.set_hovered(true, ms(0));
        machine.set_hovered(true, ms(150));
        machine.poll(ms(200), viewport.bus(), &measure);
        assert!(machine.is_visible());
    }

    #[test]
    fn set_hovered_maps_edges_to_enter_and_leave() {
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.set_hovered(false, ms(0));
        assert_eq!(machine.phase(), TooltipPhase::Hidden);

        machine.set_hovered(true, ms(10));
        assert_eq!(machine.phase(), TooltipPhase::Pending);
        assert_eq!(machine.remaining(ms(60)), Some(ms(150)));

        machine.set_hovered(false, ms(20));
        assert_eq!(machine.phase(), TooltipPhase::Hidden);
        assert_eq!(machine.remaining(ms(20)), None);
    }

    #[test]
    fn each_hover_session_schedules_a_newer_delay() {
        let mut machine = TooltipMachine::new(TooltipConfig::default());
        let session = |machine: &TooltipMachine| {
            machine
                .pending_delay()
                .expect("delay is pending")
                .handle()
                .id()
                .generation()
        };

        machine.pointer_enter(ms(0));
        let first = session(&machine);
        machine.pointer_enter(ms(50));
        assert_eq!(session(&machine), first, "hovering again keeps the session");

        machine.pointer_leave();
        machine.pointer_enter(ms(100));
        assert!(session(&machine) > first);
    }

    #[test]
    fn new_session_after_leave_waits_full_delay_again() {
        let viewport = ViewportEvents::default();
        let measure = FakeMeasure::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default().delay_ms(100));

        machine.pointer_enter(ms(0));
        machine.pointer_leave();
        machine.pointer_enter(ms(80));

        machine.poll(ms(120), viewport.bus(), &measure);
        assert!(!machine.is_visible(), "first session's deadline must not leak");

        machine.poll(ms(180), viewport.bus(), &measure);
        assert!(machine.is_visible());
    }
}

mod positioning {
    use super::*;

    #[test]
    fn right_placement_matches_formula() {
        let viewport = ViewportEvents::default();
        let mut measure = FakeMeasure::mounted();
        measure.scroll = ScrollOffset { x: 5.0, y: 25.0 };
        let mut machine =
            TooltipMachine::new(TooltipConfig::default().placement(Placement::Right));

        machine.pointer_enter(ms(0));
        machine.poll(ms(200), viewport.bus(), &measure);

        let trigger = measure.trigger.expect("trigger is mounted");
        let tooltip = measure.tooltip.expect("tooltip is mounted");
        let position = machine.position().expect("visible tooltip has a position");

        assert_eq!(position.left, trigger.right() + TOOLTIP_GAP + 5.0);
        assert_eq!(
            position.top,
            trigger.top + (trigger.height - tooltip.height) / 2.0 + 25.0
        );
    }

    #[test]
    fn unmeasurable_elements_skip_the_update() {
        let viewport = ViewportEvents::default();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.pointer_enter(ms(0));
        machine.poll(ms(200), viewport.bus(), &FakeMeasure::unmounted());
        assert!(machine.is_visible());
        assert!(machine.position().is_none());
        assert_eq!(machine.position_updates(), 0);

        machine.poll(ms(216), viewport.bus(), &FakeMeasure::mounted());
        assert!(machine.position().is_some());
        assert_eq!(machine.position_updates(), 1);
    }

    #[test]
    fn viewport_events_recompute_while_visible() {
        let mut viewport = ViewportEvents::default();
        viewport.observe(Size::new(800.0, 600.0), 0.0, 0.0);
        let mut measure = FakeMeasure::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.pointer_enter(ms(0));
        machine.poll(ms(200), viewport.bus(), &measure);
        assert_eq!(machine.position_updates(), 1);

        // Nothing happened: no recomputation.
        machine.poll(ms(216), viewport.bus(), &measure);
        assert_eq!(machine.position_updates(), 1);

        measure.trigger = Some(Rect::new(100.0, 10.0, 120.0, 30.0));
        viewport.observe(Size::new(800.0, 600.0), 0.0, 30.0);
        machine.poll(ms(232), viewport.bus(), &measure);

        assert_eq!(machine.position_updates(), 2);
        assert_eq!(machine.listener_events(), 1);
        let position = machine.position().expect("visible tooltip has a position");
        assert_eq!(position.top, 10.0 + 30.0 + TOOLTIP_GAP);
    }
}

mod listener_scoping {
    use super::*;

    #[test]
    fn listener_attached_only_while_visible() {
        let mut viewport = ViewportEvents::default();
        viewport.observe(Size::new(800.0, 600.0), 0.0, 0.0);
        let measure = FakeMeasure::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        assert_eq!(viewport.listener_count(), 0);

        machine.pointer_enter(ms(0));
        machine.poll(ms(100), viewport.bus(), &measure);
        assert_eq!(viewport.listener_count(), 0, "pending must not listen");

        machine.poll(ms(200), viewport.bus(), &measure);
        assert_eq!(viewport.listener_count(), 1);

        machine.pointer_leave();
        assert_eq!(viewport.listener_count(), 0);

        let updates = machine.position_updates();
        assert_eq!(viewport.observe(Size::new(1024.0, 768.0), 0.0, 0.0), 1);
        machine.poll(ms(400), viewport.bus(), &measure);
        assert_eq!(machine.position_updates(), updates);
        assert_eq!(viewport.bus().emit(&ViewportEvent::Resized(Size::new(1.0, 1.0))), 0);
    }

    #[test]
    fn unmounted_tooltips_release_timer_and_listener() {
        let mut viewport = ViewportEvents::default();
        viewport.observe(Size::new(800.0, 600.0), 0.0, 0.0);
        let measure = FakeMeasure::mounted();
        let mut registry = TooltipRegistry::default();

        let pending_token = {
            let entry = registry.entry(1, TooltipConfig::default());
            entry.machine.pointer_enter(ms(0));
            entry
                .machine
                .pending_delay()
                .expect("delay is pending")
                .handle()
                .cancellation_token()
        };
        {
            let entry = registry.entry(2, TooltipConfig::default().delay_ms(0));
            entry.machine.pointer_enter(ms(0));
            entry.machine.poll(ms(0), viewport.bus(), &measure);
            assert!(entry.machine.is_visible());
        }
        assert_eq!(registry.end_frame(), 0);
        assert_eq!(viewport.listener_count(), 1);

        // Next frame renders neither trigger.
        assert_eq!(registry.end_frame(), 2);
        assert!(registry.is_empty());
        assert!(pending_token.is_cancelled());
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn registry_updates_config_in_place() {
        let mut registry = TooltipRegistry::default();
        registry.entry(7, TooltipConfig::default());
        registry.entry(7, TooltipConfig::default().placement(Placement::Top));

        assert_eq!(registry.len(), 1);
        let entry = registry.get(7).expect("entry exists");
        assert_eq!(entry.machine.config().placement, Placement::Top);
    }
}

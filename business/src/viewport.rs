//! Viewport resize/scroll tracking.
//!
//! The frame loop reports the viewport size and scroll delta once per frame;
//! [`ViewportEvents`] turns changes into [`ViewportEvent`]s on a bus that
//! only live subscribers (visible tooltips) listen to.

use std::any::Any;

use log::trace;
use qrgen_states::{EventBus, State, Subscription};

use crate::tooltip::Size;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Resized(Size),
    Scrolled { dx: f32, dy: f32 },
}

#[derive(Debug, Default)]
pub struct ViewportEvents {
    bus: EventBus<ViewportEvent>,
    last_size: Option<Size>,
}

impl State for ViewportEvents {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ViewportEvents {
    pub fn bus(&self) -> &EventBus<ViewportEvent> {
        &self.bus
    }

    pub fn subscribe(&self) -> Subscription<ViewportEvent> {
        self.bus.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    /// Records one frame's viewport and returns the number of events emitted.
    ///
    /// The first observation only records the size.
    pub fn observe(&mut self, size: Size, scroll_dx: f32, scroll_dy: f32) -> usize {
        let mut emitted = 0;

        if let Some(last) = self.last_size.replace(size)
            && last != size
        {
            trace!("Viewport resized to {}x{}", size.width, size.height);
            emitted += 1;
            self.bus.emit(&ViewportEvent::Resized(size));
        }

        if scroll_dx != 0.0 || scroll_dy != 0.0 {
            emitted += 1;
            self.bus.emit(&ViewportEvent::Scrolled {
                dx: scroll_dx,
                dy: scroll_dy,
            });
        }

        emitted
    }
}

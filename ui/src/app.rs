use qrgen_business::ViewportEvents;
use qrgen_business::tooltip::{Size, TooltipRegistry};

use crate::{pages, state::State};

#[derive(bon::Builder)]
pub struct QrGenApp {
    #[builder(default)]
    state: State,
}

impl QrGenApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Runs one frame against `ctx`.
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.observe_viewport(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                pages::qr_page(&mut self.state, ui);
            });
        });

        // Tooltips whose trigger was not drawn this frame release their timer
        // and viewport listener here.
        self.state.ctx.state_mut::<TooltipRegistry>().end_frame();

        if self.state.ctx.flush_commands() > 0 {
            ctx.request_repaint();
        }
    }

    fn observe_viewport(&mut self, ctx: &egui::Context) {
        let (content, scroll) = ctx.input(|i| (i.content_rect(), i.smooth_scroll_delta));
        self.state.ctx.state_mut::<ViewportEvents>().observe(
            Size::new(content.width(), content.height()),
            scroll.x,
            scroll.y,
        );
    }
}

impl eframe::App for QrGenApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

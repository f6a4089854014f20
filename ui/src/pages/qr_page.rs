//! The QR generator page.
//!
//! A controlled text field, the "Generate QR Code" action behind a hover
//! tooltip, and the generated code once requested.

use egui::{Response, Ui};
use log::info;
use qrgen_business::tooltip::Placement;
use qrgen_business::{GenerateQrCommand, QrGenConfig, QrPageState};

use crate::state::State;
use crate::widgets::{QrCodeCache, TextInput, Tooltip, qr_code};

const INPUT_WIDTH: f32 = 320.0;

/// Renders the page. Generation is dispatched and applied at frame end.
pub fn qr_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.heading("QR Code Generator");
        ui.add_space(16.0);

        let input = TextInput::new("qr_input", state.ctx.state::<QrPageState>().input())
            .placeholder("Enter your text")
            .attrs(|edit| edit.desired_width(INPUT_WIDTH))
            .show(ui);
        if let Some(text) = input.changed {
            state.ctx.update::<QrPageState>(|page| page.edit_text(text));
        }

        ui.add_space(8.0);

        let delay_ms = state.ctx.state::<QrGenConfig>().tooltip_delay_ms;
        let generate = Tooltip::new("generate_tooltip", "Encode the text with the logo at its center")
            .placement(Placement::Top)
            .delay_ms(delay_ms)
            .with_arrow(true)
            .show(ui, &mut state.ctx, |ui| ui.button("Generate QR Code").clicked())
            .inner;
        if generate {
            info!("Generate QR Code clicked");
            state.ctx.dispatch::<GenerateQrCommand>();
        }

        let config = state.ctx.state::<QrGenConfig>().clone();
        if let Some(request) = state.ctx.state::<QrPageState>().render_request(&config) {
            ui.add_space(16.0);
            qr_code(ui, state.ctx.state_mut::<QrCodeCache>(), &request);
        }
    })
    .response
}

//! QR generator logic independent of egui: page state, configuration, the
//! rendering contract and the hover tooltip machine.

mod config;
mod qr_page;
mod render;
pub mod tooltip;
mod viewport;

pub use config::{ConfigError, MAX_QR_SIZE, QrGenConfig};
pub use qr_page::{GenerateQrCommand, OverlaySource, OverlaySpec, QrPageState, QrRenderRequest};
pub use render::{QrRenderer, RenderError};
pub use viewport::{ViewportEvent, ViewportEvents};

use qrgen_states::StateCtx;

/// Registers every state and command the QR page needs.
pub fn register(ctx: &mut StateCtx, config: QrGenConfig) {
    ctx.add_state(config);
    ctx.add_state(QrPageState::default());
    ctx.add_state(tooltip::TooltipRegistry::default());
    ctx.add_state(ViewportEvents::default());
    ctx.record_command(GenerateQrCommand);
}

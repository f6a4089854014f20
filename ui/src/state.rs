use qrgen_business::{QrGenConfig, register};
use qrgen_states::StateCtx;

use crate::widgets::QrCodeCache;

/// The main application state.
#[derive(Debug)]
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(QrGenConfig::default())
    }
}

impl State {
    pub fn new(config: QrGenConfig) -> Self {
        let mut ctx = StateCtx::new();

        register(&mut ctx, config);
        ctx.add_state(QrCodeCache::default());

        Self { ctx }
    }
}

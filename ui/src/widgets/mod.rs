mod qr_code;
mod text_input;
mod tooltip;

pub use qr_code::{EguiQrRenderer, QrCodeCache, qr_code};
pub use text_input::{SECTION_WIDTH, TextInput, TextInputResponse};
pub use tooltip::{MAX_WIDTH as TOOLTIP_MAX_WIDTH, Tooltip};

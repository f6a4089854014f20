//! Page state for the QR code form.
//!
//! The page owns the entered text and whether a code has been generated for
//! it. Any edit clears the generated flag, so a code rendered for old text is
//! never shown next to new text.

use std::any::Any;
use std::path::PathBuf;

use log::{debug, info};
use qrgen_states::{Command, State, StateCtx};

use crate::QrGenConfig;

/// Where the centered overlay image comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlaySource {
    /// The logo bundled with the application.
    #[default]
    Builtin,
    /// An image file decoded at render time.
    File(PathBuf),
}

/// Overlay parameters handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub source: OverlaySource,
    pub width: u32,
    pub height: u32,
    pub opacity: f32,
}

/// Everything the renderer needs to draw one code.
///
/// Two equal requests always produce the same image.
#[derive(Debug, Clone, PartialEq)]
pub struct QrRenderRequest {
    pub text: String,
    /// Edge length of the output image in pixels.
    pub size: u32,
    pub overlay: OverlaySpec,
}

#[derive(Default, Debug, Clone)]
pub struct QrPageState {
    input: String,
    generated: bool,
}

impl State for QrPageState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl QrPageState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Replaces the text and invalidates any generated code.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        if self.generated {
            debug!("Input changed, hiding generated QR code");
        }
        self.generated = false;
    }

    /// Marks the current text as generated. Empty text is accepted.
    pub fn generate(&mut self) {
        info!("Generating QR code for {} bytes of text", self.input.len());
        self.generated = true;
    }

    /// The render request for the output region, present only once generated.
    pub fn render_request(&self, config: &QrGenConfig) -> Option<QrRenderRequest> {
        self.generated.then(|| config.render_request(&self.input))
    }
}

/// Manual-only command behind the "Generate QR Code" button.
///
/// Dispatch via `ctx.dispatch::<GenerateQrCommand>()`.
#[derive(Default, Debug)]
pub struct GenerateQrCommand;

impl Command for GenerateQrCommand {
    fn run(&self, ctx: &mut StateCtx) {
        ctx.update::<QrPageState>(QrPageState::generate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_empty_and_not_generated() {
        let page = QrPageState::default();
        assert_eq!(page.input(), "");
        assert!(!page.is_generated());
        assert!(page.render_request(&QrGenConfig::default()).is_none());
    }

    #[test]
    fn generate_accepts_empty_text() {
        let mut page = QrPageState::default();
        page.generate();
        assert!(page.is_generated());

        let request = page
            .render_request(&QrGenConfig::default())
            .expect("generated page has a request");
        assert_eq!(request.text, "");
    }

    #[test]
    fn edit_after_generate_hides_output() {
        let mut page = QrPageState::default();
        page.edit_text("hello");
        page.generate();
        assert!(page.render_request(&QrGenConfig::default()).is_some());

        page.edit_text("hello!");
        assert!(!page.is_generated());
        assert!(page.render_request(&QrGenConfig::default()).is_none());
    }

    #[test]
    fn text_is_not_trimmed() {
        let mut page = QrPageState::default();
        page.edit_text("  padded  ");
        page.generate();
        let request = page
            .render_request(&QrGenConfig::default())
            .expect("generated page has a request");
        assert_eq!(request.text, "  padded  ");
    }
}

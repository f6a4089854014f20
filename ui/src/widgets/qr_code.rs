//! QR code rendering and display.
//!
//! [`EguiQrRenderer`] encodes the text with the `qrcode` crate and composites
//! the overlay logo at the center. [`qr_code`] shows the result, re-rendering
//! only when the request changes.

use std::any::Any;

use egui::{Color32, ColorImage, Response, RichText, TextureHandle, TextureOptions, Ui, vec2};
use image::RgbaImage;
use image::imageops::FilterType;
use log::{info, warn};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use qrgen_business::{OverlaySource, OverlaySpec, QrRenderRequest, QrRenderer, RenderError};
use qrgen_states::State;

use crate::utils::colors::COLOR_RED;
use crate::utils::logo::builtin_logo;

/// Light modules required around the code by ISO/IEC 18004.
const QUIET_ZONE_MODULES: usize = 4;

/// Renders [`QrRenderRequest`]s into egui images.
///
/// Error correction is fixed at level H so the code stays readable under
/// the centered logo.
#[derive(Debug, Default, Clone, Copy)]
pub struct EguiQrRenderer;

impl QrRenderer for EguiQrRenderer {
    type Output = ColorImage;

    fn render(&self, request: &QrRenderRequest) -> Result<ColorImage, RenderError> {
        let code = QrCode::with_error_correction_level(request.text.as_bytes(), EcLevel::H)
            .map_err(|err| match err {
                QrError::DataTooLong => RenderError::DataTooLong {
                    len: request.text.len(),
                },
                other => RenderError::Encode(other.to_string()),
            })?;

        let mut image = modules_to_image(&code, request.size as usize);

        let logo = load_overlay(&request.overlay).unwrap_or_else(|err| {
            warn!("{err}, falling back to the built-in logo");
            builtin_logo(request.overlay.width, request.overlay.height)
        });
        composite_overlay(&mut image, &logo, request.overlay.opacity);

        Ok(image)
    }
}

/// Rasterizes the module matrix, quiet zone included, to exactly `size`×`size`.
fn modules_to_image(code: &QrCode, size: usize) -> ColorImage {
    let qr_width = code.width();
    let total = qr_width + 2 * QUIET_ZONE_MODULES;
    let colors = code.to_colors();
    let size = size.max(total);

    let module_at = |pixel: usize| pixel * total / size;
    let mut pixels = vec![Color32::WHITE; size * size];

    for (py, row) in pixels.chunks_mut(size).enumerate() {
        let Some(my) = module_at(py).checked_sub(QUIET_ZONE_MODULES) else {
            continue;
        };
        if my >= qr_width {
            continue;
        }
        for (px, pixel) in row.iter_mut().enumerate() {
            let Some(mx) = module_at(px).checked_sub(QUIET_ZONE_MODULES) else {
                continue;
            };
            if mx < qr_width && colors[my * qr_width + mx] == qrcode::Color::Dark {
                *pixel = Color32::BLACK;
            }
        }
    }

    ColorImage::new([size, size], pixels)
}

/// Loads the overlay image at its requested size.
fn load_overlay(overlay: &OverlaySpec) -> Result<RgbaImage, RenderError> {
    match &overlay.source {
        OverlaySource::Builtin => Ok(builtin_logo(overlay.width, overlay.height)),
        OverlaySource::File(path) => {
            let decoded = image::open(path).map_err(|err| RenderError::Overlay {
                path: path.clone(),
                reason: err.to_string(),
            })?;
            Ok(image::imageops::resize(
                &decoded.to_rgba8(),
                overlay.width,
                overlay.height,
                FilterType::Triangle,
            ))
        }
    }
}

/// Alpha-blends `logo` onto the center of `image` at `opacity`.
fn composite_overlay(image: &mut ColorImage, logo: &RgbaImage, opacity: f32) {
    let [width, height] = image.size;
    let (logo_w, logo_h) = (logo.width() as usize, logo.height() as usize);
    let left = width.saturating_sub(logo_w) / 2;
    let top = height.saturating_sub(logo_h) / 2;

    for (x, y, px) in logo.enumerate_pixels() {
        let (tx, ty) = (left + x as usize, top + y as usize);
        if tx >= width || ty >= height {
            continue;
        }
        let alpha = f32::from(px[3]) / 255.0 * opacity;
        if alpha <= 0.0 {
            continue;
        }

        let dst = &mut image.pixels[ty * width + tx];
        let blend = |src: u8, dst: u8| -> u8 {
            (f32::from(src) * alpha + f32::from(dst) * (1.0 - alpha)).round() as u8
        };
        *dst = Color32::from_rgb(
            blend(px[0], dst.r()),
            blend(px[1], dst.g()),
            blend(px[2], dst.b()),
        );
    }
}

/// Last rendered request and its texture, kept across frames.
#[derive(Default)]
pub struct QrCodeCache {
    entry: Option<(QrRenderRequest, Result<TextureHandle, RenderError>)>,
    renders: usize,
}

impl std::fmt::Debug for QrCodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrCodeCache")
            .field("request", &self.request())
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}

impl State for QrCodeCache {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl QrCodeCache {
    /// How many times a request was actually rendered.
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn request(&self) -> Option<&QrRenderRequest> {
        self.entry.as_ref().map(|(request, _)| request)
    }

    fn texture(
        &mut self,
        ctx: &egui::Context,
        request: &QrRenderRequest,
    ) -> Option<&Result<TextureHandle, RenderError>> {
        if self.request() != Some(request) {
            info!("Rendering QR code ({} bytes)", request.text.len());
            let rendered = EguiQrRenderer
                .render(request)
                .map(|image| ctx.load_texture("qr_code", image, TextureOptions::NEAREST));
            self.entry = Some((request.clone(), rendered));
            self.renders += 1;
        }
        self.entry.as_ref().map(|(_, rendered)| rendered)
    }
}

/// Shows the code for `request`, or the renderer's error in its place.
pub fn qr_code(ui: &mut Ui, cache: &mut QrCodeCache, request: &QrRenderRequest) -> Response {
    let size = request.size as f32;
    let ctx = ui.ctx().clone();

    ui.vertical_centered(|ui| match cache.texture(&ctx, request) {
        Some(Ok(texture)) => {
            ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(vec2(size, size))
                    .corner_radius(8),
            );
            ui.add_space(4.0);
            ui.label(RichText::new("Scan with your phone camera").small().weak());
        }
        Some(Err(err)) => {
            ui.colored_label(COLOR_RED, err.to_string());
        }
        None => {}
    })
    .response
}

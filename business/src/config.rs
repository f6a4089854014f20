//! Application configuration.
//!
//! Every field has a default; the process environment can override them with
//! `QRGEN_*` variables:
//!
//! | variable                 | field              |
//! |--------------------------|--------------------|
//! | `QRGEN_QR_SIZE`          | `qr_size`          |
//! | `QRGEN_LOGO_PATH`        | `logo`             |
//! | `QRGEN_LOGO_WIDTH`       | `logo_width`       |
//! | `QRGEN_LOGO_HEIGHT`      | `logo_height`      |
//! | `QRGEN_LOGO_OPACITY`     | `logo_opacity`     |
//! | `QRGEN_TOOLTIP_DELAY_MS` | `tooltip_delay_ms` |

use std::any::Any;
use std::env::vars;
use std::path::PathBuf;
use std::time::Duration;

use log::info;
use qrgen_states::State;
use serde::Deserialize;
use thiserror::Error;

use crate::qr_page::{OverlaySource, OverlaySpec, QrRenderRequest};

const ENV_PREFIX: &str = "QRGEN_";

/// Largest accepted `QRGEN_QR_SIZE`; the image holds `size * size` pixels.
pub const MAX_QR_SIZE: u32 = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("QRGEN_LOGO_OPACITY must be within 0.0..=1.0, got {0}")]
    InvalidOpacity(f32),
    #[error("QRGEN_QR_SIZE must be at most {max}, got {0}", max = MAX_QR_SIZE)]
    QrSizeTooLarge(u32),
    #[error("{0} must be greater than zero")]
    ZeroSize(&'static str),
    #[error("Logo {logo_width}x{logo_height} does not fit in a {qr_size}px QR code")]
    LogoTooLarge {
        logo_width: u32,
        logo_height: u32,
        qr_size: u32,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    qrgen_qr_size: Option<u32>,
    qrgen_logo_path: Option<PathBuf>,
    qrgen_logo_width: Option<u32>,
    qrgen_logo_height: Option<u32>,
    qrgen_logo_opacity: Option<f32>,
    qrgen_tooltip_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QrGenConfig {
    /// Edge length of the rendered code in pixels.
    pub qr_size: u32,
    pub logo: OverlaySource,
    pub logo_width: u32,
    pub logo_height: u32,
    pub logo_opacity: f32,
    pub tooltip_delay_ms: u64,
}

impl Default for QrGenConfig {
    fn default() -> Self {
        Self {
            qr_size: 300,
            logo: OverlaySource::Builtin,
            logo_width: 100,
            logo_height: 100,
            logo_opacity: 0.9,
            tooltip_delay_ms: 200,
        }
    }
}

impl State for QrGenConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl QrGenConfig {
    /// Reads `QRGEN_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment variables");
        Self::from_vars(vars())
    }

    /// Builds a configuration from explicit key/value pairs.
    ///
    /// Keys without the `QRGEN_` prefix are ignored.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .filter(|(key, _)| key.as_ref().starts_with(ENV_PREFIX))
            .map(|(key, value)| (key.as_ref().to_owned(), value.as_ref().to_owned()))
            .collect();
        let raw: RawConfig = serde_env::from_iter(vars)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            qrgen_qr_size,
            qrgen_logo_path,
            qrgen_logo_width,
            qrgen_logo_height,
            qrgen_logo_opacity,
            qrgen_tooltip_delay_ms,
        } = raw;
        let defaults = Self::default();

        let logo = match qrgen_logo_path {
            Some(path) => {
                info!("Using overlay image from {}", path.display());
                OverlaySource::File(path)
            }
            None => defaults.logo,
        };

        let config = Self {
            qr_size: qrgen_qr_size.unwrap_or(defaults.qr_size),
            logo,
            logo_width: qrgen_logo_width.unwrap_or(defaults.logo_width),
            logo_height: qrgen_logo_height.unwrap_or(defaults.logo_height),
            logo_opacity: qrgen_logo_opacity.unwrap_or(defaults.logo_opacity),
            tooltip_delay_ms: qrgen_tooltip_delay_ms.unwrap_or(defaults.tooltip_delay_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.logo_opacity) {
            return Err(ConfigError::InvalidOpacity(self.logo_opacity));
        }
        if self.qr_size == 0 {
            return Err(ConfigError::ZeroSize("QRGEN_QR_SIZE"));
        }
        if self.qr_size > MAX_QR_SIZE {
            return Err(ConfigError::QrSizeTooLarge(self.qr_size));
        }
        if self.logo_width == 0 {
            return Err(ConfigError::ZeroSize("QRGEN_LOGO_WIDTH"));
        }
        if self.logo_height == 0 {
            return Err(ConfigError::ZeroSize("QRGEN_LOGO_HEIGHT"));
        }
        if self.logo_width > self.qr_size || self.logo_height > self.qr_size {
            return Err(ConfigError::LogoTooLarge {
                logo_width: self.logo_width,
                logo_height: self.logo_height,
                qr_size: self.qr_size,
            });
        }
        Ok(())
    }

    pub fn tooltip_delay(&self) -> Duration {
        Duration::from_millis(self.tooltip_delay_ms)
    }

    pub fn overlay(&self) -> OverlaySpec {
        OverlaySpec {
            source: self.logo.clone(),
            width: self.logo_width,
            height: self.logo_height,
            opacity: self.logo_opacity,
        }
    }

    /// Bundles `text` with the fixed presentation parameters.
    pub fn render_request(&self, text: &str) -> QrRenderRequest {
        QrRenderRequest {
            text: text.to_owned(),
            size: self.qr_size,
            overlay: self.overlay(),
        }
    }
}

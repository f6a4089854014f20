//! Shared color constants for the UI.

use egui::Color32;

/// Red color for error text, error borders and the required marker.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Brand color of the built-in logo.
pub const COLOR_BRAND: Color32 = Color32::from_rgb(34, 139, 34);

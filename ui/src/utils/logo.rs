//! Built-in overlay logo, drawn procedurally so the binary needs no image asset.
//!
//! The motif is a finder-pattern style badge: nested rounded squares in the
//! brand color on a white plate.

use image::{Rgba, RgbaImage};

use super::colors::COLOR_BRAND;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn brand() -> Rgba<u8> {
    let [r, g, b, _] = COLOR_BRAND.to_array();
    Rgba([r, g, b, 255])
}

/// Whether pixel center `(x, y)` lies in the rounded square inset by
/// `inset` (fraction of the shorter side) from every edge.
fn inside(x: u32, y: u32, width: u32, height: u32, inset: f32) -> bool {
    let short = width.min(height) as f32;
    let margin = short * inset;
    let radius = short * 0.2 * (1.0 - inset);

    let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
    let (left, top) = (margin, margin);
    let (right, bottom) = (width as f32 - margin, height as f32 - margin);
    if px < left || px > right || py < top || py > bottom {
        return false;
    }

    // Distance into the nearest corner square, if any.
    let cx = if px < left + radius {
        left + radius
    } else if px > right - radius {
        right - radius
    } else {
        return true;
    };
    let cy = if py < top + radius {
        top + radius
    } else if py > bottom - radius {
        bottom - radius
    } else {
        return true;
    };
    (px - cx).powi(2) + (py - cy).powi(2) <= radius.powi(2)
}

/// Draws the built-in logo at `width`×`height` pixels.
pub fn builtin_logo(width: u32, height: u32) -> RgbaImage {
    let brand = brand();
    RgbaImage::from_fn(width, height, |x, y| {
        if inside(x, y, width, height, 0.42) {
            brand
        } else if inside(x, y, width, height, 0.30) {
            WHITE
        } else if inside(x, y, width, height, 0.12) {
            brand
        } else if inside(x, y, width, height, 0.0) {
            WHITE
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_has_requested_size() {
        let logo = builtin_logo(100, 60);
        assert_eq!(logo.dimensions(), (100, 60));
    }

    #[test]
    fn corners_are_transparent_and_center_is_brand() {
        let logo = builtin_logo(100, 100);
        assert_eq!(logo.get_pixel(0, 0)[3], 0);
        assert_eq!(*logo.get_pixel(50, 50), brand());
        assert_eq!(*logo.get_pixel(50, 3), WHITE);
    }
}

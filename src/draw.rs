//! Minimal raster primitives used to paint the generated icon.
//!
//! Every primitive writes straight into an [`RgbaImage`] and silently skips
//! coordinates that fall outside of it.

use image::{Rgba, RgbaImage};

/// An opaque color, used for gradient endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn opaque(self) -> Rgba<u8> {
        Rgba([self.0, self.1, self.2, 255])
    }
}

/// Linear interpolation between two colors, `t` is clamped to `[0, 1]`.
/// Channels are truncated, not rounded.
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
    Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Composite `color` over the pixel at (x, y). The destination is treated
/// as opaque, so the result always has full alpha.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }

    let pixel = img.get_pixel_mut(x as u32, y as u32);
    let alpha = color[3] as f32 / 255.0;
    for c in 0..3 {
        let blended = color[c] as f32 * alpha + pixel[c] as f32 * (1.0 - alpha);
        pixel[c] = blended.round() as u8;
    }
    pixel[3] = 255;
}

/// Fill the rectangle spanning (x0, y0) to (x1, y1), both corners included.
pub fn fill_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (x0, x1) = (x0.min(x1).max(0), x0.max(x1).min(img.width() as i64 - 1));
    let (y0, y1) = (y0.min(y1).max(0), y0.max(y1).min(img.height() as i64 - 1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            blend_pixel(img, x, y, color);
        }
    }
}

/// Fill a triangle, edges included.
pub fn fill_triangle(img: &mut RgbaImage, points: [(i64, i64); 3], color: Rgba<u8>) {
    let min_x = points.iter().map(|p| p.0).min().unwrap_or(0).max(0);
    let max_x = points
        .iter()
        .map(|p| p.0)
        .max()
        .unwrap_or(0)
        .min(img.width() as i64 - 1);
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.1)
        .max()
        .unwrap_or(0)
        .min(img.height() as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if inside_triangle((x, y), points) {
                blend_pixel(img, x, y, color);
            }
        }
    }
}

fn inside_triangle(p: (i64, i64), [a, b, c]: [(i64, i64); 3]) -> bool {
    let edge = |p1: (i64, i64), p2: (i64, i64)| {
        (p.0 - p2.0) * (p1.1 - p2.1) - (p1.0 - p2.0) * (p.1 - p2.1)
    };
    let d1 = edge(a, b);
    let d2 = edge(b, c);
    let d3 = edge(c, a);

    let has_neg = d1 < 0 || d2 < 0 || d3 < 0;
    let has_pos = d1 > 0 || d2 > 0 || d3 > 0;
    !(has_neg && has_pos)
}

/// Outline of the ellipse inscribed in the box (x0, y0)-(x1, y1).
///
/// A pixel belongs to the outline when it lies inside (or on) the outer
/// ellipse and outside the ellipse shrunk by `width` on every side.
pub fn stroke_ellipse(
    img: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    width: u32,
    color: Rgba<u8>,
) {
    let center_x = (x0 + x1) as f32 / 2.0;
    let center_y = (y0 + y1) as f32 / 2.0;
    let outer_rx = (x1 - x0).abs() as f32 / 2.0;
    let outer_ry = (y1 - y0).abs() as f32 / 2.0;
    let inner_rx = outer_rx - width as f32;
    let inner_ry = outer_ry - width as f32;

    if outer_rx <= 0.0 || outer_ry <= 0.0 {
        return;
    }

    let norm = |dx: f32, dy: f32, rx: f32, ry: f32| (dx / rx).powi(2) + (dy / ry).powi(2);

    for y in y0.min(y1).max(0)..=y0.max(y1).min(img.height() as i64 - 1) {
        for x in x0.min(x1).max(0)..=x0.max(x1).min(img.width() as i64 - 1) {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;

            if norm(dx, dy, outer_rx, outer_ry) > 1.0 {
                continue;
            }
            // A stroke at least as wide as the radius fills the whole ellipse.
            let in_hole =
                inner_rx > 0.0 && inner_ry > 0.0 && norm(dx, dy, inner_rx, inner_ry) <= 1.0;
            if !in_hole {
                blend_pixel(img, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn canvas(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, BLACK)
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = Rgb(28, 22, 43);
        let b = Rgb(11, 8, 22);
        assert_eq!(lerp_rgb(a, b, 0.0), a);
        assert_eq!(lerp_rgb(a, b, 1.0), b);
        assert_eq!(lerp_rgb(a, b, 7.5), b);
    }

    #[test]
    fn lerp_truncates_channels() {
        // 0 * 0.5 + 255 * 0.5 = 127.5
        assert_eq!(lerp_rgb(Rgb(0, 0, 0), Rgb(255, 255, 255), 0.5), Rgb(127, 127, 127));
    }

    #[test]
    fn blend_keeps_result_opaque() {
        let mut img = canvas(2);
        blend_pixel(&mut img, 0, 0, Rgba([200, 100, 50, 0]));
        assert_eq!(*img.get_pixel(0, 0), BLACK);

        blend_pixel(&mut img, 1, 1, Rgba([255, 255, 255, 128]));
        let p = img.get_pixel(1, 1);
        assert_eq!(p[3], 255);
        assert_eq!(p[0], 128);
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut img = canvas(2);
        blend_pixel(&mut img, -1, 0, WHITE);
        blend_pixel(&mut img, 0, 2, WHITE);
        assert!(img.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn rect_is_inclusive_and_clipped() {
        let mut img = canvas(8);
        fill_rect(&mut img, 2, 3, 4, 5, WHITE);
        assert_eq!(img.pixels().filter(|p| **p == WHITE).count(), 9);
        assert_eq!(*img.get_pixel(4, 5), WHITE);
        assert_eq!(*img.get_pixel(5, 5), BLACK);

        let mut img = canvas(4);
        fill_rect(&mut img, -10, -10, 100, 100, WHITE);
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn triangle_includes_vertices_and_excludes_outside() {
        let mut img = canvas(10);
        fill_triangle(&mut img, [(0, 0), (9, 0), (0, 9)], WHITE);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(9, 0), WHITE);
        assert_eq!(*img.get_pixel(0, 9), WHITE);
        assert_eq!(*img.get_pixel(2, 2), WHITE);
        assert_eq!(*img.get_pixel(9, 9), BLACK);
        assert_eq!(*img.get_pixel(6, 6), BLACK);
    }

    #[test]
    fn triangle_winding_does_not_matter() {
        let mut cw = canvas(10);
        let mut ccw = canvas(10);
        fill_triangle(&mut cw, [(1, 1), (8, 2), (4, 8)], WHITE);
        fill_triangle(&mut ccw, [(4, 8), (8, 2), (1, 1)], WHITE);
        assert_eq!(cw, ccw);
    }

    #[test]
    fn ellipse_outline_leaves_center_and_corners() {
        let mut img = canvas(41);
        stroke_ellipse(&mut img, 0, 0, 40, 40, 3, WHITE);
        assert_eq!(*img.get_pixel(20, 20), BLACK);
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(40, 40), BLACK);
        // Leftmost point of the ring and just inside of it.
        assert_eq!(*img.get_pixel(0, 20), WHITE);
        assert_eq!(*img.get_pixel(2, 20), WHITE);
        assert_eq!(*img.get_pixel(4, 20), BLACK);
    }

    #[test]
    fn wide_stroke_fills_the_ellipse() {
        let mut img = canvas(11);
        stroke_ellipse(&mut img, 0, 0, 10, 10, 20, WHITE);
        assert_eq!(*img.get_pixel(5, 5), WHITE);
    }
}

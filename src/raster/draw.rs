use image::RgbaImage;

/// Opaque highlight color for arrow overlays.
const ARROW_RGBA: [u8; 4] = [255, 0, 0, 255];

/// Arrowhead wing angle relative to the shaft.
const WING_ANGLE: f32 = std::f32::consts::PI / 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Endpoints of a directional arrow in pixel coordinates.
///
/// Coordinates may lie outside the image; drawing is clipped to the canvas.
pub struct ArrowSpec {
    /// Shaft start x.
    pub start_x: i32,
    /// Shaft start y.
    pub start_y: i32,
    /// Tip x.
    pub end_x: i32,
    /// Tip y.
    pub end_y: i32,
}

/// Draw a straight shaft plus a triangular head onto `img`, in place.
///
/// Shaft width is `max(3, min(w,h)/150)` and head length `max(15, min(w,h)/30)`,
/// so the overlay stays legible on both thumbnails and 4K generations.
pub fn draw_arrow(img: &mut RgbaImage, arrow: ArrowSpec) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let short = w.min(h);
    let line_width = (short / 150).max(3) as f32;
    let head_len = (short / 30).max(15) as f32;

    let start = (arrow.start_x as f32, arrow.start_y as f32);
    let end = (arrow.end_x as f32, arrow.end_y as f32);

    fill_segment(img, start, end, line_width / 2.0);

    let angle = (end.1 - start.1).atan2(end.0 - start.0);
    let left = (
        end.0 - head_len * (angle - WING_ANGLE).cos(),
        end.1 - head_len * (angle - WING_ANGLE).sin(),
    );
    let right = (
        end.0 - head_len * (angle + WING_ANGLE).cos(),
        end.1 - head_len * (angle + WING_ANGLE).sin(),
    );
    fill_triangle(img, end, left, right);
}

type P = (f32, f32);

fn clipped_box(img: &RgbaImage, points: &[P], pad: f32) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = img.dimensions();
    let min_x = points.iter().map(|p| p.0).fold(f32::INFINITY, f32::min) - pad;
    let max_x = points.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max) + pad;
    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min) - pad;
    let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max) + pad;

    if max_x < 0.0 || max_y < 0.0 || min_x >= w as f32 || min_y >= h as f32 {
        return None;
    }

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil() as u32).min(w - 1);
    let y1 = (max_y.ceil() as u32).min(h - 1);
    Some((x0, y0, x1, y1))
}

fn fill_segment(img: &mut RgbaImage, a: P, b: P, radius: f32) {
    let Some((x0, y0, x1, y1)) = clipped_box(img, &[a, b], radius) else {
        return;
    };

    let r2 = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if dist2_to_segment((x as f32, y as f32), a, b) <= r2 {
                img.put_pixel(x, y, image::Rgba(ARROW_RGBA));
            }
        }
    }
}

fn dist2_to_segment(p: P, a: P, b: P) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * abx - p.0, a.1 + t * aby - p.1);
    cx * cx + cy * cy
}

fn fill_triangle(img: &mut RgbaImage, p0: P, p1: P, p2: P) {
    let area = edge(p0, p1, p2);
    if area == 0.0 {
        // Degenerate head (collinear points); the shaft already covers it.
        return;
    }
    let Some((x0, y0, x1, y1)) = clipped_box(img, &[p0, p1, p2], 0.0) else {
        return;
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = (x as f32, y as f32);
            let w0 = edge(p1, p2, p);
            let w1 = edge(p2, p0, p);
            let w2 = edge(p0, p1, p);
            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if inside {
                img.put_pixel(x, y, image::Rgba(ARROW_RGBA));
            }
        }
    }
}

fn edge(a: P, b: P, c: P) -> f32 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]))
    }

    fn is_arrow_px(img: &RgbaImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y).0 == ARROW_RGBA
    }

    #[test]
    fn horizontal_arrow_paints_shaft_and_head() {
        let mut img = white(100, 100);
        draw_arrow(
            &mut img,
            ArrowSpec {
                start_x: 10,
                start_y: 50,
                end_x: 90,
                end_y: 50,
            },
        );

        // Shaft midpoint, minimum width of 3 centered on the line.
        assert!(is_arrow_px(&img, 50, 50));
        assert!(is_arrow_px(&img, 50, 49));
        assert!(is_arrow_px(&img, 50, 51));
        // Head fills behind the tip, wider than the shaft.
        assert!(is_arrow_px(&img, 85, 50));
        assert!(is_arrow_px(&img, 85, 48));
        assert!(is_arrow_px(&img, 85, 52));
        // Far corner untouched.
        assert!(!is_arrow_px(&img, 5, 5));
    }

    #[test]
    fn offscreen_endpoints_are_clipped() {
        let mut img = white(32, 32);
        draw_arrow(
            &mut img,
            ArrowSpec {
                start_x: -100,
                start_y: 16,
                end_x: 200,
                end_y: 16,
            },
        );
        assert!(is_arrow_px(&img, 16, 16));

        // Entirely off-canvas: no panic, no pixels.
        let mut clean = white(32, 32);
        draw_arrow(
            &mut clean,
            ArrowSpec {
                start_x: -100,
                start_y: -50,
                end_x: -10,
                end_y: -5,
            },
        );
        assert!(clean.pixels().all(|px| px.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn zero_length_arrow_paints_a_dot() {
        let mut img = white(64, 64);
        draw_arrow(
            &mut img,
            ArrowSpec {
                start_x: 32,
                start_y: 32,
                end_x: 32,
                end_y: 32,
            },
        );
        assert!(is_arrow_px(&img, 32, 32));
    }

    #[test]
    fn empty_image_is_a_noop() {
        let mut img = RgbaImage::new(0, 0);
        draw_arrow(
            &mut img,
            ArrowSpec {
                start_x: 0,
                start_y: 0,
                end_x: 10,
                end_y: 10,
            },
        );
    }
}

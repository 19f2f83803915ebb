// src/annotation.rs
//
// Visual overlay of the analysis result: hazard-region outlines plus a
// color-coded score badge. Runs after scoring, since the badge needs the
// final number. The category masks are only read here, never mutated.
//
// The badge mirrors the usual pill layout (dark background, colored accent
// bar, light text) but renders the numeric score as seven-segment style
// glyphs drawn from filled rectangles, so the crate carries no font asset.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Colors used for annotation (RGB).
pub mod colors {
    use image::Rgb;

    pub const SAFE_GREEN: Rgb<u8> = Rgb([0, 200, 60]);
    pub const CAUTION_AMBER: Rgb<u8> = Rgb([240, 180, 0]);
    pub const DANGER_RED: Rgb<u8> = Rgb([220, 40, 0]);

    pub const CONTOUR: Rgb<u8> = Rgb([255, 0, 0]);
    pub const BADGE_BG: Rgb<u8> = Rgb([15, 15, 15]);
    pub const BADGE_TEXT: Rgb<u8> = Rgb([230, 230, 230]);
}

const BADGE_X: i32 = 12;
const BADGE_Y: i32 = 12;
const BADGE_PAD: i32 = 4;
const ACCENT_BAR_WIDTH: i32 = 3;

// Glyph cell geometry for the seven-segment renderer.
const GLYPH_W: i32 = 10;
const GLYPH_H: i32 = 16;
const GLYPH_T: i32 = 2;
const GLYPH_GAP: i32 = 3;

/// Badge color for a final score: green >= 85, amber 70-85, red below 70.
pub fn score_color(score: f64) -> Rgb<u8> {
    if score >= 85.0 {
        colors::SAFE_GREEN
    } else if score >= 70.0 {
        colors::CAUTION_AMBER
    } else {
        colors::DANGER_RED
    }
}

/// Draw hazard outlines and the score badge on a copy of the working image.
pub fn annotate(
    working: &RgbImage,
    rust_mask: &GrayImage,
    dark_mask: &GrayImage,
    score: f64,
) -> RgbImage {
    let mut output = working.clone();

    // Union of the hazard masks; the inputs stay untouched.
    let union = GrayImage::from_fn(working.width(), working.height(), |x, y| {
        let r = rust_mask.get_pixel(x, y).0[0];
        let d = dark_mask.get_pixel(x, y).0[0];
        Luma([r.max(d)])
    });

    // External contours only: outlines of connected hazard regions.
    let contours = find_contours::<i32>(&union);
    for contour in contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
    {
        draw_contour_outline(&mut output, &contour.points);
    }

    draw_score_badge(&mut output, score);
    output
}

fn draw_contour_outline(output: &mut RgbImage, points: &[imageproc::point::Point<i32>]) {
    if points.len() < 2 {
        if let Some(p) = points.first() {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < output.width() && (p.y as u32) < output.height()
            {
                output.put_pixel(p.x as u32, p.y as u32, colors::CONTOUR);
            }
        }
        return;
    }

    for pair in points.windows(2) {
        draw_line_segment_mut(
            output,
            (pair[0].x as f32, pair[0].y as f32),
            (pair[1].x as f32, pair[1].y as f32),
            colors::CONTOUR,
        );
    }
    // Close the polyline.
    let first = points[0];
    let last = points[points.len() - 1];
    draw_line_segment_mut(
        output,
        (last.x as f32, last.y as f32),
        (first.x as f32, first.y as f32),
        colors::CONTOUR,
    );
}

/// Draw the score badge: dark background, colored accent bar, and the score
/// rendered as "NN.N/100". All drawing clips to the image bounds.
fn draw_score_badge(output: &mut RgbImage, score: f64) {
    let text = format!("{:.1}/100", score);
    let text_width: i32 = text.chars().map(glyph_advance).sum::<i32>() - GLYPH_GAP;

    let bg_x = BADGE_X - BADGE_PAD;
    let bg_y = BADGE_Y - BADGE_PAD;
    let bg_w = (ACCENT_BAR_WIDTH + BADGE_PAD + text_width + BADGE_PAD * 2) as u32;
    let bg_h = (GLYPH_H + BADGE_PAD * 2) as u32;

    draw_filled_rect_mut(
        output,
        Rect::at(bg_x, bg_y).of_size(bg_w, bg_h),
        colors::BADGE_BG,
    );
    draw_filled_rect_mut(
        output,
        Rect::at(bg_x, bg_y).of_size(ACCENT_BAR_WIDTH as u32, bg_h),
        score_color(score),
    );

    let mut x = BADGE_X + ACCENT_BAR_WIDTH + BADGE_PAD;
    for ch in text.chars() {
        draw_glyph(output, ch, x, BADGE_Y);
        x += glyph_advance(ch);
    }
}

fn glyph_advance(ch: char) -> i32 {
    match ch {
        '.' => GLYPH_T + GLYPH_GAP,
        _ => GLYPH_W + GLYPH_GAP,
    }
}

// Seven-segment layout, bit per segment:
//
//      aaa        a = 0x01   b = 0x02   c = 0x04   d = 0x08
//     f   b       e = 0x10   f = 0x20   g = 0x40
//      ggg
//     e   c
//      ddd
fn segment_bits(digit: u8) -> u8 {
    match digit {
        0 => 0x3f,
        1 => 0x06,
        2 => 0x5b,
        3 => 0x4f,
        4 => 0x66,
        5 => 0x6d,
        6 => 0x7d,
        7 => 0x07,
        8 => 0x7f,
        9 => 0x6f,
        _ => 0,
    }
}

fn draw_glyph(output: &mut RgbImage, ch: char, x: i32, y: i32) {
    let half = GLYPH_H / 2;
    match ch {
        '0'..='9' => {
            let bits = segment_bits(ch as u8 - b'0');
            let mut seg = |on: bool, rx: i32, ry: i32, rw: i32, rh: i32| {
                if on {
                    draw_filled_rect_mut(
                        output,
                        Rect::at(x + rx, y + ry).of_size(rw as u32, rh as u32),
                        colors::BADGE_TEXT,
                    );
                }
            };
            seg(bits & 0x01 != 0, 0, 0, GLYPH_W, GLYPH_T); // a: top
            seg(bits & 0x02 != 0, GLYPH_W - GLYPH_T, 0, GLYPH_T, half); // b: upper right
            seg(bits & 0x04 != 0, GLYPH_W - GLYPH_T, half, GLYPH_T, half); // c: lower right
            seg(bits & 0x08 != 0, 0, GLYPH_H - GLYPH_T, GLYPH_W, GLYPH_T); // d: bottom
            seg(bits & 0x10 != 0, 0, half, GLYPH_T, half); // e: lower left
            seg(bits & 0x20 != 0, 0, 0, GLYPH_T, half); // f: upper left
            seg(bits & 0x40 != 0, 0, half - GLYPH_T / 2, GLYPH_W, GLYPH_T); // g: middle
        }
        '.' => {
            draw_filled_rect_mut(
                output,
                Rect::at(x, y + GLYPH_H - GLYPH_T).of_size(GLYPH_T as u32, GLYPH_T as u32),
                colors::BADGE_TEXT,
            );
        }
        '/' => {
            draw_line_segment_mut(
                output,
                ((x + GLYPH_W - 1) as f32, y as f32),
                (x as f32, (y + GLYPH_H - 1) as f32),
                colors::BADGE_TEXT,
            );
            draw_line_segment_mut(
                output,
                ((x + GLYPH_W) as f32, y as f32),
                ((x + 1) as f32, (y + GLYPH_H - 1) as f32),
                colors::BADGE_TEXT,
            );
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_thresholds() {
        assert_eq!(score_color(97.0), colors::SAFE_GREEN);
        assert_eq!(score_color(85.0), colors::SAFE_GREEN);
        assert_eq!(score_color(84.9), colors::CAUTION_AMBER);
        assert_eq!(score_color(70.0), colors::CAUTION_AMBER);
        assert_eq!(score_color(69.9), colors::DANGER_RED);
        assert_eq!(score_color(0.0), colors::DANGER_RED);
    }

    #[test]
    fn test_annotate_preserves_dimensions() {
        let working = RgbImage::from_pixel(64, 48, Rgb([128, 128, 128]));
        let empty = GrayImage::new(64, 48);
        let annotated = annotate(&working, &empty, &empty, 97.0);
        assert_eq!(annotated.dimensions(), (64, 48));
    }

    #[test]
    fn test_hazard_region_gets_outlined() {
        let working = RgbImage::from_pixel(64, 64, Rgb([128, 128, 128]));
        let mut mask = GrayImage::new(64, 64);
        for y in 35..55 {
            for x in 35..55 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        let empty = GrayImage::new(64, 64);
        let annotated = annotate(&working, &mask, &empty, 50.0);

        // Somewhere around the region boundary must be a contour pixel.
        let outlined = (30..60).any(|y| {
            (30..60).any(|x| *annotated.get_pixel(x, y) == colors::CONTOUR)
        });
        assert!(outlined, "expected contour pixels around the hazard region");
    }

    #[test]
    fn test_union_does_not_mutate_masks() {
        let working = RgbImage::from_pixel(32, 32, Rgb([100, 100, 100]));
        let mut rust_mask = GrayImage::new(32, 32);
        rust_mask.put_pixel(10, 10, Luma([255]));
        let dark_mask = GrayImage::new(32, 32);
        let rust_before = rust_mask.clone();

        let _ = annotate(&working, &rust_mask, &dark_mask, 80.0);
        assert_eq!(rust_mask, rust_before);
    }

    #[test]
    fn test_badge_drawn_on_tiny_image_without_panic() {
        let working = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        let empty = GrayImage::new(1, 1);
        let annotated = annotate(&working, &empty, &empty, 12.3);
        assert_eq!(annotated.dimensions(), (1, 1));
    }

    #[test]
    fn test_badge_accent_matches_verdict_color() {
        let working = RgbImage::from_pixel(128, 64, Rgb([128, 128, 128]));
        let empty = GrayImage::new(128, 64);
        let annotated = annotate(&working, &empty, &empty, 30.0);
        // Accent bar sits at the badge's left edge.
        let accent = *annotated.get_pixel((BADGE_X - BADGE_PAD) as u32, BADGE_Y as u32);
        assert_eq!(accent, colors::DANGER_RED);
    }
}

use crate::effects::clip::ClipRegion;
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied `src` onto `dst`, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Whole-buffer source-over; both buffers must be the same length.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> RenderResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RenderError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    let op = unit_to_u8(opacity);
    if op == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = if op == 255 {
            premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]])
        } else {
            over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity)
        };
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Draw `src` onto `dst` at identity placement, restricted to `region`.
///
/// `src` may be smaller or larger than `dst`; missing pixels read as transparent.
pub(crate) fn draw_clipped(
    dst: &mut FrameRGBA,
    src: &FrameRGBA,
    region: &ClipRegion,
    opacity: f32,
) {
    if matches!(region, ClipRegion::Empty) || unit_to_u8(opacity) == 0 {
        return;
    }
    let width = dst.width;
    for y in 0..dst.height {
        for (x0, x1) in region.row_spans(y, width) {
            for x in x0..x1 {
                let sp = src.pixel(i64::from(x), i64::from(y));
                if sp[3] == 0 {
                    continue;
                }
                let dp = dst.pixel(i64::from(x), i64::from(y));
                dst.set_pixel(x, y, over(dp, sp, opacity));
            }
        }
    }
}

/// Draw `src` scaled by `scale` about the frame center, then translated by `(dx, dy)`.
///
/// Nearest-neighbor sampling; pixels mapping outside `src` are skipped.
pub(crate) fn draw_transformed(
    dst: &mut FrameRGBA,
    src: &FrameRGBA,
    scale: f64,
    dx: f64,
    dy: f64,
    opacity: f32,
) {
    if scale <= 1e-6 || unit_to_u8(opacity) == 0 {
        return;
    }
    let cx = f64::from(src.width) / 2.0;
    let cy = f64::from(src.height) / 2.0;
    for y in 0..dst.height {
        let sy = cy + (f64::from(y) + 0.5 - dy - cy) / scale - 0.5;
        let sy = sy.round() as i64;
        for x in 0..dst.width {
            let sx = cx + (f64::from(x) + 0.5 - dx - cx) / scale - 0.5;
            let sp = src.pixel(sx.round() as i64, sy);
            if sp[3] == 0 {
                continue;
            }
            let dp = dst.pixel(i64::from(x), i64::from(y));
            dst.set_pixel(x, y, over(dp, sp, opacity));
        }
    }
}

pub(crate) fn premul_over_px(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3] as u16;
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;

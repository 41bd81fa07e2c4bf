//! Region extraction with padding.

use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_region_model::{blank_frame, CaptureRegion, Frame, MAX_REGION_SIZE};

const CHANNELS: usize = 3;

/// Cut `region` out of `full`.
///
/// The result is always `region.width` x `region.height` (negative sizes
/// count as zero). The part of the region that overlaps the source is
/// copied into the top-left of a black frame; everything else stays black.
/// A region entirely off the source yields an all-black frame.
///
/// Fails without allocating when either side exceeds [`MAX_REGION_SIZE`].
pub fn extract_region(full: &Frame, region: &CaptureRegion) -> RegioncastResult<Frame> {
    if region.width > MAX_REGION_SIZE || region.height > MAX_REGION_SIZE {
        return Err(RegioncastError::capture(format!(
            "Region {}x{} exceeds the {MAX_REGION_SIZE} pixel limit",
            region.width, region.height
        )));
    }
    let mut out = blank_frame(region.width, region.height);

    let Some((x0, y0, x1, y1)) = region.intersect(full.width(), full.height()) else {
        return Ok(out);
    };

    let copy_width = (x1 - x0) as usize;
    let src_stride = full.width() as usize * CHANNELS;
    let dst_stride = out.width() as usize * CHANNELS;
    let row_bytes = copy_width * CHANNELS;

    let src = full.as_raw();
    for (dst_row, src_y) in out
        .chunks_exact_mut(dst_stride)
        .zip(y0 as usize..y1 as usize)
    {
        let start = src_y * src_stride + x0 as usize * CHANNELS;
        dst_row[..row_bytes].copy_from_slice(&src[start..start + row_bytes]);
    }

    Ok(out)
}

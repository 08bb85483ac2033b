// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Plane-to-packed-pixel conversion.
//!
//! Camera hardware exposes the three 4:2:0 planes with implementation
//! defined padding, so the converter tolerates arbitrary row and pixel
//! stride combinations while keeping a block-copy fast path for the
//! dominant tightly packed layout. Consistency checks run as debug
//! assertions only; release builds trust the capture layer's plane
//! geometry unconditionally.

use crate::frame::FrameView;

/// Chroma channel ordering of the packed semi-planar output.
///
/// The leading channel of each chroma pair is part of the format and must
/// not be swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaOrder {
    /// V leads each pair (NV21, the Android analysis layout).
    CrFirst,
    /// U leads each pair (NV12).
    CbFirst,
}

/// Convert a frame to NV21: full-resolution luma followed by interleaved
/// VU pairs.
pub fn nv21(frame: &FrameView) -> Vec<u8> {
    to_semi_planar(frame, ChromaOrder::CrFirst)
}

/// Convert a frame to NV12: full-resolution luma followed by interleaved
/// UV pairs.
pub fn nv12(frame: &FrameView) -> Vec<u8> {
    to_semi_planar(frame, ChromaOrder::CbFirst)
}

/// Pack a three-plane frame into a single tightly packed semi-planar
/// buffer of exactly `width * height * 3 / 2` bytes.
///
/// Pure and synchronous; the only allocation is the output buffer, and no
/// plane reference is retained past return.
pub fn to_semi_planar(frame: &FrameView, order: ChromaOrder) -> Vec<u8> {
    debug_assert_eq!(frame.y.pixel_stride, 1);
    debug_assert_eq!(frame.u.row_stride, frame.v.row_stride);
    debug_assert_eq!(frame.u.pixel_stride, frame.v.pixel_stride);

    let width = frame.width;
    let height = frame.height;
    let luma_size = width * height;
    let chroma_size = luma_size / 2;
    let mut out = Vec::with_capacity(luma_size + chroma_size);

    if frame.y.row_stride == width {
        out.extend_from_slice(&frame.y.data[..luma_size]);
    } else {
        // Strip the per-row padding so the output stays tightly packed.
        for row in 0..height {
            let start = row * frame.y.row_stride;
            out.extend_from_slice(&frame.y.data[start..start + width]);
        }
        debug_assert_eq!(out.len(), luma_size);
    }

    let (lead, trail) = match order {
        ChromaOrder::CrFirst => (&frame.v, &frame.u),
        ChromaOrder::CbFirst => (&frame.u, &frame.v),
    };

    if lead.row_stride == width && lead.pixel_stride == 2 {
        // The planes are already interleaved in memory with the trailing
        // plane overlaying the leading one at +1: one byte from the lead,
        // the rest from the trail.
        debug_assert_eq!(lead.data.len(), chroma_size - 1);
        out.push(lead.data[0]);
        out.extend_from_slice(&trail.data[..chroma_size - 1]);
        // Cross-check that both planes agree at the interleave boundary.
        debug_assert_eq!(trail.data[0], lead.data[1]);
    } else {
        for row in 0..height / 2 {
            for col in 0..width / 2 {
                out.push(lead.sample(row, col));
                out.push(trail.sample(row, col));
            }
        }
        debug_assert_eq!(out.len(), luma_size + chroma_size);
    }

    out
}

/// Raw Y+U+V byte concatenation, keeping whatever padding the planes
/// carry.
pub fn concat_planes(frame: &FrameView) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(frame.y.data.len() + frame.u.data.len() + frame.v.data.len());
    out.extend_from_slice(frame.y.data);
    out.extend_from_slice(frame.u.data);
    out.extend_from_slice(frame.v.data);
    out
}

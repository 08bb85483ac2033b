// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use unix_ts::Timestamp;

/// Read-only strided view of one image channel.
///
/// `row_stride` is the number of bytes between vertically adjacent samples
/// and `pixel_stride` the number of bytes between horizontally adjacent
/// samples within a row. The capture layer guarantees the buffer covers
/// `row_stride * (rows - 1) + pixel_stride * (cols - 1) + 1` bytes; a
/// shorter buffer is an upstream contract violation, not something this
/// crate repairs.
#[derive(Clone, Copy)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl Plane<'_> {
    /// Sample at the given plane coordinates, honoring both strides.
    pub fn sample(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.row_stride + col * self.pixel_stride]
    }
}

/// A borrowed YUV 4:2:0 frame as delivered by the capture layer.
///
/// The luma plane is full resolution, the chroma planes half resolution in
/// both dimensions. Views are only valid for the duration of the analysis
/// callback that produced them and must not be retained past it.
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub y: Plane<'a>,
    pub u: Plane<'a>,
    pub v: Plane<'a>,
}

/// One channel of an owned frame.
#[derive(Debug, Clone)]
pub struct PlaneBuf {
    pub data: Vec<u8>,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl PlaneBuf {
    pub fn view(&self) -> Plane<'_> {
        Plane {
            data: &self.data,
            row_stride: self.row_stride,
            pixel_stride: self.pixel_stride,
        }
    }
}

/// An owned YUV 4:2:0 frame.
///
/// Frames are transient single-use values; ownership exists only so they
/// can cross the delivery channel, and the consumer drops them once
/// converted.
pub struct Yuv420Frame {
    pub width: usize,
    pub height: usize,
    pub y: PlaneBuf,
    pub u: PlaneBuf,
    pub v: PlaneBuf,
    pub timestamp: Timestamp,
}

impl Yuv420Frame {
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            width: self.width,
            height: self.height,
            y: self.y.view(),
            u: self.u.view(),
            v: self.v.view(),
        }
    }
}

impl fmt::Display for Yuv420Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} @{}.{:03}",
            self.width,
            self.height,
            self.timestamp.seconds(),
            self.timestamp.subsec(3)
        )
    }
}

/// Current wall-clock time as a unix timestamp.
pub fn timestamp_now() -> Timestamp {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Timestamp::new(now.as_secs() as i64, now.subsec_nanos())
}

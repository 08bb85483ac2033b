// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Seam to the native camera stack.
//!
//! Everything behind [`CameraBackend`] is the platform's job: sensor
//! control, the image pipeline, torch hardware, still-image encoding. The
//! session layer only drives the trait. A synthetic implementation for
//! offline use lives in [`testing`](crate::testing).

use crate::{error::CameraError, frame::Yuv420Frame, session::CameraEvent};
use core::fmt;
use kanal::{Receiver, Sender};

/// Camera permission as reported by the platform.
///
/// Denied cannot be distinguished from never-asked without issuing a
/// request, so only two states are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    NotDetermined = 0,
    Authorized = 1,
}

/// Which way the selected camera faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensFacing {
    Front = 0,
    Back = 1,
}

impl LensFacing {
    /// Map a bridge lens id to a lens, matching the platform constants
    /// (0 = front, 1 = back).
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(LensFacing::Front),
            1 => Some(LensFacing::Back),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        *self as i64
    }
}

impl fmt::Display for LensFacing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LensFacing::Front => f.write_str("front"),
            LensFacing::Back => f.write_str("back"),
        }
    }
}

/// What a successful bind reports about the camera that came up.
#[derive(Debug, Clone, Copy)]
pub struct BoundCamera {
    /// Preview surface handle registered with the bridge texture registry.
    pub texture_id: i64,
    /// Negotiated preview width in sensor orientation.
    pub width: u32,
    /// Negotiated preview height in sensor orientation.
    pub height: u32,
    /// Rotation of the sensor relative to the display.
    pub sensor_rotation_degrees: u32,
    /// Whether the camera has a flash unit.
    pub torchable: bool,
}

/// Still-capture metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureRequest {
    /// Mirror the image, set when capturing through the front lens.
    pub reversed_horizontal: bool,
}

/// Channels a bound camera pushes into for the duration of the binding.
///
/// Frame delivery is keep-only-latest: the queue holds a single frame and
/// [`send_frame`](Self::send_frame) evicts the stale one when the consumer
/// has not kept up, so a lagging consumer never accumulates a backlog. The
/// sink is dropped when the binding goes away.
pub struct FrameSink {
    frames: Sender<Yuv420Frame>,
    stale: Receiver<Yuv420Frame>,
    pub events: Sender<CameraEvent>,
}

impl FrameSink {
    /// Create a sink and the consumer end of its frame stream.
    pub fn new(events: Sender<CameraEvent>) -> (Self, Receiver<Yuv420Frame>) {
        let (frames, rx) = kanal::bounded(1);
        let sink = Self {
            frames,
            stale: rx.clone(),
            events,
        };
        (sink, rx)
    }

    /// Deliver a frame, replacing an undelivered previous frame. Returns
    /// false when the frame stream has been closed.
    pub fn send_frame(&self, frame: Yuv420Frame) -> bool {
        if self.frames.is_full() {
            // The consumer never took the previous frame; it is stale now.
            let _ = self.stale.try_recv();
        }
        self.frames.try_send(frame).is_ok()
    }
}

/// The native camera stack as seen by the session layer.
pub trait CameraBackend {
    fn permission_state(&self) -> PermissionState;

    /// Ask the platform for camera permission and return the decision.
    fn request_permission(&mut self) -> Result<bool, CameraError>;

    /// Whether a camera with the given lens facing exists on this device.
    fn has_camera(&self, lens: LensFacing) -> bool;

    /// Bind the camera for `lens`, pushing frames and events into `sink`
    /// until [`unbind`](Self::unbind).
    fn bind(&mut self, lens: LensFacing, sink: FrameSink) -> Result<BoundCamera, CameraError>;

    fn unbind(&mut self);

    fn set_torch(&mut self, on: bool) -> Result<(), CameraError>;

    /// Capture a still image, returning the encoded bytes.
    fn capture_still(&mut self, request: CaptureRequest) -> Result<Vec<u8>, CameraError>;
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Explicit camera session state machine.
//!
//! The session is either unbound or bound to one lens with a known torch
//! state. Every transition (`open`, `close`, `switch_lens`, `set_torch`)
//! and every relay (`take_picture`, permission queries) returns a typed
//! result instead of mutating shared fields behind callbacks.

use crate::{
    backend::{BoundCamera, CameraBackend, CaptureRequest, FrameSink, LensFacing, PermissionState},
    error::CameraError,
    frame::{timestamp_now, Yuv420Frame},
};
use kanal::{Receiver, Sender};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

const PHOTO_EXTENSION: &str = "jpg";

/// Torch state, numbered to match the platform constants (OFF = 0,
/// ON = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchState {
    Off = 0,
    On = 1,
}

impl From<bool> for TorchState {
    fn from(on: bool) -> Self {
        if on {
            TorchState::On
        } else {
            TorchState::Off
        }
    }
}

/// Events the bound camera reports back to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEvent {
    TorchState(TorchState),
}

/// The session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unbound,
    Bound {
        lens_facing: LensFacing,
        torch: TorchState,
    },
}

/// What `open` and `switch_lens` report back to the bridge.
#[derive(Debug, Clone, Copy)]
pub struct OpenInfo {
    pub texture_id: i64,
    /// Preview width in display orientation.
    pub width: f64,
    /// Preview height in display orientation.
    pub height: f64,
    pub torchable: bool,
}

/// A camera session over a [`CameraBackend`].
///
/// Holds the current binding, the lens preference that survives across
/// bindings, and the channels delivering frames and events from the
/// backend.
pub struct Session<B> {
    backend: B,
    state: SessionState,
    lens_facing: LensFacing,
    output_dir: PathBuf,
    event_tx: Sender<CameraEvent>,
    event_rx: Receiver<CameraEvent>,
    frame_rx: Option<Receiver<Yuv420Frame>>,
}

impl<B: CameraBackend> Session<B> {
    pub fn new(backend: B, output_dir: impl Into<PathBuf>) -> Self {
        let (event_tx, event_rx) = kanal::unbounded();
        Self {
            backend,
            state: SessionState::Unbound,
            lens_facing: LensFacing::Back,
            output_dir: output_dir.into(),
            event_tx,
            event_rx,
            frame_rx: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn lens_facing(&self) -> LensFacing {
        self.lens_facing
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn permission_state(&self) -> PermissionState {
        self.backend.permission_state()
    }

    pub fn request_permission(&mut self) -> Result<bool, CameraError> {
        self.backend.request_permission()
    }

    pub fn has_back_camera(&self) -> bool {
        self.backend.has_camera(LensFacing::Back)
    }

    pub fn has_front_camera(&self) -> bool {
        self.backend.has_camera(LensFacing::Front)
    }

    /// Receiver for the current binding's frame stream, if bound.
    pub fn frames(&self) -> Option<Receiver<Yuv420Frame>> {
        self.frame_rx.clone()
    }

    /// Receiver for the session event stream.
    pub fn events(&self) -> Receiver<CameraEvent> {
        self.event_rx.clone()
    }

    /// Bind the camera, optionally preselecting a lens. The preselect only
    /// takes effect when that camera exists on the device.
    pub fn open(&mut self, lens: Option<LensFacing>) -> Result<OpenInfo, CameraError> {
        if self.state != SessionState::Unbound {
            return Err(CameraError::AlreadyBound);
        }
        if let Some(lens) = lens {
            if self.backend.has_camera(lens) {
                self.lens_facing = lens;
            }
        }
        self.bind()
    }

    /// Unbind the camera and drop the frame stream.
    pub fn close(&mut self) -> Result<(), CameraError> {
        if self.state == SessionState::Unbound {
            return Err(CameraError::NotBound);
        }
        self.backend.unbind();
        self.frame_rx = None;
        self.state = SessionState::Unbound;
        debug!("camera unbound");
        Ok(())
    }

    /// Rebind with a different lens. Fails when that lens does not exist
    /// rather than silently keeping the current one.
    pub fn switch_lens(&mut self, lens: LensFacing) -> Result<OpenInfo, CameraError> {
        if self.state == SessionState::Unbound {
            return Err(CameraError::NotBound);
        }
        if !self.backend.has_camera(lens) {
            return Err(CameraError::LensUnavailable(lens));
        }
        // Must unbind before rebinding with the new selector.
        self.backend.unbind();
        self.frame_rx = None;
        self.state = SessionState::Unbound;
        self.lens_facing = lens;
        self.bind()
    }

    /// Relay a torch request to the backend and record it in the bound
    /// state. The backend observes the actual hardware torch and reports
    /// it on the event stream.
    pub fn set_torch(&mut self, torch: TorchState) -> Result<(), CameraError> {
        let SessionState::Bound { lens_facing, .. } = self.state else {
            return Err(CameraError::NotBound);
        };
        self.backend.set_torch(torch == TorchState::On)?;
        self.state = SessionState::Bound { lens_facing, torch };
        Ok(())
    }

    /// Capture a still image and write it to a timestamped file in the
    /// session's output directory, returning the saved path.
    pub fn take_picture(&mut self) -> Result<PathBuf, CameraError> {
        let SessionState::Bound { lens_facing, .. } = self.state else {
            return Err(CameraError::NotBound);
        };
        let request = CaptureRequest {
            // Mirror the image when using the front camera.
            reversed_horizontal: lens_facing == LensFacing::Front,
        };
        let bytes = self.backend.capture_still(request)?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.create_file();
        fs::write(&path, &bytes)?;
        debug!("photo capture succeeded: {}", path.display());
        Ok(path)
    }

    fn bind(&mut self) -> Result<OpenInfo, CameraError> {
        if !self.has_back_camera() && !self.has_front_camera() {
            return Err(CameraError::NoCameraAvailable);
        }
        // Keep-only-latest frame delivery: the sink's queue holds a single
        // frame, so a slow consumer never accumulates stale frames.
        let (sink, frame_rx) = FrameSink::new(self.event_tx.clone());
        let camera = self.backend.bind(self.lens_facing, sink)?;
        info!(
            "camera bound: {} lens {}x{} rotation {}",
            self.lens_facing, camera.width, camera.height, camera.sensor_rotation_degrees
        );
        self.frame_rx = Some(frame_rx);
        self.state = SessionState::Bound {
            lens_facing: self.lens_facing,
            torch: TorchState::Off,
        };
        Ok(open_info(&camera))
    }

    /// Timestamped capture file path in the output directory.
    fn create_file(&self) -> PathBuf {
        let ts = timestamp_now();
        self.output_dir.join(format!(
            "{}-{:03}.{}",
            ts.seconds(),
            ts.subsec(3),
            PHOTO_EXTENSION
        ))
    }
}

fn open_info(camera: &BoundCamera) -> OpenInfo {
    // The sensor reports its native orientation; swap the reported size
    // when the sensor is rotated relative to the display.
    let portrait = camera.sensor_rotation_degrees % 180 == 0;
    let (width, height) = if portrait {
        (camera.width, camera.height)
    } else {
        (camera.height, camera.width)
    };
    OpenInfo {
        texture_id: camera.texture_id,
        width: width as f64,
        height: height as f64,
        torchable: camera.torchable,
    }
}

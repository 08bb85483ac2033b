// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Synthetic camera backend for offline use.
//!
//! Stands in for the native camera stack in tests, benches, and the demo
//! service: produces gradient test frames from a pump thread while bound,
//! with configurable plane geometry so both converter paths get exercised.

use crate::{
    backend::{
        BoundCamera, CameraBackend, CaptureRequest, FrameSink, LensFacing, PermissionState,
    },
    convert::ChromaOrder,
    error::CameraError,
    frame::{timestamp_now, PlaneBuf, Yuv420Frame},
    session::{CameraEvent, TorchState},
};
use kanal::Sender;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::debug;

/// Payload returned by still capture; a JPEG SOI/EOI pair so downstream
/// file checks see a plausible image.
pub const CAPTURE_PAYLOAD: &[u8] = &[0xff, 0xd8, 0xff, 0xd9];

/// Shape of the synthetic camera.
#[derive(Debug, Clone)]
pub struct TestPatternConfig {
    pub width: usize,
    pub height: usize,
    pub frame_interval: Duration,
    /// Bytes of padding appended to each luma row. Non-zero forces the
    /// strided luma path in the converter.
    pub luma_padding: usize,
    /// Deliver chroma as two dense half-resolution planes instead of the
    /// interleaved fast-path layout.
    pub planar_chroma: bool,
    /// Which channel leads the interleaved chroma memory. Only meaningful
    /// when `planar_chroma` is unset.
    pub chroma_order: ChromaOrder,
    pub front_camera: bool,
    pub back_camera: bool,
    pub torchable: bool,
    /// Whether a permission request is granted.
    pub grant_permission: bool,
    pub sensor_rotation_degrees: u32,
}

impl Default for TestPatternConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_interval: Duration::from_millis(33),
            luma_padding: 0,
            planar_chroma: false,
            chroma_order: ChromaOrder::CrFirst,
            front_camera: true,
            back_camera: true,
            torchable: true,
            grant_permission: true,
            sensor_rotation_degrees: 90,
        }
    }
}

struct Pump {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Synthetic [`CameraBackend`].
pub struct TestPatternBackend {
    config: TestPatternConfig,
    permission: PermissionState,
    pump: Option<Pump>,
    events: Option<Sender<CameraEvent>>,
    next_texture_id: i64,
}

impl TestPatternBackend {
    pub fn new(config: TestPatternConfig) -> Self {
        Self {
            config,
            permission: PermissionState::NotDetermined,
            pump: None,
            events: None,
            next_texture_id: 1,
        }
    }

    fn stop_pump(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.running.store(false, Ordering::Relaxed);
            let _ = pump.handle.join();
        }
    }
}

impl CameraBackend for TestPatternBackend {
    fn permission_state(&self) -> PermissionState {
        self.permission
    }

    fn request_permission(&mut self) -> Result<bool, CameraError> {
        if self.config.grant_permission {
            self.permission = PermissionState::Authorized;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn has_camera(&self, lens: LensFacing) -> bool {
        match lens {
            LensFacing::Front => self.config.front_camera,
            LensFacing::Back => self.config.back_camera,
        }
    }

    fn bind(&mut self, lens: LensFacing, sink: FrameSink) -> Result<BoundCamera, CameraError> {
        if self.permission != PermissionState::Authorized {
            return Err(CameraError::PermissionDenied);
        }
        if !self.has_camera(lens) {
            return Err(CameraError::LensUnavailable(lens));
        }
        self.stop_pump();

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let config = self.config.clone();
        self.events = Some(sink.events.clone());
        let handle = thread::spawn(move || {
            let mut seq = 0u32;
            while flag.load(Ordering::Relaxed) {
                if !sink.send_frame(gradient_frame(&config, seq)) {
                    // Frame stream closed with the binding.
                    break;
                }
                seq = seq.wrapping_add(1);
                thread::sleep(config.frame_interval);
            }
        });
        self.pump = Some(Pump { running, handle });

        let texture_id = self.next_texture_id;
        self.next_texture_id += 1;
        debug!("test pattern bound: {} lens, texture {}", lens, texture_id);
        Ok(BoundCamera {
            texture_id,
            width: self.config.width as u32,
            height: self.config.height as u32,
            sensor_rotation_degrees: self.config.sensor_rotation_degrees,
            torchable: self.config.torchable,
        })
    }

    fn unbind(&mut self) {
        self.stop_pump();
        self.events = None;
        debug!("test pattern unbound");
    }

    fn set_torch(&mut self, on: bool) -> Result<(), CameraError> {
        if self.pump.is_none() {
            return Err(CameraError::NotBound);
        }
        if !self.config.torchable {
            return Err(CameraError::Backend("camera has no flash unit".into()));
        }
        if let Some(events) = &self.events {
            let _ = events.send(CameraEvent::TorchState(TorchState::from(on)));
        }
        Ok(())
    }

    fn capture_still(&mut self, request: CaptureRequest) -> Result<Vec<u8>, CameraError> {
        if self.pump.is_none() {
            return Err(CameraError::NotBound);
        }
        debug!("capturing still, mirrored: {}", request.reversed_horizontal);
        Ok(CAPTURE_PAYLOAD.to_vec())
    }
}

impl Drop for TestPatternBackend {
    fn drop(&mut self) {
        self.stop_pump();
    }
}

/// Build one gradient frame with the configured plane geometry.
///
/// The luma value walks with `seq` so consecutive frames differ; the
/// chroma planes carry a fixed gradient. With `planar_chroma` unset the
/// chroma planes are two overlapping views of one VU interleave, the
/// layout the converter fast path expects.
pub fn gradient_frame(config: &TestPatternConfig, seq: u32) -> Yuv420Frame {
    let (width, height) = (config.width, config.height);
    let y_stride = width + config.luma_padding;

    let mut y = vec![0u8; y_stride * height];
    for row in 0..height {
        for col in 0..width {
            y[row * y_stride + col] = (row + col + seq as usize) as u8;
        }
    }

    let chroma_value = |row: usize, col: usize, offset: usize| (row + 2 * col + offset) as u8;
    let (u, v) = if config.planar_chroma {
        let half = (width / 2) * (height / 2);
        let mut u = vec![0u8; half];
        let mut v = vec![0u8; half];
        for row in 0..height / 2 {
            for col in 0..width / 2 {
                u[row * (width / 2) + col] = chroma_value(row, col, 64);
                v[row * (width / 2) + col] = chroma_value(row, col, 192);
            }
        }
        (
            PlaneBuf {
                data: u,
                row_stride: width / 2,
                pixel_stride: 1,
            },
            PlaneBuf {
                data: v,
                row_stride: width / 2,
                pixel_stride: 1,
            },
        )
    } else {
        let chroma_size = width * height / 2;
        let mut packed = vec![0u8; chroma_size];
        for row in 0..height / 2 {
            for col in 0..width / 2 {
                let index = 2 * (row * (width / 2) + col);
                let (lead, trail) = match config.chroma_order {
                    ChromaOrder::CrFirst => (192, 64),
                    ChromaOrder::CbFirst => (64, 192),
                };
                packed[index] = chroma_value(row, col, lead);
                packed[index + 1] = chroma_value(row, col, trail);
            }
        }
        // The trailing plane overlays the leading one at +1, exactly the
        // layout the converter fast path expects.
        let leading = PlaneBuf {
            data: packed[..chroma_size - 1].to_vec(),
            row_stride: width,
            pixel_stride: 2,
        };
        let trailing = PlaneBuf {
            data: packed[1..].to_vec(),
            row_stride: width,
            pixel_stride: 2,
        };
        match config.chroma_order {
            ChromaOrder::CrFirst => (trailing, leading),
            ChromaOrder::CbFirst => (leading, trailing),
        }
    };

    Yuv420Frame {
        width,
        height,
        y: PlaneBuf {
            data: y,
            row_stride: y_stride,
            pixel_stride: 1,
        },
        u,
        v,
        timestamp: timestamp_now(),
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # Camera Works Library
//!
//! Session and conversion layer for bridging a platform camera stack to a
//! framework bridge. The native stack sits behind the
//! [`CameraBackend`](backend::CameraBackend) trait; this crate owns what
//! is left once the hardware is external:
//!
//! - **Pixel conversion**: packing strided three-plane YUV 4:2:0 frames
//!   into the NV21/NV12 semi-planar layouts, with a block-copy fast path
//!   for the common tightly packed geometry.
//! - **Session state machine**: an explicit `Unbound` / `Bound` session
//!   with typed transitions for open, close, lens switching, torch control
//!   and still capture.
//! - **Bridge dispatch**: translating method-call payloads into session
//!   operations and camera events into event-sink messages.
//!
//! Frames and events are delivered over channels rather than callbacks, so
//! consumers decide their own threading. A synthetic backend in
//! [`testing`] stands in for the hardware during tests and benches.
//!
//! ## Example
//!
//! ```no_run
//! use camera_works::convert;
//! use camera_works::session::Session;
//! use camera_works::testing::{TestPatternBackend, TestPatternConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = TestPatternBackend::new(TestPatternConfig::default());
//! let mut session = Session::new(backend, "/tmp/photos");
//! session.request_permission()?;
//!
//! session.open(None)?;
//! let frames = session.frames().expect("bound session delivers frames");
//! let frame = frames.recv()?;
//! let packed = convert::nv21(&frame.view());
//! assert_eq!(packed.len(), frame.width * frame.height * 3 / 2);
//! session.close()?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod convert;
pub mod error;
pub mod frame;
pub mod handler;
pub mod session;
pub mod testing;

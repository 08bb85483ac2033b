// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::backend::LensFacing;
use thiserror::Error;

/// Bridge error code reported for camera failures.
pub const ERROR_CODE: &str = "CAMERA_ERROR";

/// Typed failure for every session transition and relay operation.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera session is not bound")]
    NotBound,
    #[error("camera session is already bound")]
    AlreadyBound,
    #[error("back and front camera are unavailable")]
    NoCameraAvailable,
    #[error("no {0} camera on this device")]
    LensUnavailable(LensFacing),
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("backend error: {0}")]
    Backend(String),
    #[error("photo capture failed: {0}")]
    Capture(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("bad arguments: {0}")]
    BadArguments(&'static str),
    #[error("method not implemented: {0}")]
    NotImplemented(String),
}

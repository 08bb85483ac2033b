// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Bridge method dispatch.
//!
//! Translates method-call messages arriving from the framework bridge into
//! session operations and renders session results and events back into
//! bridge payloads.

use crate::{
    backend::{CameraBackend, LensFacing},
    error::{CameraError, ERROR_CODE},
    session::{CameraEvent, OpenInfo, Session, TorchState},
};
use core::fmt;
use serde_json::{json, Value};

/// A method invocation arriving from the framework bridge.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Error envelope returned to the bridge.
#[derive(Debug)]
pub struct BridgeError {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

impl From<CameraError> for BridgeError {
    fn from(err: CameraError) -> Self {
        let code = match err {
            CameraError::NotImplemented(_) => "NOT_IMPLEMENTED",
            _ => ERROR_CODE,
        };
        BridgeError {
            code,
            message: err.to_string(),
            details: Value::Null,
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BridgeError {}

/// Dispatches bridge method calls onto a [`Session`].
pub struct MethodHandler<B> {
    session: Session<B>,
}

impl<B: CameraBackend> MethodHandler<B> {
    pub fn new(session: Session<B>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session<B> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<B> {
        &mut self.session
    }

    pub fn into_session(self) -> Session<B> {
        self.session
    }

    /// Handle one bridge method call, returning the success payload or the
    /// bridge error envelope.
    pub fn on_method_call(&mut self, call: &MethodCall) -> Result<Value, BridgeError> {
        let reply = match call.method.as_str() {
            "state" => json!(self.session.permission_state() as i64),
            "requestPermission" => json!(self.session.request_permission()?),
            "start" => {
                let info = self.session.open(lens_argument(&call.arguments))?;
                start_reply(&info)
            }
            "setFlash" => {
                let torch = TorchState::from(call.arguments == json!(1));
                self.session.set_torch(torch)?;
                json!(true)
            }
            "hasBackCamera" => json!(self.session.has_back_camera()),
            "hasFrontCamera" => json!(self.session.has_front_camera()),
            "switchCamera" => {
                let lens = lens_argument(&call.arguments)
                    .ok_or(CameraError::BadArguments("camera id is not a lens id"))?;
                self.session.switch_lens(lens)?;
                json!(true)
            }
            "stop" => {
                self.session.close()?;
                json!(true)
            }
            "takePicture" => json!(self.session.take_picture()?.to_string_lossy()),
            other => return Err(CameraError::NotImplemented(other.to_string()).into()),
        };
        Ok(reply)
    }
}

/// Render a session event into the bridge event-sink payload.
pub fn event_message(event: &CameraEvent) -> Value {
    match event {
        CameraEvent::TorchState(state) => json!({
            "name": "flashState",
            "data": *state as i64,
        }),
    }
}

fn lens_argument(arguments: &Value) -> Option<LensFacing> {
    arguments.as_i64().and_then(LensFacing::from_id)
}

fn start_reply(info: &OpenInfo) -> Value {
    json!({
        "textureId": info.texture_id,
        "size": { "width": info.width, "height": info.height },
        "hasFlash": info.torchable,
    })
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use camera_works::{
    error::ERROR_CODE,
    handler::{event_message, MethodCall, MethodHandler},
    session::Session,
    testing::{TestPatternBackend, TestPatternConfig, CAPTURE_PAYLOAD},
};
use serde_json::{json, Value};
use std::{error::Error, fs, path::PathBuf, time::Duration};

fn call(method: &str) -> MethodCall {
    MethodCall::new(method, Value::Null)
}

fn call_with(method: &str, arguments: Value) -> MethodCall {
    MethodCall::new(method, arguments)
}

fn handler_for(name: &str) -> (MethodHandler<TestPatternBackend>, PathBuf) {
    let config = TestPatternConfig {
        width: 64,
        height: 48,
        frame_interval: Duration::from_millis(5),
        ..TestPatternConfig::default()
    };
    let dir =
        std::env::temp_dir().join(format!("camera-works-{}-{}", name, std::process::id()));
    let session = Session::new(TestPatternBackend::new(config), &dir);
    (MethodHandler::new(session), dir)
}

#[test]
fn test_bridge_flow() -> Result<(), Box<dyn Error>> {
    let (mut handler, dir) = handler_for("flow");

    // Permission is not determined until requested.
    assert_eq!(handler.on_method_call(&call("state"))?, json!(0));
    assert_eq!(handler.on_method_call(&call("requestPermission"))?, json!(true));
    assert_eq!(handler.on_method_call(&call("state"))?, json!(1));

    assert_eq!(handler.on_method_call(&call("hasBackCamera"))?, json!(true));
    assert_eq!(handler.on_method_call(&call("hasFrontCamera"))?, json!(true));

    // Start with the back lens (id 1).
    let reply = handler.on_method_call(&call_with("start", json!(1)))?;
    assert_eq!(reply["size"], json!({ "width": 48.0, "height": 64.0 }));
    assert_eq!(reply["hasFlash"], json!(true));
    assert!(reply["textureId"].is_i64());

    assert_eq!(
        handler.on_method_call(&call_with("setFlash", json!(1)))?,
        json!(true)
    );
    let event = handler
        .session()
        .events()
        .try_recv()?
        .expect("torch event after setFlash");
    assert_eq!(
        event_message(&event),
        json!({ "name": "flashState", "data": 1 })
    );

    assert_eq!(
        handler.on_method_call(&call_with("switchCamera", json!(0)))?,
        json!(true)
    );

    let path = handler.on_method_call(&call("takePicture"))?;
    let path = PathBuf::from(path.as_str().expect("path reply is a string"));
    assert_eq!(fs::read(&path)?, CAPTURE_PAYLOAD);

    assert_eq!(handler.on_method_call(&call("stop"))?, json!(true));
    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_unknown_method_not_implemented() {
    let (mut handler, _) = handler_for("unknown");
    let err = handler
        .on_method_call(&call("analyzeBarcode"))
        .expect_err("unknown method must fail");
    assert_eq!(err.code, "NOT_IMPLEMENTED");
}

#[test]
fn test_switch_camera_requires_lens_id() -> Result<(), Box<dyn Error>> {
    let (mut handler, _) = handler_for("bad-switch");
    handler.on_method_call(&call("requestPermission"))?;
    handler.on_method_call(&call_with("start", Value::Null))?;

    let err = handler
        .on_method_call(&call_with("switchCamera", Value::Null))
        .expect_err("missing lens id must fail");
    assert_eq!(err.code, ERROR_CODE);

    let err = handler
        .on_method_call(&call_with("switchCamera", json!(7)))
        .expect_err("out-of-range lens id must fail");
    assert_eq!(err.code, ERROR_CODE);
    Ok(())
}

#[test]
fn test_operations_require_bound_camera() {
    let (mut handler, _) = handler_for("unbound");
    let _ = handler.on_method_call(&call("requestPermission"));

    for method in [
        call("stop"),
        call("takePicture"),
        call_with("setFlash", json!(1)),
        call_with("switchCamera", json!(0)),
    ] {
        let err = handler
            .on_method_call(&method)
            .expect_err("unbound session must reject camera operations");
        assert_eq!(err.code, ERROR_CODE);
    }
}

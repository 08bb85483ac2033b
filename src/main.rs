// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use camera_works::{
    backend::LensFacing,
    convert::{self, ChromaOrder},
    handler::{event_message, MethodCall, MethodHandler},
    session::Session,
    testing::{TestPatternBackend, TestPatternConfig},
};
use clap::Parser;
use serde_json::{json, Value};
use std::{
    error::Error,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
use args::{Args, LayoutSetting, LensSetting};

fn init_tracing(args: &Args) {
    let journald = if args.journald {
        match tracing_journald::layer() {
            Ok(layer) => Some(layer),
            Err(e) => {
                eprintln!("journald logging unavailable: {e}");
                None
            }
        }
    } else {
        None
    };

    let default = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Route log-crate records through tracing as well.
    let _ = tracing_log::LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(journald)
        .init();
}

fn update_fps(prev: &mut Instant, history: &mut Vec<i64>, index: &mut usize) -> i64 {
    let now = Instant::now();

    let elapsed = now.duration_since(*prev);
    *prev = Instant::now();

    history[*index] = 1e9 as i64 / elapsed.as_nanos().max(1) as i64;
    *index = (*index + 1) % history.len();

    (history.iter().sum::<i64>() as f64 / history.len() as f64).round() as i64
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&args);
    info!("Camera Works Service");

    let order = match args.layout {
        LayoutSetting::Nv21 => ChromaOrder::CrFirst,
        LayoutSetting::Nv12 => ChromaOrder::CbFirst,
    };
    let config = TestPatternConfig {
        width: args.frame_size[0] as usize,
        height: args.frame_size[1] as usize,
        frame_interval: Duration::from_millis(args.frame_interval_ms),
        luma_padding: args.luma_padding,
        planar_chroma: args.planar_chroma,
        chroma_order: order,
        ..TestPatternConfig::default()
    };
    let backend = TestPatternBackend::new(config);
    let session = Session::new(backend, &args.output_dir);
    let mut handler = MethodHandler::new(session);

    if handler.on_method_call(&MethodCall::new("state", Value::Null))? != json!(1) {
        let granted =
            handler.on_method_call(&MethodCall::new("requestPermission", Value::Null))?;
        if granted != json!(true) {
            return Err("camera permission denied".into());
        }
    }

    let lens = match args.lens {
        LensSetting::Front => LensFacing::Front,
        LensSetting::Back => LensFacing::Back,
    };
    let reply = handler.on_method_call(&MethodCall::new("start", json!(lens.id())))?;
    info!("camera started: {reply}");

    if args.torch {
        handler.on_method_call(&MethodCall::new("setFlash", json!(1)))?;
    }

    let frames = handler
        .session()
        .frames()
        .ok_or("camera bound but no frame stream")?
        .to_async();
    let events = handler.session().events().to_async();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut prev = Instant::now();
    let mut history = vec![0i64; 30];
    let mut index = 0;
    let mut count = 0u64;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("shutting down");
                break;
            }
            event = events.recv() => {
                match event {
                    Ok(event) => info!("event: {}", event_message(&event)),
                    Err(e) => {
                        warn!("event stream closed: {e}");
                        break;
                    }
                }
            }
            frame = frames.recv() => {
                let frame = match frame {
                    Ok(frame) => frame,
                    // Sender dropped with the binding.
                    Err(_) => break,
                };
                let fps = update_fps(&mut prev, &mut history, &mut index);
                let packed = convert::to_semi_planar(&frame.view(), order);
                debug!("frame {count} {frame}: {} packed bytes, fps {fps}", packed.len());
                count += 1;
                if args.frames != 0 && count >= args.frames {
                    info!("streamed {count} frames, fps {fps}");
                    break;
                }
            }
        }
    }

    if args.capture {
        let path = handler.on_method_call(&MethodCall::new("takePicture", Value::Null))?;
        info!("saved photo: {path}");
    }

    handler.on_method_call(&MethodCall::new("stop", Value::Null))?;
    Ok(())
}

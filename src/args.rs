// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use std::path::PathBuf;

/// Which lens to bind at startup.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LensSetting {
    /// Front (selfie) camera
    Front,
    /// Back (world) camera
    Back,
}

/// Packed output layout for converted frames.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LayoutSetting {
    /// Semi-planar with V leading each chroma pair
    Nv21,
    /// Semi-planar with U leading each chroma pair
    Nv12,
}

/// Command-line arguments for the Camera Works service.
///
/// Runs the session layer against the synthetic test-pattern backend.
/// Arguments can be specified via command line or environment variables.
///
/// # Example
///
/// ```bash
/// # Via command line
/// camera-works --lens front --capture --frames 120
///
/// # Via environment variables
/// export LENS=front
/// export CAPTURE=true
/// camera-works
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Lens to bind at startup
    #[arg(long, env = "LENS", default_value = "back", value_enum)]
    pub lens: LensSetting,

    /// Frame resolution in pixels (width height)
    #[arg(
        long,
        env = "FRAME_SIZE",
        default_value = "640 480",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub frame_size: Vec<u32>,

    /// Frames to stream before exiting (0 streams until Ctrl-C)
    #[arg(long, env = "FRAMES", default_value = "300")]
    pub frames: u64,

    /// Frame pump interval in milliseconds
    #[arg(long, env = "FRAME_INTERVAL_MS", default_value = "33")]
    pub frame_interval_ms: u64,

    /// Bytes of padding per luma row (forces the strided conversion path)
    #[arg(long, env = "LUMA_PADDING", default_value = "0")]
    pub luma_padding: usize,

    /// Deliver chroma as two dense planes instead of the interleaved layout
    #[arg(long, env = "PLANAR_CHROMA")]
    pub planar_chroma: bool,

    /// Packed output layout for converted frames
    #[arg(long, env = "LAYOUT", default_value = "nv21", value_enum)]
    pub layout: LayoutSetting,

    /// Toggle the torch on after binding
    #[arg(long, env = "TORCH")]
    pub torch: bool,

    /// Take a still picture before shutting down
    #[arg(long, env = "CAPTURE")]
    pub capture: bool,

    /// Directory for captured photos
    #[arg(long, env = "OUTPUT_DIR", default_value = "/tmp/camera-works")]
    pub output_dir: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log to the systemd journal in addition to stderr
    #[arg(long, env = "JOURNALD")]
    pub journald: bool,
}

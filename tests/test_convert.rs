// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use camera_works::convert::{self, ChromaOrder};
use camera_works::frame::{FrameView, Plane};
use camera_works::testing::{gradient_frame, TestPatternConfig};

fn plane(data: &[u8], row_stride: usize, pixel_stride: usize) -> Plane<'_> {
    Plane {
        data,
        row_stride,
        pixel_stride,
    }
}

/// 4x2 frame with tightly packed luma and fast-path interleaved chroma.
///
/// The chroma planes are two overlapping views of the VU interleave
/// [9, 10, 11, 12]: V holds the first three bytes, U the last three.
fn fast_path_frame<'a>(y: &'a [u8], v: &'a [u8], u: &'a [u8]) -> FrameView<'a> {
    FrameView {
        width: 4,
        height: 2,
        y: plane(y, 4, 1),
        u: plane(u, 4, 2),
        v: plane(v, 4, 2),
    }
}

#[test]
fn test_packed_luma_passthrough() {
    let y = [1, 2, 3, 4, 5, 6, 7, 8];
    let v = [9, 10, 11];
    let u = [10, 11, 12];
    let out = convert::nv21(&fast_path_frame(&y, &v, &u));

    assert_eq!(&out[..8], &y);
    assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn test_padded_luma_skips_row_padding() {
    // Row stride 6 on a width-4 frame: two padding bytes per row.
    let y = [1, 2, 3, 4, 0xee, 0xee, 5, 6, 7, 8, 0xee, 0xee];
    let v = [9, 10, 11];
    let u = [10, 11, 12];
    let frame = FrameView {
        width: 4,
        height: 2,
        y: plane(&y, 6, 1),
        u: plane(&u, 4, 2),
        v: plane(&v, 4, 2),
    };
    let out = convert::nv21(&frame);

    assert_eq!(&out[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_fast_chroma_interleave() {
    let y = [0u8; 8];
    let v = [9, 10, 11];
    let u = [10, 11, 12];
    let out = convert::nv21(&fast_path_frame(&y, &v, &u));

    // One leading byte from V, the rest from U.
    assert_eq!(out[8], v[0]);
    assert_eq!(&out[9..], &u[..3]);
    assert_eq!(&out[8..], &[9, 10, 11, 12]);
}

#[test]
fn test_general_chroma_independent_strides() {
    let y = [0u8; 8];
    // Half resolution is 1x2; row stride 5 and pixel stride 2 put the
    // samples at indices 0 and 2.
    let u = [21, 0xee, 22];
    let v = [31, 0xee, 32];
    let frame = FrameView {
        width: 4,
        height: 2,
        y: plane(&y, 4, 1),
        u: plane(&u, 5, 2),
        v: plane(&v, 5, 2),
    };

    let out = convert::nv21(&frame);
    assert_eq!(&out[8..], &[31, 21, 32, 22]);

    for row in 0..1 {
        for col in 0..2 {
            let pair = 8 + 2 * (row * 2 + col);
            assert_eq!(out[pair], v[row * 5 + col * 2]);
            assert_eq!(out[pair + 1], u[row * 5 + col * 2]);
        }
    }
}

#[test]
fn test_chroma_order_not_swapped() {
    let y = [0u8; 8];
    let u = [21, 0xee, 22];
    let v = [31, 0xee, 32];
    let frame = FrameView {
        width: 4,
        height: 2,
        y: plane(&y, 4, 1),
        u: plane(&u, 5, 2),
        v: plane(&v, 5, 2),
    };

    assert_eq!(&convert::nv21(&frame)[8..], &[31, 21, 32, 22]);
    assert_eq!(&convert::nv12(&frame)[8..], &[21, 31, 22, 32]);
}

#[test]
fn test_output_length_invariant() {
    // Output size is fixed by the format, whatever the input geometry.
    for config in [
        TestPatternConfig::default(),
        TestPatternConfig {
            luma_padding: 16,
            ..TestPatternConfig::default()
        },
        TestPatternConfig {
            planar_chroma: true,
            ..TestPatternConfig::default()
        },
        TestPatternConfig {
            luma_padding: 7,
            planar_chroma: true,
            width: 320,
            height: 240,
            ..TestPatternConfig::default()
        },
    ] {
        let frame = gradient_frame(&config, 0);
        let out = convert::nv21(&frame.view());
        assert_eq!(out.len(), config.width * config.height * 3 / 2);
    }
}

#[test]
fn test_fast_and_general_paths_agree() {
    // Same logical frame content delivered interleaved and planar must
    // produce identical packed output.
    let interleaved = gradient_frame(&TestPatternConfig::default(), 7);
    let planar = gradient_frame(
        &TestPatternConfig {
            planar_chroma: true,
            luma_padding: 32,
            ..TestPatternConfig::default()
        },
        7,
    );

    assert_eq!(
        convert::nv21(&interleaved.view()),
        convert::nv21(&planar.view())
    );
}

#[test]
fn test_nv12_fast_path_layout() {
    let frame = gradient_frame(
        &TestPatternConfig {
            chroma_order: ChromaOrder::CbFirst,
            ..TestPatternConfig::default()
        },
        3,
    );
    let planar = gradient_frame(
        &TestPatternConfig {
            planar_chroma: true,
            ..TestPatternConfig::default()
        },
        3,
    );

    assert_eq!(convert::nv12(&frame.view()), convert::nv12(&planar.view()));
}

#[test]
fn test_concat_planes() {
    let y = [1, 2, 3, 4, 5, 6, 7, 8];
    let v = [9, 10, 11];
    let u = [10, 11, 12];
    let out = convert::concat_planes(&fast_path_frame(&y, &v, &u));

    // Raw concatenation keeps the planes as delivered, padding included.
    assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 9, 10, 11]);
}

#[test]
#[should_panic]
fn test_debug_check_catches_short_chroma_plane() {
    // Fast-path geometry but the leading plane is one byte short of the
    // expected chroma size; the debug consistency check must trip.
    let y = [0u8; 8];
    let v = [9, 10];
    let u = [10, 11, 12];
    convert::nv21(&fast_path_frame(&y, &v, &u));
}

#[test]
#[should_panic]
fn test_debug_check_catches_disjoint_chroma_planes() {
    // Correctly sized planes that are not views of one interleave: the
    // boundary cross-check (first trailing byte against second leading
    // byte) must trip.
    let y = [0u8; 8];
    let v = [9, 10, 11];
    let u = [99, 11, 12];
    convert::nv21(&fast_path_frame(&y, &v, &u));
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn rgba(path: &std::path::Path) -> ((u32, u32), Vec<u8>) {
    let img = image::open(path).unwrap().to_rgba();
    (img.dimensions(), img.into_raw())
}

#[test]
fn renders_presented_frame() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("frame.png");
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "32x16", "-i", "50", "-t", "1"])
        .assert()
        .success();

    let (dims, raw) = rgba(&out);
    assert_eq!(dims, (32, 16));
    assert!(raw.chunks(4).all(|p| p[0] == 255 && p[3] == 255));
}

#[test]
fn display_size_scales_the_frame() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("frame.png");
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "8x8", "-d", "24x12", "-t", "1"])
        .assert()
        .success();
    assert_eq!(rgba(&out).0, (24, 12));
}

#[test]
fn raw_output_keeps_interior_black() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("raw.png");
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "4x4",
            "-i",
            "50",
            "-t",
            "1",
            "--raw",
        ])
        .assert()
        .success();

    let (dims, raw) = rgba(&out);
    assert_eq!(dims, (4, 4));
    // Pixel (3, 2) maps to 0.25 + 0i, inside the set.
    let offset = (2 * 4 + 3) * 4;
    assert_eq!(&raw[offset..offset + 4], &[0, 0, 0, 255]);
    // Green and blue carry the same value everywhere.
    assert!(raw.chunks(4).all(|p| p[1] == p[2]));
}

#[test]
fn viewport_form_is_accepted() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("zoomed.png");
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "16x16",
            "-c",
            "-0.75,0.1",
            "-z",
            "0.05",
            "-t",
            "1",
        ])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn inverted_window_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "8x8",
            "-l",
            "1.0,-1.0",
            "-r",
            "-1.0,1.0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid x bounds"));
    assert!(!out.exists());
}

#[test]
fn empty_image_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "0x8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contain no pixels"));
}

#[test]
fn zero_iterations_fail_validation() {
    Command::cargo_bin("mandelscope")
        .unwrap()
        .args(&["-o", "unused.png", "-i", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count must be between"));
}

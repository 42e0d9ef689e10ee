//! Build script that probes system libraries and prints installation hints.
//!
//! OpenCV is linked for capture, inference preprocessing and the camera
//! window. X11 is only needed at runtime for pointer control, but a missing
//! development package usually means no display server either.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    if pkg_config_version(&["--version"]).is_none() {
        println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        println!("cargo:warning=On macOS: brew install pkg-config");
        return;
    }

    match ["opencv4", "opencv"]
        .iter()
        .find_map(|name| pkg_config_version(&["--modversion", name]))
    {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev clang libclang-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }

    if env::var("TARGET").unwrap_or_default().contains("linux") && pkg_config_version(&["--modversion", "x11"]).is_none() {
        println!("cargo:warning=X11 libraries not found. Gestures cannot drive the mouse without an X11 display.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install libx11-dev libxtst-dev");
    }
}

/// Trimmed stdout of a successful pkg-config invocation
fn pkg_config_version(args: &[&str]) -> Option<String> {
    let output = Command::new("pkg-config").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

//! macOS bundling support for .app bundles and DMG disk images.
//!
//! # Build Requirements
//!
//! | Step | Required Tools | Notes |
//! |------|----------------|-------|
//! | icon | `sips`, `iconutil` | Built into macOS |
//! | signing | `codesign` | Xcode Command Line Tools |
//! | .dmg | `create-dmg` | `brew install create-dmg` |
//!
//! # Output Location
//!
//! - `build/mac/<AppName>.app` - Application bundle
//! - `build/karang_lestari_mac.dmg` - Disk image

pub mod app;
pub mod dmg;
pub mod icon;
pub mod sign;

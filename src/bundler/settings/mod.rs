//! Configuration structures for bundling operations.
//!
//! Settings start from the values the project has always been packaged with,
//! can be overridden from `[package.metadata.karang_bundler]` in `Cargo.toml`,
//! and finally from the command line through [`SettingsBuilder`].

mod builder;
mod bundle;
mod core;
mod macos;
mod package;

pub use builder::SettingsBuilder;
pub use bundle::BundleSettings;
pub use self::core::{BUNDLED_ICON_NAME, Settings};
pub use macos::{DEFAULT_SIGNING_IDENTITY, DEFAULT_TARGET, DmgSettings, MacOsSettings};
pub use package::{DEFAULT_APP_NAME, DEFAULT_CRATE_NAME, PackageSettings};

//! End-to-end pipeline tests driven by a fake toolchain.
//!
//! The fake records every command and creates the files the real tool would
//! have produced, so the whole pipeline runs on any host.

use karang_bundler::bundler::{
    BuildStep, Bundler, Error, Result, Settings, SettingsBuilder, ToolCommand, ToolRunner,
};
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleExecutable</key>
    <string>karang_lestari</string>
    <key>CFBundleIconFile</key>
    <string>AppIcon</string>
</dict>
</plist>
"#;

const ENTITLEMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>com.apple.security.cs.allow-jit</key>
    <true/>
</dict>
</plist>
"#;

/// Records commands and simulates each tool's output files.
#[derive(Default)]
struct FakeToolchain {
    binary: PathBuf,
    fail_program: Option<&'static str>,
    commands: Mutex<Vec<ToolCommand>>,
    dmg_present_at_create: Mutex<Vec<bool>>,
    iconset_at_compile: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl FakeToolchain {
    fn new(settings: &Settings) -> Self {
        Self {
            binary: settings.compiled_binary_path(),
            ..Default::default()
        }
    }

    fn failing(settings: &Settings, program: &'static str) -> Self {
        Self {
            fail_program: Some(program),
            ..Self::new(settings)
        }
    }

    fn commands(&self) -> Vec<ToolCommand> {
        self.commands.lock().unwrap().clone()
    }

    fn programs(&self) -> Vec<String> {
        self.commands()
            .iter()
            .map(|c| c.program().to_string())
            .collect()
    }
}

fn write_file(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn make_executable(path: &Path) {
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

impl ToolRunner for FakeToolchain {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        self.commands.lock().unwrap().push(command.clone());

        if self.fail_program == Some(command.program()) {
            return Err(Error::ToolFailed {
                command: command.to_string(),
                code: Some(101),
                stderr: "simulated failure".into(),
            });
        }

        match command.program() {
            "cargo" => {
                write_file(&self.binary, b"\xCF\xFA\xED\xFEkarang");
                make_executable(&self.binary);
            }
            "sips" => {
                let out = command.value_after("--out").unwrap();
                let size = command.value_after("-z").unwrap().to_string_lossy();
                write_file(Path::new(out), format!("png {size}").as_bytes());
            }
            "iconutil" => {
                let iconset = Path::new(&command.get_args()[2]);
                let mut snapshot = self.iconset_at_compile.lock().unwrap();
                for entry in fs::read_dir(iconset).unwrap() {
                    let entry = entry.unwrap();
                    snapshot.insert(
                        entry.file_name().to_string_lossy().into_owned(),
                        fs::read(entry.path()).unwrap(),
                    );
                }
                write_file(Path::new(command.value_after("-o").unwrap()), b"icns");
            }
            "create-dmg" => {
                let args = command.get_args();
                let dmg = Path::new(&args[args.len() - 2]);
                self.dmg_present_at_create.lock().unwrap().push(dmg.exists());
                write_file(dmg, b"dmg image");
            }
            _ => {}
        }

        Ok(())
    }
}

/// A project laid out the way the packager expects.
fn fixture_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_file(
        &root.join("Cargo.toml"),
        b"[package]\nname = \"karang_lestari\"\nversion = \"0.1.0\"\n",
    );

    fs::create_dir_all(root.join("assets/icons")).unwrap();
    image::RgbaImage::new(1024, 1024)
        .save(root.join("assets/icons/icon_1024x1024.png"))
        .unwrap();
    write_file(&root.join("assets/maps/reef.json"), b"{\"tiles\": []}");
    write_file(&root.join("assets/bin/helper"), b"#!/bin/sh\necho helper\n");
    make_executable(&root.join("assets/bin/helper"));

    write_file(&root.join("meta/Info.plist"), INFO_PLIST.as_bytes());
    write_file(&root.join("meta/entitlements.plist"), ENTITLEMENTS.as_bytes());
    write_file(&root.join("meta/installer_bg.png"), b"background");

    tmp
}

fn settings_for(root: &Path) -> Settings {
    settings_with_clean(root, false)
}

fn settings_with_clean(root: &Path, clean: bool) -> Settings {
    SettingsBuilder::new()
        .project_dir(root)
        .target_dir(root.join("target"))
        .signing_identity("-")
        .clean(clean)
        .build()
        .unwrap()
}

/// Relative path to contents for every file under `root`.
fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().to_path_buf(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn produces_signed_bundle_and_installer() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    let runner = FakeToolchain::new(&settings);
    let bundler = Bundler::with_runner(settings.clone(), runner);

    let artifact = bundler.bundle().await.unwrap();

    let app = project.path().join("build/mac/Karang Lestari.app");
    assert_eq!(artifact.app_bundle, app);
    assert!(app.join("Contents/MacOS/karang_lestari").is_file());
    assert!(app.join("Contents/MacOS/assets/icons/icon_1024x1024.png").is_file());
    assert!(app.join("Contents/MacOS/assets/maps/reef.json").is_file());
    assert!(app.join("Contents/MacOS/assets/bin/helper").is_file());
    assert_eq!(
        fs::read(app.join("Contents/Resources/AppIcon.icns")).unwrap(),
        b"icns"
    );
    assert_eq!(
        fs::read_to_string(app.join("Contents/Info.plist")).unwrap(),
        INFO_PLIST
    );

    let dmg = project.path().join("build/karang_lestari_mac.dmg");
    assert_eq!(artifact.dmg, dmg);
    assert_eq!(artifact.size, fs::metadata(&dmg).unwrap().len());
    assert_eq!(artifact.checksum.len(), 64);
    assert_eq!(artifact.signed_executables, 2);

    assert!(!project.path().join("AppIcon.iconset").exists());
    assert!(!project.path().join("AppIcon.icns").exists());

    let programs = bundler.runner().programs();
    let mut expected = vec!["cargo".to_string()];
    expected.extend(std::iter::repeat_n("sips".to_string(), 9));
    expected.push("iconutil".into());
    expected.extend(std::iter::repeat_n("codesign".to_string(), 3));
    expected.push("create-dmg".into());
    assert_eq!(programs, expected);
}

#[tokio::test]
async fn compile_runs_release_build_for_target() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));

    bundler.bundle().await.unwrap();

    let cargo = &bundler.runner().commands()[0];
    assert_eq!(
        cargo.to_string(),
        "cargo build --release --target aarch64-apple-darwin"
    );
    assert_eq!(cargo.get_current_dir(), Some(project.path()));
}

#[tokio::test]
async fn every_executable_is_signed_before_the_bundle() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));

    bundler.bundle().await.unwrap();

    let signs: Vec<ToolCommand> = bundler
        .runner()
        .commands()
        .into_iter()
        .filter(|c| c.program() == "codesign")
        .collect();
    let (bundle_sign, file_signs) = signs.split_last().unwrap();

    let app = settings.app_bundle_path();
    assert_eq!(bundle_sign.get_args().last().unwrap(), app.as_os_str());
    assert_eq!(
        bundle_sign.value_after("--entitlements").unwrap(),
        settings.entitlements().as_os_str()
    );
    assert_eq!(bundle_sign.value_after("--options").unwrap(), "runtime");

    let mut signed: Vec<PathBuf> = file_signs
        .iter()
        .map(|c| {
            assert_eq!(c.value_after("--sign").unwrap(), "-");
            assert!(!c.get_args().iter().any(|a| a == "--deep"));
            PathBuf::from(c.get_args().last().unwrap())
        })
        .collect();
    signed.sort();
    assert_eq!(
        signed,
        vec![
            app.join("Contents/MacOS/assets/bin/helper"),
            app.join("Contents/MacOS/karang_lestari"),
        ]
    );
}

#[tokio::test]
async fn iconset_has_every_size_and_copies_the_largest() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));

    bundler.bundle().await.unwrap();

    let mut resized: Vec<(String, String)> = bundler
        .runner()
        .commands()
        .iter()
        .filter(|c| c.program() == "sips")
        .map(|c| {
            let size = c.value_after("-z").unwrap().to_string_lossy().into_owned();
            let out = Path::new(c.value_after("--out").unwrap());
            (out.file_name().unwrap().to_string_lossy().into_owned(), size)
        })
        .collect();
    resized.sort();

    let mut expected: Vec<(String, String)> = [
        ("icon_16x16.png", "16"),
        ("icon_16x16@2x.png", "32"),
        ("icon_32x32.png", "32"),
        ("icon_32x32@2x.png", "64"),
        ("icon_128x128.png", "128"),
        ("icon_128x128@2x.png", "256"),
        ("icon_256x256.png", "256"),
        ("icon_256x256@2x.png", "512"),
        ("icon_512x512.png", "512"),
    ]
    .into_iter()
    .map(|(name, size)| (name.to_string(), size.to_string()))
    .collect();
    expected.sort();
    assert_eq!(resized, expected);

    let iconset = bundler.runner().iconset_at_compile.lock().unwrap().clone();
    assert_eq!(iconset.len(), 10);
    let source = fs::read(settings.source_icon()).unwrap();
    assert_eq!(iconset["icon_512x512@2x.png"], source);
}

#[tokio::test]
async fn repeated_runs_produce_identical_bundles() {
    let project = fixture_project();
    let settings = settings_for(project.path());

    let first = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));
    first.bundle().await.unwrap();
    let before = snapshot_tree(&settings.app_bundle_path());

    let second = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));
    let artifact = second.bundle().await.unwrap();
    let after = snapshot_tree(&settings.app_bundle_path());

    assert_eq!(before, after);
    assert_eq!(artifact.signed_executables, 2);
}

#[tokio::test]
async fn stale_installer_is_removed_before_create_dmg() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    write_file(&settings.dmg_path(), b"stale image from a previous release");

    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));
    bundler.bundle().await.unwrap();

    assert_eq!(
        *bundler.runner().dmg_present_at_create.lock().unwrap(),
        vec![false]
    );
    assert_eq!(fs::read(settings.dmg_path()).unwrap(), b"dmg image");
}

#[tokio::test]
async fn compile_failure_leaves_no_artifacts() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::failing(&settings, "cargo"));

    let err = bundler.bundle().await.unwrap_err();

    assert!(matches!(err, Error::ToolFailed { code: Some(101), .. }));
    assert!(err.to_string().contains("simulated failure"));
    assert_eq!(bundler.runner().programs(), vec!["cargo"]);
    assert!(!settings.app_bundle_path().exists());
    assert!(!settings.iconset_dir().exists());
    assert!(!settings.dmg_path().exists());
}

#[tokio::test]
async fn missing_entitlements_stop_before_bundle_signature() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    fs::remove_file(settings.entitlements()).unwrap();

    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));
    let err = bundler.bundle().await.unwrap_err();

    match err {
        Error::PreconditionFailed { step, path, .. } => {
            assert_eq!(step, BuildStep::SignBundle.name());
            assert_eq!(path, settings.entitlements());
        }
        other => panic!("unexpected error: {other}"),
    }

    let commands = bundler.runner().commands();
    assert!(!commands.iter().any(|c| c.value_after("--entitlements").is_some()));
    assert!(!commands.iter().any(|c| c.program() == "create-dmg"));
    assert!(settings.app_bundle_path().exists());
}

#[tokio::test]
async fn undersized_icon_is_rejected_before_resizing() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    image::RgbaImage::new(512, 512)
        .save(settings.source_icon())
        .unwrap();

    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));
    let err = bundler.bundle().await.unwrap_err();

    assert!(matches!(
        err,
        Error::IconDimensions {
            width: 512,
            height: 512,
            expected: 1024,
            ..
        }
    ));
    assert!(!bundler.runner().programs().iter().any(|p| p == "sips"));
}

#[tokio::test]
async fn clean_removes_files_left_from_previous_bundle() {
    let project = fixture_project();
    let stale = |settings: &Settings| settings.bundled_assets_dir().join("removed.txt");

    let settings = settings_for(project.path());
    write_file(&stale(&settings), b"old");
    Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings))
        .bundle()
        .await
        .unwrap();
    assert!(stale(&settings).exists());

    let settings = settings_with_clean(project.path(), true);
    Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings))
        .bundle()
        .await
        .unwrap();
    assert!(!stale(&settings).exists());
    assert!(settings.bundled_binary_path().is_file());
}

#[test]
fn plan_lists_steps_in_order_without_running_anything() {
    let project = fixture_project();
    let settings = settings_for(project.path());
    let bundler = Bundler::with_runner(settings.clone(), FakeToolchain::new(&settings));

    let plan = bundler.plan();
    let steps: Vec<&str> = plan.iter().map(|(step, _)| step.name()).collect();
    assert_eq!(
        steps,
        vec![
            "compile",
            "assemble-bundle",
            "generate-iconset",
            "compile-icon",
            "install-metadata",
            "sign-executables",
            "sign-bundle",
            "build-installer",
            "cleanup",
        ]
    );

    let (_, compile) = &plan[0];
    assert!(compile.iter().all(|p| p.holds()));
    let (_, assemble) = &plan[1];
    assert!(!assemble.iter().all(|p| p.holds()));
    assert!(bundler.runner().commands().is_empty());
}

// build.rs

//! Build script for the zerostart programs
//!
//! This script runs at build time to:
//! - Validate the layout configuration (`zerostart.json`) against the target
//! - Generate the layout constants included by `src/constants.rs`
//! - Set up linker arguments for the freestanding binaries
//! - Compile the C exit-status collaborator
//! - Generate build information

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "zerostart.json";
const COLLABORATOR_SOURCE: &str = "collab/change_number.c";

/// Largest region accepted from the configuration (words).
const MAX_RESERVED_WORDS: usize = 4096;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct BuildConfig {
    arch: String,
    os: String,
    entry_symbol: String,
    reserved_region: RegionConfig,
    collaborator: CollaboratorConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RegionConfig {
    words: usize,
    word_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CollaboratorConfig {
    #[serde(deserialize_with = "deserialize_status")]
    initial_status: i32,
    #[serde(deserialize_with = "deserialize_status")]
    status: i32,
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StatusRaw {
        Integer(i64),
        Text(String),
    }

    match StatusRaw::deserialize(deserializer)? {
        StatusRaw::Integer(value) => {
            i32::try_from(value).map_err(|_| de::Error::custom("exit status out of i32 range"))
        }
        StatusRaw::Text(text) => text.trim().parse::<i32>().map_err(|_| {
            de::Error::custom(format!("exit status must be numeric, received '{text}'"))
        }),
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={CONFIG_FILE}");
    println!("cargo:rerun-if-changed={COLLABORATOR_SOURCE}");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));

    let config = load_config(&manifest_dir.join(CONFIG_FILE));
    validate_target(&config);
    write_layout(&config);
    setup_linker();
    compile_collaborator(&manifest_dir, &config);
    print_build_info();
}

/// Read and validate the layout configuration
fn load_config(path: &Path) -> BuildConfig {
    assert!(
        path.exists(),
        "Layout configuration not found: {}",
        path.display()
    );

    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    let config: BuildConfig = serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("{} is not a valid layout configuration: {e}", path.display()));

    assert_eq!(
        config.entry_symbol, "_start",
        "Layout configuration names entry symbol '{}' (the loader expects '_start')",
        config.entry_symbol
    );

    let region = &config.reserved_region;
    assert!(
        (1..=MAX_RESERVED_WORDS).contains(&region.words),
        "reserved-region.words must be in 1..={MAX_RESERVED_WORDS}, got {}",
        region.words
    );
    assert_eq!(
        region.word_size, 8,
        "reserved-region.word-size must be 8 (the region is an array of u64), got {}",
        region.word_size
    );

    config
}

/// Ensure the configuration describes the target being built
fn validate_target(config: &BuildConfig) {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "unknown".to_string());
    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "unknown".to_string());

    assert!(
        arch == config.arch,
        "Target architecture '{arch}' does not match configured arch '{}'",
        config.arch
    );
    assert!(
        os == config.os,
        "Target OS '{os}' does not match configured os '{}'",
        config.os
    );
}

/// Generate `$OUT_DIR/layout.rs`
fn write_layout(config: &BuildConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let mut layout = String::new();
    let region = &config.reserved_region;
    let collaborator = &config.collaborator;

    let _ = writeln!(layout, "// Generated by build.rs from {CONFIG_FILE}.");
    let _ = writeln!(layout, "/// Number of words in the reserved zero region.");
    let _ = writeln!(layout, "pub const RESERVED_WORDS: usize = {};", region.words);
    let _ = writeln!(layout, "/// Size of one reserved-region word in bytes.");
    let _ = writeln!(layout, "pub const WORD_SIZE: usize = {};", region.word_size);
    let _ = writeln!(layout, "/// Value the exit-status cell of `state_exit` holds before the collaborator runs.");
    let _ = writeln!(
        layout,
        "pub const COLLABORATOR_INITIAL_STATUS: i32 = {};",
        collaborator.initial_status
    );
    let _ = writeln!(layout, "/// Value the C collaborator writes into the exit-status cell.");
    let _ = writeln!(layout, "pub const COLLABORATOR_STATUS: i32 = {};", collaborator.status);

    let layout_path = out_dir.join("layout.rs");
    fs::write(&layout_path, layout)
        .unwrap_or_else(|e| panic!("Failed to write {}: {e}", layout_path.display()));
}

/// Linker arguments for the freestanding binaries
///
/// The binaries define `_start` themselves, so the C runtime start files
/// must stay out of the link. Only `[[bin]]` targets get this; the test
/// harnesses link normally.
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=-nostartfiles");
}

/// Compile `collab/change_number.c` into a static archive
fn compile_collaborator(manifest_dir: &Path, config: &BuildConfig) {
    let status = config.collaborator.status.to_string();

    cc::Build::new()
        .file(manifest_dir.join(COLLABORATOR_SOURCE))
        .define("COLLABORATOR_STATUS", Some(status.as_str()))
        // 単純な代入のみ: libc もスタック保護も不要
        .flag_if_supported("-ffreestanding")
        .flag_if_supported("-fno-stack-protector")
        .warnings(true)
        .compile("zerostart_collaborator");
}

/// Print build information
fn print_build_info() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_PROFILE={profile}");

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_TARGET={target}");

    if env::var_os("CARGO_FEATURE_EXIT_TRACE").is_some() {
        println!("cargo:warning=exit_trace enabled: programs write diagnostics to stderr");
    }
}

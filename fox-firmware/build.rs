//! Build script for fox-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates beacon.toml and turns it into a `BEACON_CONFIG` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fox_core::config::{BeaconConfig, ConfigError};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate beacon.toml, then emit it as Rust
fn generate_config() {
    println!("cargo:rerun-if-changed=beacon.toml");

    let config_path = Path::new("beacon.toml");

    let config = if config_path.exists() {
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) => fail("Failed to read beacon.toml", &e.to_string()),
        };
        match toml::from_str::<BeaconConfig>(&content) {
            Ok(config) => config,
            Err(e) => fail("Invalid beacon.toml", &e.to_string()),
        }
    } else {
        println!("cargo:warning=beacon.toml not found, using defaults");
        BeaconConfig::default()
    };

    if let Err(e) = config.validate() {
        fail("Invalid beacon.toml", describe(e));
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = format!(
        "/// Settings from beacon.toml\n\
         pub const BEACON_CONFIG: BeaconConfig = BeaconConfig {{\n    \
             unit_ms: {},\n    \
             idle_timeout_ms: {},\n    \
             baudrate: {},\n\
         }};\n",
        config.unit_ms, config.idle_timeout_ms, config.baudrate
    );
    fs::write(out_dir.join("beacon_config.rs"), generated).unwrap();

    println!(
        "cargo:warning=beacon.toml validated: {} ms unit ({} WPM), {} ms idle, {} baud",
        config.unit_ms,
        config.wpm(),
        config.idle_timeout_ms,
        config.baudrate
    );
}

fn describe(e: ConfigError) -> &'static str {
    match e {
        ConfigError::UnitOutOfRange => "unit_ms must be between 20 and 2000",
        ConfigError::IdleTooShort => "idle_timeout_ms must be longer than unit_ms",
        ConfigError::BadBaudrate => "baudrate must be a standard rate (1200..=115200)",
    }
}

fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

//! Build script for booknook-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates booknook.toml at compile time
//! - Generates board_config.rs from the validated values

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest GPIO number on RP2040
const MAX_GPIO: u8 = 29;

/// GPIOs wired to the ADC (ADC0-ADC3)
const ADC_GPIOS: [u8; 4] = [26, 27, 28, 29];

/// Pin roles in booknook.toml, in generation order
const PIN_ROLES: [&str; 7] = [
    "shift_data",
    "shift_clock",
    "shift_latch",
    "motion",
    "touch_charge",
    "touch_sense",
    "status_led",
];

fn main() {
    setup_linker();
    let board = validate_config();
    generate_board_config(&board);
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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values extracted from a valid booknook.toml
struct BoardValues {
    pins: BTreeMap<&'static str, u8>,
    edge_delay_ns: u32,
    timeout_s: u8,
    active_low: bool,
    eligible_mask: u8,
    threshold: u16,
    debounce_scans: u8,
    baseline_shift: u8,
    samples_log2: u8,
    calibration_readings: u8,
    scan_interval_ms: u16,
    settle_us: u32,
}

/// Validate booknook.toml configuration at compile time
fn validate_config() -> BoardValues {
    println!("cargo:rerun-if-changed=booknook.toml");

    let config_path = Path::new("booknook.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: booknook.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a booknook.toml board configuration.      ║\n\
            ║  Please create one in the booknook-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read booknook.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in booknook.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);

    let mut errors = Vec::new();
    let pins = validate_pins(&config, &mut errors);
    let values = validate_values(&config, pins, &mut errors);
    report_errors("Invalid board configuration", &errors);

    println!("cargo:warning=booknook.toml validated successfully");

    // Every field was checked above
    values.unwrap()
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

/// Panic with a boxed list of errors, if there are any
fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["pins", "shift_register", "motion", "touch"]
        .iter()
        .filter(|section| !matches!(config.get(**section), Some(toml::Value::Table(_))))
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    report_errors("Missing required sections in booknook.toml", &errors);
}

/// Parse a pin string like "gpio18"
fn parse_pin(value: &str) -> Option<u8> {
    let number = value.trim().to_ascii_lowercase();
    let number = number.strip_prefix("gpio")?;
    let pin: u8 = number.parse().ok()?;
    (pin <= MAX_GPIO).then_some(pin)
}

/// Validate pin assignments: known format, in range, no pin used twice
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) -> BTreeMap<&'static str, u8> {
    let mut pins = BTreeMap::new();
    let mut owners: BTreeMap<u8, &'static str> = BTreeMap::new();

    for role in PIN_ROLES {
        let pin = match config.get("pins").and_then(|p| p.get(role)) {
            Some(toml::Value::String(value)) => match parse_pin(value) {
                Some(pin) => pin,
                None => {
                    errors.push(format!("[pins] {} = \"{}\" is not gpio0-gpio29", role, value));
                    continue;
                }
            },
            Some(_) => {
                errors.push(format!("[pins] {} must be a string like \"gpio18\"", role));
                continue;
            }
            None => {
                errors.push(format!("[pins] missing '{}'", role));
                continue;
            }
        };

        if let Some(owner) = owners.insert(pin, role) {
            errors.push(format!("[pins] gpio{} used by both {} and {}", pin, owner, role));
        }
        pins.insert(role, pin);
    }

    if let Some(sense) = pins.get("touch_sense") {
        if !ADC_GPIOS.contains(sense) {
            errors.push(format!("[pins] touch_sense gpio{} is not an ADC pin (gpio26-29)", sense));
        }
    }

    pins
}

/// Read an integer field and check it is within `min..=max`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => Some(*value),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Validate numeric tunables and the motion strip list
fn validate_values(
    config: &toml::Value,
    pins: BTreeMap<&'static str, u8>,
    errors: &mut Vec<String>,
) -> Option<BoardValues> {
    let edge_delay_ns = integer(config, "shift_register", "edge_delay_ns", 0, 1_000_000, errors);

    let timeout_s = integer(config, "motion", "timeout_s", 1, 255, errors);
    let active_low = match config.get("motion").and_then(|m| m.get("active_low")) {
        Some(toml::Value::Boolean(value)) => Some(*value),
        Some(_) => {
            errors.push("[motion] active_low must be true or false".to_string());
            None
        }
        None => {
            errors.push("[motion] missing 'active_low'".to_string());
            None
        }
    };
    let eligible_mask = eligible_mask(config, errors);

    let threshold = integer(config, "touch", "threshold", 1, 1023, errors);
    let debounce_scans = integer(config, "touch", "debounce_scans", 1, 255, errors);
    let baseline_shift = integer(config, "touch", "baseline_shift", 1, 15, errors);
    let samples_per_scan = integer(config, "touch", "samples_per_scan", 1, 256, errors);
    let calibration_readings = integer(config, "touch", "calibration_readings", 1, 255, errors);
    let scan_interval_ms = integer(config, "touch", "scan_interval_ms", 1, 1000, errors);
    let settle_us = integer(config, "touch", "settle_us", 0, 1000, errors);

    let samples_log2 = samples_per_scan.and_then(|n| {
        if (n as u32).is_power_of_two() {
            Some((n as u32).trailing_zeros() as u8)
        } else {
            errors.push(format!("[touch] samples_per_scan {} is not a power of two", n));
            None
        }
    });

    if pins.len() != PIN_ROLES.len() {
        return None;
    }

    Some(BoardValues {
        pins,
        edge_delay_ns: edge_delay_ns? as u32,
        timeout_s: timeout_s? as u8,
        active_low: active_low?,
        eligible_mask: eligible_mask?,
        threshold: threshold? as u16,
        debounce_scans: debounce_scans? as u8,
        baseline_shift: baseline_shift? as u8,
        samples_log2: samples_log2?,
        calibration_readings: calibration_readings? as u8,
        scan_interval_ms: scan_interval_ms? as u16,
        settle_us: settle_us? as u32,
    })
}

/// Convert `eligible_strips = [1, 2, ...]` to a strip mask
fn eligible_mask(config: &toml::Value, errors: &mut Vec<String>) -> Option<u8> {
    let strips = match config.get("motion").and_then(|m| m.get("eligible_strips")) {
        Some(toml::Value::Array(strips)) => strips,
        Some(_) => {
            errors.push("[motion] eligible_strips must be an array".to_string());
            return None;
        }
        None => {
            errors.push("[motion] missing 'eligible_strips'".to_string());
            return None;
        }
    };

    let mut mask = 0u8;
    for strip in strips {
        match strip {
            toml::Value::Integer(n @ 1..=8) => mask |= 1u8 << (n - 1),
            other => {
                errors.push(format!("[motion] eligible strip {} is not 1-8", other));
                return None;
            }
        }
    }
    Some(mask)
}

/// Write board_config.rs into OUT_DIR
fn generate_board_config(board: &BoardValues) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let pin = |role: &str| board.pins[role];

    let mut code = String::new();
    code.push_str("// Generated by build.rs from booknook.toml\n\n");

    code.push_str(&format!(
        "/// Controller tunables\n\
        pub const CONTROLLER_CONFIG: ControllerConfig = ControllerConfig {{\n    \
            motion: MotionConfig {{\n        \
                timeout_s: {},\n        \
                eligible: StripMask::from_bits({:#04x}),\n    \
            }},\n    \
            touch: TouchConfig {{\n        \
                threshold: {},\n        \
                debounce_scans: {},\n        \
                baseline_shift: {},\n        \
                samples_log2: {},\n        \
                calibration_readings: {},\n        \
                scan_interval_ms: {},\n    \
            }},\n\
        }};\n\n",
        board.timeout_s,
        board.eligible_mask,
        board.threshold,
        board.debounce_scans,
        board.baseline_shift,
        board.samples_log2,
        board.calibration_readings,
        board.scan_interval_ms,
    ));

    code.push_str(&format!(
        "/// Motion input polarity\n\
        pub const MOTION_ACTIVE_LOW: bool = {};\n\n\
        /// Shift register clock/latch hold time (ns)\n\
        pub const SHIFT_EDGE_DELAY_NS: u32 = {};\n\n\
        /// Touch pad charge hold time (us)\n\
        pub const TOUCH_SETTLE_US: u32 = {};\n\n",
        board.active_low, board.edge_delay_ns, board.settle_us,
    ));

    code.push_str(&format!(
        "impl Board {{\n    \
            /// Take the board's pins out of the peripheral set\n    \
            pub fn split(p: Peripherals) -> Self {{\n        \
                Self {{\n            \
                    shift_data: p.PIN_{}.into(),\n            \
                    shift_clock: p.PIN_{}.into(),\n            \
                    shift_latch: p.PIN_{}.into(),\n            \
                    motion: p.PIN_{}.into(),\n            \
                    touch_charge: p.PIN_{}.into(),\n            \
                    touch_sense: Channel::new_pin(p.PIN_{}, Pull::None),\n            \
                    status_led: p.PIN_{}.into(),\n            \
                    adc: p.ADC,\n        \
                }}\n    \
            }}\n\
        }}\n",
        pin("shift_data"),
        pin("shift_clock"),
        pin("shift_latch"),
        pin("motion"),
        pin("touch_charge"),
        pin("touch_sense"),
        pin("status_led"),
    ));

    fs::write(out_dir.join("board_config.rs"), code).unwrap();
}

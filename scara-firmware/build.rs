//! Build script for scara-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates robot.toml and compiles it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let config = load_config();
    generate_config(&config, &out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Robot description pulled out of robot.toml
struct Robot {
    origin: (f64, f64),
    steps_per_degree: f64,
    upper: (f64, f64),
    lower: (f64, f64),
    steps_per_mm: f64,
    travel_max_mm: f64,
    shoulder_gear_mismatch: f64,
    default_motor_on_ms: i64,
    step_interval_us: i64,
    step_pulse_us: i64,
    dir_setup_ns: i64,
    invert_direction: bool,
    pen_active_low: bool,
}

/// Read and validate robot.toml
fn load_config() -> Robot {
    println!("cargo:rerun-if-changed=robot.toml");

    let config_path = Path::new("robot.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: robot.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a robot.toml description of the arm.      ║\n\
            ║  Please create one in the scara-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read robot.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in robot.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let mut fields = Fields {
        config: &config,
        errors: &mut errors,
    };

    let origin = (fields.number("origin", "x"), fields.number("origin", "y"));

    let full_step_deg = fields.positive("drive", "full_step_deg");
    let microsteps = fields.positive("drive", "microsteps");
    let pulley_teeth = fields.positive("drive", "pulley_teeth");
    let gear_teeth = fields.positive("drive", "gear_teeth");

    let upper = (
        fields.positive("upper", "arm_len"),
        fields.angle("upper", "max_angle_deg"),
    );
    let lower = (
        fields.positive("lower", "arm_len"),
        fields.angle("lower", "max_angle_deg"),
    );

    let steps_per_mm = fields.positive("vertical", "steps_per_mm");
    let travel_max_mm = fields.positive("vertical", "travel_max_mm");

    let shoulder_teeth = fields.positive("motion", "shoulder_gear_teeth");
    let elbow_teeth = fields.positive("motion", "elbow_gear_teeth");
    let default_motor_on_ms = fields.integer("motion", "default_motor_on_ms", 0, 1_000_000_000);
    let step_interval_us = fields.integer("motion", "step_interval_us", 0, 1_000_000);
    let step_pulse_us = fields.integer("motion", "step_pulse_us", 1, 1_000);
    let dir_setup_ns = fields.integer("motion", "dir_setup_ns", 0, 1_000_000);

    let invert_direction = fields.flag("wiring", "invert_direction");
    let pen_active_low = fields.flag("wiring", "pen_active_low");

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid robot configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=robot.toml validated successfully");

    Robot {
        origin,
        steps_per_degree: 1.0 / ((full_step_deg / microsteps) * (pulley_teeth / gear_teeth)),
        upper,
        lower,
        steps_per_mm,
        travel_max_mm,
        shoulder_gear_mismatch: (elbow_teeth - shoulder_teeth) / shoulder_teeth,
        default_motor_on_ms,
        step_interval_us,
        step_pulse_us,
        dir_setup_ns,
        invert_direction,
        pen_active_low,
    }
}

/// Field lookup that collects every problem before failing
struct Fields<'a> {
    config: &'a toml::Value,
    errors: &'a mut Vec<String>,
}

impl Fields<'_> {
    fn value(&mut self, section: &str, key: &str) -> Option<toml::Value> {
        let config = self.config;
        let table = match config.get(section) {
            Some(toml::Value::Table(t)) => t,
            Some(_) => {
                let msg = format!("[{}] must be a table", section);
                if !self.errors.contains(&msg) {
                    self.errors.push(msg);
                }
                return None;
            }
            None => {
                let msg = format!("Missing [{}] section", section);
                if !self.errors.contains(&msg) {
                    self.errors.push(msg);
                }
                return None;
            }
        };
        let value = table.get(key).cloned();
        if value.is_none() {
            self.errors.push(format!("[{}] missing '{}'", section, key));
        }
        value
    }

    fn number(&mut self, section: &str, key: &str) -> f64 {
        match self.value(section, key) {
            Some(toml::Value::Float(v)) => v,
            Some(toml::Value::Integer(v)) => v as f64,
            Some(_) => {
                self.errors
                    .push(format!("[{}] '{}' must be a number", section, key));
                0.0
            }
            None => 0.0,
        }
    }

    fn positive(&mut self, section: &str, key: &str) -> f64 {
        let v = self.number(section, key);
        if v <= 0.0 && self.config.get(section).and_then(|s| s.get(key)).is_some() {
            self.errors
                .push(format!("[{}] '{}' must be greater than 0", section, key));
            return 1.0;
        }
        v
    }

    fn angle(&mut self, section: &str, key: &str) -> f64 {
        let v = self.positive(section, key);
        if v > 180.0 {
            self.errors
                .push(format!("[{}] '{}' must be 0-180", section, key));
        }
        v
    }

    fn integer(&mut self, section: &str, key: &str, min: i64, max: i64) -> i64 {
        match self.value(section, key) {
            Some(toml::Value::Integer(v)) if (min..=max).contains(&v) => v,
            Some(toml::Value::Integer(_)) => {
                self.errors
                    .push(format!("[{}] '{}' must be {}-{}", section, key, min, max));
                min
            }
            Some(_) => {
                self.errors
                    .push(format!("[{}] '{}' must be an integer", section, key));
                min
            }
            None => min,
        }
    }

    fn flag(&mut self, section: &str, key: &str) -> bool {
        match self.value(section, key) {
            Some(toml::Value::Boolean(v)) => v,
            Some(_) => {
                self.errors
                    .push(format!("[{}] '{}' must be true or false", section, key));
                false
            }
            None => false,
        }
    }
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

/// Write the validated robot as Rust constants into OUT_DIR/robot_config.rs
fn generate_config(robot: &Robot, out_dir: &Path) {
    let source = format!(
        "// Generated by build.rs from robot.toml\n\
         \n\
         pub const ROBOT_CONFIG: RobotConfig = RobotConfig {{\n\
         \x20   origin: Point {{ x: {:?}, y: {:?} }},\n\
         \x20   upper: JointConfig {{ arm_len: {:?}, steps_per_degree: {:?}, max_angle_deg: {:?} }},\n\
         \x20   lower: JointConfig {{ arm_len: {:?}, steps_per_degree: {:?}, max_angle_deg: {:?} }},\n\
         \x20   vertical: VerticalConfig {{ steps_per_mm: {:?}, travel_max_mm: {:?} }},\n\
         \x20   shoulder_gear_mismatch: {:?},\n\
         \x20   default_motor_on_ms: {},\n\
         \x20   step_interval_us: {},\n\
         }};\n\
         \n\
         pub const STEP_TIMING: StepTiming = StepTiming {{ pulse_width_us: {}, dir_setup_ns: {} }};\n\
         pub const INVERT_DIRECTION: bool = {};\n\
         pub const PEN_ACTIVE_LOW: bool = {};\n",
        robot.origin.0,
        robot.origin.1,
        robot.upper.0,
        robot.steps_per_degree,
        robot.upper.1,
        robot.lower.0,
        robot.steps_per_degree,
        robot.lower.1,
        robot.steps_per_mm,
        robot.travel_max_mm,
        robot.shoulder_gear_mismatch,
        robot.default_motor_on_ms,
        robot.step_interval_us,
        robot.step_pulse_us,
        robot.dir_setup_ns,
        robot.invert_direction,
        robot.pen_active_low,
    );

    fs::write(out_dir.join("robot_config.rs"), source).unwrap();
}

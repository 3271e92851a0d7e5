//! Serial command interpreter
//!
//! Bytes arrive one at a time through [`CommandInterpreter::handle_byte`].
//! Completed lines are parsed, validated and dispatched to the motion
//! manager and the motor interlock. Every command yields a status line;
//! failures never propagate past this point.

pub mod status;

use scara_protocol::{extract_int, extract_num, CommandLine, Echo, LineAssembler, LineEvent, Opcode};

use crate::config::{RobotConfig, WorkspaceBounds};
use crate::geometry::{CirclePath, LinePath, Point};
use crate::motion::{Joint, MotionError, MotionManager};
use crate::safety::MotorInterlock;
use crate::traits::{ArmHardware, StatusDisplay};

use status::status;
pub use status::{Status, STATUS_LEN};

/// Step range accepted by the jog commands
pub const JOG_LIMIT: i32 = 1000;

/// Largest motor-on time accepted by E1 and D0
pub const MAX_MOTOR_ON_MS: f64 = 1e9;

/// Shown once at startup
pub const READY: &str = "Ready";

/// What to send back after one received byte
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Terminal echo for the byte
    pub echo: Echo,
    /// Status of a command completed by this byte
    pub status: Option<Status>,
}

/// Turns serial bytes into arm motion
pub struct CommandInterpreter<H: ArmHardware, D: StatusDisplay> {
    motion: MotionManager<H>,
    interlock: MotorInterlock,
    display: D,
    assembler: LineAssembler,
    bounds: WorkspaceBounds,
    /// Motor-on time for enables without an explicit duration
    motor_on_ms: u32,
    pen_down: bool,
}

impl<H: ArmHardware, D: StatusDisplay> CommandInterpreter<H, D> {
    /// Create an interpreter with motors released and the pen up
    pub fn new(config: RobotConfig, hardware: H, display: D) -> Self {
        let bounds = config.bounds();
        let motor_on_ms = config.default_motor_on_ms;
        let mut motion = MotionManager::new(config, hardware);
        let mut interlock = MotorInterlock::new();
        interlock.disable(motion.hardware_mut());
        motion.hardware_mut().set_pen(false);

        let mut interpreter = Self {
            motion,
            interlock,
            display,
            assembler: LineAssembler::new(),
            bounds,
            motor_on_ms,
            pen_down: false,
        };
        interpreter.display.show_status(READY);
        interpreter
    }

    pub fn motion(&self) -> &MotionManager<H> {
        &self.motion
    }

    pub fn interlock(&self) -> &MotorInterlock {
        &self.interlock
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn hardware(&self) -> &H {
        self.motion.hardware()
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        self.motion.hardware_mut()
    }

    /// Current default motor-on time in ms
    pub fn motor_on_ms(&self) -> u32 {
        self.motor_on_ms
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Feed one received byte
    pub fn handle_byte(&mut self, byte: u8) -> Response {
        match self.assembler.feed(byte) {
            LineEvent::Echo(echo) => Response { echo, status: None },
            LineEvent::Ignored => Response::default(),
            LineEvent::Overflow => {
                #[cfg(feature = "defmt")]
                defmt::warn!("line longer than {} bytes discarded", scara_protocol::MAX_LINE_LEN);
                Response {
                    echo: Echo::new(),
                    status: Some(self.report(status!("Line too long"))),
                }
            }
            LineEvent::Complete(line) => {
                let status = match line.as_str() {
                    Some(text) => self.execute(text),
                    None => Some(self.report(status!("Unknown"))),
                };
                Response {
                    echo: Echo::new(),
                    status,
                }
            }
        }
    }

    /// Run the motor-on timeout check
    ///
    /// Call on every control loop pass. Returns `true` if the motors were
    /// released by this call.
    pub fn tick(&mut self) -> bool {
        self.interlock.check_timeout(self.motion.hardware_mut())
    }

    /// Execute one command line
    ///
    /// Returns the status shown for the command, or `None` for a blank line
    /// or a rejected `D0`.
    pub fn execute(&mut self, line: &str) -> Option<Status> {
        let cmd = CommandLine::split(line)?;
        let status = match cmd.opcode() {
            Some(op) => self.dispatch(op, cmd.tokens())?,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("unknown command {=str}", cmd.opcode_token());
                status!("Unknown {}", line.trim())
            }
        };
        Some(self.report(status))
    }

    fn report(&mut self, status: Status) -> Status {
        self.display.show_status(&status);
        status
    }

    fn dispatch(&mut self, op: Opcode, tokens: &[&str]) -> Option<Status> {
        let b = self.bounds;
        let status = match op {
            Opcode::MoveTo => {
                let (x, y) = match (
                    extract_num(tokens, 1, b.min_x, b.max_x),
                    extract_num(tokens, 2, b.min_y, b.max_y),
                ) {
                    (Ok(x), Ok(y)) => (x, y),
                    _ => return Some(invalid(op)),
                };
                self.enable_default();
                match self.motion.move_to(Point::new(x, y)) {
                    Ok(_) => status!("Go {}, {}", x, y),
                    Err(MotionError::Unreachable(_)) => status!("Unreachable {}, {}", x, y),
                    Err(MotionError::OutOfRange { joint }) => {
                        status!("Out of range {}", joint.name())
                    }
                }
            }
            Opcode::MoveVertical => {
                let z = match extract_num(tokens, 1, b.min_z, b.max_z) {
                    Ok(z) => z,
                    Err(_) => return Some(invalid(op)),
                };
                self.enable_default();
                self.motion.move_vertical(z);
                status!("Vertical {}", z)
            }
            Opcode::StepUpper | Opcode::StepLower => {
                let steps = match extract_int(tokens, 1, -JOG_LIMIT, JOG_LIMIT) {
                    Ok(steps) => steps,
                    Err(_) => return Some(invalid(op)),
                };
                let joint = if op == Opcode::StepUpper {
                    Joint::Upper
                } else {
                    Joint::Lower
                };
                self.enable_default();
                self.motion.jog(joint, steps);
                status!("Step {} {}", joint.name(), steps)
            }
            Opcode::Calibrate => {
                self.motion.calibrate();
                status!("Calibrated")
            }
            Opcode::HomeVertical => {
                self.motion.home_vertical();
                status!("Vertical home")
            }
            Opcode::PenUp | Opcode::PenDown => {
                let down = op == Opcode::PenDown;
                self.motion.hardware_mut().set_pen(down);
                self.pen_down = down;
                if down {
                    status!("Pen Down")
                } else {
                    status!("Pen Up")
                }
            }
            Opcode::MotorsOff => {
                self.interlock.disable(self.motion.hardware_mut());
                status!("Disable Motors")
            }
            Opcode::MotorsOn => {
                let for_ms = extract_num(tokens, 1, 0.0, MAX_MOTOR_ON_MS)
                    .map(|ms| ms as u32)
                    .unwrap_or(self.motor_on_ms);
                self.interlock.enable(self.motion.hardware_mut(), for_ms);
                status!("Enable Motors")
            }
            Opcode::SetMotorOnTime => {
                let ms = extract_num(tokens, 1, 0.0, MAX_MOTOR_ON_MS).ok()? as u32;
                self.motor_on_ms = ms;
                status!("Motor on Time {}", ms)
            }
            Opcode::Query => {
                let p = self.motion.position();
                status!(
                    "Pos {:.1}, {:.1} {:.1} pen {} motors {}",
                    p.x,
                    p.y,
                    self.motion.height(),
                    if self.pen_down { "down" } else { "up" },
                    if self.interlock.is_enabled() { "on" } else { "off" }
                )
            }
            Opcode::Line => {
                let coords = (
                    extract_num(tokens, 1, b.min_x, b.max_x),
                    extract_num(tokens, 2, b.min_y, b.max_y),
                    extract_num(tokens, 3, b.min_x, b.max_x),
                    extract_num(tokens, 4, b.min_y, b.max_y),
                );
                let (start, end) = match coords {
                    (Ok(x1), Ok(y1), Ok(x2), Ok(y2)) => (Point::new(x1, y1), Point::new(x2, y2)),
                    _ => return Some(invalid(op)),
                };
                self.enable_default();
                let skipped = self.trace(LinePath::new(start, end));
                finished("Line", skipped)
            }
            Opcode::Circle => {
                let reach = b.max_x;
                let args = (
                    extract_num(tokens, 1, b.min_x, b.max_x),
                    extract_num(tokens, 2, b.min_y, b.max_y),
                    extract_num(tokens, 3, 0.0, reach),
                );
                let (center, radius) = match args {
                    (Ok(cx), Ok(cy), Ok(r)) => (Point::new(cx, cy), r),
                    _ => return Some(invalid(op)),
                };
                self.enable_default();
                let skipped = self.trace(CirclePath::new(center, radius));
                finished("Circle", skipped)
            }
        };
        Some(status)
    }

    /// Enable the motors for the default motor-on time
    fn enable_default(&mut self) {
        self.interlock
            .enable(self.motion.hardware_mut(), self.motor_on_ms);
    }

    /// Visit each point in turn, returning how many were skipped
    fn trace(&mut self, points: impl Iterator<Item = Point>) -> u32 {
        let mut skipped = 0;
        for p in points {
            if !self.bounds.contains(p) || self.motion.move_to(p).is_err() {
                skipped += 1;
            }
        }
        skipped
    }
}

fn invalid(op: Opcode) -> Status {
    status!("Invalid {}", op.as_str())
}

fn finished(shape: &str, skipped: u32) -> Status {
    if skipped == 0 {
        status!("{} done", shape)
    } else {
        status!("{} done, {} skipped", shape, skipped)
    }
}

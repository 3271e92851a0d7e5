//! Opcodes and tokenised command lines

use heapless::Vec;

/// Maximum number of whitespace separated tokens kept per line
///
/// The longest command (`L0 x1 y1 x2 y2`) needs five.
pub const MAX_TOKENS: usize = 8;

/// Recognised two-character opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// `G0 x y` - move pen to a Cartesian point
    MoveTo,
    /// `V0 z` - move the vertical axis
    MoveVertical,
    /// `S0 steps` - jog the upper joint
    StepUpper,
    /// `S1 steps` - jog the lower joint
    StepLower,
    /// `C0` - current pose becomes home
    Calibrate,
    /// `C1` - current height becomes vertical home
    HomeVertical,
    /// `P0` - lift the pen
    PenUp,
    /// `P1` - lower the pen
    PenDown,
    /// `E0` - de-energise motor drivers
    MotorsOff,
    /// `E1 [ms]` - energise motor drivers
    MotorsOn,
    /// `D0 ms` - default motor-on time
    SetMotorOnTime,
    /// `Q0` - report current position
    Query,
    /// `L0 x1 y1 x2 y2` - draw a straight line
    Line,
    /// `O0 cx cy r` - draw a circle
    Circle,
}

impl Opcode {
    /// Look up an opcode token (case sensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "G0" => Opcode::MoveTo,
            "V0" => Opcode::MoveVertical,
            "S0" => Opcode::StepUpper,
            "S1" => Opcode::StepLower,
            "C0" => Opcode::Calibrate,
            "C1" => Opcode::HomeVertical,
            "P0" => Opcode::PenUp,
            "P1" => Opcode::PenDown,
            "E0" => Opcode::MotorsOff,
            "E1" => Opcode::MotorsOn,
            "D0" => Opcode::SetMotorOnTime,
            "Q0" => Opcode::Query,
            "L0" => Opcode::Line,
            "O0" => Opcode::Circle,
            _ => return None,
        };
        Some(op)
    }

    /// Wire form of this opcode
    pub fn as_str(self) -> &'static str {
        match self {
            Opcode::MoveTo => "G0",
            Opcode::MoveVertical => "V0",
            Opcode::StepUpper => "S0",
            Opcode::StepLower => "S1",
            Opcode::Calibrate => "C0",
            Opcode::HomeVertical => "C1",
            Opcode::PenUp => "P0",
            Opcode::PenDown => "P1",
            Opcode::MotorsOff => "E0",
            Opcode::MotorsOn => "E1",
            Opcode::SetMotorOnTime => "D0",
            Opcode::Query => "Q0",
            Opcode::Line => "L0",
            Opcode::Circle => "O0",
        }
    }
}

/// A line split into whitespace separated tokens
///
/// Token 0 is the opcode; numeric arguments start at index 1. Tokens
/// beyond [`MAX_TOKENS`] are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    tokens: Vec<&'a str, MAX_TOKENS>,
}

impl<'a> CommandLine<'a> {
    /// Split a line into tokens
    ///
    /// Returns `None` for a blank line.
    pub fn split(line: &'a str) -> Option<Self> {
        let mut tokens = Vec::new();
        for token in line.split_whitespace() {
            if tokens.push(token).is_err() {
                break;
            }
        }
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// The first token, as typed
    pub fn opcode_token(&self) -> &'a str {
        self.tokens[0]
    }

    /// The opcode, if recognised
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_token(self.opcode_token())
    }

    /// All tokens including the opcode
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
}

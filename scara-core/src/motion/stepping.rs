//! Coordinated two-joint stepping
//!
//! Integer proportional interpolation between the upper and lower joints:
//! the joint with more steps to make (the major) steps every iteration,
//! the other (the minor) steps whenever an accumulator of minor steps
//! reaches the major count. Any minor steps still owed when the major
//! finishes are issued straight after.

use super::joint::Joint;

/// Pulse order for a coordinated move
///
/// Yields the joint to pulse next. Directions are fixed for the whole
/// move and are not part of the sequence.
#[derive(Debug, Clone)]
pub struct CoordinatedSteps {
    major: Joint,
    minor: Joint,
    /// Major step count
    a: u32,
    /// Minor step count
    b: u32,
    major_taken: u32,
    minor_taken: u32,
    accumulator: u32,
    minor_pending: bool,
}

impl CoordinatedSteps {
    /// Plan pulses for signed upper and lower deltas
    ///
    /// The upper joint leads when both deltas are equal in size.
    pub fn new(upper_delta: i32, lower_delta: i32) -> Self {
        let upper = upper_delta.unsigned_abs();
        let lower = lower_delta.unsigned_abs();
        let (major, minor, a, b) = if lower > upper {
            (Joint::Lower, Joint::Upper, lower, upper)
        } else {
            (Joint::Upper, Joint::Lower, upper, lower)
        };
        Self {
            major,
            minor,
            a,
            b,
            major_taken: 0,
            minor_taken: 0,
            accumulator: 0,
            minor_pending: false,
        }
    }

    /// Joint taking a step on every iteration
    pub fn major(&self) -> Joint {
        self.major
    }

    fn remaining(&self) -> u32 {
        (self.a - self.major_taken) + (self.b - self.minor_taken)
    }
}

impl Iterator for CoordinatedSteps {
    type Item = Joint;

    fn next(&mut self) -> Option<Joint> {
        if self.minor_pending {
            self.minor_pending = false;
            self.minor_taken += 1;
            return Some(self.minor);
        }

        if self.major_taken < self.a {
            self.major_taken += 1;
            self.accumulator += self.b;
            if self.accumulator >= self.a {
                self.accumulator -= self.a;
                self.minor_pending = true;
            }
            return Some(self.major);
        }

        // Catch-up once the major joint is done
        if self.minor_taken < self.b {
            self.minor_taken += 1;
            return Some(self.minor);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CoordinatedSteps {}

#[cfg(test)]
mod tests {
    use super::*;

    fn minor_positions(steps: CoordinatedSteps) -> Vec<usize> {
        let minor = match steps.major() {
            Joint::Upper => Joint::Lower,
            _ => Joint::Upper,
        };
        let mut major_count = 0;
        let mut positions = Vec::new();
        for joint in steps {
            if joint == minor {
                positions.push(major_count);
            } else {
                major_count += 1;
            }
        }
        positions
    }

    #[test]
    fn test_ten_by_three_spread() {
        let steps = CoordinatedSteps::new(10, 3);
        assert_eq!(steps.major(), Joint::Upper);
        assert_eq!(steps.len(), 13);

        let seq: Vec<Joint> = steps.clone().collect();
        assert_eq!(seq.iter().filter(|j| **j == Joint::Upper).count(), 10);
        assert_eq!(seq.iter().filter(|j| **j == Joint::Lower).count(), 3);

        // Minor steps follow major steps 4, 7 and 10
        assert_eq!(minor_positions(steps), vec![4, 7, 10]);
    }

    #[test]
    fn test_lower_leads_when_larger() {
        let steps = CoordinatedSteps::new(-2, 8);
        assert_eq!(steps.major(), Joint::Lower);
        assert_eq!(minor_positions(steps), vec![4, 8]);
    }

    #[test]
    fn test_equal_counts_alternate() {
        let seq: Vec<Joint> = CoordinatedSteps::new(3, -3).collect();
        assert_eq!(
            seq,
            vec![
                Joint::Upper,
                Joint::Lower,
                Joint::Upper,
                Joint::Lower,
                Joint::Upper,
                Joint::Lower
            ]
        );
    }

    #[test]
    fn test_single_joint_move() {
        let seq: Vec<Joint> = CoordinatedSteps::new(0, 5).collect();
        assert_eq!(seq, vec![Joint::Lower; 5]);
    }

    #[test]
    fn test_no_movement() {
        assert_eq!(CoordinatedSteps::new(0, 0).count(), 0);
    }

    #[test]
    fn test_counts_exact_for_many_ratios() {
        for a in 0..40i32 {
            for b in 0..40i32 {
                let seq: Vec<Joint> = CoordinatedSteps::new(a, -b).collect();
                let upper = seq.iter().filter(|j| **j == Joint::Upper).count();
                let lower = seq.iter().filter(|j| **j == Joint::Lower).count();
                assert_eq!(upper, a as usize);
                assert_eq!(lower, b as usize);
            }
        }
    }
}

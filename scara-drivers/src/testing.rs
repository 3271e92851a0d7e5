//! Pin and delay mocks for host tests

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Mock GPIO pin that records edges
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub writes: u32,
    pub rising_edges: u32,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        self.writes += 1;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }
}

/// Delay that only adds up requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: u32,
    /// Length of the first wait requested
    pub first_ns: Option<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
        self.first_ns.get_or_insert(ns);
    }
}

//! Status sink for the firmware
//!
//! The board has no screen; statuses go to the defmt log so they show up
//! next to the rest of the trace.

use scara_core::traits::StatusDisplay;

/// Status display backed by the RTT log
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn show_status(&mut self, status: &str) {
        #[cfg(feature = "defmt")]
        defmt::info!("status: {=str}", status);
        #[cfg(not(feature = "defmt"))]
        let _ = status;
    }
}

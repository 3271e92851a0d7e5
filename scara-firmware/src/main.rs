//! SCARA plotter arm firmware
//!
//! Main firmware binary for an RP2040 driving a two-joint SCARA arm with a
//! pen lift and a vertical axis. ASCII commands arrive on UART0, every byte
//! is echoed and each completed line answers with one status line.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig, Uart};
use embassy_time::{Delay, Instant, Timer};
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use scara_core::interpreter::{CommandInterpreter, Response};
use scara_drivers::{PenSolenoid, PinArm, StepDirDriver};

use crate::config::{INVERT_DIRECTION, PEN_ACTIVE_LOW, ROBOT_CONFIG, STEP_TIMING};
use crate::display::LogDisplay;

mod config;
mod display;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Sent once after reset
const BANNER: &[u8] = b"SCARA Arm Awaiting Command\r\n";

/// Control loop period
const LOOP_PERIOD_MS: u64 = 10;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("SCARA firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // UART0 on GPIO0 (TX) / GPIO1 (RX)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart_config = UartConfig::default(); // 115200 baud default
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let mut uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("UART initialized");

    // Stepper drivers: STEP, DIR, ENABLE per joint
    let lower = axis(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::High),
    );
    let upper = axis(
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::High),
    );
    let vertical = axis(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::High),
    );

    let pen_pin = Output::new(p.PIN_11, Level::Low);
    let pen = if PEN_ACTIVE_LOW {
        PenSolenoid::new_active_low(pen_pin)
    } else {
        PenSolenoid::new(pen_pin)
    };

    let arm = PinArm::new(upper, lower, vertical, pen, Delay, || {
        Instant::now().as_millis()
    });
    info!(
        "Arm initialized: {} mm + {} mm, {} steps/deg",
        ROBOT_CONFIG.upper.arm_len, ROBOT_CONFIG.lower.arm_len, ROBOT_CONFIG.upper.steps_per_degree
    );

    let mut interpreter = CommandInterpreter::new(ROBOT_CONFIG, arm, LogDisplay);

    if uart.write_all(BANNER).await.is_err() {
        warn!("UART write failed");
    }
    info!("Awaiting commands");

    let mut rx = [0u8; 32];
    loop {
        while uart.read_ready().unwrap_or(false) {
            let n = match uart.read(&mut rx).await {
                Ok(n) => n,
                Err(_) => {
                    warn!("UART read error");
                    break;
                }
            };
            for &byte in &rx[..n] {
                let response = interpreter.handle_byte(byte);
                send_response(&mut uart, &response).await;
            }
        }

        if interpreter.tick() {
            info!(
                "Motors released after {} ms",
                interpreter.interlock().enabled_for_ms()
            );
        }

        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}

type Axis = StepDirDriver<Output<'static>, Output<'static>, Output<'static>>;

/// Wrap one joint's pins in a driver, honouring the DIR wiring
fn axis(step: Output<'static>, dir: Output<'static>, enable: Output<'static>) -> Axis {
    let driver = StepDirDriver::new(step, dir, enable, STEP_TIMING);
    if INVERT_DIRECTION {
        driver.invert_direction()
    } else {
        driver
    }
}

/// Write the echo and status line for one received byte
async fn send_response(uart: &mut BufferedUart<'static, UART0>, response: &Response) {
    let mut result = uart.write_all(&response.echo).await;
    if let Some(status) = &response.status {
        if result.is_ok() {
            result = uart.write_all(status.as_bytes()).await;
        }
        if result.is_ok() {
            result = uart.write_all(b"\r\n").await;
        }
    }
    if result.is_err() {
        warn!("UART write failed");
    }
}

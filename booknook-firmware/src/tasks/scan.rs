//! Touch scan task
//!
//! Takes one filtered reading per scan interval and hands it to the
//! dispatcher. A failed reading skips the scan; the detector only ever
//! sees complete averages.

use defmt::*;
use embassy_time::{Duration, Ticker};

use booknook_core::touch::acquire;
use booknook_core::Event;

use crate::channels::{record_fault, EVENT_CHANNEL, SAMPLE_FAULTS};
use crate::TouchPad;

/// Scan task - periodic touch sampling
#[embassy_executor::task]
pub async fn scan_task(mut pad: TouchPad, samples_log2: u8, interval_ms: u16) {
    info!(
        "Touch scan task started ({} samples every {} ms)",
        1u16 << samples_log2,
        interval_ms
    );

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms)));

    loop {
        ticker.next().await;

        match acquire(&mut pad, samples_log2) {
            Ok(filtered) => {
                EVENT_CHANNEL.send(Event::TouchScan { filtered }).await;
            }
            Err(e) => {
                let total = record_fault(&SAMPLE_FAULTS);
                warn!("Touch scan skipped: {:?} ({} total)", e, total);
            }
        }
    }
}

//! Current-source example — drives the bundled feature over an in-memory link.
//!
//! Run with:
//!   cargo run --example current-source

use std::sync::Arc;

use sensorfeat::feature::{current_source_status, CurrentSource, SampleListener};
use sensorfeat::frame::Sample;
use sensorfeat::transport::{DeviceContext, MemoryTransport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let link = Arc::new(MemoryTransport::new());
    let device = DeviceContext::new("current-source", "C0:FF:EE:00:00:05");
    let mut source = CurrentSource::new(device, link.clone())?;

    let listener: Arc<dyn SampleListener> = Arc::new(|feature: &str, sample: &Sample| {
        eprintln!(
            "[listener] {feature} t={} status=0x{:02x}",
            sample.timestamp(),
            current_source_status(Some(sample))
        );
    });
    source.feature_mut().add_listener(listener);

    source.on_raw_frame(1, &[0x01], 0)?;

    source.percent(0x05);
    source.ramp(0x05);
    source.step(0x05);
    source.change_status(0xFF);

    for frame in link.frames() {
        eprintln!("[link] {} <- {:02x?}", frame.device, frame.bytes);
    }
    Ok(())
}

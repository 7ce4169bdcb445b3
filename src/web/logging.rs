//! Routes `tracing` output to the browser console.

use std::io;

use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

pub(super) fn install() {
    let subscriber = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(ConsoleWriter)
        .finish();
    // A second controller on the same page keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine(Vec::new())
    }
}

/// Buffers one formatted event and logs it on drop.
struct ConsoleLine(Vec<u8>);

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.0);
        let line = text.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&JsValue::from_str(line));
        }
    }
}

use spellout_core::IntentHandler;
use spellout_types::DisplayIntent;
use std::io::Write;
use tracing::warn;

/// Writes each intent as one line of JSON.
pub struct JsonLinesPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_intent(&mut self, intent: &DisplayIntent) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, intent)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> IntentHandler for JsonLinesPresenter<W> {
    fn handle_intent(&mut self, intent: &DisplayIntent) {
        if let Err(e) = self.write_intent(intent) {
            warn!("Failed to present {}: {:#}", intent.kind(), e);
        }
    }
}

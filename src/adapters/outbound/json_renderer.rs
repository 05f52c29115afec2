use crate::common::{DomainError, DomainResult};
use crate::domains::wheelchair::{SceneProjection, SceneRenderer};
use std::io::Write;

/// Writes one JSON document per frame, newline-delimited.
pub struct JsonLinesRenderer<W: Write + Send> {
    writer: W,
    frames: u64,
}

impl<W: Write + Send> JsonLinesRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> SceneRenderer for JsonLinesRenderer<W> {
    fn render(&mut self, scene: &SceneProjection) -> DomainResult<()> {
        serde_json::to_writer(&mut self.writer, scene)?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .map_err(|e| DomainError::Render(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}

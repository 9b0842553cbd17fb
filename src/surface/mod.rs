use crate::session::message_types::SurfaceCommand;
use serde::Serialize;
use std::io;

pub trait RenderSurface {
    fn apply(&mut self, command: &SurfaceCommand) -> io::Result<()>;
}

/// Writes every command as one JSON line, for whatever draws the map.
pub struct JsonLinesSurface<W: io::Write> {
    writer: W,
}

impl<W: io::Write> JsonLinesSurface<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: io::Write> RenderSurface for JsonLinesSurface<W> {
    fn apply(&mut self, command: &SurfaceCommand) -> io::Result<()> {
        if let SurfaceCommand::ReplaceGraphics { graphics } = command {
            tracing::debug!(
                task = "render",
                markers = graphics.iter().filter_map(|g| g.marker_id()).count(),
                graphics = graphics.len(),
            );
        }
        serialize_to_ndjson(&mut self.writer, command)?;
        self.writer.flush()
    }
}

fn serialize_to_ndjson<W, V>(mut writer: W, value: &V) -> io::Result<()>
where
    W: io::Write,
    V: ?Sized + Serialize,
{
    serde_json::to_writer(&mut writer, value)?;
    writer.write_all(b"\n")
}

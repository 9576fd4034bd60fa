use std::io::{self, Stdout, Write};

use crate::wizard::payload::SubmissionPayload;

/// External collaborator that receives the submitted payload.
pub trait PayloadSink {
    fn emit(&mut self, payload: &SubmissionPayload) -> io::Result<()>;
}

/// Writes the payload as JSON, one document per submission.
pub struct ConsoleSink<W: Write = Stdout> {
    writer: W,
    pretty: bool,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(pretty: bool) -> Self {
        Self::new(io::stdout(), pretty)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PayloadSink for ConsoleSink<W> {
    fn emit(&mut self, payload: &SubmissionPayload) -> io::Result<()> {
        let json = payload.to_json(self.pretty)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()
    }
}

/// Keeps every emitted payload in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    payloads: Vec<SubmissionPayload>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> &[SubmissionPayload] {
        &self.payloads
    }
}

impl PayloadSink for CollectingSink {
    fn emit(&mut self, payload: &SubmissionPayload) -> io::Result<()> {
        self.payloads.push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Value;

    #[test]
    fn console_sink_writes_compact_json_line() {
        let payload = SubmissionPayload::new(vec![("seats".into(), Value::Number(4.0))]);
        let mut sink = ConsoleSink::new(Vec::new(), false);
        sink.emit(&payload).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "{\"seats\":4}\n");
    }
}

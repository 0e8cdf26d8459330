//! Destinations for generated assertion lines.

use std::io::{self, Write};

/// Receives assertion lines in traversal order.
pub trait AssertSink {
    /// Emits one line. The line carries no trailing newline.
    fn emit(&mut self, line: &str) -> io::Result<()>;
}

/// Collects lines in memory.
impl AssertSink for Vec<String> {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

impl<S: AssertSink + ?Sized> AssertSink for &mut S {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        (**self).emit(line)
    }
}

/// Writes newline-terminated lines to any writer, flushing after each one
/// so output interleaves correctly with other writers on the same stream.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AssertSink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::<u8>::new());
        sink.emit("assert h[:t]").unwrap();
        sink.emit("refute h[:f]").unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "assert h[:t]\nrefute h[:f]\n");
    }

    #[test]
    fn test_vec_sink_through_reference() {
        fn emit_one(mut sink: impl AssertSink) {
            sink.emit("assert_nil x").unwrap();
        }

        let mut lines: Vec<String> = Vec::new();
        emit_one(&mut lines);
        assert_eq!(lines, vec!["assert_nil x".to_string()]);
    }
}

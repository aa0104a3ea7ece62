use std::io::{self, Write};

use crate::model::RepeatDonorSummary;

/// Destination of emitted summaries, called once per qualifying record in
/// processing order.
pub trait OutputSink {
    fn write(&mut self, summary: &RepeatDonorSummary) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each summary as one `|`-delimited line.
pub struct LineSink<W: Write> {
    writer: W,
    lines: u64,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for LineSink<W> {
    fn write(&mut self, summary: &RepeatDonorSummary) -> io::Result<()> {
        writeln!(self.writer, "{}", summary)?;
        self.lines += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl OutputSink for Vec<RepeatDonorSummary> {
    fn write(&mut self, summary: &RepeatDonorSummary) -> io::Result<()> {
        self.push(summary.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_sink_writes_in_order() {
        let mut sink = LineSink::new(Vec::new());
        for (count, total) in [(1usize, 100i128), (2, 300)] {
            sink.write(&RepeatDonorSummary {
                recipient_id: "C001".to_string(),
                postal_code: "12345".to_string(),
                year: 2017,
                percentile_value: 100,
                running_total: total,
                running_count: count,
            })
            .unwrap();
        }
        sink.flush().unwrap();
        assert_eq!(sink.lines_written(), 2);
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "C001|12345|2017|100|100|1\nC001|12345|2017|100|300|2\n");
    }
}

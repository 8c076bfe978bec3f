use std::io::{self, Write};

use serde::Serialize;

use crate::state::idx;

/// Read-only copy of the density field handed to the display side once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySnapshot {
    pub size: usize,
    /// Row-major by `i`, ghost ring included.
    pub density: Vec<f64>,
}

impl DensitySnapshot {
    /// Pre-allocate a snapshot buffer for a grid of the given side.
    pub fn new_empty(size: usize) -> Self {
        Self {
            size,
            density: vec![0.0; size * size],
        }
    }

    /// Density at `(i, j)`, or `None` outside `[0, size)`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.density.get(idx(i, j, self.size)).copied()
    }
}

/// Consumer of per-frame density snapshots (a renderer, a recorder, ...).
pub trait DensitySink {
    fn present(&mut self, frame: u64, snapshot: &DensitySnapshot) -> io::Result<()>;

    /// Flush anything still buffered. Called once when the run ends.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    size: usize,
    density: &'a [f64],
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DensitySink for JsonLinesSink<W> {
    fn present(&mut self, frame: u64, snapshot: &DensitySnapshot) -> io::Result<()> {
        let record = FrameRecord {
            frame,
            size: snapshot.size,
            density: &snapshot.density,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_get_bounds() {
        let mut snap = DensitySnapshot::new_empty(4);
        snap.density[idx(1, 2, 4)] = 9.0;
        assert_eq!(snap.get(1, 2), Some(9.0));
        assert_eq!(snap.get(4, 0), None);
        assert_eq!(snap.get(0, 4), None);
    }

    /// Counts flushes so buffering behaviour is observable.
    #[derive(Default)]
    struct FlushCounter {
        bytes: Vec<u8>,
        flushes: usize,
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_sink_flushes_only_on_finish() {
        let mut out = FlushCounter::default();
        {
            let mut sink = JsonLinesSink::new(&mut out);
            let snap = DensitySnapshot::new_empty(2);
            for frame in 0..5 {
                sink.present(frame, &snap).unwrap();
            }
            assert_eq!(sink.out.flushes, 0, "present should leave flushing to the writer");
            sink.finish().unwrap();
        }
        assert_eq!(out.flushes, 1);
        assert_eq!(out.bytes.iter().filter(|&&b| b == b'\n').count(), 5);
    }

    #[test]
    fn test_json_lines_sink_writes_one_line_per_frame() {
        let mut buf = Vec::new();
        let mut sink = JsonLinesSink::new(&mut buf);
        let mut snap = DensitySnapshot::new_empty(3);
        sink.present(0, &snap).unwrap();
        snap.density[idx(1, 1, 3)] = 2.5;
        sink.present(1, &snap).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["frame"], 1);
        assert_eq!(second["size"], 3);
        assert_eq!(second["density"].as_array().unwrap().len(), 9);
        assert_eq!(second["density"][4], 2.5);
    }
}

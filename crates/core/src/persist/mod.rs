use std::path::{Path, PathBuf};

use crate::{RecordBuffer, Result};

/// Durability boundary of the pipeline.
///
/// Each flush rewrites the destination with a full snapshot of the
/// record buffer; nothing is appended to disk incrementally. A failed
/// write leaves the in-memory buffer untouched so the caller can retry
/// on the next lifecycle event. There is no automatic retry and no
/// periodic flush: samples gathered after the last flush are lost if
/// the process dies without a pause or quit signal.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    path: PathBuf,
}

impl PersistenceGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination the snapshot is written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialises the buffer and overwrites the destination file.
    pub fn flush(&self, buffer: &RecordBuffer) -> Result<()> {
        std::fs::write(&self.path, buffer.snapshot())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Sample, CSV_HEADER};
    use crate::TrackedMotion;
    use glam::Vec3;

    fn tracked_sample(timestamp: f32) -> Sample {
        let motion = TrackedMotion {
            is_tracking: true,
            position: Vec3::new(0.0, 1.6, 0.0),
            velocity: Vec3::new(1.0, 0.0, 0.0),
            angular_velocity: Vec3::ZERO,
        };
        Sample::capture(timestamp, &motion)
    }

    #[test]
    fn flush_writes_header_plus_one_line_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistenceGateway::new(dir.path().join("log.csv"));

        let mut buffer = RecordBuffer::new();
        for tick in 1..=5 {
            buffer.append(tracked_sample(tick as f32 * 0.1));
        }
        gateway.flush(&buffer).unwrap();

        let written = std::fs::read_to_string(gateway.path()).unwrap();
        assert_eq!(written.lines().count(), 6);
        assert_eq!(written.lines().next(), Some(CSV_HEADER));
    }

    #[test]
    fn flush_is_idempotent_without_new_samples() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistenceGateway::new(dir.path().join("log.csv"));

        let mut buffer = RecordBuffer::new();
        buffer.append(tracked_sample(0.1));

        gateway.flush(&buffer).unwrap();
        let first = std::fs::read_to_string(gateway.path()).unwrap();
        gateway.flush(&buffer).unwrap();
        let second = std::fs::read_to_string(gateway.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn flush_overwrites_stale_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, "stale content\nmore stale content\n").unwrap();

        let gateway = PersistenceGateway::new(&path);
        gateway.flush(&RecordBuffer::new()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn failed_flush_surfaces_the_error_and_keeps_the_buffer() {
        let dir = tempfile::tempdir().unwrap();
        // The destination's parent directory does not exist.
        let gateway = PersistenceGateway::new(dir.path().join("missing").join("log.csv"));

        let mut buffer = RecordBuffer::new();
        buffer.append(tracked_sample(0.1));

        assert!(gateway.flush(&buffer).is_err());
        assert_eq!(buffer.len(), 1);
    }
}

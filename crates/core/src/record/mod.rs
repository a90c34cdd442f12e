use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{MotionTraceError, Result, TrackedMotion};

/// Column header of the persisted log. The header text and field order
/// are a compatibility contract with downstream tooling and must not
/// change.
pub const CSV_HEADER: &str = "Timestamp,PositionX,PositionY,PositionZ,VelocityX,VelocityY,VelocityZ,VelocityMagnitude,AngularVelocityX,AngularVelocityY,AngularVelocityZ,AngularVelocityMagnitude,IsTracking";

/// One decimated motion record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since session start; strictly increasing across records.
    pub timestamp: f32,
    /// World-space position in meters.
    pub position: Vec3,
    /// Linear velocity in meters per second.
    pub velocity: Vec3,
    /// Euclidean norm of `velocity`.
    pub velocity_magnitude: f32,
    /// Angular velocity in radians per second.
    pub angular_velocity: Vec3,
    /// Euclidean norm of `angular_velocity`.
    pub angular_velocity_magnitude: f32,
    /// Tracking validity at capture time. Untracked ticks never reach
    /// the buffer, so persisted rows always carry `true`.
    pub is_tracking: bool,
}

impl Sample {
    /// Builds a record from the sanitised motion of one tick.
    pub fn capture(timestamp: f32, motion: &TrackedMotion) -> Self {
        Self {
            timestamp,
            position: motion.position,
            velocity: motion.velocity,
            velocity_magnitude: motion.velocity.length(),
            angular_velocity: motion.angular_velocity,
            angular_velocity_magnitude: motion.angular_velocity.length(),
            is_tracking: motion.is_tracking,
        }
    }

    /// Renders the record as one CSV row. Timestamps use three decimal
    /// places, every other float six, and the tracking flag the literal
    /// `True`/`False` spelling expected by downstream tooling.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{:.3},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{}",
            self.timestamp,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.velocity_magnitude,
            self.angular_velocity.x,
            self.angular_velocity.y,
            self.angular_velocity.z,
            self.angular_velocity_magnitude,
            if self.is_tracking { "True" } else { "False" },
        )
    }

    /// Parses one CSV row back into a record.
    pub fn parse_csv_row(row: &str) -> Result<Self> {
        let fields: Vec<&str> = row.trim_end().split(',').collect();
        if fields.len() != 13 {
            return Err(MotionTraceError::InvalidInput(
                "log row must have exactly 13 fields",
            ));
        }

        let number = |index: usize| -> Result<f32> {
            fields[index]
                .parse::<f32>()
                .map_err(|_| MotionTraceError::InvalidInput("log row holds a non-numeric field"))
        };
        let is_tracking = match fields[12] {
            "True" => true,
            "False" => false,
            _ => {
                return Err(MotionTraceError::InvalidInput(
                    "tracking flag must be True or False",
                ))
            }
        };

        Ok(Self {
            timestamp: number(0)?,
            position: Vec3::new(number(1)?, number(2)?, number(3)?),
            velocity: Vec3::new(number(4)?, number(5)?, number(6)?),
            velocity_magnitude: number(7)?,
            angular_velocity: Vec3::new(number(8)?, number(9)?, number(10)?),
            angular_velocity_magnitude: number(11)?,
            is_tracking,
        })
    }
}

/// Append-only in-memory log of decimated samples.
///
/// The buffer is deliberately unbounded: a session-scoped logger accepts
/// growth for the session's lifetime and is cleared only by explicit
/// operator action, never by a timer or an eviction policy.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    samples: Vec<Sample>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record. Amortised O(1), never fails.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Returns all records appended so far, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Serialises the buffer as CSV text: the column header followed by
    /// one row per record, newest last, each line newline-terminated.
    pub fn snapshot(&self) -> String {
        let mut out = String::with_capacity(64 + self.samples.len() * 128);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for sample in &self.samples {
            out.push_str(&sample.to_csv_row());
            out.push('\n');
        }
        out
    }

    /// Drops every record. Irreversible; the next snapshot holds the
    /// header line only.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: f32) -> Sample {
        Sample {
            timestamp,
            position: Vec3::new(0.25, 1.5, -2.0),
            velocity: Vec3::new(1.0, 2.0, 2.0),
            velocity_magnitude: 3.0,
            angular_velocity: Vec3::new(0.0, 3.0, 4.0),
            angular_velocity_magnitude: 5.0,
            is_tracking: true,
        }
    }

    #[test]
    fn snapshot_of_empty_buffer_is_header_only() {
        let buffer = RecordBuffer::new();
        assert_eq!(buffer.snapshot(), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn snapshot_lists_samples_newest_last() {
        let mut buffer = RecordBuffer::new();
        buffer.append(sample(0.1));
        buffer.append(sample(0.2));

        let snapshot = buffer.snapshot();
        let lines: Vec<&str> = snapshot.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("0.100,"));
        assert!(lines[2].starts_with("0.200,"));
    }

    #[test]
    fn clear_resets_to_header_only() {
        let mut buffer = RecordBuffer::new();
        buffer.append(sample(0.1));
        buffer.clear();

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.lines().count(), 1);
        assert_eq!(snapshot.lines().next(), Some(CSV_HEADER));
    }

    #[test]
    fn row_formatting_matches_the_contract() {
        let row = sample(1.23456).to_csv_row();
        assert!(row.starts_with("1.235,"));
        assert!(row.contains(",3.000000,"));
        assert!(row.ends_with(",True"));
        assert_eq!(row.split(',').count(), 13);
    }

    #[test]
    fn row_round_trips_within_precision() {
        let original = sample(12.345);
        let parsed = Sample::parse_csv_row(&original.to_csv_row()).unwrap();

        assert!((parsed.timestamp - original.timestamp).abs() < 0.001);
        assert!((parsed.position - original.position).length() < 1e-5);
        assert!((parsed.velocity - original.velocity).length() < 1e-5);
        assert!((parsed.velocity_magnitude - original.velocity_magnitude).abs() < 1e-5);
        assert!((parsed.angular_velocity - original.angular_velocity).length() < 1e-5);
        assert_eq!(parsed.is_tracking, original.is_tracking);
    }

    #[test]
    fn rejects_malformed_rows() {
        assert!(Sample::parse_csv_row("1.0,2.0,3.0").is_err());
        let mut row = sample(0.1).to_csv_row();
        row = row.replace(",True", ",yes");
        assert!(Sample::parse_csv_row(&row).is_err());
    }
}

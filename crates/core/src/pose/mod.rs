use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Raw per-tick reading handed over by the host's pose source.
///
/// The core never talks to tracking hardware itself; the host polls its
/// device abstraction once per tick and passes the result in. A tick
/// without a reading leaves the whole pipeline inert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoseReading {
    /// Whether the tracking system currently recognises the device.
    pub is_valid: bool,
    /// Whether the device is active within the tracking volume.
    pub is_active: bool,
    /// World-space position in meters.
    pub position: Vec3,
    /// Linear velocity in meters per second.
    pub linear_velocity: Vec3,
    /// Angular velocity in radians per second.
    pub angular_velocity: Vec3,
}

/// Sanitised motion state derived from a [`PoseReading`].
///
/// When tracking is lost the velocities are forced to zero rather than
/// left at their last reported values, so an untracked device can never
/// feed stale motion into the audio feedback or the durable log.
#[derive(Debug, Clone, Copy)]
pub struct TrackedMotion {
    pub is_tracking: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl TrackedMotion {
    /// Samples the reading, combining the two validity flags and zeroing
    /// velocities for untracked ticks.
    pub fn from_reading(reading: &PoseReading) -> Self {
        let is_tracking = reading.is_valid && reading.is_active;
        if is_tracking {
            Self {
                is_tracking,
                position: reading.position,
                velocity: reading.linear_velocity,
                angular_velocity: reading.angular_velocity,
            }
        } else {
            Self {
                is_tracking,
                position: reading.position,
                velocity: Vec3::ZERO,
                angular_velocity: Vec3::ZERO,
            }
        }
    }

    /// Euclidean norm of the linear velocity.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

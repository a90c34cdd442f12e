//! Core library for the Motion Trace session logger.
//!
//! The crate implements a tick-driven motion-sample pipeline: a host
//! polls its pose source once per frame and hands the reading to a
//! [`MotionSession`], which sanitises it, decimates it into a durable
//! record buffer, drives speed-proportional audio feedback, and flushes
//! the accumulated log to a CSV file on lifecycle boundaries. Each
//! module owns one stage of that pipeline; the host supplies tracking,
//! audio output and the driver loop.

pub mod audio;
pub mod config;
pub mod decimate;
pub mod error;
pub mod persist;
pub mod pose;
pub mod record;
pub mod session;

pub use audio::{AudioFeedback, AudioSink, MOVEMENT_THRESHOLD};
pub use config::SessionConfig;
pub use decimate::Decimator;
pub use error::{MotionTraceError, Result};
pub use persist::PersistenceGateway;
pub use pose::{PoseReading, TrackedMotion};
pub use record::{RecordBuffer, Sample, CSV_HEADER};
pub use session::{LifecycleSignal, MotionSession};

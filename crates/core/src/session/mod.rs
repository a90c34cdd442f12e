use crate::{
    AudioFeedback, AudioSink, Decimator, PersistenceGateway, PoseReading, RecordBuffer, Result,
    Sample, SessionConfig, TrackedMotion,
};

/// Host lifecycle boundaries that trigger a durable flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    Pause,
    Quit,
}

/// Owner of all per-session state: the record buffer, the decimation
/// window and the audio feedback state machine.
///
/// The session is single-threaded and tick-driven; every operation runs
/// to completion before the host supplies the next tick. A host that
/// delivers lifecycle signals from another thread must wrap the session
/// in its own mutual-exclusion boundary.
pub struct MotionSession {
    config: SessionConfig,
    decimator: Decimator,
    buffer: RecordBuffer,
    feedback: AudioFeedback,
    sink: Option<Box<dyn AudioSink>>,
    gateway: PersistenceGateway,
    missing_pose_reported: bool,
}

impl MotionSession {
    /// Creates a session from a validated configuration and an optional
    /// audio sink. A missing sink disables feedback for the whole
    /// session; the rest of the pipeline is unaffected.
    pub fn new(config: SessionConfig, sink: Option<Box<dyn AudioSink>>) -> Result<Self> {
        config.validate()?;

        if sink.is_none() {
            tracing::warn!("no audio sink configured; movement feedback is disabled");
        }

        let decimator = Decimator::new(config.logging_interval);
        let feedback = AudioFeedback::new(config.volume_multiplier, config.max_velocity_for_volume);
        let gateway = PersistenceGateway::new(config.output_path.clone());

        Ok(Self {
            config,
            decimator,
            buffer: RecordBuffer::new(),
            feedback,
            sink,
            gateway,
            missing_pose_reported: false,
        })
    }

    /// Runs one tick of the pipeline.
    ///
    /// `now` is seconds since session start. A tick without a pose
    /// reading is inert: no audio change, no log entry. Audio feedback
    /// reacts on every tick while the durable log only advances when the
    /// decimation window has elapsed, and untracked ticks are dropped
    /// from the log even then.
    pub fn tick(&mut self, now: f32, reading: Option<&PoseReading>) {
        let Some(reading) = reading else {
            if !self.missing_pose_reported {
                tracing::warn!("no pose source available; motion pipeline is idle");
                self.missing_pose_reported = true;
            }
            return;
        };

        let motion = TrackedMotion::from_reading(reading);

        if let Some(sink) = self.sink.as_deref_mut() {
            self.feedback.update(motion.speed(), sink);
        }

        if self.decimator.should_emit(now) && motion.is_tracking {
            self.buffer.append(Sample::capture(now, &motion));
        }
    }

    /// Flushes the buffer to the configured output path, overwriting
    /// whatever was there. Manual entry point; the error is handed back
    /// to the caller and the buffer stays intact.
    pub fn save(&self) -> Result<()> {
        self.gateway.flush(&self.buffer)?;
        tracing::info!(
            samples = self.buffer.len(),
            path = %self.gateway.path().display(),
            "movement log flushed"
        );
        Ok(())
    }

    /// Handles a pause or quit signal from the host. Flush failures are
    /// reported and swallowed: the in-memory buffer survives for a
    /// later retry and the session keeps running.
    pub fn handle_signal(&mut self, signal: LifecycleSignal) {
        if let Err(err) = self.save() {
            tracing::error!(?signal, %err, "failed to flush movement log");
        }
    }

    /// Explicitly discards every buffered sample. Irreversible.
    pub fn clear(&mut self) {
        self.buffer.clear();
        tracing::info!("movement log cleared");
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn buffer(&self) -> &RecordBuffer {
        &self.buffer
    }

    pub fn feedback(&self) -> &AudioFeedback {
        &self.feedback
    }
}

impl std::fmt::Debug for MotionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionSession")
            .field("config", &self.config)
            .field("buffered_samples", &self.buffer.len())
            .field("feedback", &self.feedback)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// Speed below which movement is treated as sensor noise rather than
/// intent. The comparison is strict: a speed of exactly 0.1 m/s does
/// not start playback.
pub const MOVEMENT_THRESHOLD: f32 = 0.1;

/// Host-provided audio output. Absence of a sink disables the feedback
/// controller; nothing else in the pipeline depends on it.
pub trait AudioSink {
    fn is_playing(&self) -> bool;
    /// Starts the configured clip at the given volume.
    fn play(&mut self, volume: f32);
    fn set_volume(&mut self, volume: f32);
    fn stop(&mut self);
}

/// Two-state controller mapping instantaneous speed to a play/stop
/// decision and a continuous volume level.
///
/// Volume follows speed with no smoothing; instantaneous jumps are
/// accepted behaviour. The controller runs every tick, before any
/// decimation, because feedback must react to motion immediately while
/// logging cadence only throttles storage volume.
#[derive(Debug, Clone)]
pub struct AudioFeedback {
    volume_multiplier: f32,
    max_velocity_for_volume: f32,
    playing: bool,
    current_volume: f32,
}

impl AudioFeedback {
    pub fn new(volume_multiplier: f32, max_velocity_for_volume: f32) -> Self {
        Self {
            volume_multiplier,
            max_velocity_for_volume,
            playing: false,
            current_volume: 0.0,
        }
    }

    /// Whether the controller currently considers playback active.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Volume applied on the most recent tick, zero while stopped.
    pub fn current_volume(&self) -> f32 {
        self.current_volume
    }

    /// Speed-to-volume mapping: linear up to `max_velocity_for_volume`,
    /// saturated beyond it, scaled by the configured gain.
    pub fn target_volume(&self, speed: f32) -> f32 {
        (speed / self.max_velocity_for_volume).clamp(0.0, 1.0) * self.volume_multiplier
    }

    /// Advances the state machine for one tick.
    pub fn update(&mut self, speed: f32, sink: &mut dyn AudioSink) {
        if speed > MOVEMENT_THRESHOLD {
            let volume = self.target_volume(speed);
            if sink.is_playing() {
                sink.set_volume(volume);
            } else {
                sink.play(volume);
            }
            self.playing = true;
            self.current_volume = volume;
        } else {
            if sink.is_playing() {
                sink.stop();
            }
            self.playing = false;
            self.current_volume = 0.0;
        }
    }
}

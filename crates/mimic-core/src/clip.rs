use std::sync::Arc;

use uuid::Uuid;

/// Decoded PCM audio: interleaved `f32` samples in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Returns `None` for a zero channel count or sample rate.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Option<Self> {
        if channels == 0 || sample_rate == 0 {
            return None;
        }
        Some(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Mono silence of the given length, handy for fixtures.
    pub fn silence(duration_secs: f32, sample_rate: u32) -> Self {
        let frames = (duration_secs.max(0.0) * sample_rate as f32).round() as usize;
        Self {
            samples: vec![0.0; frames],
            channels: 1,
            sample_rate: sample_rate.max(1),
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }
}

#[derive(Debug)]
struct ClipInner {
    id: Uuid,
    source: String,
    duration_secs: f32,
    buffer: AudioBuffer,
}

/// Shared, immutable reference to a decoded clip. Cloning is cheap and
/// keeps the same identity.
#[derive(Clone, Debug)]
pub struct ClipHandle(Arc<ClipInner>);

impl ClipHandle {
    pub fn new(source: impl Into<String>, buffer: AudioBuffer) -> Self {
        Self(Arc::new(ClipInner {
            id: Uuid::new_v4(),
            source: source.into(),
            duration_secs: buffer.duration_secs(),
            buffer,
        }))
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    /// File name (or other label) the clip was decoded from.
    pub fn source(&self) -> &str {
        &self.0.source
    }

    pub fn duration_secs(&self) -> f32 {
        self.0.duration_secs
    }

    pub fn buffer(&self) -> &AudioBuffer {
        &self.0.buffer
    }
}

impl PartialEq for ClipHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for ClipHandle {}

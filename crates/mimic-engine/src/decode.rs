//! Audio decoding seam.
//!
//! Ingestion only needs "path in, duration-bearing buffer out". The default
//! implementation reads WAV files with hound, which is what the recorder
//! writes; anything else fails and is skipped by the pipeline.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use mimic_core::AudioBuffer;

use crate::error::DecodeError;

pub trait AudioDecoder: Send + Sync + 'static {
    /// Blocking decode of one file. Called from a blocking worker.
    fn decode(&self, path: &Path) -> Result<AudioBuffer, DecodeError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WavDecoder;

impl AudioDecoder for WavDecoder {
    fn decode(&self, path: &Path) -> Result<AudioBuffer, DecodeError> {
        let reader = WavReader::open(path).map_err(|source| DecodeError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let spec = reader.spec();
        let samples_err = |source| DecodeError::Samples {
            path: path.to_path_buf(),
            source,
        };

        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(samples_err)?,
            SampleFormat::Int => {
                if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                    return Err(DecodeError::UnsupportedFormat {
                        path: path.to_path_buf(),
                        details: format!("{} bits per sample", spec.bits_per_sample),
                    });
                }
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(samples_err)?
            }
        };

        AudioBuffer::new(samples, spec.channels, spec.sample_rate).ok_or_else(|| {
            DecodeError::UnsupportedFormat {
                path: path.to_path_buf(),
                details: format!(
                    "{} channels at {} Hz",
                    spec.channels, spec.sample_rate
                ),
            }
        })
    }
}

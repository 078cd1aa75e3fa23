//! WAV decoding for silence analysis.
//!
//! Decodes a WAV file to mono 16-bit PCM at its native sample rate and
//! exposes it as a stream of fixed-length analysis frames. Multi-channel
//! input is down-mixed by averaging across channels.

use crate::defaults::FRAME_MS;
use crate::error::{Result, SlidecastError};
use std::io::Read;
use std::path::Path;

/// Decoded mono audio, the input to the silence detector.
pub struct WavAudio {
    samples: Vec<i16>,
    sample_rate: u32,
}

/// A contiguous run of decoded samples with a presentation timestamp.
///
/// Ephemeral: borrows from the decoded buffer and is consumed frame by frame.
#[derive(Debug, Clone, Copy)]
pub struct AudioFrame<'a> {
    pub samples: &'a [i16],
    pub sample_rate: u32,
    /// Presentation timestamp of the first sample, in seconds.
    pub pts: f64,
}

impl AudioFrame<'_> {
    /// Frame length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

impl WavAudio {
    /// Decode a WAV file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SlidecastError::SourceNotFound {
                    path: path.display().to_string(),
                }
            } else {
                SlidecastError::Io(e)
            }
        })?;
        Self::from_reader(Box::new(std::io::BufReader::new(file)))
    }

    /// Decode from any reader (for testing/flexibility).
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| SlidecastError::AudioDecode {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        let channels = spec.channels as usize;
        if channels == 0 {
            return Err(SlidecastError::AudioDecode {
                message: "WAV file declares zero channels".to_string(),
            });
        }

        let interleaved = read_as_i16(&mut wav_reader, &spec)?;
        let samples = downmix(&interleaved, channels);

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Iterate over fixed-length analysis frames with timestamps.
    ///
    /// The final frame may be shorter than the nominal frame length.
    pub fn frames(&self) -> Frames<'_> {
        let frame_len = (self.sample_rate as usize * FRAME_MS as usize / 1000).max(1);
        Frames {
            audio: self,
            position: 0,
            frame_len,
        }
    }

    /// Consume the decoded audio and return the mono sample buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

/// Iterator over [`AudioFrame`]s of a decoded [`WavAudio`].
pub struct Frames<'a> {
    audio: &'a WavAudio,
    position: usize,
    frame_len: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = AudioFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.audio.samples.len() {
            return None;
        }

        let end = (self.position + self.frame_len).min(self.audio.samples.len());
        let frame = AudioFrame {
            samples: &self.audio.samples[self.position..end],
            sample_rate: self.audio.sample_rate,
            pts: self.position as f64 / self.audio.sample_rate as f64,
        };
        self.position = end;
        Some(frame)
    }
}

/// Read samples as 16-bit PCM, converting from the source bit depth.
fn read_as_i16(
    reader: &mut hound::WavReader<Box<dyn Read + Send>>,
    spec: &hound::WavSpec,
) -> Result<Vec<i16>> {
    let decode_err = |e: hound::Error| SlidecastError::AudioDecode {
        message: format!("Failed to read WAV samples: {}", e),
    };

    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, bits) if bits <= 16 => reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(decode_err),
        (hound::SampleFormat::Int, bits) => {
            let shift = bits - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v >> shift) as i16))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(decode_err)
        }
        (hound::SampleFormat::Float, _) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(decode_err),
    }
}

/// Average interleaved channels down to mono.
fn downmix(interleaved: &[i16], channels: usize) -> Vec<i16> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

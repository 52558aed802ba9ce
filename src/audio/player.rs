use std::collections::HashMap;

use log::{info, warn};

use super::synth::SoundEffect;

/// Plays sound effects, or quietly does nothing when no output is available
pub struct SoundBoard {
    output: Option<output::Output>,
    cache: HashMap<SoundEffect, Vec<f32>>,
}

impl SoundBoard {
    /// Open the default output device. Any failure leaves the board silent.
    pub fn open(muted: bool) -> Self {
        let output = if muted {
            info!("Sound muted");
            None
        } else {
            match output::Output::open() {
                Ok(output) => Some(output),
                Err(e) => {
                    warn!("Sound disabled: {e:#}");
                    None
                }
            }
        };

        Self {
            output,
            cache: HashMap::new(),
        }
    }

    /// A board that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            cache: HashMap::new(),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none()
    }

    /// Queue an effect behind whatever is still playing
    pub fn play(&mut self, effect: SoundEffect) {
        let Some(output) = &self.output else {
            return;
        };
        let sample_rate = output.sample_rate();
        let samples = self
            .cache
            .entry(effect)
            .or_insert_with(|| effect.synthesize(sample_rate));
        output.enqueue(samples);
    }
}

#[cfg(feature = "audio")]
mod output {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use anyhow::{Context, Result, anyhow};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{FromSample, Sample, SizedSample};
    use log::{info, warn};

    type Queue = Arc<Mutex<VecDeque<f32>>>;

    pub struct Output {
        _stream: cpal::Stream,
        queue: Queue,
        sample_rate: u32,
    }

    impl Output {
        pub fn open() -> Result<Self> {
            let host = cpal::default_host();
            let device = host
                .default_output_device()
                .ok_or_else(|| anyhow!("no output device is available"))?;
            info!(
                "Audio output device: {}",
                device.name().unwrap_or_else(|_| "unknown".to_string())
            );

            let supported = device
                .default_output_config()
                .context("Failed to query output config")?;
            let sample_rate = supported.sample_rate().0;
            let config: cpal::StreamConfig = supported.config();
            let queue: Queue = Arc::new(Mutex::new(VecDeque::new()));

            let stream = match supported.sample_format() {
                cpal::SampleFormat::F32 => run::<f32>(&device, &config, queue.clone()),
                cpal::SampleFormat::I16 => run::<i16>(&device, &config, queue.clone()),
                cpal::SampleFormat::U16 => run::<u16>(&device, &config, queue.clone()),
                other => Err(anyhow!("unsupported sample format {other}")),
            }?;
            stream.play().context("Failed to start audio stream")?;

            Ok(Self {
                _stream: stream,
                queue,
                sample_rate,
            })
        }

        pub fn sample_rate(&self) -> u32 {
            self.sample_rate
        }

        pub fn enqueue(&self, samples: &[f32]) {
            if let Ok(mut queue) = self.queue.lock() {
                queue.extend(samples.iter().copied());
            }
        }
    }

    fn run<T>(device: &cpal::Device, config: &cpal::StreamConfig, queue: Queue) -> Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = usize::from(config.channels);
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let mut queue = match queue.lock() {
                        Ok(queue) => queue,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    for frame in data.chunks_mut(channels) {
                        let value = T::from_sample(queue.pop_front().unwrap_or(0.0));
                        frame.fill(value);
                    }
                },
                |err| warn!("Audio stream error: {err}"),
                None,
            )
            .context("Failed to build output stream")?;
        Ok(stream)
    }
}

#[cfg(not(feature = "audio"))]
mod output {
    use anyhow::{Result, bail};

    pub struct Output;

    impl Output {
        pub fn open() -> Result<Self> {
            bail!("built without the `audio` feature")
        }

        pub fn sample_rate(&self) -> u32 {
            0
        }

        pub fn enqueue(&self, _samples: &[f32]) {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_board_ignores_effects() {
        let mut board = SoundBoard::silent();
        assert!(board.is_silent());
        board.play(SoundEffect::Eat);
        board.play(SoundEffect::LoseLife);
        assert!(board.cache.is_empty());
    }

    #[test]
    fn test_muted_board_is_silent() {
        let board = SoundBoard::open(true);
        assert!(board.is_silent());
    }
}

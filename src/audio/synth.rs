use std::f32::consts::TAU;

/// Peak level of every effect, 4096 out of a 16-bit full scale
pub const AMPLITUDE: f32 = 4096.0 / 32768.0;

/// Decay rate of the notes in the lose-life effect
const LOSE_LIFE_DECAY: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Short beep when an apple is eaten
    Eat,
    /// Rising C-E-G arpeggio when a level is completed
    LevelUp,
    /// Falling, decaying notes when a life is lost
    LoseLife,
}

impl SoundEffect {
    /// (frequency Hz, duration ms) of each note, in order
    fn notes(self) -> &'static [(f32, u32)] {
        match self {
            SoundEffect::Eat => &[(800.0, 100)],
            SoundEffect::LevelUp => &[(523.0, 100), (659.0, 100), (784.0, 100)],
            SoundEffect::LoseLife => &[(784.0, 100), (659.0, 100), (523.0, 100), (392.0, 100)],
        }
    }

    fn decay(self) -> f32 {
        match self {
            SoundEffect::LoseLife => LOSE_LIFE_DECAY,
            _ => 0.0,
        }
    }

    /// Total length in milliseconds
    pub fn duration_ms(self) -> u32 {
        self.notes().iter().map(|&(_, ms)| ms).sum()
    }

    /// Mono samples in [-AMPLITUDE, AMPLITUDE] at `sample_rate`
    pub fn synthesize(self, sample_rate: u32) -> Vec<f32> {
        let decay = self.decay();
        self.notes()
            .iter()
            .flat_map(|&(frequency, ms)| tone(frequency, ms, sample_rate, decay))
            .collect()
    }
}

/// One sine note, optionally shaped by exp(-decay * t) with t in seconds from the note start
fn tone(frequency: f32, duration_ms: u32, sample_rate: u32, decay: f32) -> Vec<f32> {
    let count = (u64::from(sample_rate) * u64::from(duration_ms) / 1000) as usize;
    let rate = sample_rate as f32;

    (0..count)
        .map(|i| {
            let t = i as f32 / rate;
            (TAU * frequency * t).sin() * (-decay * t).exp() * AMPLITUDE
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        assert_eq!(SoundEffect::Eat.duration_ms(), 100);
        assert_eq!(SoundEffect::LevelUp.duration_ms(), 300);
        assert_eq!(SoundEffect::LoseLife.duration_ms(), 400);
    }

    #[test]
    fn test_sample_counts_follow_rate() {
        assert_eq!(SoundEffect::Eat.synthesize(22_050).len(), 2_205);
        assert_eq!(SoundEffect::LevelUp.synthesize(22_050).len(), 3 * 2_205);
        assert_eq!(SoundEffect::LoseLife.synthesize(48_000).len(), 4 * 4_800);
    }

    #[test]
    fn test_samples_stay_within_amplitude() {
        for effect in [SoundEffect::Eat, SoundEffect::LevelUp, SoundEffect::LoseLife] {
            let samples = effect.synthesize(44_100);
            assert!(samples.iter().all(|s| s.abs() <= AMPLITUDE + f32::EPSILON));
            let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
            assert!(peak > AMPLITUDE * 0.5, "{effect:?} is nearly silent");
        }
    }

    #[test]
    fn test_lose_life_notes_decay() {
        let samples = SoundEffect::LoseLife.synthesize(44_100);
        let note = samples.len() / 4;
        let head = samples[..note / 10].iter().fold(0.0f32, |a, s| a.max(s.abs()));
        let tail = samples[note - note / 10..note]
            .iter()
            .fold(0.0f32, |a, s| a.max(s.abs()));
        assert!(tail < head);
    }

    #[test]
    fn test_zero_rate_gives_silence() {
        assert!(SoundEffect::Eat.synthesize(0).is_empty());
    }
}

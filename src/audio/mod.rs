//! Sound effects for the arcade game
//!
//! Effects are synthesized from sine tones at whatever rate the output device
//! wants. Playback needs the `audio` cargo feature and a working output device;
//! without either, every effect is silently dropped.

pub mod player;
pub mod synth;

pub use player::SoundBoard;
pub use synth::SoundEffect;

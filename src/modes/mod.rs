pub mod arcade;
pub mod guess;

pub use arcade::ArcadeMode;
pub use guess::GuessMode;

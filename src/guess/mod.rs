//! Rules of the console word-guessing game
//!
//! A secret word is hidden behind one `?` per letter. Each guess reveals
//! every occurrence of a letter or costs a life.

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

/// Words the console game picks from
pub const WORDS: [&str; 5] = ["snake", "tiger", "panda", "zebra", "rhino"];

pub const STARTING_LIVES: u32 = 9;

/// Placeholder shown for a letter not yet guessed
pub const HIDDEN: char = '?';

/// Reasons a guess is refused without costing a life
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Please enter a single letter!")]
    NotALetter,
    #[error("You already guessed that letter!")]
    AlreadyGuessed(char),
    #[error("The game is already over")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the word; `revealed` counts the positions it uncovered
    Correct { revealed: usize },
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct WordGame {
    word: Vec<char>,
    revealed: Vec<bool>,
    guessed: Vec<char>,
    lives: u32,
}

impl WordGame {
    pub fn new(word: &str, lives: u32) -> Self {
        let word: Vec<char> = word.to_lowercase().chars().collect();
        let revealed = vec![false; word.len()];
        Self {
            word,
            revealed,
            guessed: Vec::new(),
            lives,
        }
    }

    /// Pick a word at random. Returns `None` for an empty list.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, words: &[&str]) -> Option<Self> {
        words
            .choose(rng)
            .map(|word| Self::new(word, STARTING_LIVES))
    }

    /// Apply one line of player input
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        if self.status() != GuessStatus::InProgress {
            return Err(GuessError::Finished);
        }

        let letter = parse_letter(input)?;
        if self.guessed.contains(&letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }
        self.guessed.push(letter);

        let mut revealed = 0;
        for (slot, _) in self
            .revealed
            .iter_mut()
            .zip(&self.word)
            .filter(|&(_, &c)| c == letter)
        {
            *slot = true;
            revealed += 1;
        }

        if revealed > 0 {
            Ok(GuessOutcome::Correct { revealed })
        } else {
            self.lives = self.lives.saturating_sub(1);
            Ok(GuessOutcome::Wrong)
        }
    }

    pub fn status(&self) -> GuessStatus {
        if self.revealed.iter().all(|&r| r) {
            GuessStatus::Won
        } else if self.lives == 0 {
            GuessStatus::Lost
        } else {
            GuessStatus::InProgress
        }
    }

    /// The word with unguessed letters masked, letters separated by spaces
    pub fn clue(&self) -> String {
        self.word
            .iter()
            .zip(&self.revealed)
            .map(|(&c, &shown)| if shown { c } else { HIDDEN })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Letters tried so far, in the order they were guessed
    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }
}

/// Lowercase the input and require exactly one alphabetic character
fn parse_letter(input: &str) -> Result<char, GuessError> {
    let lowered = input.trim().to_lowercase();
    let mut chars = lowered.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(GuessError::NotALetter),
    }
}

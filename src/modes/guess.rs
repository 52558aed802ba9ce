//! Console word-guessing game
//!
//! Plain line-oriented I/O: the clue, lives and guessed letters are printed
//! before every prompt, one letter is read per line.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use std::io::{BufRead, Write};

use crate::guess::{GuessOutcome, GuessStatus, STARTING_LIVES, WORDS, WordGame};

pub struct GuessMode {
    game: WordGame,
}

impl GuessMode {
    /// Pick a word from the built-in list
    pub fn new(seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game = WordGame::random(&mut rng, &WORDS).context("Word list is empty")?;
        Ok(Self::with_game(game))
    }

    pub fn with_game(game: WordGame) -> Self {
        Self { game }
    }

    /// Play on stdin/stdout
    pub fn run(&mut self) -> Result<GuessStatus> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.play(stdin.lock(), stdout.lock())
    }

    /// Play until the word is found, lives run out or input ends. Running out
    /// of input counts as a loss.
    pub fn play<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<GuessStatus> {
        writeln!(
            out,
            "Hi This is a guessing game where you have {STARTING_LIVES} lives !!!"
        )?;
        writeln!(out, "\nLet's start!")?;

        let mut line = String::new();
        let mut input_ended = false;
        while self.game.status() == GuessStatus::InProgress {
            self.print_turn(&mut out)?;

            line.clear();
            let read = input.read_line(&mut line).context("Failed to read guess")?;
            if read == 0 {
                debug!("Input closed mid-game");
                writeln!(out)?;
                input_ended = true;
                break;
            }

            match self.game.guess(&line) {
                Ok(GuessOutcome::Correct { .. }) => writeln!(out, "Correct! ✓")?,
                Ok(GuessOutcome::Wrong) => writeln!(out, "Wrong! ✗")?,
                Err(e) => writeln!(out, "{e}")?,
            }
        }

        let status = match self.game.status() {
            GuessStatus::InProgress => GuessStatus::Lost,
            status => status,
        };

        let rule = "=".repeat(40);
        writeln!(out, "\n{rule}")?;
        if status == GuessStatus::Won {
            writeln!(out, "🎉 Congratulations! You won!")?;
        } else if input_ended {
            writeln!(out, "💀 Game Over! Input ended.")?;
        } else {
            writeln!(out, "💀 Game Over! You ran out of lives.")?;
        }
        writeln!(out, "The word was: {}", self.game.word())?;
        writeln!(out, "{rule}")?;
        out.flush()?;

        info!(
            "Word game finished: {:?} with {} lives left",
            status,
            self.game.lives()
        );
        Ok(status)
    }

    fn print_turn<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n[{}]", self.game.clue())?;
        writeln!(out, "Lives left: {}", "❤ ".repeat(self.game.lives() as usize))?;

        let guessed = self.game.guessed();
        if guessed.is_empty() {
            writeln!(out, "Guessed letters: None")?;
        } else {
            let letters: Vec<String> = guessed.iter().map(char::to_string).collect();
            writeln!(out, "Guessed letters: {}", letters.join(", "))?;
        }

        write!(out, "Guess a letter: ")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(word: &str, lives: u32, input: &str) -> (GuessStatus, String) {
        let mut mode = GuessMode::with_game(WordGame::new(word, lives));
        let mut out = Vec::new();
        let status = mode.play(Cursor::new(input), &mut out).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_winning_session() {
        let (status, out) = play("zebra", 9, "z\nx\nE\nb\nr\na\n");

        assert_eq!(status, GuessStatus::Won);
        assert!(out.contains("[? ? ? ? ?]"));
        assert!(out.contains("Guessed letters: None"));
        assert!(out.contains("Guessed letters: z, x"));
        assert!(out.contains("Correct! ✓"));
        assert!(out.contains("Wrong! ✗"));
        assert!(out.contains("Lives left: ❤ ❤ ❤ ❤ ❤ ❤ ❤ ❤ \n"));
        assert!(out.contains("Congratulations! You won!"));
        assert!(out.contains("The word was: zebra"));
    }

    #[test]
    fn test_losing_session() {
        let (status, out) = play("panda", 2, "x\nq\nq\n");

        assert_eq!(status, GuessStatus::Lost);
        assert!(out.contains("Game Over! You ran out of lives."));
        assert!(!out.contains("Input ended."));
        assert!(out.contains("The word was: panda"));
    }

    #[test]
    fn test_bad_input_is_reported() {
        let (_, out) = play("rhino", 9, "hello\nr\nr\n");

        assert!(out.contains("Please enter a single letter!"));
        assert!(out.contains("You already guessed that letter!"));
    }

    #[test]
    fn test_end_of_input_is_a_loss() {
        let (status, out) = play("tiger", 9, "t\n");

        assert_eq!(status, GuessStatus::Lost);
        assert!(out.contains("[t ? ? ? ?]"));
        assert!(out.contains("Game Over! Input ended."));
        assert!(!out.contains("ran out of lives"));
        assert!(out.contains("The word was: tiger"));
    }

    #[test]
    fn test_seeded_mode_picks_known_word() {
        let mode = GuessMode::new(Some(5)).unwrap();
        assert!(WORDS.contains(&mode.game.word().as_str()));
    }
}

// Letter Journey terminal console
// Plays the three games at a prompt: type a command or a letter

use anyhow::Result;
use letterjourney_game::{
    GameError, GameSession, InputEvent, LetterProgress, Mark, Mode, RenderState, Screen, Speaker,
};
use std::io::{BufRead, Write};
use tracing::debug;

pub const WELCOME: &str = "\
Welcome to Letter Journey! 🎉

Learn letters and sounds through fun games!

🔤 Explore - Tap letters to hear how they sound
🎯 Find the Letter - Listen and find the right one
📖 Sound Out - Break words into letter sounds

You earn ⭐ stars for every correct answer.
Keep your 🔥 streak going for bonus stars!

Let's go! 💪";

/// One line of input, parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Event(InputEvent),
    Help,
    Exit,
    Unknown,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let mut chars = line.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_alphabetic() {
            return Command::Event(InputEvent::LetterTapped(letter));
        }
    }

    match line.to_lowercase().as_str() {
        "explore" => Command::Event(InputEvent::ModeSelected(Mode::Explore)),
        "find" => Command::Event(InputEvent::ModeSelected(Mode::Find)),
        "sound" | "soundout" | "sound-out" => Command::Event(InputEvent::ModeSelected(Mode::SoundOut)),
        "replay" | "again" => Command::Event(InputEvent::ReplayRequested),
        "next" => Command::Event(InputEvent::AdvanceRequested),
        "new" => Command::Event(InputEvent::NewRoundRequested),
        "menu" | "back" => Command::Event(InputEvent::MenuRequested),
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        _ => Command::Unknown,
    }
}

pub struct GameConsole<S: Speaker> {
    session: GameSession<S>,
}

impl<S: Speaker> GameConsole<S> {
    pub fn new(session: GameSession<S>) -> Self {
        Self { session }
    }

    pub fn into_session(self) -> GameSession<S> {
        self.session
    }

    /// Read commands until `exit` or end of input
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut out: O, welcome: bool) -> Result<()> {
        if welcome {
            writeln!(out, "{}\n", WELCOME)?;
        }
        self.print_help(&mut out)?;
        draw(&mut out, &self.session.render())?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Command::Exit => break,
                Command::Help => self.print_help(&mut out)?,
                Command::Unknown => writeln!(out, "❓ Unknown command '{}'. Type 'help'.", line.trim())?,
                Command::Event(event) => match self.session.handle(event) {
                    Ok(()) => draw(&mut out, &self.session.render())?,
                    Err(e) => {
                        debug!("Input rejected: {}", e);
                        writeln!(out, "{}", hint_for(&e))?;
                    }
                },
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        writeln!(out, "\n👋 Goodbye!")?;
        Ok(())
    }

    fn print_help<O: Write>(&self, out: &mut O) -> Result<()> {
        writeln!(out, "📚 Commands:")?;
        writeln!(out, "  explore | find | sound   - Start a game")?;
        writeln!(out, "  <letter>                 - Tap a letter")?;
        writeln!(out, "  replay                   - Hear it again")?;
        writeln!(out, "  next                     - Next round / next sound")?;
        writeln!(out, "  new                      - New round")?;
        writeln!(out, "  menu                     - Back to the menu")?;
        writeln!(out, "  help, exit")?;
        writeln!(out)?;
        Ok(())
    }
}

fn hint_for(error: &GameError) -> String {
    match error {
        GameError::NoActiveRound => "Pick a game first: explore, find or sound".to_string(),
        GameError::RoundUnsolved => "Find the right letter first!".to_string(),
        GameError::RoundSolved => "Well done! Type 'next' for a new letter.".to_string(),
        GameError::WordComplete => "Word done! Type 'new' for another word.".to_string(),
        other => other.to_string(),
    }
}

pub fn draw<O: Write>(out: &mut O, state: &RenderState) -> std::io::Result<()> {
    let header = &state.header;
    writeln!(
        out,
        "\n⭐ {}   🔥 {}   Level {}   Letters {}/{}",
        header.stars, header.streak, header.level, header.mastered, header.alphabet_size
    )?;

    match &state.screen {
        Screen::Menu { level, summary } => {
            writeln!(out, "Choose a game (level {}):", level)?;
            writeln!(out, "  🔤 explore   🎯 find   📖 sound")?;
            writeln!(out, "{}", summary)?;
        }
        Screen::Explore { letters, .. } => {
            let row: Vec<String> = letters
                .iter()
                .map(|tile| {
                    if tile.mastered {
                        format!("[{}]", tile.letter)
                    } else {
                        format!(" {} ", tile.letter)
                    }
                })
                .collect();
            writeln!(out, "Tap a letter to hear it:")?;
            for chunk in row.chunks(10) {
                writeln!(out, "  {}", chunk.join(" "))?;
            }
        }
        Screen::Find { prompt, candidates, can_advance } => {
            writeln!(out, "{}", prompt)?;
            let row: Vec<String> = candidates
                .iter()
                .map(|tile| match tile.mark {
                    Mark::None => format!(" {} ", tile.letter),
                    Mark::Correct => format!("✅{}", tile.letter),
                    Mark::Wrong => format!("❌{}", tile.letter),
                })
                .collect();
            writeln!(out, "  {}", row.join("  "))?;
            if *can_advance {
                writeln!(out, "  (next ➡)")?;
            }
        }
        Screen::SoundOut { hint, letters, show_next_sound, .. } => {
            let word: Vec<String> = letters
                .iter()
                .map(|l| match l.progress {
                    LetterProgress::Done => format!("✓{}", l.letter),
                    LetterProgress::Active => format!("[{}]", l.letter),
                    LetterProgress::Pending => format!(" {} ", l.letter),
                })
                .collect();
            writeln!(out, "  {}   ({})", word.join(" "), hint)?;
            if *show_next_sound {
                writeln!(out, "  (next sound ➡)")?;
            } else {
                writeln!(out, "  (new word 🔄)")?;
            }
        }
    }

    if let Some(feedback) = &state.feedback {
        writeln!(out, "{}", feedback)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterjourney_core::{PhoneticsTable, ProgressStore};
    use letterjourney_game::{GameConfig, Utterance};

    struct Mute;

    impl Speaker for Mute {
        fn say(&self, _utterance: Utterance) {}
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("find"), Command::Event(InputEvent::ModeSelected(Mode::Find)));
        assert_eq!(parse_command("  Sound "), Command::Event(InputEvent::ModeSelected(Mode::SoundOut)));
        assert_eq!(parse_command("ö"), Command::Event(InputEvent::LetterTapped('ö')));
        assert_eq!(parse_command("next"), Command::Event(InputEvent::AdvanceRequested));
        assert_eq!(parse_command("quit"), Command::Exit);
        assert_eq!(parse_command("7"), Command::Unknown);
        assert_eq!(parse_command("dance"), Command::Unknown);
    }

    #[test]
    fn test_explore_session_transcript() {
        let session = GameSession::new(
            PhoneticsTable::swedish(),
            ProgressStore::in_memory(),
            Mute,
            GameConfig::default(),
        );
        let mut console = GameConsole::new(session);
        let mut out = Vec::new();

        console
            .run("next\nexplore\nb\nexit\nexplore\n".as_bytes(), &mut out, true)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Welcome to Letter Journey!"));
        assert!(text.contains("Pick a game first"));
        assert!(text.contains("B - Name: 'beh', Sound: 'bbb'"));
        assert!(text.ends_with("👋 Goodbye!\n"));
        assert_eq!(console.into_session().progress().total_correct(), 1);
    }
}

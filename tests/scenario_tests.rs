use letterjourney_core::{Difficulty, PhoneticsTable, ProgressStore};
use letterjourney_game::{GameConfig, GameSession, InputEvent, Mode, Round, Speaker, Utterance};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct Transcript(Mutex<Vec<String>>);

impl Speaker for Transcript {
    fn say(&self, utterance: Utterance) {
        self.0.lock().unwrap().push(utterance.text);
    }
}

#[test]
fn test_five_in_a_row_earns_seven_stars() {
    let mut store = ProgressStore::in_memory();
    for _ in 0..5 {
        store.record_correct('A');
    }

    assert_eq!(store.stars(), 7);
    assert_eq!(store.streak(), 5);
    assert_eq!(store.mastered_letters(), &['A']);
}

#[test]
fn test_twenty_correct_unlocks_medium_words() {
    let mut store = ProgressStore::in_memory();
    let table = PhoneticsTable::swedish();
    let alphabet: Vec<char> = table.letters().collect();
    for &letter in alphabet.iter().cycle().take(20) {
        store.record_correct(letter);
    }

    assert_eq!(store.check_level_up(), Some(2));
    assert_eq!(store.level(), 2);

    let pool: HashSet<&str> = table.word_pool(store.level()).iter().map(|e| e.word).collect();
    for entry in table.words(Difficulty::Medium) {
        assert!(pool.contains(entry.word));
    }
    for entry in table.words(Difficulty::Hard) {
        assert!(!pool.contains(entry.word));
    }
}

#[test]
fn test_level_caps_at_three() {
    let mut store = ProgressStore::in_memory();
    for _ in 0..3 {
        for _ in 0..20 {
            store.record_correct('B');
        }
        store.check_level_up();
    }

    assert_eq!(store.total_correct(), 60);
    assert_eq!(store.level(), 3);
    assert_eq!(store.check_level_up(), None);
}

#[test]
fn test_find_rounds_always_show_six() {
    let transcript = Transcript::default();
    let mut game = GameSession::with_rng(
        PhoneticsTable::swedish(),
        ProgressStore::in_memory(),
        &transcript,
        GameConfig::default(),
        StdRng::seed_from_u64(2024),
    );

    game.handle(InputEvent::ModeSelected(Mode::Find)).unwrap();
    for _ in 0..100 {
        let target = match game.round() {
            Round::Find(round) => {
                let unique: HashSet<_> = round.candidates().iter().collect();
                assert_eq!(unique.len(), 6);
                assert!(round.candidates().contains(&round.target()));
                round.target()
            }
            other => panic!("unexpected round {:?}", other),
        };
        game.handle(InputEvent::LetterTapped(target)).unwrap();
        game.handle(InputEvent::AdvanceRequested).unwrap();
    }

    assert_eq!(game.progress().total_correct(), 100);
    assert_eq!(game.progress().stars(), 100 + 2 * 20);
}

#[test]
fn test_play_across_restarts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("progress.json");
    let transcript = Transcript::default();

    // Day one: explore 19 letters
    {
        let mut game = GameSession::with_rng(
            PhoneticsTable::swedish(),
            ProgressStore::load(&path),
            &transcript,
            GameConfig::default(),
            StdRng::seed_from_u64(1),
        );
        game.select_mode(Mode::Explore).unwrap();
        for letter in PhoneticsTable::swedish().letters().take(19) {
            game.handle(InputEvent::LetterTapped(letter)).unwrap();
        }
    }

    // Day two: one word takes the total past 20 and levels up
    let mut game = GameSession::with_rng(
        PhoneticsTable::swedish(),
        ProgressStore::load(&path),
        &transcript,
        GameConfig::default(),
        StdRng::seed_from_u64(2),
    );
    assert_eq!(game.progress().total_correct(), 19);
    assert_eq!(game.progress().mastered_letters().len(), 19);

    game.select_mode(Mode::SoundOut).unwrap();
    while !matches!(game.round(), Round::SoundOut(round) if round.is_complete()) {
        game.handle(InputEvent::AdvanceRequested).unwrap();
    }
    drop(game);

    let reloaded = ProgressStore::load(&path);
    assert_eq!(reloaded.level(), 2);
    assert_eq!(reloaded.total_correct(), 22);

    let spoken = transcript.0.lock().unwrap();
    assert_eq!(spoken[0], "A. ah. aaa.");
    assert_eq!(spoken.last().map(String::as_str), Some("Amazing! You did it!"));
}

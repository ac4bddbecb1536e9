//! Static letter and word lexicon
//!
//! Letter names are what a letter is called; sounds are the stretched-out
//! phoneme a child practises articulating. Both tables share one key set by
//! construction: each `LetterEntry` carries its letter, name and sound together.

use serde::{Deserialize, Serialize};

/// One grapheme of the alphabet, always stored upper case
pub type Letter = char;

/// Word list tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Tiers unlocked at a given learner level
    pub fn unlocked_at(level: u32) -> &'static [Difficulty] {
        match level {
            0 | 1 => &[Difficulty::Easy],
            2 => &[Difficulty::Easy, Difficulty::Medium],
            _ => &Self::ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterEntry {
    pub letter: Letter,
    pub name: &'static str,
    pub sound: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    pub word: &'static str,
    /// Untranslated hint; the presentation layer looks it up in its catalog
    pub hint: &'static str,
}

impl WordEntry {
    pub fn letters(&self) -> Vec<Letter> {
        self.word.chars().collect()
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

const fn l(letter: Letter, name: &'static str, sound: &'static str) -> LetterEntry {
    LetterEntry { letter, name, sound }
}

const fn w(word: &'static str, hint: &'static str) -> WordEntry {
    WordEntry { word, hint }
}

const SWEDISH_LETTERS: [LetterEntry; 29] = [
    l('A', "ah", "aaa"),
    l('B', "beh", "bbb"),
    l('C', "seh", "sss"),
    l('D', "deh", "ddd"),
    l('E', "eh", "eee"),
    l('F', "eff", "fff"),
    l('G', "geh", "ggg"),
    l('H', "hå", "hhh"),
    l('I', "ih", "iii"),
    l('J', "jih", "jjj"),
    l('K', "kå", "kkk"),
    l('L', "ell", "lll"),
    l('M', "emm", "mmm"),
    l('N', "enn", "nnn"),
    l('O', "oh", "ooo"),
    l('P', "peh", "ppp"),
    l('Q', "kuh", "kkk"),
    l('R', "err", "rrr"),
    l('S', "ess", "sss"),
    l('T', "teh", "ttt"),
    l('U', "uh", "uuu"),
    l('V', "veh", "vvv"),
    l('W', "dubbelveh", "vvv"),
    l('X', "eks", "ks"),
    l('Y', "yh", "yyy"),
    l('Z', "seta", "sss"),
    l('Å', "å", "ååå"),
    l('Ä', "äh", "äää"),
    l('Ö', "öh", "ööö"),
];

const WORDS_EASY: [WordEntry; 12] = [
    w("SOL", "sun"),
    w("KAT", "cat"),
    w("HUS", "house"),
    w("BIL", "car"),
    w("MUS", "mouse"),
    w("HÅR", "hair"),
    w("BÅT", "boat"),
    w("ÖGA", "eye"),
    w("ARM", "arm"),
    w("BEN", "leg"),
    w("LÅS", "lock"),
    w("NÄS", "nose"),
];

const WORDS_MEDIUM: [WordEntry; 12] = [
    w("BOLL", "ball"),
    w("LAMM", "lamb"),
    w("FISK", "fish"),
    w("GRIS", "pig"),
    w("HUND", "dog"),
    w("KATT", "cat"),
    w("STOL", "chair"),
    w("DÖRR", "door"),
    w("BLAD", "leaf"),
    w("SNÄL", "kind"),
    w("GLAD", "happy"),
    w("STOR", "big"),
];

const WORDS_HARD: [WordEntry; 9] = [
    w("ÄPPLE", "apple"),
    w("SKOLA", "school"),
    w("BJÖRN", "bear"),
    w("BLOMMA", "flower"),
    w("STJÄRNA", "star"),
    w("TRÄD", "tree"),
    w("SJUNGA", "sing"),
    w("HIMMEL", "sky"),
    w("VATTEN", "water"),
];

/// Read-only lexicon shared by the whole process
#[derive(Debug)]
pub struct PhoneticsTable {
    letters: &'static [LetterEntry],
    easy: &'static [WordEntry],
    medium: &'static [WordEntry],
    hard: &'static [WordEntry],
}

static SWEDISH: PhoneticsTable = PhoneticsTable {
    letters: &SWEDISH_LETTERS,
    easy: &WORDS_EASY,
    medium: &WORDS_MEDIUM,
    hard: &WORDS_HARD,
};

/// Upper-case a letter; `å` and `Å` are the same key
pub fn normalize(letter: Letter) -> Letter {
    let mut upper = letter.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => letter,
    }
}

impl PhoneticsTable {
    /// The Swedish alphabet (A-Z, Å, Ä, Ö) with its word lists
    pub fn swedish() -> &'static PhoneticsTable {
        &SWEDISH
    }

    /// Letters in display order
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.letters.iter().map(|entry| entry.letter)
    }

    pub fn entries(&self) -> &'static [LetterEntry] {
        self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn entry(&self, letter: Letter) -> Option<&'static LetterEntry> {
        let letter = normalize(letter);
        self.letters.iter().find(|entry| entry.letter == letter)
    }

    pub fn contains(&self, letter: Letter) -> bool {
        self.entry(letter).is_some()
    }

    pub fn name(&self, letter: Letter) -> Option<&'static str> {
        self.entry(letter).map(|entry| entry.name)
    }

    pub fn sound(&self, letter: Letter) -> Option<&'static str> {
        self.entry(letter).map(|entry| entry.sound)
    }

    pub fn words(&self, difficulty: Difficulty) -> &'static [WordEntry] {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// All words available to a learner at `level`, easiest tier first
    pub fn word_pool(&self, level: u32) -> Vec<&'static WordEntry> {
        Difficulty::unlocked_at(level)
            .iter()
            .flat_map(|&difficulty| self.words(difficulty).iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_swedish_alphabet_size() {
        let table = PhoneticsTable::swedish();
        assert_eq!(table.len(), 29);
        let unique: HashSet<Letter> = table.letters().collect();
        assert_eq!(unique.len(), 29);
    }

    #[test]
    fn test_every_letter_has_name_and_sound() {
        let table = PhoneticsTable::swedish();
        for letter in table.letters() {
            assert!(!table.name(letter).unwrap().is_empty(), "{} has no name", letter);
            assert!(!table.sound(letter).unwrap().is_empty(), "{} has no sound", letter);
        }
    }

    #[test]
    fn test_words_use_only_known_letters() {
        let table = PhoneticsTable::swedish();
        for difficulty in Difficulty::ALL {
            for entry in table.words(difficulty) {
                for letter in entry.word.chars() {
                    assert!(table.contains(letter), "{} in {} is not in the alphabet", letter, entry.word);
                }
                assert!(!entry.hint.is_empty());
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = PhoneticsTable::swedish();
        assert_eq!(table.sound('s'), Some("sss"));
        assert_eq!(table.name('å'), Some("å"));
        assert_eq!(table.name('ö'), Some("öh"));
        assert!(!table.contains('1'));
        assert!(!table.contains('É'));
    }

    #[test]
    fn test_word_pool_grows_with_level() {
        let table = PhoneticsTable::swedish();
        assert_eq!(table.word_pool(1).len(), 12);
        assert_eq!(table.word_pool(2).len(), 24);
        assert_eq!(table.word_pool(3).len(), 33);
        // Levels past the cap still see every tier
        assert_eq!(table.word_pool(7).len(), 33);
        assert!(table.word_pool(2).iter().any(|entry| entry.word == "BOLL"));
        assert!(!table.word_pool(1).iter().any(|entry| entry.word == "BOLL"));
    }

    #[test]
    fn test_word_len_counts_graphemes() {
        let table = PhoneticsTable::swedish();
        let stjarna = table.words(Difficulty::Hard).iter().find(|e| e.word == "STJÄRNA").unwrap();
        assert_eq!(stjarna.len(), 7);
        assert_eq!(stjarna.letters()[3], 'Ä');
    }
}

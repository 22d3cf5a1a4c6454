//! Static translation table for level titles and menu strings.
//!
//! The engine itself only deals in level ids; the front end resolves display
//! text here by `(key, locale)`. Missing keys fall back to the key itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    He,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::He => "he",
            Locale::En => "en",
        }
    }

    /// Hebrew renders right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::He)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "he" => Ok(Locale::He),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

/// `(key, hebrew, english)`
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("welcomeTitle", "ברוכים הבאים לגיימפאן אנגלית!", "Welcome to GameFun English!"),
    ("welcomeSubtitle", "למדו אנגלית בצורה מהנה וקלה", "Learn English in a fun and easy way"),
    ("chooseLanguage", "בחרו שפה", "Choose Language"),
    ("startLearning", "התחילו ללמוד", "Start Learning"),
    ("levelMap", "מפת השלבים", "Level Map"),
    ("level", "שלב", "Level"),
    ("completed", "הושלם", "Completed"),
    ("locked", "נעול", "Locked"),
    ("completedLevels", "שלבים שהושלמו", "Completed Levels"),
    ("totalLevels", "סך הכל שלבים", "Total Levels"),
    ("progress", "התקדמות", "Progress"),
    ("stars", "כוכבים", "Stars"),
    ("points", "נקודות", "Points"),
    ("wellDone", "כל הכבוד!", "Well Done!"),
    ("tryAgain", "נסו שוב", "Try Again"),
    ("nextLevel", "השלב הבא", "Next Level"),
    // Level titles and descriptions, keyed `<level id>.title` / `.description`.
    ("alphabet.title", "אלפבית וצלילים", "Alphabet & Sounds"),
    (
        "alphabet.description",
        "למדו את האותיות האנגליות והצלילים שלהן",
        "Learn English letters and their sounds",
    ),
    ("words.title", "מילים פשוטות", "Simple Words"),
    ("words.description", "התאמו מילים לתמונות", "Match words to pictures"),
    ("drag-drop.title", "גרירה והשלכה", "Drag & Drop"),
    ("drag-drop.description", "גררו מילים להתאמה עם המשמעויות", "Drag words onto their meanings"),
    ("stories.title", "סיפורים קצרים", "Short Stories"),
    ("stories.description", "קראו סיפורים פשוטים למתחילים", "Read simple stories for beginners"),
    ("comics.title", "קומיקס עם תמונות", "Picture Comics"),
    ("comics.description", "קומיקס מהנים עם תמונות וטקסט", "Fun comics with pictures and text"),
    ("advanced-reading.title", "קריאה מתקדמת", "Advanced Reading"),
    (
        "advanced-reading.description",
        "סיפורים ארוכים וטקסטים מורכבים",
        "Longer stories and richer texts",
    ),
    ("memory-game.title", "משחק זיכרון", "Memory Game"),
    (
        "memory-game.description",
        "התאמו מילים אנגליות עם תמונות",
        "Match English words with pictures",
    ),
    ("word-puzzle.title", "חידת מילים", "Word Puzzle"),
    ("word-puzzle.description", "פתרו חידות עם מילים אנגליות", "Solve puzzles with English words"),
    ("speaking-practice.title", "תרגול דיבור", "Speaking Practice"),
    ("speaking-practice.description", "תרגלו הגייה ודיבור", "Practice pronunciation and speaking"),
];

/// Look up `key` for `locale`.
pub fn lookup(key: &str, locale: Locale) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(_, he, en)| match locale {
            Locale::He => he,
            Locale::En => en,
        })
}

/// Like [`lookup`], but returns the key when there is no entry.
pub fn translate<'a>(key: &'a str, locale: Locale) -> &'a str {
    lookup(key, locale).unwrap_or(key)
}

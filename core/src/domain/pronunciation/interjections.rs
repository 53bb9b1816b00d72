use rand::seq::SliceRandom;

/// Phrases appended when a flagged ingredient is pronounced.
pub const INTERJECTIONS: [&str; 25] = [
    "yikes",
    "ruh-roh",
    "uh-oh",
    "hmm",
    "interesting...",
    "well then",
    "oh?",
    "okay...",
    "alrighty",
    "so that happened",
    "huh",
    "curious",
    "that's something",
    "well, okay",
    "noted",
    "oh, I see",
    "that's one way to go",
    "got it",
    "huh, okay",
    "well, that's different",
    "if you say so",
    "alright then",
    "oh boy",
    "oh man",
    "whoops",
];

/// Chooses one interjection per call.
#[cfg_attr(test, mockall::automock)]
pub trait InterjectionPicker: Send + Sync {
    fn pick(&self, choices: &'static [&'static str]) -> &'static str;
}

/// Uniform choice on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInterjectionPicker;

impl InterjectionPicker for RandomInterjectionPicker {
    fn pick(&self, choices: &'static [&'static str]) -> &'static str {
        choices
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }
}

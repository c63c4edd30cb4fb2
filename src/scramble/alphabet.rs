use super::random::RandomSource;

/// Placeholder glyphs: brackets, slashes and operators, weighted towards `_`.
pub const DEFAULT_ALPHABET: &str = "!<>-_\\/[]{}—=+*^?#________";

/// The set of candidate placeholder characters. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleAlphabet {
    chars: Vec<char>,
}

impl ScrambleAlphabet {
    /// Build an alphabet from the characters of `source`, or `None` if it has none.
    ///
    /// Duplicates are kept on purpose: repeating a glyph raises its odds.
    pub fn new(source: &str) -> Option<Self> {
        let chars: Vec<char> = source.chars().collect();
        if chars.is_empty() { None } else { Some(Self { chars }) }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Pick a glyph uniformly.
    pub fn pick<R: RandomSource>(&self, rng: &mut R) -> char {
        let bound = u32::try_from(self.chars.len()).unwrap_or(u32::MAX);
        self.chars[rng.below(bound) as usize]
    }
}

impl Default for ScrambleAlphabet {
    fn default() -> Self {
        Self { chars: DEFAULT_ALPHABET.chars().collect() }
    }
}

use rand::seq::SliceRandom;
use rand::Rng;
use std::str::FromStr;
use unicode_width::UnicodeWidthChar;

use crate::error::ClockError;

pub const HOURS_PER_DAY: usize = 24;

/// One glyph per hour of the day, slot 0 sitting at the top of the dial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerSet(pub [char; HOURS_PER_DAY]);

/// Hieroglyphs U+13000 through U+13017.
pub const EGYPTIAN: MarkerSet = MarkerSet([
    '𓀀', '𓀁', '𓀂', '𓀃', '𓀄', '𓀅', '𓀆', '𓀇', //
    '𓀈', '𓀉', '𓀊', '𓀋', '𓀌', '𓀍', '𓀎', '𓀏', //
    '𓀐', '𓀑', '𓀒', '𓀓', '𓀔', '𓀕', '𓀖', '𓀗',
]);

/// Fallback for fonts without the Egyptian Hieroglyphs block.
pub const LATIN: MarkerSet = MarkerSet([
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', //
    'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', //
    'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X',
]);

impl Default for MarkerSet {
    fn default() -> Self {
        EGYPTIAN
    }
}

impl MarkerSet {
    /// Glyph for an hour of the day, wrapping past 23.
    pub fn for_hour(&self, hour: u32) -> char {
        self.0[hour as usize % HOURS_PER_DAY]
    }

    /// An independently shuffled copy of this set.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> MarkerSet {
        let mut glyphs = self.0;
        glyphs.shuffle(rng);
        MarkerSet(glyphs)
    }

    /// True when `self` holds exactly the glyphs of `alphabet`, each once.
    pub fn is_permutation_of(&self, alphabet: &MarkerSet) -> bool {
        let mut ours = self.0;
        let mut theirs = alphabet.0;
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs && ours.windows(2).all(|pair| pair[0] != pair[1])
    }
}

/// Named alphabets selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphSet {
    Egyptian,
    Latin,
}

impl GlyphSet {
    pub fn alphabet(self) -> MarkerSet {
        match self {
            GlyphSet::Egyptian => EGYPTIAN,
            GlyphSet::Latin => LATIN,
        }
    }

    /// Terminal columns the widest glyph of this set advances the cursor by.
    pub fn columns(self) -> usize {
        self.alphabet()
            .0
            .iter()
            .map(|glyph| glyph.width().unwrap_or(1))
            .max()
            .unwrap_or(1)
    }
}

impl FromStr for GlyphSet {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "egyptian" => Ok(GlyphSet::Egyptian),
            "latin" => Ok(GlyphSet::Latin),
            _ => Err(ClockError::UnknownGlyphSet(s.to_string())),
        }
    }
}

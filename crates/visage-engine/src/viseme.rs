//! Viseme vocabulary and the character mapping
//!
//! The channel names follow the Oculus 15-viseme convention carried by
//! common GLB/VRM avatars, so a stock avatar binds without remapping.

/// Visual mouth-shape categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Viseme {
    /// Silence, mouth closed
    #[default]
    Sil,
    PP, // "p", "b", "m" (lips together)
    FF, // "f", "v" (teeth on lip)
    TH, // "th" (tongue between teeth)
    DD, // "t", "d", "l" (tongue on ridge)
    KK, // "k", "g" (back of tongue)
    CH, // "ch", "j", "sh" (lips rounded)
    SS, // "s", "z" (teeth together)
    NN, // "n", "ng" (nasal)
    RR, // "r" (lips slightly rounded)
    AA, // "ah" as in "father"
    E,  // "eh" as in "bed"
    I,  // "ee" as in "see"
    O,  // "oh" as in "boat"
    U,  // "oo" as in "boot"
}

impl Viseme {
    /// Every viseme in the vocabulary; the blender zeroes all of these
    /// each frame before writing the active one.
    pub const ALL: [Viseme; 15] = [
        Viseme::Sil,
        Viseme::PP,
        Viseme::FF,
        Viseme::TH,
        Viseme::DD,
        Viseme::KK,
        Viseme::CH,
        Viseme::SS,
        Viseme::NN,
        Viseme::RR,
        Viseme::AA,
        Viseme::E,
        Viseme::I,
        Viseme::O,
        Viseme::U,
    ];

    /// Morph channel name for this viseme.
    pub fn channel_name(self) -> &'static str {
        match self {
            Viseme::Sil => "viseme_sil",
            Viseme::PP => "viseme_PP",
            Viseme::FF => "viseme_FF",
            Viseme::TH => "viseme_TH",
            Viseme::DD => "viseme_DD",
            Viseme::KK => "viseme_kk",
            Viseme::CH => "viseme_CH",
            Viseme::SS => "viseme_SS",
            Viseme::NN => "viseme_nn",
            Viseme::RR => "viseme_RR",
            Viseme::AA => "viseme_aa",
            Viseme::E => "viseme_E",
            Viseme::I => "viseme_I",
            Viseme::O => "viseme_O",
            Viseme::U => "viseme_U",
        }
    }

    /// Map one character of spoken text to its mouth shape.
    ///
    /// Total over all of char: lowercase letters follow the table, and
    /// everything else (uppercase, digits, punctuation, whitespace)
    /// falls back to the open `AA` shape. Deliberately no case folding;
    /// alignment payloads deliver lowercase text.
    pub fn from_char(c: char) -> Self {
        match c {
            'a' => Viseme::AA,
            'e' => Viseme::E,
            'i' | 'y' => Viseme::I,
            'o' => Viseme::O,
            'u' | 'w' => Viseme::U,
            'p' | 'b' | 'm' => Viseme::PP,
            'f' | 'v' => Viseme::FF,
            't' | 'd' | 'l' => Viseme::DD,
            'k' | 'g' | 'c' | 'q' => Viseme::KK,
            'j' => Viseme::CH,
            's' | 'z' | 'x' => Viseme::SS,
            'n' => Viseme::NN,
            'r' => Viseme::RR,
            _ => Viseme::AA,
        }
    }
}

use super::ink::Rgb;

/// A named set of colours and symbols that newly drawn shapes use.
///
/// Themes only affect presentation. Switching theme mid-game leaves shapes
/// already on the grid or in the tray untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    id: &'static str,
    name: &'static str,
    colors: [Rgb; 6],
    symbols: [char; 12],
}

const fn rgb6(hex: [u32; 6]) -> [Rgb; 6] {
    let mut colors = [Rgb::new(0, 0, 0); 6];
    let mut i = 0;
    while i < hex.len() {
        colors[i] = Rgb::from_hex(hex[i]);
        i += 1;
    }
    colors
}

/// All available themes; the first one is the default.
pub const THEMES: [Theme; 12] = [
    Theme {
        id: "classic",
        name: "Classic Ink",
        colors: rgb6([
            0x2d_3748, 0x74_4210, 0x7b_341e, 0x28_5e61, 0x55_3c9a, 0x1a_365d,
        ]),
        symbols: ['✦', '✧', '◆', '◇', '★', '☆', '●', '○', '■', '□', '▲', '△'],
    },
    Theme {
        id: "autumn",
        name: "Autumn Leaves",
        colors: rgb6([
            0x9c_4221, 0x74_4210, 0xc0_5621, 0x7b_341e, 0x97_5a16, 0x6b_4226,
        ]),
        symbols: ['❦', '❧', '✿', '❀', '✾', '❁', '❃', '✽', '❋', '✳', '❈', '✹'],
    },
    Theme {
        id: "ocean",
        name: "Ocean Depths",
        colors: rgb6([
            0x1a_365d, 0x2c_5282, 0x28_5e61, 0x23_4e52, 0x2a_4365, 0x2b_6cb0,
        ]),
        symbols: ['◈', '◇', '◆', '⬡', '⬢', '▽', '△', '○', '●', '◐', '◑', '◒'],
    },
    Theme {
        id: "royal",
        name: "Royal Court",
        colors: rgb6([
            0x55_3c9a, 0x6b_46c1, 0x44_337a, 0x32_2659, 0x70_2459, 0x7b_341e,
        ]),
        symbols: ['♛', '♚', '♕', '♔', '⚜', '✦', '★', '◆', '❖', '✧', '✹', '✵'],
    },
    Theme {
        id: "forest",
        name: "Enchanted Forest",
        colors: rgb6([
            0x27_6749, 0x2f_855a, 0x28_5e61, 0x23_4e52, 0x1c_4532, 0x74_4210,
        ]),
        symbols: ['❧', '☘', '✿', '❀', '✾', '❁', '♣', '✤', '✥', '❋', '✳', '❈'],
    },
    Theme {
        id: "midnight",
        name: "Midnight Study",
        colors: rgb6([
            0x1a_202c, 0x2d_3748, 0x4a_5568, 0x1a_365d, 0x2d_3748, 0x32_2659,
        ]),
        symbols: ['✦', '✧', '★', '☆', '◐', '◑', '●', '○', '◆', '◇', '■', '□'],
    },
    Theme {
        id: "sakura",
        name: "Sakura Bloom",
        colors: rgb6([
            0x97_266d, 0xb8_3280, 0xd5_3f8c, 0xed_64a6, 0x70_2459, 0x55_3c9a,
        ]),
        symbols: ['❀', '✿', '❁', '✾', '❃', '✽', '❋', '✳', '❈', '✹', '❉', '✵'],
    },
    Theme {
        id: "ember",
        name: "Burning Ember",
        colors: rgb6([
            0xc5_3030, 0x9c_4221, 0xdd_6b20, 0xd6_9e2e, 0x74_4210, 0x7b_341e,
        ]),
        symbols: ['✺', '✦', '★', '◆', '❖', '✧', '✹', '✵', '❋', '✳', '❈', '✽'],
    },
    Theme {
        id: "arctic",
        name: "Arctic Frost",
        colors: rgb6([
            0x2b_6cb0, 0x31_82ce, 0x42_99e1, 0x63_b3ed, 0x2c_5282, 0x28_5e61,
        ]),
        symbols: ['❄', '❆', '❅', '✧', '◇', '○', '◈', '⬡', '△', '☆', '✦', '◆'],
    },
    Theme {
        id: "sunset",
        name: "Golden Sunset",
        colors: rgb6([
            0xed_8936, 0xdd_6b20, 0xd6_9e2e, 0xec_c94b, 0xc0_5621, 0x9c_4221,
        ]),
        symbols: ['☀', '✦', '★', '◆', '❖', '✧', '✹', '✵', '◈', '⬡', '❋', '✳'],
    },
    Theme {
        id: "vintage",
        name: "Vintage Press",
        colors: rgb6([
            0x5d_4e37, 0x6b_705c, 0x8b_7355, 0xa9_8467, 0x7c_6f64, 0x6d_4c41,
        ]),
        symbols: ['❧', '☙', '✤', '✥', '✦', '✧', '◆', '◇', '●', '○', '■', '□'],
    },
    Theme {
        id: "neon",
        name: "Neon Nights",
        colors: rgb6([
            0x80_5ad5, 0xd5_3f8c, 0x38_b2ac, 0x4f_d1c5, 0xed_64a6, 0x66_7eea,
        ]),
        symbols: ['◆', '◇', '★', '☆', '●', '○', '■', '□', '▲', '△', '✦', '✧'],
    },
];

impl Theme {
    pub const DEFAULT: &'static Theme = &THEMES[0];

    /// Looks up a theme by id.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|theme| theme.id == id)
    }

    /// Looks up a theme by id, falling back to [`Theme::DEFAULT`] for
    /// unknown ids.
    #[must_use]
    pub fn by_id(id: &str) -> &'static Theme {
        Self::find(id).unwrap_or(Self::DEFAULT)
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[must_use]
    pub const fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

//! Built-in layout tables.
//!
//! Each row is a whitespace-separated list of keys, one token per key:
//! primary character, then shifted, then AltGr. `\0` leaves a slot empty.
//! Rows are number, top, home and bottom; a 13th top-row token is the
//! backslash key, a 12th home-row token the ISO key beside Enter, and an
//! 11th bottom-row token (listed first) the ISO key beside left Shift.

pub struct LayoutSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
    pub flag: &'static str,
    pub rows: [&'static str; 4],
}

pub const DEFAULT_LAYOUT: &str = "en-us";

pub const LAYOUTS: &[LayoutSpec] = &[
    LayoutSpec {
        id: "en-us",
        name: "English (US, QWERTY)",
        language: "en",
        flag: "🇺🇸",
        rows: [
            "`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+",
            "qQ wW eE rR tT yY uU iI oO pP [{ ]} \\|",
            "aA sS dD fF gG hH jJ kK lL ;: '\"",
            "zZ xX cC vV bB nN mM ,< .> /?",
        ],
    },
    LayoutSpec {
        id: "en-dvorak",
        name: "English (Dvorak)",
        language: "en",
        flag: "🇺🇸",
        rows: [
            "`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}",
            "'\" ,< .> pP yY fF gG cC rR lL /? =+ \\|",
            "aA oO eE uU iI dD hH tT nN sS -_",
            ";: qQ jJ kK xX bB mM wW vV zZ",
        ],
    },
    LayoutSpec {
        id: "en-colemak",
        name: "English (Colemak)",
        language: "en",
        flag: "🇺🇸",
        rows: [
            "`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+",
            "qQ wW fF pP gG jJ lL uU yY ;: [{ ]} \\|",
            "aA rR sS tT dD hH nN eE iI oO '\"",
            "zZ xX cC vV bB kK mM ,< .> /?",
        ],
    },
    LayoutSpec {
        id: "uk-ua",
        name: "Українська (ЙЦУКЕН)",
        language: "uk",
        flag: "🇺🇦",
        rows: [
            "'₴ 1! 2\" 3№ 4; 5% 6: 7? 8* 9( 0) -_ =+",
            "йЙ цЦ уУ кК еЕ нН гГ шШ щЩ зЗ хХ їЇ ґҐ",
            "фФ іІ вВ аА пП рР оО лЛ дД жЖ єЄ",
            "яЯ чЧ сС мМ иИ тТ ьЬ бБ юЮ .,",
        ],
    },
    LayoutSpec {
        id: "ru-ru",
        name: "Русская (ЙЦУКЕН)",
        language: "ru",
        flag: "🇷🇺",
        rows: [
            "ёЁ 1! 2\" 3№ 4; 5% 6: 7? 8* 9( 0) -_ =+",
            "йЙ цЦ уУ кК еЕ нН гГ шШ щЩ зЗ хХ ъЪ \\/",
            "фФ ыЫ вВ аА пП рР оО лЛ дД жЖ эЭ",
            "яЯ чЧ сС мМ иИ тТ ьЬ бБ юЮ .,",
        ],
    },
    LayoutSpec {
        id: "de-de",
        name: "Deutsch (QWERTZ)",
        language: "de",
        flag: "🇩🇪",
        rows: [
            "^° 1! 2\"² 3§³ 4$ 5% 6& 7/{ 8([ 9)] 0=} ß?\\ ´`",
            "qQ@ wW eE€ rR tT zZ uU iI oO pP üÜ +*~",
            "aA sS dD fF gG hH jJ kK lL öÖ äÄ #'",
            "<>| yY xX cC vV bB nN mMµ ,; .: -_",
        ],
    },
    LayoutSpec {
        id: "fr-fr",
        name: "Français (AZERTY)",
        language: "fr",
        flag: "🇫🇷",
        rows: [
            "² &1 é2~ \"3# '4{ (5[ -6| è7` _8\\ ç9^ à0@ )°] =+}",
            "aA zZ eE€ rR tT yY uU iI oO pP ^¨ $£¤",
            "qQ sS dD fF gG hH jJ kK lL mM ù% *µ",
            "<> wW xX cC vV bB nN ,? ;. :/ !§",
        ],
    },
    LayoutSpec {
        id: "es-es",
        name: "Español (QWERTY)",
        language: "es",
        flag: "🇪🇸",
        rows: [
            "ºª\\ 1!| 2\"@ 3·# 4$~ 5%\0 6&¬ 7/ 8( 9) 0= '? ¡¿",
            "qQ wW eE€ rR tT yY uU iI oO pP `^[ +*]",
            "aA sS dD fF gG hH jJ kK lL ñÑ ´¨{ çÇ}",
            "<>| zZ xX cC vV bB nN mM ,; .: -_",
        ],
    },
];

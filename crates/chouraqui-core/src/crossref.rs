//! Static tables reconciling the French and Hebrew corpora.
//!
//! The French store numbers books 10, 20, 30 ...; the Hebrew store numbers the
//! 39 books of the Tanakh 1..=39. A French book missing from the mapping has no
//! Hebrew edition.

use crate::model::BookNumber;

/// `(primary book, secondary book, Hebrew name, common French name)`.
const BOOK_TABLE: [(BookNumber, u32, &str, &str); 39] = [
    (10, 1, "בְּרֵאשִׁית", "Genèse"),
    (20, 2, "שְׁמוֹת", "Exode"),
    (30, 3, "וַיִּקְרָא", "Lévitique"),
    (40, 4, "בְּמִדְבַּר", "Nombres"),
    (50, 5, "דְּבָרִים", "Deutéronome"),
    (60, 6, "יְהוֹשֻׁעַ", "Josué"),
    (70, 7, "שׁוֹפְטִים", "Juges"),
    (80, 8, "רוּת", "Ruth"),
    (90, 9, "שְׁמוּאֵל א", "1 Samuel"),
    (100, 10, "שְׁמוּאֵל ב", "2 Samuel"),
    (110, 11, "מְלָכִים א", "1 Rois"),
    (120, 12, "מְלָכִים ב", "2 Rois"),
    (130, 13, "דִּבְרֵי הַיָּמִים א", "1 Chroniques"),
    (140, 14, "דִּבְרֵי הַיָּמִים ב", "2 Chroniques"),
    (150, 15, "עֶזְרָא", "Esdras"),
    (160, 16, "נְחֶמְיָה", "Néhémie"),
    (190, 17, "אֶסְתֵּר", "Esther"),
    (220, 18, "אִיּוֹב", "Job"),
    (230, 19, "תְּהִלִּים", "Psaumes"),
    (240, 20, "מִשְׁלֵי", "Proverbes"),
    (250, 21, "קֹהֶלֶת", "Ecclésiaste"),
    (260, 22, "שִׁיר הַשִּׁירִים", "Cantique des Cantiques"),
    (290, 23, "יְשַׁעְיָהוּ", "Isaïe"),
    (300, 24, "יִרְמְיָהוּ", "Jérémie"),
    (310, 25, "אֵיכָה", "Lamentations"),
    (330, 26, "יְחֶזְקֵאל", "Ézéchiel"),
    (340, 27, "דָּנִיֵּאל", "Daniel"),
    (350, 28, "הוֹשֵׁעַ", "Osée"),
    (360, 29, "יוֹאֵל", "Joël"),
    (370, 30, "עָמוֹס", "Amos"),
    (380, 31, "עֹבַדְיָה", "Abdias"),
    (390, 32, "יוֹנָה", "Jonas"),
    (400, 33, "מִיכָה", "Michée"),
    (410, 34, "נַחוּם", "Nahum"),
    (420, 35, "חֲבַקּוּק", "Habacuc"),
    (430, 36, "צְפַנְיָה", "Sophonie"),
    (440, 37, "חַגַּי", "Aggée"),
    (450, 38, "זְכַרְיָה", "Zacharie"),
    (460, 39, "מַלְאָכִי", "Malachie"),
];

fn entry(book: BookNumber) -> Option<&'static (BookNumber, u32, &'static str, &'static str)> {
    BOOK_TABLE.iter().find(|(primary, ..)| *primary == book)
}

/// Translate a French book number into the Hebrew store's numbering.
pub fn secondary_book_number(book: BookNumber) -> Option<u32> {
    entry(book).map(|(_, secondary, ..)| *secondary)
}

pub fn has_secondary_text(book: BookNumber) -> bool {
    entry(book).is_some()
}

pub fn hebrew_book_name(book: BookNumber) -> Option<&'static str> {
    entry(book).map(|(_, _, hebrew, _)| *hebrew)
}

/// Familiar French title, shown next to Chouraqui's own book name.
pub fn common_french_name(book: BookNumber) -> Option<&'static str> {
    entry(book).map(|(.., french)| *french)
}

/// Thematic section used to group the book selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookGroup {
    pub key: &'static str,
    pub label: &'static str,
}

pub const BOOK_GROUPS: [BookGroup; 5] = [
    BookGroup {
        key: "torah",
        label: "Torah",
    },
    BookGroup {
        key: "neviim",
        label: "Prophètes",
    },
    BookGroup {
        key: "ketouvim",
        label: "Écrits",
    },
    BookGroup {
        key: "deuterocanoniques",
        label: "Deutérocanoniques",
    },
    BookGroup {
        key: "nouveau-testament",
        label: "Nouveau Testament",
    },
];

const NEVIIM: [BookNumber; 21] = [
    60, 70, 90, 100, 110, 120, 290, 300, 330, 350, 360, 370, 380, 390, 400, 410, 420, 430, 440,
    450, 460,
];

/// Group a book belongs to. Books outside the Tanakh numbered from 470 on
/// are New Testament, the remaining ones deuterocanonical.
pub fn group_for_book(book: BookNumber) -> &'static BookGroup {
    let idx = if (10..=50).contains(&book) {
        0
    } else if NEVIIM.contains(&book) {
        1
    } else if has_secondary_text(book) {
        2
    } else if book >= 470 {
        4
    } else {
        3
    };
    &BOOK_GROUPS[idx]
}

pub fn group_by_key(key: &str) -> Option<&'static BookGroup> {
    BOOK_GROUPS.iter().find(|group| group.key == key)
}

//! Hebrew-letter numerals for chapter and verse labels.

const ONES: [&str; 10] = ["", "א", "ב", "ג", "ד", "ה", "ו", "ז", "ח", "ט"];
const TENS: [&str; 10] = ["", "י", "כ", "ל", "מ", "נ", "ס", "ע", "פ", "צ"];
const HUNDREDS: [&str; 10] = ["", "ק", "ר", "ש", "ת", "תק", "תר", "תש", "תת", "תתק"];

/// Convert `num` to its gematria spelling.
///
/// 15 and 16 are written טו and טז instead of the regular י+ה and י+ו, which
/// would spell the divine name. Values of 1000 and above fall back to decimal
/// digits; zero renders as an empty string.
pub fn to_hebrew_numeral(num: u32) -> String {
    if num == 0 {
        return String::new();
    }
    if num >= 1000 {
        return num.to_string();
    }

    let mut out = String::new();
    out.push_str(HUNDREDS[(num / 100) as usize]);

    let rest = num % 100;
    match rest {
        15 => out.push_str("טו"),
        16 => out.push_str("טז"),
        _ => {
            out.push_str(TENS[(rest / 10) as usize]);
            out.push_str(ONES[(rest % 10) as usize]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digits_and_tens() {
        assert_eq!(to_hebrew_numeral(1), "א");
        assert_eq!(to_hebrew_numeral(9), "ט");
        assert_eq!(to_hebrew_numeral(10), "י");
        assert_eq!(to_hebrew_numeral(22), "כב");
    }

    #[test]
    fn fifteen_and_sixteen_avoid_the_divine_name() {
        assert_eq!(to_hebrew_numeral(15), "טו");
        assert_eq!(to_hebrew_numeral(16), "טז");
        assert_eq!(to_hebrew_numeral(115), "קטו");
        assert_eq!(to_hebrew_numeral(116), "קטז");
        assert_eq!(to_hebrew_numeral(17), "יז");
    }

    #[test]
    fn hundreds_compose_with_the_remainder() {
        assert_eq!(to_hebrew_numeral(100), "ק");
        assert_eq!(to_hebrew_numeral(150), "קנ");
        assert_eq!(to_hebrew_numeral(176), "קעו");
        assert_eq!(to_hebrew_numeral(999), "תתקצט");
    }

    #[test]
    fn out_of_range_values() {
        assert_eq!(to_hebrew_numeral(0), "");
        assert_eq!(to_hebrew_numeral(1000), "1000");
    }
}

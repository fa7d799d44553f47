//! Spreadsheet-style column labels (A, B, ..., Z, AA, AB, ...)

/// Encode a 0-based column index as bijective base-26 letters.
///
/// 0 → "A", 25 → "Z", 26 → "AA", 701 → "ZZ", 702 → "AAA"
pub fn index_to_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Inverse of [`index_to_letters`]. Returns `None` for anything other than
/// a non-empty run of uppercase ASCII letters, or on overflow.
pub fn letters_to_index(letters: &str) -> Option<usize> {
    let mut index: Option<usize> = None;
    for byte in letters.bytes() {
        if !byte.is_ascii_uppercase() {
            return None;
        }
        let digit = (byte - b'A') as usize;
        index = Some(match index {
            None => digit,
            Some(prev) => prev.checked_add(1)?.checked_mul(26)?.checked_add(digit)?,
        });
    }
    index
}

/// Name of a column appended after `existing` columns: "var1", "var2", ...
pub fn appended_column_name(existing: usize) -> String {
    format!("var{}", existing.saturating_add(1))
}

/// Reference like "B3" for a 0-based `(row, col)`
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_letters(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_labels() {
        assert_eq!(index_to_letters(0), "A");
        assert_eq!(index_to_letters(1), "B");
        assert_eq!(index_to_letters(25), "Z");
        assert_eq!(index_to_letters(26), "AA");
        assert_eq!(index_to_letters(51), "AZ");
        assert_eq!(index_to_letters(52), "BA");
        assert_eq!(index_to_letters(701), "ZZ");
        assert_eq!(index_to_letters(702), "AAA");
    }

    #[test]
    fn test_round_trip_and_injective() {
        let mut seen = HashSet::new();
        for i in 0..=10_000 {
            let label = index_to_letters(i);
            assert_eq!(letters_to_index(&label), Some(i), "label {}", label);
            assert!(seen.insert(label));
        }
    }

    #[test]
    fn test_largest_index() {
        let label = index_to_letters(usize::MAX);
        assert!(label.bytes().all(|b| b.is_ascii_uppercase()));
        assert_eq!(letters_to_index(&label), Some(usize::MAX));
    }

    #[test]
    fn test_letters_to_index_rejects_garbage() {
        assert_eq!(letters_to_index(""), None);
        assert_eq!(letters_to_index("a"), None);
        assert_eq!(letters_to_index("A1"), None);
        assert_eq!(letters_to_index(&"Z".repeat(40)), None);
    }

    #[test]
    fn test_appended_column_name() {
        assert_eq!(appended_column_name(0), "var1");
        assert_eq!(appended_column_name(6), "var7");
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(2, 1), "B3");
        assert_eq!(cell_reference(99, 27), "AB100");
    }
}

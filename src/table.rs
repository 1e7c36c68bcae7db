// src/table.rs
// International Morse table covering the Koch character set

/// Word-gap marker. It is not keyed as tones.
pub const WORD_SEPARATOR: char = ' ';

const ENTRIES: [(char, &str); 41] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('/', "-..-."),
    ('?', "..--.."),
    ('=', "-...-"),
];

/// Static lookup from a printable character to its dot/dash string.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorseTable;

impl MorseTable {
    /// Letters are matched case-insensitively.
    pub fn lookup(ch: char) -> Option<&'static str> {
        let ch = ch.to_ascii_uppercase();
        ENTRIES
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, code)| *code)
    }

    pub fn contains(ch: char) -> bool {
        Self::lookup(ch).is_some()
    }

    /// Number of dots and dashes in the character's code.
    pub fn code_len(ch: char) -> Option<usize> {
        Self::lookup(ch).map(str::len)
    }

    pub fn entries() -> impl Iterator<Item = (char, &'static str)> {
        ENTRIES.iter().copied()
    }

    pub fn len() -> usize {
        ENTRIES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_entry_is_dots_and_dashes() {
        assert_eq!(MorseTable::len(), 41);
        for (ch, code) in MorseTable::entries() {
            assert!(!code.is_empty(), "{ch} has an empty code");
            assert!(
                code.chars().all(|s| s == '.' || s == '-'),
                "{ch} has a bad code {code}"
            );
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<&str> = MorseTable::entries().map(|(_, code)| code).collect();
        assert_eq!(codes.len(), MorseTable::len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(MorseTable::lookup('K'), Some("-.-"));
        assert_eq!(MorseTable::lookup('k'), Some("-.-"));
        assert_eq!(MorseTable::lookup('='), Some("-...-"));
        assert_eq!(MorseTable::lookup(WORD_SEPARATOR), None);
        assert_eq!(MorseTable::lookup('#'), None);
        assert_eq!(MorseTable::code_len(','), Some(6));
        assert!(!MorseTable::contains('!'));
    }
}

// src/koch.rs
// Koch lesson order: 40 nested lessons and 41 single-character drills

use crate::content::WeightMode;
use crate::error::{KochError, Result};

/// Koch learning order. Punctuation counts as one character each.
pub const KOCH_SEQUENCE: [char; 41] = [
    'K', 'M', 'U', 'R', 'E', 'S', 'N', 'A', 'P', 'T', 'L', 'W', 'I', '.', 'J', 'Z', '=', 'F', 'O',
    'Y', ',', 'V', 'G', '5', '/', 'Q', '9', '2', 'H', '3', '8', 'B', '?', '4', '7', 'C', '1', 'D',
    '6', '0', 'X',
];

pub const LESSON_COUNT: usize = KOCH_SEQUENCE.len() - 1;
pub const DRILL_COUNT: usize = KOCH_SEQUENCE.len();

#[derive(Debug, Clone, PartialEq)]
pub struct LessonDefinition {
    pub number: usize,
    pub characters: Vec<char>,
    /// Aligned with `characters`; `None` means uniform draws.
    pub weights: Option<Vec<f64>>,
}

impl LessonDefinition {
    /// The character this lesson introduces.
    pub fn newest(&self) -> char {
        self.characters[self.characters.len() - 1]
    }

    pub fn char_set(&self) -> String {
        self.characters.iter().collect()
    }

    pub fn dir_name(&self) -> String {
        format!("Lesson-{:02}", self.number)
    }
}

pub struct KochPlanner {
    mode: WeightMode,
}

impl KochPlanner {
    pub fn new(mode: WeightMode) -> Self {
        Self { mode }
    }

    /// Lesson `number` covers the first `number + 1` characters, so lesson 1 starts with two.
    pub fn lesson(&self, number: usize) -> Result<LessonDefinition> {
        if !(1..=LESSON_COUNT).contains(&number) {
            return Err(KochError::invalid_param(
                "lesson",
                format!("{number} is outside 1..={LESSON_COUNT}"),
            ));
        }
        let characters = KOCH_SEQUENCE[..=number].to_vec();
        let weights = self.mode.weights(&characters)?;
        Ok(LessonDefinition {
            number,
            characters,
            weights,
        })
    }

    pub fn lessons(&self) -> impl Iterator<Item = Result<LessonDefinition>> + '_ {
        (1..=LESSON_COUNT).map(|number| self.lesson(number))
    }

    /// The character drilled in `Character/koch-{index:03}.wav`.
    pub fn drill(index: usize) -> Result<char> {
        KOCH_SEQUENCE.get(index).copied().ok_or_else(|| {
            KochError::invalid_param("drill", format!("{index} is outside 0..{DRILL_COUNT}"))
        })
    }

    pub fn drills() -> impl Iterator<Item = (usize, char)> {
        KOCH_SEQUENCE.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MorseTable;
    use std::collections::HashSet;

    #[test]
    fn test_sequence_is_all_encodable_and_distinct() {
        let unique: HashSet<char> = KOCH_SEQUENCE.iter().copied().collect();
        assert_eq!(unique.len(), KOCH_SEQUENCE.len());
        assert!(KOCH_SEQUENCE.iter().all(|&c| MorseTable::contains(c)));
        assert_eq!(unique.len(), MorseTable::len());
    }

    #[test]
    fn test_first_lesson_has_two_characters() {
        let planner = KochPlanner::new(WeightMode::Uniform);
        let lesson = planner.lesson(1).unwrap();
        assert_eq!(lesson.characters, vec!['K', 'M']);
        assert_eq!(lesson.dir_name(), "Lesson-01");
        assert_eq!(lesson.weights, None);
    }

    #[test]
    fn test_lessons_are_nested() {
        let planner = KochPlanner::new(WeightMode::Gradual);
        let lessons: Vec<LessonDefinition> = planner.lessons().collect::<Result<_>>().unwrap();
        assert_eq!(lessons.len(), 40);
        for pair in lessons.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert_eq!(next.characters.len(), prev.characters.len() + 1);
            assert_eq!(&next.characters[..prev.characters.len()], &prev.characters[..]);
            assert!(!prev.characters.contains(&next.newest()));
        }
        let last = &lessons[39];
        assert_eq!(last.characters, KOCH_SEQUENCE.to_vec());
        assert_eq!(last.char_set(), "KMURESNAPTLWI.JZ=FOY,VG5/Q92H38B?47C1D60X");
        assert_eq!(last.dir_name(), "Lesson-40");
    }

    #[test]
    fn test_lesson_weights_follow_mode() {
        let planner = KochPlanner::new(WeightMode::NewCharFocus);
        let lesson = planner.lesson(4).unwrap();
        assert_eq!(lesson.newest(), 'E');
        assert_eq!(lesson.weights, Some(vec![1.0, 1.0, 1.0, 1.0, 2.0]));
    }

    #[test]
    fn test_drills() {
        assert_eq!(KochPlanner::drill(0).unwrap(), 'K');
        assert_eq!(KochPlanner::drill(13).unwrap(), '.');
        assert_eq!(KochPlanner::drill(40).unwrap(), 'X');
        assert!(KochPlanner::drill(41).is_err());
        assert_eq!(KochPlanner::drills().count(), 41);
    }

    #[test]
    fn test_out_of_range_lessons() {
        let planner = KochPlanner::new(WeightMode::Uniform);
        assert!(planner.lesson(0).is_err());
        assert!(planner.lesson(41).is_err());
    }
}

//! The embedded content of the generated document.

/// The heading drawn at the top of the page.
pub const TITLE: &str = "Math Test Questions";

/// The body lines drawn below the heading, in order. Empty strings are separators between
/// questions: they take up a line of vertical space but draw nothing visible.
pub const QUESTION_LINES: &[&str] = &[
    "1. What is 2 + 3?",
    "A) 4",
    "B) 5",
    "C) 6",
    "D) 7",
    "",
    "2. Calculate the area of a rectangle with length 5 and width 3.",
    "A) 8",
    "B) 15",
    "C) 20",
    "D) 25",
    "",
    "3. What is the square root of 16?",
    "A) 2",
    "B) 4",
    "C) 6",
    "D) 8",
];

/// All the line items of the page from top to bottom, the title first.
pub fn line_items() -> impl Iterator<Item = &'static str> {
    std::iter::once(TITLE).chain(QUESTION_LINES.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighteen_line_items_with_the_title_first() {
        let line_items: Vec<_> = line_items().collect();

        assert_eq!(line_items.len(), 18);
        assert_eq!(line_items[0], TITLE);
        assert_eq!(&line_items[1..6], &["1. What is 2 + 3?", "A) 4", "B) 5", "C) 6", "D) 7"]);
        assert_eq!(line_items[6], "");
    }

    #[test]
    fn separators_only_between_questions() {
        let separator_positions: Vec<_> = QUESTION_LINES
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_empty())
            .map(|(index, _)| index)
            .collect();

        assert_eq!(separator_positions, vec![5, 11]);
        assert!(!QUESTION_LINES.last().unwrap().is_empty());
    }
}

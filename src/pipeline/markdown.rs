//! Line classification: the Markdown-ish subset the renderer understands.
//!
//! ## Why not a real Markdown parser?
//!
//! The input is an activity report written by hand against a known template.
//! Supporting exactly three heading levels, two bullet levels, and plain
//! paragraphs keeps the DOCX output predictable — a full CommonMark parser
//! would accept constructs (tables, links, emphasis) that the document
//! assembler has no sensible rendering for. Text is emitted verbatim; no
//! inline formatting is interpreted.
//!
//! Classification is a pure function of the input text. The only state
//! carried between lines is a single boolean: whether we are currently
//! inside a bullet list. It decides whether an indented bullet line is a
//! second-level bullet or just text, and it is closed by any blank line,
//! heading, or plain paragraph.

/// One classified line of the report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Blank input line; becomes an empty paragraph.
    Blank,
    /// ATX heading. `level` is 1–3, guaranteed by the classifier.
    Heading { level: u8, text: String },
    /// First-level bullet (`- ` or `* ` after trimming).
    Bullet(String),
    /// Second-level bullet (two leading spaces, only inside an open list).
    SubBullet(String),
    /// Anything else, trimmed.
    Text(String),
}

/// Classify every line of `md` into a [`Block`], in input order.
///
/// Rule order matters and mirrors the report template's conventions:
/// blank → `###` → `##` → `#` → indented bullet → bullet → text.
///
/// An indented bullet line (`"  - x"`) is recognised as a second-level
/// bullet only while a list is open. Immediately after a blank line,
/// heading, or plain paragraph the list is closed, and the same line is
/// emitted as plain text (`"- x"`). A fixed behaviour, not an accident:
/// a sub-bullet with no parent bullet has nothing to attach to.
pub fn classify_lines(md: &str) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(md.lines().count());
    let mut in_list = false;

    for raw in md.lines() {
        let line = raw.trim();

        if line.is_empty() {
            in_list = false;
            blocks.push(Block::Blank);
            continue;
        }

        if let Some(text) = line.strip_prefix("### ") {
            in_list = false;
            blocks.push(Block::Heading {
                level: 3,
                text: text.trim().to_string(),
            });
            continue;
        }

        if let Some(text) = line.strip_prefix("## ") {
            in_list = false;
            blocks.push(Block::Heading {
                level: 2,
                text: text.trim().to_string(),
            });
            continue;
        }

        if let Some(text) = line.strip_prefix("# ") {
            in_list = false;
            blocks.push(Block::Heading {
                level: 1,
                text: text.trim().to_string(),
            });
            continue;
        }

        // The untrimmed form decides nesting: exactly-two-space indentation
        // marks a second-level bullet, but only while a list is open.
        if raw.starts_with("  - ") || raw.starts_with("  * ") {
            if in_list {
                blocks.push(Block::SubBullet(line[2..].trim().to_string()));
                continue;
            }
            // Orphan sub-bullet: falls through as plain text below.
        } else if line.starts_with("- ") || line.starts_with("* ") {
            in_list = true;
            blocks.push(Block::Bullet(line[2..].trim().to_string()));
            continue;
        }

        in_list = false;
        blocks.push(Block::Text(line.to_string()));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_become_paragraphs_in_order() {
        let blocks = classify_lines("first\nsecond\nthird");
        assert_eq!(
            blocks,
            vec![
                Block::Text("first".into()),
                Block::Text("second".into()),
                Block::Text("third".into()),
            ]
        );
    }

    #[test]
    fn heading_levels() {
        let blocks = classify_lines("# Title\n## Sub\n### Deep");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "Title".into() },
                Block::Heading { level: 2, text: "Sub".into() },
                Block::Heading { level: 3, text: "Deep".into() },
            ]
        );
    }

    #[test]
    fn heading_text_is_trimmed() {
        let blocks = classify_lines("#   Padded   ");
        assert_eq!(
            blocks,
            vec![Block::Heading { level: 1, text: "Padded".into() }]
        );
    }

    #[test]
    fn hash_without_space_is_text() {
        let blocks = classify_lines("#NoSpace");
        assert_eq!(blocks, vec![Block::Text("#NoSpace".into())]);
    }

    #[test]
    fn two_level_bullets() {
        let blocks = classify_lines("- a\n  - b\n- c");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet("a".into()),
                Block::SubBullet("b".into()),
                Block::Bullet("c".into()),
            ]
        );
    }

    #[test]
    fn star_bullets_work_at_both_levels() {
        let blocks = classify_lines("* a\n  * b");
        assert_eq!(
            blocks,
            vec![Block::Bullet("a".into()), Block::SubBullet("b".into())]
        );
    }

    #[test]
    fn blank_line_closes_list() {
        // The sub-bullet after the blank has no open list, so it degrades
        // to plain text.
        let blocks = classify_lines("- a\n\n  - b");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet("a".into()),
                Block::Blank,
                Block::Text("- b".into()),
            ]
        );
    }

    #[test]
    fn heading_closes_list() {
        let blocks = classify_lines("- a\n## Next\n  - b");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet("a".into()),
                Block::Heading { level: 2, text: "Next".into() },
                Block::Text("- b".into()),
            ]
        );
    }

    #[test]
    fn orphan_sub_bullet_is_plain_text() {
        let blocks = classify_lines("text\n  - b");
        assert_eq!(
            blocks,
            vec![Block::Text("text".into()), Block::Text("- b".into())]
        );
    }

    #[test]
    fn deep_indentation_is_a_first_level_bullet() {
        // Four spaces is not the two-space sub-bullet form; after trimming
        // it is an ordinary bullet, matching the template's conventions.
        let blocks = classify_lines("- a\n    - deep");
        assert_eq!(
            blocks,
            vec![Block::Bullet("a".into()), Block::Bullet("deep".into())]
        );
    }

    #[test]
    fn bullet_text_is_trimmed() {
        let blocks = classify_lines("-   spaced   ");
        assert_eq!(blocks, vec![Block::Bullet("spaced".into())]);
    }

    #[test]
    fn classification_is_deterministic() {
        let input = "# Overview\n\n- a\n  - b\n\ntext\n";
        assert_eq!(classify_lines(input), classify_lines(input));
    }

    #[test]
    fn mixed_document() {
        let blocks = classify_lines("# Overview\nHello world");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "Overview".into() },
                Block::Text("Hello world".into()),
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(classify_lines("").is_empty());
    }
}

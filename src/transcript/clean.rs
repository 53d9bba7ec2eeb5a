/// Clean raw transcript text in a single pass.
///
/// Removes bracketed artifacts like `[Music]` or `(inaudible)`, collapses
/// whitespace runs to single spaces, drops spaces that precede punctuation,
/// and trims the result. An opener without a matching closer is kept as
/// plain text rather than swallowing the rest of the input.
pub fn clean_transcript(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;

    // Candidate artifact text, buffered until its closer arrives
    let mut artifact = String::new();
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;

    for c in raw.chars() {
        let in_artifact = bracket_depth > 0 || paren_depth > 0;
        match c {
            '[' => {
                bracket_depth += 1;
                artifact.push(c);
            }
            ']' if bracket_depth > 0 => {
                bracket_depth -= 1;
                if bracket_depth == 0 && paren_depth == 0 {
                    artifact.clear();
                    // Artifact text reads as a word boundary
                    pending_space = !cleaned.is_empty();
                } else {
                    artifact.push(c);
                }
            }
            '(' => {
                paren_depth += 1;
                artifact.push(c);
            }
            ')' if paren_depth > 0 => {
                paren_depth -= 1;
                if bracket_depth == 0 && paren_depth == 0 {
                    artifact.clear();
                    pending_space = !cleaned.is_empty();
                } else {
                    artifact.push(c);
                }
            }
            _ if in_artifact => artifact.push(c),
            c => push_plain(&mut cleaned, &mut pending_space, c),
        }
    }

    // Unclosed opener: the buffered text was never an artifact
    for c in artifact.chars() {
        push_plain(&mut cleaned, &mut pending_space, c);
    }

    cleaned
}

fn push_plain(cleaned: &mut String, pending_space: &mut bool, c: char) {
    if c.is_whitespace() {
        *pending_space = !cleaned.is_empty();
    } else {
        if *pending_space && !matches!(c, ',' | '.' | '!' | '?') {
            cleaned.push(' ');
        }
        *pending_space = false;
        cleaned.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_transcript("hello   world\n\tagain"), "hello world again");
    }

    #[test]
    fn test_strips_bracketed_artifacts() {
        assert_eq!(clean_transcript("[Music] hello [Applause] world"), "hello world");
        assert_eq!(clean_transcript("so (inaudible) anyway"), "so anyway");
    }

    #[test]
    fn test_tightens_punctuation() {
        assert_eq!(clean_transcript("hello , world !"), "hello, world!");
        assert_eq!(clean_transcript("wait . what ?"), "wait. what?");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(clean_transcript(""), "");
        assert_eq!(clean_transcript("   \n\t  "), "");
        assert_eq!(clean_transcript("[Music]"), "");
    }

    #[test]
    fn test_trims_result() {
        assert_eq!(clean_transcript("  hello world  "), "hello world");
    }

    #[test]
    fn test_artifact_between_words_keeps_boundary() {
        assert_eq!(clean_transcript("one[Music]two"), "one two");
    }

    #[test]
    fn test_unmatched_closers_pass_through() {
        assert_eq!(clean_transcript("a ) b ] c"), "a ) b ] c");
    }

    #[test]
    fn test_unmatched_openers_kept_as_text() {
        assert_eq!(
            clean_transcript("the ratio is (a over b and that matters"),
            "the ratio is (a over b and that matters"
        );
        assert_eq!(clean_transcript("see [chapter two for more"), "see [chapter two for more");
        // Matched pairs on the same line are still removed
        assert_eq!(
            clean_transcript("[Music] fine (but this stays"),
            "fine (but this stays"
        );
    }
}

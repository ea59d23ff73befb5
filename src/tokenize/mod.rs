mod types;
pub use types::*;

/// Cuts `text` into chunks according to `split`.
///
/// Concatenating the full text of every chunk gives back `text`.
///
/// # Examples
///
/// ```
/// use crossdiff::tokenize::{tokenize, Split};
///
/// let chunks = tokenize("a\nb\r\n", &Split::Delimiters(vec!['\n', '\r']));
/// assert_eq!(chunks[1].content(), "b");
/// assert_eq!(chunks[1].trailing(), "\r\n");
/// ```
pub fn tokenize(text: &str, split: &Split) -> Vec<Chunk> {
    match split {
        Split::Delimiters(delimiters) => split_delimited(text, delimiters),
        Split::Boundaries => split_boundaries(text),
        Split::Chars => text
            .char_indices()
            .map(|(i, c)| {
                let end = i + c.len_utf8();
                Chunk::new(&text[i..end], end - i)
            })
            .collect(),
    }
}

fn split_delimited(text: &str, delimiters: &[char]) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut start = 0;
    let mut trailing_at = None;
    for (i, c) in text.char_indices() {
        let is_delimiter = delimiters.contains(&c);
        match trailing_at {
            None if is_delimiter => trailing_at = Some(i),
            Some(split) if !is_delimiter => {
                chunks.push(Chunk::new(&text[start..i], split - start));
                start = i;
                trailing_at = None;
            }
            _ => {}
        }
    }
    if start < text.len() {
        let split = trailing_at.unwrap_or(text.len());
        chunks.push(Chunk::new(&text[start..], split - start));
    }
    chunks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    // each distinct whitespace character is its own class
    Space(char),
    Word,
    Symbol,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Space(c)
        } else if c.is_alphanumeric() || c == '_' {
            CharClass::Word
        } else {
            CharClass::Symbol
        }
    }
}

fn split_boundaries(text: &str) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut start = 0;
    let mut current = None;
    for (i, c) in text.char_indices() {
        let class = CharClass::of(c);
        if current.is_some_and(|prev| prev != class) {
            chunks.push(Chunk::new(&text[start..i], i - start));
            start = i;
        }
        current = Some(class);
    }
    if start < text.len() {
        chunks.push(Chunk::new(&text[start..], text.len() - start));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn lines() -> Split {
        Split::Delimiters(vec!['\n', '\r'])
    }

    fn parts(chunks: &[Chunk]) -> Vec<(&str, &str)> {
        chunks.iter().map(|c| (c.content(), c.trailing())).collect()
    }

    proptest! {
        #[test]
        fn test_round_trip_delimited(text in "[ab\\n\\r ]{0,40}") {
            let joined: String = tokenize(&text, &lines()).iter().map(Chunk::text).collect();
            prop_assert_eq!(joined, text);
        }

        #[test]
        fn test_round_trip_boundaries(text in ".{0,40}") {
            let joined: String = tokenize(&text, &Split::Boundaries).iter().map(Chunk::text).collect();
            prop_assert_eq!(joined, text);
        }

        #[test]
        fn test_round_trip_chars(text in ".{0,40}") {
            let chunks = tokenize(&text, &Split::Chars);
            prop_assert_eq!(chunks.len(), text.chars().count());
            let joined: String = chunks.iter().map(Chunk::text).collect();
            prop_assert_eq!(joined, text);
        }
    }

    #[rstest]
    #[case(Split::Delimiters(vec!['\n']))]
    #[case(Split::Boundaries)]
    #[case(Split::Chars)]
    fn test_empty_input(#[case] split: Split) {
        assert!(tokenize("", &split).is_empty());
    }

    #[test]
    fn test_delimited_lines() {
        let chunks = tokenize("a\nb\r\n\nc", &lines());
        assert_eq!(
            parts(&chunks),
            vec![("a", "\n"), ("b", "\r\n\n"), ("c", "")]
        );
    }

    #[test]
    fn test_leading_delimiters() {
        let chunks = tokenize("\n\nx\n", &lines());
        assert_eq!(parts(&chunks), vec![("", "\n\n"), ("x", "\n")]);
    }

    #[test]
    fn test_boundaries() {
        let chunks = tokenize("let x_1 = foo(bar);", &Split::Boundaries);
        let texts: Vec<&str> = chunks.iter().map(Chunk::text).collect();
        assert_eq!(
            texts,
            vec!["let", " ", "x_1", " ", "=", " ", "foo", "(", "bar", ");"]
        );
    }

    #[test]
    fn test_boundaries_keep_whitespace_kinds_apart() {
        // a run of one whitespace character stays a single unit on purpose
        let chunks = tokenize("a  \t\n\nb", &Split::Boundaries);
        let texts: Vec<&str> = chunks.iter().map(Chunk::text).collect();
        assert_eq!(texts, vec!["a", "  ", "\t", "\n\n", "b"]);
    }

    #[test]
    fn test_split_clamped_to_char_boundary() {
        let chunk = Chunk::new("é", 1);
        assert_eq!(chunk.content(), "é");
        assert_eq!(chunk.trailing(), "");

        let chunk = Chunk::new("ab", 7);
        assert_eq!((chunk.content(), chunk.trailing()), ("ab", ""));
    }

    #[test]
    fn test_same_as_missing_counterpart() {
        let chunk = Chunk::new("a", 1);
        assert!(chunk.same_as(None).is_err());
        assert_eq!(chunk.same_as(Some(&Chunk::new("a", 1))), Ok(true));
        assert_eq!(chunk.same_as(Some(&Chunk::new("b", 1))), Ok(false));
    }
}

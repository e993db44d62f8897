//! Rendering of the build command line for status and error output.

/// Characters that make `sh` treat a word as more than a literal.
const SHELL_META: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}', '<',
    '>', '|', '&', ';', '#', '~',
];

/// Join command parts into a line that can be pasted back into `sh`.
pub fn display_command(parts: &[String]) -> String {
    parts
        .iter()
        .map(|part| quote_word(part))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_word(word: &str) -> String {
    if word.is_empty() {
        "''".to_string()
    } else if word.contains(SHELL_META) {
        // Close, escape and reopen for embedded single quotes.
        format!("'{}'", word.replace('\'', r"'\''"))
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(parts: &[&str]) -> String {
        display_command(&parts.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn plain_words_are_left_alone() {
        assert_eq!(
            line(&["sh", "/src/cargo.sh", "build", "--release", "--target=x86_64"]),
            "sh /src/cargo.sh build --release --target=x86_64"
        );
    }

    #[test]
    fn words_with_spaces_are_quoted() {
        assert_eq!(
            line(&["sh", "/tmp/my dir/cargo.sh", "build", "--features=a b"]),
            "sh '/tmp/my dir/cargo.sh' build '--features=a b'"
        );
    }

    #[test]
    fn embedded_single_quote() {
        assert_eq!(line(&["it's"]), r"'it'\''s'");
    }

    #[test]
    fn empty_word_stays_visible() {
        assert_eq!(line(&["build", ""]), "build ''");
    }
}

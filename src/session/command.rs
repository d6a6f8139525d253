//! Command-line splitting

use std::fmt;

/// Backslash escapes only make sense where `\` is not the path separator.
const BACKSLASH_ESCAPES: bool = cfg!(unix);

/// Why a command string could not be split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// A quote was opened and never closed
    UnterminatedQuote(char),
    /// The command ends in a lone backslash
    TrailingBackslash,
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::UnterminatedQuote(q) => write!(f, "unterminated {q} quote"),
            SplitError::TrailingBackslash => f.write_str("trailing backslash"),
        }
    }
}

impl std::error::Error for SplitError {}

/// Split a command string into program and arguments, POSIX-shell style.
///
/// Words are separated by whitespace. Single quotes take everything up to the
/// next single quote literally; double quotes allow `\"`, `\\`, `\$` and
/// `` \` `` escapes. Outside quotes a backslash escapes the next character.
/// No expansion of any kind is performed.
pub fn split_command(command: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => word.push(c),
                        None => return Err(SplitError::UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') if BACKSLASH_ESCAPES => match chars.next() {
                            Some(e @ ('"' | '\\' | '$' | '`')) => word.push(e),
                            Some(other) => {
                                word.push('\\');
                                word.push(other);
                            }
                            None => return Err(SplitError::UnterminatedQuote('"')),
                        },
                        Some(c) => word.push(c),
                        None => return Err(SplitError::UnterminatedQuote('"')),
                    }
                }
            }
            '\\' if BACKSLASH_ESCAPES => {
                in_word = true;
                match chars.next() {
                    Some(escaped) => word.push(escaped),
                    None => return Err(SplitError::TrailingBackslash),
                }
            }
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }

    if in_word {
        words.push(word);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> Vec<String> {
        split_command(s).unwrap()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(split("python3  -i\t-q"), ["python3", "-i", "-q"]);
    }

    #[test]
    fn test_empty() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_single_quotes() {
        assert_eq!(
            split("sh -c 'printf \"Password: \"; read pw'"),
            ["sh", "-c", "printf \"Password: \"; read pw"]
        );
    }

    #[test]
    fn test_double_quotes() {
        assert_eq!(split(r#"echo "a b" "c""#), ["echo", "a b", "c"]);
    }

    #[test]
    fn test_empty_quoted_argument() {
        assert_eq!(split("prog '' x"), ["prog", "", "x"]);
    }

    #[test]
    fn test_adjacent_quotes_join() {
        assert_eq!(split(r#"a'b'"c"d"#), ["abcd"]);
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            split_command("echo 'oops"),
            Err(SplitError::UnterminatedQuote('\''))
        );
        assert_eq!(
            split_command("echo \"oops"),
            Err(SplitError::UnterminatedQuote('"'))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_escapes() {
        assert_eq!(split(r"echo a\ b"), ["echo", "a b"]);
        assert_eq!(split(r#"echo "say \"hi\" \n""#), ["echo", "say \"hi\" \\n"]);
        assert_eq!(split_command("echo \\"), Err(SplitError::TrailingBackslash));
    }
}

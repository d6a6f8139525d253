//! Shell-style glob matching over whole responses

use crate::result::PatternError;
use regex::Regex;

/// A compiled shell-style glob.
///
/// Matching is anchored at both ends: the pattern must describe the *entire*
/// text. `*` matches any run of characters (including line breaks and `/`),
/// `?` matches exactly one character, and `[...]` / `[!...]` match a character
/// class. A backslash escapes the next character. Braces and `**` carry no
/// special meaning.
///
/// A pattern that fails to compile never matches anything.
///
/// # Examples
///
/// ```
/// use expect_script::GlobPattern;
///
/// let pattern = GlobPattern::new("Password: *");
/// assert!(pattern.is_match("Password: "));
/// assert!(!pattern.is_match("Enter Password: "));
/// ```
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: Option<Regex>,
}

impl GlobPattern {
    /// Compile a pattern, falling back to "never matches" if it is invalid.
    pub fn new(pattern: impl Into<String>) -> Self {
        let source = pattern.into();
        let matcher = compile(&source).ok();
        Self { source, matcher }
    }

    /// Compile a pattern, reporting invalid syntax.
    pub fn try_new(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let source = pattern.into();
        let matcher = compile(&source)?;
        Ok(Self {
            source,
            matcher: Some(matcher),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern compiled.
    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    /// Test `text` against the whole pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(text))
    }
}

/// One-shot glob test; see [`GlobPattern`] for the syntax.
///
/// ```
/// use expect_script::glob_match;
///
/// assert!(glob_match("foo*", "foobar"));
/// assert!(!glob_match("foo*", "xfoobar"));
/// assert!(glob_match("f?o", "foo"));
/// assert!(!glob_match("f?o", "fooo"));
/// ```
pub fn glob_match(pattern: &str, text: &str) -> bool {
    GlobPattern::new(pattern).is_match(text)
}

fn compile(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(&to_regex(pattern)).map_err(|e| PatternError::InvalidGlob {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Rewrite a shell glob as an anchored regex.
///
/// The regex runs in Unicode mode with `s` set, so `?` is one character and
/// `*` crosses line breaks. Runs of `*` collapse into one.
fn to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 16);
    out.push_str(r"(?s)\A");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => match chars.get(i + 1) {
                Some(&next) => {
                    push_literal(&mut out, next);
                    i += 2;
                }
                None => {
                    push_literal(&mut out, '\\');
                    i += 1;
                }
            },
            '*' => {
                out.push_str(".*");
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
                i += 1;
            }
            '?' => {
                out.push('.');
                i += 1;
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end + 1;
                }
                // unterminated class: the bracket is an ordinary character
                None => {
                    push_literal(&mut out, '[');
                    i += 1;
                }
            },
            c => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }

    out.push_str(r"\z");
    out
}

/// Index of the `]` closing the class opened at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if matches!(chars.get(j), Some('!' | '^')) {
        j += 1;
    }
    // a leading `]` is a member, not the terminator
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

/// Emit the members between `[` and `]` as a regex class.
///
/// A `-` between two members is a range; anywhere else it is literal.
fn push_class(out: &mut String, members: &[char]) {
    out.push('[');
    let members = match members.first() {
        Some('!' | '^') => {
            out.push('^');
            &members[1..]
        }
        _ => members,
    };

    for (k, &c) in members.iter().enumerate() {
        if c == '-' && k > 0 && k + 1 < members.len() {
            out.push('-');
        } else {
            if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out.push(']');
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

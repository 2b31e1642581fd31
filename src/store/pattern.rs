//! Glob Pattern Matching
//!
//! Key matching with the same wildcard rules as the Redis `KEYS` command.

/// Returns true if `key` matches the glob `pattern`.
///
/// Supported syntax:
/// - `*` matches any run of characters, including none
/// - `?` matches exactly one character
/// - `[abc]`, `[a-z]`, `[^a]` match one character from a class
/// - `\x` matches `x` literally
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();
    match_from(&pattern, &key)
}

fn match_from(pattern: &[char], key: &[char]) -> bool {
    let mut pi = 0;
    let mut ki = 0;

    while pi < pattern.len() {
        match pattern[pi] {
            '*' => {
                while pi + 1 < pattern.len() && pattern[pi + 1] == '*' {
                    pi += 1;
                }
                if pi + 1 == pattern.len() {
                    return true;
                }
                let rest = &pattern[pi + 1..];
                return (ki..=key.len()).any(|start| match_from(rest, &key[start..]));
            }
            '?' => {
                if ki >= key.len() {
                    return false;
                }
                ki += 1;
            }
            '[' => {
                if ki >= key.len() {
                    return false;
                }
                let (matched, consumed) = match_class(&pattern[pi + 1..], key[ki]);
                if !matched {
                    return false;
                }
                pi += consumed;
                ki += 1;
            }
            '\\' if pi + 1 < pattern.len() => {
                pi += 1;
                if ki >= key.len() || key[ki] != pattern[pi] {
                    return false;
                }
                ki += 1;
            }
            literal => {
                if ki >= key.len() || key[ki] != literal {
                    return false;
                }
                ki += 1;
            }
        }
        pi += 1;
    }

    ki == key.len()
}

/// Matches `c` against a character class whose body starts right after `[`.
///
/// Returns whether it matched and how many pattern characters the class
/// body used, including the closing `]` when present. An unterminated class
/// runs to the end of the pattern.
fn match_class(body: &[char], c: char) -> (bool, usize) {
    let mut i = 0;
    let negate = body.first() == Some(&'^');
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < body.len() && body[i] != ']' {
        if body[i] == '\\' && i + 1 < body.len() {
            i += 1;
            if body[i] == c {
                matched = true;
            }
        } else if i + 2 < body.len() && body[i + 1] == '-' && body[i + 2] != ']' {
            let (lo, hi) = if body[i] <= body[i + 2] {
                (body[i], body[i + 2])
            } else {
                (body[i + 2], body[i])
            };
            if lo <= c && c <= hi {
                matched = true;
            }
            i += 2;
        } else if body[i] == c {
            matched = true;
        }
        i += 1;
    }

    let consumed = if i < body.len() { i + 1 } else { i };
    (matched != negate, consumed)
}

//! Console line tokenizer with shell-style quoting.

use helm_types::error::{HelmError, Result};

/// Split a console line into tokens.
///
/// Whitespace separates tokens; single quotes are literal, double quotes
/// allow `\"` and `\\` escapes, and a bare backslash escapes the next char.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;
    // Distinguishes `""` (an empty token) from no token at all.
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            match ch {
                '"' => in_double = false,
                '\\' => match chars.peek() {
                    Some(&next @ ('"' | '\\')) => {
                        current.push(next);
                        chars.next();
                    },
                    _ => current.push('\\'),
                },
                _ => current.push(ch),
            }
        } else {
            match ch {
                '\'' => {
                    in_single = true;
                    quoted = true;
                },
                '"' => {
                    in_double = true;
                    quoted = true;
                },
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() || quoted {
                        tokens.push(std::mem::take(&mut current));
                        quoted = false;
                    }
                },
                _ => current.push(ch),
            }
        }
    }

    if in_single {
        return Err(HelmError::Validation("unterminated single quote".to_string()));
    }
    if in_double {
        return Err(HelmError::Validation("unterminated double quote".to_string()));
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Split a console line into `(syntax, args)`. A leading `/` is optional.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<(String, Vec<String>)>> {
    let line = line.trim();
    let line = line.strip_prefix('/').unwrap_or(line);
    let mut tokens = tokenize(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    let syntax = tokens.remove(0);
    Ok(Some((syntax, tokens)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_simple() {
        assert_eq!(tokenize("tp Bob Alice").unwrap(), vec!["tp", "Bob", "Alice"]);
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  heal \t Bob  ").unwrap(), vec!["heal", "Bob"]);
    }

    #[test]
    fn tokenize_single_quotes() {
        assert_eq!(
            tokenize("say Bob 'hello there'").unwrap(),
            vec!["say", "Bob", "hello there"]
        );
    }

    #[test]
    fn tokenize_double_quotes_with_escapes() {
        assert_eq!(
            tokenize(r#"say Bob "a \"quoted\" word""#).unwrap(),
            vec!["say", "Bob", r#"a "quoted" word"#]
        );
    }

    #[test]
    fn tokenize_empty_quoted_token() {
        assert_eq!(tokenize(r#"say "" x"#).unwrap(), vec!["say", "", "x"]);
    }

    #[test]
    fn tokenize_backslash_escapes_space() {
        assert_eq!(tokenize(r"buy big\ shovel").unwrap(), vec!["buy", "big shovel"]);
    }

    #[test]
    fn tokenize_unterminated() {
        assert!(tokenize("say 'oops").is_err());
        assert!(tokenize("say \"oops").is_err());
    }

    #[test]
    fn parse_line_strips_slash() {
        let (syntax, args) = parse_line("/noise Bob 5").unwrap().unwrap();
        assert_eq!(syntax, "noise");
        assert_eq!(args, vec!["Bob", "5"]);
        let (syntax, args) = parse_line("clear").unwrap().unwrap();
        assert_eq!(syntax, "clear");
        assert!(args.is_empty());
    }

    #[test]
    fn parse_line_blank() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("/").unwrap().is_none());
    }
}

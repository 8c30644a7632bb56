//! `.properties` text parser
//!
//! Follows the `java.util.Properties` line format: `#`/`!` comments, `=`, `:`
//! or whitespace as the key/value separator, backslash line continuation and
//! `\t \n \r \f \uXXXX` escapes.

use crate::core::{Error, PropertySet, Result};
use std::collections::HashMap;
use std::path::Path;

/// Parse decoded bundle text. `path` is only used for error reporting.
pub fn parse(content: &str, path: &Path) -> Result<PropertySet> {
    let mut entries = HashMap::new();
    // \n, \r\n and a bare \r all end a line
    let content = content.replace("\r\n", "\n");
    let mut lines = content.split(['\n', '\r']).enumerate();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_entry(&logical);
        let to_error = |reason: String| Error::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            reason,
        };
        let key = unescape(raw_key).map_err(to_error)?;
        let value = unescape(raw_value).map_err(to_error)?;
        entries.insert(key, value);
    }

    Ok(PropertySet::from(entries))
}

/// An odd number of trailing backslashes joins the next line
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map(str::trim_start)
        .unwrap_or(rest);
    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let unit = read_code_unit(&mut chars)?;
                if (0xD800..0xDC00).contains(&unit) {
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => read_code_unit(&mut chars)?,
                        _ => return Err(format!("unpaired surrogate \\u{:04X}", unit)),
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(format!("unpaired surrogate \\u{:04X}", unit));
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).ok_or_else(|| format!("invalid code point {:X}", code))?);
                } else {
                    out.push(
                        char::from_u32(unit)
                            .ok_or_else(|| format!("unpaired surrogate \\u{:04X}", unit))?,
                    );
                }
            }
            Some(other) => out.push(other),
            // trailing backslash of a continuation that hit end of input
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>) -> std::result::Result<u32, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed \\u escape \"\\u{}\"", digits));
    }
    u32::from_str_radix(&digits, 16).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(content: &str) -> PropertySet {
        parse(content, Path::new("test.properties")).unwrap()
    }

    #[test]
    fn test_separators() {
        let set = parse_str("a=1\nb:2\nc 3\nd = 4\ne\t:  5\n");

        assert_eq!(set.get_string("a"), "1");
        assert_eq!(set.get_string("b"), "2");
        assert_eq!(set.get_string("c"), "3");
        assert_eq!(set.get_string("d"), "4");
        assert_eq!(set.get_string("e"), "5");
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let set = parse_str("# comment\n! also a comment\n\n   \nklang.hello=Hello\n");

        assert_eq!(set.len(), 1);
        assert_eq!(set.get_string("klang.hello"), "Hello");
    }

    #[test]
    fn test_key_without_value() {
        let set = parse_str("empty\nempty2=\n");

        assert!(set.has_key("empty"));
        assert_eq!(set.get_string("empty"), "");
        assert!(set.has_key("empty2"));
    }

    #[test]
    fn test_line_continuation() {
        let set = parse_str("fruits = apple, \\\n         banana, \\\n    pear\nnext=1\n");

        assert_eq!(set.get_string("fruits"), "apple, banana, pear");
        assert_eq!(set.get_string("next"), "1");
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let set = parse_str("path=C:\\\\\nother=x\n");

        assert_eq!(set.get_string("path"), "C:\\");
        assert_eq!(set.get_string("other"), "x");
    }

    #[test]
    fn test_escapes() {
        let set = parse_str("tab=a\\tb\nline=a\\nb\nhello=\\u4F60\\u597D\nkey\\=with\\:seps=v\nsmile=\\uD83D\\uDE00\n");

        assert_eq!(set.get_string("tab"), "a\tb");
        assert_eq!(set.get_string("line"), "a\nb");
        assert_eq!(set.get_string("hello"), "你好");
        assert_eq!(set.get_string("key=with:seps"), "v");
        assert_eq!(set.get_string("smile"), "\u{1F600}");
    }

    #[test]
    fn test_value_keeps_trailing_text() {
        let set = parse_str("greeting = Hello, world = yes\n");
        assert_eq!(set.get_string("greeting"), "Hello, world = yes");
    }

    #[test]
    fn test_later_duplicate_wins() {
        let set = parse_str("k=first\nk=second\n");
        assert_eq!(set.get_string("k"), "second");
    }

    #[test]
    fn test_bad_unicode_escape_reports_line() {
        let err = parse("ok=1\nbad=\\u12G4\n", Path::new("x.properties")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let set = parse_str("a=1\rb=2\r# note\rc=x\\\r  y\r");
        assert_eq!(set.get_string("a"), "1");
        assert_eq!(set.get_string("b"), "2");
        assert_eq!(set.get_string("c"), "xy");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let set = parse_str("a=1\r\nb=2\r\n");
        assert_eq!(set.get_string("a"), "1");
        assert_eq!(set.get_string("b"), "2");
    }
}

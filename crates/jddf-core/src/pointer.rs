//! # JSON Pointer Rendering
//!
//! Instance and schema paths are token sequences internally. The shared
//! conformance suite and operator-facing messages use RFC 6901 JSON
//! Pointers, so this module converts between the two.
//!
//! Escaping: `~` becomes `~0` and `/` becomes `~1`. The empty token list is
//! the empty pointer `""`, which denotes the document root.

/// Render a token sequence as a JSON Pointer.
pub fn to_pointer<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        for c in token.as_ref().chars() {
            match c {
                '~' => out.push_str("~0"),
                '/' => out.push_str("~1"),
                other => out.push(other),
            }
        }
    }
    out
}

/// Split a JSON Pointer into its unescaped tokens.
///
/// Returns `None` if `pointer` is neither empty nor starts with `/`.
pub fn from_pointer(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(
        rest.split('/')
            .map(|t| t.replace("~1", "/").replace("~0", "~"))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty_pointer() {
        let empty: [&str; 0] = [];
        assert_eq!(to_pointer(&empty), "");
        assert_eq!(from_pointer(""), Some(vec![]));
    }

    #[test]
    fn test_plain_tokens() {
        assert_eq!(to_pointer(&["properties", "a", "type"]), "/properties/a/type");
        assert_eq!(
            from_pointer("/elements/0"),
            Some(vec!["elements".to_string(), "0".to_string()])
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(to_pointer(&["a/b", "m~n"]), "/a~1b/m~0n");
        assert_eq!(
            from_pointer("/a~1b/m~0n"),
            Some(vec!["a/b".to_string(), "m~n".to_string()])
        );
        // ~01 is "~1" literally, not "/".
        assert_eq!(from_pointer("/~01"), Some(vec!["~1".to_string()]));
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(to_pointer(&[""]), "/");
        assert_eq!(from_pointer("/"), Some(vec![String::new()]));
    }

    #[test]
    fn test_rejects_relative() {
        assert_eq!(from_pointer("a/b"), None);
    }
}

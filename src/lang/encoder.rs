//! Stock value encoders for `Lang::set_encoder`
//!
//! Bundle bytes are already decoded to UTF-8 when they are loaded, so the
//! default encoder passes values through untouched.

/// Post-processing applied to every value returned by `Lang::get`
pub type Encoder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Returns the value unchanged (default)
pub fn identity(value: &str) -> String {
    value.to_string()
}

/// Strips leading and trailing whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(identity(" 你好 "), " 你好 ");
        assert_eq!(identity(""), "");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim("  Hello\t"), "Hello");
    }
}

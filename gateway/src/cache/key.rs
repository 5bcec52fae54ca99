//! Cache-key derivation.

/// Hex digest of the UTF-8 bytes of the text. Fixed width, deterministic,
/// stable across process restarts.
pub fn text_digest(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Cache key for a model and an already-computed text digest.
pub fn cache_key(model: &str, text_hash: &str) -> String {
    format!("{}::{}", model, text_hash)
}

/// Derive the cache key for a (model, text) pair: `<model>::<digest>`.
pub fn derive_key(model: &str, text: &str) -> String {
    cache_key(model, &text_digest(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        assert_eq!(
            derive_key("sentiment", "I love this"),
            derive_key("sentiment", "I love this")
        );
    }

    #[test]
    fn different_text_different_key() {
        assert_ne!(
            derive_key("sentiment", "I love this"),
            derive_key("sentiment", "I love this!")
        );
    }

    #[test]
    fn different_model_different_key() {
        assert_ne!(derive_key("sentiment", "x"), derive_key("spam", "x"));
    }

    #[test]
    fn empty_inputs_are_allowed() {
        let key = derive_key("", "");
        // "::" plus a 32-char hex digest, regardless of input size.
        assert!(key.starts_with("::"));
        assert_eq!(key.len(), 2 + 32);
    }
}

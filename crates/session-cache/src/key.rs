//! # Key Encoder
//!
//! Builds fully-qualified store keys from a logical key, a session
//! identifier, and an optional namespace prefix.
//!
//! The combined prefix is computed once at construction: the trimmed
//! session identifier followed by `_` when non-empty, then the trimmed
//! namespace prefix followed by `_` when non-empty. Encoding is pure and
//! deterministic.
//!
//! There is no escaping or collision handling: a logical key that happens
//! to contain another key's encoded form aliases with it. This is an
//! accepted limitation of the keying scheme, not a bug to fix here.

/// Encodes logical keys into session/namespace-qualified store keys.
#[derive(Debug, Clone)]
pub struct KeyEncoder {
    session_id: String,
    prefix: String,
}

impl KeyEncoder {
    /// Create an encoder for the given session identifier and namespace
    /// prefix. Either (or both) may be empty; empty parts contribute
    /// nothing to the combined prefix.
    #[must_use]
    pub fn new(session_id: &str, namespace: &str) -> Self {
        let session_id = session_id.trim().to_string();

        let mut prefix = String::new();
        if !session_id.is_empty() {
            prefix.push_str(&session_id);
            prefix.push('_');
        }
        let namespace = namespace.trim();
        if !namespace.is_empty() {
            prefix.push_str(namespace);
            prefix.push('_');
        }

        Self { session_id, prefix }
    }

    /// Fully-qualified key for a logical key.
    #[must_use]
    pub fn encode(&self, logical: &str) -> String {
        format!("{}{logical}", self.prefix)
    }

    /// Trimmed session identifier; empty when the encoder is unscoped.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Glob pattern matching every key under this encoder's session,
    /// or `None` when no session identifier is configured.
    #[must_use]
    pub fn session_pattern(&self) -> Option<String> {
        if self.session_id.is_empty() {
            None
        } else {
            Some(format!("{}*", self.session_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::lorem::en::Word;

    #[test]
    fn test_session_and_namespace_prefix() {
        let enc = KeyEncoder::new("abc123", "cart");
        assert_eq!(enc.encode("foo"), "abc123_cart_foo");
    }

    #[test]
    fn test_session_only() {
        let enc = KeyEncoder::new("abc123", "");
        assert_eq!(enc.encode("foo"), "abc123_foo");
    }

    #[test]
    fn test_namespace_only() {
        let enc = KeyEncoder::new("", "cart");
        assert_eq!(enc.encode("foo"), "cart_foo");
    }

    #[test]
    fn test_unscoped_is_passthrough() {
        let enc = KeyEncoder::new("", "");
        assert_eq!(enc.encode("foo"), "foo");
        assert_eq!(enc.encode(""), "");
    }

    #[test]
    fn test_parts_are_trimmed() {
        let enc = KeyEncoder::new("  abc123 ", " cart\t");
        assert_eq!(enc.encode("foo"), "abc123_cart_foo");
        assert_eq!(enc.session_id(), "abc123");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let session: String = Word().fake();
        let namespace: String = Word().fake();

        let a = KeyEncoder::new(&session, &namespace);
        let b = KeyEncoder::new(&session, &namespace);
        assert_eq!(a.encode("k"), b.encode("k"));

        let c = KeyEncoder::new(&format!("{session}x"), &namespace);
        assert_ne!(a.encode("k"), c.encode("k"));
        let d = KeyEncoder::new(&session, &format!("{namespace}x"));
        assert_ne!(a.encode("k"), d.encode("k"));
    }

    #[test]
    fn test_session_pattern() {
        assert_eq!(
            KeyEncoder::new("abc123", "cart").session_pattern(),
            Some("abc123*".to_string())
        );
        assert_eq!(KeyEncoder::new("", "cart").session_pattern(), None);
        assert_eq!(KeyEncoder::new("   ", "").session_pattern(), None);
    }
}

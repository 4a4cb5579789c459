//! # Wire Codec
//!
//! JSON serialization of cache values. Values are stored as JSON text;
//! an absent value is stored as the empty string, and an empty or missing
//! payload reads back as "no value" rather than an empty-but-present
//! object.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Serialize a value to its stored text form. `None` encodes to the
/// empty string.
pub fn encode<T: Serialize>(value: Option<&T>) -> Result<String> {
    match value {
        Some(v) => Ok(serde_json::to_string(v)?),
        None => Ok(String::new()),
    }
}

/// Parse a raw payload read from the store. A missing or empty payload
/// is `Ok(None)`; a non-empty payload that fails to parse is a
/// serialization error for this call.
pub fn decode<T: DeserializeOwned>(raw: Option<String>) -> Result<Option<T>> {
    match raw {
        Some(json) if !json.is_empty() => {
            let parsed = serde_json::from_str(&json)?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Basket {
        item: String,
        quantity: u32,
    }

    #[test]
    fn test_round_trip() {
        let basket = Basket {
            item: "apples".to_string(),
            quantity: 3,
        };

        let wire = encode(Some(&basket)).unwrap();
        let back: Option<Basket> = decode(Some(wire)).unwrap();
        assert_eq!(back, Some(basket));
    }

    #[test]
    fn test_absent_value_encodes_empty() {
        let wire = encode::<Basket>(None).unwrap();
        assert_eq!(wire, "");
    }

    #[test]
    fn test_empty_payload_is_no_value() {
        let back: Option<Basket> = decode(Some(String::new())).unwrap();
        assert_eq!(back, None);

        let back: Option<Basket> = decode(None).unwrap();
        assert_eq!(back, None);
    }

    #[test]
    fn test_unparseable_payload_is_error() {
        let err = decode::<Basket>(Some("{not json".to_string())).unwrap_err();
        assert!(matches!(err, CacheError::Serialization(_)));
    }
}

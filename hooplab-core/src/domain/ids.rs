use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated document ids, matching the hosted-store convention.
const ID_LEN: usize = 20;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random alphanumeric document id. Generated client-side at creation time,
/// the same way the hosted SDK assigns ids before the write lands.
fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Build document id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildId(pub String);

impl BuildId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(random_id())
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User document id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(random_id())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// LFG post document id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(random_id())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_fixed_length() {
        assert_eq!(BuildId::generate().0.len(), ID_LEN);
        assert_eq!(UserId::generate().0.len(), ID_LEN);
        assert_eq!(PostId::generate().0.len(), ID_LEN);
    }

    #[test]
    fn generated_ids_are_alphanumeric() {
        let id = BuildId::generate();
        assert!(id.0.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn generated_ids_differ() {
        // Collision over 20 alphanumeric chars is not a realistic concern.
        assert_ne!(BuildId::generate(), BuildId::generate());
    }

    #[test]
    fn id_serialization_roundtrip() {
        let id = BuildId::new("abc123XYZ");
        let json = serde_json::to_string(&id).unwrap();
        let deser: BuildId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deser);
    }
}

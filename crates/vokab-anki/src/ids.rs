use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

const BASE91_TABLE: &[u8; 91] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&()*+,-./:;<=>?@[]^_`{|}~";

/// First 8 hex digits of md5(name) as an integer.
/// Same name, same id, so re-exports update the existing deck in Anki.
pub fn stable_id(name: &str) -> i64 {
    let digest = Md5::digest(name.as_bytes());
    leading_u32(&digest) as i64
}

pub fn deck_id(deck_name: &str) -> i64 {
    stable_id(&format!("{deck_name}deck"))
}

pub fn model_id(deck_name: &str) -> i64 {
    stable_id(&format!("{deck_name}model"))
}

/// Anki's base91 guid built from the first 8 bytes of sha256 over the fields
pub fn note_guid(fields: &[String]) -> String {
    let digest = Sha256::digest(fields.join("__").as_bytes());
    let mut value = digest[..8]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | *byte as u64);

    let mut reversed = Vec::new();
    while value > 0 {
        reversed.push(BASE91_TABLE[(value % 91) as usize] as char);
        value /= 91;
    }
    reversed.iter().rev().collect()
}

/// Duplicate-detection checksum of a note's sort field
pub fn field_checksum(field: &str) -> i64 {
    let digest = Sha1::digest(field.as_bytes());
    leading_u32(&digest) as i64
}

fn leading_u32(digest: &[u8]) -> u32 {
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(deck_id("Ice Planet"), deck_id("Ice Planet"));
        assert_eq!(model_id("Ice Planet"), model_id("Ice Planet"));
        assert_ne!(deck_id("Ice Planet"), model_id("Ice Planet"));
        assert_ne!(deck_id("Ice Planet"), deck_id("Fire Planet"));
    }

    #[test]
    fn test_stable_id_matches_md5_prefix() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(stable_id(""), 0xd41d8cd9);
        assert!(stable_id("anything") <= u32::MAX as i64);
    }

    #[test]
    fn test_field_checksum_matches_sha1_prefix() {
        // sha1("cat") = 9d989e8d27dc9e0ec3389fc855f142c3d40f0c50
        assert_eq!(field_checksum("cat"), 0x9d989e8d);
    }

    #[test]
    fn test_note_guid() {
        let fields = vec!["cat".to_string(), "кот".to_string(), "The cat sat.".to_string()];
        let guid = note_guid(&fields);
        assert!(!guid.is_empty());
        assert!(guid.len() <= 10);
        assert!(guid.bytes().all(|b| BASE91_TABLE.contains(&b)));
        assert_eq!(guid, note_guid(&fields));
        assert_ne!(guid, note_guid(&["dog".to_string()]));
    }
}

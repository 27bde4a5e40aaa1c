//! 记录标识符生成
//!
//! 12 字节布局：4 字节秒级时间戳（大端）+ 5 字节进程随机值 + 3 字节自增计数（大端），
//! 编码为 24 位小写十六进制字符串。

use once_cell::sync::Lazy;
use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::rng().random());

static COUNTER: Lazy<AtomicU32> =
    Lazy::new(|| AtomicU32::new(rand::rng().random_range(0..=COUNTER_MASK)));

/// 生成一个新的 12 字节标识符
pub fn generate_object_id_bytes() -> [u8; 12] {
    let timestamp = chrono::Utc::now().timestamp() as u32;
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst) & COUNTER_MASK;

    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());
    bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
    bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
    bytes
}

/// 生成一个新的 24 位十六进制标识符
pub fn generate_object_id() -> String {
    hex::encode(generate_object_id_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_object_id_format() {
        let id = generate_object_id();
        assert_eq!(id.len(), 24);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_object_id_hex_matches_bytes() {
        let id = generate_object_id();
        let bytes = hex::decode(&id).unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(hex::encode(&bytes), id);
    }

    #[test]
    fn test_object_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_object_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_object_id_embeds_timestamp() {
        let before = chrono::Utc::now().timestamp() as u32;
        let bytes = generate_object_id_bytes();
        let embedded = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert!(embedded >= before);
        assert!(embedded <= before + 5);
    }
}

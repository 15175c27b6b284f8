//! 通用工具函数

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fallback order id for orders that were never written to the
/// database (database persistence disabled in settings).
///
/// Format: `T{millis}-{rand}` — time-based so ids stay roughly sortable and
/// collision-free at single-store scale. The `T` prefix keeps it visually
/// distinct from database-assigned integer ids on receipts and in the ledger.
pub fn fallback_order_id() -> String {
    use rand::Rng;
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("T{}-{:04}", now_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_id_has_expected_shape() {
        let id = fallback_order_id();
        assert!(id.starts_with('T'));
        let (millis, suffix) = id[1..].split_once('-').expect("separator");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 4);
    }
}

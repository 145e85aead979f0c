use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Creation-time id: the current UTC millisecond as a decimal string.
///
/// Two calls inside the same millisecond would collide, so the value is
/// bumped past the last id handed out by this process.
pub fn next_id() -> String {
    next_after(Utc::now().timestamp_millis()).to_string()
}

fn next_after(now_ms: i64) -> i64 {
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now_ms.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rapid_ids_are_unique_and_increasing() {
        let ids: Vec<i64> = (0..500).map(|_| next_id().parse().unwrap()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn stale_clock_still_moves_forward() {
        let first = next_after(1);
        let second = next_after(1);
        assert!(second > first);
    }
}

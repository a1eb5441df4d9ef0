//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::num::NonZeroU32;
use std::time::Duration;

mod defaults {
    use super::*;

    #[test]
    fn new_uses_five_second_delay() {
        assert_eq!(RetryPolicy::new().delay, Duration::from_secs(5));
        assert_eq!(RetryPolicy::DEFAULT_DELAY, Duration::from_secs(5));
    }

    #[test]
    fn new_is_unbounded() {
        assert_eq!(RetryPolicy::new().max_attempts, None);
    }

    #[test]
    fn default_trait_matches_new() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::new());
    }
}

mod builder {
    use super::*;

    #[test]
    fn with_delay_sets_value() {
        let policy = RetryPolicy::new().with_delay(Duration::from_millis(250));
        assert_eq!(policy.delay, Duration::from_millis(250));
    }

    #[test]
    fn zero_delay_is_allowed() {
        let policy = RetryPolicy::new().with_delay(Duration::ZERO);
        assert_eq!(policy.delay, Duration::ZERO);
    }

    #[test]
    fn with_max_attempts_sets_and_clears_cap() {
        let capped = RetryPolicy::new().with_max_attempts(NonZeroU32::new(4));
        assert_eq!(capped.max_attempts.map(NonZeroU32::get), Some(4));

        let uncapped = capped.with_max_attempts(None);
        assert_eq!(uncapped.max_attempts, None);
    }
}

mod should_retry {
    use super::*;

    #[test]
    fn unbounded_always_retries() {
        let policy = RetryPolicy::new();

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(1_000));
        assert!(policy.should_retry(u32::MAX));
    }

    #[test]
    fn cap_stops_at_max_attempts() {
        let policy = RetryPolicy::new().with_max_attempts(NonZeroU32::new(3));

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
        assert!(!policy.should_retry(4));
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::new().with_max_attempts(NonZeroU32::new(1));

        assert!(!policy.should_retry(1));
    }
}

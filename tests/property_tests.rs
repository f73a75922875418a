//! Property-based tests for rust_thread_factory using proptest

use proptest::prelude::*;
use rust_thread_factory::prelude::*;
use rust_thread_factory::ThreadFactoryConfig;
use std::sync::{Arc, Barrier};

// ============================================================================
// Naming Tests
// ============================================================================

proptest! {
    /// Sequential calls produce prefix-thread-1..N with no gaps
    #[test]
    fn test_sequential_naming(
        pool_name in "[a-z][a-z0-9-]{0,15}",
        count in 1usize..200
    ) {
        let factory = ExecutorThreadFactory::new(pool_name.clone()).unwrap();

        for i in 1..=count {
            let thread = factory.new_thread(|| Ok(()));
            prop_assert_eq!(thread.name(), format!("{}-thread-{}", pool_name, i));
        }
        prop_assert_eq!(factory.threads_created(), count as u64);
    }

    /// Any non-empty pool name without NUL is accepted and shows up verbatim in the prefix
    #[test]
    fn test_any_non_empty_name_accepted(pool_name in "[^\\x00]{1,32}") {
        let factory = ExecutorThreadFactory::builder()
            .pool_name(pool_name.clone())
            .build()
            .unwrap();

        prop_assert_eq!(factory.name_prefix(), format!("{}-thread-", pool_name));
    }
}

proptest! {
    /// A NUL byte anywhere in the pool name is rejected before any thread exists
    #[test]
    fn test_nul_anywhere_rejected(head in "[a-z]{0,8}", tail in "[a-z]{0,8}") {
        let pool_name = format!("{}\0{}", head, tail);
        let err = ExecutorThreadFactory::new(pool_name.clone()).unwrap_err();
        prop_assert!(err.is_invalid_config());
        prop_assert!(ExecutorThreadFactory::builder().pool_name(pool_name).build().is_err());
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// C concurrent callers making M calls each see exactly 1..=C*M
    #[test]
    fn test_concurrent_naming(callers in 1usize..8, calls in 1usize..100) {
        let factory = Arc::new(ExecutorThreadFactory::new("race").unwrap());
        let barrier = Arc::new(Barrier::new(callers));

        let handles: Vec<_> = (0..callers)
            .map(|_| {
                let factory = Arc::clone(&factory);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    (0..calls)
                        .map(|_| {
                            let thread = (*factory).new_thread(|| Ok(()));
                            thread.name()["race-thread-".len()..].parse::<u64>().unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut numbers: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        numbers.sort_unstable();

        let expected: Vec<u64> = (1..=(callers * calls) as u64).collect();
        prop_assert_eq!(numbers, expected);
    }
}

// ============================================================================
// Priority Tests
// ============================================================================

proptest! {
    /// Every valid priority is copied onto every produced thread
    #[test]
    fn test_priority_copied(value in 1u8..=10, count in 1usize..20) {
        let factory = ThreadFactoryConfig::new("prio")
            .with_priority(value)
            .unwrap()
            .build()
            .unwrap();

        for _ in 0..count {
            let thread = factory.new_thread(|| Ok(()));
            prop_assert!(thread.is_daemon());
            prop_assert_eq!(thread.priority().value(), value);
        }
    }

    /// Values outside 1..=10 never make it into a factory
    #[test]
    fn test_invalid_priority_rejected(value in prop_oneof![Just(0u8), 11u8..=255]) {
        let err = ThreadPriority::new(value).unwrap_err();
        prop_assert!(err.is_invalid_config());
        prop_assert!(ThreadFactoryConfig::new("prio").with_priority(value).is_err());
    }
}

//! Prefetcher tests.

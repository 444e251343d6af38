//! Cache level tests.


/// LRU rank updates in isolation.
pub mod lru;

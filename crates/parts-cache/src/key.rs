//! Cache key helpers.

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = parts_cache::cache_key!("validate", "Bentley", "Arnage", "SCBZS");
/// assert_eq!(key, "validate:Bentley:Arnage:SCBZS");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_cache_key_mixes_types() {
        let key = cache_key!("chassis-list", "Rolls-Royce", 50);
        assert_eq!(key, "chassis-list:Rolls-Royce:50");
    }
}

//! Tests for the log subscriber setup

#[cfg(test)]
mod tests {
    use brickify::io::logging::{default_directive, env_filter, init};

    // Tests quiet runs only show warnings
    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "brickify=info");
        assert_eq!(default_directive(true), "brickify=warn");
    }

    // Tests the filter builds and repeated installs are harmless
    #[test]
    fn test_init_twice() {
        let filter = env_filter(true);
        assert!(!filter.to_string().is_empty());

        init(true);
        init(false);
    }
}

//! Configuration access port trait.
//!
//! Getters never fail: a missing or unparsable value yields the default.
//! Strict checks live in `domain::config_validation`.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}

/// A port with no values; every getter returns its default.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyConfig;

impl ConfigPort for EmptyConfig {
    fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
        None
    }

    fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
        default
    }

    fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
        default
    }

    fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
        default
    }
}

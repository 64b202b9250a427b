//! Configuration access port trait.

/// Read-only sectioned key/value configuration. Values are raw strings;
/// callers parse and validate them.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}

//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Accepts true/yes/1/on and false/no/0/off; anything else yields `default`.
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}

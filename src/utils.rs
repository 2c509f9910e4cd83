//! Common small functions used throughout the crate
//!
//! These are left public for the convenience of the user.

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Capilalises the first letter in a string
///
/// ```rust
/// # use inpdeck::utils::capitalise;
/// assert_eq!(capitalise("neutron"), "Neutron".to_string());
/// ```
pub fn capitalise(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
        None => String::new(),
    }
}

/// Comparators (RFC 4790): named algorithms for equality, substring and glob matching.
use std::borrow::Cow;

use crate::sieve::error::PatternError;
use crate::sieve::glob::glob_match;
use crate::sieve::registry::Constructor;

pub const OCTET: &str = "i;octet";
pub const ASCII_CASEMAP: &str = "i;ascii-casemap";
pub const ASCII_NUMERIC: &str = "i;ascii-numeric";

/// Sentinel every non-digit is mapped to by `i;ascii-numeric`.
const NON_DIGIT: u8 = 0xff;

pub trait Comparator: Send + Sync {
    fn equals(&self, a: &str, b: &str) -> bool;

    fn contains(&self, container: &str, content: &str) -> bool;

    fn matches(&self, value: &str, glob: &str) -> Result<bool, PatternError>;
}

pub struct Octet;

impl Comparator for Octet {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.as_bytes() == b.as_bytes()
    }

    fn contains(&self, container: &str, content: &str) -> bool {
        contains_bytes(container.as_bytes(), content.as_bytes())
    }

    fn matches(&self, value: &str, glob: &str) -> Result<bool, PatternError> {
        Ok(glob_match(value.as_bytes(), glob.as_bytes()))
    }
}

/// Case-insensitive over A-Z only; other octets compare literally.
pub struct AsciiCasemap;

impl Comparator for AsciiCasemap {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    fn contains(&self, container: &str, content: &str) -> bool {
        contains_bytes(&fold(container), &fold(content))
    }

    fn matches(&self, value: &str, glob: &str) -> Result<bool, PatternError> {
        Ok(glob_match(&fold(value), &fold(glob)))
    }
}

/// Compares digit positions only: every non-digit octet becomes the same sentinel.
///
/// `matches` applies the same substitution to the glob, so `*` and `?` lose
/// their meaning there. Kept for compatibility; do not build on it.
pub struct AsciiNumeric;

impl Comparator for AsciiNumeric {
    fn equals(&self, a: &str, b: &str) -> bool {
        numeric_key(a) == numeric_key(b)
    }

    fn contains(&self, container: &str, content: &str) -> bool {
        contains_bytes(&numeric_key(container), &numeric_key(content))
    }

    fn matches(&self, value: &str, glob: &str) -> Result<bool, PatternError> {
        Ok(glob_match(&numeric_key(value), &numeric_key(glob)))
    }
}

fn fold(s: &str) -> Cow<'_, [u8]> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.bytes().map(|b| b.to_ascii_lowercase()).collect())
    } else {
        Cow::Borrowed(s.as_bytes())
    }
}

/// One octet per character: the digit itself, or the sentinel.
fn numeric_key(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii_digit() { c as u8 } else { NON_DIGIT })
        .collect()
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

/// The built-in name → constructor mapping.
pub fn builtins() -> Vec<(&'static str, Constructor<dyn Comparator>)> {
    vec![
        (OCTET, new_octet as Constructor<dyn Comparator>),
        (ASCII_CASEMAP, new_ascii_casemap as Constructor<dyn Comparator>),
        (ASCII_NUMERIC, new_ascii_numeric as Constructor<dyn Comparator>),
    ]
}

fn new_octet() -> Result<Box<dyn Comparator>, String> {
    Ok(Box::new(Octet))
}

fn new_ascii_casemap() -> Result<Box<dyn Comparator>, String> {
    Ok(Box::new(AsciiCasemap))
}

fn new_ascii_numeric() -> Result<Box<dyn Comparator>, String> {
    Ok(Box::new(AsciiNumeric))
}

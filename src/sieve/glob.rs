/// Returns true if `text` matches the whole of `pattern`.
///
/// Only two wildcards exist: `*` matches any run of octets (including none)
/// and `?` matches exactly one octet. Everything else is literal.
pub fn glob_match(text: &[u8], pattern: &[u8]) -> bool {
    if !has_wildcard(pattern) {
        return pattern == text;
    }

    let (mut t, mut p) = (0usize, 0usize);
    // Position of the last `*` seen, and the text offset it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(b'*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(b'?') => {
                t += 1;
                p += 1;
            }
            Some(&c) if c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match star {
                // Let the last star swallow one more octet and retry from there.
                Some((star_p, star_t)) => {
                    star = Some((star_p, star_t + 1));
                    p = star_p + 1;
                    t = star_t + 1;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}

fn has_wildcard(pattern: &[u8]) -> bool {
    pattern.iter().any(|&c| c == b'*' || c == b'?')
}

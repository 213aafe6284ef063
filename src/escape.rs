pub const META_CHARS: [char; 7] = ['*', '?', '[', ']', '{', '}', '\\'];

#[inline]
pub fn is_meta_char(ch: char) -> bool {
    matches!(ch, '*' | '?' | '[' | ']' | '{' | '}' | '\\')
}

/// Escapes every glob meta-character in `text` so the result matches `text` literally.
pub fn escape_meta(text: &str) -> String {
    let extra = text.chars().filter(|&ch| is_meta_char(ch)).count();
    if extra == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + extra);
    for ch in text.chars() {
        if is_meta_char(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

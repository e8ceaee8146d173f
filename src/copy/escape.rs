//! XML escaping of leaf text copied out of a template host.

use std::borrow::Cow;

/// Escapes the five XML special characters.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Reverses [`escape_xml`]. Unknown entities and stray `&` are kept as they are.
pub fn unescape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        rest = &rest[start..];
        let entity = ENTITIES.iter().find(|(name, _)| rest.starts_with(name));
        match entity {
            Some((name, c)) => {
                result.push(*c);
                rest = &rest[name.len()..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);
    Cow::Owned(result)
}

const ENTITIES: [(&str, char); 5] = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"'), ("&apos;", '\'')];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes() {
        assert_eq!(escape_xml("a < b && c"), "a &lt; b &amp;&amp; c");
        assert_eq!(escape_xml("\"x\" + 'y'"), "&quot;x&quot; + &apos;y&apos;");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn unescapes() {
        assert_eq!(unescape_xml("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
        assert_eq!(unescape_xml("& &unknown; &"), "& &unknown; &");
    }
}

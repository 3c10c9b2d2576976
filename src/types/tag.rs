//! Struct tag lookup
//!
//! Go struct tags are space-separated `key:"value"` pairs. Values are Go
//! quoted strings; lookups return the unquoted value.

/// A parsed struct tag body (without the surrounding literal quotes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTag(String);

impl StructTag {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Build a tag from its Go string literal, raw (`` `...` ``) or interpreted (`"..."`)
    pub fn from_literal(literal: &str) -> Self {
        if let Some(raw) = literal
            .strip_prefix('`')
            .and_then(|s| s.strip_suffix('`'))
        {
            return Self(raw.to_string());
        }
        if let Some(quoted) = literal
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
        {
            return Self(unescape(quoted));
        }
        Self(literal.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for `key`, or `None` when the key is absent.
    ///
    /// Pairs are read left to right; the scan stops at the first malformed
    /// pair, so keys after it are never found.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut rest = self.0.as_bytes();
        loop {
            while rest.first() == Some(&b' ') {
                rest = &rest[1..];
            }
            if rest.is_empty() {
                return None;
            }

            let name_len = rest
                .iter()
                .position(|&b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
                .unwrap_or(rest.len());
            if name_len == 0 || rest.get(name_len..name_len + 2) != Some(b":\"".as_slice()) {
                return None;
            }
            let name = &rest[..name_len];
            rest = &rest[name_len + 1..];

            // closing quote, skipping escaped characters
            let mut end = 1;
            while end < rest.len() && rest[end] != b'"' {
                if rest[end] == b'\\' {
                    end += 1;
                }
                end += 1;
            }
            if end >= rest.len() {
                return None;
            }
            let value = &rest[1..end];
            rest = &rest[end + 1..];

            if name == key.as_bytes() {
                return Some(unescape(&String::from_utf8_lossy(value)));
            }
        }
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_present_and_absent_keys() {
        let tag = StructTag::new(r#"json:"name" dynamodbav:"username""#);
        assert_eq!(tag.get("json").as_deref(), Some("name"));
        assert_eq!(tag.get("dynamodbav").as_deref(), Some("username"));
        assert_eq!(tag.get("yaml"), None);
    }

    #[test]
    fn test_get_keeps_options() {
        let tag = StructTag::new(r#"json:"age,omitempty,string""#);
        assert_eq!(tag.get("json").as_deref(), Some("age,omitempty,string"));
    }

    #[test]
    fn test_key_must_match_exactly() {
        let tag = StructTag::new(r#"xjson:"wrong" json:"right""#);
        assert_eq!(tag.get("json").as_deref(), Some("right"));
    }

    #[test]
    fn test_from_raw_literal() {
        let tag = StructTag::from_literal(r#"`json:"id"`"#);
        assert_eq!(tag.as_str(), r#"json:"id""#);
        assert_eq!(tag.get("json").as_deref(), Some("id"));
    }

    #[test]
    fn test_from_interpreted_literal() {
        let tag = StructTag::from_literal(r#""json:\"id\" dynamodbav:\"pk\"""#);
        assert_eq!(tag.get("json").as_deref(), Some("id"));
        assert_eq!(tag.get("dynamodbav").as_deref(), Some("pk"));
    }

    #[test]
    fn test_escaped_quote_in_value() {
        let tag = StructTag::new(r#"doc:"say \"hi\"" json:"x""#);
        assert_eq!(tag.get("doc").as_deref(), Some(r#"say "hi""#));
        assert_eq!(tag.get("json").as_deref(), Some("x"));
    }

    #[test]
    fn test_lookup_stops_at_malformed_pair() {
        let tag = StructTag::new(r#"json:"a" bad dynamodbav:"x""#);
        assert_eq!(tag.get("json").as_deref(), Some("a"));
        assert_eq!(tag.get("dynamodbav"), None);

        let unterminated = StructTag::new(r#"json:"a dynamodbav:"x""#);
        assert_eq!(unterminated.get("dynamodbav"), None);
        assert_eq!(StructTag::new(r#"json: "a""#).get("json"), None);
    }

    #[test]
    fn test_empty_tag() {
        assert_eq!(StructTag::new("").get("json"), None);
    }
}

//! Identifier case conversion and escaping for generated Rust code.

/// Words that cannot be raw identifiers and get a trailing underscore instead.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Strict and reserved Rust keywords, escaped with `r#`.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Converts a name to snake_case.
///
/// Handles camelCase, PascalCase and acronym runs (`getHTTPCode` becomes
/// `get_http_code`). Existing underscores are kept.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (prev.is_lowercase() || prev.is_ascii_digit() || next_lower) {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Converts a name to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts a name to SCREAMING_SNAKE_CASE.
#[must_use]
pub fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_ascii_uppercase()
}

/// Escapes a name that collides with a Rust keyword.
#[must_use]
pub fn escape_ident(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Constant identifier: names already in upper case are kept, others
/// become SCREAMING_SNAKE_CASE.
#[must_use]
pub fn const_ident(name: &str) -> String {
    if name
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        escape_ident(name)
    } else {
        escape_ident(&to_upper_snake_case(name))
    }
}

/// Field, function and module identifier: snake_case, keyword-escaped.
#[must_use]
pub fn field_ident(name: &str) -> String {
    escape_ident(&to_snake_case(name))
}

/// Methods every generated client defines for itself.
pub const CLIENT_OWN_METHODS: &[&str] = &["new", "channel_mut", "into_channel"];

/// Name of the blocking client method for a function: the field identifier,
/// with a trailing underscore when it would shadow one of
/// [`CLIENT_OWN_METHODS`].
#[must_use]
pub fn client_method_ident(name: &str) -> String {
    let ident = field_ident(name);
    if CLIENT_OWN_METHODS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Identifier made of `prefix`, an underscore and the snake_case name, such
/// as `send_get_struct`. The prefix keeps it clear of keywords.
#[must_use]
pub fn prefixed_ident(prefix: &str, name: &str) -> String {
    format!("{prefix}_{}", to_snake_case(name))
}

/// Type identifier: PascalCase, keyword-escaped.
#[must_use]
pub fn type_ident(name: &str) -> String {
    escape_ident(&to_pascal_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("getStruct"), "get_struct");
        assert_eq!(to_snake_case("Calculator"), "calculator");
        assert_eq!(to_snake_case("SharedService"), "shared_service");
        assert_eq!(to_snake_case("getHTTPCode"), "get_http_code");
        assert_eq!(to_snake_case("num1"), "num1");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("Snake_Case"), "snake_case");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("shared_struct"), "SharedStruct");
        assert_eq!(to_pascal_case("Work"), "Work");
        assert_eq!(to_pascal_case("calculate"), "Calculate");
    }

    #[test]
    fn test_to_upper_snake_case() {
        assert_eq!(to_upper_snake_case("mapConstant"), "MAP_CONSTANT");
        assert_eq!(const_ident("INT32CONSTANT"), "INT32CONSTANT");
        assert_eq!(const_ident("mapConstant"), "MAP_CONSTANT");
        assert_eq!(const_ident("RED"), "RED");
    }

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("type"), "r#type");
        assert_eq!(escape_ident("self"), "self_");
        assert_eq!(escape_ident("value"), "value");
        assert_eq!(field_ident("Type"), "r#type");
        assert_eq!(type_ident("self"), "Self_");
    }

    #[test]
    fn test_client_method_ident() {
        assert_eq!(client_method_ident("add"), "add");
        assert_eq!(client_method_ident("new"), "new_");
        assert_eq!(client_method_ident("intoChannel"), "into_channel_");
        assert_eq!(client_method_ident("channel_mut"), "channel_mut_");
        assert_eq!(client_method_ident("type"), "r#type");
        assert_eq!(prefixed_ident("send", "type"), "send_type");
        assert_eq!(prefixed_ident("recv", "getStruct"), "recv_get_struct");
    }
}

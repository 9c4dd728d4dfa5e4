/// Words that can't be used as bare Swift identifiers.
const SWIFT_RESERVED: &[&str] = &[
    "Any", "Protocol", "Self", "Type", "_", "as", "associatedtype", "await", "break", "case",
    "catch", "class", "continue", "default", "defer", "deinit", "do", "else", "enum",
    "extension", "fallthrough", "false", "fileprivate", "for", "func", "guard", "if", "import",
    "in", "init", "inout", "internal", "is", "let", "nil", "open", "operator", "private",
    "precedencegroup", "protocol", "public", "repeat", "rethrows", "return", "self", "static",
    "struct", "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias",
    "var", "where", "while",
];

/// Case names that clash with members every `String` raw-value enum gets.
/// Escaping doesn't help here, so these get a trailing `_` instead.
const ENUM_MEMBERS: &[&str] = &["RawValue"];

/// Name used when an asset name has no identifier characters at all.
const UNNAMED: &str = "Unnamed";

pub fn is_reserved(word: &str) -> bool {
    SWIFT_RESERVED.contains(&word)
}

/// True when `name` can be used verbatim as a Swift type or case name.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric()) && !is_reserved(name)
}

/// Convert an asset name into a Swift identifier.
///
/// The name is split on every character that can't appear in an
/// identifier, each part gets its first letter upper-cased, and the parts
/// are joined back together: `green-apple` becomes `GreenApple` and
/// `Icons/close` becomes `IconsClose`. A leading digit gets a `_` prefix,
/// reserved words are escaped with backticks and `RawValue` becomes
/// `RawValue_`.
pub fn swift_identifier(name: &str) -> String {
    let mut ident = String::with_capacity(name.len());
    for part in name.split(|c: char| !(c == '_' || c.is_alphanumeric())) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            ident.extend(first.to_uppercase());
            ident.push_str(chars.as_str());
        }
    }

    if ident.is_empty() {
        return UNNAMED.to_string();
    }
    if ident.starts_with(|c: char| c.is_numeric()) {
        ident.insert(0, '_');
    }
    if ENUM_MEMBERS.contains(&ident.as_str()) {
        ident.push('_');
        return ident;
    }
    if is_reserved(&ident) {
        return format!("`{ident}`");
    }
    ident
}

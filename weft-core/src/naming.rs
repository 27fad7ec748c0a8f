//! Naming law.
//!
//! Every generated artifact is located by downstream consumers purely through
//! its derived name, so all name derivation lives here and nowhere else.

/// Conventional marker prefixing private storage names.
pub const PRIVATE_PREFIX: char = '_';

/// Namespace separators recognised in type references.
const NAMESPACE_SEPARATORS: [&str; 2] = ["::", "."];

/// Derives the public name of a storage member.
///
/// Leading private-prefix markers are dropped and the next character is
/// upper-cased. Without a marker the first character is upper-cased.
/// The result is idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// # Arguments
/// * `storage` - Storage (field) name as declared
///
/// # Returns
/// The public name, empty when nothing but markers was given.
#[must_use]
pub fn normalize_public_name(storage: &str) -> String {
    let trimmed = storage.trim_start_matches(PRIVATE_PREFIX);
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            let mut result = String::with_capacity(trimmed.len());
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

/// Returns true if `s` is a valid host-language identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Extracts the theme-variant name from a type reference.
///
/// The variant name is the trailing segment after the last namespace
/// separator. Anything that is not a plain identifier there (generic
/// parameter lists, call syntax, a dangling separator) yields an empty
/// string, which callers must reject.
#[must_use]
pub fn extract_variant_name(type_ref: &str) -> String {
    let trimmed = type_ref.trim();
    let mut start = 0;
    for separator in NAMESPACE_SEPARATORS {
        if let Some(pos) = trimmed.rfind(separator) {
            start = start.max(pos + separator.len());
        }
    }
    let segment = &trimmed[start..];
    if is_identifier(segment) {
        segment.to_string()
    } else {
        String::new()
    }
}

/// Joins a namespace and a simple name into a qualified name.
#[must_use]
pub fn qualified_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// Name of the hovered companion of `name`, optionally scoped to a theme variant.
#[must_use]
pub fn hovered_name(variant: Option<&str>, name: &str) -> String {
    format!("{}Hovered{name}", variant.unwrap_or_default())
}

/// Name of the no-hovered companion of `name`, optionally scoped to a theme variant.
#[must_use]
pub fn no_hovered_name(variant: Option<&str>, name: &str) -> String {
    format!("{}NoHovered{name}", variant.unwrap_or_default())
}

/// Name of the plain theme companion of `name`.
#[must_use]
pub fn themed_name(variant: &str, name: &str) -> String {
    format!("{variant}{name}")
}

/// Name of the bindable-property descriptor backing `name`.
#[must_use]
pub fn descriptor_name(name: &str) -> String {
    format!("{name}Property")
}

/// Name of the interception interface generated for a proxy target.
#[must_use]
pub fn aspect_interface_name(declaration: &str) -> String {
    format!("I{declaration}Aspect")
}

/// Name of the model-reader conversion method producing `target`.
#[must_use]
pub fn reader_method_name(target: &str) -> String {
    format!("To{target}")
}

/// Name of the private backing field of a generated companion property.
#[must_use]
pub fn backing_field_name(public: &str) -> String {
    let mut chars = public.chars();
    match chars.next() {
        Some(first) => {
            let mut result = String::with_capacity(public.len() + 1);
            result.push(PRIVATE_PREFIX);
            result.extend(first.to_lowercase());
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

/// File hint of the compilation unit emitted for a declaration.
#[must_use]
pub fn hint_name(namespace: &str, name: &str) -> String {
    format!("{}.g.cs", qualified_name(namespace, name))
}

use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Codes are only used for display here. Translation services accept codes
/// that ISO 639 does not know (`zh-CN`, `pt-BR`, ...), so nothing is ever
/// rejected.
/// Look up the English name of an ISO 639-1 or ISO 639-3 code
pub fn get_language_name(code: &str) -> Option<String> {
    let normalized = code.trim().to_lowercase();
    // Regional variants such as `pt-BR` resolve through their primary subtag
    let primary = normalized.split(['-', '_']).next().unwrap_or_default();

    let language = match primary.len() {
        2 => Language::from_639_1(primary),
        3 => Language::from_639_3(primary),
        _ => None,
    }?;

    Some(language.to_name().to_string())
}

/// Name for log output: `English (en)`, or the bare code when unknown
pub fn describe_language(code: &str) -> String {
    match get_language_name(code) {
        Some(name) => format!("{} ({})", name, code),
        None => code.to_string(),
    }
}

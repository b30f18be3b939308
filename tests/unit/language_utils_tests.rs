/*!
 * Tests for language utilities
 */

use subtrans::language_utils::{describe_language, get_language_name};

/// Test name lookup for two- and three-letter codes
#[test]
fn test_get_language_name_withKnownCodes_shouldReturnName() {
    assert_eq!(get_language_name("en").as_deref(), Some("English"));
    assert_eq!(get_language_name("FR").as_deref(), Some("French"));
    assert_eq!(get_language_name("deu").as_deref(), Some("German"));
    assert_eq!(get_language_name("pt-BR").as_deref(), Some("Portuguese"));
}

/// Test that unknown codes are not an error
#[test]
fn test_get_language_name_withUnknownCode_shouldReturnNone() {
    assert!(get_language_name("xx").is_none());
    assert!(get_language_name("").is_none());
    assert_eq!(describe_language("xx"), "xx");
    assert_eq!(describe_language("en"), "English (en)");
}

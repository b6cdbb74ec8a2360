//! ISO 639-1 language display names.
//!
//! Only used for human-readable message formatting; unknown codes fall back
//! to the raw code at the call site.

/// Alpha-2 code to English display name.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nb", "Norwegian Bokmal"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Look up the display name for an alpha-2 language code.
pub fn display_name(alpha2: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(code, _)| *code == alpha2)
        .map(|(_, name)| *name)
}

/// Display name, falling back to the code itself when unknown.
pub fn display_name_or_code(alpha2: &str) -> String {
    display_name(alpha2)
        .map(|n| n.to_string())
        .unwrap_or_else(|| alpha2.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(display_name("en"), Some("English"));
        assert_eq!(display_name("fr"), Some("French"));
        assert_eq!(display_name("zh"), Some("Chinese"));
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(display_name("xx"), None);
        assert_eq!(display_name_or_code("xx"), "xx");
        assert_eq!(display_name_or_code("en"), "English");
    }
}

//! Catalog of supported native languages.

use serde::Serialize;

/// A native language the learner can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Stable identifier, used as the history dedup key.
    pub code: &'static str,
    /// Endonym followed by the Norwegian name in parentheses.
    pub label: &'static str,
    pub flag: &'static str,
}

impl Language {
    /// The endonym alone, e.g. `"Polski"` for `"Polski (Polsk)"`.
    ///
    /// This is what the model sees as the target language and what history
    /// stores as the language label.
    pub fn display_name(&self) -> &'static str {
        self.label.split(" (").next().unwrap_or(self.label)
    }
}

pub const LANGUAGES: &[Language] = &[
    Language {
        code: "arabic",
        label: "العربية (Arabisk)",
        flag: "🇸🇦",
    },
    Language {
        code: "somali",
        label: "Soomaali (Somalisk)",
        flag: "🇸🇴",
    },
    Language {
        code: "polish",
        label: "Polski (Polsk)",
        flag: "🇵🇱",
    },
    Language {
        code: "tigrinya",
        label: "ትግርኛ (Tigrinja)",
        flag: "🇪🇷",
    },
    Language {
        code: "english",
        label: "English (Engelsk)",
        flag: "🇬🇧",
    },
    Language {
        code: "ukrainian",
        label: "Українська (Ukrainsk)",
        flag: "🇺🇦",
    },
    Language {
        code: "spanish",
        label: "Español (Spansk)",
        flag: "🇪🇸",
    },
    Language {
        code: "vietnamese",
        label: "Tiếng Việt (Vietnamesisk)",
        flag: "🇻🇳",
    },
];

/// Look up a catalog entry by code (case-insensitive).
pub fn find(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Resolve a code to `(code, display name)`.
///
/// Codes outside the catalog are passed through and double as their own
/// display name, so free-form languages still work.
pub fn resolve(code: &str) -> (String, String) {
    match find(code) {
        Some(lang) => (lang.code.to_string(), lang.display_name().to_string()),
        None => {
            let code = code.trim().to_string();
            (code.clone(), code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_codes_are_unique() {
        let mut codes: Vec<_> = LANGUAGES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn test_display_name_drops_norwegian_name() {
        assert_eq!(find("english").unwrap().display_name(), "English");
        assert_eq!(find("arabic").unwrap().display_name(), "العربية");
        assert_eq!(find("vietnamese").unwrap().display_name(), "Tiếng Việt");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Polish").map(|l| l.code), Some("polish"));
        assert!(find("klingon").is_none());
    }

    #[test]
    fn test_resolve_unknown_code_passes_through() {
        assert_eq!(
            resolve("swahili"),
            ("swahili".to_string(), "swahili".to_string())
        );
        assert_eq!(
            resolve("somali"),
            ("somali".to_string(), "Soomaali".to_string())
        );
    }
}

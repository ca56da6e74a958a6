use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Bn,
}

impl Language {
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::Bn]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Bn => "bn",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "bn" => Some(Self::Bn),
            _ => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::En => "language.option.en",
            Self::Bn => "language.option.bn",
        }
    }
}

/// Looks up a UI string, falling back to English and finally to the key
/// itself so a missing translation never panics the UI.
pub fn tr(language: Language, key: &'static str) -> &'static str {
    catalog(language)
        .get(key)
        .map(String::as_str)
        .or_else(|| catalog(Language::En).get(key).map(String::as_str))
        .unwrap_or(key)
}

/// Single-placeholder variant for messages like "Delete {count} rows?".
pub fn tr_with(language: Language, key: &'static str, placeholder: &str, value: &str) -> String {
    tr(language, key).replace(placeholder, value)
}

fn catalog(language: Language) -> &'static BTreeMap<String, String> {
    match language {
        Language::En => EN_CATALOG.get_or_init(|| parse_catalog(Language::En)),
        Language::Bn => BN_CATALOG.get_or_init(|| parse_catalog(Language::Bn)),
    }
}

fn parse_catalog(language: Language) -> BTreeMap<String, String> {
    let source = match language {
        Language::En => include_str!("../../assets/i18n/en.json"),
        Language::Bn => include_str!("../../assets/i18n/bn.json"),
    };

    serde_json::from_str(source).unwrap_or_else(|err| {
        panic!(
            "failed to parse i18n catalog for language '{}': {err}",
            language.code()
        )
    })
}

static EN_CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();
static BN_CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();

use serde::{Deserialize, Serialize};

/// Display language. Only affects generated display names, never stored shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::En,
        }
    }

    /// Unit suffix used when naming a food portion, e.g. "Oats (50grams)".
    pub fn grams_label(&self) -> &'static str {
        match self {
            Language::En => "grams",
            Language::Ru => "грамм",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_as_locale_tag() {
        assert_eq!(serde_json::to_string(&Language::Ru).unwrap(), "\"ru\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn toggle_flips_between_the_two() {
        assert_eq!(Language::En.toggled(), Language::Ru);
        assert_eq!(Language::En.toggled().toggled(), Language::En);
    }
}

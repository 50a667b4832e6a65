//! Prompt text sent to the generator.

use crate::i18n::{Language, PluralFamily};

pub const DEFAULT_DOMAIN: &str = "beekeeping and monitoring web app";

/// Everything needed to phrase one generation request.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    pub domain: &'a str,
    pub source_text: &'a str,
    pub context: Option<&'a str>,
    pub target: Language,
    /// Plural category to produce; `None` for a singular value
    pub category: Option<&'a str>,
    /// Known translation in the aid language
    pub aid: Option<(Language, &'a str)>,
}

impl<'a> Prompt<'a> {
    pub fn singular(domain: &'a str, source_text: &'a str, target: Language) -> Self {
        Self {
            domain,
            source_text,
            context: None,
            target,
            category: None,
            aid: None,
        }
    }

    pub fn with_context(mut self, context: Option<&'a str>) -> Self {
        self.context = context.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    /// Quote a known translation, unless it is for the target itself.
    pub fn with_aid(mut self, aid: Option<(Language, &'a str)>) -> Self {
        self.aid = aid.filter(|(language, _)| *language != self.target);
        self
    }

    pub fn render(&self) -> String {
        let mut text = format!(
            "You are an expert translator. You need to translate from English. Used in {}.",
            self.domain
        );

        if let Some(context) = self.context {
            text.push_str(&format!(" The translation context is \"{}\".", context));
        }

        match self.category {
            Some(category) => {
                text.push_str(&format!(
                    " Translate the word \"{}\" to {} in the {} plural form.",
                    self.source_text,
                    self.target.name(),
                    category
                ));
                if let Some(hint) = category_hint(self.target.plural_family(), category) {
                    text.push(' ');
                    text.push_str(hint);
                }
                self.push_aid(&mut text);
                text.push_str(" Respond with only the translated word, nothing else.");
            }
            None => {
                text.push_str(&format!(" Translate to {}.", self.target.name()));
                self.push_aid(&mut text);
                text.push_str(&format!(
                    " Respond with only the translated text in the target language \
                     (no extra notes or other languages) of the following phrase: {}",
                    self.source_text
                ));
            }
        }

        text
    }

    fn push_aid(&self, text: &mut String) {
        if let Some((language, known)) = self.aid {
            text.push_str(&format!(
                " For reference, the {} translation is \"{}\".",
                language.name(),
                known
            ));
        }
    }
}

/// Which grammatical form a category stands for, phrased by family.
fn category_hint(family: PluralFamily, category: &str) -> Option<&'static str> {
    let hint = match (family, category) {
        (PluralFamily::Slavic, "one") => {
            "Use the singular/nominative form (used with counts like 1, 21, 31...)."
        }
        (PluralFamily::Slavic, "few") => {
            "Use the genitive singular form (used with counts like 2, 3, 4, 22, 23, 24...)."
        }
        (PluralFamily::Slavic, "many") => {
            "Use the genitive plural form (used with counts like 5, 6, 7...20, 25, 26...)."
        }
        (PluralFamily::Slavic, "other") => {
            "Use the form used with fractional counts (like 1.5, 2.5)."
        }
        (PluralFamily::Arabic, "zero") => "Use the form used with a count of 0.",
        (PluralFamily::Arabic, "one") => "Use the singular form (used with count = 1).",
        (PluralFamily::Arabic, "two") => "Use the dual form (used with count = 2).",
        (PluralFamily::Arabic, "few") => {
            "Use the plural form used with counts like 3 to 10, 103, 104..."
        }
        (PluralFamily::Arabic, "many") => {
            "Use the form used with counts like 11 to 99, 111, 112..."
        }
        (PluralFamily::Arabic, "other") => "Use the form used with counts like 100, 101, 102...",
        (PluralFamily::Romance, "one") => "Use the singular form (used with count = 1).",
        (PluralFamily::Romance, "many") => {
            "Use the form used with large round numbers (like 1000000)."
        }
        (PluralFamily::Romance, "other") => "Use the plural form (used with count != 1).",
        (PluralFamily::Simple, "one") => "Use the singular form (used with count = 1).",
        (PluralFamily::Simple, "other") => "Use the plural form (used with count != 1).",
        _ => return None,
    };
    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(code: &str) -> Language {
        Language::from_code(code).expect("registered language")
    }

    #[test]
    fn test_singular_prompt_frames_domain_and_target() {
        let prompt = Prompt::singular(DEFAULT_DOMAIN, "Save", language("de")).render();

        assert!(prompt.starts_with("You are an expert translator."));
        assert!(prompt.contains("beekeeping and monitoring web app"));
        assert!(prompt.contains("Translate to German."));
        assert!(prompt.ends_with("of the following phrase: Save"));
        assert!(prompt.contains("Respond with only the translated text"));
        assert!(!prompt.contains("context"));
    }

    #[test]
    fn test_context_is_quoted() {
        let prompt = Prompt::singular(DEFAULT_DOMAIN, "Frame", language("fr"))
            .with_context(Some("hive frame, not picture frame"))
            .render();

        assert!(prompt.contains("The translation context is \"hive frame, not picture frame\"."));
    }

    #[test]
    fn test_blank_context_is_skipped() {
        let prompt = Prompt::singular(DEFAULT_DOMAIN, "Frame", language("fr"))
            .with_context(Some("  "))
            .render();

        assert!(!prompt.contains("context"));
    }

    #[test]
    fn test_custom_domain() {
        let prompt = Prompt::singular("farm inventory tool", "Save", language("es")).render();
        assert!(prompt.contains("Used in farm inventory tool."));
    }

    #[test]
    fn test_aid_clause_names_reference_language() {
        let prompt = Prompt::singular(DEFAULT_DOMAIN, "Hive", language("pl"))
            .with_aid(Some((Language::RUSSIAN, "Улей")))
            .render();

        assert!(prompt.contains("For reference, the Russian translation is \"Улей\"."));
    }

    #[test]
    fn test_aid_for_target_itself_is_dropped() {
        let prompt = Prompt::singular(DEFAULT_DOMAIN, "Hive", Language::RUSSIAN)
            .with_aid(Some((Language::RUSSIAN, "Улей")))
            .render();

        assert!(!prompt.contains("For reference"));
    }

    #[test]
    fn test_slavic_plural_hints() {
        let few = Prompt::singular(DEFAULT_DOMAIN, "hive", language("pl"))
            .with_category("few")
            .render();

        assert!(few.contains("Translate the word \"hive\" to Polish in the few plural form."));
        assert!(few.contains("genitive singular"));
        assert!(few.ends_with("Respond with only the translated word, nothing else."));

        let many = Prompt::singular(DEFAULT_DOMAIN, "hive", Language::RUSSIAN)
            .with_category("many")
            .render();
        assert!(many.contains("genitive plural"));
    }

    #[test]
    fn test_simple_family_plural_hints() {
        let other = Prompt::singular(DEFAULT_DOMAIN, "hive", language("de"))
            .with_category("other")
            .render();
        assert!(other.contains("count != 1"));
    }

    #[test]
    fn test_arabic_dual_hint() {
        let two = Prompt::singular(DEFAULT_DOMAIN, "hive", language("ar"))
            .with_category("two")
            .render();
        assert!(two.contains("dual form"));
    }

    #[test]
    fn test_unknown_category_has_no_hint() {
        assert!(category_hint(PluralFamily::Simple, "few").is_none());
        assert!(category_hint(PluralFamily::Romance, "two").is_none());
    }
}

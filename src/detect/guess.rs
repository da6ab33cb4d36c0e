//! Free-text language guessing.
//!
//! Thin wrapper over whatlang. A short or ambiguous text is a miss
//! (`None`), never an error, so callers can express their fallback
//! chains without exception handling.

use whatlang::{detect, Lang};

/// Guess the language of a block of natural-language text.
///
/// Returns the two-letter code for the supported set, the ISO 639-3
/// code for anything else whatlang recognizes, and `None` when the
/// detection is unreliable.
pub fn guess_language(text: &str) -> Option<String> {
    let info = detect(text)?;
    if !info.is_reliable() {
        return None;
    }
    Some(two_letter_code(info.lang()))
}

fn two_letter_code(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        other => other.code(),
    };
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_french() {
        let text = "Bonjour à toutes et à tous. Nous sommes une organisation dédiée à la \
                    recherche sur la sécurité des systèmes d'intelligence artificielle. Notre \
                    mission est de promouvoir une compréhension approfondie des risques que ces \
                    systèmes posent pour la société et de proposer des mesures concrètes.";
        assert_eq!(guess_language(text).as_deref(), Some("fr"));
    }

    #[test]
    fn test_guess_english() {
        let text = "We are a research organization dedicated to understanding the long-term \
                    impacts of advanced technology on society. Our team publishes reports, \
                    hosts workshops, and collaborates with universities around the world.";
        assert_eq!(guess_language(text).as_deref(), Some("en"));
    }

    #[test]
    fn test_guess_misses_on_short_text() {
        assert!(guess_language("").is_none());
    }
}

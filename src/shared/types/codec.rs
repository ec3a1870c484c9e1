//! Bidirectional mapping between stored integer codes and display labels

/// A fixed `code <-> label` table with a fallback label for unknown codes.
///
/// Instances are `const` and live next to the enumeration they describe
/// (see `crate::domain::status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelCodec {
    name: &'static str,
    entries: &'static [(i32, &'static str)],
    default_label: &'static str,
}

impl LabelCodec {
    pub const fn new(
        name: &'static str,
        entries: &'static [(i32, &'static str)],
        default_label: &'static str,
    ) -> Self {
        Self {
            name,
            entries,
            default_label,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &'static [(i32, &'static str)] {
        self.entries
    }

    pub fn default_label(&self) -> &'static str {
        self.default_label
    }

    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn contains_code(&self, code: i32) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }

    /// Label -> code. Matching ignores case and surrounding whitespace; a
    /// numeric string naming a known code is accepted as well.
    ///
    /// Returns `None` for anything else so the caller decides whether to
    /// skip the filter or reject the input.
    pub fn code_of(&self, label: &str) -> Option<i32> {
        let wanted = label.trim();
        if wanted.is_empty() {
            return None;
        }

        if let Ok(code) = wanted.parse::<i32>() {
            return self.contains_code(code).then_some(code);
        }

        let wanted = wanted.to_lowercase();
        self.entries
            .iter()
            .find(|(_, l)| l.to_lowercase() == wanted)
            .map(|(code, _)| *code)
    }

    /// Code -> label, falling back to the default label.
    pub fn label_of(&self, code: i32) -> &'static str {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
            .unwrap_or(self.default_label)
    }

    pub fn label_of_opt(&self, code: Option<i32>) -> &'static str {
        code.map_or(self.default_label, |c| self.label_of(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: LabelCodec =
        LabelCodec::new("color", &[(1, "Vermelho"), (2, "Azul")], "Indefinido");

    #[test]
    fn forward_lookup_is_case_insensitive() {
        assert_eq!(COLORS.code_of("Vermelho"), Some(1));
        assert_eq!(COLORS.code_of("  azul "), Some(2));
        assert_eq!(COLORS.code_of("AZUL"), Some(2));
    }

    #[test]
    fn forward_lookup_accepts_known_numeric_codes() {
        assert_eq!(COLORS.code_of("2"), Some(2));
        assert_eq!(COLORS.code_of("7"), None);
    }

    #[test]
    fn unknown_labels_map_to_none() {
        assert_eq!(COLORS.code_of("Verde"), None);
        assert_eq!(COLORS.code_of(""), None);
        assert_eq!(COLORS.code_of("   "), None);
    }

    #[test]
    fn unknown_codes_map_to_default_label() {
        assert_eq!(COLORS.label_of(99), "Indefinido");
        assert_eq!(COLORS.label_of(-1), "Indefinido");
        assert_eq!(COLORS.label_of_opt(None), "Indefinido");
        assert_eq!(COLORS.label_of_opt(Some(1)), "Vermelho");
    }
}

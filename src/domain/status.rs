//! Code tables for the enumerations stored as integers

use crate::shared::types::{DomainError, DomainResult, LabelCodec};

pub const UNDEFINED_LABEL: &str = "Indefinido";

pub const STUDENT_STATUS: LabelCodec = LabelCodec::new(
    "student",
    &[
        (1, "Ativo"),
        (2, "Transferido"),
        (3, "Desistente"),
        (4, "Finalizado"),
    ],
    UNDEFINED_LABEL,
);

pub const PAYMENT_STATUS: LabelCodec = LabelCodec::new(
    "payment",
    &[(1, "Pago"), (2, "Pendente"), (3, "Atrasado"), (4, "Cancelado")],
    UNDEFINED_LABEL,
);

pub const GENDER: LabelCodec =
    LabelCodec::new("gender", &[(1, "Masculino"), (2, "Feminino")], UNDEFINED_LABEL);

pub const EVALUATION_KIND: LabelCodec = LabelCodec::new(
    "evaluation",
    &[(1, "Prova"), (2, "Trabalho"), (3, "Exame")],
    UNDEFINED_LABEL,
);

/// Every code table, in catalogue order.
pub const ALL_CODECS: [LabelCodec; 4] = [STUDENT_STATUS, PAYMENT_STATUS, GENDER, EVALUATION_KIND];

pub const ACTIVE_STUDENT: i32 = 1;

/// Look a code table up by its name (`student`, `payment`, ...).
pub fn codec_named(name: &str) -> Option<LabelCodec> {
    let name = name.trim();
    ALL_CODECS
        .iter()
        .find(|codec| codec.name().eq_ignore_ascii_case(name))
        .copied()
}

/// Strict label -> code for writes: unknown labels are rejected instead of
/// dropped.
pub fn require_code(codec: &LabelCodec, field: &str, label: &str) -> DomainResult<i32> {
    codec.code_of(label).ok_or_else(|| {
        let known: Vec<&str> = codec.entries().iter().map(|(_, l)| *l).collect();
        DomainError::validation(format!(
            "{} must be one of {}, got '{}'",
            field,
            known.join(", "),
            label.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_codes() {
        for codec in ALL_CODECS {
            for (code, label) in codec.entries() {
                assert_eq!(codec.code_of(label), Some(*code), "{}", codec.name());
                assert_eq!(codec.label_of(*code), *label);
                assert_eq!(codec.code_of(codec.label_of(*code)), Some(*code));
            }
        }
    }

    #[test]
    fn unknown_code_uses_default_label() {
        for codec in ALL_CODECS {
            assert_eq!(codec.label_of(99), "Indefinido");
        }
    }

    #[test]
    fn ativo_is_code_one() {
        assert_eq!(STUDENT_STATUS.code_of("ativo"), Some(ACTIVE_STUDENT));
        assert_eq!(PAYMENT_STATUS.code_of("Pendente"), Some(2));
    }

    #[test]
    fn codecs_are_found_by_name() {
        assert_eq!(codec_named("Payment"), Some(PAYMENT_STATUS));
        assert_eq!(codec_named("gender"), Some(GENDER));
        assert!(codec_named("shift").is_none());
    }

    #[test]
    fn require_code_lists_known_labels() {
        assert_eq!(require_code(&GENDER, "gender", "Feminino").unwrap(), 2);
        let err = require_code(&GENDER, "gender", "Outro").unwrap_err();
        assert_eq!(
            err.to_string(),
            "gender must be one of Masculino, Feminino, got 'Outro'"
        );
    }
}

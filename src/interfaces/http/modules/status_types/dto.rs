//! Code table DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::types::LabelCodec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CodeLabelDto {
    pub code: i32,
    pub label: String,
}

/// Every `(code, label)` pair of a code table.
pub fn code_labels(codec: &LabelCodec) -> Vec<CodeLabelDto> {
    codec
        .entries()
        .iter()
        .map(|(code, label)| CodeLabelDto {
            code: *code,
            label: label.to_string(),
        })
        .collect()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTypeDto {
    /// `student`, `payment`, `gender` or `evaluation`
    pub kind: String,
    /// Label shown for codes not in `entries`
    pub default_label: String,
    pub entries: Vec<CodeLabelDto>,
}

impl From<&LabelCodec> for StatusTypeDto {
    fn from(codec: &LabelCodec) -> Self {
        Self {
            kind: codec.name().to_string(),
            default_label: codec.default_label().to_string(),
            entries: code_labels(codec),
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::codepoint::Cp;
use crate::emoji::EmojiSequence;
use crate::group::Group;

/// причины, по которым метка не прошла нормализацию.
/// строковые поля - безопасное для вывода представление кодпоинтов
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormError
{
    #[error("unrepresentable Unicode scalar: {0:02X}")]
    Unrepresentable(Cp),
    #[error("empty label")]
    EmptyLabel,
    #[error("disallowed character: {what}")]
    DisallowedCharacter { what: String, cp: Cp },
    #[error("underscore allowed only at start")]
    InvalidUnderscore,
    #[error("invalid label extension: {0}")]
    InvalidLabelExtension(String),
    #[error("leading combining mark: {0}")]
    LeadingCombiningMark(String),
    #[error("emoji + combining mark: {emoji} + {what}")]
    CombiningMarkAfterEmoji { emoji: EmojiSequence, what: String },
    #[error("leading fenced: {0}")]
    LeadingFenced(String),
    #[error("adjacent fenced: {left} + {right}")]
    AdjacentFenced { left: String, right: String },
    #[error("trailing fenced: {0}")]
    TrailingFenced(String),
    /// other - группа, в основной набор которой входит кодпоинт (если такая есть)
    #[error("illegal mixture: {what}")]
    IllegalMixture
    {
        what: String,
        cp: Cp,
        group: Arc<Group>,
        other: Option<Arc<Group>>,
    },
    #[error("excessive non-spacing marks: {what}")]
    ExcessiveNonSpacingMarks { what: String, cps: Vec<Cp> },
    #[error("duplicate non-spacing marks: {what}")]
    DuplicateNonSpacingMark { what: String, cp: Cp },
    #[error("whole-script confusable: {group}/{other}")]
    WholeScriptConfusable { group: Arc<Group>, other: Arc<Group> },
}

/// ошибки загрузки таблиц. означают повреждённую поставку, а не плохие входные данные
#[derive(Error, Debug)]
pub enum TableError
{
    #[error("failed to read {}: {source}", .path.display())]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected end of table data")]
    UnexpectedEnd,
    #[error("empty width ladder")]
    EmptyLadder,
    #[error("invalid value in table data: {0}")]
    InvalidValue(i64),
    #[error("unrepresentable Unicode scalar in table data: {0:02X}")]
    Unrepresentable(Cp),
    #[error("missing group: {0}")]
    MissingGroup(&'static str),
}

use crate::codepoint::Cp;
use crate::emoji::EmojiSequence;

/// фрагмент токенизированной метки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputToken<'a>
{
    /// нормализованный (NFC или NFD) текст
    Text(Vec<Cp>),
    Emoji(&'a EmojiSequence),
}

impl<'a> OutputToken<'a>
{
    pub fn is_emoji(&self) -> bool
    {
        matches!(self, Self::Emoji(_))
    }

    /// текст токена, для emoji - None
    pub fn text(&self) -> Option<&[Cp]>
    {
        match self {
            Self::Text(cps) => Some(cps),
            Self::Emoji(_) => None,
        }
    }
}

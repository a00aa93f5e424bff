use super::Ensip15;

use crate::codepoint::Cp;
use crate::codepoint::STOP;
use crate::error::NormError;
use crate::token::OutputToken;

impl Ensip15
{
    /// разбить метку на текст и emoji.
    ///
    /// emoji ищутся в первую очередь; текст накапливается (с заменами и без игнорируемых
    /// кодпоинтов) и перед каждым emoji и в конце нормализуется в NFC или NFD
    pub fn output_tokenize(
        &self,
        cps: &[Cp],
        decompose: bool,
    ) -> Result<Vec<OutputToken<'_>>, NormError>
    {
        let mut tokens = vec![];
        let mut buffer = vec![];
        let mut i = 0;

        while i < cps.len() {
            if let Some((emoji, after)) = self.find_emoji(cps, i) {
                if !buffer.is_empty() {
                    tokens.push(self.text_token(&buffer, decompose));
                    buffer.clear();
                }

                tokens.push(OutputToken::Emoji(emoji));
                i = after;
                continue;
            }

            let cp = cps[i];

            if self.possibly_valid.contains(&cp) || cp == STOP {
                buffer.push(cp);
            } else if let Some(replacement) = self.mapped.get(&cp) {
                buffer.extend_from_slice(replacement);
            } else if !self.ignored.contains(&cp) {
                return Err(NormError::DisallowedCharacter {
                    what: self.safe_codepoint(cp),
                    cp,
                });
            }

            i += 1;
        }

        if !buffer.is_empty() {
            tokens.push(self.text_token(&buffer, decompose));
        }

        Ok(tokens)
    }

    fn text_token(&self, buffer: &[Cp], decompose: bool) -> OutputToken<'_>
    {
        OutputToken::Text(match decompose {
            true => self.nf.nfd(buffer),
            false => self.nf.nfc(buffer),
        })
    }
}

/// склеить токены; emoji - в форме для отображения или нормализованной
pub(crate) fn flatten(tokens: &[OutputToken], beautify: bool) -> Vec<Cp>
{
    let mut cps = vec![];

    for token in tokens {
        match token {
            OutputToken::Text(text) => cps.extend_from_slice(text),
            OutputToken::Emoji(emoji) if beautify => cps.extend_from_slice(emoji.beautified()),
            OutputToken::Emoji(emoji) => cps.extend_from_slice(emoji.normalized()),
        }
    }

    cps
}

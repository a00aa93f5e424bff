use super::Ensip15;

use crate::codepoint::is_ascii;
use crate::codepoint::to_hex_escape;
use crate::codepoint::Cp;

/// пунктирный круг - основа для комбинируемого знака в начале
const DOTTED_CIRCLE: char = '\u{25CC}';
/// left-to-right mark - сбрасывает направление текста после вставки
const LRM: char = '\u{200E}';

impl Ensip15
{
    /// кодпоинт для сообщения: "X" {HEX}, а непечатаемый - только {HEX}
    pub fn safe_codepoint(&self, cp: Cp) -> String
    {
        let mut s = String::new();

        if !self.should_escape.contains(&cp) && char::from_u32(cp).is_some() {
            s.push('"');
            s.push_str(&self.safe_implode(&[cp]));
            s.push_str("\" ");
        }

        s.push_str(&to_hex_escape(cp));
        s
    }

    /// кодпоинты для сообщения: экранируемые заменяются на {HEX}
    pub fn safe_implode(&self, cps: &[Cp]) -> String
    {
        let mut s = String::new();

        if let Some(first) = cps.first() {
            if self.combining_marks.contains(first) {
                s.push(DOTTED_CIRCLE);
            }
        }

        let mut ascii = true;

        for &cp in cps {
            match char::from_u32(cp) {
                Some(c) if !self.should_escape.contains(&cp) => {
                    s.push(c);
                    ascii &= is_ascii(cp);
                }
                _ => s.push_str(&to_hex_escape(cp)),
            }
        }

        if !ascii {
            s.push(LRM);
        }

        s
    }
}

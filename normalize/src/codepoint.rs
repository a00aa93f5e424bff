use crate::error::NormError;

/// кодпоинт Unicode
pub type Cp = u32;

/// дефис
pub const HYPHEN: Cp = 0x2D;
/// точка - разделитель меток
pub const STOP: Cp = 0x2E;
/// подчеркивание
pub const UNDERSCORE: Cp = 0x5F;
/// zero width joiner
pub const ZWJ: Cp = 0x200D;
/// селектор варианта emoji
pub const FE0F: Cp = 0xFE0F;

/// кодпоинт из диапазона ASCII?
#[inline(always)]
pub fn is_ascii(cp: Cp) -> bool
{
    cp < 0x80
}

/// строка -> кодпоинты
pub fn explode(s: &str) -> Vec<Cp>
{
    s.chars().map(u32::from).collect()
}

/// кодпоинты -> строка
pub fn implode(cps: &[Cp]) -> Result<String, NormError>
{
    cps.iter()
        .map(|&cp| char::from_u32(cp).ok_or(NormError::Unrepresentable(cp)))
        .collect()
}

/// разбить имя на метки. пустое имя не содержит меток
pub fn split(cps: &[Cp]) -> Vec<&[Cp]>
{
    match cps.is_empty() {
        true => vec![],
        false => cps.split(|&cp| cp == STOP).collect(),
    }
}

/// собрать метки обратно в имя
pub fn join(labels: Vec<Vec<Cp>>) -> Vec<Cp>
{
    labels.join(&STOP)
}

/// шестнадцатеричная запись, минимум 2 символа
pub fn to_hex(cp: Cp) -> String
{
    format!("{:02X}", cp)
}

/// {HEX}
pub fn to_hex_escape(cp: Cp) -> String
{
    format!("{{{}}}", to_hex(cp))
}

/// последовательность кодпоинтов через пробел
pub fn to_hex_sequence(cps: &[Cp]) -> String
{
    cps.iter().map(|&cp| to_hex(cp)).collect::<Vec<_>>().join(" ")
}

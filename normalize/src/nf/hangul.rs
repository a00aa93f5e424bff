use crate::codepoint::Cp;

// слоги хангыль раскладываются и собираются алгоритмически:
//  - L: ведущие согласные U+1100..U+1112
//  - V: гласные U+1161..U+1175
//  - T: завершающие согласные U+11A8..U+11C2 (T_BASE - "пустая" согласная)

/// начало блока слогов хангыль
pub const HANGUL_S_BASE: Cp = 0xAC00;
/// начало блока ведущих согласных чамо
pub const HANGUL_L_BASE: Cp = 0x1100;
/// начало блока гласных чамо
pub const HANGUL_V_BASE: Cp = 0x1161;
/// завершающая согласная с индексом 0 (отсутствует)
pub const HANGUL_T_BASE: Cp = 0x11A7;
/// количество ведущих согласных
pub const HANGUL_L_COUNT: Cp = 19;
/// количество гласных
pub const HANGUL_V_COUNT: Cp = 21;
/// количество завершающих согласных (включая отсутствующую)
pub const HANGUL_T_COUNT: Cp = 28;
/// количество гласных * количество завершающих согласных
pub const HANGUL_N_COUNT: Cp = HANGUL_V_COUNT * HANGUL_T_COUNT;
/// количество слогов хангыль в Unicode
pub const HANGUL_S_COUNT: Cp = HANGUL_L_COUNT * HANGUL_N_COUNT;

/// кодпоинт - слог хангыль?
#[inline(always)]
pub fn is_hangul_syllable(code: Cp) -> bool
{
    code.wrapping_sub(HANGUL_S_BASE) < HANGUL_S_COUNT
}

/// разложить слог на L, V и (если есть) T
#[inline(always)]
pub fn decompose_hangul(code: Cp) -> (Cp, Cp, Option<Cp>)
{
    let s = code - HANGUL_S_BASE;

    let l = s / HANGUL_N_COUNT;
    let v = (s % HANGUL_N_COUNT) / HANGUL_T_COUNT;
    let t = s % HANGUL_T_COUNT;

    (
        HANGUL_L_BASE + l,
        HANGUL_V_BASE + v,
        match t {
            0 => None,
            t => Some(HANGUL_T_BASE + t),
        },
    )
}

/// скомбинировать пару L + V или LV + T
#[inline(always)]
pub fn compose_hangul(first: Cp, second: Cp) -> Option<Cp>
{
    let l = first.wrapping_sub(HANGUL_L_BASE);

    // кейс L, V
    if l < HANGUL_L_COUNT {
        let v = second.wrapping_sub(HANGUL_V_BASE);

        if v < HANGUL_V_COUNT {
            return Some(HANGUL_S_BASE + l * HANGUL_N_COUNT + v * HANGUL_T_COUNT);
        }
    }

    // кейс LV, T: у слога не должно быть завершающей согласной
    let lv = first.wrapping_sub(HANGUL_S_BASE);

    if lv < HANGUL_S_COUNT && lv % HANGUL_T_COUNT == 0 {
        let t = second.wrapping_sub(HANGUL_T_BASE);

        if t > 0 && t < HANGUL_T_COUNT {
            return Some(first + t);
        }
    }

    None
}

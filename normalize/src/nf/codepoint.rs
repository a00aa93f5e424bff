use crate::codepoint::Cp;

/// сдвиг ранга CCC в упакованном значении, код занимает все младшие 32 бита
const RANK_SHIFT: u32 = 32;

/// кодпоинт для декомпозиции в виде u64, где ранг CCC хранится в старших битах.
/// ранг 0 - стартер, остальные значения важны только для сравнения между собой
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Codepoint(u64);

impl core::fmt::Debug for Codepoint
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        write!(f, "{{ code: U+{:04X}, rank: {} }}", self.code(), self.rank())
    }
}

impl Codepoint
{
    #[inline(always)]
    pub fn code(&self) -> Cp
    {
        self.0 as u32
    }

    #[inline(always)]
    pub fn rank(&self) -> u8
    {
        (self.0 >> RANK_SHIFT) as u8
    }

    #[inline(always)]
    pub fn from_code_and_rank(code: Cp, rank: u8) -> Self
    {
        Self((rank as u64) << RANK_SHIFT | code as u64)
    }

    #[inline(always)]
    pub fn from_code(code: Cp) -> Self
    {
        Self(code as u64)
    }
}

use std::collections::HashMap;
use std::collections::HashSet;

use crate::codepoint::is_ascii;
use crate::codepoint::Cp;
use crate::decoder::Decoder;
use crate::error::TableError;

use codepoint::Codepoint;
use hangul::compose_hangul;
use hangul::decompose_hangul;
use hangul::is_hangul_syllable;

mod codepoint;
mod hangul;

/// каноническая нормализация Unicode (NFD / NFC) по загруженным таблицам
pub struct Nf
{
    unicode_version: String,
    /// исключения из композиции
    exclusions: HashSet<Cp>,
    quick_check: HashSet<Cp>,
    /// декомпозиции в каноническом порядке (1 или 2 кодпоинта)
    decomps: HashMap<Cp, Vec<Cp>>,
    /// (стартер, следующий) -> композиция
    recomps: HashMap<(Cp, Cp), Cp>,
    /// ранги CCC, 0 (отсутствие) не хранится
    ranks: HashMap<Cp, u8>,
}

/// буфер декомпозиции
struct Packer
{
    /// встретился кодпоинт с ненулевым рангом - понадобится переупорядочивание
    check: bool,
    buffer: Vec<Codepoint>,
}

impl Packer
{
    fn with_capacity(capacity: usize) -> Self
    {
        Self {
            check: false,
            buffer: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    fn add(&mut self, code: Cp, ranks: &HashMap<Cp, u8>)
    {
        match ranks.get(&code) {
            Some(&rank) => {
                self.check = true;
                self.buffer.push(Codepoint::from_code_and_rank(code, rank));
            }
            None => self.buffer.push(Codepoint::from_code(code)),
        }
    }

    /// канонический порядок: устойчивая сортировка вставками по рангу.
    /// стартеры остаются на месте и служат границами
    fn fix_order(&mut self)
    {
        if !self.check {
            return;
        }

        let buffer = &mut self.buffer;

        let mut prev = match buffer.first() {
            Some(first) => first.rank(),
            None => return,
        };

        for i in 1 .. buffer.len() {
            let rank = buffer[i].rank();

            if rank == 0 || prev <= rank {
                prev = rank;
                continue;
            }

            let mut j = i - 1;

            loop {
                buffer.swap(j, j + 1);

                if j == 0 {
                    break;
                }

                j -= 1;

                if buffer[j].rank() <= rank {
                    break;
                }
            }

            prev = buffer[i].rank();
        }
    }
}

impl Nf
{
    /// таблицы в порядке хранения: версия, исключения, quick check, декомпозиции в 1 и 2
    /// кодпоинта, группы рангов (пустая - конец)
    pub fn new(decoder: &mut Decoder) -> Result<Self, TableError>
    {
        let unicode_version = decoder.read_string()?;
        let exclusions = decoder.read_set()?;
        let quick_check = decoder.read_set()?;

        let mut decomps = HashMap::new();
        let mut recomps = HashMap::new();

        let mut singles = decoder.read_unique()?;
        singles.sort_unstable();

        let targets = decoder.read_unsorted_deltas(singles.len())?;

        for (code, a) in singles.into_iter().zip(targets) {
            decomps.insert(code, vec![a]);
        }

        let mut pairs = decoder.read_unique()?;
        pairs.sort_unstable();

        let firsts = decoder.read_unsorted_deltas(pairs.len())?;
        let seconds = decoder.read_unsorted_deltas(pairs.len())?;

        for ((code, a), b) in pairs.into_iter().zip(firsts).zip(seconds) {
            decomps.insert(code, vec![a, b]);

            if !exclusions.contains(&code) {
                recomps.insert((a, b), code);
            }
        }

        let mut ranks = HashMap::new();
        let mut rank: u8 = 0;

        loop {
            let bucket = decoder.read_unique()?;

            if bucket.is_empty() {
                break;
            }

            rank = rank
                .checked_add(1)
                .ok_or(TableError::InvalidValue(rank as i64 + 1))?;

            ranks.extend(bucket.into_iter().map(|code| (code, rank)));
        }

        Ok(Self {
            unicode_version,
            exclusions,
            quick_check,
            decomps,
            recomps,
            ranks,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError>
    {
        Self::new(&mut Decoder::new(bytes))
    }

    pub fn unicode_version(&self) -> &str
    {
        &self.unicode_version
    }

    pub fn is_excluded(&self, code: Cp) -> bool
    {
        self.exclusions.contains(&code)
    }

    pub fn is_quick_check(&self, code: Cp) -> bool
    {
        self.quick_check.contains(&code)
    }

    /// ранг CCC, 0 - стартер
    pub fn rank(&self, code: Cp) -> u8
    {
        self.ranks.get(&code).copied().unwrap_or(0)
    }

    /// NFD
    pub fn nfd(&self, cps: &[Cp]) -> Vec<Cp>
    {
        self.decomposed(cps).into_iter().map(|c| c.code()).collect()
    }

    /// NFC
    pub fn nfc(&self, cps: &[Cp]) -> Vec<Cp>
    {
        self.composed(&self.decomposed(cps))
    }

    /// скомбинировать пару: хангыль или таблица композиций
    pub fn compose_pair(&self, a: Cp, b: Cp) -> Option<Cp>
    {
        compose_hangul(a, b).or_else(|| self.recomps.get(&(a, b)).copied())
    }

    /// полная декомпозиция с последующим каноническим упорядочиванием
    fn decomposed(&self, cps: &[Cp]) -> Vec<Codepoint>
    {
        let mut packer = Packer::with_capacity(cps.len());
        let mut stack: Vec<Cp> = vec![];

        for &first in cps {
            let mut code = first;

            loop {
                if is_ascii(code) {
                    packer.buffer.push(Codepoint::from_code(code));
                } else if is_hangul_syllable(code) {
                    let (l, v, t) = decompose_hangul(code);

                    packer.add(l, &self.ranks);
                    packer.add(v, &self.ranks);

                    if let Some(t) = t {
                        packer.add(t, &self.ranks);
                    }
                } else if let Some(decomposition) = self.decomps.get(&code) {
                    // элементы декомпозиции тоже могут раскладываться - в стеке в обратном порядке
                    stack.extend(decomposition.iter().rev());
                } else {
                    packer.add(code, &self.ranks);
                }

                match stack.pop() {
                    Some(next) => code = next,
                    None => break,
                }
            }
        }

        packer.fix_order();
        packer.buffer
    }

    /// каноническая композиция упорядоченной декомпозиции.
    ///
    /// кодпоинты, которые не удалось скомбинировать со стартером, откладываются и
    /// дописываются после него при встрече следующего стартера
    fn composed(&self, packed: &[Codepoint]) -> Vec<Cp>
    {
        let mut result = Vec::with_capacity(packed.len());
        let mut tail: Vec<Cp> = vec![];
        let mut starter: Option<Cp> = None;
        let mut prev_rank = 0;

        for codepoint in packed {
            let rank = codepoint.rank();
            let code = codepoint.code();

            let current = match starter {
                Some(current) => current,
                None => {
                    match rank {
                        0 => starter = Some(code),
                        _ => result.push(code),
                    }
                    continue;
                }
            };

            // заблокирован предыдущим нестартером с тем же или большим рангом
            if prev_rank > 0 && prev_rank >= rank {
                match rank {
                    0 => {
                        result.push(current);
                        result.append(&mut tail);
                        starter = Some(code);
                    }
                    _ => tail.push(code),
                }

                prev_rank = rank;
                continue;
            }

            if let Some(combined) = self.compose_pair(current, code) {
                starter = Some(combined);
                continue;
            }

            match prev_rank == 0 && rank == 0 {
                true => {
                    result.push(current);
                    starter = Some(code);
                }
                false => {
                    tail.push(code);
                    prev_rank = rank;
                }
            }
        }

        if let Some(current) = starter {
            result.push(current);
            result.append(&mut tail);
        }

        result
    }
}

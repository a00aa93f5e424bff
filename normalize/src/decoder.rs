use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::codepoint::Cp;
use crate::error::TableError;
use crate::group::Group;
use crate::group::GroupKind;
use crate::whole::ComplementInterner;
use crate::whole::Whole;

pub type Result<T> = core::result::Result<T, TableError>;

/// бит группы "restricted"
const GROUP_RESTRICTED: u32 = 0b_01;
/// бит группы, для которой не проверяются последовательности NSM
const GROUP_CM_WHITELISTED: u32 = 0b_10;

/// чтение упакованных таблиц.
///
/// биты читаются от младшего к старшему внутри каждого байта. числа переменной длины
/// кодируются "лестницей" ширин, которая хранится в начале данных и читается при первом
/// обращении к read_unsigned
pub struct Decoder<'a>
{
    data: &'a [u8],
    /// следующий байт
    index: usize,
    /// текущий байт
    word: u8,
    /// маска следующего бита в текущем байте, 0 - байт прочитан
    mask: u8,
    /// ширины ступеней, строго возрастают
    magic: Option<Vec<u32>>,
}

impl<'a> Decoder<'a>
{
    pub fn new(data: &'a [u8]) -> Self
    {
        Self {
            data,
            index: 0,
            word: 0,
            mask: 0,
            magic: None,
        }
    }

    /// следующий бит
    pub fn read_bit(&mut self) -> Result<bool>
    {
        if self.mask == 0 {
            self.word = *self.data.get(self.index).ok_or(TableError::UnexpectedEnd)?;
            self.index += 1;
            self.mask = 1;
        }

        let bit = self.word & self.mask != 0;
        self.mask <<= 1;

        Ok(bit)
    }

    /// количество единиц до первого нуля
    pub fn read_unary(&mut self) -> Result<u32>
    {
        let mut x = 0;

        while self.read_bit()? {
            x += 1;
        }

        Ok(x)
    }

    /// w бит, старший - первым
    pub fn read_binary(&mut self, w: u32) -> Result<u64>
    {
        let mut x = 0;

        for _ in 0 .. w {
            x = x << 1 | self.read_bit()? as u64;
        }

        Ok(x)
    }

    /// число переменной длины
    pub fn read_unsigned(&mut self) -> Result<u32>
    {
        let magic = match self.magic.take() {
            Some(magic) => magic,
            None => self.read_magic()?,
        };

        let result = self.read_rungs(&magic);
        self.magic = Some(magic);

        let value = result?;

        u32::try_from(value).map_err(|_| TableError::InvalidValue(value as i64))
    }

    /// лестница ширин: приращения в унарном коде, 0 - конец
    fn read_magic(&mut self) -> Result<Vec<u32>>
    {
        let mut magic = vec![];
        let mut w = 0;

        loop {
            let dw = self.read_unary()?;

            if dw == 0 {
                break;
            }

            w += dw;
            magic.push(w);
        }

        match magic.is_empty() {
            true => Err(TableError::EmptyLadder),
            false => Ok(magic),
        }
    }

    /// на каждой ступени, кроме последней, бит продолжения: 1 - переходим на следующую,
    /// добавляя ёмкость текущей, 0 - читаем значение текущей ширины
    fn read_rungs(&mut self, magic: &[u32]) -> Result<u64>
    {
        let mut a: u64 = 0;

        for (i, &w) in magic.iter().enumerate() {
            if i + 1 == magic.len() || !self.read_bit()? {
                return Ok(a + self.read_binary(w)?);
            }

            a += 1u64.checked_shl(w).ok_or(TableError::InvalidValue(w as i64))?;
        }

        Err(TableError::EmptyLadder)
    }

    /// count значений, каждое получается из предыдущего (начиная с -1) и прочитанного числа
    fn read_array(&mut self, count: usize, f: impl Fn(i64, i64) -> i64) -> Result<Vec<u32>>
    {
        // каждое значение занимает хотя бы бит - не доверяем счётчику из повреждённых данных
        let mut v = Vec::with_capacity(count.min(self.data.len() << 3));
        let mut prev: i64 = -1;

        for _ in 0 .. count {
            prev = f(prev, self.read_unsigned()? as i64);

            let value = u32::try_from(prev).map_err(|_| TableError::InvalidValue(prev))?;
            v.push(value);
        }

        Ok(v)
    }

    /// строго возрастающая последовательность: prev + 1 + x
    pub fn read_sorted_ascending(&mut self, count: usize) -> Result<Vec<u32>>
    {
        self.read_array(count, |prev, x| prev + 1 + x)
    }

    /// последовательность знаковых (zig-zag) приращений
    pub fn read_unsorted_deltas(&mut self, count: usize) -> Result<Vec<u32>>
    {
        self.read_array(count, |prev, x| prev + as_signed(x))
    }

    /// множество: отдельные значения + непрерывные диапазоны
    pub fn read_unique(&mut self) -> Result<Vec<u32>>
    {
        let count = self.read_unsigned()? as usize;
        let mut v = self.read_sorted_ascending(count)?;

        let runs = self.read_unsigned()? as usize;

        if runs > 0 {
            let starts = self.read_sorted_ascending(runs)?;
            let lengths = self.read_unsorted_deltas(runs)?;

            for (start, length) in starts.into_iter().zip(lengths) {
                let end = start
                    .checked_add(length)
                    .ok_or(TableError::InvalidValue(start as i64 + length as i64))?;

                v.extend(start .. end);
            }
        }

        Ok(v)
    }

    /// дерево в прямом порядке обхода: в каждом узле - листья, затем ветви.
    /// для каждого листа вызывается visit с полным путём от корня
    pub fn read_tree<T>(&mut self, mut visit: impl FnMut(&[u32]) -> T) -> Result<Vec<T>>
    {
        let mut results = vec![];
        let mut path = vec![];

        self.read_subtree(&mut results, &mut visit, &mut path)?;

        Ok(results)
    }

    fn read_subtree<T, F>(
        &mut self,
        results: &mut Vec<T>,
        visit: &mut F,
        path: &mut Vec<u32>,
    ) -> Result<()>
    where
        F: FnMut(&[u32]) -> T,
    {
        let count = self.read_unsigned()? as usize;

        for x in self.read_sorted_ascending(count)? {
            path.push(x);
            results.push(visit(path));
            path.pop();
        }

        let count = self.read_unsigned()? as usize;

        for x in self.read_sorted_ascending(count)? {
            path.push(x);
            self.read_subtree(results, visit, path)?;
            path.pop();
        }

        Ok(())
    }

    /// строка: длина + приращения кодпоинтов
    pub fn read_string(&mut self) -> Result<String>
    {
        let count = self.read_unsigned()? as usize;

        self.read_unsorted_deltas(count)?
            .into_iter()
            .map(|cp| char::from_u32(cp).ok_or(TableError::Unrepresentable(cp)))
            .collect()
    }

    pub fn read_set(&mut self) -> Result<HashSet<Cp>>
    {
        Ok(self.read_unique()?.into_iter().collect())
    }

    /// кодпоинт -> название
    pub fn read_named(&mut self) -> Result<HashMap<Cp, String>>
    {
        let count = self.read_unsigned()? as usize;
        let mut map = HashMap::with_capacity(count);

        for cp in self.read_sorted_ascending(count)? {
            map.insert(cp, self.read_string()?);
        }

        Ok(map)
    }

    /// кодпоинт -> замена.
    ///
    /// замены сгруппированы по длине w (0 - конец). внутри группы хранятся по столбцам:
    /// w последовательностей приращений, j-я содержит j-е кодпоинты замен всех ключей
    pub fn read_mapped(&mut self) -> Result<HashMap<Cp, Vec<Cp>>>
    {
        let mut map = HashMap::new();

        loop {
            let w = self.read_unsigned()? as usize;

            if w == 0 {
                break;
            }

            let mut keys = self.read_unique()?;
            keys.sort_unstable();

            let n = keys.len();
            let mut rows = vec![Vec::with_capacity(w); n];

            for _ in 0 .. w {
                let column = self.read_unsorted_deltas(n)?;

                for (row, cp) in rows.iter_mut().zip(column) {
                    row.push(cp);
                }
            }

            map.extend(keys.into_iter().zip(rows));
        }

        Ok(map)
    }

    /// группы в порядке приоритета, пустое название - конец списка
    pub fn read_groups(&mut self) -> Result<Vec<Arc<Group>>>
    {
        let mut groups = vec![];

        loop {
            let name = self.read_string()?;

            if name.is_empty() {
                break;
            }

            let bits = self.read_unsigned()?;

            let kind = match bits & GROUP_RESTRICTED != 0 {
                true => GroupKind::Restricted,
                false => GroupKind::Unrestricted,
            };

            let primary = self.read_set()?;
            let secondary = self.read_set()?;

            groups.push(Arc::new(Group::new(
                Some(groups.len()),
                kind,
                name,
                primary,
                secondary,
                bits & GROUP_CM_WHITELISTED != 0,
            )));
        }

        Ok(groups)
    }

    /// семейства confusable-символов, пустое множество confused - конец списка.
    /// дополнения групп вычисляются сразу, одинаковые дополнения хранятся один раз
    pub fn read_wholes(&mut self, groups: &[Arc<Group>]) -> Result<Vec<Whole>>
    {
        let mut wholes = vec![];
        let mut interner = ComplementInterner::default();

        loop {
            let confused = self.read_set()?;

            if confused.is_empty() {
                break;
            }

            let valid = self.read_set()?;

            wholes.push(Whole::confusable(valid, confused, groups, &mut interner));
        }

        Ok(wholes)
    }
}

/// zig-zag: чётные - неотрицательные, нечётные - отрицательные
#[inline(always)]
fn as_signed(i: i64) -> i64
{
    match i & 1 != 0 {
        true => !i >> 1,
        false => i >> 1,
    }
}

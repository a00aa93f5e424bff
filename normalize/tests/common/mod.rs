#![allow(dead_code)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use ens_normalize::Cp;
use ens_normalize::Ensip15;
use ens_normalize::Nf;
use ens_normalize::NormError;

/// ширины ступеней для чисел переменной длины
pub const LADDER: [u32; 9] = [1, 2, 3, 5, 8, 12, 16, 21, 24];

/// запись таблиц в том же битовом формате, который читает Decoder
pub struct Encoder
{
    bytes: Vec<u8>,
    /// количество бит в последнем байте
    bits: u32,
    ladder: Vec<u32>,
    magic_written: bool,
}

impl Encoder
{
    pub fn new() -> Self
    {
        Self::with_ladder(&LADDER)
    }

    pub fn with_ladder(ladder: &[u32]) -> Self
    {
        Self {
            bytes: vec![],
            bits: 8,
            ladder: ladder.to_vec(),
            magic_written: false,
        }
    }

    pub fn finish(self) -> Vec<u8>
    {
        self.bytes
    }

    pub fn bit(&mut self, bit: bool) -> &mut Self
    {
        if self.bits == 8 {
            self.bytes.push(0);
            self.bits = 0;
        }

        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << self.bits;
            }
        }

        self.bits += 1;
        self
    }

    pub fn unary(&mut self, x: u32) -> &mut Self
    {
        for _ in 0 .. x {
            self.bit(true);
        }

        self.bit(false)
    }

    /// w бит, старший - первым
    pub fn binary(&mut self, x: u64, w: u32) -> &mut Self
    {
        for i in (0 .. w).rev() {
            self.bit(x >> i & 1 != 0);
        }

        self
    }

    /// лестница пишется перед первым числом
    fn magic(&mut self)
    {
        let mut prev = 0;

        for w in self.ladder.clone() {
            self.unary(w - prev);
            prev = w;
        }

        self.unary(0);
        self.magic_written = true;
    }

    pub fn unsigned(&mut self, x: u64) -> &mut Self
    {
        if !self.magic_written {
            self.magic();
        }

        let ladder = self.ladder.clone();
        let mut a = 0;

        for (i, &w) in ladder.iter().enumerate() {
            let last = i + 1 == ladder.len();

            if last || x < a + (1 << w) {
                if !last {
                    self.bit(false);
                }

                return self.binary(x - a, w);
            }

            self.bit(true);
            a += 1 << w;
        }

        self
    }

    pub fn sorted(&mut self, values: &[Cp]) -> &mut Self
    {
        let mut prev: i64 = -1;

        for &v in values {
            self.unsigned((v as i64 - prev - 1) as u64);
            prev = v as i64;
        }

        self
    }

    /// zig-zag приращения
    pub fn deltas(&mut self, values: &[Cp]) -> &mut Self
    {
        let mut prev: i64 = -1;

        for &v in values {
            let d = v as i64 - prev;

            self.unsigned(match d < 0 {
                true => (-d * 2 - 1) as u64,
                false => (d * 2) as u64,
            });

            prev = v as i64;
        }

        self
    }

    /// отдельные значения + диапазоны (начало, длина)
    pub fn unique_runs(&mut self, values: &[Cp], runs: &[(Cp, Cp)]) -> &mut Self
    {
        let values: BTreeSet<Cp> = values.iter().copied().collect();
        let values: Vec<Cp> = values.into_iter().collect();

        self.unsigned(values.len() as u64);
        self.sorted(&values);
        self.unsigned(runs.len() as u64);

        if !runs.is_empty() {
            let mut runs = runs.to_vec();
            runs.sort_unstable();

            let starts: Vec<Cp> = runs.iter().map(|r| r.0).collect();
            let lengths: Vec<Cp> = runs.iter().map(|r| r.1).collect();

            self.sorted(&starts);
            self.deltas(&lengths);
        }

        self
    }

    pub fn unique(&mut self, values: &[Cp]) -> &mut Self
    {
        self.unique_runs(values, &[])
    }

    pub fn string(&mut self, s: &str) -> &mut Self
    {
        let cps: Vec<Cp> = s.chars().map(u32::from).collect();

        self.unsigned(cps.len() as u64);
        self.deltas(&cps)
    }

    pub fn named(&mut self, entries: &[(Cp, &str)]) -> &mut Self
    {
        let map: BTreeMap<Cp, &str> = entries.iter().copied().collect();
        let keys: Vec<Cp> = map.keys().copied().collect();

        self.unsigned(keys.len() as u64);
        self.sorted(&keys);

        for name in map.values() {
            self.string(name);
        }

        self
    }

    /// замены группируются по длине, внутри группы - по столбцам
    pub fn mapped(&mut self, entries: &[(Cp, Vec<Cp>)]) -> &mut Self
    {
        let mut by_width: BTreeMap<usize, BTreeMap<Cp, Vec<Cp>>> = BTreeMap::new();

        for (cp, replacement) in entries {
            by_width
                .entry(replacement.len())
                .or_default()
                .insert(*cp, replacement.clone());
        }

        for (w, rows) in by_width {
            let keys: Vec<Cp> = rows.keys().copied().collect();

            self.unsigned(w as u64);
            self.unique(&keys);

            for j in 0 .. w {
                let column: Vec<Cp> = rows.values().map(|row| row[j]).collect();
                self.deltas(&column);
            }
        }

        self.unsigned(0)
    }

    /// группы: (название, биты, основной набор, дополнительный набор)
    pub fn groups(&mut self, groups: &[TestGroup]) -> &mut Self
    {
        for group in groups {
            self.string(group.name);
            self.unsigned(group.bits as u64);
            self.unique_runs(&group.primary, &group.primary_runs);
            self.unique(&group.secondary);
        }

        self.string("")
    }

    /// дерево последовательностей
    pub fn tree(&mut self, sequences: &[Vec<Cp>]) -> &mut Self
    {
        let mut root = TreeNode::default();

        for sequence in sequences {
            root.insert(sequence);
        }

        root.write(self);
        self
    }

    /// семейства: (valid, confused)
    pub fn wholes(&mut self, wholes: &[(Vec<Cp>, Vec<Cp>)]) -> &mut Self
    {
        for (valid, confused) in wholes {
            self.unique(confused);
            self.unique(valid);
        }

        self.unique(&[])
    }
}

#[derive(Default)]
struct TreeNode
{
    leaves: BTreeSet<Cp>,
    branches: BTreeMap<Cp, TreeNode>,
}

impl TreeNode
{
    fn insert(&mut self, sequence: &[Cp])
    {
        match sequence {
            [] => {}
            [leaf] => {
                self.leaves.insert(*leaf);
            }
            [first, rest @ ..] => self.branches.entry(*first).or_default().insert(rest),
        }
    }

    fn write(&self, encoder: &mut Encoder)
    {
        let leaves: Vec<Cp> = self.leaves.iter().copied().collect();
        let branches: Vec<Cp> = self.branches.keys().copied().collect();

        encoder.unsigned(leaves.len() as u64);
        encoder.sorted(&leaves);
        encoder.unsigned(branches.len() as u64);
        encoder.sorted(&branches);

        for node in self.branches.values() {
            node.write(encoder);
        }
    }
}

pub struct TestGroup
{
    pub name: &'static str,
    pub bits: u32,
    pub primary: Vec<Cp>,
    pub primary_runs: Vec<(Cp, Cp)>,
    pub secondary: Vec<Cp>,
}

/// диапазон включительно
fn range(first: Cp, last: Cp) -> Vec<Cp>
{
    (first ..= last).collect()
}

/// цифры
fn digits() -> Vec<Cp>
{
    range(0x30, 0x39)
}

// тестовые таблицы NF: Å, é, à, â, ấ, ã, á, क़ (исключение), Å -> Å

pub const NF_VERSION: &str = "15.1.0";

pub fn nf_bytes() -> Vec<u8>
{
    let mut e = Encoder::new();

    e.string(NF_VERSION);
    e.unique(&[0x958]);
    e.unique(&[0x300, 0x301, 0x958]);

    // декомпозиции в один кодпоинт
    e.unique(&[0x212B]);
    e.deltas(&[0xC5]);

    // декомпозиции в два кодпоинта, в порядке возрастания кода
    let pairs: [(Cp, Cp, Cp); 8] = [
        (0xC5, 0x41, 0x30A),
        (0xE0, 0x61, 0x300),
        (0xE1, 0x61, 0x301),
        (0xE2, 0x61, 0x302),
        (0xE3, 0x61, 0x303),
        (0xE9, 0x65, 0x301),
        (0x958, 0x915, 0x93C),
        (0x1EA5, 0xE2, 0x301),
    ];

    let codes: Vec<Cp> = pairs.iter().map(|p| p.0).collect();
    let firsts: Vec<Cp> = pairs.iter().map(|p| p.1).collect();
    let seconds: Vec<Cp> = pairs.iter().map(|p| p.2).collect();

    e.unique(&codes);
    e.deltas(&firsts);
    e.deltas(&seconds);

    // ранги: нукта (7), нижние знаки (220), верхние знаки (230)
    e.unique(&[0x93C]);
    e.unique(&[0x323]);
    e.unique(&[0x300, 0x301, 0x302, 0x303, 0x30A]);
    e.unique(&[]);

    e.finish()
}

pub fn nf() -> Nf
{
    Nf::from_bytes(&nf_bytes()).expect("synthetic nf tables")
}

pub const RIGHT_QUOTE: &str = "Right Single Quotation Mark";
pub const FRACTION_SLASH: &str = "Fraction Slash";

pub const MAX_NSM: u64 = 2;

/// 🚴, 🚴‍♂️, 1️⃣, 2️⃣, 😀, ❤️
pub fn emoji_sequences() -> Vec<Vec<Cp>>
{
    vec![
        vec![0x1F6B4],
        vec![0x1F6B4, 0x200D, 0x2642, 0xFE0F],
        vec![0x31, 0xFE0F, 0x20E3],
        vec![0x32, 0xFE0F, 0x20E3],
        vec![0x1F600],
        vec![0x2764, 0xFE0F],
    ]
}

pub fn test_groups() -> Vec<TestGroup>
{
    let marks = vec![0x300, 0x301];

    vec![
        TestGroup {
            name: "Latin",
            bits: 0,
            primary: vec![0xE0, 0xE2, 0xE3, 0xE9, 0x1EA5],
            primary_runs: vec![(0x61, 26)],
            secondary: [
                digits(),
                vec![0x5F, 0x2D, 0x300, 0x301, 0x302, 0x323, 0x2019, 0x2044],
            ]
            .concat(),
        },
        TestGroup {
            name: "Greek",
            bits: 0,
            primary: range(0x3B1, 0x3C9),
            primary_runs: vec![],
            secondary: [digits(), marks.clone()].concat(),
        },
        TestGroup {
            name: "Cyrillic",
            bits: 0,
            primary: vec![],
            primary_runs: vec![(0x430, 0x20)],
            secondary: [digits(), marks, vec![0x485]].concat(),
        },
        TestGroup {
            name: "Thaana",
            bits: 0b_01,
            primary: range(0x780, 0x7A5),
            primary_runs: vec![],
            secondary: vec![0x485],
        },
        TestGroup {
            name: "Devanagari",
            bits: 0b_10,
            primary: range(0x915, 0x939),
            primary_runs: vec![],
            secondary: vec![0x300, 0x301, 0x302, 0x303, 0x93C],
        },
    ]
}

pub fn spec_bytes() -> Vec<u8>
{
    spec_bytes_with(&test_groups())
}

pub fn spec_bytes_with(groups: &[TestGroup]) -> Vec<u8>
{
    let mut e = Encoder::new();

    e.unique(&[0x200D, 0x202E, 0xFE0F]);
    e.unique(&[0xAD, 0xFE0F]);
    e.unique(&[0x300, 0x301, 0x302, 0x303, 0x30A, 0x323, 0x20E3, 0x93C]);
    e.unsigned(MAX_NSM);
    e.unique(&[0x300, 0x301, 0x302, 0x303, 0x30A, 0x323]);
    e.unique(&[0x300, 0x301]);
    e.named(&[(0x2019, RIGHT_QUOTE), (0x2044, FRACTION_SLASH)]);

    let mut mapped: Vec<(Cp, Vec<Cp>)> =
        (0x41 ..= 0x5A).map(|cp| (cp, vec![cp + 0x20])).collect();
    mapped.push((0x27, vec![0x2019]));
    mapped.push((0x39E, vec![0x3BE]));
    mapped.push((0xFB00, vec![0x66, 0x66]));
    e.mapped(&mapped);

    e.groups(groups);
    e.tree(&emoji_sequences());

    // o: латиница / греческий / кириллица, a: латиница / кириллица
    e.wholes(&[
        (vec![0x6F], vec![0x3BF, 0x43E]),
        (vec![0x61], vec![0x430]),
    ]);

    e.finish()
}

pub fn engine() -> Ensip15
{
    Ensip15::from_bytes(&spec_bytes(), &nf_bytes()).expect("synthetic tables")
}

pub fn explode(s: &str) -> Vec<Cp>
{
    s.chars().map(u32::from).collect()
}

pub fn implode(cps: &[Cp]) -> String
{
    cps.iter().map(|&cp| char::from_u32(cp).expect("scalar")).collect()
}

pub fn normalize(engine: &Ensip15, name: &str) -> Result<String, NormError>
{
    engine.normalize(&explode(name)).map(|cps| implode(&cps))
}

pub fn beautify(engine: &Ensip15, name: &str) -> Result<String, NormError>
{
    engine.beautify(&explode(name)).map(|cps| implode(&cps))
}

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::codepoint::Cp;
use crate::group::Group;

/// классификация кодпоинта для проверки whole-script confusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Whole
{
    /// кодпоинт однозначен - метка с ним не может быть confusable
    Unique,
    /// кодпоинт из семейства визуально схожих символов разных письменностей
    Confusable(Arc<Confusable>),
}

/// семейство confusable-символов
#[derive(Debug, PartialEq, Eq)]
pub struct Confusable
{
    valid: HashSet<Cp>,
    confused: HashSet<Cp>,
    /// кодпоинт -> отсортированные индексы групп семейства, не покрывающих его экстент
    complements: HashMap<Cp, Arc<[usize]>>,
}

impl Confusable
{
    pub fn valid(&self) -> &HashSet<Cp>
    {
        &self.valid
    }

    pub fn confused(&self) -> &HashSet<Cp>
    {
        &self.confused
    }

    pub fn complement(&self, cp: Cp) -> Option<&[usize]>
    {
        self.complements.get(&cp).map(|c| &c[..])
    }
}

/// одинаковые дополнения хранятся в одном экземпляре
#[derive(Default)]
pub struct ComplementInterner
{
    seen: HashSet<Arc<[usize]>>,
}

impl ComplementInterner
{
    fn intern(&mut self, complement: Vec<usize>) -> Arc<[usize]>
    {
        if let Some(existing) = self.seen.get(complement.as_slice()) {
            return existing.clone();
        }

        let complement: Arc<[usize]> = complement.into();
        self.seen.insert(complement.clone());

        complement
    }
}

/// экстент - кодпоинты, наборы покрывающих групп которых пересекаются
struct Extent
{
    cps: Vec<Cp>,
    groups: BTreeSet<usize>,
}

impl Whole
{
    /// построить семейство и вычислить дополнения его экстентов
    pub fn confusable(
        valid: HashSet<Cp>,
        confused: HashSet<Cp>,
        groups: &[Arc<Group>],
        interner: &mut ComplementInterner,
    ) -> Self
    {
        let mut cps: Vec<Cp> = valid.iter().chain(confused.iter()).copied().collect();
        cps.sort_unstable();
        cps.dedup();

        let mut extents: Vec<Extent> = vec![];

        for cp in cps {
            let mut extent = Extent {
                cps: vec![cp],
                groups: groups
                    .iter()
                    .filter(|g| g.contains(cp))
                    .filter_map(|g| g.index())
                    .collect(),
            };

            // кодпоинт может связать несколько экстентов - объединяем их
            let (touching, rest): (Vec<Extent>, Vec<Extent>) = extents
                .into_iter()
                .partition(|e| !e.groups.is_disjoint(&extent.groups));

            for e in touching {
                extent.cps.extend(e.cps);
                extent.groups.extend(e.groups);
            }

            extents = rest;
            extents.push(extent);
        }

        let covered: BTreeSet<usize> = extents
            .iter()
            .flat_map(|e| e.groups.iter().copied())
            .collect();
        let mut complements = HashMap::new();

        for extent in extents {
            let complement = covered.difference(&extent.groups).copied().collect();
            let complement = interner.intern(complement);

            for cp in extent.cps {
                complements.insert(cp, complement.clone());
            }
        }

        Self::Confusable(Arc::new(Confusable {
            valid,
            confused,
            complements,
        }))
    }
}

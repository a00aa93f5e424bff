use std::collections::HashSet;
use std::fmt;

use crate::codepoint::Cp;

/// вид группы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind
{
    /// синтетическая группа ASCII-меток
    Ascii,
    /// синтетическая группа меток только из emoji
    Emoji,
    Unrestricted,
    Restricted,
}

/// группа письменности
#[derive(Clone, PartialEq, Eq)]
pub struct Group
{
    name: String,
    kind: GroupKind,
    /// позиция в списке групп (приоритет), у синтетических групп - нет
    index: Option<usize>,
    /// последовательности NSM не проверяются
    cm_whitelisted: bool,
    primary: HashSet<Cp>,
    secondary: HashSet<Cp>,
}

impl Group
{
    pub fn new(
        index: Option<usize>,
        kind: GroupKind,
        name: String,
        primary: HashSet<Cp>,
        secondary: HashSet<Cp>,
        cm_whitelisted: bool,
    ) -> Self
    {
        Self {
            name,
            kind,
            index,
            cm_whitelisted,
            primary,
            secondary,
        }
    }

    pub fn name(&self) -> &str
    {
        &self.name
    }

    pub fn kind(&self) -> GroupKind
    {
        self.kind
    }

    pub fn index(&self) -> Option<usize>
    {
        self.index
    }

    pub fn is_cm_whitelisted(&self) -> bool
    {
        self.cm_whitelisted
    }

    pub fn primary(&self) -> &HashSet<Cp>
    {
        &self.primary
    }

    pub fn secondary(&self) -> &HashSet<Cp>
    {
        &self.secondary
    }

    /// кодпоинт входит в основной или дополнительный набор
    #[inline]
    pub fn contains(&self, cp: Cp) -> bool
    {
        self.primary.contains(&cp) || self.secondary.contains(&cp)
    }
}

impl fmt::Display for Group
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.kind {
            GroupKind::Restricted => write!(f, "Restricted[{}]", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

// наборы кодпоинтов в отладочном выводе не нужны
impl fmt::Debug for Group
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("index", &self.index)
            .field("cm_whitelisted", &self.cm_whitelisted)
            .finish()
    }
}

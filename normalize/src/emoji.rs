use std::collections::HashMap;
use std::fmt;

use crate::codepoint::Cp;
use crate::codepoint::FE0F;
use crate::codepoint::ZWJ;
use crate::error::TableError;

/// последовательность emoji
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmojiSequence
{
    /// как в таблице, может содержать FE0F
    beautified: Vec<Cp>,
    /// без FE0F
    normalized: Vec<Cp>,
}

impl EmojiSequence
{
    pub fn new(beautified: Vec<Cp>) -> Result<Self, TableError>
    {
        if let Some(&cp) = beautified.iter().find(|&&cp| char::from_u32(cp).is_none()) {
            return Err(TableError::Unrepresentable(cp));
        }

        let normalized = match beautified.contains(&FE0F) {
            true => beautified.iter().copied().filter(|&cp| cp != FE0F).collect(),
            false => beautified.clone(),
        };

        Ok(Self {
            beautified,
            normalized,
        })
    }

    pub fn beautified(&self) -> &[Cp]
    {
        &self.beautified
    }

    pub fn normalized(&self) -> &[Cp]
    {
        &self.normalized
    }

    pub fn beautified_form(&self) -> String
    {
        to_string(&self.beautified)
    }

    pub fn normalized_form(&self) -> String
    {
        to_string(&self.normalized)
    }

    /// в нормализованной форме селекторы варианта удалены
    pub fn is_mangled(&self) -> bool
    {
        self.normalized.len() < self.beautified.len()
    }

    pub fn has_zwj(&self) -> bool
    {
        self.normalized.contains(&ZWJ)
    }
}

impl fmt::Display for EmojiSequence
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.beautified_form())
    }
}

/// кодпоинты проверены при создании последовательности
fn to_string(cps: &[Cp]) -> String
{
    cps.iter().filter_map(|&cp| char::from_u32(cp)).collect()
}

/// узел префиксного дерева
#[derive(Default)]
struct EmojiNode
{
    /// индекс последовательности, заканчивающейся в этом узле
    emoji: Option<usize>,
    children: HashMap<Cp, usize>,
}

/// префиксное дерево последовательностей emoji.
///
/// FE0F в последовательности необязателен: на нём путь разветвляется - одна ветвь его
/// содержит, другая пропускает, и конец последовательности отмечается во всех ветвях
pub struct EmojiTrie
{
    /// узлы, корень - первый
    nodes: Vec<EmojiNode>,
    emojis: Vec<EmojiSequence>,
}

impl EmojiTrie
{
    pub fn new(emojis: Vec<EmojiSequence>) -> Self
    {
        let mut trie = Self {
            nodes: vec![EmojiNode::default()],
            emojis: vec![],
        };

        for (index, emoji) in emojis.iter().enumerate() {
            let mut branches = vec![0];

            for &cp in emoji.beautified() {
                match cp == FE0F {
                    true => {
                        let forked: Vec<usize> =
                            branches.iter().map(|&node| trie.then(node, cp)).collect();

                        branches.extend(forked);
                    }
                    false => {
                        for node in branches.iter_mut() {
                            *node = trie.then(*node, cp);
                        }
                    }
                }
            }

            for node in branches {
                trie.nodes[node].emoji = Some(index);
            }
        }

        trie.emojis = emojis;
        trie
    }

    /// дочерний узел, создаётся при необходимости
    fn then(&mut self, node: usize, cp: Cp) -> usize
    {
        if let Some(&child) = self.nodes[node].children.get(&cp) {
            return child;
        }

        let child = self.nodes.len();

        self.nodes.push(EmojiNode::default());
        self.nodes[node].children.insert(cp, child);

        child
    }

    pub fn emojis(&self) -> &[EmojiSequence]
    {
        &self.emojis
    }

    /// самая длинная последовательность, начинающаяся с позиции start,
    /// и позиция следующего за ней кодпоинта
    pub fn find(&self, cps: &[Cp], start: usize) -> Option<(&EmojiSequence, usize)>
    {
        let mut found = None;
        let mut node = 0;

        for (i, cp) in cps.iter().enumerate().skip(start) {
            node = match self.nodes[node].children.get(cp) {
                Some(&child) => child,
                None => break,
            };

            if let Some(emoji) = self.nodes[node].emoji {
                found = Some((&self.emojis[emoji], i + 1));
            }
        }

        found
    }
}

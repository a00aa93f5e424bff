use std::collections::BTreeSet;
use std::collections::HashSet;
use std::sync::Arc;

use super::Ensip15;

use crate::codepoint::is_ascii;
use crate::codepoint::Cp;
use crate::codepoint::HYPHEN;
use crate::codepoint::UNDERSCORE;
use crate::error::NormError;
use crate::group::Group;
use crate::token::OutputToken;
use crate::whole::Whole;

impl Ensip15
{
    /// проверить нормализованную метку и определить её группу.
    /// norm - склеенные токены, первая найденная ошибка возвращается сразу
    pub fn check_valid_label(
        &self,
        norm: &[Cp],
        tokens: &[OutputToken],
    ) -> Result<Arc<Group>, NormError>
    {
        if norm.is_empty() {
            return Err(NormError::EmptyLabel);
        }

        check_leading_underscore(norm)?;

        let emoji = tokens.len() > 1 || tokens.first().map_or(false, |t| t.is_emoji());

        if !emoji && norm.iter().all(|&cp| is_ascii(cp)) {
            self.check_label_extension(norm)?;
            return Ok(self.ascii.clone());
        }

        let chars: Vec<Cp> = tokens
            .iter()
            .filter_map(|t| t.text())
            .flatten()
            .copied()
            .collect();

        if emoji && chars.is_empty() {
            return Ok(self.emoji.clone());
        }

        self.check_combining_marks(tokens)?;
        self.check_fenced(norm)?;

        // различные кодпоинты в порядке появления
        let mut seen = HashSet::new();
        let unique: Vec<Cp> = chars.iter().copied().filter(|&cp| seen.insert(cp)).collect();

        let group = self.determine_group(&unique)?;

        self.check_group(&group, &chars)?;
        self.check_whole(&group, &unique)?;

        Ok(group)
    }

    /// ??--
    fn check_label_extension(&self, cps: &[Cp]) -> Result<(), NormError>
    {
        if cps.len() >= 4 && cps[2] == HYPHEN && cps[3] == HYPHEN {
            return Err(NormError::InvalidLabelExtension(self.safe_implode(&cps[.. 4])));
        }

        Ok(())
    }

    /// текст не может начинаться с комбинируемого знака ни в начале метки, ни после emoji
    fn check_combining_marks(&self, tokens: &[OutputToken]) -> Result<(), NormError>
    {
        for (i, token) in tokens.iter().enumerate() {
            let cp = match token.text().and_then(|text| text.first()) {
                Some(&cp) => cp,
                None => continue,
            };

            if !self.combining_marks.contains(&cp) {
                continue;
            }

            if i == 0 {
                return Err(NormError::LeadingCombiningMark(self.safe_codepoint(cp)));
            }

            if let OutputToken::Emoji(emoji) = tokens[i - 1] {
                return Err(NormError::CombiningMarkAfterEmoji {
                    emoji: emoji.clone(),
                    what: self.safe_codepoint(cp),
                });
            }
        }

        Ok(())
    }

    /// fenced-символы: не в начале, не в конце и не подряд
    fn check_fenced(&self, cps: &[Cp]) -> Result<(), NormError>
    {
        let first = match cps.first() {
            Some(first) => first,
            None => return Ok(()),
        };

        if let Some(name) = self.fenced.get(first) {
            return Err(NormError::LeadingFenced(name.clone()));
        }

        // позиция сразу за последним fenced
        let mut last = None;
        let mut prev = "";

        for (i, cp) in cps.iter().enumerate().skip(1) {
            if let Some(name) = self.fenced.get(cp) {
                if last == Some(i) {
                    return Err(NormError::AdjacentFenced {
                        left: prev.to_owned(),
                        right: name.clone(),
                    });
                }

                last = Some(i + 1);
                prev = name;
            }
        }

        if last == Some(cps.len()) {
            return Err(NormError::TrailingFenced(prev.to_owned()));
        }

        Ok(())
    }

    /// сужение списка групп: остаются содержащие все кодпоинты, приоритет - порядок списка
    fn determine_group(&self, unique: &[Cp]) -> Result<Arc<Group>, NormError>
    {
        let mut groups: Vec<&Arc<Group>> = self.groups.iter().collect();

        // метка не пуста: первый же кодпоинт либо сужает список, либо дает ошибку
        for &cp in unique {
            let next: Vec<&Arc<Group>> =
                groups.iter().copied().filter(|g| g.contains(cp)).collect();

            if next.is_empty() {
                // кодпоинт собран из допустимых частей, но сам не входит ни в одну группу
                if !self.groups.iter().any(|g| g.contains(cp)) {
                    return Err(NormError::DisallowedCharacter {
                        what: self.safe_codepoint(cp),
                        cp,
                    });
                }

                return Err(self.mixture_error(groups[0], cp));
            }

            groups = next;
        }

        Ok(groups[0].clone())
    }

    /// каждый кодпоинт в группе, затем последовательности NSM в NFD
    fn check_group(&self, group: &Arc<Group>, cps: &[Cp]) -> Result<(), NormError>
    {
        if let Some(&cp) = cps.iter().find(|&&cp| !group.contains(cp)) {
            return Err(self.mixture_error(group, cp));
        }

        if group.is_cm_whitelisted() {
            return Ok(());
        }

        let decomposed = self.nf.nfd(cps);
        let nsm = &self.non_spacing_marks;
        let mut i = 0;

        while i < decomposed.len() {
            if !nsm.contains(&decomposed[i]) {
                i += 1;
                continue;
            }

            let mut j = i + 1;

            while j < decomposed.len() && nsm.contains(&decomposed[j]) {
                let cp = decomposed[j];

                if decomposed[i .. j].contains(&cp) {
                    return Err(NormError::DuplicateNonSpacingMark {
                        what: self.safe_codepoint(cp),
                        cp,
                    });
                }

                j += 1;
            }

            let n = j - i;

            if n > self.max_non_spacing_marks {
                // вместе с основой
                let cps = decomposed[i.saturating_sub(1) .. j].to_vec();

                return Err(NormError::ExcessiveNonSpacingMarks {
                    what: format!(
                        "{} ({}/{})",
                        self.safe_implode(&cps),
                        n,
                        self.max_non_spacing_marks
                    ),
                    cps,
                });
            }

            i = j;
        }

        Ok(())
    }

    /// метка целиком может быть записана в другой группе
    fn check_whole(&self, group: &Arc<Group>, unique: &[Cp]) -> Result<(), NormError>
    {
        // кодпоинты вне семейств confusable
        let mut shared = vec![];
        let mut intersection: Option<BTreeSet<usize>> = None;

        for &cp in unique {
            match self.confusables.get(&cp) {
                Some(Whole::Unique) => return Ok(()),
                Some(Whole::Confusable(confusable)) => {
                    let complement = confusable.complement(cp).unwrap_or(&[]);

                    intersection = Some(match intersection {
                        Some(indices) => indices
                            .into_iter()
                            .filter(|i| complement.binary_search(i).is_ok())
                            .collect(),
                        None => complement.iter().copied().collect(),
                    });
                }
                None => shared.push(cp),
            }
        }

        for index in intersection.into_iter().flatten() {
            let other = match self.groups.get(index) {
                Some(other) => other,
                None => continue,
            };

            if shared.iter().all(|&cp| other.contains(cp)) {
                return Err(NormError::WholeScriptConfusable {
                    group: group.clone(),
                    other: other.clone(),
                });
            }
        }

        Ok(())
    }

    /// other - первая группа, в основной набор которой входит кодпоинт
    fn mixture_error(&self, group: &Arc<Group>, cp: Cp) -> NormError
    {
        let mut what = self.safe_codepoint(cp);
        let other = self.groups.iter().find(|g| g.primary().contains(&cp)).cloned();

        if let Some(other) = &other {
            what = format!("{} {}", other.name(), what);
        }

        NormError::IllegalMixture {
            what,
            cp,
            group: group.clone(),
            other,
        }
    }
}

/// подчёркивания допустимы только в начале
fn check_leading_underscore(cps: &[Cp]) -> Result<(), NormError>
{
    let start = cps.iter().take_while(|&&cp| cp == UNDERSCORE).count();

    match cps[start ..].contains(&UNDERSCORE) {
        true => Err(NormError::InvalidUnderscore),
        false => Ok(()),
    }
}

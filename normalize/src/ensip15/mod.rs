use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use tracing::trace;

use crate::codepoint::is_ascii;
use crate::codepoint::join;
use crate::codepoint::split;
use crate::codepoint::Cp;
use crate::codepoint::STOP;
use crate::data::TableSource;
use crate::decoder::Decoder;
use crate::emoji::EmojiSequence;
use crate::emoji::EmojiTrie;
use crate::error::NormError;
use crate::error::TableError;
use crate::group::Group;
use crate::group::GroupKind;
use crate::nf::Nf;
use crate::whole::Whole;

use tokenize::flatten;

mod safe;
mod tokenize;
mod validate;

/// ξ -> Ξ при оформлении греческих меток
const GREEK_XI: (Cp, Cp) = (0x3BE, 0x39E);

/// нормализация имён ENS
pub struct Ensip15
{
    nf: Nf,
    /// кодпоинты, которые в сообщениях выводятся как {HEX}
    should_escape: HashSet<Cp>,
    ignored: HashSet<Cp>,
    combining_marks: HashSet<Cp>,
    max_non_spacing_marks: usize,
    non_spacing_marks: HashSet<Cp>,
    nfc_check: HashSet<Cp>,
    /// кодпоинт -> название
    fenced: HashMap<Cp, String>,
    mapped: HashMap<Cp, Vec<Cp>>,
    groups: Vec<Arc<Group>>,
    emojis: EmojiTrie,
    wholes: Vec<Whole>,
    /// кодпоинт -> семейство; кодпоинтов нескольких групп здесь нет
    confusables: HashMap<Cp, Whole>,
    /// все кодпоинты групп, их декомпозиции и точка
    possibly_valid: HashSet<Cp>,
    ascii: Arc<Group>,
    emoji: Arc<Group>,
    greek: Arc<Group>,
}

impl Ensip15
{
    /// таблицы в порядке хранения: экранируемые, игнорируемые, комбинируемые знаки,
    /// ограничение и набор NSM, NFC check, fenced, замены, группы, emoji, семейства confusable
    pub fn new(nf: Nf, decoder: &mut Decoder) -> Result<Self, TableError>
    {
        let should_escape = decoder.read_set()?;
        let ignored = decoder.read_set()?;
        let combining_marks = decoder.read_set()?;
        let max_non_spacing_marks = decoder.read_unsigned()? as usize;
        let non_spacing_marks = decoder.read_set()?;
        let nfc_check = decoder.read_set()?;
        let fenced = decoder.read_named()?;
        let mapped = decoder.read_mapped()?;
        let groups = decoder.read_groups()?;

        let emojis = decoder
            .read_tree(|path| EmojiSequence::new(path.to_vec()))?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let wholes = decoder.read_wholes(&groups)?;

        let emojis = EmojiTrie::new(emojis);

        // кодпоинты всех групп и встречающиеся в нескольких группах
        let mut union = HashSet::new();
        let mut multi = HashSet::new();

        for group in groups.iter() {
            for &cp in group.primary().iter().chain(group.secondary()) {
                if !union.insert(cp) {
                    multi.insert(cp);
                }
            }
        }

        let mut confusables = HashMap::new();

        for whole in wholes.iter() {
            if let Whole::Confusable(confusable) = whole {
                for &cp in confusable.confused() {
                    confusables.insert(cp, whole.clone());
                }
            }
        }

        for &cp in union.iter() {
            if !multi.contains(&cp) && !confusables.contains_key(&cp) {
                confusables.insert(cp, Whole::Unique);
            }
        }

        let mut sorted: Vec<Cp> = union.iter().copied().collect();
        sorted.sort_unstable();

        let mut possibly_valid = union;
        possibly_valid.extend(nf.nfd(&sorted));

        let ascii = Arc::new(Group::new(
            None,
            GroupKind::Ascii,
            "ASCII".to_owned(),
            possibly_valid.iter().copied().filter(|&cp| is_ascii(cp)).collect(),
            HashSet::new(),
            false,
        ));

        let emoji = Arc::new(Group::new(
            None,
            GroupKind::Emoji,
            "Emoji".to_owned(),
            HashSet::new(),
            HashSet::new(),
            false,
        ));

        let greek = groups
            .iter()
            .find(|g| g.name() == "Greek")
            .cloned()
            .ok_or(TableError::MissingGroup("Greek"))?;

        possibly_valid.insert(STOP);

        debug!(
            unicode = nf.unicode_version(),
            groups = groups.len(),
            emojis = emojis.emojis().len(),
            wholes = wholes.len(),
            mapped = mapped.len(),
            "ENSIP-15 tables loaded"
        );

        Ok(Self {
            nf,
            should_escape,
            ignored,
            combining_marks,
            max_non_spacing_marks,
            non_spacing_marks,
            nfc_check,
            fenced,
            mapped,
            groups,
            emojis,
            wholes,
            confusables,
            possibly_valid,
            ascii,
            emoji,
            greek,
        })
    }

    /// содержимое spec.bin и nf.bin
    pub fn from_bytes(spec: &[u8], nf: &[u8]) -> Result<Self, TableError>
    {
        let nf = Nf::from_bytes(nf)?;

        Self::new(nf, &mut Decoder::new(spec))
    }

    pub fn load(source: &TableSource) -> Result<Self, TableError>
    {
        let (spec, nf) = source.read()?;

        debug!(spec = %source.spec.display(), nf = %source.nf.display(), "reading tables");

        Self::from_bytes(&spec, &nf)
    }

    /// нормализованное имя
    pub fn normalize(&self, cps: &[Cp]) -> Result<Vec<Cp>, NormError>
    {
        self.transform(cps, false)
    }

    /// нормализованное имя в форме для отображения
    pub fn beautify(&self, cps: &[Cp]) -> Result<Vec<Cp>, NormError>
    {
        self.transform(cps, true)
    }

    /// токенизация без проверки меток
    pub fn normalize_fragment(&self, cps: &[Cp], decompose: bool) -> Result<Vec<Cp>, NormError>
    {
        Ok(flatten(&self.output_tokenize(cps, decompose)?, false))
    }

    fn transform(&self, cps: &[Cp], beautify: bool) -> Result<Vec<Cp>, NormError>
    {
        let labels = split(cps)
            .into_iter()
            .map(|label| self.apply(label, beautify))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(join(labels))
    }

    /// токенизация, проверка и (если нужно) оформление одной метки
    fn apply(&self, label: &[Cp], beautify: bool) -> Result<Vec<Cp>, NormError>
    {
        let rejected = |error: NormError| {
            trace!(%error, "label rejected");
            error
        };

        let tokens = self.output_tokenize(label, false).map_err(rejected)?;
        let mut norm = flatten(&tokens, beautify);
        let group = self.check_valid_label(&norm, &tokens).map_err(rejected)?;

        if beautify && Arc::ptr_eq(&group, &self.greek) {
            for cp in norm.iter_mut() {
                if *cp == GREEK_XI.0 {
                    *cp = GREEK_XI.1;
                }
            }
        }

        Ok(norm)
    }

    pub fn nf(&self) -> &Nf
    {
        &self.nf
    }

    pub fn should_escape(&self) -> &HashSet<Cp>
    {
        &self.should_escape
    }

    pub fn ignored(&self) -> &HashSet<Cp>
    {
        &self.ignored
    }

    pub fn combining_marks(&self) -> &HashSet<Cp>
    {
        &self.combining_marks
    }

    pub fn max_non_spacing_marks(&self) -> usize
    {
        self.max_non_spacing_marks
    }

    pub fn non_spacing_marks(&self) -> &HashSet<Cp>
    {
        &self.non_spacing_marks
    }

    pub fn nfc_check(&self) -> &HashSet<Cp>
    {
        &self.nfc_check
    }

    pub fn fenced(&self) -> &HashMap<Cp, String>
    {
        &self.fenced
    }

    pub fn mapped(&self) -> &HashMap<Cp, Vec<Cp>>
    {
        &self.mapped
    }

    /// группы в порядке приоритета
    pub fn groups(&self) -> &[Arc<Group>]
    {
        &self.groups
    }

    pub fn emojis(&self) -> &[EmojiSequence]
    {
        self.emojis.emojis()
    }

    pub fn wholes(&self) -> &[Whole]
    {
        &self.wholes
    }

    pub fn confusables(&self) -> &HashMap<Cp, Whole>
    {
        &self.confusables
    }

    pub fn is_possibly_valid(&self, cp: Cp) -> bool
    {
        self.possibly_valid.contains(&cp)
    }

    pub fn ascii_group(&self) -> &Arc<Group>
    {
        &self.ascii
    }

    pub fn emoji_group(&self) -> &Arc<Group>
    {
        &self.emoji
    }

    pub fn greek_group(&self) -> &Arc<Group>
    {
        &self.greek
    }

    /// самая длинная последовательность emoji с позиции start и позиция за ней
    pub fn find_emoji(&self, cps: &[Cp], start: usize) -> Option<(&EmojiSequence, usize)>
    {
        self.emojis.find(cps, start)
    }
}

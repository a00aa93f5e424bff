#[macro_use]
extern crate lazy_static;

pub mod codepoint;
pub mod decoder;
pub mod emoji;
pub mod error;
pub mod group;
pub mod nf;
pub mod token;
pub mod whole;

mod data;
mod ensip15;

pub use codepoint::Cp;
pub use data::data_dir;
pub use data::TableSource;
pub use data::DATA_DIR_ENV;
pub use decoder::Decoder;
pub use emoji::EmojiSequence;
pub use ensip15::Ensip15;
pub use error::NormError;
pub use error::TableError;
pub use group::Group;
pub use group::GroupKind;
pub use nf::Nf;
pub use token::OutputToken;
pub use whole::Confusable;
pub use whole::Whole;

use codepoint::explode;
use codepoint::implode;

lazy_static! {
    /// общий экземпляр, таблицы читаются при первом обращении
    static ref SHARED: Result<Ensip15, TableError> = Ensip15::load(&TableSource::from_env());
}

/// общий экземпляр или ошибка загрузки его таблиц
pub fn try_shared() -> Result<&'static Ensip15, &'static TableError>
{
    match &*SHARED {
        Ok(ensip15) => Ok(ensip15),
        Err(error) => Err(error),
    }
}

/// общий экземпляр. без таблиц работа невозможна - паникуем
pub fn shared() -> &'static Ensip15
{
    match try_shared() {
        Ok(ensip15) => ensip15,
        Err(error) => panic!("ENSIP-15 tables unavailable: {}", error),
    }
}

/// нормализовать имя
pub fn normalize(name: &str) -> Result<String, NormError>
{
    implode(&shared().normalize(&explode(name))?)
}

/// нормализовать имя и привести к форме для отображения
pub fn beautify(name: &str) -> Result<String, NormError>
{
    implode(&shared().beautify(&explode(name))?)
}

/// нормализовать фрагмент имени без проверки меток
pub fn normalize_fragment(fragment: &str) -> Result<String, NormError>
{
    implode(&shared().normalize_fragment(&explode(fragment), false)?)
}

use std::path::Path;
use std::path::PathBuf;

use crate::error::TableError;

/// переменная окружения с каталогом таблиц
pub const DATA_DIR_ENV: &str = "ENS_NORMALIZE_DATA";

/// таблицы нормализации
const SPEC_FILE: &str = "spec.bin";
/// таблицы NFC / NFD
const NF_FILE: &str = "nf.bin";

/// каталог из ENS_NORMALIZE_DATA, иначе - data/ в каталоге крейта
pub fn data_dir() -> PathBuf
{
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
    }
}

/// пути к файлам таблиц
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource
{
    pub spec: PathBuf,
    pub nf: PathBuf,
}

impl TableSource
{
    /// таблицы из data_dir()
    pub fn from_env() -> Self
    {
        Self::from_dir(data_dir())
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Self
    {
        let dir = dir.as_ref();

        Self {
            spec: dir.join(SPEC_FILE),
            nf: dir.join(NF_FILE),
        }
    }

    /// оба файла на месте?
    pub fn exists(&self) -> bool
    {
        self.spec.is_file() && self.nf.is_file()
    }

    /// содержимое (spec, nf)
    pub fn read(&self) -> Result<(Vec<u8>, Vec<u8>), TableError>
    {
        Ok((read(&self.spec)?, read(&self.nf)?))
    }
}

fn read(path: &Path) -> Result<Vec<u8>, TableError>
{
    std::fs::read(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

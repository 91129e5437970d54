use std::path::{Path, PathBuf};

/// Binary index blob, owned by `FlatIndex::persist`/`load`
pub const INDEX_FILE_NAME: &str = "index.bin";

/// Ordered chunk records, owned by `RecordStore::persist`/`load`
pub const RECORDS_FILE_NAME: &str = "records.json";

/// Path of the index file inside a corpus directory
#[must_use]
pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE_NAME)
}

/// Path of the records file inside a corpus directory
#[must_use]
pub fn records_path(dir: &Path) -> PathBuf {
    dir.join(RECORDS_FILE_NAME)
}

use serde::{Serialize, Serializer, ser::SerializeMap};
use skybridge_core::{ImportKind, SourceFile};
use std::collections::{HashMap, hash_map::Entry};

/// One reported import together with every file declaring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    /// Display key, e.g. `import a.b` or `from a import b`.
    pub key: String,
    /// Declaring files in discovery order.
    pub files: Vec<SourceFile>,
}

/// Duplicated imports keyed by display string, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    entries: Vec<Duplicate>,
}

impl DuplicateReport {
    pub(crate) fn push(&mut self, duplicate: Duplicate) {
        self.entries.push(duplicate);
    }

    pub fn get(&self, key: &str) -> Option<&[SourceFile]> {
        self.entries.iter().find(|d| d.key == key).map(|d| d.files.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Duplicate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DuplicateReport {
    type Item = &'a Duplicate;
    type IntoIter = std::slice::Iter<'a, Duplicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for DuplicateReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for duplicate in &self.entries {
            map.serialize_entry(&duplicate.key, &duplicate.files)?;
        }
        map.end()
    }
}

/// Identity to declaring files, keeping first-seen order of identities.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdentityMap {
    order: Vec<String>,
    files: HashMap<String, Vec<SourceFile>>,
}

impl IdentityMap {
    /// Files arrive one at a time, so a repeated file can only be the last entry.
    pub(crate) fn add(&mut self, identity: &str, file: &SourceFile) {
        match self.files.entry(identity.to_string()) {
            Entry::Occupied(mut entry) => {
                let files = entry.get_mut();
                if files.last() != Some(file) {
                    files.push(file.clone());
                }
            }
            Entry::Vacant(entry) => {
                self.order.push(identity.to_string());
                entry.insert(vec![file.clone()]);
            }
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[SourceFile])> {
        self.order
            .iter()
            .filter_map(|id| self.files.get(id).map(|files| (id.as_str(), files.as_slice())))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}

/// Every import identity seen during a scan, split by kind.
#[derive(Debug, Clone, Default)]
pub struct ImportIndex {
    pub(crate) direct: IdentityMap,
    pub(crate) from: IdentityMap,
}

impl ImportIndex {
    pub fn add(&mut self, kind: ImportKind, identity: &str, file: &SourceFile) {
        match kind {
            ImportKind::Direct => self.direct.add(identity, file),
            ImportKind::From => self.from.add(identity, file),
        }
    }

    /// Files declaring `identity` with the given kind, in discovery order.
    ///
    /// Not used by the reporters; exposed for callers inspecting the index.
    pub fn files(&self, kind: ImportKind, identity: &str) -> Option<&[SourceFile]> {
        let map = match kind {
            ImportKind::Direct => &self.direct,
            ImportKind::From => &self.from,
        };
        map.files.get(identity).map(Vec::as_slice)
    }

    /// Number of distinct identities across both kinds.
    pub fn len(&self) -> usize {
        self.direct.len() + self.from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    #[serde(rename = "duplicates")]
    pub report: DuplicateReport,
    pub syntax_errors: Vec<SourceFile>,
    pub files_scanned: usize,
}

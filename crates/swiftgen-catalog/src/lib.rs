use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use swiftgen_xcassets::{AssetType, XcassetsError};
use thiserror::Error;

pub mod naming;
mod scanner;

pub use scanner::{scan, ScanOptions};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{} does not exist or is not a directory", .0.display())]
    NotFound(PathBuf),
    #[error("duplicate {kind} name '{name}': {} and {}", .first.display(), .second.display())]
    DuplicateName {
        kind: AssetKind,
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Xcassets(#[from] XcassetsError),
}

/// What a resource resolves to at runtime. Ordering is the order the
/// generated sections appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetKind {
    Image,
    Color,
    Data,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Image, AssetKind::Color, AssetKind::Data];

    /// Classify an asset directory. Only set types that can be looked up by
    /// name are resources; everything else yields `None`.
    pub fn from_asset_type(asset_type: &AssetType) -> Option<Self> {
        match asset_type {
            AssetType::ImageSet | AssetType::SymbolSet => Some(AssetKind::Image),
            AssetType::ColorSet => Some(AssetKind::Color),
            AssetType::DataSet => Some(AssetKind::Data),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Color => "color",
            AssetKind::Data => "data",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single named resource found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Swift identifier for the generated enum case.
    pub logical_name: String,
    /// Name passed to `named:` at runtime, including namespace folders.
    pub asset_name: String,
    /// Set directory, relative to the scan root.
    pub relative_path: PathBuf,
    /// Extension of the set directory (`imageset`, `colorset`, ...).
    pub file_extension: String,
    pub kind: AssetKind,
}

impl ResourceEntry {
    pub fn new(kind: AssetKind, asset_name: String, relative_path: PathBuf) -> Self {
        let file_extension = relative_path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        ResourceEntry {
            logical_name: naming::swift_identifier(&asset_name),
            asset_name,
            relative_path,
            file_extension,
            kind,
        }
    }
}

/// Scan result: per kind, resources keyed and ordered by logical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    sections: BTreeMap<AssetKind, BTreeMap<String, ResourceEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Two entries of the same kind with the same logical
    /// name are an error; the catalog keeps the first one.
    pub fn insert(&mut self, entry: ResourceEntry) -> Result<(), ScanError> {
        let section = self.sections.entry(entry.kind).or_default();
        match section.entry(entry.logical_name.clone()) {
            Entry::Occupied(existing) => Err(ScanError::DuplicateName {
                kind: entry.kind,
                name: entry.logical_name,
                first: existing.get().relative_path.clone(),
                second: entry.relative_path,
            }),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, kind: AssetKind, logical_name: &str) -> Option<&ResourceEntry> {
        self.sections.get(&kind)?.get(logical_name)
    }

    /// Entries of one kind, ordered by logical name.
    pub fn entries(&self, kind: AssetKind) -> impl Iterator<Item = &ResourceEntry> {
        self.sections.get(&kind).into_iter().flat_map(|s| s.values())
    }

    /// All entries, grouped by kind, each group ordered by logical name.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.sections.values().flat_map(|s| s.values())
    }

    /// Kinds with at least one entry, in section order.
    pub fn kinds(&self) -> impl Iterator<Item = AssetKind> + '_ {
        self.sections
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

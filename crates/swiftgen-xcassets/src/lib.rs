use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum XcassetsError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The type of an asset in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetType {
    Catalog,
    Group,
    ImageSet,
    AppIconSet,
    DataSet,
    ColorSet,
    LaunchImage,
    BrandAssets,
    SpriteAtlas,
    ComplicationSet,
    IconSet,
    StickerSequence,
    StickerPack,
    Sticker,
    CubeTextureSet,
    TextureSet,
    ARReferenceObject,
    ARResourceGroup,
    SymbolSet,
    Unknown(String),
}

impl AssetType {
    /// Determine asset type from directory extension. A directory with no
    /// extension is a plain group folder.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "xcassets" => AssetType::Catalog,
            "" | "group" => AssetType::Group,
            "imageset" => AssetType::ImageSet,
            "appiconset" => AssetType::AppIconSet,
            "dataset" => AssetType::DataSet,
            "colorset" => AssetType::ColorSet,
            "launchimage" => AssetType::LaunchImage,
            "brandassets" => AssetType::BrandAssets,
            "spriteatlas" => AssetType::SpriteAtlas,
            "complicationset" => AssetType::ComplicationSet,
            "iconset" => AssetType::IconSet,
            "stickersequence" => AssetType::StickerSequence,
            "stickerpack" => AssetType::StickerPack,
            "sticker" => AssetType::Sticker,
            "cubetextureset" => AssetType::CubeTextureSet,
            "textureset" => AssetType::TextureSet,
            "arreferenceobject" => AssetType::ARReferenceObject,
            "arresourcegroup" => AssetType::ARResourceGroup,
            "symbolset" => AssetType::SymbolSet,
            other => AssetType::Unknown(other.to_string()),
        }
    }

    /// Determine asset type from a directory path.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    /// Whether assets of this type hold further assets.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            AssetType::Catalog
                | AssetType::Group
                | AssetType::BrandAssets
                | AssetType::SpriteAtlas
                | AssetType::ComplicationSet
                | AssetType::StickerPack
                | AssetType::ARResourceGroup
        )
    }
}

/// Contents.json properties section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentsProperties {
    #[serde(rename = "provides-namespace")]
    pub provides_namespace: Option<bool>,
}

/// Parsed Contents.json. Only the keys that affect naming are kept; the
/// rest of the document is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contents {
    pub properties: Option<ContentsProperties>,
}

impl Contents {
    /// Read `dir/Contents.json`. A missing file is `Ok(None)`, and so is a
    /// file that isn't valid JSON (Xcode tolerates those too).
    pub fn load(dir: &Path) -> Result<Option<Contents>, XcassetsError> {
        let path = dir.join("Contents.json");
        if !path.is_file() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).map_err(|source| XcassetsError::Io {
            path: path.clone(),
            source,
        })?;

        match serde_json::from_str::<Contents>(&data) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed Contents.json");
                Ok(None)
            }
        }
    }

    pub fn provides_namespace(&self) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.provides_namespace)
            .unwrap_or(false)
    }
}

/// An asset in the catalog hierarchy.
#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub path: PathBuf,
    pub asset_type: AssetType,
    pub contents: Option<Contents>,
    pub children: Vec<Asset>,
}

impl Asset {
    /// Load an asset catalog or asset directory recursively.
    pub fn load(path: &Path) -> Result<Asset, XcassetsError> {
        if !path.is_dir() {
            return Err(XcassetsError::NotADirectory(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::load_as(path, AssetType::from_path(path), name)
    }

    /// Load a directory with an unrecognised extension as a plain group,
    /// keeping the whole directory name (`v2.0`, not `v2`).
    fn load_group(path: &Path) -> Result<Asset, XcassetsError> {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::load_as(path, AssetType::Group, name)
    }

    fn load_as(path: &Path, asset_type: AssetType, name: String) -> Result<Asset, XcassetsError> {
        let contents = Contents::load(path)?;

        let children = if asset_type.is_container() {
            load_children(path)?
        } else {
            Vec::new()
        };

        Ok(Asset {
            name,
            path: path.to_path_buf(),
            asset_type,
            contents,
            children,
        })
    }

    pub fn provides_namespace(&self) -> bool {
        self.contents
            .as_ref()
            .map(Contents::provides_namespace)
            .unwrap_or(false)
    }

    /// Walk the tree depth-first in child order. The callback receives each
    /// asset together with the namespace prefix (`"Folder/"`, possibly
    /// nested) contributed by its enclosing namespace folders.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&Asset, &str),
    {
        self.visit_in("", f);
    }

    fn visit_in<F>(&self, namespace: &str, f: &mut F)
    where
        F: FnMut(&Asset, &str),
    {
        f(self, namespace);

        if self.children.is_empty() {
            return;
        }

        let inner = if self.asset_type != AssetType::Catalog && self.provides_namespace() {
            format!("{namespace}{}/", self.name)
        } else {
            namespace.to_string()
        };

        for child in &self.children {
            child.visit_in(&inner, f);
        }
    }
}

fn load_children(dir: &Path) -> Result<Vec<Asset>, XcassetsError> {
    let io_err = |source: std::io::Error| XcassetsError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|e| e.file_name());

    let mut children = Vec::new();
    for entry in entries {
        // file_type() doesn't follow symlinks
        let file_type = entry.file_type().map_err(io_err)?;
        if entry.file_name().to_string_lossy().starts_with('.') || !file_type.is_dir() {
            continue;
        }

        // Inside a container any folder that isn't a known set is a group
        let p = entry.path();
        let child = match AssetType::from_path(&p) {
            AssetType::Unknown(_) => Asset::load_group(&p)?,
            _ => Asset::load(&p)?,
        };
        children.push(child);
    }
    Ok(children)
}

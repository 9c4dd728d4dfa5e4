use crate::{AssetKind, Catalog, ResourceEntry, ScanError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use swiftgen_xcassets::{Asset, AssetType};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Controls which resources a scan collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub kinds: BTreeSet<AssetKind>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            kinds: AssetKind::ALL.into_iter().collect(),
        }
    }
}

impl ScanOptions {
    pub fn with_kinds<I: IntoIterator<Item = AssetKind>>(kinds: I) -> Self {
        ScanOptions {
            kinds: kinds.into_iter().collect(),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Scan `root` for asset sets and build a catalog.
///
/// `*.xcassets` catalogs are loaded as a whole so that namespace folders
/// inside them prefix asset names. Set directories found outside a
/// catalog are named by their stem. Entries are visited in file-name
/// order, so the result doesn't depend on the file system's listing order.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Catalog, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }

    let mut catalog = Catalog::new();
    if AssetType::from_path(root) == AssetType::Catalog {
        add_catalog(&mut catalog, options, root, root)?;
        info!(root = %root.display(), assets = catalog.len(), "scan complete");
        return Ok(catalog);
    }

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let asset_type = AssetType::from_path(path);

        if asset_type == AssetType::Catalog {
            walker.skip_current_dir();
            add_catalog(&mut catalog, options, root, path)?;
        } else if let Some(kind) = AssetKind::from_asset_type(&asset_type) {
            walker.skip_current_dir();
            let asset_name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            add(&mut catalog, options, kind, asset_name, relative_to(root, path))?;
        }
    }

    info!(root = %root.display(), assets = catalog.len(), "scan complete");
    Ok(catalog)
}

/// Load an `.xcassets` directory and add every set in it, named with the
/// namespaces declared along the way.
fn add_catalog(
    catalog: &mut Catalog,
    options: &ScanOptions,
    root: &Path,
    path: &Path,
) -> Result<(), ScanError> {
    debug!(catalog = %path.display(), "loading asset catalog");

    let asset = Asset::load(path)?;
    let mut found = Vec::new();
    asset.visit(&mut |a, namespace| {
        if let Some(kind) = AssetKind::from_asset_type(&a.asset_type) {
            found.push((kind, format!("{namespace}{}", a.name), a.path.clone()));
        }
    });

    for (kind, asset_name, set_path) in found {
        add(catalog, options, kind, asset_name, relative_to(root, &set_path))?;
    }
    Ok(())
}

fn add(
    catalog: &mut Catalog,
    options: &ScanOptions,
    kind: AssetKind,
    asset_name: String,
    relative_path: PathBuf,
) -> Result<(), ScanError> {
    if !options.kinds.contains(&kind) {
        return Ok(());
    }
    let entry = ResourceEntry::new(kind, asset_name, relative_path);
    debug!(
        kind = %entry.kind,
        name = %entry.logical_name,
        path = %entry.relative_path.display(),
        "found asset"
    );
    catalog.insert(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn mkdir(root: &Path, rel: &str) {
        fs::create_dir_all(root.join(rel)).unwrap();
    }

    fn namespace(root: &Path, rel: &str) {
        mkdir(root, rel);
        fs::write(
            root.join(rel).join("Contents.json"),
            r#"{"info": {"version": 1, "author": "xcode"}, "properties": {"provides-namespace": true}}"#,
        )
        .unwrap();
    }

    fn names(catalog: &Catalog, kind: AssetKind) -> Vec<(String, String)> {
        catalog
            .entries(kind)
            .map(|e| (e.logical_name.clone(), e.asset_name.clone()))
            .collect()
    }

    #[test]
    fn test_missing_root() {
        let temp = tempfile::tempdir().unwrap();
        let err = scan(&temp.path().join("missing"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = scan(&file, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(p) if p == file));
    }

    #[test]
    fn test_empty_directory() {
        let temp = tempfile::tempdir().unwrap();
        let catalog = scan(temp.path(), &ScanOptions::default()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_scan_catalog_with_namespaces() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        mkdir(root, "App/Assets.xcassets/Banana.imageset");
        mkdir(root, "App/Assets.xcassets/Green-Apple.imageset");
        mkdir(root, "App/Assets.xcassets/Folder/Cherry.imageset");
        namespace(root, "App/Assets.xcassets/Icons");
        mkdir(root, "App/Assets.xcassets/Icons/close.imageset");
        mkdir(root, "App/Assets.xcassets/Icons/Brand.colorset");
        mkdir(root, "App/Assets.xcassets/Sounds/ping.dataset");
        mkdir(root, "App/Assets.xcassets/AppIcon.appiconset");

        let catalog = scan(root, &ScanOptions::default()).unwrap();

        assert_eq!(
            names(&catalog, AssetKind::Image),
            vec![
                ("Banana".to_string(), "Banana".to_string()),
                ("Cherry".to_string(), "Cherry".to_string()),
                ("GreenApple".to_string(), "Green-Apple".to_string()),
                ("IconsClose".to_string(), "Icons/close".to_string()),
            ]
        );
        assert_eq!(
            names(&catalog, AssetKind::Color),
            vec![("IconsBrand".to_string(), "Icons/Brand".to_string())]
        );
        assert_eq!(
            names(&catalog, AssetKind::Data),
            vec![("Ping".to_string(), "ping".to_string())]
        );

        let close = catalog.get(AssetKind::Image, "IconsClose").unwrap();
        assert_eq!(
            close.relative_path,
            PathBuf::from("App/Assets.xcassets/Icons/close.imageset")
        );
    }

    #[test]
    fn test_loose_sets_and_hidden_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        mkdir(root, "Resources/logo.imageset");
        mkdir(root, "Resources/logo.imageset/nested.imageset");
        mkdir(root, ".git/objects/stale.imageset");
        mkdir(root, "Symbols/star.fill.symbolset");

        let catalog = scan(root, &ScanOptions::default()).unwrap();
        assert_eq!(
            names(&catalog, AssetKind::Image),
            vec![
                ("Logo".to_string(), "logo".to_string()),
                ("StarFill".to_string(), "star.fill".to_string()),
            ]
        );
        let logo = catalog.get(AssetKind::Image, "Logo").unwrap();
        assert_eq!(logo.relative_path, PathBuf::from("Resources/logo.imageset"));
    }

    #[test]
    fn test_root_is_catalog() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("Assets.xcassets");
        namespace(&root, "Icons");
        mkdir(&root, "Icons/close.imageset");
        namespace(&root, "Toolbar");
        mkdir(&root, "Toolbar/close.imageset");
        mkdir(&root, "v2.0/logo.imageset");

        let catalog = scan(&root, &ScanOptions::default()).unwrap();
        assert_eq!(
            names(&catalog, AssetKind::Image),
            vec![
                ("IconsClose".to_string(), "Icons/close".to_string()),
                ("Logo".to_string(), "logo".to_string()),
                ("ToolbarClose".to_string(), "Toolbar/close".to_string()),
            ]
        );
        let close = catalog.get(AssetKind::Image, "IconsClose").unwrap();
        assert_eq!(close.relative_path, PathBuf::from("Icons/close.imageset"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("project");
        mkdir(temp.path(), "elsewhere/Shared/remote.imageset");
        mkdir(temp.path(), "elsewhere/linked.imageset");
        mkdir(&root, "Assets.xcassets/local.imageset");
        std::os::unix::fs::symlink(
            temp.path().join("elsewhere/Shared"),
            root.join("Shared"),
        )
        .unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("elsewhere/linked.imageset"),
            root.join("Assets.xcassets/linked.imageset"),
        )
        .unwrap();

        let catalog = scan(&root, &ScanOptions::default()).unwrap();
        assert_eq!(
            names(&catalog, AssetKind::Image),
            vec![("Local".to_string(), "local".to_string())]
        );
    }

    #[test]
    fn test_kind_filter() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        mkdir(root, "Assets.xcassets/Logo.imageset");
        mkdir(root, "Assets.xcassets/Tint.colorset");

        let catalog = scan(root, &ScanOptions::with_kinds([AssetKind::Color])).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(AssetKind::Color, "Tint").is_some());
    }

    #[test]
    fn test_duplicate_names_across_catalogs() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        mkdir(root, "A.xcassets/green-apple.imageset");
        mkdir(root, "B.xcassets/Green Apple.imageset");

        let err = scan(root, &ScanOptions::default()).unwrap_err();
        match err {
            ScanError::DuplicateName {
                name,
                first,
                second,
                ..
            } => {
                assert_eq!(name, "GreenApple");
                assert_eq!(first, PathBuf::from("A.xcassets/green-apple.imageset"));
                assert_eq!(second, PathBuf::from("B.xcassets/Green Apple.imageset"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filtered_kinds_do_not_collide() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        mkdir(root, "A.xcassets/red.colorset");
        mkdir(root, "B.xcassets/Red.colorset");
        mkdir(root, "B.xcassets/Red.imageset");

        let catalog = scan(root, &ScanOptions::with_kinds([AssetKind::Image])).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        for name in ["delta", "alpha", "charlie", "bravo"] {
            mkdir(root, &format!("Assets.xcassets/{name}.imageset"));
        }

        let first = scan(root, &ScanOptions::default()).unwrap();
        let second = scan(root, &ScanOptions::default()).unwrap();
        assert_eq!(first, second);

        let order: Vec<_> = first.iter().map(|e| e.logical_name.as_str()).collect();
        assert_eq!(order, vec!["Alpha", "Bravo", "Charlie", "Delta"]);
    }
}

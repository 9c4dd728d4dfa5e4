use swiftgen_catalog::naming::is_plain_identifier;
use swiftgen_catalog::{AssetKind, Catalog, ResourceEntry};
use thiserror::Error;

const HEADER: &str = "// Generated by swiftgen-assets. Do not edit.";
const INDENT: &str = "  ";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no assets found")]
    EmptyCatalog,
    #[error("'{0}' is not a valid Swift type name")]
    InvalidEnumName(String),
}

/// UI framework the generated accessors target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// iOS, tvOS and watchOS.
    #[default]
    UIKit,
    /// macOS.
    AppKit,
}

impl Platform {
    pub fn module(&self) -> &'static str {
        match self {
            Platform::UIKit => "UIKit",
            Platform::AppKit => "AppKit",
        }
    }

    fn class_for(&self, kind: AssetKind) -> &'static str {
        match (self, kind) {
            (Platform::UIKit, AssetKind::Image) => "UIImage",
            (Platform::UIKit, AssetKind::Color) => "UIColor",
            (Platform::AppKit, AssetKind::Image) => "NSImage",
            (Platform::AppKit, AssetKind::Color) => "NSColor",
            (_, AssetKind::Data) => "NSDataAsset",
        }
    }
}

/// Options for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub enum_name: String,
    pub platform: Platform,
    /// Fail instead of emitting an empty accessor surface.
    pub require_nonempty: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            enum_name: "Asset".to_string(),
            platform: Platform::UIKit,
            require_nonempty: false,
        }
    }
}

/// How one kind of asset is exposed: the extended class, the accessor
/// property on the enum and the initializer that looks the asset up.
struct Section {
    class_name: &'static str,
    property: &'static str,
    property_type: &'static str,
    /// Appended to `Class(asset: self)` in the property body.
    projection: &'static str,
    init_label: &'static str,
}

impl Section {
    fn new(platform: Platform, kind: AssetKind) -> Self {
        let class_name = platform.class_for(kind);
        match kind {
            AssetKind::Image => Section {
                class_name,
                property: "image",
                property_type: class_name,
                projection: "",
                init_label: "named",
            },
            AssetKind::Color => Section {
                class_name,
                property: "color",
                property_type: class_name,
                projection: "",
                init_label: "named",
            },
            AssetKind::Data => Section {
                class_name,
                property: "data",
                property_type: "Data",
                projection: ".data",
                init_label: "name",
            },
        }
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    if !text.is_empty() {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        out.push_str(text);
    }
    out.push('\n');
}

/// Escape a string for use inside a Swift string literal.
pub fn swift_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_section<'a, I>(out: &mut String, section: &Section, enum_name: &str, entries: I)
where
    I: IntoIterator<Item = &'a ResourceEntry>,
{
    push_line(out, 0, &format!("extension {} {{", section.class_name));
    push_line(out, 1, &format!("enum {enum_name}: String {{"));
    for entry in entries {
        push_line(
            out,
            2,
            &format!(
                "case {} = {}",
                entry.logical_name,
                swift_string_literal(&entry.asset_name)
            ),
        );
    }
    push_line(out, 0, "");
    push_line(
        out,
        2,
        &format!("var {}: {} {{", section.property, section.property_type),
    );
    push_line(
        out,
        3,
        &format!(
            "return {}(asset: self){}",
            section.class_name, section.projection
        ),
    );
    push_line(out, 2, "}");
    push_line(out, 1, "}");
    push_line(out, 0, "");
    push_line(out, 1, &format!("convenience init!(asset: {enum_name}) {{"));
    push_line(
        out,
        2,
        &format!("self.init({}: asset.rawValue)", section.init_label),
    );
    push_line(out, 1, "}");
    push_line(out, 0, "}");
}

/// Render the Swift accessor file for a catalog.
///
/// The output only depends on `catalog` and `options`: sections come in
/// kind order (images, colors, data) and cases in logical-name order. An
/// empty catalog renders a caseless enum inside the image extension, since
/// a raw-value enum needs at least one case.
pub fn generate(catalog: &Catalog, options: &GeneratorOptions) -> Result<String, GenerateError> {
    if !is_plain_identifier(&options.enum_name) {
        return Err(GenerateError::InvalidEnumName(options.enum_name.clone()));
    }
    if catalog.is_empty() && options.require_nonempty {
        return Err(GenerateError::EmptyCatalog);
    }

    let mut out = String::new();
    push_line(&mut out, 0, HEADER);
    push_line(&mut out, 0, "");
    push_line(&mut out, 0, &format!("import {}", options.platform.module()));

    if catalog.is_empty() {
        push_line(&mut out, 0, "");
        push_line(
            &mut out,
            0,
            &format!("extension {} {{", options.platform.class_for(AssetKind::Image)),
        );
        push_line(&mut out, 1, &format!("enum {} {{}}", options.enum_name));
        push_line(&mut out, 0, "}");
        return Ok(out);
    }

    for kind in catalog.kinds() {
        let section = Section::new(options.platform, kind);
        push_line(&mut out, 0, "");
        render_section(&mut out, &section, &options.enum_name, catalog.entries(kind));
    }

    Ok(out)
}

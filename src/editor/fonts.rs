//! Font catalog loading.
//!
//! The style catalog's font families are backed by `.ttf` files in
//! `assets/fonts/` ("Montserrat.ttf", with an optional "Montserrat Bold.ttf"
//! for the bold weight). The same byte buffers back both the egui canvas
//! (registered as named font families) and the export rasterizer, so the
//! editor and the flattened PNG draw from identical glyph sources. Missing
//! files degrade to egui's default proportional font on the canvas and are
//! surfaced as an export error when rasterizing.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::constants::FONT_DIR;
use crate::design::FONT_FAMILIES;

#[derive(Resource, Default)]
pub struct FontLibrary {
    families: HashMap<String, Arc<Vec<u8>>>,
}

impl FontLibrary {
    /// Load every catalog family (and its bold variant) found in `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut families = HashMap::new();
        for family in FONT_FAMILIES {
            for name in [family.to_string(), format!("{} Bold", family)] {
                let path = dir.join(format!("{}.ttf", name));
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        families.insert(name, Arc::new(bytes));
                    }
                    Err(_) if name.ends_with(" Bold") => {}
                    Err(e) => debug!("No font file for {:?}: {}", path, e),
                }
            }
        }
        Self { families }
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<Vec<u8>>)> {
        self.families.iter()
    }

    /// Resolve a family + weight to loaded font bytes. Bold prefers the
    /// "<Family> Bold" face and falls back to the regular face.
    pub fn bytes_for(&self, family: &str, weight: &str) -> Option<Arc<Vec<u8>>> {
        if weight == "bold"
            && let Some(bytes) = self.families.get(&format!("{} Bold", family))
        {
            return Some(bytes.clone());
        }
        self.families.get(family).cloned()
    }

    /// All loaded font bytes keyed by face name, for handing to an export
    /// task off the main thread.
    pub fn snapshot(&self) -> HashMap<String, Arc<Vec<u8>>> {
        self.families.clone()
    }

    /// The egui font family to render this overlay family/weight with.
    /// Families without a loaded file fall back to the default
    /// proportional font so the canvas always renders something.
    pub fn egui_family(&self, family: &str, weight: &str) -> egui::FontFamily {
        let bold = format!("{} Bold", family);
        if weight == "bold" && self.families.contains_key(&bold) {
            return egui::FontFamily::Name(bold.into());
        }
        if self.families.contains_key(family) {
            return egui::FontFamily::Name(family.into());
        }
        egui::FontFamily::Proportional
    }
}

/// Startup system: read the font catalog from disk.
pub fn load_fonts(mut library: ResMut<FontLibrary>) {
    *library = FontLibrary::load(Path::new(FONT_DIR));
    if library.is_empty() {
        warn!(
            "No font files found under {}; canvas falls back to the default font and PNG export will be unavailable",
            FONT_DIR
        );
    } else {
        info!("Loaded {} font face(s) from {}", library.families.len(), FONT_DIR);
    }
}

/// Register the loaded faces with egui once, as named font families.
pub fn install_canvas_fonts(
    mut installed: Local<bool>,
    library: Res<FontLibrary>,
    mut contexts: EguiContexts,
) -> Result {
    if *installed {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    let mut fonts = egui::FontDefinitions::default();
    for (name, bytes) in library.iter() {
        fonts.font_data.insert(
            name.clone(),
            Arc::new(egui::FontData::from_owned(bytes.as_ref().clone())),
        );
        fonts
            .families
            .insert(egui::FontFamily::Name(name.as_str().into()), vec![name.clone()]);
    }
    ctx.set_fonts(fonts);
    *installed = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_library_falls_back_to_proportional() {
        let library = FontLibrary::default();
        assert!(library.is_empty());
        assert_eq!(
            library.egui_family("Montserrat", "bold"),
            egui::FontFamily::Proportional
        );
        assert!(library.bytes_for("Montserrat", "normal").is_none());
    }

    #[test]
    fn test_bold_falls_back_to_regular_face() {
        let mut library = FontLibrary::default();
        library
            .families
            .insert("Georgia".to_string(), Arc::new(vec![1, 2, 3]));

        // No "Georgia Bold" loaded: bold resolves to the regular face
        assert_eq!(
            library.bytes_for("Georgia", "bold").unwrap().as_slice(),
            &[1, 2, 3]
        );
        assert_eq!(
            library.egui_family("Georgia", "bold"),
            egui::FontFamily::Name("Georgia".into())
        );
    }

    #[test]
    fn test_bold_prefers_bold_face() {
        let mut library = FontLibrary::default();
        library
            .families
            .insert("Georgia".to_string(), Arc::new(vec![1]));
        library
            .families
            .insert("Georgia Bold".to_string(), Arc::new(vec![2]));

        assert_eq!(library.bytes_for("Georgia", "bold").unwrap().as_slice(), &[2]);
        assert_eq!(library.bytes_for("Georgia", "normal").unwrap().as_slice(), &[1]);
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let library = FontLibrary::load(Path::new("/nonexistent/fonts"));
        assert!(library.is_empty());
    }
}

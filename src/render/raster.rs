use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{IntroError, IntroResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::svg::{output_size, scene_to_svg};
use crate::scene::model::FrameScene;

/// CPU backend: scene graph → SVG → `usvg` tree → `resvg` pixmap.
pub struct SvgBackend {
    settings: RenderSettings,
    options: usvg::Options<'static>,
}

impl SvgBackend {
    /// Build a backend with its own font database.
    pub fn new(settings: RenderSettings) -> IntroResult<Self> {
        let fontdb = build_fontdb(settings.fonts_dir.as_deref());
        Self::with_fontdb(settings, fontdb)
    }

    /// Build a backend sharing an already loaded font database.
    pub fn with_fontdb(
        settings: RenderSettings,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> IntroResult<Self> {
        if !settings.scale.is_finite() || settings.scale <= 0.0 {
            return Err(IntroError::validation("render scale must be finite and > 0"));
        }
        let options = usvg::Options {
            resources_dir: settings.fonts_dir.clone(),
            fontdb,
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        Ok(Self { settings, options })
    }

    /// Shared font database.
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.options.fontdb.clone()
    }
}

impl std::fmt::Debug for SvgBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgBackend")
            .field("settings", &self.settings)
            .field("fonts", &self.options.fontdb.len())
            .finish()
    }
}

impl RenderBackend for SvgBackend {
    fn render_scene(&mut self, scene: &FrameScene) -> IntroResult<FrameRGBA> {
        let (width, height) = output_size(scene.canvas, self.settings.scale)?;
        let svg = scene_to_svg(scene, self.settings.scale)?;
        let tree = usvg::Tree::from_str(&svg, &self.options).map_err(|e| {
            IntroError::render(format!("parse scene svg for frame {}: {e}", scene.frame.0))
        })?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| IntroError::render("failed to allocate frame pixmap"))?;
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
        }

        let sx = width as f32 / tree.size().width();
        let sy = height as f32 / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

/// System fonts plus `.ttf`/`.otf`/`.ttc` files found in `extra_dir` and its `fonts/` child.
pub fn build_fontdb(extra_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = extra_dir {
        load_fonts_from_dir(&mut db, dir);
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }
    tracing::debug!(faces = db.len(), "font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Resolve the requested families, then generic families, then any face at all, so headless
/// machines without the brand fonts still draw the title.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Monospace);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

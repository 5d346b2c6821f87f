use std::fs;
use std::path::Path;

use anyhow::Context;
use handlebars::Handlebars;
use image::{RgbaImage, imageops};
use serde::Serialize;
use sprite_packer_core::Placement;

use crate::assets::Sprite;
use crate::sheet::SheetConfig;

const CSS_TEMPLATE: &str = include_str!("templates/sprites.css.hbs");
const HTML_TEMPLATE: &str = include_str!("templates/preview.html.hbs");

/// Draws every sprite at its placement on a transparent canvas.
pub fn compose(sprites: &[Sprite], placement: &Placement<usize>) -> RgbaImage {
    let mut canvas = RgbaImage::new(placement.canvas_width, placement.canvas_height);
    for r in placement {
        if let Some(sprite) = sprites.get(r.id) {
            imageops::replace(&mut canvas, &sprite.image, r.x as i64, r.y as i64);
        }
    }
    canvas
}

#[derive(Debug, Serialize)]
struct SpriteRule {
    class: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct TemplateContext {
    /// Sheet image file name, referenced relative to the stylesheet.
    image: String,
    /// Stylesheet file name, referenced relative to the preview page.
    stylesheet: String,
    sprites: Vec<SpriteRule>,
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn build_context(
    sheet: &SheetConfig,
    sprites: &[Sprite],
    placement: &Placement<usize>,
) -> TemplateContext {
    let rules = placement
        .iter()
        .filter_map(|r| {
            sprites.get(r.id).map(|s| SpriteRule {
                class: s.class.clone(),
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
            })
        })
        .collect();
    TemplateContext {
        image: file_name(&sheet.sprite_image_file),
        stylesheet: file_name(&sheet.sprite_css_file),
        sprites: rules,
    }
}

/// Stylesheet and preview page for one sheet.
pub struct Rendered {
    pub css: String,
    pub html: String,
}

pub fn render_text(
    sheet: &SheetConfig,
    sprites: &[Sprite],
    placement: &Placement<usize>,
) -> anyhow::Result<Rendered> {
    let ctx = build_context(sheet, sprites, placement);

    let mut css_reg = Handlebars::new();
    css_reg.set_strict_mode(true);
    css_reg.register_escape_fn(handlebars::no_escape);
    css_reg.register_template_string("css", CSS_TEMPLATE)?;
    let css = css_reg.render("css", &ctx)?;

    let mut html_reg = Handlebars::new();
    html_reg.set_strict_mode(true);
    html_reg.register_template_string("html", HTML_TEMPLATE)?;
    let html = html_reg.render("html", &ctx)?;

    Ok(Rendered { css, html })
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> anyhow::Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    Ok(())
}

pub fn write_png(path: &Path, canvas: &RgbaImage) -> anyhow::Result<()> {
    ensure_parent(path)?;
    canvas
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write {}", path.display()))
}

pub fn write_css(path: &Path, rendered: &Rendered) -> anyhow::Result<()> {
    write_file(path, &rendered.css)
}

pub fn write_html(path: &Path, rendered: &Rendered) -> anyhow::Result<()> {
    write_file(path, &rendered.html)
}

//! Paints frames of the system with plotters.
//!
//! Layout (where things go, in pixels) lives in [SceneLayout] and is pure;
//! this module only turns it into drawing calls, so any plotters backend
//! works.

use std::error::Error;
use std::path::Path;

use nalgebra::Point2;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::eclipse::{Disc, Eclipse, EclipseInset, LunarEclipse};
use crate::model::{BodyRole, SimulationState};
use crate::view::Projection;

mod scene;

pub use scene::{inset_disc_to_pixels, inset_scale, SceneLayout};
use scene::to_pixel;

const STAR_COLOR: RGBColor = RGBColor(255, 221, 0);
const PRIMARY_COLOR: RGBColor = RGBColor(40, 110, 230);
const SATELLITE_COLOR: RGBColor = RGBColor(200, 200, 200);
const SATELLITE_SHADOW_COLOR: RGBColor = RGBColor(35, 35, 35);
const UMBRA_COLOR: RGBColor = RGBColor(120, 20, 20);

const FONT: &str = "sans-serif";

pub fn body_color(role: BodyRole) -> RGBColor {
    match role {
        BodyRole::Star => STAR_COLOR,
        BodyRole::Primary => PRIMARY_COLOR,
        BodyRole::Satellite => SATELLITE_COLOR,
    }
}

/// Draws one complete frame onto `root`: orbits, bodies in depth order, a
/// status caption and optionally the eclipse inset in the top-right corner.
pub fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    state: &SimulationState,
    eclipse: Eclipse,
    projection: &Projection,
    show_inset: bool,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&BLACK)?;

    let layout = SceneLayout::new(state, projection);
    for (role, path) in layout.orbits.iter() {
        let points: Vec<_> = path.iter().map(to_pixel).collect();
        root.draw(&PathElement::new(
            points,
            body_color(*role).mix(0.4).stroke_width(1),
        ))?;
    }
    for (role, projected) in layout.bodies.iter() {
        let radius = projected.radius.round().max(1.0) as i32;
        root.draw(&Circle::new(
            to_pixel(&projected.pixel),
            radius,
            body_color(*role).filled(),
        ))?;
    }

    let text_style = (FONT, 16).into_font().color(&WHITE);
    let caption = [
        format!("t = {:.1}", state.time()),
        format!("rate: {}", state.strategy()),
        eclipse.to_string(),
    ];
    for (i, line) in caption.iter().enumerate() {
        root.draw(&Text::new(
            line.as_str(),
            (10, 10 + 20 * i as i32),
            text_style.clone(),
        ))?;
    }

    if show_inset {
        let (width, height) = root.dim_in_pixel();
        let size = width.min(height) / 3;
        let inset = root
            .clone()
            .shrink((width.saturating_sub(size + 10), 10), (size, size));
        draw_inset(&inset, &EclipseInset::new(state, eclipse))?;
    }

    Ok(())
}

/// Draws the close-up of an eclipse, or a short notice when there is none.
pub fn draw_inset<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    inset: &EclipseInset,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, height) = area.dim_in_pixel();
    area.fill(&BLACK)?;
    area.draw(&Rectangle::new(
        [(0, 0), (width as i32 - 1, height as i32 - 1)],
        WHITE.mix(0.6).stroke_width(1),
    ))?;

    let text_style = (FONT, 14).into_font().color(&WHITE);
    let (background, foreground) = match inset.discs() {
        Some(discs) => discs,
        None => {
            area.draw(&Text::new(
                Eclipse::None.to_string(),
                (10, height as i32 / 2),
                text_style,
            ))?;
            return Ok(());
        }
    };

    let (background_color, foreground_color) = match inset.eclipse() {
        Eclipse::Lunar(kind) => (UMBRA_COLOR.mix(0.8), lunar_tint(kind).mix(1.0)),
        _ => (STAR_COLOR.mix(1.0), SATELLITE_SHADOW_COLOR.mix(1.0)),
    };

    let half_size = width.min(height) as f64 / 2.0;
    let center = Point2::new(width as f64 / 2.0, height as f64 / 2.0);
    let scale = inset_scale(&background, &foreground, half_size, 0.6);
    for (disc, color) in [(background, background_color), (foreground, foreground_color)] {
        draw_disc(area, &disc, center, scale, color)?;
    }

    area.draw(&Text::new(
        inset.eclipse().to_string(),
        (10, height as i32 - 24),
        text_style,
    ))?;
    Ok(())
}

fn draw_disc<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    disc: &Disc,
    center: Point2<f64>,
    scale: f64,
    color: RGBAColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (pixel, radius) = inset_disc_to_pixels(disc, center, scale);
    area.draw(&Circle::new(
        to_pixel(&pixel),
        radius.round().max(1.0) as i32,
        color.filled(),
    ))
}

/// The satellite reddens the deeper it sits in the shadow.
fn lunar_tint(kind: LunarEclipse) -> RGBColor {
    match kind {
        LunarEclipse::Total => RGBColor(150, 50, 30),
        LunarEclipse::Partial => RGBColor(180, 120, 90),
        LunarEclipse::Penumbral => RGBColor(170, 170, 170),
    }
}

/// Renders a single frame to a PNG file.
pub fn render_png(
    path: &Path,
    state: &SimulationState,
    eclipse: Eclipse,
    projection: &Projection,
    show_inset: bool,
) -> Result<(), Box<dyn Error>> {
    let viewport = projection.viewport();
    let root = BitMapBackend::new(path, (viewport.width, viewport.height)).into_drawing_area();
    draw_frame(&root, state, eclipse, projection, show_inset)?;
    root.present()?;
    Ok(())
}

//! Render map markers to **SVG** or **PNG** on a plain equirectangular world canvas.
//!
//! The canvas has no basemap tiles: a light ocean fill, a 30° graticule and one
//! translucent circle per country, sized by the marker's radius in metres.

use crate::map::{MapMarker, Rgb};
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

const EARTH_CIRCUMFERENCE_M: f64 = 40_075_000.0;
const OCEAN: RGBColor = RGBColor(234, 240, 246);
const GRID: RGBColor = RGBColor(200, 210, 220);

/// Pixel position of a coordinate on a `width` x `height` canvas.
pub fn project(lat: f64, long: f64, width: u32, height: u32) -> (i32, i32) {
    let x = (long.clamp(-180.0, 180.0) + 180.0) / 360.0 * width as f64;
    let y = (90.0 - lat.clamp(-90.0, 90.0)) / 180.0 * height as f64;
    (x.round() as i32, y.round() as i32)
}

/// Marker radius in pixels; any non-zero count stays visible.
pub fn radius_px(radius_m: f64, width: u32) -> u32 {
    if radius_m <= 0.0 {
        return 0;
    }
    let px = radius_m / EARTH_CIRCUMFERENCE_M * width as f64;
    (px.round() as u32).max(1)
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Write the markers to `out_path`; the extension (`.svg` / `.png`) picks the backend.
pub fn render_map<P: AsRef<Path>>(
    markers: &[MapMarker],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("map size must be non-zero");
    }
    let out_path = out_path.as_ref();
    let ext = out_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("svg") => {
            let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
            draw_map(root, markers, width, height)
        }
        Some("png") => {
            let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
            draw_map(root, markers, width, height)
        }
        other => bail!("unsupported map format: {:?} (use .svg or .png)", other),
    }
}

fn draw_map<DB>(
    root: DrawingArea<DB, Shift>,
    markers: &[MapMarker],
    width: u32,
    height: u32,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&OCEAN).map_err(|e| anyhow!("{:?}", e))?;

    for long in (-180..=180).step_by(30) {
        let (x, _) = project(0.0, long as f64, width, height);
        root.draw(&PathElement::new(vec![(x, 0), (x, height as i32)], GRID.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    for lat in (-90..=90).step_by(30) {
        let (_, y) = project(lat as f64, 0.0, width, height);
        root.draw(&PathElement::new(vec![(0, y), (width as i32, y)], GRID.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Big circles first so small countries stay on top.
    let mut ordered: Vec<&MapMarker> = markers.iter().filter(|m| m.radius_m > 0.0).collect();
    ordered.sort_by(|a, b| b.radius_m.total_cmp(&a.radius_m));

    for m in ordered {
        let center = project(m.lat, m.long, width, height);
        let r = radius_px(m.radius_m, width);
        let color = rgb(m.color);
        root.draw(&Circle::new(center, r, color.mix(0.4).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Circle::new(center, r, color.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    log::info!("rendered {} markers", markers.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_corners() {
        assert_eq!(project(90.0, -180.0, 360, 180), (0, 0));
        assert_eq!(project(-90.0, 180.0, 360, 180), (360, 180));
        assert_eq!(project(0.0, 0.0, 360, 180), (180, 90));
    }

    #[test]
    fn tiny_radius_still_visible() {
        assert_eq!(radius_px(0.0, 1000), 0);
        assert_eq!(radius_px(10.0, 1000), 1);
        assert_eq!(radius_px(EARTH_CIRCUMFERENCE_M / 100.0, 1000), 10);
    }
}

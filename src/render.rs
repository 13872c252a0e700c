use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use log::info;

use crate::spectrogram::Spectrogram;

const BASE_WIDTH: u32 = 7014;
const BASE_HEIGHT: u32 = 4962;
const TOP_MARGIN: u32 = 600;
const BOTTOM_MARGIN: u32 = 600;
pub const BLUR_RADIUS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderLayout {
    pub width: u32,
    pub height: u32,
    pub top_margin: u32,
    pub bottom_margin: u32,
}

impl Default for RenderLayout {
    fn default() -> Self {
        RenderLayout {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
            top_margin: TOP_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
        }
    }
}

impl RenderLayout {
    pub fn plot_height(&self) -> u32 {
        self.height
            .saturating_sub(self.top_margin)
            .saturating_sub(self.bottom_margin)
    }
}

/// Draws display levels (already mapped to `[0, 1]`) on a white page.
///
/// Columns map linearly onto windows; rows inside the plot area map onto a
/// logarithmic frequency axis from `min_freq` at the bottom to `max_freq` at
/// the top. Rows whose frequency falls outside the analysed bins stay white.
pub fn rasterize(spectro: &Spectrogram, min_freq: f64, max_freq: f64, layout: &RenderLayout) -> GrayImage {
    let mut img = GrayImage::from_pixel(layout.width, layout.height, Luma([255u8]));
    let plot_height = layout.plot_height();
    if spectro.num_windows == 0 || plot_height == 0 || layout.width == 0 {
        return img;
    }

    let log_min = min_freq.ln();
    let log_span = max_freq.ln() - log_min;
    let bottom = (layout.top_margin + plot_height) as f64;

    let row_bins: Vec<Option<usize>> = (layout.top_margin..layout.top_margin + plot_height)
        .map(|y| {
            let ratio = (bottom - (y as f64 + 0.5)) / plot_height as f64;
            let freq = (log_min + ratio * log_span).exp();
            let bin = (freq / spectro.freq_resolution).floor();
            if bin.is_finite()
                && bin >= spectro.index_min as f64
                && bin <= spectro.index_max as f64
            {
                Some(bin as usize)
            } else {
                None
            }
        })
        .collect();

    let cell_width = layout.width as f64 / spectro.num_windows as f64;
    for x in 0..layout.width {
        let w = (((x as f64 + 0.5) / cell_width) as usize).min(spectro.num_windows - 1);
        for (offset, bin) in row_bins.iter().enumerate() {
            if let Some(bin) = bin {
                let level = spectro.magnitude(w, *bin);
                let px = (level * 255.0).round().clamp(0.0, 255.0) as u8;
                img.put_pixel(x, layout.top_margin + offset as u32, Luma([px]));
            }
        }
    }

    img
}

/// Separable box blur; pixels beyond the edges are excluded from the mean.
pub fn box_blur(img: &mut GrayImage, radius: u32) {
    if radius == 0 {
        return;
    }
    let (width, height) = img.dimensions();
    let r = radius as i64;
    let mut temp = vec![0u8; (width * height) as usize];

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            let mut count = 0u32;
            for k in -r..=r {
                let nx = x as i64 + k;
                if nx < 0 || nx >= width as i64 {
                    continue;
                }
                sum += img.get_pixel(nx as u32, y)[0] as u32;
                count += 1;
            }
            temp[(y * width + x) as usize] = (sum / count) as u8;
        }
    }

    for x in 0..width {
        for y in 0..height {
            let mut sum = 0u32;
            let mut count = 0u32;
            for k in -r..=r {
                let ny = y as i64 + k;
                if ny < 0 || ny >= height as i64 {
                    continue;
                }
                sum += temp[(ny as u32 * width + x) as usize] as u32;
                count += 1;
            }
            img.put_pixel(x, y, Luma([(sum / count) as u8]));
        }
    }
}

pub fn write_png(img: &GrayImage, output: &Path) -> Result<()> {
    img.save_with_format(output, image::ImageFormat::Png)
        .with_context(|| format!("error writing PNG {}", output.display()))?;
    info!("PNG written to {}", output.display());
    Ok(())
}

use crate::config::GuidanceConfig;
use crate::device_camera::interface::Frame;

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Coarse per-frame image quality estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualityMetrics {
    /// Mean luminance of the sampled pixels, 0-1.
    pub brightness: f32,
    /// Edge density over the sampled grid, 0-1.
    pub sharpness: f32,
    pub has_focused_subject: bool,
    /// Falls as edge density rises. Not clamped, can leave 0-1 on extreme frames.
    pub distance_estimate: f32,
    pub focus_score: f32,
}

impl QualityMetrics {
    /// Derives the edge-based metrics from a raw edge count over `area` pixels.
    pub fn from_edge_count(
        brightness: f32,
        edge_count: usize,
        area: usize,
        config: &GuidanceConfig,
    ) -> Self {
        let edges = edge_count as f32;
        let area = area.max(1) as f32;

        let sharpness = (edges / (area / 10.0)).min(1.0);
        let has_focused_subject = sharpness > config.subject_sharpness_threshold;
        let distance_estimate = 1.0 - edges / (area / 5.0);
        let focus_score = if has_focused_subject {
            sharpness * config.focused_gain
        } else {
            sharpness * config.unfocused_gain
        };

        Self {
            brightness,
            sharpness,
            has_focused_subject,
            distance_estimate,
            focus_score,
        }
    }
}

pub fn compute_metrics(frame: &Frame, config: &GuidanceConfig) -> QualityMetrics {
    let raster = Raster::new(frame, config.default_frame_size);

    let brightness = raster.brightness(config.brightness_sample_stride);
    let edge_count = raster.edge_count(config.edge_grid_stride, config.edge_delta);

    QualityMetrics::from_edge_count(brightness, edge_count, raster.area(), config)
}

/// Read-only view over RGBA bytes. Pixels past the end of the data read as black.
struct Raster<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> Raster<'a> {
    fn new(frame: &'a Frame, default_size: u32) -> Self {
        let (width, height) = if frame.width() == 0 || frame.height() == 0 {
            (default_size, default_size)
        } else {
            (frame.width(), frame.height())
        };

        Self {
            width: width as usize,
            height: height as usize,
            data: frame.pixels(),
        }
    }

    fn area(&self) -> usize {
        self.width * self.height
    }

    fn luminance(&self, index: usize) -> f32 {
        let offset = index * 4;
        match self.data.get(offset..offset + 3) {
            Some(rgb) => rgb
                .iter()
                .zip(LUMA_WEIGHTS)
                .map(|(&channel, weight)| channel as f32 * weight)
                .sum(),
            None => 0.0,
        }
    }

    fn intensity(&self, x: usize, y: usize) -> f32 {
        self.luminance(y * self.width + x)
    }

    fn brightness(&self, stride: usize) -> f32 {
        let (sum, count) = (0..self.area())
            .step_by(stride.max(1))
            .fold((0.0f32, 0usize), |(sum, count), index| {
                (sum + self.luminance(index), count + 1)
            });

        if count == 0 {
            return 0.0;
        }

        (sum / count as f32 / 255.0).clamp(0.0, 1.0)
    }

    fn edge_count(&self, stride: usize, delta: f32) -> usize {
        let stride = stride.max(1);
        let mut edges = 0;

        for y in (1..self.height.saturating_sub(1)).step_by(stride) {
            for x in (1..self.width.saturating_sub(1)).step_by(stride) {
                let here = self.intensity(x, y);
                let right = self.intensity(x + 1, y);
                let below = self.intensity(x, y + 1);

                if (here - right).abs() > delta || (here - below).abs() > delta {
                    edges += 1;
                }
            }
        }

        edges
    }
}

//! Plot canvas models
//!
//! These hold what a plotting backend needs to draw: the axes placement,
//! whether axes are shown at all, and for images the data grid, its extent
//! and color limits. Rendering itself belongs to the embedding toolkit.

use crate::error::{WidgetError, WidgetResult};

/// Axes placement in figure coordinates: lower left corner, then span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesRect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl AxesRect {
    /// Axes covering the whole canvas
    pub const FULL: AxesRect = AxesRect::new(0.0, 0.0, 1.0, 1.0);
    /// Room for tick labels; `.9` tends to clip the left frame line
    pub const LABELLED: AxesRect = AxesRect::new(0.1, 0.1, 0.898, 0.898);

    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }
}

/// Where row 0 of an image is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    Upper,
    #[default]
    Lower,
}

/// Data-space bounds of an image: `left, right, bottom, top`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Extent {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Pixel-centred extent of a `rows x cols` grid
    fn for_shape(rows: usize, cols: usize) -> Self {
        Self::new(-0.5, cols as f64 - 0.5, -0.5, rows as f64 - 0.5)
    }
}

/// A named drawing surface with one set of axes
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCanvas {
    name: Option<String>,
    blank: bool,
    alignment: AxesRect,
    draw_count: u64,
}

impl PlotCanvas {
    /// A canvas with axes, or a bare white surface when `blank`
    pub fn new(name: Option<&str>, blank: bool) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()).map(str::to_owned),
            blank,
            alignment: if blank {
                AxesRect::FULL
            } else {
                AxesRect::LABELLED
            },
            draw_count: 0,
        }
    }

    pub fn with_alignment(mut self, alignment: AxesRect) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }

    /// Axes frame and tick visibility
    pub fn axes_visible(&self) -> bool {
        !self.blank
    }

    pub fn alignment(&self) -> AxesRect {
        self.alignment
    }

    /// Request a redraw
    pub fn draw(&mut self) {
        self.draw_count += 1;
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

/// Canvas showing a 2-D grid as a grayscale image
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlot {
    canvas: PlotCanvas,
    data: Vec<Vec<f64>>,
    extent: Extent,
    clim: (f64, f64),
    origin: Origin,
    colormap: String,
}

impl ImagePlot {
    /// Starts with a single zero pixel
    pub fn new(name: Option<&str>, blank: bool) -> Self {
        Self {
            canvas: PlotCanvas::new(name, blank),
            data: vec![vec![0.0]],
            extent: Extent::for_shape(1, 1),
            clim: (0.0, 0.0),
            origin: Origin::Lower,
            colormap: "gray".to_string(),
        }
    }

    /// Start from `initial` instead of the zero pixel
    pub fn with_data(
        name: Option<&str>,
        blank: bool,
        initial: Vec<Vec<f64>>,
    ) -> WidgetResult<Self> {
        let (rows, cols) = shape(&initial)?;
        let clim = color_limits(&initial)?;
        let mut plot = Self::new(name, blank);
        plot.data = initial;
        plot.extent = Extent::for_shape(rows, cols);
        plot.clim = clim;
        Ok(plot)
    }

    pub fn canvas(&self) -> &PlotCanvas {
        &self.canvas
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Color limits `(min, max)`
    pub fn clim(&self) -> (f64, f64) {
        self.clim
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn colormap(&self) -> &str {
        &self.colormap
    }

    /// Replace the image, rescale the color limits to the data and redraw
    pub fn set_data(&mut self, data: Vec<Vec<f64>>, extent: Extent) -> WidgetResult<()> {
        shape(&data)?;
        self.clim = color_limits(&data)?;
        self.data = data;
        self.extent = extent;
        self.canvas.draw();
        Ok(())
    }
}

fn shape(data: &[Vec<f64>]) -> WidgetResult<(usize, usize)> {
    let cols = data.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(WidgetError::InvalidData("empty grid".to_string()));
    }
    if let Some(row) = data.iter().position(|r| r.len() != cols) {
        return Err(WidgetError::InvalidData(format!(
            "row {} has {} columns, expected {}",
            row,
            data[row].len(),
            cols
        )));
    }
    Ok((data.len(), cols))
}

fn color_limits(data: &[Vec<f64>]) -> WidgetResult<(f64, f64)> {
    data.iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| WidgetError::InvalidData("no values besides NaN".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_alignment() {
        let blank = PlotCanvas::new(None, true);
        assert_eq!(blank.alignment(), AxesRect::FULL);
        assert!(!blank.axes_visible());

        let plot = PlotCanvas::new(Some("Trace"), false);
        assert_eq!(plot.alignment(), AxesRect::new(0.1, 0.1, 0.898, 0.898));
        assert_eq!(plot.name(), Some("Trace"));
        assert_eq!(PlotCanvas::new(Some(""), false).name(), None);
    }

    #[test]
    fn test_image_initial_state() {
        let image = ImagePlot::new(None, true);
        assert_eq!(image.data(), &[vec![0.0]]);
        assert_eq!(image.origin(), Origin::Lower);
        assert_eq!(image.colormap(), "gray");
        assert_eq!(image.canvas().draw_count(), 0);
    }

    #[test]
    fn test_set_data_updates_clim_and_draws() {
        let mut image = ImagePlot::new(None, false);
        let extent = Extent::new(0.0, 2.0, 0.0, 1.0);
        image
            .set_data(vec![vec![1.0, f64::NAN], vec![-3.0, 7.5]], extent)
            .unwrap();
        assert_eq!(image.clim(), (-3.0, 7.5));
        assert_eq!(image.extent(), extent);
        assert_eq!(image.canvas().draw_count(), 1);
    }

    #[test]
    fn test_set_data_rejects_bad_grids() {
        let mut image = ImagePlot::new(None, false);
        let extent = Extent::new(0.0, 1.0, 0.0, 1.0);
        assert!(matches!(image.set_data(vec![], extent), Err(WidgetError::InvalidData(_))));
        assert!(matches!(
            image.set_data(vec![vec![1.0, 2.0], vec![3.0]], extent),
            Err(WidgetError::InvalidData(_))
        ));
        assert!(matches!(
            image.set_data(vec![vec![f64::NAN]], extent),
            Err(WidgetError::InvalidData(_))
        ));
        assert_eq!(image.data(), &[vec![0.0]]);
        assert_eq!(image.canvas().draw_count(), 0);
    }

    #[test]
    fn test_with_data() {
        let image = ImagePlot::with_data(None, false, vec![vec![2.0, 4.0, 6.0]]).unwrap();
        assert_eq!(image.clim(), (2.0, 6.0));
        assert_eq!(image.extent(), Extent::new(-0.5, 2.5, -0.5, 0.5));
    }
}

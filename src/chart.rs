use crate::models::CalorieSeries;
use serde::Serialize;

pub const DATASET_LABEL: &str = "Calories";
pub const BORDER_COLOR: &str = "#333";
pub const FILL_COLOR: &str = "#a8e6cf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleOptions {
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: ScaleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn calories(series: &CalorieSeries) -> Self {
        Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels: CalorieSeries::LABELS.iter().map(|l| l.to_string()).collect(),
                datasets: vec![Dataset {
                    label: DATASET_LABEL.to_string(),
                    data: series.values().to_vec(),
                    border_color: BORDER_COLOR.to_string(),
                    background_color: FILL_COLOR.to_string(),
                    fill: true,
                }],
            },
            options: ChartOptions {
                scales: ScaleOptions {
                    y: AxisOptions { begin_at_zero: true },
                },
            },
        }
    }

    pub fn set_series(&mut self, series: &CalorieSeries) {
        if let Some(dataset) = self.data.datasets.first_mut() {
            dataset.data = series.values().to_vec();
        }
    }
}

pub trait ChartRenderer {
    fn draw(&mut self, config: &ChartConfig);

    fn release(&mut self);

    fn output(&self) -> Option<&str> {
        None
    }
}

// Releases the renderer exactly once, via `destroy` or on drop.
pub struct ChartHandle<R: ChartRenderer> {
    renderer: R,
    config: ChartConfig,
    released: bool,
}

impl<R: ChartRenderer> ChartHandle<R> {
    pub fn new(mut renderer: R, config: ChartConfig) -> Self {
        renderer.draw(&config);
        Self {
            renderer,
            config,
            released: false,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn update(&mut self, series: &CalorieSeries) {
        self.config.set_series(series);
        self.renderer.draw(&self.config);
    }

    pub fn destroy(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.renderer.release();
        }
    }
}

impl<R: ChartRenderer> Drop for ChartHandle<R> {
    fn drop(&mut self) {
        self.release_once();
    }
}

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 24.0;
const TICKS: u32 = 4;

// The markup buffer is the rendering resource; release drops it.
#[derive(Debug, Default)]
pub struct SvgChart {
    svg: Option<String>,
}

impl ChartRenderer for SvgChart {
    fn draw(&mut self, config: &ChartConfig) {
        self.svg = Some(render_svg(config));
    }

    fn release(&mut self) {
        self.svg = None;
    }

    fn output(&self) -> Option<&str> {
        self.svg.as_deref()
    }
}

pub fn render_svg(config: &ChartConfig) -> String {
    let open = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Calorie chart">"#
    );
    let Some(dataset) = config.data.datasets.first().filter(|d| !d.data.is_empty()) else {
        return format!(
            r#"{open}<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#
        );
    };

    let values = &dataset.data;
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if config.options.scales.y.begin_at_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if min == max {
        min -= 1.0;
        max += 1.0;
    }

    let range = max - min;
    let x_step = if values.len() > 1 {
        (WIDTH - PADDING_X * 2.0) / (values.len() - 1) as f64
    } else {
        0.0
    };
    let scale_y = (HEIGHT - TOP - PADDING_Y) / range;
    let x = |index: usize| PADDING_X + index as f64 * x_step;
    let y = |value: f64| HEIGHT - PADDING_Y - (value - min) * scale_y;

    let mut svg = open;
    for tick in 0..=TICKS {
        let value = min + range * f64::from(tick) / f64::from(TICKS);
        let y_pos = y(value);
        svg.push_str(&format!(
            r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y_pos:.2}" x2="{}" y2="{y_pos:.2}" />"#,
            WIDTH - PADDING_X
        ));
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{}" y="{:.2}" text-anchor="end">{}</text>"#,
            PADDING_X - 10.0,
            y_pos + 4.0,
            format_axis_value(value)
        ));
    }

    let line = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command} {:.2} {:.2}", x(index), y(*value))
        })
        .collect::<Vec<_>>()
        .join(" ");

    if dataset.fill {
        let base = y(min);
        svg.push_str(&format!(
            r#"<path class="chart-area" d="{line} L {:.2} {base:.2} L {:.2} {base:.2} Z" fill="{}" stroke="none" />"#,
            x(values.len() - 1),
            x(0),
            escape(&dataset.background_color)
        ));
    }
    svg.push_str(&format!(
        r#"<path class="chart-line" d="{line}" fill="none" stroke="{}" stroke-width="3" />"#,
        escape(&dataset.border_color)
    ));

    for (index, value) in values.iter().enumerate() {
        svg.push_str(&format!(
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4" fill="white" stroke="{}" stroke-width="2" />"#,
            x(index),
            y(*value),
            escape(&dataset.border_color)
        ));
    }

    for (index, label) in config.data.labels.iter().enumerate().take(values.len()) {
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{}" text-anchor="middle">{}</text>"#,
            x(index),
            HEIGHT - PADDING_Y + 18.0,
            escape(label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn format_axis_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

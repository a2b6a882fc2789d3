use crate::models::{DailyCount, HistorySeries};
use crate::ui::escape_html;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write as _;
use std::str::FromStr;

pub const MAX_CHART_WIDTH: u32 = 800;
pub const VIEWPORT_GUTTER: u32 = 40;
pub const COMPACT_BREAKPOINT: u32 = 600;
pub const COMPACT_POINTS: usize = 5;
pub const MIN_SCALE: u64 = 10;
pub const Y_TICKS: u32 = 6;
pub const MAX_DATE_LABELS: usize = 6;

const FONT_STACK: &str = "Kalam, 'Comic Sans MS', 'Marker Felt', cursive";
const EXACT_COLOR: &str = "#e63946";
const APPROX_COLOR: &str = "#f4a261";
const AXIS_COLOR: &str = "#6b7280";
const GRID_COLOR: &str = "#e5e7eb";
const FRAME_COLOR: &str = "#d0d7de";
const TICK_COLOR: &str = "#374151";
const TITLE_COLOR: &str = "#1f2937";
const NOTE_COLOR: &str = "#9ca3af";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Line,
    Stacked,
}

impl FromStr for ChartStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "stacked" => Ok(Self::Stacked),
            other => Err(format!("unknown chart style '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub compact: bool,
    pub padding: Padding,
    pub tick_font: u32,
    pub title_font: u32,
    pub date_font: u32,
}

impl ChartLayout {
    pub fn for_viewport(viewport_width: u32) -> Self {
        let compact = viewport_width <= COMPACT_BREAKPOINT;
        let width = f64::from(
            viewport_width
                .saturating_sub(VIEWPORT_GUTTER)
                .min(MAX_CHART_WIDTH),
        );

        if compact {
            Self {
                width,
                height: 250.0,
                compact,
                padding: Padding {
                    top: 30.0,
                    right: 20.0,
                    bottom: 50.0,
                    left: 50.0,
                },
                tick_font: 11,
                title_font: 13,
                date_font: 11,
            }
        } else {
            Self {
                width,
                height: 300.0,
                compact,
                padding: Padding {
                    top: 40.0,
                    right: 60.0,
                    bottom: 60.0,
                    left: 100.0,
                },
                tick_font: 14,
                title_font: 16,
                date_font: 13,
            }
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    pub fn baseline(&self) -> f64 {
        self.padding.top + self.plot_height()
    }

    pub fn visible<'a>(&self, series: &'a HistorySeries) -> &'a [DailyCount] {
        if self.compact {
            series.tail(COMPACT_POINTS)
        } else {
            series.entries()
        }
    }
}

pub fn scale_max(points: &[DailyCount], style: ChartStyle) -> u64 {
    let max = points
        .iter()
        .map(|point| match style {
            ChartStyle::Line => point.count,
            ChartStyle::Stacked => point.count.saturating_add(point.right_count),
        })
        .max()
        .unwrap_or(0);
    if max == 0 { MIN_SCALE } else { max }
}

pub fn label_indices(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let count = len.min(MAX_DATE_LABELS);
    if count == 1 {
        return vec![len - 1];
    }
    let step = (len - 1) / (count - 1);
    (0..count)
        .map(|i| if i == count - 1 { len - 1 } else { i * step })
        .collect()
}

pub fn format_tick(value: u64) -> String {
    if value >= 1000 {
        format!("{:.1}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

pub fn format_day(day: NaiveDate, compact: bool) -> String {
    if compact {
        format!("{}/{}", day.month(), day.day())
    } else {
        day.format("%b %-d").to_string()
    }
}

pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, series: &HistorySeries, viewport_width: u32) -> String {
        if series.is_empty() {
            return String::new();
        }

        let layout = ChartLayout::for_viewport(viewport_width);
        let points = layout.visible(series);
        let plot = Plot::new(layout, points.len(), scale_max(points, self.style));
        let mut svg = Svg::default();

        draw_frame(&mut svg, &plot);
        match self.style {
            ChartStyle::Line => draw_line(&mut svg, &plot, points),
            ChartStyle::Stacked => draw_bars(&mut svg, &plot, points),
        }
        draw_ticks(&mut svg, &plot);
        draw_titles(&mut svg, &plot);
        draw_dates(&mut svg, &plot, points);
        svg.text(
            &Text::new(layout.width - 100.0, 30.0, if layout.compact { 12 } else { 14 })
                .fill(NOTE_COLOR)
                .rotate(5.0),
            "Perfect!",
        );

        svg.finish(layout.width, layout.height)
    }
}

struct Plot {
    layout: ChartLayout,
    max: u64,
    step: f64,
}

impl Plot {
    fn new(layout: ChartLayout, len: usize, max: u64) -> Self {
        let gaps = len.saturating_sub(1).max(1);
        Self {
            step: layout.plot_width() / gaps as f64,
            layout,
            max,
        }
    }

    fn x(&self, index: usize) -> f64 {
        self.layout.padding.left + index as f64 * self.step
    }

    fn y(&self, value: u64) -> f64 {
        self.layout.baseline() - self.height_of(value)
    }

    fn height_of(&self, value: u64) -> f64 {
        (value as f64 / self.max as f64) * self.layout.plot_height()
    }

    fn right(&self) -> f64 {
        self.layout.padding.left + self.layout.plot_width()
    }
}

fn draw_frame(svg: &mut Svg, plot: &Plot) {
    let layout = &plot.layout;
    svg.rect(
        5.0,
        5.0,
        (layout.width - 10.0).max(0.0),
        (layout.height - 10.0).max(0.0),
        "#ffffff",
        Some(FRAME_COLOR),
    );

    for i in 0..=Y_TICKS {
        let y = layout.padding.top + layout.plot_height() / f64::from(Y_TICKS) * f64::from(i);
        if i == Y_TICKS {
            svg.line((layout.padding.left, y), (plot.right(), y), AXIS_COLOR, 1.5);
        } else {
            svg.line((layout.padding.left, y), (plot.right(), y), GRID_COLOR, 0.8);
        }
    }

    svg.line(
        (layout.padding.left, layout.padding.top),
        (layout.padding.left, layout.baseline()),
        AXIS_COLOR,
        1.5,
    );
}

fn draw_line(svg: &mut Svg, plot: &Plot, points: &[DailyCount]) {
    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(index, point)| (plot.x(index), plot.y(point.count)))
        .collect();

    for pair in coords.windows(2) {
        svg.line(pair[0], pair[1], EXACT_COLOR, 3.0);
    }

    for (point, &(x, y)) in points.iter().zip(&coords) {
        svg.circle(x, y, 5.0, EXACT_COLOR, "#ffffff");
        svg.hover(x, y, 8.0, &format!("{}: {}", point.day, point.count));
    }
}

fn draw_bars(svg: &mut Svg, plot: &Plot, points: &[DailyCount]) {
    let bar_width = (plot.step * 0.6).min(40.0);
    let baseline = plot.layout.baseline();

    for (index, point) in points.iter().enumerate() {
        let left = plot.x(index) - bar_width / 2.0;
        let exact = plot.height_of(point.count);
        let approx = plot.height_of(point.right_count);
        svg.rect(left, baseline - exact, bar_width, exact, EXACT_COLOR, None);
        svg.rect(left, baseline - exact - approx, bar_width, approx, APPROX_COLOR, None);
        svg.hover_bar(
            left,
            baseline - exact - approx,
            bar_width,
            exact + approx,
            &format!(
                "{}: {} + {} just right",
                point.day, point.count, point.right_count
            ),
        );
    }
}

fn draw_ticks(svg: &mut Svg, plot: &Plot) {
    let layout = &plot.layout;
    let x = layout.padding.left - 15.0;
    for i in 0..=Y_TICKS {
        let value = (plot.max as f64 / f64::from(Y_TICKS) * f64::from(Y_TICKS - i)).round() as u64;
        let y = layout.padding.top + layout.plot_height() / f64::from(Y_TICKS) * f64::from(i);
        svg.text(
            &Text::new(x, y + 4.0, layout.tick_font)
                .anchor("end")
                .fill(TICK_COLOR)
                .rotate(-2.0),
            &format_tick(value),
        );
    }
}

fn draw_titles(svg: &mut Svg, plot: &Plot) {
    let layout = &plot.layout;
    let middle = layout.padding.top + layout.plot_height() / 2.0;
    svg.text(
        &Text::new(20.0, middle, layout.title_font)
            .fill(TITLE_COLOR)
            .rotate(-90.0),
        "Times Right",
    );
    svg.text(
        &Text::new(
            layout.padding.left + layout.plot_width() / 2.0,
            layout.height - 10.0,
            layout.title_font,
        )
        .fill(TITLE_COLOR),
        "Date",
    );
}

fn draw_dates(svg: &mut Svg, plot: &Plot, points: &[DailyCount]) {
    let layout = &plot.layout;
    let y = layout.height - layout.padding.bottom + 25.0;
    for index in label_indices(points.len()) {
        svg.text(
            &Text::new(plot.x(index), y, layout.date_font)
                .fill(AXIS_COLOR)
                .rotate(tilt(index)),
            &format_day(points[index].day, layout.compact),
        );
    }
}

fn tilt(index: usize) -> f64 {
    ((index * 7) % 11) as f64 - 5.0
}

struct Text<'a> {
    x: f64,
    y: f64,
    size: u32,
    anchor: &'a str,
    fill: &'a str,
    rotate: Option<f64>,
}

impl<'a> Text<'a> {
    fn new(x: f64, y: f64, size: u32) -> Self {
        Self {
            x,
            y,
            size,
            anchor: "middle",
            fill: TITLE_COLOR,
            rotate: None,
        }
    }

    fn anchor(mut self, anchor: &'a str) -> Self {
        self.anchor = anchor;
        self
    }

    fn fill(mut self, fill: &'a str) -> Self {
        self.fill = fill;
        self
    }

    fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

#[derive(Default)]
struct Svg {
    body: String,
}

impl Svg {
    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) {
        let _ = write!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{stroke}" stroke-width="{width}" stroke-linecap="round"/>"#,
            from.0, from.1, to.0, to.1
        );
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, stroke: &str, fill: &str) {
        let _ = write!(
            self.body,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r}" stroke="{stroke}" stroke-width="2" fill="{fill}"/>"#
        );
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str, stroke: Option<&str>) {
        let stroke = stroke
            .map(|color| format!(r#" stroke="{color}" stroke-width="1.5""#))
            .unwrap_or_default();
        let _ = write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{fill}"{stroke}/>"#
        );
    }

    fn hover(&mut self, cx: f64, cy: f64, r: f64, title: &str) {
        let _ = write!(
            self.body,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r}" fill="transparent" style="cursor: pointer"><title>{}</title></circle>"#,
            escape_html(title)
        );
    }

    fn hover_bar(&mut self, x: f64, y: f64, width: f64, height: f64, title: &str) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="transparent" style="cursor: pointer"><title>{}</title></rect>"#,
            escape_html(title)
        );
    }

    fn text(&mut self, text: &Text<'_>, content: &str) {
        let transform = text
            .rotate
            .map(|degrees| {
                format!(
                    r#" transform="rotate({degrees}, {:.2}, {:.2})""#,
                    text.x, text.y
                )
            })
            .unwrap_or_default();
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" font-size="{}" fill="{}" font-family="{FONT_STACK}"{transform}>{}</text>"#,
            text.x,
            text.y,
            text.anchor,
            text.size,
            text.fill,
            escape_html(content)
        );
    }

    fn finish(self, width: f64, height: f64) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" role="img" aria-label="Daily counts">{}</svg>"#,
            self.body
        )
    }
}

//! # 原位 XRD 联合图
//!
//! 使用 `plotters` 绘制双面板图：
//! - 左：强度等高线图（横轴 2θ/Q，纵轴时间或扫描序号），下方为色标
//! - 右：电化学曲线（横轴电压/电流，纵轴时间），宽度比 8:1
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/` 的 IntensityMatrix, EchemSeries, PlotOptions
//! - 使用 `xrd/colormap.rs`, `xrd/timeaxis.rs`

use crate::cli::plot::ImageFormat;
use crate::error::{OperandoError, Result};
use crate::models::{EchemSeries, IntensityMatrix, PlotOptions};
use crate::xrd::timeaxis::TimeMode;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const FONT: &str = "sans-serif";
const COLORBAR_STEPS: usize = 256;

/// 一次作图所需的全部数据
pub struct OperandoFigure<'a> {
    pub matrix: &'a IntensityMatrix,
    /// 每个扫描的纵轴坐标
    pub scan_axis: &'a [f64],
    pub time_mode: TimeMode,
    pub echem: &'a EchemSeries,
    /// 电化学面板（及时间模式下等高线图）的纵轴上限
    pub total_duration: f64,
    pub ion: &'a str,
}

fn plot_err<E: std::fmt::Debug>(e: E) -> OperandoError {
    OperandoError::PlotError(format!("{:?}", e))
}

/// 生成图像文件
pub fn render(figure: &OperandoFigure, options: &PlotOptions, output_path: &Path) -> Result<()> {
    let size = (options.width, options.height);
    match options.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_figure(&root, figure, options)?;
            root.present().map_err(plot_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_figure(&root, figure, options)?;
            root.present().map_err(plot_err)?;
        }
    }
    Ok(())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &OperandoFigure,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (width, height) = root.dim_in_pixel();
    let (left, right) = root.split_horizontally((width * 8 / 9) as i32);
    let (contour_area, colorbar_area) = left.split_vertically((height - height / 8) as i32);

    draw_contour(&contour_area, figure, options)?;
    draw_colorbar(&colorbar_area, options)?;
    draw_echem(&right, figure, options)?;
    Ok(())
}

/// 纵轴范围
fn y_range(figure: &OperandoFigure) -> (f64, f64) {
    match figure.time_mode {
        TimeMode::Elapsed => widen(0.0, figure.total_duration),
        TimeMode::ScanIndex => {
            let first = figure.scan_axis.first().copied().unwrap_or(0.0);
            let last = figure.scan_axis.last().copied().unwrap_or(0.0);
            widen(first, last)
        }
    }
}

/// 退化区间扩展为宽度 1
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, lo + 0.5)
    }
}

/// 以相邻坐标中点为界的网格单元边界（长度 n + 1）
pub fn cell_edges(values: &[f64]) -> Vec<f64> {
    match values.len() {
        0 => Vec::new(),
        1 => vec![values[0] - 0.5, values[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(values[0] - (values[1] - values[0]) / 2.0);
            for pair in values.windows(2) {
                edges.push((pair[0] + pair[1]) / 2.0);
            }
            edges.push(values[n - 1] + (values[n - 1] - values[n - 2]) / 2.0);
            edges
        }
    }
}

fn draw_contour<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &OperandoFigure,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let matrix = figure.matrix;
    let (x_min, x_max) = options
        .x_range
        .or_else(|| matrix.axis_range())
        .map(|(lo, hi)| widen(lo, hi))
        .unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(figure);

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    let x_edges = cell_edges(matrix.axis());
    let y_edges = cell_edges(figure.scan_axis);
    let clamp_x = |x: f64| x.clamp(x_min, x_max);
    let clamp_y = |y: f64| y.clamp(y_min, y_max);

    let mut cells = Vec::new();
    for scan in 0..matrix.n_scans().min(figure.scan_axis.len()) {
        let (y0, y1) = (clamp_y(y_edges[scan]), clamp_y(y_edges[scan + 1]));
        if y0 == y1 {
            continue;
        }
        for row in 0..matrix.n_rows() {
            let (x0, x1) = (clamp_x(x_edges[row]), clamp_x(x_edges[row + 1]));
            if x0 == x1 {
                continue;
            }
            let color = options.colormap.color_for(
                matrix.value(row, scan),
                options.intensity_bounds,
                options.levels,
            );
            cells.push(Rectangle::new([(x0, y0), (x1, y1)], color.filled()));
        }
    }
    chart.draw_series(cells).map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(5)
        .y_labels(5)
        .x_desc(matrix.axis_kind().label())
        .y_desc(figure.time_mode.label())
        .label_style((FONT, 20))
        .axis_desc_style((FONT, 24))
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (width, height) = area.dim_in_pixel();
    // 与等高线图的绘图区对齐：margin 20 + y 标签区 80
    let x_start = 100_i32;
    let x_end = (width as i32 - 20).max(x_start + 1);
    let y_top = 10_i32;
    let y_bottom = (height as i32 / 2).max(y_top + 1);

    let span = (x_end - x_start) as f64;
    let (lo, hi) = options.intensity_bounds;
    for step in 0..COLORBAR_STEPS {
        let t0 = step as f64 / COLORBAR_STEPS as f64;
        let t1 = (step + 1) as f64 / COLORBAR_STEPS as f64;
        let value = lo + (hi - lo) * (t0 + t1) / 2.0;
        let color = options.colormap.color_for(value, options.intensity_bounds, options.levels);
        let px0 = x_start + (t0 * span).round() as i32;
        let px1 = x_start + (t1 * span).round() as i32;
        area.draw(&Rectangle::new([(px0, y_top), (px1, y_bottom)], color.filled()))
            .map_err(plot_err)?;
    }
    area.draw(&Rectangle::new(
        [(x_start, y_top), (x_end, y_bottom)],
        BLACK.stroke_width(1),
    ))
    .map_err(plot_err)?;

    let label_style = (FONT, 20).into_font().color(&BLACK);
    let label_y = y_bottom + 6;
    area.draw(&Text::new("Low", (x_start, label_y), label_style.clone()))
        .map_err(plot_err)?;
    area.draw(&Text::new("High", (x_end - 40, label_y), label_style.clone()))
        .map_err(plot_err)?;
    area.draw(&Text::new(
        "Intensity (a.u.)",
        ((x_start + x_end) / 2 - 70, label_y),
        label_style,
    ))
    .map_err(plot_err)?;

    Ok(())
}

fn draw_echem<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &OperandoFigure,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (s_min, s_max) = options.signal_bounds;
    let (t_min, t_max) = widen(0.0, figure.total_duration);

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(60)
        .right_y_label_area_size(70)
        .build_cartesian_2d(s_min..s_max, t_min..t_max)
        .map_err(plot_err)?
        .set_secondary_coord(s_min..s_max, t_min..t_max);

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_labels(3)
        .x_desc(figure.echem.signal_label(figure.ion))
        .label_style((FONT, 18))
        .axis_desc_style((FONT, 20))
        .draw()
        .map_err(plot_err)?;

    chart
        .configure_secondary_axes()
        .y_labels(4)
        .y_desc("Time (h)")
        .label_style((FONT, 18))
        .axis_desc_style((FONT, 20))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            figure
                .echem
                .points()
                .filter(|(t, _)| *t >= t_min && *t <= t_max)
                .map(|(t, s)| (s.clamp(s_min, s_max), t)),
            BLACK.stroke_width(2),
        ))
        .map_err(plot_err)?;

    Ok(())
}

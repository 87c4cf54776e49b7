//! `wasm-bindgen` bridge. Every call is stateless: the page keeps the layout
//! and selection as JSON and passes them back in.

use thiserror::Error;
use wasm_bindgen::prelude::*;
use worklane_core::describe::describe_record;
use worklane_core::layout::{LayoutConfig, LayoutError, compute_layout};
use worklane_core::loader::{LoadError, parse_experiences};
use worklane_core::model::{DateError, ExperienceRecord, LayoutResult, YearMonth};
use worklane_core::selection::{Selection, SelectionEvent};
use worklane_core::stats::experience_stats;
use worklane_core::svg;
use worklane_core::views::hit_test::event_at;
use worklane_core::views::{TimelineStyle, page_layout, render_page};
use worklane_protocol::{Point, RenderCommand, Viewport};

#[derive(Debug, Error)]
enum BridgeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("invalid month: {0}")]
    Date(#[from] DateError),
}

type BridgeResult<T> = Result<T, BridgeError>;

/// An empty string means "nothing selected".
fn parse_selection(json: &str) -> BridgeResult<Selection> {
    if json.trim().is_empty() {
        return Ok(Selection::none());
    }
    Ok(serde_json::from_str(json)?)
}

fn parse_config(json: &str) -> BridgeResult<LayoutConfig> {
    if json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    Ok(serde_json::from_str(json)?)
}

fn page_commands(
    layout: &LayoutResult,
    selection: &Selection,
    width: f64,
) -> (Vec<RenderCommand>, f64) {
    let style = TimelineStyle::default();
    let height = page_layout(layout, selection, width, &style).height;
    let commands = render_page(layout, selection, &Viewport::new(width, height), &style);
    (commands, height)
}

fn layout_impl(records_json: &str, now: &str, config_json: &str) -> BridgeResult<String> {
    let records = parse_experiences(records_json.as_bytes())?;
    let now: YearMonth = now.parse()?;
    let layout = compute_layout(&records, now, &parse_config(config_json)?)?;
    Ok(serde_json::to_string(&layout)?)
}

fn selection_impl(selection_json: &str, event_json: &str) -> BridgeResult<String> {
    let selection = parse_selection(selection_json)?;
    let event: SelectionEvent = serde_json::from_str(event_json)?;
    Ok(serde_json::to_string(&selection.apply(event))?)
}

fn describe_impl(record_json: &str) -> BridgeResult<String> {
    let record: ExperienceRecord = serde_json::from_str(record_json)?;
    Ok(serde_json::to_string(&describe_record(&record)?)?)
}

fn commands_impl(layout_json: &str, selection_json: &str, width: f64) -> BridgeResult<String> {
    let layout: LayoutResult = serde_json::from_str(layout_json)?;
    let selection = parse_selection(selection_json)?.retain_in(&layout);
    let (commands, _) = page_commands(&layout, &selection, width);
    Ok(serde_json::to_string(&commands)?)
}

fn svg_impl(layout_json: &str, selection_json: &str, width: f64, dark: bool) -> BridgeResult<String> {
    let layout: LayoutResult = serde_json::from_str(layout_json)?;
    let selection = parse_selection(selection_json)?.retain_in(&layout);
    Ok(svg::render_timeline_svg(
        &layout,
        &selection,
        width,
        &TimelineStyle::default(),
        dark,
    ))
}

fn click_impl(
    layout_json: &str,
    selection_json: &str,
    width: f64,
    x: f64,
    y: f64,
) -> BridgeResult<String> {
    let layout: LayoutResult = serde_json::from_str(layout_json)?;
    let selection = parse_selection(selection_json)?.retain_in(&layout);
    let (commands, _) = page_commands(&layout, &selection, width);
    let selection = match event_at(&commands, &layout, Point::new(x, y)) {
        Some(event) => selection.apply(event),
        None => selection,
    };
    Ok(serde_json::to_string(&selection)?)
}

fn stats_impl(layout_json: &str) -> BridgeResult<String> {
    let layout: LayoutResult = serde_json::from_str(layout_json)?;
    Ok(serde_json::to_string(&experience_stats(&layout))?)
}

/// Lay out experience records (the backend's JSON) as of `now` (`YYYY-MM`).
/// `config_json` may be empty for the defaults.
#[wasm_bindgen]
pub fn compute_layout_json(records_json: &str, now: &str, config_json: &str) -> Result<String, JsError> {
    Ok(layout_impl(records_json, now, config_json)?)
}

/// Reduce a selection (JSON, or empty for none) by one event, e.g.
/// `{"type":"activated","id":3}` or `{"type":"cleared"}`.
#[wasm_bindgen]
pub fn apply_selection(selection_json: &str, event_json: &str) -> Result<String, JsError> {
    Ok(selection_impl(selection_json, event_json)?)
}

/// Title, subtitle and date caption for one record.
#[wasm_bindgen]
pub fn describe_json(record_json: &str) -> Result<String, JsError> {
    Ok(describe_impl(record_json)?)
}

/// Render commands for the whole page at `width` logical pixels.
#[wasm_bindgen]
pub fn render_timeline_json(layout_json: &str, selection_json: &str, width: f64) -> Result<String, JsError> {
    Ok(commands_impl(layout_json, selection_json, width)?)
}

#[wasm_bindgen]
pub fn render_timeline_svg(
    layout_json: &str,
    selection_json: &str,
    width: f64,
    dark: bool,
) -> Result<String, JsError> {
    Ok(svg_impl(layout_json, selection_json, width, dark)?)
}

/// Page height at `width`, for sizing the canvas before painting.
#[wasm_bindgen]
pub fn timeline_height(layout_json: &str, selection_json: &str, width: f64) -> Result<f64, JsError> {
    let layout: LayoutResult = serde_json::from_str(layout_json)?;
    let selection = parse_selection(selection_json)?.retain_in(&layout);
    Ok(page_layout(&layout, &selection, width, &TimelineStyle::default()).height)
}

/// Apply a click at `(x, y)` on the page rendered at `width` and return the
/// new selection.
#[wasm_bindgen]
pub fn click_at(
    layout_json: &str,
    selection_json: &str,
    width: f64,
    x: f64,
    y: f64,
) -> Result<String, JsError> {
    Ok(click_impl(layout_json, selection_json, width, x, y)?)
}

#[wasm_bindgen]
pub fn stats_json(layout_json: &str) -> Result<String, JsError> {
    Ok(stats_impl(layout_json)?)
}

//! Integration test: load the sample work history, lay it out, render the
//! page and drive selection through clicks.

use worklane_core::describe::describe;
use worklane_core::layout::LayoutConfig;
use worklane_core::loader::load_layout;
use worklane_core::model::{ExperienceId, LayoutResult, YearMonth};
use worklane_core::selection::{Selection, SelectionEvent};
use worklane_core::stats::experience_stats;
use worklane_core::views::hit_test::event_at;
use worklane_core::views::{TimelineStyle, render_page};
use worklane_protocol::{Point, RenderCommand, Viewport};

fn now() -> YearMonth {
    "2025-10".parse().expect("valid month")
}

fn sample() -> LayoutResult {
    let data = include_bytes!("fixtures/experiences.json");
    load_layout(data, now(), &LayoutConfig::default()).expect("sample lays out")
}

fn bar_center(commands: &[RenderCommand], index: u64) -> Point {
    commands
        .iter()
        .find_map(|c| match c {
            RenderCommand::DrawRect {
                rect,
                hit_id: Some(id),
                ..
            } if *id == index => Some(Point::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)),
            _ => None,
        })
        .expect("bar rendered")
}

#[test]
fn sample_history_layout() {
    let layout = sample();
    assert_eq!(layout.len(), 6);
    assert_eq!(layout.earliest, "2024-05".parse::<YearMonth>().unwrap());
    assert_eq!(layout.latest, now());
    assert_eq!(layout.span_months, 17);
    assert_eq!(layout.track_count, 2);

    let order: Vec<String> = layout.positioned.iter().map(|p| p.id().to_string()).collect();
    assert_eq!(order, ["4", "3", "6", "2", "5", "1"]);

    // Entries of one organization share a track.
    for a in &layout.positioned {
        for b in &layout.positioned {
            if a.record.organization == b.record.organization {
                assert_eq!(a.track, b.track, "{} split across tracks", a.record.organization);
            }
        }
    }

    // Different organizations on one track never truly overlap.
    for (i, a) in layout.positioned.iter().enumerate() {
        for b in &layout.positioned[i + 1..] {
            if a.track == b.track && a.record.organization != b.record.organization {
                let shared = a.end_fraction.min(b.end_fraction) - a.start_fraction.max(b.start_fraction);
                assert!(shared <= 0.01, "{} overlaps {}", a.id(), b.id());
            }
        }
    }

    let current = layout.get(&ExperienceId::from(5u64)).expect("current role");
    assert_eq!(current.end, None);
    assert!((current.end_fraction - 1.0).abs() < 1e-9);
    assert_eq!(describe(current).caption, "April 2025 – Present");

    let stats = experience_stats(&layout);
    assert_eq!(stats.per_category.internship, 4);
    assert_eq!(stats.per_category.work, 2);
    assert_eq!(stats.current_roles, 1);
    assert_eq!(stats.covered_months, 18);
    assert_eq!(stats.years, 1);
}

#[test]
fn layout_is_deterministic() {
    let a = serde_json::to_string(&sample()).unwrap();
    let b = serde_json::to_string(&sample()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn click_to_drill_down_and_close() {
    let layout = sample();
    let style = TimelineStyle::default();
    let viewport = Viewport::new(1200.0, 600.0);

    let mut selection = Selection::none();
    let page = render_page(&layout, &selection, &viewport, &style);

    let intact = layout.index_of(&ExperienceId::from(2u64)).unwrap() as u64;
    let event = event_at(&page, &layout, bar_center(&page, intact)).expect("bar hit");
    assert_eq!(event, SelectionEvent::Activated(ExperienceId::from(2u64)));
    selection = selection.apply(event);

    let page = render_page(&layout, &selection, &viewport, &style);
    let texts: Vec<&str> = page
        .iter()
        .filter_map(|c| match c {
            RenderCommand::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"DevOps I"));
    assert!(texts.contains(&"Montreal, Quebec, Canada • January 2025 – April 2025"));
    assert!(texts.contains(&"Jenkins"));

    let close = page
        .iter()
        .find_map(|c| match c {
            RenderCommand::DrawRect {
                rect,
                hit_id: Some(u64::MAX),
                ..
            } => Some(Point::new(rect.x + 1.0, rect.y + 1.0)),
            _ => None,
        })
        .expect("close control");
    let event = event_at(&page, &layout, close).expect("close hit");
    selection = selection.apply(event);
    assert_eq!(selection.selected(), None);
}

#[test]
fn clicking_selected_bar_toggles_it_off() {
    let layout = sample();
    let style = TimelineStyle::default();
    let viewport = Viewport::new(1200.0, 600.0);
    let selection = Selection::of(1u64);

    let page = render_page(&layout, &selection, &viewport, &style);
    let index = layout.index_of(&ExperienceId::from(1u64)).unwrap() as u64;
    let event = event_at(&page, &layout, bar_center(&page, index)).unwrap();
    assert_eq!(selection.apply(event), Selection::none());
}

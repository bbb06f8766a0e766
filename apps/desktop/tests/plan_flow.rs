//! End-to-end planning flow: lay out breaks from grid interaction, edit
//! one through the popup path, and persist the resulting plan.

use respite_core::{
    BreakPlanner, GridScale, SessionPlan, TimeValue, DEFAULT_BREAK_DURATION,
};
use respite_ui::{parse_time_field, BreakGrid, BreakGridMessage};
use tempfile::NamedTempFile;

#[test]
fn test_full_plan_edit_save_flow() {
    let duration = TimeValue::new(1, 30, 0);
    let scale = GridScale::default();
    let mut planner = BreakPlanner::new(scale);
    let mut grid = BreakGrid::new(duration, scale);

    assert_eq!(grid.grid_height(), 90.0);

    // Click empty grid space at y=45: a break is created and targeted.
    let message = grid.handle_press(45.0, planner.breaks()).unwrap();
    let index = match message {
        BreakGridMessage::CreateRequested(y) => {
            let created = planner.create_break_at(y);
            assert_eq!(created.start, TimeValue::new(0, 45, 0));
            assert_eq!(created.duration, DEFAULT_BREAK_DURATION);
            planner.len() - 1
        }
        other => panic!("expected creation request, got {other:?}"),
    };
    grid.open_editor(index);

    // While the popup is open, further presses create nothing.
    assert!(grid.handle_press(10.0, planner.breaks()).is_none());
    assert_eq!(planner.len(), 1);

    // Close the popup and place a second break.
    grid.close_editor();
    match grid.handle_press(10.0, planner.breaks()).unwrap() {
        BreakGridMessage::CreateRequested(y) => {
            planner.create_break_at(y);
        }
        other => panic!("expected creation request, got {other:?}"),
    }
    assert_eq!(planner.len(), 2);

    // Click inside the first interval: it is selected, not duplicated.
    grid.close_editor();
    match grid.handle_press(50.0, planner.breaks()).unwrap() {
        BreakGridMessage::BreakSelected(selected) => assert_eq!(selected, 0),
        other => panic!("expected selection, got {other:?}"),
    }

    // Edit it through the popup save path: start 0:40, duration 15 min.
    let edited = respite_core::Break::new(
        parse_time_field("0:40").unwrap(),
        parse_time_field("15").unwrap(),
    );
    planner.update_break(0, edited).unwrap();

    // Persist and reload the plan.
    let mut plan = SessionPlan::new("Flow test", duration);
    plan.breaks = planner.breaks().to_vec();

    let file = NamedTempFile::new().unwrap();
    plan.save_to_file(file.path()).unwrap();
    let loaded = SessionPlan::load_from_file(file.path()).unwrap();

    assert_eq!(loaded.duration, duration);
    assert_eq!(loaded.breaks.len(), 2);
    assert_eq!(loaded.breaks[0], edited);
    assert_eq!(loaded.breaks[1].start, TimeValue::new(0, 10, 0));
}

#[test]
fn test_two_clicks_with_popup_closed_between_yield_two_breaks() {
    let scale = GridScale::default();
    let mut planner = BreakPlanner::new(scale);
    let mut grid = BreakGrid::new(TimeValue::new(1, 0, 0), scale);

    for y in [10.0, 20.0] {
        match grid.handle_press(y, planner.breaks()) {
            Some(BreakGridMessage::CreateRequested(at)) => {
                planner.create_break_at(at);
                grid.open_editor(planner.len() - 1);
            }
            other => panic!("expected creation at y={y}, got {other:?}"),
        }
        grid.close_editor();
    }

    let breaks = planner.breaks();
    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0].start, TimeValue::new(0, 10, 0));
    assert_eq!(breaks[1].start, TimeValue::new(0, 20, 0));
}

#[test]
fn test_resume_rebuilds_planner_from_saved_plan() {
    let duration = TimeValue::new(2, 0, 0);
    let scale = GridScale::default();

    let mut plan = SessionPlan::new("Resumable", duration);
    plan.breaks.push(respite_core::Break::new(
        TimeValue::new(0, 50, 0),
        DEFAULT_BREAK_DURATION,
    ));

    let file = NamedTempFile::new().unwrap();
    plan.save_to_file(file.path()).unwrap();
    let loaded = SessionPlan::load_from_file(file.path()).unwrap();

    let planner = BreakPlanner::with_breaks(scale, loaded.breaks.clone());
    let grid = BreakGrid::new(loaded.duration, scale);

    assert_eq!(planner.len(), 1);
    assert_eq!(grid.grid_height(), 120.0);
    // The restored interval is hit-testable where it was drawn.
    assert!(matches!(
        grid.handle_press(55.0, planner.breaks()),
        Some(BreakGridMessage::BreakSelected(0))
    ));
}

//! Lay out a plan from simulated grid clicks and print it
//!
//! Run with: cargo run --example plan_demo -p respite-core

use respite_core::{BreakPlanner, GridScale, SessionPlan, TimeValue};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("Respite Plan Demo");
    println!("=================\n");

    let duration = TimeValue::new(1, 30, 0);
    let scale = GridScale::default();
    let mut planner = BreakPlanner::new(scale);

    println!("Session duration: {duration}");
    println!("Grid height: {} px\n", scale.offset_of(duration));

    // Simulated pointer-down positions on the grid
    for y in [25.0, 45.0, 80.0] {
        let created = planner.create_break_at(y);
        println!(
            "Click at y={y:>5.1} -> break at {} for {}",
            created.start, created.duration
        );
    }

    let mut plan = SessionPlan::new("Demo session", duration);
    plan.breaks = planner.breaks().to_vec();

    println!("\nPlan as JSON:");
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

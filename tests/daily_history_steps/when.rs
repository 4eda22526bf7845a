//! When steps for daily history BDD scenarios.

use super::world::{HistoryWorld, run_async, step_day};
use rstest_bdd_macros::when;

#[when(r#"the history is recorded on "{date}""#)]
fn history_recorded(world: &mut HistoryWorld, date: String) -> Result<(), eyre::Report> {
    let today = step_day(&date)?;
    world.last_result = Some(run_async(world.engine.record_history(&world.tasks, today)));
    Ok(())
}

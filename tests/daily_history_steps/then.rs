//! Then steps for daily history BDD scenarios.

use super::world::HistoryWorld;
use rstest_bdd_macros::then;
use tasksheet::reconciliation::domain::history_header;

fn history_rows(world: &HistoryWorld) -> Result<Vec<Vec<String>>, eyre::Report> {
    if let Some(Err(err)) = &world.last_result {
        return Err(eyre::eyre!("history recording failed: {err}"));
    }
    world
        .store
        .rows(&HistoryWorld::history_title())
        .ok_or_else(|| eyre::eyre!("history worksheet missing"))
}

#[then("the history worksheet holds {count:u64} rows")]
fn history_holds(world: &HistoryWorld, count: u64) -> Result<(), eyre::Report> {
    let rows = history_rows(world)?;
    eyre::ensure!(
        u64::try_from(rows.len()).ok() == Some(count),
        "expected {count} rows, found {rows:?}"
    );
    Ok(())
}

#[then(r#"the row for "{date}" reads {closed:u64} closed of {total:u64}"#)]
fn row_reads(
    world: &HistoryWorld,
    date: String,
    closed: u64,
    total: u64,
) -> Result<(), eyre::Report> {
    let rows = history_rows(world)?;
    let row = rows
        .iter()
        .skip(1)
        .find(|row| row.first() == Some(&date))
        .ok_or_else(|| eyre::eyre!("no history row for {date}"))?;
    let expected = vec![date.clone(), closed.to_string(), total.to_string()];
    eyre::ensure!(row == &expected, "expected {expected:?}, found {row:?}");
    Ok(())
}

#[then("the first row is the history header")]
fn first_row_is_header(world: &HistoryWorld) -> Result<(), eyre::Report> {
    let rows = history_rows(world)?;
    eyre::ensure!(
        rows.first() == Some(&history_header()),
        "expected header first, found {rows:?}"
    );
    Ok(())
}

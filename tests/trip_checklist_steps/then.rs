//! Then steps for trip checklist BDD scenarios.

use super::world::ChecklistWorld;
use chrono::NaiveDate;
use rstest_bdd_macros::then;

#[then(r#"the checklist contains "{title}""#)]
fn checklist_contains(world: &ChecklistWorld, title: String) -> Result<(), eyre::Report> {
    if !world.tasks.iter().any(|task| task.title().as_str() == title) {
        return Err(eyre::eyre!("expected a task titled '{title}'"));
    }
    Ok(())
}

#[then(r#"the checklist does not contain "{title}""#)]
fn checklist_lacks(world: &ChecklistWorld, title: String) -> Result<(), eyre::Report> {
    if world.tasks.iter().any(|task| task.title().as_str() == title) {
        return Err(eyre::eyre!("did not expect a task titled '{title}'"));
    }
    Ok(())
}

#[then("the checklist has {count:usize} tasks")]
fn checklist_count(world: &ChecklistWorld, count: usize) -> Result<(), eyre::Report> {
    if world.tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks, found {}",
            world.tasks.len()
        ));
    }
    Ok(())
}

#[then(r#"the task "{title}" is due on "{date}""#)]
fn task_due_on(world: &ChecklistWorld, title: String, date: String) -> Result<(), eyre::Report> {
    let expected = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
    let task = world
        .tasks
        .iter()
        .find(|task| task.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("no task titled '{title}'"))?;
    if task.deadline() != Some(expected) {
        return Err(eyre::eyre!(
            "expected '{title}' due on {expected}, found {:?}",
            task.deadline()
        ));
    }
    Ok(())
}

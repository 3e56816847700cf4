use planner::{Field, Planner, SavedNotice, Task, ValidationError};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn task(description: &str, deadline: &str, category: &str) -> Task {
    Task::new(description, deadline, Some(category.to_string()))
}

fn seeded(tasks: &[Task]) -> Planner {
    let mut planner = Planner::new();
    for t in tasks {
        planner
            .add_or_update(&t.description, &t.deadline, t.category.as_deref())
            .unwrap();
    }
    planner.dismiss_notice();
    planner
}

#[test]
fn editing_the_only_task_replaces_it() {
    let mut planner = seeded(&[task("Buy milk", "2024-01-01 09:00", "errand")]);

    planner.begin_edit(0);
    let result = planner.add_or_update("Buy bread", "2024-01-02 09:00", Some("errand"));

    assert_eq!(result, Ok(SavedNotice::Updated));
    assert_eq!(
        planner.tasks(),
        &[task("Buy bread", "2024-01-02 09:00", "errand")]
    );
    assert_eq!(planner.edit_cursor(), None);
}

#[test]
fn deleting_before_the_edited_task_follows_it() {
    let a = task("A", "2024-01-01 09:00", "x");
    let b = task("B", "2024-01-02 09:00", "x");
    let c = task("C", "2024-01-03 09:00", "x");
    let mut planner = seeded(&[a, b.clone(), c.clone()]);

    planner.begin_edit(2);
    planner.delete(0);

    assert_eq!(planner.tasks(), &[b, c.clone()]);
    assert_eq!(planner.edit_cursor(), Some(1));
    assert_eq!(planner.tasks()[1], c);
}

#[test]
fn blank_description_is_ignored() {
    let a = task("A", "2024-01-01 09:00", "x");
    let mut planner = seeded(&[a.clone()]);

    let result = planner.add_or_update("", "2024-01-01 09:00", None);

    assert_eq!(result, Err(ValidationError::Blank(Field::Description)));
    assert_eq!(planner.tasks(), &[a]);
    assert_eq!(planner.notice(), None);
}

#[test]
fn search_is_display_only() {
    let planner = seeded(&[
        task("Buy milk", "2024-01-01 09:00", "errand"),
        task("Gym", "2024-01-01 18:00", "Health"),
    ]);

    assert_eq!(planner.search("").len(), 2);
    assert_eq!(planner.search("health")[0].description, "Gym");
    assert_eq!(planner.search("18:00")[0].description, "Gym");
    assert_eq!(planner.tasks().len(), 2);
}

/// Random add/edit/delete traffic, including stale indices, never leaves the
/// cursor dangling, and the cursor keeps pointing at the task it was put on.
#[test]
fn cursor_never_dangles_under_random_operations() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let mut planner = Planner::new();
        let mut editing: Option<Task> = None;
        let mut counter = 0u32;

        for _ in 0..200 {
            let len = planner.tasks().len();
            match rng.gen_range(0..4) {
                0 => {
                    counter += 1;
                    let description = if rng.gen_bool(0.1) {
                        String::new()
                    } else {
                        format!("task {counter}")
                    };
                    if planner
                        .add_or_update(&description, "2024-01-01 09:00", Some("c"))
                        .is_ok()
                    {
                        editing = None;
                    }
                }
                1 => {
                    let index = rng.gen_range(0..len + 2);
                    if let Some(t) = planner.begin_edit(index) {
                        editing = Some(t.clone());
                    }
                }
                2 => {
                    let index = rng.gen_range(0..len + 2);
                    let before = planner.edit_cursor();
                    if planner.delete(index).is_some() && before == Some(index) {
                        editing = None;
                    }
                }
                _ => {
                    planner.cancel_edit();
                    editing = None;
                }
            }

            match planner.edit_cursor() {
                Some(cursor) => {
                    assert!(cursor < planner.tasks().len());
                    assert_eq!(Some(&planner.tasks()[cursor]), editing.as_ref());
                }
                None => assert!(editing.is_none()),
            }
        }
    }
}

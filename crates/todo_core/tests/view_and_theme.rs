use std::collections::HashSet;
use todo_core::{
    escape_html, filter_tasks, parse_filter_mode, project, summarize, FilterMode, KeyValueStore,
    MemoryKvStore, StorageError, StorageResult, Task, TaskId, Theme, ThemeService, THEME_KEY,
};

fn mixed_tasks() -> Vec<Task> {
    (1..=9)
        .map(|n| Task {
            id: TaskId::new(n),
            text: format!("task {n}"),
            completed: n % 3 == 0,
        })
        .collect()
}

/// Every completion pattern for lists of up to six tasks.
fn completion_patterns() -> impl Iterator<Item = Vec<Task>> {
    (0..=6_u32).flat_map(|len| {
        (0..1_u32 << len).map(move |mask| {
            (0..len)
                .map(|bit| Task {
                    id: TaskId::new(u64::from(bit) + 1),
                    text: format!("task {bit}"),
                    completed: mask & (1 << bit) != 0,
                })
                .collect()
        })
    })
}

#[test]
fn active_and_completed_partition_every_completion_pattern() {
    for tasks in completion_patterns() {
        let active = filter_tasks(&tasks, FilterMode::Active);
        let completed = filter_tasks(&tasks, FilterMode::Completed);

        assert!(active.iter().all(Task::is_active));
        assert!(completed.iter().all(|t| t.completed));
        assert_eq!(active.len() + completed.len(), tasks.len());

        let mut merged: Vec<TaskId> = active.iter().chain(&completed).map(|t| t.id).collect();
        merged.sort();
        let mut all_ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        all_ids.sort();
        assert_eq!(merged, all_ids);
        assert_eq!(filter_tasks(&tasks, FilterMode::All), tasks);
    }
}

#[test]
fn active_and_completed_partition_every_task() {
    let tasks = mixed_tasks();
    let active = filter_tasks(&tasks, FilterMode::Active);
    let completed = filter_tasks(&tasks, FilterMode::Completed);

    let active_ids: HashSet<TaskId> = active.iter().map(|t| t.id).collect();
    let completed_ids: HashSet<TaskId> = completed.iter().map(|t| t.id).collect();
    assert!(active_ids.is_disjoint(&completed_ids));
    assert_eq!(active.len() + completed.len(), tasks.len());
    assert_eq!(filter_tasks(&tasks, FilterMode::All), tasks);
}

#[test]
fn summary_counts_agree_with_filter_counts() {
    let tasks = mixed_tasks();
    let active = filter_tasks(&tasks, FilterMode::Active).len();
    let completed = filter_tasks(&tasks, FilterMode::Completed).len();

    assert_eq!(
        summarize(&tasks, FilterMode::All),
        format!("9 tasks ({active} active)")
    );
    assert_eq!(
        summarize(&tasks, FilterMode::Active),
        format!("{active} active tasks")
    );
    assert_eq!(
        summarize(&tasks, FilterMode::Completed),
        format!("{completed} completed tasks")
    );
}

#[test]
fn filter_button_value_drives_projection() {
    let tasks = mixed_tasks();
    let mode = parse_filter_mode("completed").unwrap();
    let view = project(&tasks, mode);

    assert_eq!(view.filter, FilterMode::Completed);
    assert_eq!(view.rows.len(), 3);
    assert!(view.rows.iter().all(|row| row.completed));
    assert_eq!(view.summary, "3 completed tasks");
    assert!(!view.show_empty_state);
}

#[test]
fn empty_list_shows_empty_state() {
    let view = project(&[], FilterMode::All);
    assert!(view.show_empty_state);
    assert_eq!(view.summary, "0 tasks");
}

#[test]
fn rows_keep_raw_text_for_renderer_to_escape() {
    let tasks = vec![Task::new(TaskId::new(1), "Tom & Jerry <3")];
    let view = project(&tasks, FilterMode::All);
    assert_eq!(view.rows[0].text, "Tom & Jerry <3");
    assert_eq!(escape_html(&view.rows[0].text), "Tom &amp; Jerry &lt;3");
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            bytes: value.len(),
        })
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

#[test]
fn theme_follows_system_until_user_chooses() {
    let backing = MemoryKvStore::new();
    let mut themes = ThemeService::new(&backing);

    assert_eq!(themes.resolve(true), Theme::Dark);
    assert!(!themes.has_explicit_preference());
    assert_eq!(themes.on_system_change(false), Some(Theme::Light));
    assert_eq!(themes.current(), Theme::Light);

    assert_eq!(themes.toggle(), Theme::Dark);
    assert!(themes.has_explicit_preference());
    assert_eq!(backing.get(THEME_KEY).unwrap().as_deref(), Some(&b"dark"[..]));
    assert_eq!(themes.on_system_change(false), None);
    assert_eq!(themes.current(), Theme::Dark);
}

#[test]
fn saved_theme_wins_over_system_preference() {
    let backing = MemoryKvStore::new();
    backing.set(THEME_KEY, b"light").unwrap();

    let mut themes = ThemeService::new(&backing);
    assert_eq!(themes.resolve(true), Theme::Light);
}

#[test]
fn unreadable_saved_theme_falls_back_to_system() {
    let backing = MemoryKvStore::new();
    backing.set(THEME_KEY, b"neon").unwrap();

    let mut themes = ThemeService::new(&backing);
    assert_eq!(themes.saved(), None);
    assert_eq!(themes.resolve(true), Theme::Dark);
}

#[test]
fn theme_toggle_applies_even_when_save_fails() {
    let mut themes = ThemeService::new(ReadOnlyStore);
    themes.resolve(false);

    assert!(themes.set(Theme::Dark).is_err());
    assert_eq!(themes.current(), Theme::Dark);
    assert_eq!(themes.toggle(), Theme::Light);
    assert_eq!(themes.current(), Theme::Light);
}

use todo_core::{
    KeyValueStore, KvTaskRepository, MemoryKvStore, RepoError, Task, TaskId, TaskRepository,
    TaskService, DEFAULT_TASKS_KEY,
};

fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new(10),
            text: "Buy milk".to_string(),
            completed: false,
        },
        Task {
            id: TaskId::new(3),
            text: "<script>alert(1)</script> & \"quotes\"".to_string(),
            completed: true,
        },
        Task {
            id: TaskId::new(7),
            text: "ünïcödé ✓".to_string(),
            completed: false,
        },
    ]
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let repo = KvTaskRepository::new(MemoryKvStore::new());
    let tasks = sample_tasks();

    repo.save(&tasks).unwrap();
    assert_eq!(repo.load().unwrap(), tasks);
}

#[test]
fn save_then_load_round_trips_every_completion_pattern() {
    let texts = ["Buy milk", "<b>bold</b> & \"q\"", "ünïcödé ✓", "a\u{FEFF}b", "tab\there"];
    for len in 0..=texts.len() {
        for mask in 0..1_u32 << len {
            let tasks: Vec<Task> = texts[..len]
                .iter()
                .enumerate()
                .map(|(i, text)| Task {
                    // Descending ids so order cannot come from sorting.
                    id: TaskId::new((len - i) as u64 * 7),
                    text: (*text).to_string(),
                    completed: mask & (1 << i) != 0,
                })
                .collect();

            let repo = KvTaskRepository::new(MemoryKvStore::new());
            repo.save(&tasks).unwrap();
            assert_eq!(repo.load().unwrap(), tasks, "len={len} mask={mask:b}");
        }
    }
}

#[test]
fn absent_key_loads_empty() {
    let repo = KvTaskRepository::new(MemoryKvStore::new());
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn stored_value_is_json_array_under_fixed_key() {
    let backing = MemoryKvStore::new();
    let repo = KvTaskRepository::new(&backing);
    repo.save(&sample_tasks()[..1]).unwrap();

    let raw = backing.get(DEFAULT_TASKS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": 10, "text": "Buy milk", "completed": false }])
    );
}

#[test]
fn custom_key_isolates_lists() {
    let backing = MemoryKvStore::new();
    let work = KvTaskRepository::with_key(&backing, "todos-work");
    let home = KvTaskRepository::new(&backing);

    work.save(&sample_tasks()).unwrap();
    assert_eq!(work.key(), "todos-work");
    assert!(home.load().unwrap().is_empty());
}

#[test]
fn malformed_value_is_an_error_for_the_repo_but_fails_open_for_the_store() {
    let backing = MemoryKvStore::new();
    backing.set(DEFAULT_TASKS_KEY, b"{not json").unwrap();

    let repo = KvTaskRepository::new(&backing);
    assert!(matches!(repo.load(), Err(RepoError::Decode(_))));

    let service = TaskService::new(KvTaskRepository::new(&backing));
    assert!(service.is_empty());
    assert!(matches!(
        service.last_persistence_error(),
        Some(RepoError::Decode(_))
    ));
}

#[test]
fn duplicate_ids_in_storage_fail_open() {
    let backing = MemoryKvStore::new();
    backing
        .set(
            DEFAULT_TASKS_KEY,
            br#"[{"id":5,"text":"a","completed":false},{"id":5,"text":"b","completed":false}]"#,
        )
        .unwrap();

    let service = TaskService::new(KvTaskRepository::new(&backing));
    assert!(service.is_empty());
    assert!(matches!(
        service.last_persistence_error(),
        Some(RepoError::InvalidData(_))
    ));
}

#[test]
fn reopened_store_sees_previous_session_and_continues_ids() {
    let backing = MemoryKvStore::new();

    let first_id = {
        let mut service = TaskService::new(KvTaskRepository::new(&backing));
        let task = service.add("persist me").unwrap();
        service.toggle(task.id).unwrap();
        task.id
    };

    let mut reopened = TaskService::new(KvTaskRepository::new(&backing));
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get(first_id).unwrap().completed);

    let next = reopened.add("new session").unwrap();
    assert!(next.id > first_id);
}

#[test]
fn legacy_timestamp_ids_load_and_new_ids_stay_unique() {
    let backing = MemoryKvStore::new();
    backing
        .set(
            DEFAULT_TASKS_KEY,
            br#"[{"id":1718000000000,"text":"old task","completed":true}]"#,
        )
        .unwrap();

    let mut service = TaskService::new(KvTaskRepository::new(&backing));
    assert_eq!(service.len(), 1);
    assert_eq!(service.list()[0].id, TaskId::new(1_718_000_000_000));

    let added = service.add("fresh").unwrap();
    assert_eq!(added.id, TaskId::new(1_718_000_000_001));
}

#[test]
fn over_cap_text_from_storage_still_loads() {
    let long_text = "l".repeat(150);
    let backing = MemoryKvStore::new();
    let repo = KvTaskRepository::new(&backing);
    repo.save(&[Task::new(TaskId::new(1), long_text.clone())])
        .unwrap();

    let service = TaskService::new(KvTaskRepository::new(&backing));
    assert_eq!(service.list()[0].text, long_text);
}

#[test]
fn every_mutation_writes_through() {
    let backing = MemoryKvStore::new();
    let mut service = TaskService::new(KvTaskRepository::new(&backing));
    let reader = KvTaskRepository::new(&backing);

    let task = service.add("a").unwrap();
    assert_eq!(reader.load().unwrap(), service.list());

    service.toggle(task.id).unwrap();
    assert!(reader.load().unwrap()[0].completed);

    service.delete(task.id).unwrap();
    assert!(reader.load().unwrap().is_empty());
}

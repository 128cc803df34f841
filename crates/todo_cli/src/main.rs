//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todo_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use todo_core::{FilterMode, KvTaskRepository, MemoryKvStore, TaskService};

fn main() {
    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    let mut service = TaskService::new(KvTaskRepository::new(MemoryKvStore::new()));
    let seeded = ["Buy milk", "Walk dog"]
        .into_iter()
        .filter_map(|text| service.add(text).ok())
        .last();
    if let Some(task) = seeded {
        let _ = service.toggle(task.id);
    }

    for mode in FilterMode::ALL_MODES {
        service.set_filter(mode);
        println!("todo_core summary[{mode}]={}", service.summary());
    }
}

//! A persisted UI theme choice, the canonical use of a `PersistentCell`.
//!
//! `RUST_LOG=warn cargo run --example theme`

use std::rc::Rc;

use persistent_cell::{FileStorage, PersistentCell};

fn main() {
    pretty_env_logger::init();

    let path = std::env::temp_dir().join("persistent-cell-theme.json");
    let storage = Rc::new(FileStorage::new(&path));

    let theme = PersistentCell::new(storage.clone(), "theme", "light".to_string());
    println!("theme on startup: {}", theme.get());

    let _watch = theme.subscribe(|t| println!("theme changed to: {}", t));
    theme.set("dark".to_string());

    // The stored copy is what a later process would start from.
    let restarted = PersistentCell::new(storage.clone(), "theme", "light".to_string());
    println!("theme after a restart: {}", restarted.get());

    // Clearing removes only the stored entry; the live value stays.
    theme.clear();
    println!("theme after clear: {}", theme.get());

    let defaulted = PersistentCell::new(storage, "theme", "light".to_string());
    println!("theme after clear and a restart: {}", defaulted.get());
}

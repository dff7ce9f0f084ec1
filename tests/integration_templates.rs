use std::fs;

use tempfile::tempdir;

use termtype::app::{App, AppState};
use termtype::category::Category;
use termtype::config::{Config, ConfigStore, FileConfigStore};
use termtype::input::Command;
use termtype::templates::{install_samples, TemplateProvider, TemplateStore};

#[test]
fn user_templates_drive_a_session() {
    let root = tempdir().unwrap();
    let python = root.path().join("python");
    fs::create_dir_all(&python).unwrap();
    fs::write(
        python.join("mine.txt"),
        "# my snippets\nfor x in xs:\n    print(x)\n",
    )
    .unwrap();

    let config = Config {
        template_count: 3,
        templates_dir: Some(root.path().to_path_buf()),
        ..Config::default()
    };
    let mut app = App::new(config.clone(), TemplateStore::new(config.templates_root()));

    let python_info = app
        .menu()
        .iter()
        .find(|i| i.category == Category::Python)
        .unwrap();
    assert_eq!(python_info.count, 1);

    app.start_session(Category::Python);
    let session = app.session().unwrap();
    assert_eq!(session.templates().len(), 1);
    assert_eq!(session.current_line_text(), "for x in xs:");

    for line in ["for x in xs:", "    print(x)"] {
        for c in line.chars() {
            app.handle_command(Command::Insert(c));
        }
        app.handle_command(Command::Submit);
    }
    assert_eq!(app.state(), AppState::Results);
    assert_eq!(app.metrics().accuracy, 100.0);
}

#[test]
fn samples_cover_every_category() {
    let root = tempdir().unwrap();
    let created = install_samples(root.path()).unwrap();
    assert!(!created.is_empty());

    let mut store = TemplateStore::new(root.path());
    for info in store.category_info() {
        assert!(info.count > 0, "{} has no templates", info.category);
    }

    let picked = store.random_templates(Category::Easy, 2);
    assert_eq!(picked.len(), 2);
}

#[test]
fn config_round_trips_through_file_store() {
    let dir = tempdir().unwrap();
    let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
    assert!(!store.exists());
    assert_eq!(store.load(), Config::default());

    let cfg = Config {
        template_count: 4,
        default_category: Some(Category::Practice),
        min_width: 100,
        ..Config::default()
    };
    store.save(&cfg).unwrap();

    assert!(store.exists());
    assert_eq!(store.load(), cfg);
}

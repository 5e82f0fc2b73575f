use chrono::NaiveDate;
use op_agenda::{
    app::{AppState, CATEGORY_IN_USE_MESSAGE, EventDraft},
    calendar::{Repeat, format_date_key},
    input::form_input::{ScriptedInput, request_category_removal, request_new_category},
    storage::{SqliteStore, load_snapshot, save_categories, save_events},
    ui::month_view::calculate_layout,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
}

#[test]
fn agenda_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agenda.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        let mut app = AppState::for_date(today()).with_snapshot(load_snapshot(&mut store));

        let mut input = ScriptedInput::new(["Deep Work", "#123456"]);
        let category = request_new_category(&mut app, &mut input, 1_700_000_000_000).unwrap();
        assert_eq!(category.id, "deep-work-loyw3v28");
        save_categories(&mut store, &app.categories).unwrap();

        let key = format_date_key(2024, 1, 5);
        app.add_event(key, EventDraft {
            title: "Write chapter".to_string(),
            time: "09:30".to_string(),
            category_id: category.id.clone(),
            all_day: false,
            repeat: Repeat::Weekly,
            ..EventDraft::default()
        });
        save_events(&mut store, &app.events).unwrap();
    }

    let mut store = SqliteStore::open(&path).unwrap();
    let app = AppState::for_date(today()).with_snapshot(load_snapshot(&mut store));

    assert_eq!(app.categories.len(), 5);
    let event = app.selected_event().unwrap();
    assert_eq!(event.title, "Write chapter");
    assert_eq!(event.meta_label(&app.categories), "09:30 · Deep Work · Setmanal");

    let layout = calculate_layout(&app, today());
    let cell = layout
        .weeks
        .iter()
        .flat_map(|w| &w.days)
        .find(|c| c.is_selected)
        .unwrap();
    assert_eq!(cell.dot_colors, vec!["#123456"]);
}

#[test]
fn category_in_use_is_kept_until_its_events_are_gone() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut app = AppState::for_date(today()).with_snapshot(load_snapshot(&mut store));
    let key = app.selected_key.clone();
    app.add_event(key.clone(), EventDraft {
        title: "Run".to_string(),
        category_id: "training".to_string(),
        all_day: true,
        ..EventDraft::default()
    });

    let mut input = ScriptedInput::default();
    assert!(request_category_removal(&mut app, &mut input, "training").is_none());
    assert_eq!(input.notices, vec![CATEGORY_IN_USE_MESSAGE.to_string()]);

    app.delete_event(&key, 0);
    let removed = request_category_removal(&mut app, &mut input, "training").unwrap();
    save_categories(&mut store, &app.categories).unwrap();

    assert_eq!(removed.name, "Entrenaments");
    let reloaded = load_snapshot(&mut store);
    assert!(reloaded.categories.iter().all(|c| c.id != "training"));
    assert_eq!(reloaded.categories.len(), 3);
}

use stowage_core::{InventoryService, ItemAddress, ItemSize, SqliteStore};

fn service() -> InventoryService<SqliteStore> {
    InventoryService::new(SqliteStore::open_in_memory().unwrap())
}

fn address(token: &str) -> ItemAddress {
    token.parse().unwrap()
}

fn rows(service: &InventoryService<SqliteStore>) -> Vec<String> {
    service
        .items()
        .unwrap()
        .iter()
        .map(|row| row.to_string())
        .collect()
}

#[test]
fn empty_inventory_lists_nothing() {
    let service = service();
    assert!(rows(&service).is_empty());
}

#[test]
fn rows_sort_by_location_then_bin_then_name() {
    let mut service = service();
    service.add_location("Shelf", 4).unwrap();
    service.add_location("Bench", 8).unwrap();

    service.add_item(&address("Shelf/4"), "Wrench", ItemSize::M).unwrap();
    service.add_item(&address("Shelf/3"), "Hammer", ItemSize::M).unwrap();
    service.add_item(&address("Bench/6"), "Clamp", ItemSize::M).unwrap();
    service.add_item(&address("Shelf/4"), "Chisel", ItemSize::M).unwrap();

    assert_eq!(
        rows(&service),
        vec![
            "Bench/6: Clamp (M)",
            "Shelf/3: Hammer (M)",
            "Shelf/4: Chisel (M)",
            "Shelf/4: Wrench (M)",
        ]
    );
}

#[test]
fn name_ordering_ignores_case() {
    let mut service = service();
    service.add_location("Shelf", 1).unwrap();

    service.add_item(&address("Shelf/1"), "zebra print", ItemSize::S).unwrap();
    service.add_item(&address("Shelf/1"), "Anvil", ItemSize::S).unwrap();
    service.add_item(&address("Shelf/1"), "brush", ItemSize::S).unwrap();

    assert_eq!(
        rows(&service),
        vec![
            "Shelf/1: Anvil (S)",
            "Shelf/1: brush (S)",
            "Shelf/1: zebra print (S)",
        ]
    );
}

#[test]
fn identical_rows_keep_insertion_order() {
    let mut service = service();
    service.add_location("Shelf", 1).unwrap();

    service.add_item(&address("Shelf/1"), "Twin", ItemSize::S).unwrap();
    service.add_item(&address("Shelf/1"), "Twin", ItemSize::M).unwrap();

    assert_eq!(rows(&service), vec!["Shelf/1: Twin (S)", "Shelf/1: Twin (M)"]);
}

#[test]
fn listing_is_stable_across_repeated_calls() {
    let mut service = service();
    service.add_location("Shelf", 4).unwrap();
    service.add_location("Bench", 4).unwrap();

    for name in ["c", "a", "B", "d"] {
        service.add_item(&address("Shelf"), name, ItemSize::S).unwrap();
        service.add_item(&address("Bench"), name, ItemSize::L).unwrap();
    }

    let first = rows(&service);
    let second = rows(&service);
    assert_eq!(first, second);
}

#[test]
fn locations_list_in_store_order() {
    let mut service = service();
    service.add_location("Shelf", 4).unwrap();
    service.add_location("Bench", 8).unwrap();

    let names: Vec<String> = service
        .locations()
        .unwrap()
        .into_iter()
        .map(|location| format!("{} ({} bins)", location.name, location.num_bins))
        .collect();
    assert_eq!(names, vec!["Shelf (4 bins)", "Bench (8 bins)"]);
}

#[test]
fn undo_removes_the_latest_item_from_the_listing() {
    let mut service = service();
    service.add_location("Shelf", 2).unwrap();

    service.add_item(&address("Shelf"), "Keeper", ItemSize::S).unwrap();
    service.add_item(&address("Shelf"), "Mistake", ItemSize::S).unwrap();

    assert_eq!(service.undo().unwrap(), Some("add item Mistake".to_string()));
    assert_eq!(rows(&service), vec!["Shelf/1: Keeper (S)"]);
}

#[test]
fn validation_rejects_nonpositive_bin_counts_without_side_effects() {
    let mut service = service();

    assert!(service.add_location("Shelf", 0).is_err());
    assert!(service.add_location("Shelf", -3).is_err());
    assert!(service.locations().unwrap().is_empty());
}

mod common;

use common::{names, people};
use gridstate::sort::{Direction, Sort, SortFns, SortKey, sorted_rows};

#[test]
fn test_absent_keys_pass_through() {
    let data = people();
    assert_eq!(sorted_rows(&data, None, &SortFns::new()), data);
    assert_eq!(sorted_rows(&data, Some(&[]), &SortFns::new()), data);
}

#[test]
fn test_single_key_ascending() {
    let sort = Sort::new();
    sort.set("age", Direction::Asc);

    let rows = sort.apply(&people());
    assert_eq!(rows[0].name, "Dante Villa");
    assert_eq!(rows[0].age, 16);
    assert_eq!(rows[16].name, "Greta Lund");
    assert_eq!(rows[16].age, 61);
}

#[test]
fn test_single_key_descending() {
    let sort = Sort::new();
    sort.set("name", Direction::Desc);

    let rows = sort.apply(&people());
    assert_eq!(rows[0].name, "Zola Ray");
    assert_eq!(rows[16].name, "Amara Quinn");
}

#[test]
fn test_sort_is_stable() {
    // `active` has many duplicates; ties must keep input order.
    let sort = Sort::new();
    sort.set("active", Direction::Asc);

    let rows = sort.apply(&people());
    assert_eq!(
        names(&rows[..4]),
        vec!["Colette Marsh", "Greta Lund", "Jonas Reed", "Pia Sandoval"]
    );
    let expected_active: Vec<&str> = people()
        .iter()
        .filter(|p| p.active)
        .map(|p| p.name)
        .collect();
    assert_eq!(names(&rows[4..]), expected_active);
}

#[test]
fn test_multi_key_tie_break() {
    let sort = Sort::new();
    sort.set("age", Direction::Asc);
    sort.set("name", Direction::Desc);

    let rows = sort.apply(&people());
    let thirties: Vec<&str> = rows.iter().filter(|p| p.age == 30).map(|p| p.name).collect();
    assert_eq!(thirties, vec!["Zola Ray", "Sterling Pugh", "Olivia Camacho"]);
    // Age remains the primary key.
    assert!(rows.windows(2).all(|w| w[0].age <= w[1].age));
}

#[test]
fn test_resetting_a_field_moves_it_to_the_end() {
    let sort = Sort::<common::Person>::new();
    sort.set("name", Direction::Asc);
    sort.set("age", Direction::Asc);
    sort.set("name", Direction::Desc);

    assert_eq!(
        sort.state(),
        vec![
            SortKey::new("age", Direction::Asc),
            SortKey::new("name", Direction::Desc),
        ]
    );
}

#[test]
fn test_clear_removes_the_key() {
    let data = people();
    let sort = Sort::new();

    sort.set("name", Direction::Asc);
    assert_eq!(sort.direction("name"), Some(Direction::Asc));

    sort.clear("name");
    assert!(sort.state().is_empty());
    assert_eq!(sort.direction("name"), None);
    assert_eq!(sort.apply(&data), data);
}

#[test]
fn test_toggle_flips_in_place() {
    let sort = Sort::<common::Person>::new();

    assert_eq!(sort.toggle("age"), Direction::Asc);
    assert_eq!(sort.state(), vec![SortKey::new("age", Direction::Asc)]);

    sort.set("name", Direction::Asc);
    assert_eq!(sort.toggle("age"), Direction::Desc);
    // Toggling keeps the key's tie-break priority.
    assert_eq!(
        sort.state(),
        vec![
            SortKey::new("age", Direction::Desc),
            SortKey::new("name", Direction::Asc),
        ]
    );
}

#[test]
fn test_custom_comparator_takes_precedence() {
    let sort = Sort::new().with_comparator("name", |a: &common::Person, b: &common::Person| {
        a.name.len().cmp(&b.name.len())
    });
    sort.set("name", Direction::Asc);

    let rows = sort.apply(&people());
    assert_eq!(rows[0].name, "Zola Ray");
    assert_eq!(rows[16].name, "Olivia Camacho");
}

#[test]
fn test_custom_comparator_result_is_not_flipped_by_direction() {
    let sort = Sort::new().with_comparator("name", |a: &common::Person, b: &common::Person| {
        a.name.len().cmp(&b.name.len())
    });
    sort.set("name", Direction::Desc);

    // The comparator owns the order; Desc does not reverse it.
    let rows = sort.apply(&people());
    assert_eq!(rows[0].name, "Zola Ray");
    assert_eq!(rows[16].name, "Olivia Camacho");
}

#[test]
fn test_dirty_tracking() {
    let sort = Sort::<common::Person>::new();
    assert!(!sort.is_dirty());

    sort.set("age", Direction::Asc);
    assert!(sort.is_dirty());

    sort.clear_dirty();
    assert!(!sort.is_dirty());
}

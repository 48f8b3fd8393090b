use joluv::paging::{MY_COURSES_PAGE_SIZE, PageView, Paginator, SEARCH_PAGE_SIZE};

#[test]
fn test_twenty_three_results_make_three_pages() {
    let items: Vec<u32> = (1..=23).collect();
    let p = Paginator::new(items.len(), SEARCH_PAGE_SIZE);

    assert_eq!(p.page_count(), 3);
    assert_eq!(p.slice(&items, 1), &items[0..10]);
    assert_eq!(p.slice(&items, 3), &[21, 22, 23]);
    assert!(p.slice(&items, 4).is_empty());
    assert!(p.slice(&items, 0).is_empty());
}

#[test]
fn test_empty_list_has_no_pages() {
    let p = Paginator::new(0, MY_COURSES_PAGE_SIZE);
    assert_eq!(p.page_count(), 0);
    assert_eq!(p.clamp_page(7), 1);
    assert!(p.page_group(1).is_empty());

    let view = PageView::<u32>::of(&[], MY_COURSES_PAGE_SIZE, 3);
    assert_eq!(view.page, 1);
    assert!(view.items.is_empty());
    assert_eq!(view.page_count, 0);
}

#[test]
fn test_exact_multiple_has_no_trailing_page() {
    let p = Paginator::new(20, 10);
    assert_eq!(p.page_count(), 2);
    assert_eq!(p.item_range(2), 10..20);
}

#[test]
fn test_page_groups_of_five() {
    let p = Paginator::new(63, 5); // 13 pages

    assert_eq!(p.page_group(1), 1..=5);
    assert_eq!(p.page_group(5), 1..=5);
    assert_eq!(p.page_group(6), 6..=10);
    assert_eq!(p.page_group(13), 11..=13);
    assert!(!p.has_prev_group(3));
    assert!(p.has_next_group(3));
    assert!(p.has_prev_group(12));
    assert!(!p.has_next_group(12));
}

#[test]
fn test_page_view_clamps_out_of_range_page() {
    let items: Vec<u32> = (1..=12).collect();
    let view = PageView::of(&items, 5, 9);

    assert_eq!(view.page, 3);
    assert_eq!(view.items, vec![11, 12]);
    assert_eq!(view.total_items, 12);
    assert_eq!(view.group, 1..=3);
}

#[test]
fn test_zero_page_size_is_treated_as_one() {
    let p = Paginator::new(3, 0);
    assert_eq!(p.page_count(), 3);
}

use super::*;

#[test]
fn rect_contains_is_inclusive_exclusive() {
    let r = Rect::new(10, 20, 3, 2); // x:10..13, y:20..22
    assert!(r.contains(Pos::new(10, 20)));
    assert!(r.contains(Pos::new(12, 21)));

    // Right/bottom edges are exclusive.
    assert!(!r.contains(Pos::new(13, 20)));
    assert!(!r.contains(Pos::new(12, 22)));

    // Outside.
    assert!(!r.contains(Pos::new(9, 20)));
    assert!(!r.contains(Pos::new(10, 19)));
}

#[test]
fn rect_empty_never_contains() {
    let r = Rect::new(0, 0, 0, 10);
    assert!(!r.contains(Pos::new(0, 0)));
    let r = Rect::new(0, 0, 10, 0);
    assert!(!r.contains(Pos::new(0, 0)));
}

#[test]
fn intersect_clips_to_overlap() {
    let a = Rect::new(0, 0, 10, 5);
    let b = Rect::new(6, 3, 10, 10);
    assert_eq!(a.intersect(b), Rect::new(6, 3, 4, 2));
    assert!(a.intersect(Rect::new(20, 20, 2, 2)).is_empty());
}

#[test]
fn split_and_center_stay_inside() {
    let area = Rect::new(0, 0, 80, 24);
    let (top, bottom) = area.split_bottom(5);
    assert_eq!(top, Rect::new(0, 0, 80, 19));
    assert_eq!(bottom, Rect::new(0, 19, 80, 5));

    assert_eq!(area.centered(40, 3), Rect::new(20, 10, 40, 3));
    assert_eq!(area.centered(100, 30), area);

    assert_eq!(area.row(2), Rect::new(0, 2, 80, 1));
    assert!(area.row(24).is_empty());
}

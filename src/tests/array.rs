use crate::array::{inserted, removed, replaced};

#[test]
fn insert_at_each_position() {
    let base = [1, 2, 3];
    assert_eq!(inserted(&base, 0, 0), vec![0, 1, 2, 3]);
    assert_eq!(inserted(&base, 2, 9), vec![1, 2, 9, 3]);
    assert_eq!(inserted(&base, 3, 4), vec![1, 2, 3, 4]);
    assert_eq!(base, [1, 2, 3], "source must be untouched");
}

#[test]
fn insert_into_empty() {
    let base: [u8; 0] = [];
    assert_eq!(inserted(&base, 0, 7), vec![7]);
}

#[test]
fn replace_keeps_length() {
    let base = vec!["a", "b", "c"];
    assert_eq!(replaced(&base, 1, "x"), vec!["a", "x", "c"]);
    assert_eq!(base, vec!["a", "b", "c"]);
}

#[test]
fn remove_shifts_down() {
    let base = [1, 2, 3, 4];
    assert_eq!(removed(&base, 0), vec![2, 3, 4]);
    assert_eq!(removed(&base, 3), vec![1, 2, 3]);
    assert_eq!(removed(&[5], 0), Vec::<i32>::new());
}

#[test]
#[should_panic(expected = "out of range")]
fn remove_past_end_panics() {
    let _ = removed(&[1, 2], 2);
}

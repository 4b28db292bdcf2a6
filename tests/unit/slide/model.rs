use super::*;
use crate::foundation::core::Rect;
use crate::slide::component::{ComponentKind, TextFormat};

fn text(s: &str) -> SlideComponent {
    SlideComponent::new(
        Rect::new(0.0, 0.0, 10.0, 10.0),
        ComponentKind::Text {
            text: s.to_string(),
            format: TextFormat::default(),
        },
    )
}

fn order(slide: &Slide) -> Vec<u64> {
    slide.components().iter().map(|c| c.id().0).collect()
}

fn slide_abcd() -> (Slide, [ComponentId; 4]) {
    let mut s = Slide::new("verse 1");
    let ids = [s.add(text("a")), s.add(text("b")), s.add(text("c")), s.add(text("d"))];
    (s, ids)
}

#[test]
fn add_assigns_unique_ids_on_top() {
    let (s, ids) = slide_abcd();
    assert_eq!(order(&s), vec![0, 1, 2, 3]);
    assert_eq!(s.order_of(ids[3]), Some(3));
    assert_eq!(s.get(ids[1]).unwrap().id(), ids[1]);
}

#[test]
fn ids_are_not_reused_after_remove() {
    let (mut s, ids) = slide_abcd();
    s.remove(ids[3]).unwrap();
    let e = s.add(text("e"));
    assert_eq!(e, ComponentId(4));
    assert_eq!(order(&s), vec![0, 1, 2, 4]);
}

#[test]
fn remove_keeps_order_contiguous() {
    let (mut s, ids) = slide_abcd();
    let removed = s.remove(ids[1]).unwrap();
    assert_eq!(removed.id(), ids[1]);
    assert_eq!(order(&s), vec![0, 2, 3]);
    assert_eq!(s.order_of(ids[2]), Some(1));
}

#[test]
fn move_up_and_down() {
    let (mut s, ids) = slide_abcd();
    s.move_up(ids[0]).unwrap();
    assert_eq!(order(&s), vec![1, 0, 2, 3]);
    s.move_down(ids[3]).unwrap();
    assert_eq!(order(&s), vec![1, 0, 3, 2]);

    // Edges are no-ops.
    s.move_down(ids[1]).unwrap();
    s.move_up(ids[2]).unwrap();
    assert_eq!(order(&s), vec![1, 0, 3, 2]);
}

#[test]
fn move_to_front_and_back() {
    let (mut s, ids) = slide_abcd();
    s.move_to_front(ids[1]).unwrap();
    assert_eq!(order(&s), vec![0, 2, 3, 1]);
    s.move_to_back(ids[3]).unwrap();
    assert_eq!(order(&s), vec![3, 0, 2, 1]);
}

#[test]
fn unknown_id_is_a_validation_error() {
    let (mut s, _) = slide_abcd();
    let missing = ComponentId(99);
    assert!(s.remove(missing).is_err());
    assert!(s.move_up(missing).is_err());
    assert!(s.move_to_back(missing).is_err());
    let err = s.move_to_front(missing).unwrap_err();
    assert!(err.to_string().contains("#99"));
    assert_eq!(order(&s), vec![0, 1, 2, 3]);
}

#[test]
fn get_mut_edits_in_place() {
    let (mut s, ids) = slide_abcd();
    s.get_mut(ids[2]).unwrap().visible = false;
    assert!(!s.get(ids[2]).unwrap().visible);
}

use super::*;

#[test]
fn line_breaks_are_normalized() {
    assert_eq!(normalize_line_breaks("a\r\nb\rc\nd"), "a\nb\nc\nd");
    assert_eq!(normalize_line_breaks("x\u{2028}y\u{2029}z\u{85}"), "x\ny\nz\n");
    assert_eq!(normalize_line_breaks("\r\n\r\n"), "\n\n");
    assert_eq!(normalize_line_breaks("plain"), "plain");
}

#[test]
fn padding_inset_and_degenerate_boxes() {
    let b = Rect::new(10.0, 10.0, 110.0, 60.0);
    let inner = Padding::uniform(5.0).inset(b).unwrap();
    assert_eq!(inner, Rect::new(15.0, 15.0, 105.0, 55.0));

    assert!(Padding::uniform(25.0).inset(b).is_none());
    let lopsided = Padding {
        left: 60.0,
        right: 40.0,
        ..Padding::default()
    };
    assert!(lopsided.inset(b).is_none());
}

#[test]
fn alignment_offsets() {
    assert_eq!(horizontal_offset(HorizontalAlign::Left, 100.0, 40.0), 0.0);
    assert_eq!(horizontal_offset(HorizontalAlign::Center, 100.0, 40.0), 30.0);
    assert_eq!(horizontal_offset(HorizontalAlign::Right, 100.0, 40.0), 60.0);

    assert_eq!(vertical_offset(VerticalAlign::Top, 50.0, 20.0), 0.0);
    assert_eq!(vertical_offset(VerticalAlign::Center, 50.0, 20.0), 15.0);
    assert_eq!(vertical_offset(VerticalAlign::Bottom, 50.0, 20.0), 30.0);
}

#[test]
fn overflowing_text_offsets_go_negative() {
    assert_eq!(vertical_offset(VerticalAlign::Bottom, 10.0, 30.0), -20.0);
}

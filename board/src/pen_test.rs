use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn move_without_down_produces_nothing() {
    let mut pen = Pen::new();
    assert!(pen.pointer_move(p(10.0, 10.0)).is_none());
    assert!(!pen.is_drawing());
}

#[test]
fn down_then_move_yields_segment_from_anchor() {
    let mut pen = Pen::new();
    pen.pointer_down(p(1.0, 2.0));
    let segment = pen.pointer_move(p(3.0, 4.0)).expect("segment");

    assert_eq!(segment.last_pos, p(1.0, 2.0));
    assert_eq!(segment.end(), p(3.0, 4.0));
}

#[test]
fn anchor_advances_between_moves() {
    let mut pen = Pen::new();
    pen.pointer_down(p(0.0, 0.0));

    let first = pen.pointer_move(p(5.0, 0.0)).expect("first");
    let second = pen.pointer_move(p(5.0, 5.0)).expect("second");

    assert_eq!(first.last_pos, p(0.0, 0.0));
    assert_eq!(second.last_pos, p(5.0, 0.0));
    assert_eq!(second.end(), p(5.0, 5.0));
}

#[test]
fn up_ends_the_stroke() {
    let mut pen = Pen::new();
    pen.pointer_down(p(0.0, 0.0));
    pen.pointer_up();

    assert!(!pen.is_drawing());
    assert!(pen.pointer_move(p(1.0, 1.0)).is_none());
}

#[test]
fn leave_behaves_like_up() {
    let mut pen = Pen::new();
    pen.pointer_down(p(0.0, 0.0));
    pen.pointer_leave();

    assert!(!pen.is_drawing());
    assert!(pen.pointer_move(p(1.0, 1.0)).is_none());
}

#[test]
fn down_again_re_anchors() {
    let mut pen = Pen::new();
    pen.pointer_down(p(0.0, 0.0));
    pen.pointer_up();
    pen.pointer_down(p(100.0, 100.0));

    let segment = pen.pointer_move(p(101.0, 100.0)).expect("segment");
    assert_eq!(segment.last_pos, p(100.0, 100.0));
}

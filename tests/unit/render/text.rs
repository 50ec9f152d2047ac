use super::*;

fn styled(align: TextAlign, baseline: TextBaseline) -> TextStyle {
    TextStyle {
        align,
        baseline,
        ..TextStyle::new(9.0)
    }
}

#[test]
fn label_characters_all_shape() {
    let style = TextStyle::new(9.0).bold();
    for c in "0123456789%".chars() {
        let run = layout_text(&c.to_string(), Point::new(8.0, 8.0), &style).unwrap();
        assert_eq!(run.glyph_count(), 1, "'{c}' did not shape to one glyph");
        assert!(run.width() > 0.0);
    }
}

#[test]
fn empty_text_has_no_glyphs() {
    let run = layout_text("", Point::new(8.0, 8.0), &TextStyle::new(9.0)).unwrap();
    assert!(run.is_empty());
    assert_eq!(run.width(), 0.0);
}

#[test]
fn alignment_shifts_the_pen_by_the_line_width() {
    let at = Point::new(8.0, 8.0);
    let left = layout_text("42", at, &styled(TextAlign::Left, TextBaseline::Alphabetic)).unwrap();
    let center =
        layout_text("42", at, &styled(TextAlign::Center, TextBaseline::Alphabetic)).unwrap();
    let right = layout_text("42", at, &styled(TextAlign::Right, TextBaseline::Alphabetic)).unwrap();

    let w = left.width();
    assert!(w > 0.0);
    let x0 = |run: &TextRun| run.positions().next().unwrap().x;
    assert!((x0(&left) - 8.0).abs() < 1e-3);
    assert!((x0(&center) - (8.0 - w / 2.0)).abs() < 1e-3);
    assert!((x0(&right) - (8.0 - w)).abs() < 1e-3);
}

#[test]
fn baselines_order_top_to_bottom() {
    let at = Point::new(8.0, 8.0);
    let y0 = |baseline| {
        layout_text("7", at, &styled(TextAlign::Center, baseline))
            .unwrap()
            .positions()
            .next()
            .unwrap()
            .y
    };
    let alphabetic = y0(TextBaseline::Alphabetic);
    assert!((alphabetic - 8.0).abs() < 1e-3);
    // Pen y is the glyph baseline; anchoring higher on the glyph pushes it down.
    let top = y0(TextBaseline::Top);
    let middle = y0(TextBaseline::Middle);
    let bottom = y0(TextBaseline::Bottom);
    assert!(top > middle, "top {top} middle {middle}");
    assert!(middle > alphabetic, "middle {middle} alphabetic {alphabetic}");
    assert!(bottom < alphabetic, "bottom {bottom} alphabetic {alphabetic}");
}

#[test]
fn bold_digits_are_wider() {
    let normal = text_width("100", &TextStyle::new(9.0)).unwrap();
    let bold = text_width("100", &TextStyle::new(9.0).bold()).unwrap();
    assert!(bold > normal, "bold {bold} normal {normal}");
}

#[test]
fn rejects_non_positive_size() {
    for size in [0.0, -3.0, f64::NAN] {
        assert!(matches!(
            layout_text("1", Point::ZERO, &TextStyle::new(size)),
            Err(DlIconError::Validation(_))
        ));
    }
}

use super::*;

#[test]
fn editing_in_the_middle_of_the_buffer() {
    let mut input = Input::with_text("wng");
    input.move_left();
    input.move_left();
    input.insert_char('i');
    assert_eq!(input.buf, "wing");
    assert_eq!(input.cursor, 2);

    input.delete();
    assert_eq!(input.buf, "wig");
    input.backspace();
    assert_eq!(input.buf, "wg");
    assert_eq!(input.cursor, 1);
}

#[test]
fn multibyte_characters_are_edited_whole() {
    let mut input = Input::with_text("Zoë");
    input.backspace();
    assert_eq!(input.buf, "Zo");
    input.insert_char('é');
    assert_eq!(input.buf, "Zoé");
    input.move_right();
    assert_eq!(input.cursor, 3);
}

#[test]
fn edges_are_no_ops() {
    let mut input = Input::default();
    input.backspace();
    input.delete();
    input.move_left();
    assert_eq!(input.cursor, 0);
    input.insert_char('a');
    input.clear();
    assert!(input.buf.is_empty());
}

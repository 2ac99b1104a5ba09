//! Integration tests for the editor
//!
//! These tests drive complete editing sessions through a scripted terminal
//! and check the files written to a scratch directory.

use std::fs;

use iclass::{keys, Editor, FsStore, RunOutcome, ScriptedTerminal, Style};
use iclass_core::{
    highlight_line, Capacity, Category, EditorCore, EditorMode, EditorSnapshot, Key, Language,
    Position, MSG_UNSAVED,
};
use tempfile::TempDir;

fn editor_in(dir: &TempDir) -> Editor {
    Editor::new(FsStore::with_root(dir.path()), Capacity::default())
}

fn run_script(editor: &mut Editor, script: &str) -> (RunOutcome, ScriptedTerminal) {
    let mut term = ScriptedTerminal::with_keys(24, 80, keys(script));
    let outcome = editor.run(&mut term).unwrap();
    (outcome, term)
}

fn spans(line: &[u8], language: Language) -> Vec<(&str, Category)> {
    highlight_line(line, language)
        .into_iter()
        .map(|span| (std::str::from_utf8(&line[span.range()]).unwrap(), span.category))
        .collect()
}

#[test]
fn test_new_file_insert_and_save_as() {
    // i hello <Esc> :w <Enter> t.txt <Enter> :q <Enter>
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);

    let (outcome, _) = run_script(&mut editor, "ihello\x1b:w\nt.txt\n:q\n");

    assert_eq!(outcome, RunOutcome::Quit { forced: false });
    assert_eq!(fs::read(dir.path().join("t.txt")).unwrap(), b"hello\n");
    assert_eq!(editor.core().filename(), "t.txt");
    assert!(!editor.core().dirty());
}

#[test]
fn test_save_prompt_is_echoed() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);

    let (outcome, term) = run_script(&mut editor, "ix\x1b:w\nt.t");

    assert_eq!(outcome, RunOutcome::InputClosed);
    assert_eq!(term.row_text(23), "Enter filename: t.t");
    assert_eq!(term.cursor(), (23, 19));
}

#[test]
fn test_load_c_file_highlighting() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("x.c"), "int x = 42;\n").unwrap();

    let mut editor = editor_in(&dir);
    editor.open("x.c");
    assert_eq!(editor.core().language(), Language::C);

    use Category::*;
    assert_eq!(
        spans(editor.core().buffer().line(0), editor.core().language()),
        vec![
            ("int", Keyword),
            (" ", Default),
            ("x", Default),
            (" ", Default),
            ("=", Symbol),
            (" ", Default),
            ("42", Number),
            (";", Symbol),
        ]
    );

    let (_, term) = run_script(&mut editor, "");
    assert_eq!(term.row_text(0), "   1 int x = 42;");
    assert_eq!(term.style_at(0, 5), Some(Style::Keyword));
    assert_eq!(term.style_at(0, 13), Some(Style::Number));
    assert_eq!(term.row_text(22), " COMMAND | C | Line 1, Col 1 | x.c");
}

#[test]
fn test_python_auto_indent() {
    let mut core = EditorCore::new();
    core.set_language(Language::Python);
    for key in keys("idef f():\n") {
        core.apply_key(key);
    }

    assert_eq!(core.buffer().line(1), b"    ");
    assert_eq!(core.cursor(), Position::new(1, 4));
}

#[test]
fn test_c_auto_indent_and_dedent() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);
    editor.core_mut().set_language(Language::C);

    run_script(&mut editor, "iif (x) {\n");
    assert_eq!(editor.core().buffer().line(1), b"    ");
    assert_eq!(editor.core().cursor().col, 4);

    run_script(&mut editor, "}\n");
    assert_eq!(editor.core().buffer().line(1), b"    }");
    assert_eq!(editor.core().buffer().line(2), b"");
    assert_eq!(editor.core().cursor(), Position::new(2, 0));
}

#[test]
fn test_quit_with_unsaved_changes() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);

    let (outcome, term) = run_script(&mut editor, "iedit\x1b:q\n");
    assert_eq!(outcome, RunOutcome::InputClosed);
    assert_eq!(term.row_text(23), MSG_UNSAVED);
    assert!(term.row_text(22).ends_with("[Modified]"));

    let (outcome, _) = run_script(&mut editor, ":q!\n");
    assert_eq!(outcome, RunOutcome::Quit { forced: true });
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_load_asm_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.s"), "mov eax, 1 ; set syscall\n").unwrap();

    let mut editor = editor_in(&dir);
    editor.open("main.s");
    assert_eq!(editor.core().language(), Language::Asm);

    use Category::*;
    assert_eq!(
        spans(editor.core().buffer().line(0), Language::Asm),
        vec![
            ("mov", Keyword),
            (" ", Default),
            ("eax", Register),
            (",", Default),
            (" ", Default),
            ("1", Number),
            (" ", Default),
            ("; set syscall", Comment),
        ]
    );
}

#[test]
fn test_open_missing_file_then_save() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);
    editor.open("fresh.py");

    let (_, term) = run_script(&mut editor, "");
    assert_eq!(term.row_text(23), "Could not open file: fresh.py");

    let (outcome, term) = run_script(&mut editor, "iif x:\npass\x1b:w\n");
    assert_eq!(outcome, RunOutcome::InputClosed);
    assert_eq!(term.row_text(23), "File saved successfully.");
    assert_eq!(fs::read(dir.path().join("fresh.py")).unwrap(), b"if x:\n    pass\n");
}

#[test]
fn test_write_as_switches_language() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);

    let (_, term) = run_script(&mut editor, "iint y;\x1b:w out.c\n");
    assert_eq!(editor.core().filename(), "out.c");
    assert_eq!(editor.core().language(), Language::C);
    assert_eq!(term.style_at(0, 5), Some(Style::Keyword));
    assert_eq!(fs::read(dir.path().join("out.c")).unwrap(), b"int y;\n");
}

#[test]
fn test_edit_existing_file_round_trip() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "first\nsecond\nthird\n").unwrap();

    let mut editor = editor_in(&dir);
    editor.open("notes.txt");

    // Join "second" onto "first", then split it back off
    let mut term = ScriptedTerminal::new(24, 80);
    term.push_keys([Key::Down, Key::Char(b'i'), Key::Backspace]);
    editor.run(&mut term).unwrap();
    assert_eq!(editor.core().buffer().line(0), b"firstsecond");
    assert!(editor.core().dirty());

    term.push_keys([Key::Enter, Key::Escape]);
    editor.run(&mut term).unwrap();
    assert!(!editor.core().dirty());

    run_script(&mut editor, ":w\n");
    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), b"first\nsecond\nthird\n");
}

#[test]
fn test_blank_line_after_last_line_is_unsaved() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hello.txt"), "hello\n").unwrap();

    let mut editor = editor_in(&dir);
    editor.open("hello.txt");

    let mut term = ScriptedTerminal::new(24, 80);
    term.push_keys([Key::End, Key::Char(b'i'), Key::Enter, Key::Escape]);
    term.push_keys(keys(":q\n"));
    let outcome = editor.run(&mut term).unwrap();

    assert_eq!(outcome, RunOutcome::InputClosed);
    assert!(editor.core().dirty());
    assert_eq!(term.row_text(23), MSG_UNSAVED);
    assert!(term.row_text(22).ends_with("[Modified]"));

    run_script(&mut editor, ":w\n");
    assert_eq!(fs::read(dir.path().join("hello.txt")).unwrap(), b"hello\n\n");
    assert!(!editor.core().dirty());
}

#[test]
fn test_help_screen() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);

    let (_, term) = run_script(&mut editor, ":h\n");
    assert_eq!(term.row_text(0), "Iclass v1.0.1 - Help");
    assert_eq!(term.row_text(18), "Press any key to continue...");

    // The dismissing key is swallowed
    let (_, term) = run_script(&mut editor, "i");
    assert_eq!(editor.core().mode(), EditorMode::Command);
    assert_eq!(term.row_text(0), "   1");
}

#[test]
fn test_language_commands() {
    let dir = TempDir::new().unwrap();
    let mut editor = editor_in(&dir);

    let (_, term) = run_script(&mut editor, ":a\n");
    assert_eq!(editor.core().language(), Language::Asm);
    assert!(term.row_text(22).contains("| Assembly |"));

    run_script(&mut editor, ":n\n");
    assert_eq!(editor.core().language(), Language::None);

    let (_, term) = run_script(&mut editor, ":x\n");
    assert_eq!(term.row_text(23), "Unknown command: x");
}

#[test]
fn test_scrolling_keeps_cursor_visible() {
    let dir = TempDir::new().unwrap();
    let content: String = (1..=60).map(|n| format!("line {}\n", n)).collect();
    fs::write(dir.path().join("long.txt"), content).unwrap();

    let mut editor = editor_in(&dir);
    editor.open("long.txt");

    let mut term = ScriptedTerminal::with_keys(24, 80, vec![Key::Down; 40]);
    editor.run(&mut term).unwrap();

    // 21 text rows: line 41 is on the last one
    assert_eq!(editor.core().viewport().top_line(), 20);
    assert_eq!(term.row_text(20), "  41 line 41");
    assert_eq!(term.cursor(), (20, 5));

    term.push_keys(vec![Key::Up; 25]);
    editor.run(&mut term).unwrap();
    assert_eq!(editor.core().viewport().top_line(), 15);
    assert_eq!(term.row_text(0), "  16 line 16");
}

#[test]
fn test_long_lines_split_on_load() {
    let dir = TempDir::new().unwrap();
    let mut content = vec![b'a'; 20];
    content.push(b'\n');
    fs::write(dir.path().join("wide.txt"), &content).unwrap();

    let mut editor = Editor::new(FsStore::with_root(dir.path()), Capacity::new(10, 8));
    editor.open("wide.txt");

    let buffer = editor.core().buffer();
    assert_eq!(buffer.line(0), b"aaaaaaa");
    assert_eq!(buffer.line(1), b"aaaaaaa");
    assert_eq!(buffer.line(2), b"aaaaaa");
    assert!(buffer.is_line_empty(3));
}

#[test]
fn test_capacity_limits_refuse_edits() {
    let dir = TempDir::new().unwrap();
    let mut editor = Editor::new(FsStore::with_root(dir.path()), Capacity::new(3, 8));

    run_script(&mut editor, "iabcdefghij\n\n\n\n");
    let buffer = editor.core().buffer();
    assert_eq!(buffer.line(0), b"abcdef");
    assert_eq!(buffer.line_count(), 3);
    // The third Enter has no free slot left
    assert_eq!(editor.core().cursor(), Position::new(2, 0));
}

#[test]
fn test_same_keys_same_snapshot() {
    let script = "iint main() {\nreturn 0;\n}\x1b:c\n";

    let mut first = EditorCore::new();
    let mut second = EditorCore::new();
    for key in keys(script) {
        first.apply_key(key);
        second.apply_key(key);
    }

    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(first.snapshot().buffer_lines.len(), 3);
}

#[test]
fn test_snapshot_serializes() {
    let mut core = EditorCore::new();
    core.set_filename("a.py");
    for key in keys("iprint(1)") {
        core.apply_key(key);
    }

    let snapshot = core.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: EditorSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
    assert_eq!(restored.language, Language::Python);
    assert_eq!(restored.mode, EditorMode::Insert);
}

//! Baseline behaviour on the shapes of input the harness feeds it

use pybench_baseline::ast::{Item, Stmt};
use pybench_baseline::{parse, tokenize, Token};

#[test]
fn test_flat_token_stream_tokenizes() {
    let stream = r#"bool False . Z 0 "Quote2" >= elif V 232.0 range != None import i "#;
    let tokens = tokenize(stream).unwrap();

    // 15 words plus the closing newline
    assert_eq!(tokens.len(), 16);
    assert!(matches!(tokens.last().unwrap().token, Token::Newline(_)));
}

#[test]
fn test_generated_style_functions_parse() {
    let source = r#"def bar_0 (V: float, i: int, Za_Pobedy: str) -> str:

    a: int = 1 + 2
    b: float = 3.0
    c: int = a + b
    z: float = a + b
    x: float = c + z
    y: float = (3.0 + 2) + a + b * c - 2 + 4 * a + c / z

    i: int = 2
    sum: int = 0
    float_sum: float = 3.0
    while i < 34:
        sum += i
        float_sum += i

def x_1 (y: int, foo: int, Z: float) -> float:

    a: int = 1
    b: int = 2
    if a == b:
        c: float = a + b
    else:
        c: int = a + b

"#;
    let program = parse(source).unwrap();
    let functions: Vec<_> = program.functions().collect();

    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].name, "bar_0");
    assert_eq!(functions[0].body.len(), 10);
    assert!(matches!(functions[0].body[9], Stmt::While { .. }));
    assert!(matches!(functions[1].body[2], Stmt::If { .. }));
    assert!(program
        .items
        .iter()
        .all(|item| matches!(item, Item::Function(_))));
}

#[test]
fn test_comment_only_lines_are_ignored() {
    let source = "# header\n\nx = 1  # trailing\n   # indented comment\ny = 2\n";
    let program = parse(source).unwrap();
    assert_eq!(program.items.len(), 2);
}

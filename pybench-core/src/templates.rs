//! Canonical function bodies used to build parser corpora
//!
//! Each body starts with a line break and is indented one level, so any
//! sequence of them can follow a `def ...:` line directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Straight-line typed arithmetic
    Arithmetic,
    /// `if`/`else` branch
    Branch,
    /// `while` loop with accumulation
    Loop,
    /// Branches nested in a loop, gcd style
    Composite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionBodyTemplate {
    pub kind: TemplateKind,
    pub source: &'static str,
}

const ARITHMETIC: &str = r"
    a: int = 1 + 2
    b: float = 3.0
    c: int = a + b
    z: float = a + b
    x: float = c + z
    y: float = (3.0 + 2) + a + b * c - 2 + 4 * a + c / z
";

const BRANCH: &str = r"
    a: int = 1
    b: int = 2
    if a == b:
        c: float = a + b
    else:
        c: int = a + b
";

const LOOP: &str = r"
    i: int = 2
    sum: int = 0
    float_sum: float = 3.0
    while i < 34:
        sum += i
        float_sum += i
";

const COMPOSITE: &str = r"
    a: int = 4
    b: int = 10000
    temp: int = 0
    if a > b:  # keep the smaller bound
        temp = b
    else:
        temp = a
    i: int = 1
    gcd: int = 0
    while i < temp + 1:
        if a == i:
            gcd = i
";

pub const TEMPLATE_BANK: [FunctionBodyTemplate; 4] = [
    FunctionBodyTemplate {
        kind: TemplateKind::Arithmetic,
        source: ARITHMETIC,
    },
    FunctionBodyTemplate {
        kind: TemplateKind::Branch,
        source: BRANCH,
    },
    FunctionBodyTemplate {
        kind: TemplateKind::Loop,
        source: LOOP,
    },
    FunctionBodyTemplate {
        kind: TemplateKind::Composite,
        source: COMPOSITE,
    },
];

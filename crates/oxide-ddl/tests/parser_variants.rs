//! Generated quoting, comment and whitespace variants of CREATE TABLE.

mod common;
use common::*;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const NAMES: &[&str] = &[
    "id",
    "user_name",
    "Created At",
    "order",
    "e-mail",
    "x1",
    "größe",
    "a\"b",
];

const TYPES: &[&str] = &[
    "",
    "INTEGER",
    "TEXT",
    "VARCHAR(32)",
    "DECIMAL(10, 2)",
    "UNSIGNED BIG INT",
];

const CONSTRAINTS: &[&str] = &[
    "",
    "NOT NULL",
    "DEFAULT 'a, (b'",
    "DEFAULT (1 + 2)",
    "CHECK (length(x) > 0)",
    "UNIQUE ON CONFLICT IGNORE",
    "COLLATE NOCASE",
];

const SEPARATORS: &[&str] = &[
    " ",
    "  ",
    "\n",
    "\t",
    "\n    ",
    " /* , ) */ ",
    "/*(*/",
    " -- trailing, (\n",
    "\n-- full line )\n  ",
];

#[derive(Clone, Copy)]
enum Quote {
    Bare,
    Double,
    Backtick,
    Bracket,
}

const QUOTES: &[Quote] = &[Quote::Bare, Quote::Double, Quote::Backtick, Quote::Bracket];

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn is_bare_word(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn quote(name: &str, style: Quote) -> String {
    match style {
        Quote::Bare if is_bare_word(name) => name.to_string(),
        Quote::Bare | Quote::Double => format!("\"{}\"", name.replace('"', "\"\"")),
        Quote::Backtick => format!("`{}`", name.replace('`', "``")),
        Quote::Bracket if !name.contains(']') => format!("[{name}]"),
        Quote::Bracket => format!("\"{}\"", name.replace('"', "\"\"")),
    }
}

/// Picks a few distinct column names in random order.
fn pick_columns(rng: &mut StdRng) -> Vec<&'static str> {
    let mut names: Vec<&str> = NAMES.to_vec();
    let count = rng.random_range(1..=names.len());
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        picked.push(names.remove(rng.random_range(0..names.len())));
    }
    picked
}

/// Column pieces: name, type and constraint, omitting empty ones.
fn column_pieces(rng: &mut StdRng, name: &str, style: Quote) -> Vec<String> {
    let mut pieces = vec![quote(name, style)];
    for piece in [*pick(rng, TYPES), *pick(rng, CONSTRAINTS)] {
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
    }
    pieces
}

fn join_with(rng: &mut StdRng, pieces: &[String]) -> String {
    let mut sql = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            sql.push_str(*pick(rng, SEPARATORS));
        }
        sql.push_str(piece);
    }
    sql
}

#[test]
fn variants_yield_canonical_names_and_order() {
    let mut rng = StdRng::seed_from_u64(0x0dd1_5eed);

    for round in 0..500 {
        let names = pick_columns(&mut rng);

        let canonical = format!(
            "CREATE TABLE \"Some Table\" ({})",
            names
                .iter()
                .map(|n| quote(n, Quote::Double))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let expected = parse_table_ok(&canonical);

        let mut pieces = vec![
            "CREATE".to_string(),
            "TABLE".to_string(),
            quote("Some Table", *pick(&mut rng, QUOTES)),
            "(".to_string(),
        ];
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                pieces.push(",".to_string());
            }
            let style = *pick(&mut rng, QUOTES);
            pieces.extend(column_pieces(&mut rng, name, style));
        }
        pieces.push(")".to_string());
        let mut sql = join_with(&mut rng, &pieces);
        if rng.random_bool(0.5) {
            sql.push(';');
        }
        if rng.random_bool(0.3) {
            sql.insert_str(0, "-- header\n");
        }

        let table = parse_table_ok(&sql);
        assert_eq!(table.name, "Some Table", "round {round}: {sql}");
        assert_eq!(table.column_names(), names, "round {round}: {sql}");
        assert_eq!(
            table.column_names(),
            expected.column_names(),
            "round {round}: {sql}"
        );
    }
}

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use roster_core::{Category, Column, RecencyWindow, RosterRow, RosterTable};
use roster_export::{TOTAL_FILE, export};

fn window() -> RecencyWindow {
    RecencyWindow::ending(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
}

fn roster() -> RosterTable {
    let rows: &[&[(Column, &str)]] = &[
        &[
            (Column::Category, "Autonomías"),
            (Column::Name, "José Núñez"),
            (Column::Kind, "Presidente"),
            (Column::Region, "Castilla y León"),
            (Column::Party, "PP"),
            (Column::TwitterHandle, "jnunez"),
            (Column::TwitterActivity, "2025-06-20"),
            (Column::Email, "jose@example.org"),
        ],
        &[
            (Column::Category, "Partidos"),
            (Column::Name, "Partido Ejemplo"),
            (Column::BlueskyHandle, "ejemplo.bsky.social"),
            (Column::BlueskyActivity, "404"),
        ],
        &[(Column::Category, "Diputaciones"), (Column::Name, "Nadie")],
        &[(Column::Name, "Sin categoría")],
    ];
    rows.iter()
        .map(|cells| {
            let mut row = RosterRow::default();
            for (column, text) in *cells {
                row.set_text(*column, text);
            }
            row
        })
        .collect()
}

#[test]
fn writes_every_category_file_and_the_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let report = export(&roster(), dir.path(), window(), false).unwrap();

    let names: Vec<&str> = report.files.iter().map(|file| file.file).collect();
    let mut expected: Vec<&str> = Category::ALL.iter().map(|c| c.file_name()).collect();
    expected.push(TOTAL_FILE);
    assert_eq!(names, expected);
    assert_eq!(report.unknown_categories, vec!["Diputaciones".to_string()]);

    for file in &report.files {
        assert!(file.path.exists(), "{} missing", file.file);
    }
    let counts: Vec<usize> = report.files.iter().map(|file| file.records).collect();
    assert_eq!(counts, vec![0, 1, 0, 0, 0, 1, 0, 2]);
}

#[test]
fn output_is_pretty_utf8_with_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    export(&roster(), dir.path(), window(), false).unwrap();

    let text = std::fs::read_to_string(dir.path().join("autonomias.json")).unwrap();
    let expected = r#"[
  {
    "tipo": "Presidente",
    "ccaa": "Castilla y León",
    "nombre": "José Núñez",
    "partido": "PP",
    "twitter": "jnunez",
    "twitter_activo": "2025-06-20",
    "bluesky": null,
    "bluesky_activo": null,
    "mastodon": null,
    "mastodon_activo": null,
    "email": "jose@example.org"
  }
]
"#;
    assert_eq!(text, expected);

    let empty = std::fs::read_to_string(dir.path().join("senado.json")).unwrap();
    assert_eq!(empty, "[]\n");
}

#[test]
fn aggregate_uses_recency_booleans_and_omits_email() {
    let dir = tempfile::tempdir().unwrap();
    export(&roster(), dir.path(), window(), false).unwrap();

    let text = std::fs::read_to_string(dir.path().join(TOTAL_FILE)).unwrap();
    let total: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(total[0]["categoria"], "Autonomías");
    assert_eq!(total[0]["subcategoria"], "Presidente");
    assert_eq!(total[0]["twitter_activo"], true);
    assert_eq!(total[1]["categoria"], "Partidos");
    assert_eq!(total[1]["bluesky_activo"], false);
    assert!(total[0].get("email").is_none());
}

#[test]
fn repeated_exports_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let table = roster();

    export(&table, dir.path(), window(), false).unwrap();
    let first = std::fs::read(dir.path().join(TOTAL_FILE)).unwrap();
    export(&table, dir.path(), window(), false).unwrap();
    let second = std::fs::read(dir.path().join(TOTAL_FILE)).unwrap();

    assert_eq!(first, second);
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, Category::ALL.len() + 1);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("data");

    let report = export(&roster(), &out, window(), true).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.files.len(), 8);
    assert!(!out.exists());
}

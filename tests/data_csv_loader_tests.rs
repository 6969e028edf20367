use std::io::Write;

use barchart_rs::ChartError;
use barchart_rs::data::{CsvColumns, CsvLoadOptions, Dataset};

const SOURCE: &str = "\
Area,Item,Element,Value,Unit
United States of America,Wheat,Production,100,tonnes
United States of America,Maize,Production,250,tonnes
Canada,Wheat,Production,50,tonnes
Canada,Barley,Production,not-a-number,tonnes
Canada,Oats,Production,-3,tonnes
Mexico,Maize,Production
Mexico,,Production,12,tonnes
\"Bolivia (Plurinational State of)\",Quinoa,Production,7.5,tonnes
";

#[test]
fn valid_records_load_and_bad_ones_are_counted() {
    let (dataset, report) =
        Dataset::from_reader(SOURCE.as_bytes(), &CsvLoadOptions::default()).expect("load");

    assert_eq!(report.rows_loaded, 4);
    assert_eq!(report.rows_skipped, 4);
    assert_eq!(dataset.len(), 4);
    assert_eq!(
        dataset.groups(),
        [
            "United States of America",
            "Canada",
            "Bolivia (Plurinational State of)"
        ]
    );
    assert!(dataset.contains_group("Canada"));
    assert!(!dataset.contains_group("Mexico"));

    let quinoa = &dataset.rows()[3];
    assert_eq!(quinoa.category(), "Quinoa");
    assert_eq!(quinoa.value(), 7.5);
}

#[test]
fn custom_column_names_are_honoured() {
    let source = "country\tcrop\ttonnes\nPeru\tPotatoes\t5000\n";
    let options = CsvLoadOptions {
        delimiter: '\t',
        columns: CsvColumns {
            group: "country".to_owned(),
            category: "crop".to_owned(),
            value: "tonnes".to_owned(),
        },
    };

    let (dataset, report) = Dataset::from_reader(source.as_bytes(), &options).expect("load");
    assert_eq!(report.rows_loaded, 1);
    assert_eq!(dataset.rows()[0].group(), "Peru");
    assert_eq!(dataset.rows()[0].value(), 5_000.0);
}

#[test]
fn missing_header_column_is_a_load_error() {
    let source = "Area,Item\nUSA,Wheat\n";
    let err = Dataset::from_reader(source.as_bytes(), &CsvLoadOptions::default())
        .expect_err("missing value column");
    assert!(matches!(err, ChartError::MissingColumn(name) if name == "Value"));
}

#[test]
fn invalid_options_are_rejected_before_reading() {
    let options = CsvLoadOptions {
        delimiter: 'é',
        ..CsvLoadOptions::default()
    };
    let err = Dataset::from_reader("Area,Item,Value\n".as_bytes(), &options)
        .expect_err("non-ascii delimiter");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn loads_from_a_file_path() {
    let path = std::env::temp_dir().join(format!(
        "barchart-rs-loader-{}.csv",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).expect("create temp csv");
    file.write_all(SOURCE.as_bytes()).expect("write temp csv");
    drop(file);

    let result = Dataset::from_path(&path, &CsvLoadOptions::default());
    std::fs::remove_file(&path).expect("remove temp csv");

    let (dataset, report) = result.expect("load from path");
    assert_eq!(dataset.len(), 4);
    assert_eq!(report.rows_skipped, 4);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("barchart-rs-definitely-missing.csv");
    let err = Dataset::from_path(&path, &CsvLoadOptions::default()).expect_err("missing file");
    assert!(matches!(err, ChartError::Io(_)));
}

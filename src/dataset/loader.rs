//! Dataset Loading
//!
//! Reads catalog sources from disk. CSV files are parsed with `csv`,
//! `.xlsx` workbooks with `calamine` (one dataset per sheet).

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::io::Read;
use std::path::Path;

use super::catalog::{DatasetSource, SourceFormat};
use super::error::{DatasetError, DatasetResult};
use super::types::{Cell, Dataset};

/// Read every dataset a source provides
pub fn load_source(source: &DatasetSource) -> DatasetResult<Vec<Dataset>> {
    let datasets = match &source.format {
        SourceFormat::Csv => vec![load_csv(&source.name, &source.path)?],
        SourceFormat::Workbook { .. } => load_workbook(source)?,
    };

    for dataset in &datasets {
        tracing::debug!(
            dataset = %dataset.name(),
            rows = dataset.row_count(),
            fields = dataset.fields().len(),
            "Loaded dataset"
        );
    }

    Ok(datasets)
}

/// Load a CSV file into a dataset
pub fn load_csv(name: &str, path: &Path) -> DatasetResult<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(name, file).map_err(|e| match e {
        DatasetError::Csv { source, .. } => DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse CSV data from any reader (useful for testing)
pub fn read_csv<R: Read>(name: &str, reader: R) -> DatasetResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let csv_err = |source| DatasetError::Csv {
        path: Default::default(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(DatasetError::MissingHeader(name.to_string()));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        records.push(record.iter().map(Cell::parse).collect());
    }

    Ok(Dataset::from_cells(name, headers, records))
}

/// Load every sheet of an `.xlsx` workbook
fn load_workbook(source: &DatasetSource) -> DatasetResult<Vec<Dataset>> {
    let workbook_err = |message: String| DatasetError::Workbook {
        path: source.path.clone(),
        message,
    };

    let mut workbook: Xlsx<_> =
        open_workbook(&source.path).map_err(|e: calamine::XlsxError| workbook_err(e.to_string()))?;

    let mut datasets = Vec::new();
    for sheet in workbook.sheet_names().to_owned() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| workbook_err(format!("sheet '{}': {}", sheet, e)))?;

        let mut rows = range.rows();
        let name = source.sheet_dataset_name(&sheet);
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(header_text).collect(),
            None => return Err(DatasetError::MissingHeader(name)),
        };

        let records = rows.map(|row| row.iter().map(workbook_cell).collect()).collect();
        datasets.push(Dataset::from_cells(name, headers, records));
    }

    Ok(datasets)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        _ => String::new(),
    }
}

fn workbook_cell(cell: &Data) -> Cell {
    match cell {
        Data::Float(v) if v.is_nan() => Cell::Missing,
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::String(s) => Cell::parse(s),
        _ => Cell::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::catalog::DatasetDefaults;
    use std::io::Write;
    use tempfile::tempdir;

    const FRDM_CSV: &str = "\
Z,N,A,EL,Emic,Es+p,Ebind,eps4
8,8,16,O,-0.5,1.2,127.6,0.01
8,10,18,O,-0.3,1.1,139.8,No_Data
";

    #[test]
    fn test_read_csv() {
        let ds = read_csv("FRDM 2012", FRDM_CSV.as_bytes()).unwrap();
        assert_eq!(ds.name(), "FRDM 2012");
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.fields()[4], "Emic");
        assert_eq!(ds.column("Ebind").unwrap().number(1), Some(139.8));
        assert_eq!(ds.column("eps4").unwrap().number(1), None);
        assert_eq!(ds.column("EL").unwrap().text(0).as_deref(), Some("O"));
    }

    #[test]
    fn test_load_source_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frdm.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(FRDM_CSV.as_bytes())
            .unwrap();

        let source = DatasetSource::csv(
            "FRDM 2012",
            &path,
            "EL",
            DatasetDefaults::new("Emic", "Es+p", "Ebind", "eps4"),
        );
        let datasets = load_source(&source).unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].row_count(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_csv("missing", &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let dir = tempdir().unwrap();
        let source = DatasetSource {
            name: "Mass Explorer".to_string(),
            path: dir.path().join("All_Nuclei.xlsx"),
            format: SourceFormat::Workbook { strip_suffix: None },
            label_field: "Symbol".to_string(),
            defaults: DatasetDefaults::new("N", "Z", "N", "Z"),
        };
        assert!(matches!(
            load_source(&source),
            Err(DatasetError::Workbook { .. })
        ));
    }

    #[test]
    fn test_workbook_cell() {
        assert_eq!(workbook_cell(&Data::Float(f64::NAN)), Cell::Missing);
        assert_eq!(workbook_cell(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(workbook_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(workbook_cell(&Data::String("No_Data".into())), Cell::Missing);
        assert_eq!(workbook_cell(&Data::String("Sn".into())), Cell::Text("Sn".into()));
        assert_eq!(workbook_cell(&Data::Empty), Cell::Missing);
        assert_eq!(workbook_cell(&Data::Bool(true)), Cell::Text("true".into()));
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&Data::String(" Z ".into())), "Z");
        assert_eq!(header_text(&Data::Float(2.0)), "2");
        assert_eq!(header_text(&Data::Int(7)), "7");
        assert_eq!(header_text(&Data::Empty), "");
    }

    /// A cell of a hand-written worksheet: numbers as `<v>`, text inline
    fn sheet_cell(reference: &str, value: &str) -> String {
        if value.parse::<f64>().is_ok() {
            format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value)
        } else {
            format!(
                r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                reference, value
            )
        }
    }

    /// Write a minimal `.xlsx` file with one worksheet per `(name, rows)`
    fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
        use zip::write::SimpleFileOptions;

        let mut content_types = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        );
        let mut sheet_entries = String::new();
        let mut relationships = String::new();
        for (i, (name, _)) in sheets.iter().enumerate() {
            let n = i + 1;
            content_types.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                n
            ));
            sheet_entries.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                name, n, n
            ));
            relationships.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                n, n
            ));
        }
        content_types.push_str("</Types>");

        let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
        let workbook = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
            sheet_entries
        );
        let workbook_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            relationships
        );

        let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
        let mut add = |name: &str, body: &str| {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };
        add("[Content_Types].xml", &content_types);
        add("_rels/.rels", root_rels);
        add("xl/workbook.xml", &workbook);
        add("xl/_rels/workbook.xml.rels", &workbook_rels);

        for (i, (_, rows)) in sheets.iter().enumerate() {
            let mut data = String::new();
            for (r, row) in rows.iter().enumerate() {
                data.push_str(&format!(r#"<row r="{}">"#, r + 1));
                for (c, value) in row.iter().enumerate() {
                    let column = (b'A' + c as u8) as char;
                    data.push_str(&sheet_cell(&format!("{}{}", column, r + 1), value));
                }
                data.push_str("</row>");
            }
            let sheet = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                data
            );
            add(&format!("xl/worksheets/sheet{}.xml", i + 1), &sheet);
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_load_workbook_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("All_Nuclei.xlsx");
        let skms: &[&[&str]] = &[
            &["Z", "N", "Symbol", "BE"],
            &["8", "8", "O", "127.6"],
            &["50", "82", "Sn", "No_Data"],
        ];
        let unedf0: &[&[&str]] = &[
            &["Z", "N", "Symbol", "BE"],
            &["20", "28", "Ca", "416.0"],
        ];
        write_workbook(
            &path,
            &[("SKMS_all_nuclei", skms), ("UNEDF0_all_nuclei", unedf0)],
        );

        let source = DatasetSource {
            name: "Mass Explorer".to_string(),
            path,
            format: SourceFormat::Workbook {
                strip_suffix: Some("_all_nuclei".to_string()),
            },
            label_field: "Symbol".to_string(),
            defaults: DatasetDefaults::new("N", "Z", "BE", "BE"),
        };
        let datasets = load_source(&source).unwrap();

        let names: Vec<&str> = datasets.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["Mass Explorer: SKMS", "Mass Explorer: UNEDF0"]);

        let skms = &datasets[0];
        assert_eq!(skms.fields(), ["Z", "N", "Symbol", "BE"]);
        assert_eq!(skms.row_count(), 2);
        assert!(skms.column("N").unwrap().is_numeric());
        assert!(!skms.column("Symbol").unwrap().is_numeric());
        assert_eq!(skms.column("Symbol").unwrap().text(1).as_deref(), Some("Sn"));
        assert_eq!(skms.column("BE").unwrap().number(0), Some(127.6));
        assert_eq!(skms.column("BE").unwrap().number(1), None);
        assert_eq!(datasets[1].column("Z").unwrap().number(0), Some(20.0));
    }
}

use rf_export::*;
use std::collections::BTreeMap;

fn sample_document() -> ExportDocument {
    let mut doc = ExportDocument::new("DMDcModel", "test model");
    doc.scalars.push(ScalarBlock {
        block: ExportBlock::Actuators,
        value: ScalarValue::Ids(vec!["u1".to_string()]),
    });
    doc.scalars.push(ScalarBlock {
        block: ExportBlock::RankSvd,
        value: ScalarValue::Rank {
            requested: -1.0,
            effective: vec![2, 2],
        },
    });

    let mut parameters = BTreeMap::new();
    parameters.insert("power".to_string(), 0.5);
    doc.vectors.push(VectorBlock {
        block: ExportBlock::XLast,
        realizations: vec![VectorRealization {
            tags: SampleTags {
                sample: 0,
                parameters: parameters.clone(),
            },
            values: vec![1.5],
        }],
    });
    doc.matrices.push(MatrixBlock {
        block: ExportBlock::ATilde,
        realizations: vec![MatrixRealization::real_valued(
            SampleTags {
                sample: 0,
                parameters,
            },
            [2, 2],
            &[1.0, 3.0, 2.0, 4.0],
        )],
    });
    doc
}

#[test]
fn json_file_round_trip() {
    let temp_dir = std::env::temp_dir().join("rf_export_test_json");
    let _ = std::fs::remove_dir_all(&temp_dir);
    let path = temp_dir.join("model.json");

    let doc = sample_document();
    write_document(&path, &doc, ExportFormat::Json).unwrap();
    let loaded = read_document(&path, ExportFormat::Json).unwrap();

    assert_eq!(loaded, doc);
    let a = loaded.matrix(ExportBlock::ATilde).unwrap();
    assert_eq!(a.realizations[0].real_at(0, 1), 2.0);
    assert_eq!(a.realizations[0].real_at(1, 0), 3.0);
    assert!(a.realizations[0].imaginary.iter().all(|&v| v == 0.0));
}

#[test]
fn yaml_file_round_trip() {
    let temp_dir = std::env::temp_dir().join("rf_export_test_yaml");
    let _ = std::fs::remove_dir_all(&temp_dir);
    let path = temp_dir.join("model.yaml");

    let doc = sample_document();
    write_document(&path, &doc, ExportFormat::Yaml).unwrap();
    let loaded = read_document(&path, ExportFormat::Yaml).unwrap();

    assert_eq!(loaded.block_names(), vec!["actuators", "rankSVD", "XLast", "Atilde"]);
    assert_eq!(
        loaded.scalar(ExportBlock::RankSvd),
        Some(&ScalarValue::Rank {
            requested: -1.0,
            effective: vec![2, 2]
        })
    );
}

#[test]
fn rendered_json_uses_block_names() {
    let json = render(&sample_document(), ExportFormat::Json).unwrap();
    assert!(json.contains("\"Atilde\""));
    assert!(json.contains("\"sample\": 0"));
    assert!(json.contains("\"power\": 0.5"));
}

#[test]
fn rendered_text_written_verbatim() {
    let temp_dir = std::env::temp_dir().join("rf_export_test_rendered");
    let _ = std::fs::remove_dir_all(&temp_dir);
    let path = temp_dir.join("nested").join("model.json");

    let doc = sample_document();
    let text = render(&doc, ExportFormat::Json).unwrap();
    write_rendered(&path, &text).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    assert_eq!(read_document(&path, ExportFormat::Json).unwrap(), doc);
}

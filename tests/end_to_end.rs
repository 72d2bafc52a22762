//! End-to-end tests: a complete LDF file through every stage.
//!
//! Lexer → Parser → Document → JSON

use ldf_parser::{ParseError, ParseOptions, Section, parse, parse_file};
use serde_json::json;
use std::collections::BTreeSet;
use std::io::Write;

const BODY_BUS: &str = r#"
// Body control bus
LIN_description_file;
LIN_protocol_version = "2.1";
LIN_language_version = "2.1";
LIN_speed = 19.2 kbps;

Nodes {
    Master: CEM, 5 ms, 0.1 ms;
    Slaves: LSM, RSM;
}

Signals {
    LeftLamp: 2, 0, CEM, LSM;
    RightLamp: 2, 0, CEM, RSM;
    LSM_Status: 8, 0xFF, LSM, CEM;
}

Diagnostic_signals {
    MasterReqB0: 8, 0;
    SlaveRespB0: 8, 0;
}

Frames {
    CEM_Frm1: 0x01, CEM, 1 {
        LeftLamp, 0;
        RightLamp, 2;
    }
    LSM_Frm1: 0x02, LSM, 1 {
        LSM_Status, 0;
    }
}

Diagnostic_frames {
    MasterReq: 0x3c {
        MasterReqB0, 0;
    }
    SlaveResp: 0x3d {
        SlaveRespB0, 0;
    }
}

Node_attributes {
    LSM {
        LIN_protocol = "2.1";
        configured_NAD = 0x01;
        product_id = 0x1E, 0x1, 0;
        response_error = LSM_Status;
        P2_min = 50 ms;
        ST_min = 0 ms;
        configurable_frames {
            CEM_Frm1;
            LSM_Frm1;
        }
    }
}

Schedule_tables {
    Normal {
        CEM_Frm1 delay 10 ms;
        LSM_Frm1 delay 10 ms;
        CEM_Frm1 delay 10 ms;
    }
}

/* encodings */
Signal_encoding_types {
    LampEnc {
        logical_value, 0, "off";
        logical_value, 1, "on";
    }
    StatusEnc {
        physical_value, 0, 254, 1, 0, "%";
    }
}

Signal_representation {
    LampEnc: LeftLamp, RightLamp;
    StatusEnc: LSM_Status;
}
"#;

#[test]
fn test_full_document() {
    let result = parse(BODY_BUS);
    assert!(result.is_ok(), "diagnostics: {:?}", result.diagnostics);
    let doc = result.into_result().unwrap().to_json().unwrap();

    assert_eq!(
        doc,
        json!({
            "LIN_description_file": "",
            "LIN_protocol_version": "2.1",
            "LIN_language_version": "2.1",
            "LIN_speed": 19200,
            "Nodes": {
                "master": {"name": "CEM", "time_base": 5, "jitter": 0.1},
                "slaves": ["LSM", "RSM"],
            },
            "signals": {
                "LeftLamp": {"size": 2, "initial": 0, "publisher": "CEM", "subscriber": ["LSM"]},
                "RightLamp": {"size": 2, "initial": 0, "publisher": "CEM", "subscriber": ["RSM"]},
                "LSM_Status": {"size": 8, "initial": 255, "publisher": "LSM", "subscriber": ["CEM"]},
            },
            "diag_signals": {
                "MasterReqB0": {"size": 8, "initial": 0},
                "SlaveRespB0": {"size": 8, "initial": 0},
            },
            "frames": {
                "CEM_Frm1": {
                    "id": 1, "publisher": "CEM", "dlc": 1,
                    "signals": {"LeftLamp": {"start": 0}, "RightLamp": {"start": 2}},
                },
                "LSM_Frm1": {
                    "id": 2, "publisher": "LSM", "dlc": 1,
                    "signals": {"LSM_Status": {"start": 0}},
                },
            },
            "diagnostic_frames": {
                "MasterReq": {"id": 60, "signals": {"MasterReqB0": {"start": 0}}},
                "SlaveResp": {"id": 61, "signals": {"SlaveRespB0": {"start": 0}}},
            },
            "node_attributes": {
                "LSM": {
                    "LIN_protocol": "2.1",
                    "configured_NAD": 1,
                    "product_id": [30, 1, 0],
                    "response_error": "LSM_Status",
                    "P2_min": 50,
                    "ST_min": 0,
                    "configurable_frames": ["CEM_Frm1", "LSM_Frm1"],
                }
            },
            "schedule_tables": {
                "Normal": [
                    {"name": "CEM_Frm1", "delay": 10},
                    {"name": "LSM_Frm1", "delay": 10},
                    {"name": "CEM_Frm1", "delay": 10},
                ]
            },
            "Signal_encoding_types": {
                "LampEnc": [
                    {"logical_value": [0, "off"]},
                    {"logical_value": [1, "on"]},
                ],
                "StatusEnc": [
                    {"physical_value": [0, 254, 1, 0, "%"]},
                ],
            },
            "Signal_representation": {
                "LampEnc": ["LeftLamp", "RightLamp"],
                "StatusEnc": ["LSM_Status"],
            },
        })
    );
}

#[test]
fn test_document_keeps_source_order() {
    let doc = parse(BODY_BUS).into_result().unwrap();
    let keys: Vec<&str> = doc.keys().collect();
    assert_eq!(
        keys,
        vec![
            "LIN_description_file",
            "LIN_protocol_version",
            "LIN_language_version",
            "LIN_speed",
            "Nodes",
            "signals",
            "diag_signals",
            "frames",
            "diagnostic_frames",
            "node_attributes",
            "schedule_tables",
            "Signal_encoding_types",
            "Signal_representation",
        ]
    );
}

#[test]
fn test_section_keys_independent_of_order() {
    let reordered = "
Signal_representation { Enc: A; }
Frames { F1: 1, CEM, 1 { A, 0; } }
Nodes { Slaves: LSM; Master: CEM, 5 ms, 1 ms; }
";
    let forward = "
Nodes { Master: CEM, 5 ms, 1 ms; Slaves: LSM; }
Frames { F1: 1, CEM, 1 { A, 0; } }
Signal_representation { Enc: A; }
";
    let a = parse(reordered).into_result().unwrap();
    let b = parse(forward).into_result().unwrap();

    let keys_a: BTreeSet<&str> = a.keys().collect();
    let keys_b: BTreeSet<&str> = b.keys().collect();
    assert_eq!(keys_a, keys_b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());

    let section_keys: BTreeSet<&str> = Section::ALL.iter().map(|s| s.key()).collect();
    assert!(keys_a.is_subset(&section_keys));
}

#[test]
fn test_every_section_key() {
    let doc = parse(BODY_BUS).into_result().unwrap();
    for section in Section::ALL {
        assert!(doc.section(section).is_some(), "missing {section}");
    }
}

#[test]
fn test_json_string_round_trip() {
    let doc = parse(BODY_BUS).into_result().unwrap();
    let text = doc.to_json_string(true).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, doc.to_json().unwrap());
}

#[test]
fn test_debug_option_leaves_document_unchanged() {
    let plain = parse(BODY_BUS);
    let traced = ldf_parser::parse_with(BODY_BUS, &ParseOptions::new().debug(true));
    assert_eq!(plain.document, traced.document);
    assert_eq!(plain.error_count, traced.error_count);
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BODY_BUS.as_bytes()).unwrap();

    let result = parse_file(file.path(), &ParseOptions::default()).unwrap();
    assert!(result.is_ok());
    assert_eq!(result.document.unwrap().len(), 13);
}

#[test]
fn test_parse_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.ldf");
    let err = parse_file(&missing, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(err.to_string().contains("absent.ldf"));
}

#[test]
fn test_damaged_file_still_yields_document() {
    let damaged = BODY_BUS.replace("Slaves: LSM, RSM;", "Slaves LSM, RSM;");
    let result = parse(&damaged);
    assert_eq!(result.error_count, 1);
    let doc = result.document.unwrap();
    assert!(doc.section(Section::Nodes).is_none());
    assert!(doc.section(Section::Frames).is_some());
    assert!(doc.section(Section::SignalRepresentation).is_some());
}

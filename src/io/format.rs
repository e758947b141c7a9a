//! Snapshot file formats
//!
//! Pure byte-level encoding and decoding of snapshot containers. JSON
//! serializes the whole named container, XML its attribute-only mirror from
//! [`super::xml`]; CSV writes one row per record with the record's field
//! names as the header.
//!
//! All functions are pure (no I/O) for easy testing.

use super::snapshot::Snapshot;
use crate::types::LedgerError;
use clap::ValueEnum;

/// File format of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    Json,
    Xml,
    Csv,
}

impl SnapshotFormat {
    /// File extension, also used to derive the fixed snapshot file name
    pub fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Xml => "xml",
            SnapshotFormat::Csv => "csv",
        }
    }
}

/// Serialize a snapshot container
pub fn encode<S: Snapshot>(snapshot: &S, format: SnapshotFormat) -> Result<Vec<u8>, LedgerError> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(snapshot)?),
        SnapshotFormat::Xml => quick_xml::se::to_string(&snapshot.to_xml())
            .map(String::into_bytes)
            .map_err(|e| LedgerError::Xml(e.to_string())),
        SnapshotFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in snapshot.records() {
                writer.serialize(record)?;
            }
            writer
                .into_inner()
                .map_err(|e| LedgerError::Csv(csv::Error::from(e.into_error())))
        }
    }
}

/// Deserialize a snapshot container
pub fn decode<S: Snapshot>(bytes: &[u8], format: SnapshotFormat) -> Result<S, LedgerError> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::from_slice(bytes)?),
        SnapshotFormat::Xml => quick_xml::de::from_reader::<_, S::Xml>(bytes)
            .map(S::from_xml)
            .map_err(|e| LedgerError::Xml(e.to_string())),
        SnapshotFormat::Csv => {
            let mut reader = csv::Reader::from_reader(bytes);
            let records = reader
                .deserialize::<S::Record>()
                .collect::<Result<Vec<_>, _>>()?;
            Ok(S::from_records(records))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::snapshot::{AtmsExport, ClientsExport};
    use crate::types::{Atm, Client};

    fn clients() -> ClientsExport {
        ClientsExport {
            clients: vec![Client {
                id: 1,
                name: "Ann".to_string(),
                login: "ann".to_string(),
                password: "secret".to_string(),
                balance: 500,
                account_number: 111,
                phone_number: 9001,
            }],
        }
    }

    #[test]
    fn test_json_uses_named_container() {
        let bytes = encode(&clients(), SnapshotFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["Clients"][0]["Login"], "ann");
        assert_eq!(value["Clients"][0]["BalanceNumber"], 111);
    }

    #[test]
    fn test_xml_uses_named_container() {
        let bytes = encode(&clients(), SnapshotFormat::Xml).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("<ClientsExport>"));
        assert!(text.contains(r#"<Clients Id="1" Name="Ann" Login="ann""#));
        assert!(text.contains(r#"BalanceNumber="111""#));
    }

    #[test]
    fn test_csv_header_uses_field_names() {
        let bytes = encode(&clients(), SnapshotFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text.lines().next().unwrap(),
            "Id,Name,Login,Password,Balance,BalanceNumber,PhoneNumber"
        );
        assert_eq!(text.lines().nth(1).unwrap(), "1,Ann,ann,secret,500,111,9001");
    }

    #[test]
    fn test_decode_xml_atms() {
        let xml = r#"<AtmsExport>
            <Atms Id="3" Name="Central" Address="1 Main St"/>
            <Atms Id="4" Name="Mall" Address="9 Ring Rd"/>
            </AtmsExport>"#;

        let decoded: AtmsExport = decode(xml.as_bytes(), SnapshotFormat::Xml).unwrap();

        assert_eq!(
            decoded.atms,
            vec![
                Atm { id: 3, name: "Central".to_string(), address: "1 Main St".to_string() },
                Atm { id: 4, name: "Mall".to_string(), address: "9 Ring Rd".to_string() },
            ]
        );
    }

    #[test]
    fn test_decode_empty_json_container() {
        let decoded: ClientsExport = decode(br#"{"Clients": []}"#, SnapshotFormat::Json).unwrap();
        assert!(decoded.clients.is_empty());
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode::<ClientsExport>(b"{not json", SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, LedgerError::Json(_)));
    }

    #[test]
    fn test_decode_malformed_csv() {
        let csv = "Id,Name,Address\nnot-a-number,Central,1 Main St\n";
        let err = decode::<AtmsExport>(csv.as_bytes(), SnapshotFormat::Csv).unwrap_err();
        assert!(matches!(err, LedgerError::Csv(_)));
    }
}

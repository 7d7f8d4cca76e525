//! The untrusted field record produced by the extractor.

use serde::{Deserialize, Deserializer, Serialize};

use crate::reference::{MaritalStatus, Province, Religion, Sex};

/// Fields transcribed from one KTP image.
///
/// Serialized with the card's own (Indonesian) field names, which is also the
/// shape the extractor answers with. Everything except the identity number
/// and the name may be missing because the transcription can skip fields it
/// could not read. A missing identity number or name deserializes as an empty
/// string and is reported by the validator, not rejected here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// `NIK`: expected to be 16 ASCII digits.
    #[serde(rename = "nik", default, deserialize_with = "null_as_empty")]
    pub identity_number: String,
    #[serde(rename = "nama", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "tempat_lahir", default)]
    pub birth_place: Option<String>,
    /// `DD-MM-YYYY` text.
    #[serde(rename = "tanggal_lahir", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "jenis_kelamin", default)]
    pub sex: Option<Sex>,
    #[serde(rename = "alamat", default)]
    pub address: Option<String>,
    /// Neighbourhood/hamlet pair, `001/002`.
    #[serde(default)]
    pub rt_rw: Option<String>,
    #[serde(rename = "kelurahan", default)]
    pub village: Option<String>,
    #[serde(rename = "kecamatan", default)]
    pub district: Option<String>,
    #[serde(rename = "kabupaten_kota", default)]
    pub regency: Option<String>,
    #[serde(rename = "provinsi", default)]
    pub province: Option<Province>,
    #[serde(rename = "agama", default)]
    pub religion: Option<Religion>,
    #[serde(rename = "status_perkawinan", default)]
    pub marital_status: Option<MaritalStatus>,
    #[serde(rename = "pekerjaan", default)]
    pub occupation: Option<String>,
    #[serde(rename = "kewarganegaraan", default)]
    pub nationality: Option<String>,
    /// Validity period, a date or `SEUMUR HIDUP` (lifetime).
    #[serde(rename = "berlaku_hingga", default)]
    pub valid_until: Option<String>,
}

impl ExtractedRecord {
    /// Minimal record with only the two mandatory fields set.
    pub fn new(identity_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identity_number: identity_number.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_card_field_names() {
        let json = r#"{
            "nik": "3201234567890123",
            "nama": "BUDI SANTOSO",
            "tempat_lahir": "BOGOR",
            "tanggal_lahir": "12-05-1990",
            "jenis_kelamin": "LAKI-LAKI",
            "rt_rw": "001/002",
            "provinsi": "JAWA BARAT",
            "agama": "Islam",
            "status_perkawinan": "KAWIN",
            "kewarganegaraan": "WNI",
            "berlaku_hingga": "SEUMUR HIDUP"
        }"#;
        let record: ExtractedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.identity_number, "3201234567890123");
        assert_eq!(record.name, "BUDI SANTOSO");
        assert_eq!(record.sex, Some(Sex::Male));
        assert_eq!(record.province, Some(Province::WestJava));
        assert_eq!(record.religion, Some(Religion::Islam));
        assert_eq!(record.marital_status, Some(MaritalStatus::Married));
        assert_eq!(record.address, None);
    }

    #[test]
    fn null_mandatory_fields_become_empty() {
        let record: ExtractedRecord =
            serde_json::from_str(r#"{"nik": null, "jenis_kelamin": "PRIA", "provinsi": "MARS"}"#)
                .unwrap();
        assert_eq!(record.identity_number, "");
        assert_eq!(record.name, "");
        assert_eq!(record.sex, Some(Sex::Unrecognized("PRIA".into())));
        assert_eq!(record.province, Some(Province::Unrecognized("MARS".into())));
    }
}

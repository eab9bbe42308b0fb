use crate::geo_record::GeoRecord;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Delimiter between fields when the answer is packed into one TXT string.
pub const FIELD_DELIMITER: &str = "    ";

/// How the ordered field list is packed into TXT rdata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxtEncoding {
    /// All fields joined with [`FIELD_DELIMITER`] into a single string.
    #[default]
    Joined,
    /// One TXT character-string per field.
    Segmented,
}

/// The ordered field list answered for one lookup.
///
/// Arity is 9 fields without a subdivision and 11 with one: subdivision code
/// and name are omitted entirely rather than emitted as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    fields: Vec<String>,
}

impl ResponseRecord {
    pub fn new(record: &GeoRecord, language: &str, ip: IpAddr) -> Self {
        let localized = |names: &std::collections::BTreeMap<String, String>| {
            names.get(language).cloned().unwrap_or_default()
        };

        let mut fields = vec![
            ip.to_string(),
            record.country.iso_code.clone(),
            localized(&record.country.names),
        ];

        if let Some(subdivision) = record.subdivision() {
            fields.push(subdivision.iso_code.clone());
            fields.push(localized(&subdivision.names));
        }

        fields.push(localized(&record.city.names));
        fields.push(record.postal.code.clone());
        fields.push(record.location.time_zone.clone());
        fields.push(format_coordinate(record.location.latitude));
        fields.push(format_coordinate(record.location.longitude));
        fields.push(record.location.metro_code.to_string());

        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Pack the fields into TXT character-strings per the configured mode.
    pub fn into_txt(self, encoding: TxtEncoding) -> Vec<String> {
        match encoding {
            TxtEncoding::Joined => vec![self.fields.join(FIELD_DELIMITER)],
            TxtEncoding::Segmented => self.fields,
        }
    }
}

/// Round half-up at 3 decimal places, then format with exactly 2.
///
/// The tie-break follows the sign of the scaled value: a fractional part of
/// at least 0.5 rounds toward positive infinity, anything less rounds toward
/// negative infinity. This differs from naive 2-decimal rounding for values
/// whose third decimal digit lands on 5.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.2}", round_half_up(value, 3))
}

fn round_half_up(value: f64, places: i32) -> f64 {
    let pow = 10f64.powi(places);
    let scaled = pow * value;
    let rounded = if scaled.fract() >= 0.5 {
        scaled.ceil()
    } else {
        scaled.floor()
    };
    rounded / pow
}

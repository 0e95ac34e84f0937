//! Row codec: stock items to and from flat positional records.
//!
//! A row is `[item_type, stock_code, quantity, price, brand]`. The
//! `item_type` tag selects the variant; `brand` is empty for variants that
//! have none. Decoding either yields a fully valid item or an error.

use std::fmt;

use partshop_core::{ItemKind, StockItem};

use crate::error::CorruptRecordError;

/// Number of fields in an item row.
pub const FIELD_COUNT: usize = 5;

const KIND: usize = 0;
const STOCK_CODE: usize = 1;
const QUANTITY: usize = 2;
const PRICE: usize = 3;
const BRAND: usize = 4;

/// One raw record of the items table, exactly as stored.
///
/// A record that is not valid UTF-8 keeps its original bytes so a rewrite
/// puts it back unchanged; its text fields are a lossy rendering and it
/// never decodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<String>,
    raw: Option<Vec<Vec<u8>>>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields, raw: None }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The stored bytes of a record that was not valid UTF-8.
    pub fn raw_bytes(&self) -> Option<&[Vec<u8>]> {
        self.raw.as_deref()
    }

    pub fn is_utf8(&self) -> bool {
        self.raw.is_none()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The stock code column, if the row has one.
    pub fn key(&self) -> Option<&str> {
        self.fields.get(STOCK_CODE).map(String::as_str)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Write the row as stored: original bytes if it had any, else fields.
    pub(crate) fn write_to<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> csv::Result<()> {
        match &self.raw {
            Some(raw) => writer.write_record(raw),
            None => writer.write_record(&self.fields),
        }
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<&csv::ByteRecord> for Row {
    fn from(record: &csv::ByteRecord) -> Self {
        let decoded: Option<Vec<String>> = record
            .iter()
            .map(|field| std::str::from_utf8(field).ok().map(str::to_string))
            .collect();
        match decoded {
            Some(fields) => Self::new(fields),
            None => Self {
                fields: record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect(),
                raw: Some(record.iter().map(<[u8]>::to_vec).collect()),
            },
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl AsRef<[String]> for Row {
    fn as_ref(&self) -> &[String] {
        &self.fields
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.fields.join(", "))
    }
}

/// Encode an item as a row. Total.
///
/// Prices use Rust's shortest round-trip float formatting, so decoding the
/// row reproduces the price bit for bit.
pub fn encode(item: &StockItem) -> Row {
    Row::new(vec![
        item.kind().tag().to_string(),
        item.stock_code().to_string(),
        item.quantity().to_string(),
        item.price().to_string(),
        item.brand().unwrap_or_default().to_string(),
    ])
}

/// Decode a row into an item.
///
/// Fields past the fifth are ignored.
pub fn decode(row: &Row) -> Result<StockItem, CorruptRecordError> {
    if !row.is_utf8() {
        return Err(CorruptRecordError::InvalidUtf8);
    }
    let fields = row.fields();
    if fields.len() < FIELD_COUNT {
        return Err(CorruptRecordError::TooFewFields {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let raw_quantity = fields[QUANTITY].trim();
    let quantity: i64 = raw_quantity
        .parse()
        .map_err(|_| CorruptRecordError::InvalidQuantity(raw_quantity.to_string()))?;

    let raw_price = fields[PRICE].trim();
    let price: f64 = raw_price
        .parse()
        .map_err(|_| CorruptRecordError::InvalidPrice(raw_price.to_string()))?;

    if quantity < 0 {
        return Err(CorruptRecordError::NegativeQuantity(quantity));
    }
    if price < 0.0 {
        return Err(CorruptRecordError::NegativePrice(price));
    }
    let quantity = u32::try_from(quantity)
        .map_err(|_| CorruptRecordError::InvalidQuantity(raw_quantity.to_string()))?;

    let kind = ItemKind::from_tag(&fields[KIND])
        .ok_or_else(|| CorruptRecordError::UnknownKind(fields[KIND].clone()))?;

    Ok(StockItem::from_parts(
        kind,
        fields[STOCK_CODE].as_str(),
        quantity,
        price,
        &fields[BRAND],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use partshop_core::ValidationError;

    fn row(fields: &[&str]) -> Row {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_encode_navigation_system() {
        let item = StockItem::navigation_system("NS101", 10, 199.99, "TomTom").unwrap();
        assert_eq!(encode(&item), row(&["NavSys", "NS101", "10", "199.99", "TomTom"]));
    }

    #[test]
    fn test_encode_generic_has_empty_brand() {
        let item = StockItem::generic("W101", 0, 5.0).unwrap();
        assert_eq!(encode(&item), row(&["StockItem", "W101", "0", "5", ""]));
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let items = [
            StockItem::navigation_system("NS101", 100, 0.1 + 0.2, "Müller, \"Navi\" & Co.")
                .unwrap(),
            StockItem::navigation_system("NS-ü", 0, 1e-3, "导航").unwrap(),
            StockItem::generic("W101", 42, 99.99).unwrap(),
        ];
        for item in items {
            assert_eq!(decode(&encode(&item)).unwrap(), item);
        }
    }

    #[test]
    fn test_decode_too_few_fields() {
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "10", "199.99"])),
            Err(CorruptRecordError::TooFewFields {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_decode_unparseable_numbers() {
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "ten", "199.99", "TomTom"])),
            Err(CorruptRecordError::InvalidQuantity("ten".into()))
        );
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "2.5", "199.99", "TomTom"])),
            Err(CorruptRecordError::InvalidQuantity("2.5".into()))
        );
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "10", "cheap", "TomTom"])),
            Err(CorruptRecordError::InvalidPrice("cheap".into()))
        );
    }

    #[test]
    fn test_decode_negative_numbers() {
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "-1", "199.99", "TomTom"])),
            Err(CorruptRecordError::NegativeQuantity(-1))
        );
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "1", "-0.5", "TomTom"])),
            Err(CorruptRecordError::NegativePrice(-0.5))
        );
    }

    #[test]
    fn test_decode_unknown_kind() {
        assert_eq!(
            decode(&row(&["Wheel", "W1", "1", "1.0", ""])),
            Err(CorruptRecordError::UnknownKind("Wheel".into()))
        );
    }

    #[test]
    fn test_decode_rejects_invalid_entity() {
        assert_eq!(
            decode(&row(&["NavSys", "NS101", "10", "199.99", ""])),
            Err(CorruptRecordError::Invalid(ValidationError::EmptyBrand))
        );
        assert_eq!(
            decode(&row(&["NavSys", "", "10", "199.99", "TomTom"])),
            Err(CorruptRecordError::Invalid(ValidationError::EmptyStockCode))
        );
        assert!(matches!(
            decode(&row(&["NavSys", "NS101", "150", "199.99", "TomTom"])),
            Err(CorruptRecordError::Invalid(
                ValidationError::QuantityAboveMaximum { .. }
            ))
        ));
        assert!(matches!(
            decode(&row(&["NavSys", "NS101", "1", "NaN", "TomTom"])),
            Err(CorruptRecordError::Invalid(ValidationError::InvalidPrice(_)))
        ));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let item = decode(&row(&["NavSys", "NS101", "10", "199.99", "TomTom", "extra"])).unwrap();
        assert_eq!(item.brand(), Some("TomTom"));
    }

    #[test]
    fn test_non_utf8_record_keeps_its_bytes_and_never_decodes() {
        let record = csv::ByteRecord::from(vec![
            &b"NavSys"[..],
            &b"NS101"[..],
            &b"10"[..],
            &b"199.99"[..],
            &b"Gar\xff\xfemin"[..],
        ]);
        let row = Row::from(&record);

        assert!(!row.is_utf8());
        assert_eq!(row.key(), Some("NS101"));
        assert_eq!(row.raw_bytes().unwrap()[4], b"Gar\xff\xfemin".to_vec());
        assert_eq!(decode(&row), Err(CorruptRecordError::InvalidUtf8));
    }

    #[test]
    fn test_utf8_record_converts_to_fields() {
        let record = csv::ByteRecord::from(vec!["NavSys", "NS101", "10", "199.99", "Köln"]);
        let converted = Row::from(&record);

        assert!(converted.is_utf8());
        assert_eq!(converted, row(&["NavSys", "NS101", "10", "199.99", "Köln"]));
    }

    #[test]
    fn test_row_key() {
        assert_eq!(row(&["NavSys", "NS101"]).key(), Some("NS101"));
        assert_eq!(row(&["NavSys"]).key(), None);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_never_panics(fields in prop::collection::vec(".{0,12}", 0..8)) {
                let _ = decode(&Row::new(fields));
            }

            #[test]
            fn decoded_items_reencode_to_canonical_rows(
                quantity in 0u32..=100,
                price in 0.01f64..1e6,
            ) {
                let raw = Row::new(vec![
                    "NavSys".into(),
                    "NS1".into(),
                    format!("{:03}", quantity),
                    format!("{:.4}", price),
                    "Garmin".into(),
                ]);
                let item = decode(&raw).unwrap();
                prop_assert_eq!(item.quantity(), quantity);
                prop_assert_eq!(decode(&encode(&item)).unwrap(), item);
            }
        }
    }
}

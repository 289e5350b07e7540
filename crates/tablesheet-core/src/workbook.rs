//! Workbook type - ordered, named worksheets

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Characters a sheet name may not contain
const FORBIDDEN_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// A workbook: sheet names in display order plus the sheets they name
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Sheet names in display order
    sheet_names: Vec<String>,
    /// Worksheets keyed by name
    sheets: AHashMap<String, Worksheet>,
}

impl Workbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.sheet_names.is_empty()
    }

    /// Sheet names in display order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Get a worksheet by name
    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.get(name)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.get_mut(name)
    }

    /// Iterate over (name, worksheet) pairs in display order
    pub fn worksheets(&self) -> impl Iterator<Item = (&str, &Worksheet)> {
        self.sheet_names
            .iter()
            .filter_map(|name| self.sheets.get(name).map(|ws| (name.as_str(), ws)))
    }

    /// Append a worksheet under a new name
    pub fn add_worksheet<S: Into<String>>(&mut self, name: S, worksheet: Worksheet) -> Result<usize> {
        let name = name.into();
        self.validate_sheet_name(&name)?;

        let index = self.sheet_names.len();
        self.sheets.insert(name.clone(), worksheet);
        self.sheet_names.push(name);
        Ok(index)
    }

    /// Remove a worksheet by name
    pub fn remove_worksheet(&mut self, name: &str) -> Option<Worksheet> {
        let worksheet = self.sheets.remove(name)?;
        self.sheet_names.retain(|n| n != name);
        Some(worksheet)
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidSheetName("name cannot be empty".into()));
        }

        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "name '{}' exceeds {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }

        if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "name '{}' contains '{}'",
                name, c
            )));
        }

        // Sheet names compare case-insensitively in spreadsheet applications
        if self
            .sheet_names
            .iter()
            .any(|existing| existing.to_lowercase() == name.to_lowercase())
        {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Workbook {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeStruct};

        struct Sheets<'a>(&'a Workbook);

        impl serde::Serialize for Sheets<'_> {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.sheet_count()))?;
                for (name, worksheet) in self.0.worksheets() {
                    map.serialize_entry(name, worksheet)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("Workbook", 2)?;
        state.serialize_field("SheetNames", &self.sheet_names)?;
        state.serialize_field("Sheets", &Sheets(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut wb = Workbook::new();
        assert!(wb.is_empty());

        assert_eq!(wb.add_worksheet("Orders", Worksheet::new()).unwrap(), 0);
        assert_eq!(wb.add_worksheet("2", Worksheet::new()).unwrap(), 1);

        assert_eq!(wb.sheet_names(), &["Orders".to_string(), "2".to_string()]);
        assert!(wb.worksheet("Orders").is_some());
        assert!(wb.worksheet("Missing").is_none());

        let names: Vec<&str> = wb.worksheets().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Orders", "2"]);
    }

    #[test]
    fn test_sheet_name_rules() {
        let mut wb = Workbook::new();
        wb.add_worksheet("Sheet", Worksheet::new()).unwrap();

        assert!(matches!(
            wb.add_worksheet("sheet", Worksheet::new()),
            Err(Error::DuplicateSheetName(_))
        ));
        assert!(matches!(
            wb.add_worksheet("  ", Worksheet::new()),
            Err(Error::InvalidSheetName(_))
        ));
        assert!(matches!(
            wb.add_worksheet("a/b", Worksheet::new()),
            Err(Error::InvalidSheetName(_))
        ));
        assert!(matches!(
            wb.add_worksheet("x".repeat(32), Worksheet::new()),
            Err(Error::InvalidSheetName(_))
        ));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_remove_worksheet() {
        let mut wb = Workbook::new();
        wb.add_worksheet("A", Worksheet::new()).unwrap();
        wb.add_worksheet("B", Worksheet::new()).unwrap();

        assert!(wb.remove_worksheet("A").is_some());
        assert!(wb.remove_worksheet("A").is_none());
        assert_eq!(wb.sheet_names(), &["B".to_string()]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encoder_layout() {
        let mut wb = Workbook::new();
        wb.add_worksheet("Second", Worksheet::new()).unwrap();
        wb.add_worksheet("First", Worksheet::new()).unwrap();

        let value = serde_json::to_value(&wb).unwrap();
        assert_eq!(value["SheetNames"], serde_json::json!(["Second", "First"]));
        assert_eq!(value["Sheets"]["First"]["!ref"], "A1:A1");
        assert_eq!(value["Sheets"]["Second"]["!cols"], serde_json::json!([]));
    }
}

use crate::columns::{self, Field, COLUMN_COUNT, MARKER_INDEX};
use crate::domain::appointment::AppointmentKind;

/// Flat, index-addressed representation of one grid row: 23 data cells of
/// Danish-formatted text plus the trailing sub/parent marker cell. This is
/// the only shape the UI and the recalculation input path exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    cells: Vec<String>,
}

impl DisplayRow {
    /// An empty row carrying only the classification marker.
    pub fn empty(kind: AppointmentKind) -> Self {
        let mut cells = vec![String::new(); COLUMN_COUNT];
        cells.push(kind.marker().to_string());
        Self { cells }
    }

    /// Builds a row from raw cells, appending the marker.
    pub fn from_cells(cells: Vec<String>, kind: AppointmentKind) -> Self {
        let mut cells = cells;
        cells.resize(COLUMN_COUNT, String::new());
        cells.push(kind.marker().to_string());
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn set_cell(&mut self, index: usize, value: impl Into<String>) {
        if index < COLUMN_COUNT {
            self.cells[index] = value.into();
        }
    }

    /// Cell text for a persisted field.
    pub fn field(&self, field: Field) -> &str {
        self.cell(columns::index_of(field))
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.set_cell(columns::index_of(field), value);
    }

    pub fn marker(&self) -> &str {
        self.cell(MARKER_INDEX)
    }

    pub fn appointment_number(&self) -> &str {
        self.field(Field::AppointmentNumber)
    }

    /// All cells including the marker, in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_cell_trails_the_data_columns() {
        let row = DisplayRow::empty(AppointmentKind::Sub);
        assert_eq!(row.cells().len(), COLUMN_COUNT + 1);
        assert_eq!(row.marker(), "sub-appointment");
    }

    #[test]
    fn field_access_goes_through_the_column_table() {
        let mut row = DisplayRow::empty(AppointmentKind::Parent);
        row.set_field(Field::Tilbud, "1.000,00");
        assert_eq!(row.cell(3), "1.000,00");
        assert_eq!(row.field(Field::Tilbud), "1.000,00");
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut row = DisplayRow::empty(AppointmentKind::Parent);
        row.set_cell(MARKER_INDEX, "overwrite");
        assert_eq!(row.marker(), "parent-appointment");
    }
}

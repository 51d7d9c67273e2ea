//! Spreadsheet export of the loaded record list. Runs entirely client-side.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use crate::model::Atencion;

pub const SHEET_NAME: &str = "Atenciones";
pub const DEFAULT_FILE_NAME: &str = "atenciones.xlsx";

/// Column headers, in the order records appear on the wire.
pub const HEADERS: [&str; 9] = [
    "id",
    "rut",
    "nombre",
    "comuna",
    "tipoSubsidio",
    "comentario",
    "horaInicio",
    "horaFin",
    "duracion",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

/// Data rows for `records`, one per record; the header row is not included.
pub fn to_rows(records: &[Atencion]) -> Vec<Vec<Cell>> {
    records
        .iter()
        .map(|a| {
            vec![
                Cell::Number(a.id as f64),
                Cell::Text(a.rut.clone()),
                Cell::Text(a.nombre.clone()),
                Cell::Text(a.comuna.clone()),
                Cell::Text(a.tipo_subsidio.clone()),
                Cell::Text(a.comentario.clone().unwrap_or_default()),
                Cell::Text(a.hora_inicio.clone()),
                Cell::Text(a.hora_fin.clone()),
                Cell::Number(a.duracion as f64),
            ]
        })
        .collect()
}

pub fn build_workbook(records: &[Atencion]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in to_rows(records).iter().enumerate() {
        write_row(worksheet, index as u32 + 1, row)?;
    }

    Ok(workbook)
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: &[Cell]) -> Result<(), ExportError> {
    for (col, cell) in cells.iter().enumerate() {
        match cell {
            Cell::Text(s) => worksheet.write(row, col as u16, s.as_str())?,
            Cell::Number(n) => worksheet.write(row, col as u16, *n)?,
        };
    }
    Ok(())
}

/// Writes `records` as an `.xlsx` file at `path`.
pub fn export_xlsx(records: &[Atencion], path: &Path) -> Result<(), ExportError> {
    let mut workbook = build_workbook(records)?;
    workbook.save(path)?;
    tracing::info!(rows = records.len(), path = %path.display(), "Exported atenciones");
    Ok(())
}

/// Same workbook, kept in memory.
pub fn export_xlsx_to_buffer(records: &[Atencion]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(records)?;
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atencion(id: i64) -> Atencion {
        Atencion {
            id,
            rut: "11111111-1".into(),
            nombre: "Ana".into(),
            comuna: "X".into(),
            tipo_subsidio: "T".into(),
            comentario: None,
            hora_inicio: "10:00:00".into(),
            hora_fin: "10:00:05".into(),
            duracion: 5,
        }
    }

    #[test]
    fn empty_list_has_no_data_rows() {
        assert!(to_rows(&[]).is_empty());
    }

    #[test]
    fn one_row_per_record_in_header_order() {
        let rows = to_rows(&[atencion(1), atencion(2)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), HEADERS.len());
        assert_eq!(rows[1][0], Cell::Number(2.0));
        assert_eq!(rows[0][4], Cell::Text("T".into()));
        assert_eq!(rows[0][5], Cell::Text(String::new()));
        assert_eq!(rows[0][8], Cell::Number(5.0));
    }

    #[test]
    fn buffer_is_a_zip_container() {
        let bytes = export_xlsx_to_buffer(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn writes_file_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        export_xlsx(&[atencion(1)], &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

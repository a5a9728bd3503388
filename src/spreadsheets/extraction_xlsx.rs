use crate::errors::ServerError;
use crate::pipeline::AggregateGroup;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

/// Download a completed extraction's grouped summary as a workbook.
pub fn export_groups_xlsx(groups: &[AggregateGroup], label: &str) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    let headers = [
        "Area",
        "Listings",
        "Total Price",
        "Average Price",
        "Office",
        "Property Types",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, group) in groups.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &group.key)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write area: {}", e)))?;

        worksheet
            .write_number(r, 1, group.count as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write count: {}", e)))?;

        worksheet
            .write_number(r, 2, group.total_price)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write total: {}", e)))?;

        worksheet
            .write_number(r, 3, group.avg_price)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write average: {}", e)))?;

        let office = group.sample.office.as_deref().unwrap_or("");
        worksheet
            .write_string(r, 4, office)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write office: {}", e)))?;

        let types = group.sample.property_types.join(", ");
        worksheet
            .write_string(r, 5, &types)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write types: {}", e)))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    xlsx_response(buffer, &format!("extraction_{label}.xlsx"))
}

use crate::export::error::ExportResult;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

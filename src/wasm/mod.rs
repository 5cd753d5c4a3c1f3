//! WASM bindings for the letterhead and holiday-calculator forms

pub mod flat_buffer;

use crate::config::PageSetup;
use crate::entitlement::{parse_payments, AbnormalMonths, EntitlementCalculator};
use crate::error::{Error, Result};
use crate::layout::{paginate, split_paragraphs, LayoutVariant, MetricsMeasurer, Pagination};
use flat_buffer::PageBuffer;
use serde::Serialize;
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// WASM-exposed paginator holding the current page setup
#[wasm_bindgen]
pub struct WasmPaginator {
    setup: PageSetup,
    variant: LayoutVariant,
    measurer: MetricsMeasurer,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create a paginator with the default setup (A4 portrait, 12pt serif)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let setup = PageSetup::default();
        Self {
            measurer: setup.measurer(),
            setup,
            variant: LayoutVariant::default(),
        }
    }

    /// Create a paginator from the form's setup JSON
    #[wasm_bindgen(js_name = withSetup)]
    pub fn with_setup(setup_json: &str) -> std::result::Result<WasmPaginator, JsValue> {
        let mut paginator = Self::new();
        paginator.set_setup(setup_json)?;
        Ok(paginator)
    }

    /// Replace the page setup (paper, orientation, font, zones)
    #[wasm_bindgen(js_name = setSetup)]
    pub fn set_setup(&mut self, setup_json: &str) -> std::result::Result<(), JsValue> {
        let setup = PageSetup::from_json(setup_json)?;
        setup.geometry().validate()?;
        self.measurer = setup.measurer();
        self.setup = setup;
        Ok(())
    }

    /// Toggle the addressee block on the first page
    #[wasm_bindgen(js_name = setAddresseeBlock)]
    pub fn set_addressee_block(&mut self, enabled: bool) {
        self.variant.has_addressee_block = enabled;
    }

    /// Paginate text and return pages as JSON
    pub fn paginate(&self, text: &str) -> std::result::Result<String, JsValue> {
        Ok(self.paginate_json(text)?)
    }

    /// Paginate text and return the flat page table
    #[wasm_bindgen(js_name = pageTable)]
    pub fn page_table(&self, text: &str) -> js_sys::Uint32Array {
        let buffer = PageBuffer::from_pagination(&self.run(text));
        js_sys::Uint32Array::from(&buffer.u32_data[..])
    }

    /// Page heights matching `pageTable`, two floats per page
    #[wasm_bindgen(js_name = pageHeights)]
    pub fn page_heights(&self, text: &str) -> js_sys::Float32Array {
        let buffer = PageBuffer::from_pagination(&self.run(text));
        js_sys::Float32Array::from(&buffer.f32_data[..])
    }

    /// Get page count for the given text
    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self, text: &str) -> usize {
        self.run(text).page_count()
    }
}

impl WasmPaginator {
    fn run(&self, text: &str) -> Pagination {
        paginate(
            split_paragraphs(text),
            &self.setup.geometry(),
            self.variant,
            &self.measurer,
        )
    }

    fn paginate_json(&self, text: &str) -> Result<String> {
        let pagination = self.run(text);
        let (sheet_width, sheet_height) = self.setup.sheet_size();
        let data = PaginationData {
            sheet_width,
            sheet_height,
            pages: pagination
                .iter()
                .map(|(page, paragraphs)| PageData {
                    page_index: page.page_index,
                    is_first: page.is_first,
                    is_last: page.is_last,
                    available_height: page.available_height,
                    content_height: page.content_height,
                    paragraphs,
                })
                .collect(),
        };
        Ok(serde_json::to_string(&data)?)
    }
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable pagination for JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaginationData<'a> {
    sheet_width: f32,
    sheet_height: f32,
    pages: Vec<PageData<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    page_index: usize,
    is_first: bool,
    is_last: bool,
    available_height: f32,
    content_height: f32,
    paragraphs: &'a [String],
}

/// Compute the vacation entitlement.
///
/// `payments_json` is the extracted record list, `abnormal_json` maps
/// years to declared abnormal months. Returns the result as JSON.
#[wasm_bindgen(js_name = computeEntitlement)]
pub fn compute_entitlement(
    payments_json: &str,
    abnormal_json: &str,
    base_days: u32,
) -> std::result::Result<String, JsValue> {
    Ok(entitlement_json(payments_json, abnormal_json, base_days)?)
}

fn entitlement_json(payments_json: &str, abnormal_json: &str, base_days: u32) -> Result<String> {
    let payments = parse_payments(payments_json)?;
    let declared: BTreeMap<i32, i64> = if abnormal_json.trim().is_empty() {
        BTreeMap::new()
    } else {
        serde_json::from_str(abnormal_json)?
    };
    let declared: AbnormalMonths = declared.into_iter().collect();
    let result = EntitlementCalculator::new(base_days).compute(&payments, &declared);
    Ok(serde_json::to_string(&result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_paginate_json_shape() {
        let paginator = WasmPaginator::new();
        let json = paginator.paginate_json("Эрхэм захирал аа,\n\nБаярлалаа.").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sheetWidth"], 210.0);
        assert_eq!(value["pages"].as_array().unwrap().len(), 1);
        assert_eq!(value["pages"][0]["isLast"], true);
        assert_eq!(value["pages"][0]["paragraphs"][1], "");
    }

    #[test]
    fn test_addressee_block_reduces_first_page() {
        let mut paginator = WasmPaginator::new();
        let text = vec!["Мөр"; 30].join("\n");
        let plain = paginator.run(&text).pages()[0].available_height;
        paginator.set_addressee_block(true);
        let addressed = paginator.run(&text).pages()[0].available_height;
        assert_eq!(plain - addressed, 30.0);
    }

    #[test]
    fn test_entitlement_json() {
        let payments = r#"[
            {"year":2020,"month":1,"organization":"A","paid":true},
            {"year":2020,"month":1,"organization":"B","paid":true},
            {"year":2020,"month":2,"organization":"A","paid":true}
        ]"#;
        let json = entitlement_json(payments, r#"{"2020": 5}"#, 20).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalMonths"], 2);
        assert_eq!(value["totalAbnormalMonths"], 2);
        assert_eq!(value["totalDays"], 20);

        let json = entitlement_json(payments, "", 15).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalDays"], 15);
    }

    #[test]
    fn test_entitlement_json_rejects_bad_month() {
        let err = entitlement_json(r#"[{"year":2020,"month":0,"paid":true}]"#, "", 15).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}

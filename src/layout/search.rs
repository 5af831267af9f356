//! Simulated SKU lookup
//!
//! There is no inventory behind the layout; a SKU "lives" in every cell whose
//! id bytes and SKU bytes sum to a multiple of 20. Stable for a given layout,
//! which is all the highlight overlay needs.

use crate::layout::builder::WarehouseLayout;
use crate::layout::cell::Cell;
use tracing::debug;

/// Most cells a single search returns
pub const MAX_SKU_RESULTS: usize = 10;

fn byte_sum(s: &str) -> u64 {
    s.bytes().map(u64::from).sum()
}

impl WarehouseLayout {
    /// Cells the given SKU is simulated to occupy, in layout order
    pub fn search_sku(&self, sku: &str) -> Vec<&Cell> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Vec::new();
        }

        let sku_sum = byte_sum(sku);
        let matches: Vec<&Cell> = self
            .cells
            .iter()
            .filter(|cell| (byte_sum(cell.cell_id.as_str()) + sku_sum) % 20 == 0)
            .take(MAX_SKU_RESULTS)
            .collect();

        debug!(sku, matches = matches.len(), "Simulated SKU search");
        matches
    }
}
